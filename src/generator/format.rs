//! @ai:module:intent Resolve the output file format of a document
//! @ai:module:layer domain
//! @ai:module:public_api DocumentFormat
//! @ai:module:stateless true

use crate::dataset::Document;

const REPORT_TYPES: [&str; 4] = [
    "report_quarterly",
    "report_monthly",
    "report_project",
    "proposal",
];

/// @ai:intent File format a document is emitted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Eml,
    Markdown,
    Docx,
    Xlsx,
    Pptx,
    Pdf,
    Unknown,
}

impl DocumentFormat {
    /// @ai:intent Pick a format from the explicit format field, falling back to the document type
    /// @ai:effects pure
    pub fn resolve(document: &Document) -> Self {
        let format = document.format();
        let doc_type = document.doc_type();

        if format == "eml" || doc_type.contains("email") {
            DocumentFormat::Eml
        } else if format == "md" || matches!(doc_type, "meeting_notes" | "project_kickoff") {
            DocumentFormat::Markdown
        } else if format == "docx" || REPORT_TYPES.contains(&doc_type) {
            DocumentFormat::Docx
        } else if format == "xlsx" || doc_type.contains("spreadsheet") {
            DocumentFormat::Xlsx
        } else if format == "pptx" || doc_type.contains("presentation") {
            DocumentFormat::Pptx
        } else if format == "pdf" {
            DocumentFormat::Pdf
        } else {
            DocumentFormat::Unknown
        }
    }

    /// Formats written as text by this crate.
    pub fn is_text(&self) -> bool {
        matches!(self, DocumentFormat::Eml | DocumentFormat::Markdown)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Eml => "eml",
            DocumentFormat::Markdown => "md",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Xlsx => "xlsx",
            DocumentFormat::Pptx => "pptx",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(doc_type: &str, format: Option<&str>) -> Document {
        Document {
            id: "doc_001".to_string(),
            doc_type: Some(doc_type.to_string()),
            format: format.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_field_wins() {
        assert_eq!(DocumentFormat::resolve(&doc("report_monthly", Some("md"))), DocumentFormat::Markdown);
        assert_eq!(DocumentFormat::resolve(&doc("memo", Some("pdf"))), DocumentFormat::Pdf);
    }

    #[test]
    fn test_type_fallbacks() {
        assert_eq!(DocumentFormat::resolve(&doc("email_internal", None)), DocumentFormat::Eml);
        assert_eq!(DocumentFormat::resolve(&doc("project_kickoff", None)), DocumentFormat::Markdown);
        assert_eq!(DocumentFormat::resolve(&doc("proposal", None)), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::resolve(&doc("spreadsheet_budget", None)), DocumentFormat::Xlsx);
        assert_eq!(DocumentFormat::resolve(&doc("presentation_sales", None)), DocumentFormat::Pptx);
        assert_eq!(DocumentFormat::resolve(&doc("memo", None)), DocumentFormat::Unknown);
    }

    #[test]
    fn test_email_type_beats_other_format() {
        assert_eq!(DocumentFormat::resolve(&doc("email_client", Some("docx"))), DocumentFormat::Eml);
    }

    #[test]
    fn test_text_formats() {
        assert!(DocumentFormat::Eml.is_text());
        assert!(DocumentFormat::Markdown.is_text());
        assert!(!DocumentFormat::Pdf.is_text());
    }
}
