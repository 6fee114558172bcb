//! @ai:module:intent Write documents.json entries out as .eml and .md files
//! @ai:module:layer infrastructure
//! @ai:module:public_api FileGenerator, FileGeneratorTrait, GenerationSummary, DocumentFormat

pub mod format;
pub mod render;

pub use format::DocumentFormat;
pub use render::{render_eml, render_markdown};

use crate::dataset::{Document, DocumentSet};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// @ai:intent Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generated: usize,
    pub skipped: usize,
    pub files: Vec<PathBuf>,
}

/// @ai:intent Trait for document file generation
pub trait FileGeneratorTrait: Send + Sync {
    /// @ai:intent Write every supported document into the output directory
    fn generate(&self, documents: &DocumentSet, output_dir: &Path) -> Result<GenerationSummary>;
}

/// @ai:intent Emits text documents; binary office formats are skipped
pub struct FileGenerator;

impl FileGenerator {
    /// @ai:intent Create a new file generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Write one document, returning its path
    /// @ai:effects fs:write
    pub fn generate_document(&self, document: &Document, output_dir: &Path) -> Result<PathBuf> {
        let format = DocumentFormat::resolve(document);

        let content = match format {
            DocumentFormat::Eml => render_eml(document)?,
            DocumentFormat::Markdown => render_markdown(document),
            other => {
                return Err(Error::UnsupportedFormat {
                    id: document.id.clone(),
                    format: match other {
                        DocumentFormat::Unknown => {
                            format!("{}/{}", document.doc_type(), document.format())
                        }
                        _ => other.extension().to_string(),
                    },
                })
            }
        };

        let path = output_dir.join(file_name(document, format));
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

impl Default for FileGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileGeneratorTrait for FileGenerator {
    /// @ai:intent Generate all documents; per-document failures are logged and counted as skipped
    /// @ai:effects fs:write
    fn generate(&self, documents: &DocumentSet, output_dir: &Path) -> Result<GenerationSummary> {
        std::fs::create_dir_all(output_dir)?;

        tracing::info!(
            "Generating {} files to {}",
            documents.documents.len(),
            output_dir.display()
        );

        let mut summary = GenerationSummary::default();

        for document in &documents.documents {
            match self.generate_document(document, output_dir) {
                Ok(path) => {
                    tracing::info!("  {}: {}", document.id, path.display());
                    summary.generated += 1;
                    summary.files.push(path);
                }
                Err(Error::UnsupportedFormat { id, format }) => {
                    tracing::debug!("Skipping {} ({})", id, format);
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!("Error generating {}: {}", document.id, e);
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(
            "Done: {} generated, {} skipped",
            summary.generated,
            summary.skipped
        );

        Ok(summary)
    }
}

/// @ai:intent Declared filename, or "<id>.<ext>" when the document has none
/// @ai:effects pure
fn file_name(document: &Document, format: DocumentFormat) -> String {
    document
        .filename
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{}.{}", document.id, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Recipient;
    use tempfile::TempDir;

    fn document_set() -> DocumentSet {
        serde_json::from_value(serde_json::json!({
            "meta": {"company": "Test"},
            "documents": [
                {"id": "doc_001", "type": "email_internal", "format": "eml",
                 "timestamp": "2023-07-26T14:30:00+02:00", "author": "Maciej Boryna",
                 "author_email": "m.boryna@example.pl", "filename": "doc_001.eml",
                 "recipients": [{"name": "Anna Nowak", "email": "a.nowak@example.pl"}],
                 "subject": "Start", "body": "Treść"},
                {"id": "doc_002", "type": "meeting_notes", "timestamp": "2023-08-01",
                 "author": "Anna Nowak", "title": "Spotkanie", "content": "Notatki"},
                {"id": "doc_003", "type": "report_quarterly", "format": "docx",
                 "timestamp": "2023-09-30", "author": "Zarząd", "filename": "q3.docx"},
                {"id": "doc_004", "type": "scan", "format": "pdf", "timestamp": "2023-10-01",
                 "author": "Biuro"},
                {"id": "doc_005", "type": "email_client", "timestamp": "nie wiadomo",
                 "author": "X", "filename": "doc_005.eml"},
                {"id": "doc_006", "type": "memo", "timestamp": "2023-10-02", "author": "Y"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_generate_counts_generated_and_skipped() {
        let temp = TempDir::new().unwrap();
        let summary = FileGenerator::new()
            .generate(&document_set(), temp.path())
            .unwrap();

        assert_eq!(summary.generated, 2);
        assert_eq!(summary.skipped, 4);
        assert!(temp.path().join("doc_001.eml").exists());
        assert!(temp.path().join("doc_002.md").exists());
        assert!(!temp.path().join("q3.docx").exists());
        assert!(!temp.path().join("doc_005.eml").exists());
    }

    #[test]
    fn test_generated_email_content() {
        let temp = TempDir::new().unwrap();
        FileGenerator::new()
            .generate(&document_set(), temp.path())
            .unwrap();

        let content = std::fs::read_to_string(temp.path().join("doc_001.eml")).unwrap();
        assert!(content.starts_with("From: Maciej Boryna <m.boryna@example.pl>\n"));
        assert!(content.ends_with("\n\nTreść\n"));
    }

    #[test]
    fn test_unsupported_format_error() {
        let temp = TempDir::new().unwrap();
        let document = Document {
            id: "doc_010".to_string(),
            doc_type: Some("presentation_board".to_string()),
            ..Default::default()
        };
        let err = FileGenerator::new()
            .generate_document(&document, temp.path())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref format, .. } if format == "pptx"));
    }

    #[test]
    fn test_filename_falls_back_to_id() {
        let document = Document {
            id: "doc_011".to_string(),
            recipients: vec![Recipient::default()],
            ..Default::default()
        };
        assert_eq!(file_name(&document, DocumentFormat::Eml), "doc_011.eml");
    }
}
