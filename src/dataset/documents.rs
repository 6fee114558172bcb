//! @ai:module:intent Synthetic document definitions from documents.json
//! @ai:module:layer domain
//! @ai:module:public_api DocumentSet, Document, Recipient, ActionItem
//! @ai:module:stateless true

use crate::dataset::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// @ai:intent Contents of documents.json
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSet {
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// @ai:intent One synthetic document; format-specific fields are optional
/// @ai:effects pure
///
/// Required fields are kept optional here so that a malformed document can be
/// reported by validation instead of failing the whole load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients_mentioned: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planted_facts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    // email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    pub recipients: Vec<Recipient>,
    pub cc: Vec<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    // meeting notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<ActionItem>>,
}

impl Document {
    pub fn doc_type(&self) -> &str {
        self.doc_type.as_deref().unwrap_or("")
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or("")
    }

    pub fn is_pdf(&self) -> bool {
        self.format() == "pdf"
    }

    /// @ai:intent Parse the timestamp field; a missing field is an invalid timestamp
    /// @ai:effects pure
    pub fn parsed_timestamp(&self) -> crate::error::Result<Timestamp> {
        Timestamp::parse(&self.id, self.timestamp.as_deref().unwrap_or(""))
    }

    /// @ai:intent Planted fact ids, empty when the field is absent
    /// @ai:effects pure
    pub fn planted(&self) -> &[String] {
        self.planted_facts.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub owner: String,
    pub due: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_document() {
        let json = r#"{
            "meta": {"company": "Kreatywna Agencja"},
            "documents": [{
                "id": "doc_001",
                "type": "email_internal",
                "format": "eml",
                "timestamp": "2023-07-26T09:15:00+02:00",
                "author": "Maciej Boryna",
                "author_email": "maciej@example.pl",
                "recipients": [{"name": "Anna Kowalska", "email": "anna@example.pl"}],
                "subject": "Budżet",
                "body": "Treść",
                "filename": "doc_001.eml",
                "clients_mentioned": ["Smakosz"],
                "planted_facts": ["fact_001"]
            }]
        }"#;
        let set: DocumentSet = serde_json::from_str(json).unwrap();
        let doc = &set.documents[0];

        assert_eq!(doc.doc_type(), "email_internal");
        assert_eq!(doc.recipients[0].name, "Anna Kowalska");
        assert!(doc.cc.is_empty());
        assert_eq!(doc.planted(), &["fact_001".to_string()]);
        assert!(!doc.is_pdf());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let doc: Document = serde_json::from_str(r#"{"id": "doc_002"}"#).unwrap();
        assert_eq!(doc.format(), "");
        assert!(doc.planted_facts.is_none());
        assert!(doc.planted().is_empty());
        assert!(doc.recipients.is_empty());
    }
}
