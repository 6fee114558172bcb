//! @ai:module:intent Render documents as RFC 822 email and Markdown text
//! @ai:module:layer domain
//! @ai:module:public_api render_eml, render_markdown
//! @ai:module:stateless true

use crate::dataset::{Document, Recipient};
use crate::error::Result;
use std::fmt::Write as FmtWrite;

fn address_list(recipients: &[Recipient]) -> String {
    recipients
        .iter()
        .map(|r| format!("{} <{}>", r.name, r.email))
        .collect::<Vec<_>>()
        .join(", ")
}

/// @ai:intent Render an email document with From/To/Cc/Date/Subject headers
/// @ai:pre document.timestamp parses
/// @ai:effects pure
pub fn render_eml(document: &Document) -> Result<String> {
    let timestamp = document.parsed_timestamp()?;
    let mut output = String::new();

    writeln!(
        output,
        "From: {} <{}>",
        document.author.as_deref().unwrap_or(""),
        document.author_email.as_deref().unwrap_or("")
    )
    .unwrap();
    writeln!(output, "To: {}", address_list(&document.recipients)).unwrap();
    if !document.cc.is_empty() {
        writeln!(output, "Cc: {}", address_list(&document.cc)).unwrap();
    }
    writeln!(output, "Date: {}", timestamp.email_date()).unwrap();
    writeln!(output, "Subject: {}", document.subject.as_deref().unwrap_or("")).unwrap();
    writeln!(output, "Content-Type: text/plain; charset=utf-8").unwrap();
    writeln!(output, "MIME-Version: 1.0").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "{}", document.body.as_deref().unwrap_or("")).unwrap();

    Ok(output)
}

/// @ai:intent Render meeting notes and other text documents as Markdown
/// @ai:effects pure
pub fn render_markdown(document: &Document) -> String {
    let mut output = String::new();

    writeln!(output, "# {}", document.title.as_deref().unwrap_or("")).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "**Author:** {}", document.author.as_deref().unwrap_or("")).unwrap();
    writeln!(output, "**Date:** {}", document.timestamp.as_deref().unwrap_or("")).unwrap();
    writeln!(output).unwrap();

    if let Some(attendees) = &document.attendees {
        writeln!(output, "**Attendees:** {}", attendees.join(", ")).unwrap();
    }
    if let Some(location) = &document.location {
        writeln!(output, "**Location:** {}", location).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output).unwrap();
    output.push_str(document.content.as_deref().unwrap_or(""));

    if let Some(items) = &document.action_items {
        output.push_str("\n\n## Action Items\n\n");
        for item in items {
            writeln!(output, "- [ ] {} ({}, due: {})", item.task, item.owner, item.due).unwrap();
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ActionItem;
    use pretty_assertions::assert_eq;

    fn recipient(name: &str, email: &str) -> Recipient {
        Recipient {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    fn email() -> Document {
        Document {
            id: "doc_001".to_string(),
            doc_type: Some("email_internal".to_string()),
            timestamp: Some("2023-07-26T14:30:00+02:00".to_string()),
            author: Some("Maciej Boryna".to_string()),
            author_email: Some("m.boryna@example.pl".to_string()),
            recipients: vec![recipient("Anna Nowak", "a.nowak@example.pl")],
            subject: Some("Harmonogram".to_string()),
            body: Some("Dzień dobry,\nprojekt startuje w poniedziałek.".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_eml_without_cc() {
        let rendered = render_eml(&email()).unwrap();
        assert_eq!(
            rendered,
            "From: Maciej Boryna <m.boryna@example.pl>\n\
             To: Anna Nowak <a.nowak@example.pl>\n\
             Date: Wed, 26 Jul 2023 14:30:00 +0200\n\
             Subject: Harmonogram\n\
             Content-Type: text/plain; charset=utf-8\n\
             MIME-Version: 1.0\n\
             \n\
             Dzień dobry,\nprojekt startuje w poniedziałek.\n"
        );
    }

    #[test]
    fn test_render_eml_with_cc_on_own_line() {
        let mut document = email();
        document.cc = vec![
            recipient("Jan Kowalski", "j.kowalski@example.pl"),
            recipient("Ewa Lis", "e.lis@example.pl"),
        ];
        let rendered = render_eml(&document).unwrap();
        assert!(rendered.contains(
            "\nCc: Jan Kowalski <j.kowalski@example.pl>, Ewa Lis <e.lis@example.pl>\nDate: "
        ));
    }

    #[test]
    fn test_render_eml_rejects_bad_timestamp() {
        let mut document = email();
        document.timestamp = Some("wczoraj".to_string());
        assert!(render_eml(&document).is_err());
    }

    #[test]
    fn test_render_markdown_with_meeting_fields() {
        let document = Document {
            id: "doc_002".to_string(),
            doc_type: Some("meeting_notes".to_string()),
            timestamp: Some("2023-08-01T10:00:00".to_string()),
            author: Some("Anna Nowak".to_string()),
            title: Some("Spotkanie otwierające".to_string()),
            content: Some("Omówiono zakres.".to_string()),
            attendees: Some(vec!["Anna Nowak".to_string(), "Jan Kowalski".to_string()]),
            location: Some("Sala A".to_string()),
            action_items: Some(vec![ActionItem {
                task: "Przygotować budżet".to_string(),
                owner: "Jan Kowalski".to_string(),
                due: "2023-08-15".to_string(),
            }]),
            ..Default::default()
        };

        assert_eq!(
            render_markdown(&document),
            "# Spotkanie otwierające\n\n\
             **Author:** Anna Nowak\n\
             **Date:** 2023-08-01T10:00:00\n\n\
             **Attendees:** Anna Nowak, Jan Kowalski\n\
             **Location:** Sala A\n\
             \n---\n\n\
             Omówiono zakres.\n\n\
             ## Action Items\n\n\
             - [ ] Przygotować budżet (Jan Kowalski, due: 2023-08-15)\n"
        );
    }

    #[test]
    fn test_render_markdown_minimal() {
        let document = Document {
            id: "doc_003".to_string(),
            title: Some("Notatka".to_string()),
            content: Some("Treść".to_string()),
            ..Default::default()
        };
        let rendered = render_markdown(&document);
        assert!(rendered.ends_with("\n---\n\nTreść"));
        assert!(!rendered.contains("Action Items"));
    }
}
