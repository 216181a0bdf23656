//! Plain-text output: every document's title and content, one after the
//! other, with a separator line between documents. Nothing is escaped.

use super::epub::MISSING_CONTENT;
use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TEXT_FILENAME: &str = "combined_output.txt";

const SEPARATOR: &str = "------------------------";

/// Text output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    /// Output text file path
    pub outfile: PathBuf,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            outfile: PathBuf::from(DEFAULT_TEXT_FILENAME),
        }
    }
}

/// Concatenate `documents` into one UTF-8 buffer.
pub fn concatenate(documents: &[Document]) -> String {
    let mut out = String::new();
    for (i, document) in documents.iter().enumerate() {
        if i > 0 {
            out.push_str(SEPARATOR);
            out.push_str("\n\n");
        }
        out.push_str(&document.title);
        out.push_str("\n\n");
        out.push_str(document.content.as_deref().unwrap_or(MISSING_CONTENT));
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentId, DocumentStatus};

    fn document(title: &str, content: Option<&str>) -> Document {
        Document {
            id: DocumentId(1),
            title: title.to_string(),
            path: None,
            content: content.map(ToString::to_string),
            status: if content.is_some() {
                DocumentStatus::Done
            } else {
                DocumentStatus::Failed
            },
        }
    }

    #[test]
    fn can_concatenate_two_documents() {
        let docs = vec![document("A", Some("x")), document("B", Some("y"))];
        assert_eq!(
            concatenate(&docs),
            "A\n\nx\n\n------------------------\n\nB\n\ny\n\n"
        );
    }

    #[test]
    fn can_concatenate_nothing() {
        assert_eq!(concatenate(&[]), "");
    }

    #[test]
    fn does_not_escape_markup() {
        let docs = vec![document("<b>&</b>", Some("a < b"))];
        assert_eq!(concatenate(&docs), "<b>&</b>\n\na < b\n\n");
    }

    #[test]
    fn can_substitute_missing_content() {
        let docs = vec![document("Gone", None)];
        assert_eq!(concatenate(&docs), "Gone\n\n[No content available]\n\n");
    }
}
