//! EPUB output configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_EPUB_FILENAME: &str = "combined_output.epub";
pub const DEFAULT_TITLE: &str = "Combined Documents";

/// EPUB output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
#[serde(default)]
pub struct EPUB {
    /// Output EPUB file path
    pub outfile: PathBuf,
    /// Book title written to the package metadata and navigation document
    pub title: String,
}

impl Default for EPUB {
    fn default() -> Self {
        Self {
            outfile: PathBuf::from(DEFAULT_EPUB_FILENAME),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}
