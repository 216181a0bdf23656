//! Auto-detection of documents and defaults for the config wizard.
//!
//! Scans a directory for plain-text documents and suggests a book title
//! based on the directory name.

use crate::file_ordering::sort_paths;
use anyhow::{anyhow, Context, Result};
use globset::GlobMatcher;
use ignore::Walk;
use std::path::{Path, PathBuf};

/// Extensions treated as plain-text documents.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "rst"];

/// Find every text document under `root`, honouring `.gitignore` files and
/// skipping anything matched by a `block` glob.
///
/// Returned paths are relative to `root` and sorted naturally.
pub fn detect_documents(root: &Path, block: &[GlobMatcher]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(anyhow!("Path {} isn't a directory!", root.display()));
    }

    let mut documents = Vec::new();
    for entry in Walk::new(root) {
        let entry = entry.with_context(|| "Failed to walk document directory")?;
        let path = entry.path();
        if !path.is_file() || !is_text_document(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        if block.iter().any(|glob| glob.is_match(&relative)) {
            log::debug!("Skipping blocked file {}", relative.display());
            continue;
        }
        documents.push(relative);
    }

    sort_paths(&mut documents);
    Ok(documents)
}

fn is_text_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
        .unwrap_or(false)
}

/// The title a document gets when it's added: its file name.
pub fn document_title(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Detect a book title from directory name.
///
/// Transforms the directory name into a readable title by replacing
/// hyphens and underscores with spaces and applying title case.
pub fn detect_title(dir: &Path) -> Option<String> {
    let canonical = dir.canonicalize().ok()?;
    let dir_name = canonical.file_name()?.to_str()?;

    let title = dir_name
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
