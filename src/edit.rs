//! Editing the document list in an existing `epub-pack.toml`.
//!
//! Positions on the command line are 1-based, as printed by `list`. Every
//! edit loads the config, changes the list and writes it straight back.

use crate::config_wizard::{Configuration, DocumentEntry};
use crate::document::{load_all, DocumentStatus, FsLoader};
use anyhow::{anyhow, Result};
use byte_unit::{Byte, UnitType};
use console::style;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Append documents to the end of the list.
pub fn add(config_path: &Path, paths: &[PathBuf]) -> Result<()> {
    let mut config = Configuration::load(config_path)?;
    for path in paths {
        if !path.is_file() {
            log::warn!("{} doesn't exist yet; adding it anyway", path.display());
        }
        let entry = DocumentEntry::from_path(path);
        println!("  Added {}", entry.title);
        config.documents.push(entry);
    }
    config.save(config_path)
}

/// Remove the document at 1-based `position`.
pub fn remove(config_path: &Path, position: usize) -> Result<()> {
    let mut config = Configuration::load(config_path)?;
    let mut documents = config.document_set();
    let index = to_index(position, documents.len())?;
    let id = documents
        .iter()
        .nth(index)
        .map(|d| d.id)
        .ok_or_else(|| anyhow!("No document at position {position}"))?;
    if let Some(removed) = documents.remove(id) {
        println!("  Removed {}", removed.title);
    }
    config.set_documents(&documents);
    config.save(config_path)
}

/// Move the document at 1-based `from` so that it ends up at `to`.
pub fn move_document(config_path: &Path, from: usize, to: usize) -> Result<()> {
    let mut config = Configuration::load(config_path)?;
    let mut documents = config.document_set();
    let len = documents.len();
    let (from, to) = (to_index(from, len)?, to_index(to, len)?);
    documents.move_document(from, to)?;
    if let Some(moved) = documents.iter().nth(to) {
        println!("  Moved {} to position {}", moved.title, to + 1);
    }
    config.set_documents(&documents);
    config.save(config_path)
}

/// Load every document and print the list with its status.
pub async fn list(config_path: &Path) -> Result<()> {
    let config = Configuration::load(config_path)?;
    let mut documents = config.document_set();
    if documents.is_empty() {
        println!("No documents yet; add some with 'epub-pack add'.");
        return Ok(());
    }

    load_all(&mut documents, &FsLoader, &ProgressBar::hidden()).await?;

    for (i, document) in documents.iter().enumerate() {
        let status = match document.status {
            DocumentStatus::Done => style(document.status.to_string()).green(),
            DocumentStatus::Failed => style(document.status.to_string()).red(),
            DocumentStatus::Processing => style(document.status.to_string()).yellow(),
        };
        let size = document
            .content
            .as_ref()
            .map(|c| {
                let bytes = Byte::from_u64(c.len() as u64);
                format!("{:.2}", bytes.get_appropriate_unit(UnitType::Binary))
            })
            .unwrap_or_else(|| "-".to_string());
        println!("{:>4}. {:<40} {:>12}  {}", i + 1, document.title, size, status);
    }

    Ok(())
}

fn to_index(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        Err(anyhow!(
            "Position {position} is out of range: there are {len} document(s)"
        ))
    } else {
        Ok(position - 1)
    }
}
