//! The ordered set of documents a book is assembled from.
//!
//! A [`DocumentSet`] is the only mutable view of the documents. Packaging
//! always works from a [`DocumentSet::snapshot`], so reordering or removing
//! documents can never affect an export that is already underway.

use crate::file_ordering::array_move;
use anyhow::{anyhow, Result};
use std::fmt;
use std::path::{Path, PathBuf};

mod loader;
pub use loader::*;

/// Identifier of a document within one [`DocumentSet`]. Never reused, even
/// after the document it named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Processing,
    Done,
    Failed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Processing => write!(f, "processing"),
            DocumentStatus::Done => write!(f, "done"),
            DocumentStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    /// Display title. May contain any character at all.
    pub title: String,
    /// Where the content is loaded from, if it comes from disk.
    pub path: Option<PathBuf>,
    /// `None` until loading succeeds.
    pub content: Option<String>,
    pub status: DocumentStatus,
}

impl Document {
    pub fn is_loaded(&self) -> bool {
        self.status != DocumentStatus::Processing
    }
}

#[derive(Debug, Default)]
pub struct DocumentSet {
    documents: Vec<Document>,
    next_id: u64,
}

impl DocumentSet {
    /// Append a new document in the `Processing` state.
    pub fn register<S: ToString>(&mut self, title: S, path: Option<&Path>) -> DocumentId {
        self.next_id += 1;
        let id = DocumentId(self.next_id);
        self.documents.push(Document {
            id,
            title: title.to_string(),
            path: path.map(Path::to_path_buf),
            content: None,
            status: DocumentStatus::Processing,
        });
        id
    }

    /// Record the outcome of loading a document's content.
    ///
    /// Content is attached at most once; completing a document that already
    /// finished loading is an error.
    pub fn complete(&mut self, id: DocumentId, content: Result<String>) -> Result<()> {
        let document = self
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| anyhow!("No document with id {id}"))?;

        if document.is_loaded() {
            return Err(anyhow!(
                "Document {id} ('{}') has already been loaded",
                document.title
            ));
        }

        match content {
            Ok(content) => {
                document.content = Some(content);
                document.status = DocumentStatus::Done;
            }
            Err(e) => {
                log::warn!("Failed to load '{}': {e:#}", document.title);
                document.status = DocumentStatus::Failed;
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<Document> {
        let index = self.documents.iter().position(|d| d.id == id)?;
        Some(self.documents.remove(index))
    }

    /// Move the document at 0-based position `from` so it ends up at `to`.
    pub fn move_document(&mut self, from: usize, to: usize) -> Result<()> {
        array_move(&mut self.documents, from, to)
    }

    #[cfg(test)]
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// An immutable copy of the documents in their current order.
    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.clone()
    }
}
