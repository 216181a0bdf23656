use crate::document::Document;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

mod epub;
pub use epub::*;

mod text;
pub use text::*;

/// A finished export: the bytes plus the file name they should be saved as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Blob {
    fn named(outfile: &Path, bytes: Vec<u8>) -> Result<Blob> {
        let filename = outfile
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Output path {} has no file name", outfile.display()))?;
        Ok(Blob { filename, bytes })
    }
}

/// Somewhere a finished [`Blob`] can be handed off to the user.
pub trait Deliver {
    /// Returns where the blob ended up.
    fn deliver(&self, blob: &Blob) -> Result<PathBuf>;
}

/// Saves blobs into a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    pub directory: PathBuf,
}

impl FileSink {
    /// A sink writing next to `outfile`.
    pub fn beside(outfile: &Path) -> FileSink {
        let directory = outfile
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        FileSink { directory }
    }
}

impl Deliver for FileSink {
    fn deliver(&self, blob: &Blob) -> Result<PathBuf> {
        if !self.directory.as_os_str().is_empty() {
            std::fs::create_dir_all(&self.directory).with_context(|| {
                format!("Failed to create directory {}", self.directory.display())
            })?;
        }
        let path = self.directory.join(&blob.filename);
        std::fs::write(&path, &blob.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Package a snapshot of the documents as an EPUB.
pub async fn export_epub<G: IdGenerator>(
    documents: &[Document],
    config: &EPUB,
    ids: &G,
    date: NaiveDate,
) -> Result<Blob> {
    let bytes = assemble(documents, &config.title, ids, date)
        .await
        .with_context(|| "Failed to generate EPUB")?;
    Blob::named(&config.outfile, bytes)
}

/// Concatenate a snapshot of the documents into a single text file.
pub async fn export_text(documents: &[Document], config: &Text) -> Result<Blob> {
    let text = concatenate(documents);
    Blob::named(&config.outfile, text.into_bytes())
}
