//! Turning document files into text.

use super::{DocumentSet, DocumentStatus};
use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use std::path::Path;

/// Something that can produce the text behind a document's path.
#[allow(async_fn_in_trait)]
pub trait ContentLoader {
    async fn load(&self, path: &Path) -> Result<String>;
}

/// Loads documents from the local filesystem as UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl ContentLoader for FsLoader {
    async fn load(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        String::from_utf8(bytes)
            .with_context(|| format!("{} isn't valid UTF-8 text", path.display()))
    }
}

/// Load every document that is still `Processing`, one at a time, in order.
///
/// Failures don't stop the loop: the document is marked `Failed` and the
/// rest keep loading.
pub async fn load_all<L: ContentLoader>(
    documents: &mut DocumentSet,
    loader: &L,
    progress: &ProgressBar,
) -> Result<()> {
    let pending: Vec<_> = documents
        .iter()
        .filter(|d| d.status == DocumentStatus::Processing)
        .map(|d| (d.id, d.title.clone(), d.path.clone()))
        .collect();

    for (id, title, path) in pending {
        progress.set_message(title.clone());
        let content = match &path {
            Some(path) => loader.load(path).await,
            None => Err(anyhow!("'{title}' has no file to load from")),
        };
        log::debug!("Loaded '{title}': {}", if content.is_ok() { "ok" } else { "failed" });
        documents.complete(id, content)?;
        progress.inc(1);
    }

    Ok(())
}
