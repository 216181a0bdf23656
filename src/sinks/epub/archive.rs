//! Assembling the EPUB container.
//!
//! Everything up to the final ZIP serialization is synchronous: chapters are
//! compiled and every archive member is rendered into memory before the
//! single `await`, so a build in progress never exposes partial state.

use super::chapter::{Aggregates, Chapter};
use super::styles::STYLESHEET;
use super::templates::{self, CONTAINER_XML, TOC_TITLE};
use crate::document::Document;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const MIMETYPE: &str = "application/epub+zip";

/// Deflate level for every member except `mimetype`.
const COMPRESSION_LEVEL: i64 = 9;

/// Source of the book's unique identifier. The same value is written to the
/// OPF package and the NCX navigation document.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random (v4) UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUuid;

impl IdGenerator for RandomUuid {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[derive(Debug)]
struct Member {
    path: String,
    data: Vec<u8>,
    stored: bool,
}

/// An archive that has been filled but not yet written out.
#[derive(Debug, Default)]
pub struct Archive {
    members: Vec<Member>,
}

impl Archive {
    fn add_stored<P: ToString, D: Into<Vec<u8>>>(&mut self, path: P, data: D) {
        self.members.push(Member {
            path: path.to_string(),
            data: data.into(),
            stored: true,
        });
    }

    fn add<P: ToString, D: Into<Vec<u8>>>(&mut self, path: P, data: D) {
        self.members.push(Member {
            path: path.to_string(),
            data: data.into(),
            stored: false,
        });
    }

    /// Member paths in the order they will be written.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.path.as_str())
    }

    /// Write every member into a ZIP container, in insertion order.
    pub fn finish(self) -> Result<Vec<u8>> {
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(COMPRESSION_LEVEL));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for member in self.members {
            let options = if member.stored { stored } else { deflated };
            zip.start_file(member.path.as_str(), options)
                .with_context(|| format!("Failed to start archive entry {}", member.path))?;
            zip.write_all(&member.data)
                .with_context(|| format!("Failed to write archive entry {}", member.path))?;
        }

        let cursor = zip.finish().with_context(|| "Failed to finalise EPUB archive")?;
        Ok(cursor.into_inner())
    }
}

/// Render every member of the book into an [`Archive`], without serializing.
///
/// `mimetype` is always the first member and the only uncompressed one.
/// Chapters keep the order of `documents` in the manifest, the spine and the
/// navigation map.
pub fn build(documents: &[Document], title: &str, uuid: &str, date: NaiveDate) -> Archive {
    let mut archive = Archive::default();
    archive.add_stored("mimetype", MIMETYPE);
    archive.add("META-INF/container.xml", CONTAINER_XML);
    archive.add("OEBPS/stylesheet.css", STYLESHEET);

    let mut aggregates = Aggregates::default();
    for (index, document) in documents.iter().enumerate() {
        let chapter = Chapter::compile(document, index);
        log::debug!("Compiled '{}' as {}", document.title, chapter.filename);
        aggregates.push(&chapter);
        archive.add(format!("OEBPS/{}", chapter.filename), chapter.xhtml);
    }

    let title = super::escape::escape(title);
    let toc = templates::xhtml_document(TOC_TITLE, &templates::toc_body(&aggregates.toc));
    archive.add("OEBPS/toc.xhtml", toc);
    archive.add(
        "OEBPS/toc.ncx",
        templates::ncx_document(&title, uuid, &aggregates.nav_points),
    );
    archive.add(
        "OEBPS/content.opf",
        templates::opf_document(&title, uuid, date, &aggregates.manifest, &aggregates.spine),
    );

    archive
}

/// Assemble `documents` into a complete EPUB file.
///
/// Either the whole archive is returned or an error is; a failed build never
/// yields partial bytes.
pub async fn assemble<G: IdGenerator>(
    documents: &[Document],
    title: &str,
    ids: &G,
    date: NaiveDate,
) -> Result<Vec<u8>> {
    let uuid = ids.generate();
    let archive = build(documents, title, &uuid, date);
    log::debug!("Archive members: {:?}", archive.paths().collect::<Vec<_>>());
    log::info!(
        "Packaging {} chapter(s) into an EPUB ({uuid})",
        documents.len()
    );

    tokio::task::spawn_blocking(move || archive.finish())
        .await
        .with_context(|| "EPUB serialization was interrupted")?
}
