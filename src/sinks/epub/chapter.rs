//! Compilation of one [`Document`] into one EPUB chapter.

use super::escape::escape;
use super::filename::sanitize;
use super::templates::{self, ManifestItem, NavPoint, SpineItem, TocEntry};
use crate::document::Document;

/// Stand-in body for documents whose content never arrived.
pub const MISSING_CONTENT: &str = "[No content available]";

/// A document compiled for one archive build. Chapters are rebuilt from the
/// current document order every time and never outlive the build.
#[derive(Debug, Clone)]
pub struct Chapter {
    /// `chapterN`, 1-based.
    pub id: String,
    /// 1-based position in the reading order.
    pub number: usize,
    /// Escaped title.
    pub title: String,
    pub filename: String,
    /// The full XHTML chapter document.
    pub xhtml: String,
}

impl Chapter {
    /// Compile the document at the 0-based `index`.
    ///
    /// Documents without content, whether still loading or failed, are
    /// compiled with [`MISSING_CONTENT`] as their only paragraph.
    pub fn compile(document: &Document, index: usize) -> Chapter {
        let number = index + 1;
        let title = escape(&document.title);
        let filename = sanitize(&document.title, index);

        let content = document.content.as_deref().unwrap_or(MISSING_CONTENT);
        let paragraphs = paragraphs(content);

        let body = templates::chapter_body(&title, &paragraphs);
        let xhtml = templates::xhtml_document(&title, &body);

        Chapter {
            id: format!("chapter{number}"),
            number,
            title,
            filename,
            xhtml,
        }
    }

    pub fn manifest_item(&self) -> ManifestItem {
        ManifestItem {
            id: self.id.clone(),
            href: self.filename.clone(),
        }
    }

    pub fn spine_item(&self) -> SpineItem {
        SpineItem {
            idref: self.id.clone(),
        }
    }

    pub fn nav_point(&self) -> NavPoint {
        NavPoint {
            id: format!("navpoint-{}", self.number),
            play_order: self.number,
            label: self.title.clone(),
            src: self.filename.clone(),
        }
    }

    pub fn toc_entry(&self) -> TocEntry {
        TocEntry {
            filename: self.filename.clone(),
            title: self.title.clone(),
        }
    }
}

/// Split raw text on newline runs into escaped `<p>` elements.
fn paragraphs(content: &str) -> String {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{}</p>", escape(line)))
        .collect::<Vec<_>>()
        .join("\n      ")
}

/// The four per-chapter lists that feed the package and navigation
/// documents. Entry `i` of every list belongs to chapter `i + 1`.
#[derive(Debug, Default)]
pub struct Aggregates {
    pub manifest: Vec<ManifestItem>,
    pub spine: Vec<SpineItem>,
    pub nav_points: Vec<NavPoint>,
    pub toc: Vec<TocEntry>,
}

impl Aggregates {
    pub fn push(&mut self, chapter: &Chapter) {
        self.manifest.push(chapter.manifest_item());
        self.spine.push(chapter.spine_item());
        self.nav_points.push(chapter.nav_point());
        self.toc.push(chapter.toc_entry());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentId, DocumentStatus};

    fn document(title: &str, content: Option<&str>, status: DocumentStatus) -> Document {
        Document {
            id: DocumentId(1),
            title: title.to_string(),
            path: None,
            content: content.map(ToString::to_string),
            status,
        }
    }

    #[test]
    fn can_compile_paragraphs() {
        let doc = document(
            "Intro",
            Some("first line\n\n\n  second line  \r\n\nthird"),
            DocumentStatus::Done,
        );
        let chapter = Chapter::compile(&doc, 0);

        assert_eq!(chapter.id, "chapter1");
        assert_eq!(chapter.filename, "chapter_01_intro.xhtml");
        assert!(chapter.xhtml.contains("<p>first line</p>"));
        assert!(chapter.xhtml.contains("<p>second line</p>"));
        assert!(chapter.xhtml.contains("<p>third</p>"));
        assert_eq!(chapter.xhtml.matches("<p>").count(), 3);
    }

    #[test]
    fn can_escape_title_and_body_once() {
        let doc = document("Q&A <1>", Some("a < b && c > \"d\""), DocumentStatus::Done);
        let chapter = Chapter::compile(&doc, 2);

        assert_eq!(chapter.title, "Q&amp;A &lt;1&gt;");
        assert!(chapter.xhtml.contains("<title>Q&amp;A &lt;1&gt;</title>"));
        assert!(chapter.xhtml.contains("<p>a &lt; b &amp;&amp; c &gt; "));
        assert!(!chapter.xhtml.contains("&amp;amp;"));
        assert_eq!(chapter.filename, "chapter_03_qa_1.xhtml");
    }

    #[test]
    fn can_substitute_missing_content() {
        for status in [DocumentStatus::Processing, DocumentStatus::Failed] {
            let doc = document("Pending", None, status);
            let chapter = Chapter::compile(&doc, 0);
            assert!(chapter
                .xhtml
                .contains(&format!("<p>{}</p>", escape(MISSING_CONTENT))));
        }
    }

    #[test]
    fn can_compile_empty_content_to_empty_body() {
        let doc = document("Blank", Some("\n\n  \n"), DocumentStatus::Done);
        let chapter = Chapter::compile(&doc, 0);
        assert!(!chapter.xhtml.contains("<p>"));
        assert!(chapter.xhtml.contains(r#"<div class="chapter-content">"#));
    }

    #[test]
    fn can_derive_matching_entries() {
        let chapter = Chapter::compile(&document("Two", Some("x"), DocumentStatus::Done), 1);
        let mut aggregates = Aggregates::default();
        aggregates.push(&chapter);

        assert_eq!(aggregates.manifest.len(), 1);
        assert_eq!(aggregates.manifest[0].href, chapter.filename);
        assert_eq!(aggregates.spine[0].idref, "chapter2");
        assert_eq!(aggregates.nav_points[0].play_order, 2);
        assert_eq!(aggregates.nav_points[0].src, chapter.filename);
        assert_eq!(aggregates.toc[0].filename, chapter.filename);
    }
}
