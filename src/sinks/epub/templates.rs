//! Fixed-structure XML and XHTML documents for the EPUB package.
//!
//! Every renderer here is a pure function over already-escaped text: nothing
//! in this module escapes, so callers must pass titles through
//! [`super::escape::escape`] first.

use chrono::NaiveDate;
use std::fmt::Write;

pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

pub const TOC_TITLE: &str = "Table of Contents";
pub const CREATOR: &str = "EPUB Pack";
pub const LANGUAGE: &str = "en";

/// One chapter's `<item>` in the OPF manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
}

/// One chapter's `<itemref>` in the OPF spine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineItem {
    pub idref: String,
}

/// One chapter's `<navPoint>` in the NCX navigation map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPoint {
    pub id: String,
    /// 1-based; 0 is reserved for the table of contents page.
    pub play_order: usize,
    /// Escaped chapter title.
    pub label: String,
    pub src: String,
}

/// One line of the human-readable table of contents page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub filename: String,
    /// Escaped chapter title.
    pub title: String,
}

/// Wrap a body fragment in the XHTML skeleton shared by chapters and the
/// table of contents.
pub fn xhtml_document(title: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
  <head>
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="stylesheet.css" />
  </head>
  <body>
    {body}
  </body>
</html>"#
    )
}

pub fn chapter_body(title: &str, paragraphs: &str) -> String {
    format!(
        r#"<h1 class="chapter-title">{title}</h1>
    <div class="chapter-content">
      {paragraphs}
    </div>"#
    )
}

pub fn toc_body(entries: &[TocEntry]) -> String {
    let items = entries
        .iter()
        .map(|entry| {
            format!(
                r#"      <li><a href="{}">{}</a></li>"#,
                entry.filename, entry.title
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<h1>{TOC_TITLE}</h1>
    <ol>
{items}
    </ol>"#
    )
}

/// Render the NCX navigation document.
///
/// The table of contents page is always the first navigation point, with
/// play order 0, ahead of the chapters.
pub fn ncx_document(title: &str, uuid: &str, nav_points: &[NavPoint]) -> String {
    let mut points = String::new();
    for point in nav_points {
        // writing into a String can't fail
        let _ = writeln!(
            points,
            r#"    <navPoint id="{}" playOrder="{}">
      <navLabel><text>{}</text></navLabel>
      <content src="{}"/>
    </navPoint>"#,
            point.id, point.play_order, point.label, point.src
        );
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="urn:uuid:{uuid}"/>
    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>{title}</text>
  </docTitle>
  <navMap>
    <navPoint id="navpoint-toc" playOrder="0">
      <navLabel><text>{TOC_TITLE}</text></navLabel>
      <content src="toc.xhtml"/>
    </navPoint>
{points}  </navMap>
</ncx>"#
    )
}

/// Render the OPF package document.
///
/// The navigation file, stylesheet and table of contents are always in the
/// manifest, and the table of contents always opens the spine.
pub fn opf_document(
    title: &str,
    uuid: &str,
    date: NaiveDate,
    manifest: &[ManifestItem],
    spine: &[SpineItem],
) -> String {
    let mut items = String::new();
    for item in manifest {
        let _ = writeln!(
            items,
            r#"    <item id="{}" href="{}" media-type="application/xhtml+xml" />"#,
            item.id, item.href
        );
    }

    let mut itemrefs = String::new();
    for item in spine {
        let _ = writeln!(itemrefs, r#"    <itemref idref="{}" />"#, item.idref);
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookID" version="2.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:title>{title}</dc:title>
    <dc:language>{LANGUAGE}</dc:language>
    <dc:identifier id="BookID">urn:uuid:{uuid}</dc:identifier>
    <dc:creator>{CREATOR}</dc:creator>
    <dc:publisher>{CREATOR}</dc:publisher>
    <dc:date>{date}</dc:date>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml" />
    <item id="style" href="stylesheet.css" media-type="text/css" />
    <item id="toc" href="toc.xhtml" media-type="application/xhtml+xml" />
{items}  </manifest>
  <spine toc="ncx">
    <itemref idref="toc" />
{itemrefs}  </spine>
  <guide>
    <reference type="toc" title="{TOC_TITLE}" href="toc.xhtml" />
  </guide>
</package>"#,
        date = date.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    /// Parse a document end to end, failing on any well-formedness error.
    fn assert_well_formed(xml: &str) {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_end_names = true;
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed XML at {}: {e}\n{xml}", reader.buffer_position()),
            }
        }
    }

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[test]
    fn can_render_container() {
        assert_well_formed(CONTAINER_XML);
        assert!(CONTAINER_XML.contains(r#"full-path="OEBPS/content.opf""#));
    }

    #[test]
    fn can_render_chapter_document() {
        let body = chapter_body("Tom &amp; Jerry", "<p>one</p>\n<p>two</p>");
        let doc = xhtml_document("Tom &amp; Jerry", &body);
        assert_well_formed(&doc);
        assert!(doc.contains("<title>Tom &amp; Jerry</title>"));
        assert!(doc.contains(r#"<h1 class="chapter-title">Tom &amp; Jerry</h1>"#));
        assert!(doc.contains(r#"href="stylesheet.css""#));
    }

    #[test]
    fn can_render_empty_toc() {
        let doc = xhtml_document(TOC_TITLE, &toc_body(&[]));
        assert_well_formed(&doc);
        assert!(doc.contains("<ol>"));
        assert!(!doc.contains("<li>"));
    }

    #[test]
    fn can_render_toc_links_in_order() {
        let entries = vec![
            TocEntry {
                filename: "chapter_01_a.xhtml".to_string(),
                title: "A".to_string(),
            },
            TocEntry {
                filename: "chapter_02_b.xhtml".to_string(),
                title: "B".to_string(),
            },
        ];
        let body = toc_body(&entries);
        let a = body.find(r#"<a href="chapter_01_a.xhtml">A</a>"#).expect("first link");
        let b = body.find(r#"<a href="chapter_02_b.xhtml">B</a>"#).expect("second link");
        assert!(a < b);
        assert_well_formed(&xhtml_document(TOC_TITLE, &body));
    }

    #[test]
    fn can_render_ncx() {
        let points = vec![NavPoint {
            id: "navpoint-1".to_string(),
            play_order: 1,
            label: "First".to_string(),
            src: "chapter_01_first.xhtml".to_string(),
        }];
        let ncx = ncx_document("Book", "abc-123", &points);
        assert_well_formed(&ncx);
        assert!(ncx.contains(r#"<meta name="dtb:uid" content="urn:uuid:abc-123"/>"#));
        assert!(ncx.contains(r#"<navPoint id="navpoint-toc" playOrder="0">"#));
        assert!(ncx.contains(r#"<navPoint id="navpoint-1" playOrder="1">"#));
        assert!(ncx.contains(r#"<content src="chapter_01_first.xhtml"/>"#));
    }

    #[test]
    fn can_render_opf() {
        let manifest = vec![ManifestItem {
            id: "chapter1".to_string(),
            href: "chapter_01_first.xhtml".to_string(),
        }];
        let spine = vec![SpineItem {
            idref: "chapter1".to_string(),
        }];
        let opf = opf_document("Book", "abc-123", sample_date(), &manifest, &spine);
        assert_well_formed(&opf);
        assert!(opf.contains(r#"unique-identifier="BookID""#));
        assert!(opf.contains(r#"<dc:identifier id="BookID">urn:uuid:abc-123</dc:identifier>"#));
        assert!(opf.contains("<dc:date>2024-03-09</dc:date>"));
        assert!(opf.contains("<dc:language>en</dc:language>"));

        let toc = opf.find(r#"<itemref idref="toc" />"#).expect("toc itemref");
        let chapter = opf.find(r#"<itemref idref="chapter1" />"#).expect("chapter itemref");
        assert!(toc < chapter);
    }

    #[test]
    fn can_render_opf_without_chapters() {
        let opf = opf_document("Empty", "id", sample_date(), &[], &[]);
        assert_well_formed(&opf);
        assert_eq!(opf.matches("<item ").count(), 3);
        assert_eq!(opf.matches("<itemref ").count(), 1);
    }
}
