//! The stylesheet shipped as `OEBPS/stylesheet.css`.
//!
//! Chapters are plain prose, so a single fixed sheet covers everything: a
//! serif body, centred headings, and a page break before each chapter title.

pub const STYLESHEET: &str = r#"
body {
  font-family: serif;
  margin: 5%;
  text-align: justify;
}
h1, h2, h3 {
  text-align: center;
  font-weight: bold;
}
h1 { font-size: 1.5em; margin: 1em 0; }
h2 { font-size: 1.3em; margin: 0.8em 0; }
.chapter-title {
  page-break-before: always;
  margin-top: 2em;
}
p {
  margin: 0.5em 0;
  line-height: 1.5;
}
"#;
