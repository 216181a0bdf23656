//! XML escaping for text embedded in package documents and chapters.
//!
//! Titles and paragraph text are arbitrary user strings, so every one of them
//! passes through [`escape`] exactly once before it is spliced into a template.
//! Escaping is not idempotent: `&amp;` escaped again becomes `&amp;amp;`.

/// Escape the five XML-reserved characters `& < > " '`.
///
/// Strings without reserved characters are returned unchanged.
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}
