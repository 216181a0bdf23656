//! EPUB generation for combined documents.
//!
//! This module converts an ordered list of documents into an EPUB 2 ebook with:
//! - One XHTML chapter per document, in list order
//! - A human-readable table of contents page
//! - NCX navigation and an OPF package document sharing one unique identifier
//! - A ZIP container whose first member is the uncompressed `mimetype`
//!
//! The archive is written directly with the `zip` crate rather than through an
//! EPUB builder, since the member layout and the `chapter_NN_<slug>.xhtml` file
//! names are part of the output format.

mod archive;
mod chapter;
mod config;
mod escape;
mod filename;
mod styles;
mod templates;

pub use archive::{assemble, IdGenerator, RandomUuid};
pub use chapter::MISSING_CONTENT;
pub use config::EPUB;
