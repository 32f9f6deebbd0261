//! Format trait and implementations for different document types.
//!
//! A format supplies the tree-sitter grammar and the query that finds headings. Pages in other
//! markup languages only need a new implementation of this trait.

pub mod markdown;

/// Grammar and queries needed to split a document into sections.
pub trait Format {
    /// Tree-sitter language used to parse the document.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading node as `@heading`.
    fn section_query(&self) -> &str;
    /// Heading level encoded by a marker node kind, e.g. `atx_h2_marker` is level 2.
    fn marker_level(&self, kind: &str) -> Option<usize>;
    /// Node kind holding the heading text.
    fn title_kind(&self) -> &str;
}
