//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over different
//! document formats by providing a tree-sitter language plus the
//! classification that decides which parse nodes are headings and at what
//! nesting level.

pub mod markdown;

/// A document format the ingestion layer can parse.
pub trait Format {
    /// The tree-sitter language used to parse this format.
    fn language(&self) -> tree_sitter::Language;

    /// The heading level (1-6) a parse node establishes, or `None` when the
    /// node is not a heading.
    fn heading_level(&self, node: &tree_sitter::Node<'_>) -> Option<u8>;
}
