//! Markdown format implementation using tree-sitter-md.
//!
//! Heading levels come from the marker child of ATX headings (`#` syntax)
//! and from the underline child of setext headings.

use crate::formats::Format;

/// Markdown over the tree-sitter-md block grammar.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_level(&self, node: &tree_sitter::Node<'_>) -> Option<u8> {
        match node.kind() {
            "atx_heading" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if let Some(digits) = child
                        .kind()
                        .strip_prefix("atx_h")
                        .and_then(|rest| rest.strip_suffix("_marker"))
                    {
                        if let Ok(level) = digits.parse() {
                            return Some(level);
                        }
                    }
                }
                None
            }
            "setext_heading" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    match child.kind() {
                        "setext_h1_underline" => return Some(1),
                        "setext_h2_underline" => return Some(2),
                        _ => {}
                    }
                }
                None
            }
            _ => None,
        }
    }
}
