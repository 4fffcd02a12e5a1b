//! Document ingestion: discover source files and parse them into flat
//! sibling runs.
//!
//! tree-sitter-md nests content under `section` nodes; the container model
//! wants the flat run of block-level siblings in document order, so sections
//! are flattened during the walk. Headings keep their title text for
//! display, other blocks keep their first line.

use crate::document::{Document, ElementKind};
use crate::formats::Format;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// Expands files and directories into the list of viewable documents.
///
/// Directories are walked recursively and filtered by extension; explicitly
/// named files are kept as given. The result is sorted for a deterministic
/// viewing order.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: &[PathBuf], extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_documents(path, extensions, &mut found)?;
        } else {
            found.push(path.clone());
        }
    }
    found.sort();
    Ok(found)
}

fn collect_documents(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_documents(&path, extensions, found)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
        {
            found.push(path);
        }
    }
    Ok(())
}

/// Reads and parses `path` into a content container.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the parser cannot be
/// constructed for the format's language.
pub fn parse_document(path: &Path, format: &dyn Format) -> io::Result<Document> {
    let source = fs::read_to_string(path)?;
    parse_source(&source, format)
}

/// Parses in-memory source into a content container.
///
/// # Errors
///
/// Returns an error if the format's language is incompatible with the linked
/// tree-sitter runtime, or parsing yields no tree.
pub fn parse_source(source: &str, format: &dyn Format) -> io::Result<Document> {
    let mut parser = Parser::new();
    parser
        .set_language(&format.language())
        .map_err(io::Error::other)?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "parsing produced no tree"))?;

    let mut doc = Document::new();
    collect_blocks(tree.root_node(), source, format, &mut doc);
    Ok(doc)
}

fn collect_blocks(node: Node<'_>, source: &str, format: &dyn Format, doc: &mut Document) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "section" {
            collect_blocks(child, source, format, doc);
        } else if let Some(level) = format.heading_level(&child) {
            doc.push(
                ElementKind::Heading { level },
                heading_title(child, source),
            );
        } else if child.is_named() {
            doc.push(ElementKind::Block, first_line(&node_text(child, source)));
        }
    }
}

/// Title text lives in an `inline` node one or two levels down depending on
/// heading style.
fn heading_title(node: Node<'_>, source: &str) -> String {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "inline" {
            return node_text(child, source).trim().to_string();
        }
        let mut inner = child.walk();
        for grandchild in child.children(&mut inner) {
            if grandchild.kind() == "inline" {
                return node_text(grandchild, source).trim().to_string();
            }
        }
    }
    first_line(&node_text(node, source))
        .trim_start_matches('#')
        .trim()
        .to_string()
}

fn node_text(node: Node<'_>, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .unwrap_or_default()
        .to_string()
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
