use super::{find_documents, parse_source};
use crate::document::{Element, ElementKind};
use crate::formats::markdown::MarkdownFormat;
use std::fs;
use tempfile::tempdir;

#[test]
fn parses_a_flat_sibling_run_in_document_order() {
    let source = "# Title\n\nIntro.\n\n## Setup\n\nSteps here.\n\n## Usage\n\nRun it.\n";
    let doc = parse_source(source, &MarkdownFormat).unwrap();

    let kinds: Vec<ElementKind> = doc.elements().iter().map(Element::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Heading { level: 1 },
            ElementKind::Block,
            ElementKind::Heading { level: 2 },
            ElementKind::Block,
            ElementKind::Heading { level: 2 },
            ElementKind::Block,
        ]
    );

    assert_eq!(doc.elements()[0].text(), "Title");
    assert_eq!(doc.elements()[2].text(), "Setup");
    assert_eq!(doc.elements()[4].text(), "Usage");
    assert_eq!(doc.elements()[1].text(), "Intro.");
}

#[test]
fn heading_levels_reach_down_to_h6() {
    let source = "### Three\n\n###### Six\n";
    let doc = parse_source(source, &MarkdownFormat).unwrap();

    let levels: Vec<Option<u8>> = doc.elements().iter().map(Element::heading_level).collect();
    assert_eq!(levels, vec![Some(3), Some(6)]);
}

#[test]
fn fenced_code_is_a_plain_block() {
    let source = "## A\n\n```sh\nmake\n```\n";
    let doc = parse_source(source, &MarkdownFormat).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.elements()[1].kind(), ElementKind::Block);
}

#[test]
fn empty_source_yields_an_empty_container() {
    let doc = parse_source("", &MarkdownFormat).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn directories_are_filtered_by_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.md"), "# B\n").unwrap();
    fs::write(dir.path().join("a.md"), "# A\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "not viewable\n").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("c.md"), "# C\n").unwrap();

    let found = find_documents(
        &[dir.path().to_path_buf()],
        &["md".to_string()],
    )
    .unwrap();

    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|p| p.extension().is_some_and(|e| e == "md")));
    // Sorted for a deterministic viewing order.
    assert_eq!(found[0].file_name().unwrap(), "a.md");
}

#[test]
fn explicitly_named_files_bypass_the_extension_filter() {
    let dir = tempdir().unwrap();
    let odd = dir.path().join("readme.txt");
    fs::write(&odd, "# Hello\n").unwrap();

    let found = find_documents(&[odd.clone()], &["md".to_string()]).unwrap();
    assert_eq!(found, vec![odd]);
}

#[test]
fn nothing_is_hidden_at_parse_time() {
    let source = "## A\n\np\n\n### B\n\nq\n";
    let doc = parse_source(source, &MarkdownFormat).unwrap();
    assert!(doc.elements().iter().all(|e| !e.is_hidden()));
}
