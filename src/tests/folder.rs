use super::Folder;
use crate::document::{Document, Element, ElementId, ElementKind, Page};
use crate::store::{MemoryBackend, StateStore};

const PAGE_KEY: &str = "/docs/page.md";

fn engine(backend: MemoryBackend) -> Folder {
    Folder::new(StateStore::new(Box::new(backend)), PAGE_KEY)
}

/// H2 P H3 P H2 - the scenario shape used throughout.
fn sample_page() -> (Page, Vec<ElementId>) {
    let mut doc = Document::new();
    let ids = vec![
        doc.push(ElementKind::Heading { level: 2 }, "First"),
        doc.push(ElementKind::Block, "p1"),
        doc.push(ElementKind::Heading { level: 3 }, "Inner"),
        doc.push(ElementKind::Block, "p2"),
        doc.push(ElementKind::Heading { level: 2 }, "Second"),
    ];
    let mut page = Page::new();
    page.attach(doc);
    (page, ids)
}

fn hidden_flags(page: &Page) -> Vec<bool> {
    page.container()
        .unwrap()
        .elements()
        .iter()
        .map(Element::is_hidden)
        .collect()
}

#[test]
fn missing_container_is_a_no_op() {
    let mut folder = engine(MemoryBackend::new());
    let mut page = Page::new();

    assert_eq!(folder.run(&mut page), 0);
}

#[test]
fn run_controls_each_heading_exactly_once() {
    let mut folder = engine(MemoryBackend::new());
    let (mut page, ids) = sample_page();

    assert_eq!(folder.run(&mut page), 3);
    assert!(folder.is_controlled(ids[0]));
    assert!(folder.is_interactive(ids[0]));
    assert!(!folder.is_controlled(ids[1]));

    // No document change in between: nothing new to control.
    assert_eq!(folder.run(&mut page), 0);
}

#[test]
fn never_toggled_headings_initialise_expanded() {
    let mut folder = engine(MemoryBackend::new());
    let (mut page, ids) = sample_page();

    folder.run(&mut page);

    assert_eq!(hidden_flags(&page), vec![false; 5]);
    assert!(folder.is_expanded(ids[0]));
    assert!(folder.is_expanded(ids[2]));
}

#[test]
fn identifiers_are_positional_within_each_level() {
    let mut folder = engine(MemoryBackend::new());
    let (mut page, ids) = sample_page();

    folder.run(&mut page);

    assert_eq!(folder.identifier(ids[0]), Some("h2-0"));
    assert_eq!(folder.identifier(ids[2]), Some("h3-0"));
    assert_eq!(folder.identifier(ids[4]), Some("h2-1"));
    assert_eq!(folder.identifier(ids[1]), None);
}

#[test]
fn toggle_hides_exactly_the_owned_section() {
    let mut folder = engine(MemoryBackend::new());
    let (mut page, ids) = sample_page();
    folder.run(&mut page);

    folder.toggle(page.container_mut().unwrap(), ids[0]);

    // First paragraph, inner heading, and its paragraph hidden; the second
    // H2 and the first H2 itself untouched.
    assert_eq!(
        hidden_flags(&page),
        vec![false, true, true, true, false]
    );
    assert!(!folder.is_expanded(ids[0]));

    folder.toggle(page.container_mut().unwrap(), ids[0]);
    assert_eq!(hidden_flags(&page), vec![false; 5]);
}

#[test]
fn double_toggle_leaves_state_expanded_and_persisted() {
    let backend = MemoryBackend::new();
    let mut folder = engine(backend.clone());
    let (mut page, ids) = sample_page();
    folder.run(&mut page);

    folder.toggle(page.container_mut().unwrap(), ids[0]);
    folder.toggle(page.container_mut().unwrap(), ids[0]);

    assert_eq!(hidden_flags(&page), vec![false; 5]);
    let saved = StateStore::new(Box::new(backend)).load(PAGE_KEY);
    assert_eq!(saved.get("h2-0"), Some(true));
}

#[test]
fn collapsed_state_survives_a_reload() {
    let backend = MemoryBackend::new();

    let mut folder = engine(backend.clone());
    let (mut page, ids) = sample_page();
    folder.run(&mut page);
    folder.toggle(page.container_mut().unwrap(), ids[0]);

    // Fresh container and engine, same persisted store: the collapsed state
    // comes back without a user click.
    let mut folder = engine(backend);
    let (mut page, ids) = sample_page();
    folder.run(&mut page);

    assert_eq!(
        hidden_flags(&page),
        vec![false, true, true, true, false]
    );
    assert!(!folder.is_expanded(ids[0]));
    assert!(folder.is_expanded(ids[4]));
}

#[test]
fn collapsed_ancestor_keeps_nested_sections_hidden_on_reinit() {
    let backend = MemoryBackend::new();
    {
        let mut seed = StateStore::new(Box::new(backend.clone()));
        let mut state = crate::store::PersistedState::default();
        state.set("h2-0", false);
        seed.save(PAGE_KEY, &state);
    }

    let mut folder = engine(backend);
    let (mut page, ids) = sample_page();
    folder.run(&mut page);

    // The H3 inside the collapsed H2 section defaults to expanded, but that
    // must not surface its paragraph while the ancestor is collapsed.
    assert!(folder.is_expanded(ids[2]));
    assert_eq!(
        hidden_flags(&page),
        vec![false, true, true, true, false]
    );
}

#[test]
fn apply_state_never_touches_the_store() {
    let backend = MemoryBackend::new();
    let mut folder = engine(backend.clone());
    let (mut page, ids) = sample_page();
    folder.run(&mut page);

    folder.apply_state(page.container_mut().unwrap(), ids[0], false);

    assert_eq!(
        hidden_flags(&page),
        vec![false, true, true, true, false]
    );
    assert!(!folder.is_expanded(ids[0]));
    assert!(StateStore::new(Box::new(backend)).load(PAGE_KEY).is_empty());
}

#[test]
fn persisted_state_applies_per_identifier() {
    let backend = MemoryBackend::new();
    {
        let mut seed = StateStore::new(Box::new(backend.clone()));
        let mut state = crate::store::PersistedState::default();
        state.set("h3-0", false);
        seed.save(PAGE_KEY, &state);
    }

    let mut folder = engine(backend);
    let (mut page, ids) = sample_page();
    folder.run(&mut page);

    assert_eq!(
        hidden_flags(&page),
        vec![false, false, false, true, false]
    );
    assert!(!folder.is_expanded(ids[2]));
}

#[test]
fn toggle_without_identifier_is_visual_only() {
    let backend = MemoryBackend::new();
    let mut folder = engine(backend.clone());
    let (mut page, ids) = sample_page();

    // No initialisation run: the heading has no identifier yet.
    folder.toggle(page.container_mut().unwrap(), ids[0]);

    assert_eq!(
        hidden_flags(&page),
        vec![false, true, true, true, false]
    );
    assert!(StateStore::new(Box::new(backend)).load(PAGE_KEY).is_empty());
}

#[test]
fn toggle_of_an_absent_heading_is_a_no_op() {
    let mut folder = engine(MemoryBackend::new());
    let (mut page, _) = sample_page();
    folder.run(&mut page);

    let mut other = Document::new();
    let stranger = other.push(ElementKind::Heading { level: 2 }, "Elsewhere");

    folder.toggle(page.container_mut().unwrap(), stranger);
    assert_eq!(hidden_flags(&page), vec![false; 5]);
}

#[test]
fn later_passes_only_touch_new_headings() {
    let mut folder = engine(MemoryBackend::new());
    let (mut page, ids) = sample_page();
    folder.run(&mut page);
    folder.toggle(page.container_mut().unwrap(), ids[0]);

    // Content injected after the initial pass.
    let appended = {
        let doc = page.container_mut().unwrap();
        let heading = doc.push(ElementKind::Heading { level: 2 }, "Third");
        doc.push(ElementKind::Block, "p3");
        heading
    };

    assert_eq!(folder.run(&mut page), 1);
    assert!(folder.is_controlled(appended));

    // The collapsed first section was not re-initialised.
    assert!(!folder.is_expanded(ids[0]));
    let flags = hidden_flags(&page);
    assert_eq!(&flags[..5], &[false, true, true, true, false]);

    // Counters restart per pass, so a later pass re-issues low indices; the
    // appended heading picks up h2-0 even though one already exists.
    assert_eq!(folder.identifier(appended), Some("h2-0"));
}
