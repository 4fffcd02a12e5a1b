//! Section toggling and heading initialisation.
//!
//! The [`Folder`] is the engine proper: it owns the side tables that say
//! which headings are controlled, expanded, and under which identifier, plus
//! the [`StateStore`] that makes fold state survive across sessions. The
//! element model only ever sees `hidden` flips; everything else stays here,
//! keyed by [`ElementId`].
//!
//! `run` is the initialisation pass. It is idempotent with respect to
//! already-controlled headings, which is what makes it safe for the change
//! watcher to schedule it repeatedly as content streams into the page.

use crate::document::{Document, ElementId, Page};
use crate::identity::IdentifierAssigner;
use crate::section;
use crate::store::StateStore;
use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// Folding engine for one page: toggling, initialisation, and the side
/// tables tying headings to persisted identifiers.
pub struct Folder {
    store: StateStore,
    page_key: String,
    controlled: HashSet<ElementId>,
    interactive: HashSet<ElementId>,
    expanded: HashMap<ElementId, bool>,
    identifiers: HashMap<ElementId, String>,
}

impl Folder {
    #[must_use]
    /// Creates an engine persisting under `page_key` (the page's path,
    /// verbatim - each distinct path gets an independent state mapping).
    pub fn new(store: StateStore, page_key: impl Into<String>) -> Self {
        Self {
            store,
            page_key: page_key.into(),
            controlled: HashSet::new(),
            interactive: HashSet::new(),
            expanded: HashMap::new(),
            identifiers: HashMap::new(),
        }
    }

    #[must_use]
    /// Whether a heading has completed one-time setup.
    pub fn is_controlled(&self, id: ElementId) -> bool {
        self.controlled.contains(&id)
    }

    #[must_use]
    /// Whether a heading carries the clickable affordance for the host UI.
    pub fn is_interactive(&self, id: ElementId) -> bool {
        self.interactive.contains(&id)
    }

    #[must_use]
    /// Current expanded flag of a heading; headings never seen default to
    /// expanded.
    pub fn is_expanded(&self, id: ElementId) -> bool {
        self.expanded.get(&id).copied().unwrap_or(true)
    }

    #[must_use]
    /// The positional identifier assigned to a heading, if it has one.
    pub fn identifier(&self, id: ElementId) -> Option<&str> {
        self.identifiers.get(&id).map(String::as_str)
    }

    /// Flips a heading's expanded state, updates its section's visibility,
    /// and persists the new state.
    ///
    /// A heading without an identifier still toggles visually; the state is
    /// simply not persisted. Persistence failures are absorbed by the store,
    /// so the visual toggle always succeeds.
    pub fn toggle(&mut self, doc: &mut Document, heading: ElementId) {
        let Some(index) = doc.index_of(heading) else {
            return;
        };
        let expanded = !self.is_expanded(heading);
        self.apply_to(doc, index, heading, expanded);

        if let Some(identifier) = self.identifiers.get(&heading).cloned() {
            let mut state = self.store.load(&self.page_key);
            state.set(identifier, expanded);
            self.store.save(&self.page_key, &state);
        } else {
            log::debug!("toggled a heading with no identifier; state not persisted");
        }
    }

    /// Applies an expanded state to a heading and its section without
    /// touching the store.
    ///
    /// Used at initialisation time to replay restored or default state; going
    /// through `toggle` instead would write every heading back on startup.
    pub fn apply_state(&mut self, doc: &mut Document, heading: ElementId, expanded: bool) {
        if let Some(index) = doc.index_of(heading) {
            self.apply_to(doc, index, heading, expanded);
        }
    }

    fn apply_to(&mut self, doc: &mut Document, index: usize, heading: ElementId, expanded: bool) {
        self.expanded.insert(heading, expanded);
        for i in section::span(doc, index) {
            doc.set_hidden_at(i, !expanded);
        }
    }

    /// Initialisation pass: brings every not-yet-controlled heading in the
    /// page's container under control and returns how many were new.
    ///
    /// With no container the run is a no-op returning 0. Persisted state is
    /// loaded once up front; each new heading gets an identifier from a
    /// counter table scoped to this single run and is marked controlled and
    /// interactive with its restored (or default expanded) state. Visibility
    /// is then recomputed for the container as a whole, so a restored
    /// collapsed section stays collapsed even when headings nested inside it
    /// default to expanded. Already-controlled headings are skipped
    /// entirely, so re-running never re-applies initial state to them.
    pub fn run(&mut self, page: &mut Page) -> usize {
        let Some(doc) = page.container_mut() else {
            return 0;
        };

        let saved = self.store.load(&self.page_key);
        let mut assigner = IdentifierAssigner::new();
        let mut newly_controlled = 0;

        let headings: Vec<(ElementId, u8)> = doc
            .elements()
            .iter()
            .filter_map(|e| e.heading_level().map(|level| (e.id(), level)))
            .collect();

        for (id, level) in headings {
            if self.controlled.contains(&id) {
                continue;
            }
            let identifier = assigner.assign(level);
            let expanded = saved.get(&identifier).unwrap_or(true);
            self.identifiers.insert(id, identifier);
            self.controlled.insert(id);
            self.interactive.insert(id);
            self.expanded.insert(id, expanded);
            newly_controlled += 1;
        }

        if newly_controlled > 0 {
            self.refresh_visibility(doc);
            log::info!("brought {newly_controlled} new heading(s) under fold control");
        }
        newly_controlled
    }

    /// An element is hidden exactly when some collapsed heading's section
    /// contains it. Applying headings one at a time here instead would let a
    /// default-expanded heading nested inside a collapsed ancestor's span
    /// reveal content that should stay hidden.
    fn refresh_visibility(&self, doc: &mut Document) {
        let collapsed: Vec<Range<usize>> = doc
            .elements()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.heading_level().is_some() && !self.is_expanded(e.id()))
            .map(|(index, _)| section::span(doc, index))
            .collect();

        for index in 0..doc.len() {
            let hidden = collapsed.iter().any(|range| range.contains(&index));
            doc.set_hidden_at(index, hidden);
        }
    }
}

#[cfg(test)]
#[path = "tests/folder.rs"]
mod tests;
