//! Host state bridging the folding engine and the interactive viewer.
//!
//! The app owns the page, the engine, and the watcher, and drives them the
//! way a live page would: the source file standing in for the asynchronously
//! injected content container. Each event-loop lap the host checks the file
//! for changes, feeds any change to the watcher as a structural mutation,
//! and performs whatever action the watcher reports as due.

use crate::document::{Element, ElementId, Page};
use crate::folder::Folder;
use crate::formats::markdown::MarkdownFormat;
use crate::input;
use crate::watcher::{Mutation, Watcher, WatcherAction};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

/// Viewer state: one page, one folding engine, one watcher, one source file.
pub struct App {
    /// The page whose container is parsed from the source file.
    pub page: Page,
    /// Folding engine holding control state and the persisted store.
    pub folder: Folder,
    /// Debounced re-initialisation scheduler.
    pub watcher: Watcher,
    /// Source file backing the page.
    pub path: PathBuf,
    /// Cursor position within the visible interactive headings.
    pub cursor: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    last_modified: Option<SystemTime>,
}

impl App {
    #[must_use]
    /// Creates the host around an engine and watcher for one source file.
    pub fn new(path: PathBuf, folder: Folder, watcher: Watcher) -> Self {
        Self {
            page: Page::new(),
            folder,
            watcher,
            path,
            cursor: 0,
            message: None,
            last_modified: None,
        }
    }

    /// Initial load: attach the container, run the engine once, then begin
    /// observing. A missing or unreadable file leaves the page without a
    /// container; the watcher's startup retry will keep trying.
    pub fn startup(&mut self, now: Instant) {
        self.attach_source();
        let controlled = self.folder.run(&mut self.page);
        if controlled > 0 {
            self.message = Some(format!("{controlled} heading(s) under fold control"));
        }
        self.watcher.start(self.page.container().is_some(), now);
    }

    /// Parses the source file into a fresh container, replacing any previous
    /// one. Failures are surfaced in the status bar, never raised.
    fn attach_source(&mut self) -> bool {
        match input::parse_document(&self.path, &MarkdownFormat) {
            Ok(doc) => {
                self.page.attach(doc);
                self.last_modified = modified(&self.path);
                true
            }
            Err(e) => {
                self.message = Some(format!("cannot read {}: {e}", self.path.display()));
                false
            }
        }
    }

    /// Checks whether the source file changed on disk; a change replaces the
    /// container and is reported to the watcher as a structural mutation.
    pub fn poll_source(&mut self, now: Instant) {
        let current = modified(&self.path);
        if current.is_some() && current != self.last_modified && self.attach_source() {
            self.watcher.observe(&self.page, &[Mutation::Attached], now);
        }
    }

    /// Forces a reload of the source file through the same mutation path a
    /// detected change would take.
    pub fn reload(&mut self, now: Instant) {
        if self.attach_source() {
            self.watcher.observe(&self.page, &[Mutation::Attached], now);
            self.message = Some("reloaded".to_string());
        }
    }

    /// Performs whatever the watcher reports as due: retrying startup while
    /// the container is still missing, or re-running the engine after the
    /// debounce window closes.
    pub fn sync(&mut self, now: Instant) {
        match self.watcher.due(now) {
            WatcherAction::None => {}
            WatcherAction::RetryStart => {
                if self.page.container().is_none() {
                    self.attach_source();
                }
                if self.page.container().is_some() {
                    let controlled = self.folder.run(&mut self.page);
                    if controlled > 0 {
                        self.message =
                            Some(format!("{controlled} heading(s) under fold control"));
                    }
                }
                self.watcher.start(self.page.container().is_some(), now);
            }
            WatcherAction::Reinit => {
                let controlled = self.folder.run(&mut self.page);
                if controlled > 0 {
                    self.message = Some(format!("{controlled} new heading(s) controlled"));
                }
                self.clamp_cursor();
            }
        }
    }

    #[must_use]
    /// The currently visible elements, in document order.
    pub fn visible(&self) -> Vec<&Element> {
        self.page.container().map_or_else(Vec::new, |doc| {
            doc.elements().iter().filter(|e| !e.is_hidden()).collect()
        })
    }

    #[must_use]
    /// Visible headings carrying the clickable affordance, in document order.
    pub fn visible_headings(&self) -> Vec<ElementId> {
        self.visible()
            .into_iter()
            .filter(|e| e.heading_level().is_some() && self.folder.is_interactive(e.id()))
            .map(Element::id)
            .collect()
    }

    #[must_use]
    /// The heading under the cursor, if any heading is visible.
    pub fn selected_heading(&self) -> Option<ElementId> {
        let headings = self.visible_headings();
        if headings.is_empty() {
            None
        } else {
            Some(headings[self.cursor.min(headings.len() - 1)])
        }
    }

    /// Moves the cursor to the next visible heading.
    pub fn select_next(&mut self) {
        let count = self.visible_headings().len();
        if count > 0 {
            self.cursor = (self.cursor + 1).min(count - 1);
        }
    }

    /// Moves the cursor to the previous visible heading.
    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggles the section owned by the heading under the cursor.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_heading() else {
            return;
        };
        if let Some(doc) = self.page.container_mut() {
            self.folder.toggle(doc, id);
        }
        self.clamp_cursor();
    }

    /// Collapsing can shrink the visible heading list out from under the cursor.
    fn clamp_cursor(&mut self) {
        let count = self.visible_headings().len();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
