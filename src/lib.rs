//! plica: collapsible heading sections with persisted fold state.
//!
//! Every heading in a document acts as a collapse/expand control for the run
//! of sibling elements that follows it, and the collapsed/expanded state of
//! each heading survives across sessions, scoped to the document it belongs
//! to. Content may appear after the initial load; a change watcher notices
//! structural additions and re-runs initialisation without disturbing
//! headings already under control.
#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod config;
pub mod document;
pub mod folder;
pub mod formats;
pub mod identity;
pub mod input;
pub mod section;
pub mod store;
pub mod ui;
pub mod watcher;
