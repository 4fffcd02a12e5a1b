//! Positional identifier assignment for headings.
//!
//! Identifiers are `"h<level>-<index>"` where the index counts only headings
//! of that exact level, in document order, within one assignment pass. The
//! counter table must be created fresh per initialisation run and fed
//! headings in document order for identifiers to be stable and
//! collision-free within that pass.
//!
//! Uniqueness holds only within one pass: a later pass that sees only newly
//! appeared headings restarts the counters, so it can re-issue an index an
//! earlier pass already handed out. The persisted mapping is advisory and
//! tolerates this; content appearing before already-controlled headings can
//! therefore inherit another heading's saved fold state.

use std::collections::HashMap;

#[derive(Debug, Default)]
/// Per-level counter table for one identifier-assignment pass.
pub struct IdentifierAssigner {
    counters: HashMap<u8, usize>,
}

impl IdentifierAssigner {
    #[must_use]
    /// Creates a fresh counter table with every level at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next identifier for a heading of `level` and advances the
    /// level's counter.
    pub fn assign(&mut self, level: u8) -> String {
        let counter = self.counters.entry(level).or_insert(0);
        let identifier = format!("h{level}-{counter}");
        *counter += 1;
        identifier
    }
}

#[cfg(test)]
#[path = "tests/identity.rs"]
mod tests;
