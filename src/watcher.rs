//! Debounced re-initialisation scheduling for structural document changes.
//!
//! The watcher is a small explicit state machine rather than free-floating
//! timer variables: it is either idle or holding exactly one armed deadline,
//! and it owns that deadline entirely. Relevant mutations arm (or re-arm) the
//! deadline; the host polls [`Watcher::due`] and performs the action it
//! reports. Re-arming on every relevant batch coalesces a burst into a
//! single re-initialisation that lands after the burst's last mutation.
//!
//! Timing is injected as `Instant` values, so the machine is deterministic
//! under test and the host keeps control of its own event loop cadence.

use crate::document::{ElementId, Page};
use std::time::{Duration, Instant};

/// One structural change notification from the document.
#[derive(Clone, Copy, Debug)]
pub enum Mutation {
    /// The content container itself appeared or was replaced wholesale.
    Attached,
    /// An element was added somewhere in the document.
    Added(ElementId),
    /// An element was removed. Never triggers a re-run; a removal cannot
    /// produce a heading that needs controlling.
    Removed(ElementId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the host should do after polling the watcher.
pub enum WatcherAction {
    /// Nothing is due.
    None,
    /// The startup retry delay elapsed; call [`Watcher::start`] again.
    RetryStart,
    /// The debounce window closed; run the initialisation pass.
    Reinit,
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle,
    Pending { deadline: Instant },
}

/// Debouncing scheduler between the mutation feed and the folding engine.
#[derive(Debug)]
pub struct Watcher {
    observing: bool,
    phase: Phase,
    retry_at: Option<Instant>,
    delay: Duration,
    retry_delay: Duration,
}

impl Watcher {
    /// Startup retry interval used when the document root is not yet there.
    pub const RETRY_DELAY: Duration = Duration::from_millis(200);

    #[must_use]
    /// Creates a watcher with the given debounce delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            observing: false,
            phase: Phase::Idle,
            retry_at: None,
            delay,
            retry_delay: Self::RETRY_DELAY,
        }
    }

    /// Begins observing. If the document root is not yet available, arms a
    /// retry deadline instead of failing; [`Watcher::due`] reports
    /// [`WatcherAction::RetryStart`] once it elapses.
    pub fn start(&mut self, root_present: bool, now: Instant) {
        if root_present {
            self.observing = true;
            self.retry_at = None;
        } else {
            self.retry_at = Some(now + self.retry_delay);
        }
    }

    #[must_use]
    /// Whether `start` has succeeded and mutations are being considered.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    #[must_use]
    /// Whether a re-initialisation deadline is currently armed.
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Feeds one batch of mutations. If any mutation in the batch is
    /// relevant to the page, the debounce deadline is armed (or pushed back),
    /// guaranteeing one re-run after the last relevant mutation of a burst.
    pub fn observe(&mut self, page: &Page, batch: &[Mutation], now: Instant) {
        if !self.observing {
            return;
        }
        if batch.iter().any(|m| Self::relevant(page, *m)) {
            self.phase = Phase::Pending {
                deadline: now + self.delay,
            };
        }
    }

    /// A mutation matters when it attaches the container, or adds an element
    /// the container currently holds (which covers both content and headings
    /// inside it).
    fn relevant(page: &Page, mutation: Mutation) -> bool {
        match mutation {
            Mutation::Attached => true,
            Mutation::Added(id) => page.container().is_some_and(|doc| doc.contains(id)),
            Mutation::Removed(_) => false,
        }
    }

    /// Polls the machine. At most one action is reported per call, and a
    /// reported deadline is disarmed before returning, so the host performs
    /// each scheduled action exactly once.
    pub fn due(&mut self, now: Instant) -> WatcherAction {
        if let Some(retry) = self.retry_at {
            if now >= retry {
                self.retry_at = None;
                return WatcherAction::RetryStart;
            }
        }
        if let Phase::Pending { deadline } = self.phase {
            if now >= deadline {
                self.phase = Phase::Idle;
                return WatcherAction::Reinit;
            }
        }
        WatcherAction::None
    }
}

#[cfg(test)]
#[path = "tests/watcher.rs"]
mod tests;
