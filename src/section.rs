//! Section boundary rule for heading-owned sibling runs.
//!
//! A section is the contiguous run of siblings immediately following a
//! heading, up to but excluding the next heading of equal or shallower level.
//! Sections are never stored; the span is recomputed each time a toggle or an
//! initial-state application needs it, so overlap is impossible by
//! construction.

use crate::document::{Document, Element};
use std::ops::Range;

#[must_use]
/// Index range of the section owned by the heading at `heading_index`.
///
/// Starting from the heading's next sibling, the span extends while the
/// sibling is not a heading or is a heading strictly deeper than the owner;
/// it ends at the first heading of equal-or-shallower level, or at the end of
/// the sibling run. A non-heading `heading_index` owns an empty span.
pub fn span(doc: &Document, heading_index: usize) -> Range<usize> {
    let elements = doc.elements();
    let start = heading_index + 1;
    let Some(owner_level) = elements.get(heading_index).and_then(Element::heading_level) else {
        return start..start;
    };

    let mut end = start;
    while end < elements.len() {
        if let Some(level) = elements[end].heading_level() {
            if level <= owner_level {
                break;
            }
        }
        end += 1;
    }

    start..end
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
