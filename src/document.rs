//! Element model for a page's content container.
//!
//! A `Document` is the ordered run of sibling elements inside the one content
//! container a page carries. Elements are either headings (levels 1-6) or
//! opaque blocks; the only visual attribute the engine mutates is the
//! `hidden` flag. Domain state (controlled / expanded / identifier) lives in
//! side tables owned by the [`crate::folder::Folder`], keyed by [`ElementId`],
//! so the element itself stays a transport-level record.

use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity for one physical element.
///
/// Identifiers are allocated from a process-wide counter and never reused, so
/// an element of a replaced container can never be mistaken for an element of
/// its predecessor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementId(u64);

impl ElementId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// What an element is, as far as section folding cares.
pub enum ElementKind {
    /// A heading establishing a nesting level (1 is most significant).
    Heading {
        /// Nesting level, 1-6.
        level: u8,
    },
    /// Any non-heading block of content.
    Block,
}

#[derive(Clone, Debug)]
/// One sibling element of the content container.
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    text: String,
    hidden: bool,
}

impl Element {
    #[must_use]
    /// Stable identity of this element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    /// Whether this element is a heading or a plain block.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    /// Display text (heading title, or the block's first line).
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// Whether the element is currently hidden from view.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    /// The heading level, or `None` for non-heading elements.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            ElementKind::Heading { level } => Some(level),
            ElementKind::Block => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Ordered sibling run of elements forming the content container.
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    #[must_use]
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element, returning its freshly allocated identity.
    pub fn push(&mut self, kind: ElementKind, text: impl Into<String>) -> ElementId {
        self.insert(self.elements.len(), kind, text)
    }

    /// Inserts an element before `index` (clamped to the end), returning its
    /// freshly allocated identity.
    pub fn insert(&mut self, index: usize, kind: ElementKind, text: impl Into<String>) -> ElementId {
        let id = ElementId::next();
        let index = index.min(self.elements.len());
        self.elements.insert(
            index,
            Element {
                id,
                kind,
                text: text.into(),
                hidden: false,
            },
        );
        id
    }

    /// Removes the element with the given identity; returns whether it was present.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    #[must_use]
    /// Number of sibling elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    /// Whether the container holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    /// All elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    /// Looks up an element by identity.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    #[must_use]
    /// Position of an element in the sibling run, if present.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    #[must_use]
    /// Whether the container currently holds the element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Sets the visibility flag of the element at `index`; out-of-range
    /// indices are ignored.
    pub fn set_hidden_at(&mut self, index: usize, hidden: bool) {
        if let Some(element) = self.elements.get_mut(index) {
            element.hidden = hidden;
        }
    }
}

#[derive(Debug, Default)]
/// A page that may or may not (yet) carry its content container.
///
/// Content can be injected after the initial load, so the container is
/// optional; attaching a new container replaces the old one wholesale.
pub struct Page {
    container: Option<Document>,
}

impl Page {
    #[must_use]
    /// Creates a page with no container yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches (or replaces) the content container.
    pub fn attach(&mut self, container: Document) {
        self.container = Some(container);
    }

    #[must_use]
    /// The content container, if one has appeared.
    pub fn container(&self) -> Option<&Document> {
        self.container.as_ref()
    }

    /// Mutable access to the content container, if one has appeared.
    pub fn container_mut(&mut self) -> Option<&mut Document> {
        self.container.as_mut()
    }
}
