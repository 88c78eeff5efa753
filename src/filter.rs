//! Decides which rendered blocks are worth focusing.
//!
//! The same predicate backs both the nearest-to-centre query and the step walk; the
//! navigator holds one [`BlockFilter`] and never evaluates validity any other way.

use crate::content::{BlockId, BlockKind, DocumentTree};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Validity predicate for focusable blocks.
pub struct BlockFilter {
    /// Whether headings join paragraphs and lists in the navigable set.
    pub include_headings: bool,
}

impl BlockFilter {
    #[must_use]
    /// Creates a filter, optionally treating headings as focusable.
    pub fn new(include_headings: bool) -> Self {
        Self { include_headings }
    }

    #[must_use]
    /// True for non-empty paragraphs, lists with a non-empty item and (when enabled)
    /// non-empty headings. Detached blocks are never valid.
    pub fn is_valid<T: DocumentTree>(&self, tree: &T, id: BlockId) -> bool {
        match tree.kind(id) {
            Some(BlockKind::Paragraph) => has_text(tree, id),
            Some(BlockKind::List) => tree.children(id).any(|item| has_text(tree, item)),
            Some(BlockKind::Heading { .. }) => self.include_headings && has_text(tree, id),
            _ => false,
        }
    }
}

fn has_text<T: DocumentTree>(tree: &T, id: BlockId) -> bool {
    tree.text(id).is_some_and(|t| !t.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/filter.rs"]
mod tests;
