//! Focus mode: one highlighted block at a time, stepped through in document order.
//!
//! The navigator owns nothing but a handle to the current block. The host keeps the
//! document, supplies geometry per call, and receives the highlight through
//! [`FocusSink`]. Every transition unmarks the previous block before marking the next,
//! so at most one block carries the highlight.
//!
//! ```text
//! Inactive --activate--> Active --step_next/step_previous--> Active
//!    ^                     |
//!    |_____deactivate______|
//! ```

use crate::content::{BlockId, DocumentTree, FocusSink};
use crate::filter::BlockFilter;
use crate::geometry::{self, Rect};
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Direction of a step walk.
pub enum Direction {
    /// Towards the end of the document.
    Forward,
    /// Towards the start of the document.
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Highlight change produced by a successful navigation call.
pub struct Transition {
    /// Block that lost the highlight, if any.
    pub from: Option<BlockId>,
    /// Block that now carries the highlight.
    pub to: BlockId,
}

#[derive(Clone, Debug, Default)]
/// Holds the current focus block and the shared validity predicate.
pub struct FocusNavigator {
    current: Option<BlockId>,
    active: bool,
    filter: BlockFilter,
}

impl FocusNavigator {
    #[must_use]
    /// Creates an inactive navigator using `filter` for every query.
    pub fn new(filter: BlockFilter) -> Self {
        Self {
            current: None,
            active: false,
            filter,
        }
    }

    #[must_use]
    /// Whether focus mode is on.
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    /// The highlighted block, if any.
    pub fn current(&self) -> Option<BlockId> {
        self.current
    }

    #[must_use]
    /// The predicate shared by all queries.
    pub fn filter(&self) -> BlockFilter {
        self.filter
    }

    /// Turns focus mode on and highlights the block nearest the viewport centre.
    pub fn activate<T, F>(
        &mut self,
        doc: &mut T,
        viewport_height: f64,
        rect_of: F,
    ) -> Option<Transition>
    where
        T: DocumentTree + FocusSink,
        F: Fn(BlockId) -> Option<Rect>,
    {
        self.active = true;
        self.find_nearest_to_viewport_center(doc, viewport_height, rect_of)
    }

    /// Clears the highlight and leaves focus mode. Calling it twice is harmless.
    pub fn deactivate<S: FocusSink>(&mut self, sink: &mut S) {
        if let Some(previous) = self.current.take() {
            sink.unmark(previous);
            debug!(block = previous.0, "focus cleared");
        }
        self.active = false;
    }

    /// Highlights the valid block whose midpoint is closest to the viewport midpoint.
    ///
    /// Walks the whole tree in pre-order; ties go to the block visited first. Blocks
    /// without a rectangle are skipped. Does nothing when no valid block has geometry or
    /// when the winner is already current.
    pub fn find_nearest_to_viewport_center<T, F>(
        &mut self,
        doc: &mut T,
        viewport_height: f64,
        rect_of: F,
    ) -> Option<Transition>
    where
        T: DocumentTree + FocusSink,
        F: Fn(BlockId) -> Option<Rect>,
    {
        let nearest = self.nearest(&*doc, viewport_height, rect_of)?;
        self.set_current(doc, nearest)
    }

    #[must_use]
    /// The block [`find_nearest_to_viewport_center`](Self::find_nearest_to_viewport_center)
    /// would pick, without changing any state.
    pub fn nearest<T, F>(&self, tree: &T, viewport_height: f64, rect_of: F) -> Option<BlockId>
    where
        T: DocumentTree,
        F: Fn(BlockId) -> Option<Rect>,
    {
        let mut best: Option<(BlockId, f64)> = None;
        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            if self.filter.is_valid(tree, id) {
                if let Some(rect) = rect_of(id) {
                    let distance = geometry::distance_from_center(rect, viewport_height);
                    if best.is_none_or(|(_, d)| distance < d) {
                        best = Some((id, distance));
                    }
                }
            }
            let mut child = tree.last_child(id);
            while let Some(c) = child {
                stack.push(c);
                child = tree.prev_sibling(c);
            }
        }
        best.map(|(id, _)| id)
    }

    /// Moves the highlight to the next valid block in document order.
    pub fn step_next<T>(&mut self, doc: &mut T) -> Option<Transition>
    where
        T: DocumentTree + FocusSink,
    {
        self.step(doc, Direction::Forward)
    }

    /// Moves the highlight to the previous valid block in document order.
    pub fn step_previous<T>(&mut self, doc: &mut T) -> Option<Transition>
    where
        T: DocumentTree + FocusSink,
    {
        self.step(doc, Direction::Backward)
    }

    fn step<T>(&mut self, doc: &mut T, direction: Direction) -> Option<Transition>
    where
        T: DocumentTree + FocusSink,
    {
        if !self.active {
            return None;
        }
        let current = self.current?;
        if !doc.contains(current) {
            debug!(block = current.0, "focused block left the document");
            doc.unmark(current);
            self.current = None;
            return None;
        }
        let target = self.neighbour(&*doc, current, direction)?;
        self.set_current(doc, target)
    }

    #[must_use]
    /// The closest valid block after (or before) `from` in document order, without
    /// changing any state.
    ///
    /// Document order is the same pre-order the nearest query visits, so a block inside
    /// another valid block (a list nested in a list item) is reached right after its
    /// container going forward and right before it going backward. The walk never
    /// leaves the document root.
    pub fn neighbour<T: DocumentTree>(
        &self,
        tree: &T,
        from: BlockId,
        direction: Direction,
    ) -> Option<BlockId> {
        let root = tree.root();
        let mut node = from;
        loop {
            let step = match direction {
                Direction::Forward => next_in_preorder(tree, node, root),
                Direction::Backward => previous_in_preorder(tree, node, root),
            };
            let Some(next) = step else {
                trace!(from = from.0, ?direction, "walk reached document boundary");
                return None;
            };
            if self.filter.is_valid(tree, next) {
                return Some(next);
            }
            node = next;
        }
    }

    /// Moves the highlight to `block`. Returns `None` when `block` is already current.
    pub fn set_current<S: FocusSink>(&mut self, sink: &mut S, block: BlockId) -> Option<Transition> {
        if self.current == Some(block) {
            return None;
        }
        let from = self.current.replace(block);
        if let Some(previous) = from {
            sink.unmark(previous);
        }
        sink.mark(block);
        debug!(from = ?from.map(|b| b.0), to = block.0, "focus moved");
        Some(Transition { from, to: block })
    }

    #[must_use]
    /// Scroll offset that centres the block with rectangle `rect`.
    pub fn scroll_target(rect: Rect, viewport_height: f64, current_offset: f64) -> f64 {
        geometry::scroll_target(rect, viewport_height, current_offset)
    }
}

fn next_in_preorder<T: DocumentTree>(tree: &T, id: BlockId, root: BlockId) -> Option<BlockId> {
    if let Some(child) = tree.first_child(id) {
        return Some(child);
    }
    let mut node = id;
    while node != root {
        if let Some(next) = tree.next_sibling(node) {
            return Some(next);
        }
        node = tree.parent(node)?;
    }
    None
}

fn previous_in_preorder<T: DocumentTree>(tree: &T, id: BlockId, root: BlockId) -> Option<BlockId> {
    if id == root {
        return None;
    }
    let Some(mut node) = tree.prev_sibling(id) else {
        let parent = tree.parent(id)?;
        return (parent != root).then_some(parent);
    };
    // The deepest last descendant of the previous sibling comes right before `id`.
    while let Some(last) = tree.last_child(node) {
        node = last;
    }
    Some(node)
}

#[cfg(test)]
#[path = "tests/navigator.rs"]
mod tests;
