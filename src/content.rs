//! The rendered content tree that focus navigation and outline extraction walk over.
//!
//! The host owns the document; the core only needs structural access (children, parent,
//! siblings, containment) plus each block's kind and text. [`DocumentTree`] captures that
//! surface so any rendering layer can be plugged in, and [`ContentTree`] is the arena-backed
//! implementation produced by the markdown front-end.
//!
//! Blocks removed from the document keep their id but stop answering structural queries:
//! every accessor returns `None` for them, which is how traversals learn to skip them.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Stable handle to a block inside a [`ContentTree`].
pub struct BlockId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Structural role of a block in the rendered document.
pub enum BlockKind {
    /// The document root.
    Document,
    /// Grouping container for a heading and everything it governs.
    Section,
    /// Heading marker with its nesting level (1–6).
    Heading {
        /// Nesting depth, 1 for top-level.
        level: u8,
    },
    /// Running text.
    Paragraph,
    /// Ordered or unordered list; its immediate children are items.
    List,
    /// One entry of a list. May hold nested lists as children.
    ListItem,
    /// Block quotation container.
    Quote,
    /// Anything else (code fences, tables, rules, raw HTML).
    Other,
}

impl BlockKind {
    #[must_use]
    /// Containers are descended into when flattening a document into body units.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Document | Self::Section | Self::Quote)
    }
}

/// Read access to a hierarchical, rendered document.
pub trait DocumentTree {
    /// The document root. Traversals never climb above it.
    fn root(&self) -> BlockId;
    /// Whether `id` is still attached below the document root.
    fn contains(&self, id: BlockId) -> bool;
    /// Kind of an attached block.
    fn kind(&self, id: BlockId) -> Option<BlockKind>;
    /// Own text content of an attached block.
    fn text(&self, id: BlockId) -> Option<&str>;
    /// Parent of an attached, non-root block.
    fn parent(&self, id: BlockId) -> Option<BlockId>;
    /// First child of an attached block.
    fn first_child(&self, id: BlockId) -> Option<BlockId>;
    /// Last child of an attached block.
    fn last_child(&self, id: BlockId) -> Option<BlockId>;
    /// Following sibling of an attached block.
    fn next_sibling(&self, id: BlockId) -> Option<BlockId>;
    /// Preceding sibling of an attached block.
    fn prev_sibling(&self, id: BlockId) -> Option<BlockId>;

    /// Iterates the immediate children of `id` in document order.
    fn children(&self, id: BlockId) -> Children<'_, Self>
    where
        Self: Sized,
    {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }
}

/// Iterator over the immediate children of a block.
#[derive(Debug)]
pub struct Children<'a, T> {
    tree: &'a T,
    next: Option<BlockId>,
}

impl<T: DocumentTree> Iterator for Children<'_, T> {
    type Item = BlockId;

    fn next(&mut self) -> Option<BlockId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Receiver of the single "active block" marker set by the focus navigator.
pub trait FocusSink {
    /// Highlight `id` as the current focus block.
    fn mark(&mut self, id: BlockId);
    /// Remove the highlight from `id`.
    fn unmark(&mut self, id: BlockId);
}

#[derive(Clone, Debug)]
struct Block {
    kind: BlockKind,
    text: String,
    parent: Option<BlockId>,
    children: Vec<BlockId>,
    /// Position within the parent's children.
    slot: usize,
    attached: bool,
    active: bool,
}

#[derive(Clone, Debug)]
/// Arena-backed document tree.
pub struct ContentTree {
    blocks: Vec<Block>,
}

impl Default for ContentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTree {
    #[must_use]
    /// Creates a tree holding only the document root.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block {
                kind: BlockKind::Document,
                text: String::new(),
                parent: None,
                children: Vec::new(),
                slot: 0,
                attached: true,
                active: false,
            }],
        }
    }

    /// Appends a new block as the last child of `parent`.
    ///
    /// Appending below a detached parent yields a detached block.
    pub fn push(&mut self, parent: BlockId, kind: BlockKind, text: impl Into<String>) -> BlockId {
        let id = BlockId(self.blocks.len());
        let attached = self.contains(parent);
        let slot = self.blocks.get(parent.0).map_or(0, |p| p.children.len());
        self.blocks.push(Block {
            kind,
            text: text.into(),
            parent: Some(parent),
            children: Vec::new(),
            slot,
            attached,
            active: false,
        });
        if let Some(p) = self.blocks.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    /// Detaches `id` and its whole subtree from the document.
    ///
    /// Returns false if the block was not attached (or is the root).
    pub fn remove(&mut self, id: BlockId) -> bool {
        if id == self.root() || !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.blocks[id.0].parent {
            let siblings = &mut self.blocks[parent.0].children;
            siblings.retain(|&c| c != id);
            let reslot: Vec<(usize, BlockId)> = siblings.iter().copied().enumerate().collect();
            for (slot, child) in reslot {
                self.blocks[child.0].slot = slot;
            }
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let block = &mut self.blocks[next.0];
            block.attached = false;
            stack.extend(block.children.iter().copied());
        }
        true
    }

    #[must_use]
    /// Total number of blocks ever created, including detached ones.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    /// True when the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
    }

    #[must_use]
    /// Whether the focus highlight is currently on `id`.
    pub fn is_active(&self, id: BlockId) -> bool {
        self.blocks.get(id.0).is_some_and(|b| b.active)
    }

    #[must_use]
    /// Every block carrying the focus highlight.
    pub fn active_blocks(&self) -> Vec<BlockId> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.active)
            .map(|(i, _)| BlockId(i))
            .collect()
    }

    #[must_use]
    /// Attached blocks in pre-order, root first.
    pub fn preorder(&self) -> Vec<BlockId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.blocks[id.0].children.iter().rev().copied());
        }
        out
    }

    #[must_use]
    /// Plain-text rendering of a block and everything below it.
    pub fn render(&self, id: BlockId) -> String {
        let Some(kind) = self.kind(id) else {
            return String::new();
        };
        let block = &self.blocks[id.0];
        match kind {
            BlockKind::List => self.render_list(id, 0),
            BlockKind::ListItem => block.text.trim().to_string(),
            BlockKind::Document | BlockKind::Section | BlockKind::Quote => block
                .children
                .iter()
                .map(|&c| self.render(c))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
            BlockKind::Heading { .. } | BlockKind::Paragraph | BlockKind::Other => {
                block.text.trim().to_string()
            }
        }
    }

    fn render_list(&self, list: BlockId, depth: usize) -> String {
        let indent = "  ".repeat(depth);
        let mut lines = Vec::new();
        for item in self.children(list) {
            lines.push(format!("{indent}- {}", self.blocks[item.0].text.trim()));
            for nested in self.children(item) {
                if self.kind(nested) == Some(BlockKind::List) {
                    lines.push(self.render_list(nested, depth + 1));
                }
            }
        }
        lines.join("\n")
    }

    fn attached(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0).filter(|b| b.attached)
    }
}

impl DocumentTree for ContentTree {
    fn root(&self) -> BlockId {
        BlockId(0)
    }

    fn contains(&self, id: BlockId) -> bool {
        self.attached(id).is_some()
    }

    fn kind(&self, id: BlockId) -> Option<BlockKind> {
        self.attached(id).map(|b| b.kind)
    }

    fn text(&self, id: BlockId) -> Option<&str> {
        self.attached(id).map(|b| b.text.as_str())
    }

    fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.attached(id).and_then(|b| b.parent)
    }

    fn first_child(&self, id: BlockId) -> Option<BlockId> {
        self.attached(id).and_then(|b| b.children.first().copied())
    }

    fn last_child(&self, id: BlockId) -> Option<BlockId> {
        self.attached(id).and_then(|b| b.children.last().copied())
    }

    fn next_sibling(&self, id: BlockId) -> Option<BlockId> {
        let block = self.attached(id)?;
        let parent = self.attached(block.parent?)?;
        parent.children.get(block.slot + 1).copied()
    }

    fn prev_sibling(&self, id: BlockId) -> Option<BlockId> {
        let block = self.attached(id)?;
        let parent = self.attached(block.parent?)?;
        parent.children.get(block.slot.checked_sub(1)?).copied()
    }
}

impl FocusSink for ContentTree {
    fn mark(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.get_mut(id.0) {
            block.active = true;
        }
    }

    fn unmark(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.get_mut(id.0) {
            block.active = false;
        }
    }
}

#[cfg(test)]
#[path = "tests/content.rs"]
mod tests;
