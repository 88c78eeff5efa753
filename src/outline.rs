//! Outline graph construction: heading markers in, a rooted, coloured tree out.
//!
//! Each marker becomes a node attached to the most recent heading at any shallower
//! level (or the root), so level jumps such as 1 → 3 are tolerated. Colours are
//! assigned per parent: the first time a node gains a child it is given the next
//! colour group, and every child it ever gets is drawn in that group. Siblings
//! therefore always share a colour.
//!
//! All mutable build state (id counter, ancestor stack, colour-group map) lives in an
//! [`OutlineState`] so the same state machine backs both the one-shot
//! [`OutlineBuilder::build`] and the chunked [`crate::scheduler::IncrementalBuild`].

use crate::error::{Error, Result};
use crate::palette::Palette;
use crate::section::HeadingMarker;
use serde::Serialize;
use std::collections::BTreeMap;

/// Appended to an excerpt that ran over its budget.
pub const TRUNCATION_MARKER: &str = "...";

/// Default character budget of an excerpt.
pub const DEFAULT_EXCERPT_BUDGET: usize = 2000;

/// Label used when the caller supplies no usable root label.
pub const DEFAULT_ROOT_LABEL: &str = "Root";

const EXCERPT_SEPARATOR: &str = "\n\n";
const MAX_LEVEL: u8 = 6;
/// Ancestor slots: index 0 plus one per heading level.
const LEVEL_SLOTS: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Identifier of an outline node. Assigned monotonically, root first.
pub struct NodeId(pub u32);

/// The root node's fixed id.
pub const ROOT_ID: NodeId = NodeId(1);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A node of the outline graph.
pub struct OutlineNode {
    /// Unique id.
    pub id: NodeId,
    /// Heading text (or the root label).
    pub label: String,
    /// Colour group index; the palette entry is `color_group % palette.len()`.
    pub color_group: usize,
    /// CSS colour resolved from the palette.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bounded preview of the section body.
    pub excerpt: Option<String>,
    #[serde(skip)]
    /// Index of the originating marker; `None` for the root.
    pub position: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// Parent → child link.
pub struct OutlineEdge {
    /// Parent node.
    pub from: NodeId,
    /// Child node.
    pub to: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Node and edge lists handed to a graph renderer.
pub struct Outline {
    /// Nodes in discovery order, root first.
    pub nodes: Vec<OutlineNode>,
    /// One edge per non-root node, in discovery order.
    pub edges: Vec<OutlineEdge>,
}

impl Outline {
    #[must_use]
    /// Position of a node in [`nodes`](Self::nodes). Ids are dense and start at the root.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let index = usize::try_from(id.0.checked_sub(ROOT_ID.0)?).ok()?;
        (index < self.nodes.len()).then_some(index)
    }

    #[must_use]
    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&OutlineNode> {
        self.nodes.get(self.index_of(id)?).filter(|n| n.id == id)
    }

    #[must_use]
    /// Parent of a node; `None` for the root or unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        // Edges are pushed alongside nodes, so node `i` owns edge `i - 1`.
        let edge = self
            .index_of(id)
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.edges.get(i))
            .filter(|e| e.to == id);
        match edge {
            Some(e) => Some(e.from),
            None => self.edges.iter().find(|e| e.to == id).map(|e| e.from),
        }
    }

    /// Children of a node in discovery order.
    ///
    /// Scans every edge; use [`child_lists`](Self::child_lists) when walking the whole tree.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter(move |e| e.from == id).map(|e| e.to)
    }

    #[must_use]
    /// Children of every node in discovery order, indexed like [`nodes`](Self::nodes).
    pub fn child_lists(&self) -> Vec<Vec<NodeId>> {
        let mut lists = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if let Some(list) = self.index_of(edge.from).and_then(|i| lists.get_mut(i)) {
                list.push(edge.to);
            }
        }
        lists
    }

    #[must_use]
    /// Number of edges between `id` and the root.
    pub fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut node = id;
        while let Some(parent) = self.parent_of(node) {
            depth += 1;
            node = parent;
        }
        depth
    }

    #[must_use]
    /// Node ids in depth-first order, root first, children in discovery order.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return order;
        }
        let children = self.child_lists();
        let mut stack = vec![ROOT_ID];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(list) = self.index_of(id).and_then(|i| children.get(i)) {
                stack.extend(list.iter().rev());
            }
        }
        order
    }
}

#[derive(Clone, Debug)]
/// Knobs shared by every build.
pub struct OutlineOptions {
    /// Character budget per excerpt.
    pub excerpt_budget: usize,
    /// Root label used when none (or a blank one) is given.
    pub default_root_label: String,
    /// Colour table.
    pub palette: Palette,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            excerpt_budget: DEFAULT_EXCERPT_BUDGET,
            default_root_label: DEFAULT_ROOT_LABEL.to_string(),
            palette: Palette::default(),
        }
    }
}

/// Rejects markers whose level is outside 1–6.
///
/// # Errors
///
/// Returns [`Error::InvalidLevel`] for the first offending marker, carrying the marker's
/// own position.
pub fn validate_markers(markers: &[HeadingMarker]) -> Result<()> {
    match markers.iter().find(|m| !(1..=MAX_LEVEL).contains(&m.level)) {
        Some(marker) => Err(Error::InvalidLevel {
            position: marker.position,
            level: marker.level,
        }),
        None => Ok(()),
    }
}

#[must_use]
/// Joins body units until adding the next one would exceed `budget` characters.
///
/// The blank-line separators between units count towards the budget, so the result
/// never exceeds `budget + TRUNCATION_MARKER.len()` characters. The unit that would cross
/// the budget is dropped whole and [`TRUNCATION_MARKER`] is appended. Returns `None` for
/// an empty body.
pub fn excerpt(body: &[String], budget: usize) -> Option<String> {
    let mut out = String::new();
    let mut used = 0;
    for unit in body {
        let separator = if out.is_empty() { "" } else { EXCERPT_SEPARATOR };
        let added = separator.chars().count() + unit.chars().count();
        if used + added > budget {
            out.push_str(TRUNCATION_MARKER);
            break;
        }
        out.push_str(separator);
        out.push_str(unit);
        used += added;
    }
    (!out.is_empty()).then_some(out)
}

#[derive(Clone, Debug)]
/// Explicit state of one outline build.
pub struct OutlineState {
    options: OutlineOptions,
    next_id: u32,
    /// Most recent node per heading level; index 0 is never set and resolves to root.
    ancestors: [Option<NodeId>; LEVEL_SLOTS],
    groups: BTreeMap<NodeId, usize>,
    last_group: usize,
    outline: Outline,
}

impl OutlineState {
    #[must_use]
    /// Starts a build by emitting the root node.
    pub fn new(options: OutlineOptions, root_label: Option<&str>) -> Self {
        let label = root_label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&options.default_root_label)
            .to_string();
        let root = OutlineNode {
            id: ROOT_ID,
            label,
            color_group: 0,
            color: options.palette.css(0),
            excerpt: None,
            position: None,
        };
        Self {
            options,
            next_id: ROOT_ID.0 + 1,
            ancestors: [None; LEVEL_SLOTS],
            groups: BTreeMap::new(),
            last_group: 0,
            outline: Outline {
                nodes: vec![root],
                edges: Vec::new(),
            },
        }
    }

    /// Adds one marker as a node plus the edge from its parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`] without touching the state if the level is
    /// outside 1–6.
    pub fn push(&mut self, marker: &HeadingMarker) -> Result<NodeId> {
        if !(1..=MAX_LEVEL).contains(&marker.level) {
            return Err(Error::InvalidLevel {
                position: marker.position,
                level: marker.level,
            });
        }
        let level = usize::from(marker.level);
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let parent = self.ancestors[..level]
            .iter()
            .rev()
            .find_map(|slot| *slot)
            .unwrap_or(ROOT_ID);
        let color_group = self.group_for(parent);

        self.outline.nodes.push(OutlineNode {
            id,
            label: marker.title.clone(),
            color_group,
            color: self.options.palette.css(color_group),
            excerpt: excerpt(&marker.body, self.options.excerpt_budget),
            position: Some(marker.position),
        });
        self.outline.edges.push(OutlineEdge {
            from: parent,
            to: id,
        });

        // A heading closes every deeper open section.
        self.ancestors[level] = Some(id);
        for slot in &mut self.ancestors[level + 1..] {
            *slot = None;
        }
        Ok(id)
    }

    fn group_for(&mut self, parent: NodeId) -> usize {
        if let Some(&group) = self.groups.get(&parent) {
            return group;
        }
        self.last_group += 1;
        self.groups.insert(parent, self.last_group);
        self.last_group
    }

    #[must_use]
    /// The outline built so far. Always a connected tree.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    #[must_use]
    /// Consumes the state, yielding the outline.
    pub fn into_outline(self) -> Outline {
        self.outline
    }
}

#[derive(Clone, Debug, Default)]
/// One-shot outline builder.
pub struct OutlineBuilder {
    options: OutlineOptions,
}

impl OutlineBuilder {
    #[must_use]
    /// Creates a builder with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    #[must_use]
    /// Options applied to every build.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Builds the whole outline in one go.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`] if any marker is malformed; no partial outline is
    /// produced.
    pub fn build(&self, markers: &[HeadingMarker], root_label: Option<&str>) -> Result<Outline> {
        validate_markers(markers)?;
        let mut state = OutlineState::new(self.options.clone(), root_label);
        for marker in markers {
            state.push(marker)?;
        }
        Ok(state.into_outline())
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
