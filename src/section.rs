//! Heading markers: the flat, levelled input of the outline builder.
//!
//! A section is a heading plus the body that follows it up to the next heading at the
//! same or a shallower level. Deeper headings belong to the body, so a level-1 excerpt
//! also previews its subsections. Body units are whole rendered blocks; the outline
//! builder truncates by dropping units, never by cutting one in half.

use crate::content::{BlockId, BlockKind, ContentTree, DocumentTree};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Labelled entry point of a document section.
pub struct HeadingMarker {
    /// Nesting depth, validated to 1–6 by the outline builder.
    pub level: u8,
    /// Heading text without markup.
    pub title: String,
    /// Index of this marker in the document's heading sequence.
    pub position: usize,
    /// Rendered blocks governed by this heading, in document order.
    pub body: Vec<String>,
}

impl HeadingMarker {
    #[must_use]
    /// Marker with no body, mostly useful for building outlines by hand.
    pub fn new(level: u8, title: impl Into<String>, position: usize) -> Self {
        Self {
            level,
            title: title.into(),
            position,
            body: Vec::new(),
        }
    }

    #[must_use]
    /// Attaches body units to the marker.
    pub fn with_body<I, S>(mut self, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = body.into_iter().map(Into::into).collect();
        self
    }
}

#[must_use]
/// Leaf blocks of the document in reading order, with containers flattened away.
pub fn body_units(tree: &ContentTree) -> Vec<BlockId> {
    let mut units = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match tree.kind(id) {
            Some(kind) if kind.is_container() => {
                let mut child = tree.last_child(id);
                while let Some(c) = child {
                    stack.push(c);
                    child = tree.prev_sibling(c);
                }
            }
            Some(_) => units.push(id),
            None => {}
        }
    }
    units
}

#[must_use]
/// Heading markers of a document, paired with the block each one came from.
pub fn collect_markers(tree: &ContentTree) -> Vec<(BlockId, HeadingMarker)> {
    let units = body_units(tree);
    let level_of = |id: BlockId| match tree.kind(id) {
        Some(BlockKind::Heading { level }) => Some(level),
        _ => None,
    };

    let mut markers = Vec::new();
    for (i, &id) in units.iter().enumerate() {
        let Some(level) = level_of(id) else {
            continue;
        };
        let body = units[i + 1..]
            .iter()
            .take_while(|&&u| level_of(u).is_none_or(|l| l > level))
            .map(|&u| tree.render(u))
            .filter(|s| !s.is_empty())
            .collect();
        let marker = HeadingMarker {
            level,
            title: tree.text(id).unwrap_or_default().trim().to_string(),
            position: markers.len(),
            body,
        };
        markers.push((id, marker));
    }
    markers
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
