//! Format trait and the tree-sitter front-end that turns source text into a content tree.
//!
//! A `Format` supplies the tree-sitter language, a query locating heading titles, and a
//! mapping from syntax node kinds to block roles. [`parse_document`] does the rest:
//! it walks the syntax tree once and emits a [`ContentTree`] whose blocks carry cleaned
//! plain text.

pub mod markdown;

use crate::content::{BlockId, BlockKind, ContentTree, DocumentTree};
use crate::error::{Error, Result};
use std::collections::HashMap;
use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Node, Parser, Query, QueryCursor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a syntax node maps onto the content tree.
pub enum NodeRole {
    /// The syntax root; its children attach to the content root.
    Root,
    /// A block that keeps its own children (sections, quotes, lists, items).
    Container(BlockKind),
    /// A heading; its level is read with [`Format::heading_level`].
    Heading,
    /// A leaf block whose text is taken verbatim (code, tables, raw HTML).
    Verbatim,
    /// A leaf block of running text, reflowed to a single line.
    Text(BlockKind),
    /// Syntax the reader never sees (markers, continuations, definitions).
    Skip,
}

/// A document syntax understood by the tree-sitter front-end.
pub trait Format {
    /// Grammar used to parse the document.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose `@title` captures hold heading titles. Captures without a heading
    /// ancestor are ignored.
    fn title_query(&self) -> &str;
    /// Role of a named syntax node.
    fn role(&self, kind: &str) -> NodeRole;
    /// Level (1–6) of a heading node.
    fn heading_level(&self, heading: Node<'_>) -> Option<u8>;
}

/// Parses `source` into a content tree.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the grammar cannot be loaded, the query is invalid or the
/// parser yields no tree.
pub fn parse_document<F: Format>(source: &str, format: &F) -> Result<ContentTree> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Parse(e.to_string()))?;
    let syntax = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parse("parser produced no tree".into()))?;

    let titles = heading_titles(source, format, &language, syntax.root_node())?;

    let mut tree = ContentTree::new();
    let mut stack: Vec<(Node<'_>, BlockId)> = vec![(syntax.root_node(), tree.root())];
    while let Some((node, parent)) = stack.pop() {
        let attach_children_to = match format.role(node.kind()) {
            NodeRole::Root => Some(parent),
            NodeRole::Container(BlockKind::ListItem) => {
                let text = item_text(node, source, format);
                Some(tree.push(parent, BlockKind::ListItem, text))
            }
            NodeRole::Container(kind) => Some(tree.push(parent, kind, String::new())),
            NodeRole::Heading => {
                if let Some(level) = format.heading_level(node) {
                    let title = titles.get(&node.id()).cloned().unwrap_or_else(|| {
                        clean_text(node_text(node, source).trim_start_matches('#'))
                    });
                    tree.push(parent, BlockKind::Heading { level }, title);
                }
                None
            }
            NodeRole::Text(kind) => {
                tree.push(parent, kind, clean_text(node_text(node, source)));
                None
            }
            NodeRole::Verbatim => {
                let text = node_text(node, source).trim_end().to_string();
                tree.push(parent, BlockKind::Other, text);
                None
            }
            NodeRole::Skip => None,
        };
        if let Some(block) = attach_children_to {
            let mut walker = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut walker).collect();
            for child in children.into_iter().rev() {
                // List items carry their paragraphs as text; only nested lists stay blocks.
                if format.role(node.kind()) == NodeRole::Container(BlockKind::ListItem)
                    && format.role(child.kind()) != NodeRole::Container(BlockKind::List)
                {
                    continue;
                }
                stack.push((child, block));
            }
        }
    }
    debug!(blocks = tree.len(), "parsed document");
    Ok(tree)
}

fn heading_titles<F: Format>(
    source: &str,
    format: &F,
    language: &tree_sitter::Language,
    root: Node<'_>,
) -> Result<HashMap<usize, String>> {
    let query =
        Query::new(language, format.title_query()).map_err(|e| Error::Parse(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source.as_bytes());

    let mut titles = HashMap::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            // Setext titles sit one level deeper, inside a paragraph.
            let heading = std::iter::successors(capture.node.parent(), Node::parent)
                .find(|n| format.role(n.kind()) == NodeRole::Heading);
            if let Some(heading) = heading {
                titles.insert(heading.id(), clean_text(node_text(capture.node, source)));
            }
        }
    }
    Ok(titles)
}

fn item_text<F: Format>(item: Node<'_>, source: &str, format: &F) -> String {
    let mut walker = item.walk();
    item.named_children(&mut walker)
        .filter(|child| matches!(format.role(child.kind()), NodeRole::Text(_)))
        .map(|child| clean_text(node_text(child, source)))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Reflows running text onto one line, dropping quote markers from continuation lines.
fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.trim().trim_start_matches(|c: char| c == '>' || c.is_whitespace()))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/formats.rs"]
mod tests;
