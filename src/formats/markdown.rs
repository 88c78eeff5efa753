//! Markdown format implementation using tree-sitter-md.
//!
//! This module maps the block grammar of tree-sitter-md onto content blocks. Heading titles
//! come from the inline content of both ATX (`#` syntax) and setext (underlined) headings;
//! inline runs outside headings are captured too and discarded by the front-end.

use crate::content::BlockKind;
use crate::formats::{Format, NodeRole};
use tree_sitter::Node;

/// Tree-sitter queries and node mapping for markdown documents.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn title_query(&self) -> &'static str {
        "(inline) @title"
    }

    fn role(&self, kind: &str) -> NodeRole {
        match kind {
            "document" => NodeRole::Root,
            "section" => NodeRole::Container(BlockKind::Section),
            "block_quote" => NodeRole::Container(BlockKind::Quote),
            "list" => NodeRole::Container(BlockKind::List),
            "list_item" => NodeRole::Container(BlockKind::ListItem),
            "atx_heading" | "setext_heading" => NodeRole::Heading,
            "paragraph" => NodeRole::Text(BlockKind::Paragraph),
            "fenced_code_block" | "indented_code_block" | "html_block" | "pipe_table"
            | "thematic_break" => NodeRole::Verbatim,
            _ => NodeRole::Skip,
        }
    }

    fn heading_level(&self, heading: Node<'_>) -> Option<u8> {
        let mut walker = heading.walk();
        let level = heading
            .children(&mut walker)
            .find_map(|child| match child.kind() {
                "atx_h1_marker" | "setext_h1_underline" => Some(1),
                "atx_h2_marker" | "setext_h2_underline" => Some(2),
                "atx_h3_marker" => Some(3),
                "atx_h4_marker" => Some(4),
                "atx_h5_marker" => Some(5),
                "atx_h6_marker" => Some(6),
                _ => None,
            });
        level
    }
}
