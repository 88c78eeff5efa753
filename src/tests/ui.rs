use super::{draw, tree_rows};
use crate::app_state::AppState;
use crate::config::Config;
use crate::content::{BlockKind, ContentTree, DocumentTree};
use crate::outline::{NodeId, OutlineBuilder, ROOT_ID};
use crate::section::HeadingMarker;
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, Terminal};
use std::path::PathBuf;

fn screen(app: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

fn reader() -> AppState {
    let mut tree = ContentTree::new();
    let root = tree.root();
    tree.push(root, BlockKind::Heading { level: 1 }, "Welcome");
    tree.push(root, BlockKind::Paragraph, "Plain words to read.");
    tree.push(root, BlockKind::Heading { level: 2 }, "Details");
    AppState::new(PathBuf::from("guide.md"), tree, &Config::default()).unwrap()
}

#[test]
fn test_tree_rows_draw_branches() {
    let markers = [(1, "a"), (2, "b"), (2, "c"), (1, "d")]
        .into_iter()
        .enumerate()
        .map(|(i, (level, title))| HeadingMarker::new(level, title, i))
        .collect::<Vec<_>>();
    let outline = OutlineBuilder::default().build(&markers, None).unwrap();

    let rows = tree_rows(&outline);
    let ids: Vec<NodeId> = rows.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, outline.depth_first(), "rows line up with the outline cursor");

    let prefixes: Vec<&str> = rows.iter().map(|(_, prefix)| prefix.as_str()).collect();
    assert_eq!(prefixes, vec!["", "├── ", "│   ├── ", "│   └── ", "└── "]);
    assert_eq!(rows[0].0, ROOT_ID);
}

#[test]
fn test_reader_renders_document() {
    let app = reader();
    let text = screen(&app);
    assert!(text.contains("# Welcome"));
    assert!(text.contains("Plain words to read."));
    assert!(text.contains("f: focus"));
}

#[test]
fn test_outline_view_lists_sections() {
    let mut app = reader();
    app.tick();
    app.open_outline();
    let text = screen(&app);

    assert!(text.contains("guide"));
    assert!(text.contains("Welcome"));
    assert!(text.contains("Details"));
    assert!(text.contains("Preview"));
}
