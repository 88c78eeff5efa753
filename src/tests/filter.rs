use super::BlockFilter;
use crate::content::{BlockKind, ContentTree, DocumentTree};

#[test]
fn test_paragraph_needs_visible_text() {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let full = tree.push(root, BlockKind::Paragraph, "text");
    let blank = tree.push(root, BlockKind::Paragraph, " \n\t ");
    let filter = BlockFilter::default();

    assert!(filter.is_valid(&tree, full));
    assert!(!filter.is_valid(&tree, blank));
}

#[test]
fn test_list_needs_one_non_empty_item() {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let empty = tree.push(root, BlockKind::List, "");
    tree.push(empty, BlockKind::ListItem, "  ");
    tree.push(empty, BlockKind::ListItem, "");
    let mixed = tree.push(root, BlockKind::List, "");
    tree.push(mixed, BlockKind::ListItem, "");
    tree.push(mixed, BlockKind::ListItem, "kept");
    let bare = tree.push(root, BlockKind::List, "");
    let filter = BlockFilter::default();

    assert!(!filter.is_valid(&tree, empty));
    assert!(filter.is_valid(&tree, mixed));
    assert!(!filter.is_valid(&tree, bare));
}

#[test]
fn test_list_only_counts_immediate_items() {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let outer = tree.push(root, BlockKind::List, "");
    let item = tree.push(outer, BlockKind::ListItem, "");
    let inner = tree.push(item, BlockKind::List, "");
    tree.push(inner, BlockKind::ListItem, "deep");
    let filter = BlockFilter::default();

    assert!(!filter.is_valid(&tree, outer));
    assert!(filter.is_valid(&tree, inner));
}

#[test]
fn test_headings_are_opt_in() {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let heading = tree.push(root, BlockKind::Heading { level: 1 }, "Title");

    assert!(!BlockFilter::new(false).is_valid(&tree, heading));
    assert!(BlockFilter::new(true).is_valid(&tree, heading));
}

#[test]
fn test_other_kinds_and_detached_blocks_are_invalid() {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let code = tree.push(root, BlockKind::Other, "fn main() {}");
    let item = tree.push(root, BlockKind::ListItem, "loose item");
    let gone = tree.push(root, BlockKind::Paragraph, "gone");
    tree.remove(gone);
    let filter = BlockFilter::new(true);

    assert!(!filter.is_valid(&tree, code));
    assert!(!filter.is_valid(&tree, item));
    assert!(!filter.is_valid(&tree, gone));
    assert!(!filter.is_valid(&tree, root));
}

#[test]
fn test_is_valid_is_stable() {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let para = tree.push(root, BlockKind::Paragraph, "same");
    let filter = BlockFilter::default();

    assert_eq!(filter.is_valid(&tree, para), filter.is_valid(&tree, para));
}
