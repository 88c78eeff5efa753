use super::{document_title, find_documents, load_document};
use crate::content::{BlockKind, DocumentTree};
use crate::formats::markdown::MarkdownFormat;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

fn touch(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn test_directories_are_scanned_recursively() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("b.md"), "# B");
    touch(&root.join("a.md"), "# A");
    touch(&root.join("notes.txt"), "plain");
    touch(&root.join("nested/deep/c.md"), "# C");

    let found = find_documents(vec![root.to_path_buf()], &["md".to_string()]).unwrap();

    assert_eq!(
        found,
        vec![
            root.join("a.md"),
            root.join("b.md"),
            root.join("nested/deep/c.md"),
        ]
    );
}

#[test]
fn test_explicit_files_ignore_extension_filter() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("readme.txt");
    touch(&text, "# Title");

    let found = find_documents(vec![text.clone(), text.clone()], &["md".to_string()]).unwrap();
    assert_eq!(found, vec![text]);
}

#[test]
fn test_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.md");
    assert!(find_documents(vec![missing], &["md".to_string()]).is_err());
}

#[test]
fn test_load_document_parses_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.md");
    touch(&path, "# Heading\n\nBody text.\n");

    let tree = load_document(&path, &MarkdownFormat).unwrap();
    let kinds: Vec<BlockKind> = tree
        .preorder()
        .into_iter()
        .filter_map(|id| tree.kind(id))
        .filter(|kind| !kind.is_container())
        .collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Heading { level: 1 }, BlockKind::Paragraph]
    );
}

#[test]
fn test_document_title_is_file_stem() {
    assert_eq!(
        document_title(&PathBuf::from("docs/guide.md")),
        Some("guide".to_string())
    );
    assert_eq!(document_title(Path::new("/")), None);
}
