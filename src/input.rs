//! Resolving command-line paths into documents and loading them.
//!
//! Paths may name files directly or directories, which are scanned recursively for files
//! with a matching extension. Results are sorted so the reader opens documents in a
//! stable order.

use crate::content::ContentTree;
use crate::error::Result;
use crate::formats::{parse_document, Format};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expands files and directories into the list of matching document paths.
///
/// Files given explicitly are kept whatever their extension.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    let mut pending = paths;
    let mut explicit = true;
    while !pending.is_empty() {
        let mut next = Vec::new();
        for path in pending {
            let meta = fs::metadata(&path)?;
            if meta.is_dir() {
                for entry in fs::read_dir(&path)? {
                    next.push(entry?.path());
                }
            } else if explicit || has_extension(&path, extensions) {
                documents.push(path);
            }
        }
        pending = next;
        explicit = false;
    }
    documents.sort();
    documents.dedup();
    debug!(count = documents.len(), "found documents");
    Ok(documents)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Reads and parses one document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document<F: Format>(path: &Path, format: &F) -> Result<ContentTree> {
    let source = fs::read_to_string(path)?;
    parse_document(&source, format)
}

#[must_use]
/// Label for a document's outline root: the file stem.
pub fn document_title(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
