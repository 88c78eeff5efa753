//! focusmap: outline graphs and block-by-block focus reading for long documents.
//!
//! Two reader aids share one content model:
//!
//! - an **outline graph**: heading markers become a rooted, coloured tree with a bounded
//!   excerpt per section ([`outline`]), optionally built a chunk at a time so a large
//!   document never stalls the host's event loop ([`scheduler`]);
//! - a **focus mode**: exactly one meaningful block is highlighted, picked as the one
//!   nearest the viewport centre and then stepped through in document order
//!   ([`navigator`], [`filter`], [`geometry`]).
//!
//! Documents are parsed with tree-sitter ([`formats`]) into a [`content::ContentTree`],
//! but the navigator and outline extraction only rely on the [`content::DocumentTree`]
//! trait.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod formats;
pub mod geometry;
pub mod input;
pub mod navigator;
pub mod outline;
pub mod palette;
pub mod scheduler;
pub mod section;
pub mod surface;
pub mod ui;

pub use error::{Error, Result};
