//! Errors surfaced by the outline builder, the parser front-end and configuration.
//!
//! Navigation never fails: structural anomalies in the content tree (a block
//! removed mid-walk, a missing rectangle) are skipped rather than reported.

use thiserror::Error;

/// Errors that can occur while building outlines or loading documents.
#[derive(Debug, Error)]
pub enum Error {
    /// A heading marker carried a level outside 1–6.
    #[error("Invalid heading level {level} at marker {position} (expected 1-6)")]
    InvalidLevel {
        /// Index of the offending marker in the input sequence.
        position: usize,
        /// The level that was rejected.
        level: u8,
    },

    /// A configuration value cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The document could not be parsed into a content tree.
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;
