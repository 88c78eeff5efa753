//! Chunked outline building for hosts with a single-threaded event loop.
//!
//! An [`IncrementalBuild`] consumes markers from one ordered cursor, a fixed number per
//! [`turn`](IncrementalBuild::turn). The host calls `turn` whenever it has nothing more
//! urgent to do (one call per event-loop tick, say), so a large document never blocks
//! input handling for longer than one chunk. The partial outline is a well-formed tree
//! after every turn.
//!
//! Cancellation is cooperative: [`cancel`](IncrementalBuild::cancel) clears the
//! processing flag and every subsequent turn sees it before touching any marker.

use crate::error::{Error, Result};
use crate::outline::{validate_markers, Outline, OutlineOptions, OutlineState};
use crate::section::HeadingMarker;
use tracing::{debug, info};

/// Default number of markers handled per turn.
pub const DEFAULT_CHUNK_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of a single turn.
pub enum Progress {
    /// Markers remain; schedule another turn.
    Pending {
        /// Markers consumed so far.
        processed: usize,
        /// Total markers in the build.
        total: usize,
    },
    /// Every marker has been consumed.
    Complete,
    /// The build was cancelled before finishing.
    Cancelled,
}

#[derive(Clone, Debug)]
/// Outline build that advances in bounded chunks.
pub struct IncrementalBuild {
    markers: Vec<HeadingMarker>,
    cursor: usize,
    chunk_size: usize,
    processing: bool,
    state: OutlineState,
}

impl IncrementalBuild {
    /// Validates the markers and emits the root node; no heading is processed yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero chunk size and
    /// [`Error::InvalidLevel`] if any marker is malformed.
    pub fn new(
        options: OutlineOptions,
        markers: Vec<HeadingMarker>,
        root_label: Option<&str>,
        chunk_size: usize,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk size must be at least 1".into()));
        }
        validate_markers(&markers)?;
        Ok(Self {
            processing: true,
            cursor: 0,
            chunk_size,
            state: OutlineState::new(options, root_label),
            markers,
        })
    }

    /// Processes up to one chunk of markers.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidLevel`]; unreachable for markers that passed
    /// validation in [`new`](Self::new).
    pub fn turn(&mut self) -> Result<Progress> {
        if !self.processing {
            return Ok(if self.is_complete() {
                Progress::Complete
            } else {
                Progress::Cancelled
            });
        }
        let end = (self.cursor + self.chunk_size).min(self.markers.len());
        for marker in &self.markers[self.cursor..end] {
            self.state.push(marker)?;
        }
        self.cursor = end;
        debug!(
            processed = self.cursor,
            total = self.markers.len(),
            "outline turn"
        );

        if self.is_complete() {
            self.processing = false;
            info!(nodes = self.state.outline().nodes.len(), "outline complete");
            Ok(Progress::Complete)
        } else {
            Ok(Progress::Pending {
                processed: self.cursor,
                total: self.markers.len(),
            })
        }
    }

    /// Runs turns until the build completes or is cancelled.
    ///
    /// # Errors
    ///
    /// See [`turn`](Self::turn).
    pub fn run_to_completion(&mut self) -> Result<Progress> {
        loop {
            match self.turn()? {
                Progress::Pending { .. } => {}
                done => return Ok(done),
            }
        }
    }

    /// Stops scheduling further turns. Markers already processed stay in the outline.
    pub fn cancel(&mut self) {
        if self.processing {
            debug!(processed = self.cursor, "outline build cancelled");
        }
        self.processing = false;
    }

    #[must_use]
    /// True while turns remain to be run.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    #[must_use]
    /// True once every marker has been consumed.
    pub fn is_complete(&self) -> bool {
        self.cursor == self.markers.len()
    }

    #[must_use]
    /// The outline built so far.
    pub fn outline(&self) -> &Outline {
        self.state.outline()
    }

    #[must_use]
    /// Consumes the build, yielding the (possibly partial) outline.
    pub fn into_outline(self) -> Outline {
        self.state.into_outline()
    }
}

#[cfg(test)]
#[path = "tests/scheduler.rs"]
mod tests;
