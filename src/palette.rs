//! The fixed colour table used to tint outline nodes by colour group.
//!
//! Groups are unbounded integers handed out by the outline builder; the palette
//! cycles through its entries so that group `n` and group `n + len` share a colour.

use crate::error::{Error, Result};
use ratatui::style::Color;

const DEFAULT_COLORS: [[u8; 3]; 9] = [
    [255, 102, 102], // red
    [102, 255, 102], // green
    [102, 102, 255], // blue
    [255, 255, 102], // yellow
    [255, 102, 255], // magenta
    [102, 255, 255], // cyan
    [255, 178, 102], // orange
    [178, 255, 102], // lime
    [102, 178, 255], // sky
];

#[derive(Clone, Debug, PartialEq, Eq)]
/// Ordered set of RGB colours, indexed modulo its length.
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    /// Builds a palette from explicit RGB triples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `colors` is empty.
    pub fn new(colors: Vec<[u8; 3]>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidConfig("palette must not be empty".into()));
        }
        Ok(Self { colors })
    }

    #[must_use]
    /// Number of distinct entries before the palette wraps around.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    /// Always false; an empty palette cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    /// RGB triple for a colour group.
    pub fn rgb(&self, group: usize) -> [u8; 3] {
        self.colors[group % self.colors.len()]
    }

    #[must_use]
    /// CSS `rgb(r, g, b)` form consumed by graph renderers.
    pub fn css(&self, group: usize) -> String {
        let [r, g, b] = self.rgb(group);
        format!("rgb({r}, {g}, {b})")
    }

    #[must_use]
    /// Terminal colour for the same group.
    pub fn terminal(&self, group: usize) -> Color {
        let [r, g, b] = self.rgb(group);
        Color::Rgb(r, g, b)
    }
}

#[cfg(test)]
#[path = "tests/palette.rs"]
mod tests;
