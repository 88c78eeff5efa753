//! The reader state machine bridging a parsed document, focus mode and the outline view.
//!
//! The terminal is mapped onto the core's pixel geometry with a fixed row height, so block
//! rectangles, the settle distance and the narrow-width threshold keep their meaning. The
//! document is laid out once per terminal width: every body unit gets a starting row and
//! its wrapped lines.

use crate::config::Config;
use crate::content::{BlockId, BlockKind, ContentTree, DocumentTree};
use crate::error::Result;
use crate::geometry::{self, Rect};
use crate::navigator::{FocusNavigator, Transition};
use crate::outline::{NodeId, Outline};
use crate::scheduler::IncrementalBuild;
use crate::section::{body_units, collect_markers};
use crate::surface::{Activation, ConfirmGesture, LayoutDirection, ScrollSettle};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

/// Pixel height of one terminal row.
pub const ROW_HEIGHT: f64 = 16.0;
/// Pixel width of one terminal column.
pub const COLUMN_WIDTH: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which screen renders and how input is interpreted.
pub enum View {
    /// The document, optionally in focus mode.
    Reader,
    /// The outline tree with section previews.
    Outline,
}

#[derive(Clone, Debug)]
/// One body unit placed on the page.
pub struct Placed {
    /// Block rendered here.
    pub block: BlockId,
    /// Kind of the block, for styling.
    pub kind: BlockKind,
    /// First page row of the block.
    pub top: usize,
    /// Wrapped lines.
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, Default)]
/// Page layout of a document at a given width.
pub struct PageLayout {
    /// Units in reading order.
    pub placed: Vec<Placed>,
    index: HashMap<BlockId, usize>,
    /// Total page height in rows.
    pub rows: usize,
}

impl PageLayout {
    #[must_use]
    /// Lays out every body unit of `tree`, separated by blank rows.
    pub fn new(tree: &ContentTree, width: usize) -> Self {
        let width = width.max(8);
        let mut layout = Self::default();
        for unit in body_units(tree) {
            let Some(kind) = tree.kind(unit) else {
                continue;
            };
            let text = match kind {
                BlockKind::Heading { level } => {
                    format!("{} {}", "#".repeat(usize::from(level)), tree.render(unit))
                }
                _ => tree.render(unit),
            };
            if text.trim().is_empty() {
                continue;
            }
            let lines: Vec<String> = match kind {
                BlockKind::Other => text.lines().map(str::to_string).collect(),
                _ => text
                    .lines()
                    .flat_map(|line| textwrap::wrap(line, width))
                    .map(std::borrow::Cow::into_owned)
                    .collect(),
            };
            let height = lines.len();
            layout.index.insert(unit, layout.placed.len());
            layout.placed.push(Placed {
                block: unit,
                kind,
                top: layout.rows,
                lines,
            });
            layout.rows += height + 1;
        }
        layout
    }

    #[must_use]
    /// Viewport-relative rectangle of a block when the page is scrolled by `scroll` rows.
    pub fn rect_of(&self, block: BlockId, scroll: usize) -> Option<Rect> {
        let placed = &self.placed[*self.index.get(&block)?];
        let top = rows_to_px(placed.top) - rows_to_px(scroll);
        Some(Rect::new(top, rows_to_px(placed.lines.len())))
    }

    #[must_use]
    /// Placement of a block, if it is a laid-out unit.
    pub fn placed(&self, block: BlockId) -> Option<&Placed> {
        self.index.get(&block).map(|&i| &self.placed[i])
    }
}

#[allow(clippy::cast_precision_loss)]
fn rows_to_px(rows: usize) -> f64 {
    rows as f64 * ROW_HEIGHT
}

/// Single source of truth for the terminal reader.
pub struct AppState {
    /// Document being read.
    pub path: PathBuf,
    /// Parsed content tree; also receives the focus highlight.
    pub document: ContentTree,
    /// Focus mode state.
    pub navigator: FocusNavigator,
    /// Active screen.
    pub current_view: View,
    /// First visible page row.
    pub scroll: usize,
    /// Visible page rows.
    pub viewport_rows: usize,
    /// Terminal width in columns.
    pub width: u16,
    /// Page layout at the current width.
    pub layout: PageLayout,
    /// Outline build, advanced one turn per tick.
    pub outline: IncrementalBuild,
    /// Selected row of the outline view.
    pub outline_cursor: usize,
    /// Node whose excerpt is shown in the outline view.
    pub preview: Option<NodeId>,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    heading_blocks: Vec<BlockId>,
    settle: ScrollSettle,
    confirm: ConfirmGesture<NodeId>,
    narrow_width: u32,
}

impl AppState {
    /// Prepares the reader: collects heading markers and schedules the outline build.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable or a heading level is invalid.
    pub fn new(path: PathBuf, document: ContentTree, cfg: &Config) -> Result<Self> {
        cfg.validate()?;
        let (heading_blocks, markers): (Vec<_>, Vec<_>) =
            collect_markers(&document).into_iter().unzip();
        let title = crate::input::document_title(&path);
        let outline = IncrementalBuild::new(
            cfg.outline_options(),
            markers,
            title.as_deref(),
            cfg.chunk_size,
        )?;
        Ok(Self {
            path,
            navigator: FocusNavigator::new(cfg.block_filter()),
            layout: PageLayout::new(&document, 80),
            document,
            current_view: View::Reader,
            scroll: 0,
            viewport_rows: 24,
            width: 80,
            outline,
            outline_cursor: 0,
            preview: None,
            message: None,
            heading_blocks,
            settle: ScrollSettle::new(cfg.settle_distance),
            confirm: ConfirmGesture::new(cfg.confirm_window()),
            narrow_width: cfg.narrow_width,
        })
    }

    /// Adapts the layout to a new terminal size.
    pub fn resize(&mut self, width: u16, viewport_rows: usize) {
        if width != self.width {
            self.width = width;
            self.layout = PageLayout::new(&self.document, usize::from(width));
        }
        self.viewport_rows = viewport_rows.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Runs one outline scheduling turn if the build is still in progress.
    pub fn tick(&mut self) {
        if !self.outline.is_processing() {
            return;
        }
        if let Err(e) = self.outline.turn() {
            self.outline.cancel();
            self.message = Some(format!("Outline failed: {e}"));
        }
    }

    #[must_use]
    /// Outline progress as (processed, total), `None` once finished.
    pub fn outline_progress(&self) -> Option<(usize, usize)> {
        if !self.outline.is_processing() {
            return None;
        }
        let built = self.outline.outline().nodes.len() - 1;
        Some((built, self.heading_blocks.len()))
    }

    #[must_use]
    /// Last scrollable row.
    pub fn max_scroll(&self) -> usize {
        self.layout.rows.saturating_sub(self.viewport_rows)
    }

    #[must_use]
    /// Viewport height in pixels.
    pub fn viewport_height(&self) -> f64 {
        rows_to_px(self.viewport_rows)
    }

    #[must_use]
    /// Rectangle of a block at the current scroll position.
    pub fn rect_of(&self, block: BlockId) -> Option<Rect> {
        self.layout.rect_of(block, self.scroll)
    }

    #[must_use]
    /// Direction the outline should flow at the current terminal width.
    pub fn layout_direction(&self) -> LayoutDirection {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width_px = (f64::from(self.width) * COLUMN_WIDTH) as u32;
        LayoutDirection::for_width(width_px, self.narrow_width)
    }

    // --- Focus mode ---

    /// Switches focus mode on (highlighting the block nearest the centre) or off.
    pub fn toggle_focus(&mut self) {
        if self.navigator.is_active() {
            self.navigator.deactivate(&mut self.document);
            self.settle.reset();
            self.message = Some("Focus off".to_string());
            return;
        }
        let viewport = self.viewport_height();
        let (layout, scroll) = (&self.layout, self.scroll);
        let transition =
            self.navigator
                .activate(&mut self.document, viewport, |id| layout.rect_of(id, scroll));
        self.settle.anchor(rows_to_px(self.scroll));
        if let Some(t) = transition {
            self.center_on(t.to);
        }
        self.message = Some(if self.navigator.current().is_some() {
            "Focus on".to_string()
        } else {
            "Focus on (nothing to focus)".to_string()
        });
    }

    /// Highlights the next focus block and scrolls it to the centre.
    pub fn step_next(&mut self) -> Option<Transition> {
        let transition = self.navigator.step_next(&mut self.document)?;
        self.center_on(transition.to);
        Some(transition)
    }

    /// Highlights the previous focus block and scrolls it to the centre.
    pub fn step_previous(&mut self) -> Option<Transition> {
        let transition = self.navigator.step_previous(&mut self.document)?;
        self.center_on(transition.to);
        Some(transition)
    }

    /// Scrolls freely; in focus mode the focus block is re-picked once the scroll settles.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
        if self.navigator.is_active() && self.settle.should_requery(rows_to_px(self.scroll)) {
            let viewport = self.viewport_height();
            let (layout, scroll) = (&self.layout, self.scroll);
            self.navigator.find_nearest_to_viewport_center(
                &mut self.document,
                viewport,
                |id| layout.rect_of(id, scroll),
            );
        }
    }

    /// Scrolls so that `block` sits in the middle of the viewport.
    fn center_on(&mut self, block: BlockId) {
        let Some(rect) = self.rect_of(block) else {
            return;
        };
        let target = geometry::scroll_target(rect, self.viewport_height(), rows_to_px(self.scroll));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rows = (target / ROW_HEIGHT).round().max(0.0) as usize;
        self.scroll = rows.min(self.max_scroll());
        self.settle.anchor(rows_to_px(self.scroll));
        debug!(block = block.0, scroll = self.scroll, "centred focus block");
    }

    // --- Outline view ---

    /// Shows the outline. Entering it cancels focus mode.
    pub fn open_outline(&mut self) {
        if self.navigator.is_active() {
            self.navigator.deactivate(&mut self.document);
            self.settle.reset();
        }
        self.current_view = View::Outline;
        self.message = None;
    }

    /// Returns to the reader.
    pub fn close_outline(&mut self) {
        self.current_view = View::Reader;
        self.preview = None;
    }

    #[must_use]
    /// Outline built so far.
    pub fn outline(&self) -> &Outline {
        self.outline.outline()
    }

    #[must_use]
    /// Outline node under the cursor.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.outline().depth_first().get(self.outline_cursor).copied()
    }

    /// Moves the outline cursor by `delta` rows.
    pub fn move_outline_cursor(&mut self, delta: isize) {
        let last = self.outline().nodes.len().saturating_sub(1);
        self.outline_cursor = self.outline_cursor.saturating_add_signed(delta).min(last);
    }

    /// Activates the selected node: the first activation previews its excerpt, a second
    /// one within the confirm window jumps to the section.
    pub fn activate_selected(&mut self, now: Instant) {
        let Some(node) = self.selected_node() else {
            return;
        };
        match self.confirm.register(node, now) {
            Activation::Preview => self.preview = Some(node),
            Activation::Confirm => self.jump_to(node),
        }
    }

    /// Scrolls the reader to the heading behind an outline node.
    pub fn jump_to(&mut self, node: NodeId) {
        let heading = self
            .outline()
            .node(node)
            .and_then(|n| n.position)
            .and_then(|position| self.heading_blocks.get(position).copied());
        self.scroll = heading
            .and_then(|block| self.layout.placed(block))
            .map_or(0, |placed| placed.top)
            .min(self.max_scroll());
        self.close_outline();
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
