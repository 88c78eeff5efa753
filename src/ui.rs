//! The UI renders the application state into something visible and navigable.
//!
//! The draw function dispatches based on the current view (reader or outline). The reader
//! dims everything but the focus block while focus mode is on; the outline view shows the
//! section tree with box-drawing characters, tinted by colour group, next to a preview of
//! the selected section's excerpt.

use crate::app_state::{AppState, View};
use crate::content::BlockKind;
use crate::outline::{NodeId, Outline, ROOT_ID};
use crate::palette::Palette;
use crate::surface::LayoutDirection;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the help bar.
pub const HELP_HEIGHT: u16 = 3;

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(HELP_HEIGHT)])
        .split(f.area());

    match app.current_view {
        View::Reader => draw_reader(f, app, chunks[0]),
        View::Outline => draw_outline(f, app, chunks[0]),
    }
    draw_help(f, app, chunks[1]);
}

fn draw_reader(f: &mut Frame, app: &AppState, area: Rect) {
    let focusing = app.navigator.is_active();
    let current = app.navigator.current();
    let first = app.scroll;
    let last = app.scroll + app.viewport_rows;

    let mut rows: Vec<Line> = Vec::with_capacity(usize::from(area.height));
    for placed in &app.layout.placed {
        let bottom = placed.top + placed.lines.len();
        if bottom <= first || placed.top >= last {
            continue;
        }
        // Blank separator rows between blocks.
        while first + rows.len() < placed.top {
            rows.push(Line::raw(""));
        }
        let style = block_style(placed.kind, focusing, current == Some(placed.block));
        for (offset, text) in placed.lines.iter().enumerate() {
            let row = placed.top + offset;
            if row >= first && row < last {
                rows.push(Line::from(Span::styled(text.clone(), style)));
            }
        }
    }

    let title = match app.navigator.current() {
        Some(block) if focusing => format!(" {} [focus #{}] ", app.path.display(), block.0),
        _ => format!(" {} ", app.path.display()),
    };
    let reader = Paragraph::new(rows).block(Block::default().borders(Borders::NONE).title(title));
    f.render_widget(reader, area);
}

fn block_style(kind: BlockKind, focusing: bool, is_current: bool) -> Style {
    if is_current {
        return Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(40, 40, 60))
            .add_modifier(Modifier::BOLD);
    }
    let base = match kind {
        BlockKind::Heading { .. } => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        BlockKind::Other => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    if focusing {
        base.fg(Color::DarkGray).remove_modifier(Modifier::BOLD)
    } else {
        base
    }
}

/// Outline rows in depth-first order, each with the box-drawing prefix placing it under
/// its ancestors. Built in one pass so a redraw stays linear in the outline size.
fn tree_rows(outline: &Outline) -> Vec<(NodeId, String)> {
    let mut rows = Vec::with_capacity(outline.nodes.len());
    if outline.nodes.is_empty() {
        return rows;
    }
    let children = outline.child_lists();
    // (node, guide inherited by its children, own prefix)
    let mut stack = vec![(ROOT_ID, String::new(), String::new())];
    while let Some((id, guide, prefix)) = stack.pop() {
        rows.push((id, prefix));
        let Some(kids) = outline.index_of(id).and_then(|i| children.get(i)) else {
            continue;
        };
        for (n, &child) in kids.iter().enumerate().rev() {
            let last = n + 1 == kids.len();
            let (branch, rail) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
            stack.push((child, format!("{guide}{rail}"), format!("{guide}{branch}")));
        }
    }
    rows
}

fn draw_outline(f: &mut Frame, app: &AppState, area: Rect) {
    let direction = match app.layout_direction() {
        LayoutDirection::TopDown => Direction::Vertical,
        LayoutDirection::LeftRight => Direction::Horizontal,
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let outline = app.outline();
    let palette = Palette::default();
    let items: Vec<ListItem> = tree_rows(outline)
        .into_iter()
        .filter_map(|(id, prefix)| outline.node(id).map(|node| (node, prefix)))
        .map(|(node, prefix)| {
            let swatch = Style::default().fg(palette.terminal(node.color_group));
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled("■ ", swatch),
                Span::raw(node.label.clone()),
            ]))
        })
        .collect();

    let title = match app.outline_progress() {
        Some((built, total)) => format!(" Outline (building {built}/{total}) "),
        None => " Outline ".to_string(),
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.outline_cursor));
    f.render_stateful_widget(list, panes[0], &mut state);

    let preview = app
        .preview
        .and_then(|id| outline.node(id))
        .map_or_else(
            || "Enter to preview, Enter again to jump".to_string(),
            |node| {
                node.excerpt
                    .clone()
                    .unwrap_or_else(|| format!("{} has no body", node.label))
            },
        );
    let preview = Paragraph::new(preview)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Preview "));
    f.render_widget(preview, panes[1]);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let keys = match app.current_view {
        View::Reader => "f: focus | j/k: next/prev block | PgUp/PgDn: scroll | Tab: outline | q: quit",
        View::Outline => "↑/↓: select | Enter: preview, Enter again: jump | Esc/Tab: reader | q: quit",
    };
    let mut spans = vec![Span::raw(keys)];
    if let Some(message) = &app.message {
        spans.push(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Green),
        ));
    }
    let help = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
