//! Screen geometry shared by drawing and mouse hit-testing.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of a lead card including borders
pub const CARD_HEIGHT: u16 = 7;

/// Areas of the board screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub header: Rect,
    pub body: Rect,
    pub columns: Vec<Rect>,
    pub footer: Rect,
}

/// Split the screen into header, one rect per column, and footer
pub fn board_layout(area: Rect, column_count: usize) -> BoardLayout {
    // Main layout: header, board, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let count = column_count.max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)).collect::<Vec<_>>())
        .split(chunks[1]);

    BoardLayout {
        header: chunks[0],
        body: chunks[1],
        columns: columns.iter().copied().take(column_count).collect(),
        footer: chunks[2],
    }
}

/// How many cards fit inside a column's border
pub fn max_visible_cards(column: Rect) -> usize {
    (column.height.saturating_sub(2) / CARD_HEIGHT) as usize
}

/// First visible card so that the selected one stays on screen
pub fn scroll_offset(card_count: usize, selected_row: usize, is_selected_column: bool, max_visible: usize) -> usize {
    if is_selected_column && card_count > max_visible && selected_row >= max_visible {
        selected_row - max_visible + 1
    } else {
        0
    }
}

/// Area of the card drawn in visible slot `slot` of a column's inner area
pub fn card_area(inner: Rect, slot: usize, needs_scrollbar: bool) -> Rect {
    let top = slot as u16 * CARD_HEIGHT;
    Rect {
        x: inner.x,
        y: inner.y + top,
        width: if needs_scrollbar { inner.width.saturating_sub(1) } else { inner.width },
        height: CARD_HEIGHT.min(inner.height.saturating_sub(top)),
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    !rect.is_empty() && x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Column under a screen position
pub fn hit_test_column(columns: &[Rect], x: u16, y: u16) -> Option<usize> {
    columns.iter().position(|rect| contains(*rect, x, y))
}

/// Card row under a screen row within a column
pub fn hit_test_card(column: Rect, y: u16, scroll_offset: usize, card_count: usize) -> Option<usize> {
    let inner_y = column.y + 1;
    if y < inner_y || y >= column.y + column.height.saturating_sub(1) {
        return None;
    }
    let slot = ((y - inner_y) / CARD_HEIGHT) as usize;
    if slot >= max_visible_cards(column) {
        return None;
    }
    let row = scroll_offset + slot;
    (row < card_count).then_some(row)
}

/// The title row of a column doubles as its "add lead" control
pub fn is_column_title(column: Rect, x: u16, y: u16) -> bool {
    y == column.y && contains(column, x, y)
}

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Area of the add-lead dialog
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(50, 60, area)
}

/// True when a click lands outside the dialog
pub fn is_outside(rect: Rect, x: u16, y: u16) -> bool {
    !contains(rect, x, y)
}
