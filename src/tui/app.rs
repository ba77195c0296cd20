use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::io::{self, Stdout};

use crate::config::{Config, ThemeConfig};
use crate::leads::seed::SeedLead;
use crate::leads::{BoardError, Lead, StatusBadge};

use super::board::KanbanBoard;
use super::input::{InputMode, ViewMode};
use super::layout;
use super::modal::{self, AddLeadModal, FormField, LeadForm, ModalOperations};

/// Helper to convert hex color string to ratatui Color
fn hex_to_color(hex: &str) -> Color {
    ThemeConfig::parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

/// Build footer help text based on current UI state
fn build_footer_text(input_mode: InputMode, view: ViewMode) -> String {
    match input_mode {
        InputMode::Normal => match view {
            ViewMode::Board => {
                " [o] new lead  [space] grab  [h/j/k/l] move  [t] table  [mouse] drag cards  [q] quit ".to_string()
            }
            ViewMode::Table => " [o] new lead  [t] board  [q] quit ".to_string(),
        },
        InputMode::Dragging => " [h/l] choose column  [space/enter] drop  [esc] cancel ".to_string(),
        InputMode::AddLead => " [tab] next field  [enter] add lead  [esc] cancel ".to_string(),
    }
}

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Application state (separate from terminal for borrow checker)
struct AppState {
    should_quit: bool,
    board: KanbanBoard,
    input_mode: InputMode,
    view: ViewMode,
    config: Config,
    form: LeadForm,
    modal: Box<dyn ModalOperations>,
    // Screen area of the last frame, used for mouse hit-testing
    screen: Rect,
    // Set while a drag started by a mouse press is in progress
    mouse_drag: bool,
    // Set once the pointer moves while the button is held
    mouse_moved: bool,
    status_message: Option<String>,
}

pub struct App {
    terminal: Terminal,
    state: AppState,
}

impl App {
    pub fn new(config: Config, leads: Vec<SeedLead>) -> Result<Self> {
        Self::with_modal(config, leads, Box::new(AddLeadModal::default()))
    }

    pub fn with_modal(config: Config, leads: Vec<SeedLead>, modal: Box<dyn ModalOperations>) -> Result<Self> {
        let state = AppState::new(config, &leads, modal);

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, state })
    }

    pub fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.draw()?;

            if event::poll(std::time::Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.state.handle_key(key),
                    Event::Mouse(mouse) => self.state.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        let completed = self.terminal.draw(|frame| draw_app(state, frame))?;
        self.state.screen = completed.area;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

impl AppState {
    fn new(config: Config, leads: &[SeedLead], modal: Box<dyn ModalOperations>) -> Self {
        let board = KanbanBoard::from_seed(config.column_labels(), leads);
        tracing::info!(
            columns = board.columns().len(),
            leads = board.card_count(),
            "board initialized"
        );
        Self {
            should_quit: false,
            board,
            input_mode: InputMode::Normal,
            view: ViewMode::Board,
            config,
            form: LeadForm::default(),
            modal,
            screen: Rect::default(),
            mouse_drag: false,
            mouse_moved: false,
            status_message: None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key.code),
            InputMode::Dragging => self.handle_drag_key(key.code),
            InputMode::AddLead => self.handle_add_lead_key(key.code),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => {
                self.view = self.view.toggle();
            }
            KeyCode::Char('o') | KeyCode::Char('a') => self.open_add_lead(self.board.selected_column),
            _ if self.view == ViewMode::Table => {}
            KeyCode::Char('h') | KeyCode::Left => self.board.move_left(),
            KeyCode::Char('l') | KeyCode::Right => self.board.move_right(),
            KeyCode::Char('j') | KeyCode::Down => self.board.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.board.move_up(),
            KeyCode::Char(' ') => match self.board.begin_drag_selected() {
                Ok(()) => {
                    self.mouse_drag = false;
                    self.input_mode = InputMode::Dragging;
                }
                Err(err) => tracing::debug!(%err, "nothing to grab"),
            },
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('h') | KeyCode::Left => self.board.shift_drag_over(false),
            KeyCode::Char('l') | KeyCode::Right => self.board.shift_drag_over(true),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let target = self.board.drag_over_column();
                self.finish_drag(target);
            }
            KeyCode::Esc => self.finish_drag(None),
            _ => {}
        }
    }

    fn handle_add_lead_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.close_add_lead(),
            KeyCode::Enter => self.submit_add_lead(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Left => self.form.cursor_left(),
            KeyCode::Right => self.form.cursor_right(),
            KeyCode::Home => self.form.cursor_home(),
            KeyCode::End => self.form.cursor_end(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Delete => self.form.delete(),
            KeyCode::Char(c) => self.form.insert_char(c),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // Releases end the gesture whatever the mode or view is by now
        if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
            self.handle_mouse_up(mouse);
            return;
        }
        if self.input_mode == InputMode::AddLead {
            // Click outside the dialog closes it
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                if layout::is_outside(layout::modal_area(self.screen), mouse.column, mouse.row) {
                    self.close_add_lead();
                }
            }
            return;
        }
        if self.view != ViewMode::Board {
            return;
        }

        let board_layout = layout::board_layout(self.screen, self.board.columns().len());
        let hovered = layout::hit_test_column(&board_layout.columns, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(column) = hovered else { return };
                let rect = board_layout.columns[column];
                if layout::is_column_title(rect, mouse.column, mouse.row) {
                    self.open_add_lead(column);
                    return;
                }
                let count = self.board.cards_in_column(column).len();
                let offset = self.scroll_offset_for(column, rect);
                match layout::hit_test_card(rect, mouse.row, offset, count) {
                    Some(row) => {
                        let card_id = self.board.cards_in_column(column)[row].id.clone();
                        match self.board.begin_drag(&card_id) {
                            Ok(()) => {
                                self.mouse_drag = true;
                                self.mouse_moved = false;
                                self.input_mode = InputMode::Normal;
                                self.board.drag_over(column);
                            }
                            Err(err) => tracing::debug!(%err, "drag not started"),
                        }
                    }
                    None => {
                        self.board.selected_column = column;
                        self.board.selected_row = 0;
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.mouse_drag || self.board.drag_session().is_none() {
                    return;
                }
                self.mouse_moved = true;
                match (self.board.drag_over_column(), hovered) {
                    (Some(current), Some(column)) if current == column => {}
                    (current, Some(column)) => {
                        if let Some(current) = current {
                            self.board.drag_leave(current);
                        }
                        self.board.drag_over(column);
                    }
                    (Some(current), None) => self.board.drag_leave(current),
                    (None, None) => {}
                }
            }
            _ => {}
        }
    }

    fn handle_mouse_up(&mut self, mouse: MouseEvent) {
        // Keyboard grabs ignore the mouse
        if !std::mem::take(&mut self.mouse_drag) {
            return;
        }
        let moved = std::mem::take(&mut self.mouse_moved);
        if self.board.drag_session().is_none() {
            return;
        }
        // A click without movement only selects the card
        let target = if moved && self.input_mode == InputMode::Normal && self.view == ViewMode::Board {
            let board_layout = layout::board_layout(self.screen, self.board.columns().len());
            layout::hit_test_column(&board_layout.columns, mouse.column, mouse.row)
        } else {
            None
        };
        self.finish_drag(target);
    }

    fn scroll_offset_for(&self, column: usize, rect: Rect) -> usize {
        layout::scroll_offset(
            self.board.cards_in_column(column).len(),
            self.board.selected_row,
            self.board.selected_column == column,
            layout::max_visible_cards(rect),
        )
    }

    /// End the current drag gesture, dropping on `target` if given
    fn finish_drag(&mut self, target: Option<usize>) {
        match self.board.release(target) {
            Ok(Some(moved)) => {
                let name = self.board.card(&moved.card_id).map(|c| c.name.clone()).unwrap_or_default();
                let label = self.board.column(moved.to).map(|c| c.label.to_string()).unwrap_or_default();
                self.status_message = Some(format!("Moved {} to {}", name, label));
            }
            Ok(None) => {}
            Err(err) => log_swallowed(&err),
        }
        if self.input_mode == InputMode::Dragging {
            self.input_mode = InputMode::Normal;
        }
    }

    fn open_add_lead(&mut self, column: usize) {
        modal::open_add_lead(&self.board, column, &mut self.form, self.modal.as_mut());
        if self.modal.is_open() {
            self.input_mode = InputMode::AddLead;
        }
    }

    fn close_add_lead(&mut self) {
        self.modal.close();
        self.form.clear();
        self.input_mode = InputMode::Normal;
    }

    fn submit_add_lead(&mut self) {
        match modal::submit_lead(&mut self.board, &mut self.form, self.modal.as_mut()) {
            Ok(card_id) => {
                let name = self.board.card(&card_id).map(|c| c.name.clone()).unwrap_or_default();
                self.status_message = Some(format!("Added {}", name));
                self.input_mode = InputMode::Normal;
            }
            Err(err) if err.is_validation() => {}
            Err(err) => {
                log_swallowed(&err);
                self.close_add_lead();
            }
        }
    }
}

fn log_swallowed(err: &BoardError) {
    tracing::debug!(%err, "board operation ignored");
}

fn draw_app(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let board_layout = layout::board_layout(area, state.board.columns().len());

    // Header
    let header = Paragraph::new(format!(" Leads ({}) ", state.board.card_count()))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, board_layout.header);

    match state.view {
        ViewMode::Board => draw_board(state, frame, &board_layout),
        ViewMode::Table => draw_table(state, frame, board_layout.body),
    }

    // Footer with help, or the last status message
    let footer_text = match (&state.status_message, state.input_mode) {
        (Some(message), InputMode::Normal) => format!(" {} |{}", message, build_footer_text(state.input_mode, state.view)),
        _ => build_footer_text(state.input_mode, state.view),
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(hex_to_color(&state.config.theme.color_dimmed)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, board_layout.footer);

    if state.modal.is_open() {
        draw_modal(state, frame, layout::modal_area(area));
    }
}

fn draw_board(state: &AppState, frame: &mut Frame, board_layout: &layout::BoardLayout) {
    let theme = &state.config.theme;

    for (i, column) in state.board.columns().iter().enumerate() {
        let rect = board_layout.columns[i];
        let cards = &column.cards;
        let is_selected_column = state.board.selected_column == i;
        let is_drag_over = state.board.drag_over_column() == Some(i);

        let title = format!(" {} ({}) [+] ", column.label, cards.len());
        let (border_style, title_style, border_type) = if is_drag_over {
            (
                Style::default().fg(hex_to_color(&theme.color_drag_over)),
                Style::default().fg(hex_to_color(&theme.color_drag_over)).bold(),
                BorderType::Thick,
            )
        } else if is_selected_column {
            (
                Style::default().fg(hex_to_color(&theme.color_selected)),
                Style::default().fg(hex_to_color(&theme.color_selected)),
                BorderType::Plain,
            )
        } else {
            (
                Style::default().fg(hex_to_color(&theme.color_normal)),
                Style::default().fg(hex_to_color(&theme.color_column_header)),
                BorderType::Plain,
            )
        };

        let max_visible_cards = layout::max_visible_cards(rect);
        let scroll_offset = state.scroll_offset_for(i, rect);
        let needs_scrollbar = cards.len() > max_visible_cards;

        // Draw column border
        let column_block = Block::default()
            .title(title)
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(border_style)
            .border_type(border_type);
        let inner_area = column_block.inner(rect);
        frame.render_widget(column_block, rect);

        // Render cards with scroll offset
        for (slot, card) in cards.iter().skip(scroll_offset).take(max_visible_cards).enumerate() {
            let row = scroll_offset + slot;
            let card_area = layout::card_area(inner_area, slot, needs_scrollbar);
            if card_area.height < 3 {
                break;
            }
            let is_selected = is_selected_column && state.board.selected_row == row;
            let is_dragging = state.board.is_dragging(&card.id);
            draw_lead_card(frame, card, card_area, is_selected, is_dragging, theme);
        }

        if needs_scrollbar {
            draw_scrollbar(frame, inner_area, cards.len(), max_visible_cards, scroll_offset, theme);
        }
    }
}

fn draw_scrollbar(frame: &mut Frame, inner: Rect, total: usize, visible: usize, offset: usize, theme: &ThemeConfig) {
    let height = inner.height as usize;
    if height == 0 || total == 0 {
        return;
    }
    let thumb_height = (visible * height / total).max(1);
    let thumb_pos = (offset * height / total).min(height - thumb_height);
    let style = Style::default().fg(hex_to_color(&theme.color_dimmed));

    for y in 0..height {
        let glyph = if y >= thumb_pos && y < thumb_pos + thumb_height { "█" } else { "░" };
        frame.render_widget(
            Paragraph::new(glyph).style(style),
            Rect {
                x: inner.x + inner.width - 1,
                y: inner.y + y as u16,
                width: 1,
                height: 1,
            },
        );
    }
}

fn badge_span(badge: &StatusBadge, theme: &ThemeConfig) -> Span<'static> {
    let style = match theme.badge_color(badge.style) {
        Some(color) => Style::default().bg(hex_to_color(color)).fg(Color::Black),
        None => Style::default().fg(hex_to_color(&theme.color_dimmed)),
    };
    Span::styled(format!(" {} ", badge.text), style)
}

fn draw_lead_card(
    frame: &mut Frame,
    lead: &Lead,
    area: Rect,
    is_selected: bool,
    is_dragging: bool,
    theme: &ThemeConfig,
) {
    let (border_style, border_type) = if is_dragging {
        (Style::default().fg(hex_to_color(&theme.color_drag_over)), BorderType::Double)
    } else if is_selected {
        (Style::default().fg(hex_to_color(&theme.color_selected)), BorderType::Thick)
    } else {
        (Style::default().fg(hex_to_color(&theme.color_normal)), BorderType::Plain)
    };

    let card_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .border_type(border_type);
    let inner = card_block.inner(area);
    frame.render_widget(card_block, area);

    let time = lead.time_label(chrono::Utc::now());
    let max_name_len = (inner.width as usize).saturating_sub(time.chars().count() + 5);
    let name: String = if lead.name.chars().count() > max_name_len {
        let truncated: String = lead.name.chars().take(max_name_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        lead.name.clone()
    };

    let name_style = if is_dragging {
        Style::default().fg(hex_to_color(&theme.color_dimmed))
    } else {
        Style::default().fg(hex_to_color(&theme.color_text)).bold()
    };
    let padding = (inner.width as usize).saturating_sub(name.chars().count() + time.chars().count() + 4);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", lead.avatar()),
                Style::default().bg(hex_to_color(&theme.color_accent)).fg(Color::White).bold(),
            ),
            Span::raw(" "),
            Span::styled(name, name_style),
            Span::raw(" ".repeat(padding)),
            Span::styled(time, Style::default().fg(hex_to_color(&theme.color_dimmed))),
        ]),
        Line::from(Span::styled(
            lead.company.clone(),
            Style::default().fg(hex_to_color(&theme.color_column_header)),
        )),
    ];

    // Description gets whatever rows remain above the badge line
    let description_rows = (inner.height as usize).saturating_sub(3);
    let max_chars = (inner.width as usize) * description_rows;
    if description_rows > 0 && !lead.description.is_empty() {
        let text: String = if lead.description.chars().count() > max_chars {
            format!("{}...", lead.description.chars().take(max_chars.saturating_sub(3)).collect::<String>())
        } else {
            lead.description.clone()
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(hex_to_color(&theme.color_description)).italic(),
        )));
    }

    let mut tags = vec![badge_span(&lead.badge, theme)];
    if let Some(value) = &lead.value {
        tags.push(Span::raw(" "));
        tags.push(Span::styled(
            format!(" {} ", value),
            Style::default().bg(hex_to_color(&theme.color_badge_value)).fg(Color::Black),
        ));
    }

    let body_height = inner.height.saturating_sub(1);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        Rect { height: body_height, ..inner },
    );
    if inner.height > 0 {
        frame.render_widget(
            Paragraph::new(Line::from(tags)),
            Rect {
                y: inner.y + body_height,
                height: 1,
                ..inner
            },
        );
    }
}

fn draw_table(state: &AppState, frame: &mut Frame, area: Rect) {
    let theme = &state.config.theme;
    let now = chrono::Utc::now();

    let header = Row::new(["Name", "Company", "Status", "Value", "Added"])
        .style(Style::default().fg(hex_to_color(&theme.color_column_header)).bold());

    let rows: Vec<Row> = state
        .board
        .columns()
        .iter()
        .flat_map(|column| column.cards.iter())
        .map(|lead| {
            Row::new(vec![
                Cell::from(lead.name.clone()),
                Cell::from(lead.company.clone()),
                Cell::from(Line::from(badge_span(&lead.badge, theme))),
                Cell::from(lead.value.as_ref().map(|v| v.to_string()).unwrap_or_default()),
                Cell::from(lead.time_label(now)),
            ])
            .style(Style::default().fg(hex_to_color(&theme.color_text)))
        })
        .collect();

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(15),
        Constraint::Percentage(15),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" All Leads ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(hex_to_color(&theme.color_normal))),
    );
    frame.render_widget(table, area);
}

fn draw_modal(state: &AppState, frame: &mut Frame, area: Rect) {
    let theme = &state.config.theme;
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", state.modal.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(hex_to_color(&theme.color_popup_border)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FormField::all().iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(1)); // Error line
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in FormField::all().iter().enumerate() {
        let focused = state.form.focus == *field;
        let value = state.form.value(*field);
        let text = if focused {
            let at = value
                .char_indices()
                .nth(state.form.cursor)
                .map(|(idx, _)| idx)
                .unwrap_or(value.len());
            let (before, after) = value.split_at(at);
            format!("{}█{}", before, after)
        } else {
            value.to_string()
        };
        let border = if focused {
            Style::default().fg(hex_to_color(&theme.color_selected))
        } else {
            Style::default().fg(hex_to_color(&theme.color_dimmed))
        };
        let input = Paragraph::new(text)
            .style(Style::default().fg(hex_to_color(&theme.color_text)))
            .block(Block::default().title(format!(" {} ", field.label())).borders(Borders::ALL).border_style(border));
        frame.render_widget(input, chunks[i]);
    }

    if let Some(error) = &state.form.error {
        let message = Paragraph::new(format!(" {}", error)).style(Style::default().fg(Color::Red).bold());
        frame.render_widget(message, chunks[FormField::all().len()]);
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
