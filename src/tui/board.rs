use std::collections::HashSet;

use crate::leads::seed::SeedLead;
use crate::leads::{
    BadgeStyle, BoardError, DealValue, Lead, LeadStatus, Precondition, StatusLabel, ValidationError,
};

/// A kanban lane. Index 0 of `cards` is the top of the column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: StatusLabel,
    pub cards: Vec<Lead>,
}

impl Column {
    pub fn new(label: StatusLabel) -> Self {
        Self { label, cards: vec![] }
    }
}

/// The card currently being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub card_id: String,
    pub source_column: usize,
}

/// Field values entered for a new lead
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub company: String,
    pub description: String,
    pub value: String,
}

impl NewLead {
    /// Trim every field and require a name and a company
    pub fn validated(self) -> Result<Self, ValidationError> {
        let lead = Self {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            description: self.description.trim().to_string(),
            value: self.value.trim().to_string(),
        };
        if lead.name.is_empty() || lead.company.is_empty() {
            return Err(ValidationError::MissingNameOrCompany);
        }
        Ok(lead)
    }
}

/// Result of a successful drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moved {
    pub card_id: String,
    pub from: usize,
    pub to: usize,
    pub style: BadgeStyle,
}

/// State for the kanban board view
#[derive(Debug)]
pub struct KanbanBoard {
    columns: Vec<Column>,
    pub selected_column: usize,
    pub selected_row: usize,
    drag: Option<DragSession>,
    drag_over: Option<usize>,
    draggable: HashSet<String>,
    drop_targets: HashSet<usize>,
}

impl KanbanBoard {
    /// Empty board with one column per label, ready for dragging
    pub fn new(labels: Vec<StatusLabel>) -> Self {
        let mut board = Self {
            columns: labels.into_iter().map(Column::new).collect(),
            selected_column: 0,
            selected_row: 0,
            drag: None,
            drag_over: None,
            draggable: HashSet::new(),
            drop_targets: HashSet::new(),
        };
        board.initialize();
        board
    }

    /// Board with the four lead statuses as columns
    pub fn with_default_columns() -> Self {
        Self::new(LeadStatus::columns().iter().copied().map(StatusLabel::from).collect())
    }

    /// Board pre-filled with seed leads, in file order within each column.
    /// Leads naming an unknown column or missing a name/company are skipped.
    pub fn from_seed(labels: Vec<StatusLabel>, seeds: &[SeedLead]) -> Self {
        let mut board = Self::new(labels);
        for seed in seeds {
            let Some(column) = StatusLabel::parse(&seed.status).and_then(|l| board.column_index(&l)) else {
                tracing::warn!(name = %seed.name, status = %seed.status, "skipping seed lead: no such column");
                continue;
            };
            let mut value = seed.value.clone().unwrap_or_default();
            if !value.trim().is_empty() && DealValue::parse(&value).is_none() {
                tracing::warn!(name = %seed.name, %value, "ignoring non-numeric deal value");
                value.clear();
            }
            let fields = NewLead {
                name: seed.name.clone(),
                company: seed.company.clone(),
                description: seed.description.clone(),
                value,
            };
            let fields = match fields.validated() {
                Ok(fields) => fields,
                Err(err) => {
                    tracing::warn!(name = %seed.name, %err, "skipping seed lead");
                    continue;
                }
            };
            let mut lead = board.build_lead(column, fields);
            if let Some(created_at) = seed.created_at {
                lead.created_at = created_at;
            }
            board.columns[column].cards.push(lead);
        }
        board.initialize();
        board
    }

    /// Register every card as a drag source and every column as a drop
    /// target. Returns how many registrations were new.
    pub fn initialize(&mut self) -> usize {
        let ids: Vec<String> = self
            .columns
            .iter()
            .flat_map(|c| c.cards.iter().map(|card| card.id.clone()))
            .collect();
        let mut added = 0;
        for id in ids {
            if self.register_card(&id) {
                added += 1;
            }
        }
        for index in 0..self.columns.len() {
            if self.drop_targets.insert(index) {
                added += 1;
            }
        }
        added
    }

    /// Returns false if the card was already registered
    pub fn register_card(&mut self, card_id: &str) -> bool {
        self.draggable.insert(card_id.to_string())
    }

    pub fn is_draggable(&self, card_id: &str) -> bool {
        self.draggable.contains(card_id)
    }

    pub fn is_drop_target(&self, column: usize) -> bool {
        self.drop_targets.contains(&column)
    }

    /// Forget all registrations and any open drag
    pub fn reset_registrations(&mut self) {
        self.end_drag();
        self.draggable.clear();
        self.drop_targets.clear();
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_index(&self, label: &StatusLabel) -> Option<usize> {
        self.columns.iter().position(|c| &c.label == label)
    }

    /// Get cards in a specific column
    pub fn cards_in_column(&self, column: usize) -> &[Lead] {
        self.columns.get(column).map(|c| c.cards.as_slice()).unwrap_or(&[])
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Column and row of a card
    pub fn find_card(&self, card_id: &str) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, column)| {
            column.cards.iter().position(|c| c.id == card_id).map(|row| (ci, row))
        })
    }

    pub fn card(&self, card_id: &str) -> Option<&Lead> {
        self.find_card(card_id).map(|(c, r)| &self.columns[c].cards[r])
    }

    /// Get the currently selected card
    pub fn selected_card(&self) -> Option<&Lead> {
        self.cards_in_column(self.selected_column).get(self.selected_row)
    }

    /// Move selection left
    pub fn move_left(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.clamp_row();
        }
    }

    /// Move selection right
    pub fn move_right(&mut self) {
        if self.selected_column + 1 < self.columns.len() {
            self.selected_column += 1;
            self.clamp_row();
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        let column_count = self.cards_in_column(self.selected_column).len();
        if self.selected_row < column_count.saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    /// Ensure selected_row is valid for current column
    fn clamp_row(&mut self) {
        let column_count = self.cards_in_column(self.selected_column).len();
        if column_count == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= column_count {
            self.selected_row = column_count - 1;
        }
    }

    // === Drag and drop ===

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self, card_id: &str) -> bool {
        self.drag.as_ref().is_some_and(|d| d.card_id == card_id)
    }

    /// Column currently highlighted as a drop target
    pub fn drag_over_column(&self) -> Option<usize> {
        self.drag_over
    }

    /// Start dragging a card. An open drag is ended first.
    pub fn begin_drag(&mut self, card_id: &str) -> Result<(), BoardError> {
        let (column, row) = self
            .find_card(card_id)
            .ok_or_else(|| BoardError::PreconditionUnmet(Precondition::UnknownCard(card_id.to_string())))?;
        if !self.is_draggable(card_id) {
            return Err(BoardError::PreconditionUnmet(Precondition::NotDraggable(card_id.to_string())));
        }
        if self.drag.is_some() {
            self.end_drag();
        }

        self.drag = Some(DragSession {
            card_id: card_id.to_string(),
            source_column: column,
        });
        self.selected_column = column;
        self.selected_row = row;
        tracing::debug!(card_id, column, "drag started");
        Ok(())
    }

    /// Start dragging the selected card and highlight its column
    pub fn begin_drag_selected(&mut self) -> Result<(), BoardError> {
        let card_id = self
            .selected_card()
            .map(|c| c.id.clone())
            .ok_or_else(|| BoardError::PreconditionUnmet(Precondition::UnknownCard(String::new())))?;
        self.begin_drag(&card_id)?;
        self.drag_over(self.selected_column);
        Ok(())
    }

    /// Clear the drag session and all drag markers. Safe to call at any time.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.drag.take() {
            tracing::debug!(card_id = %session.card_id, "drag ended");
        }
        self.drag_over = None;
    }

    pub fn drag_over(&mut self, column: usize) {
        if self.is_drop_target(column) {
            self.drag_over = Some(column);
        }
    }

    pub fn drag_leave(&mut self, column: usize) {
        if self.drag_over == Some(column) {
            self.drag_over = None;
        }
    }

    /// Shift the highlighted drop target by one column
    pub fn shift_drag_over(&mut self, right: bool) {
        if self.drag.is_none() {
            return;
        }
        let current = self.drag_over.unwrap_or(self.selected_column);
        let next = if right {
            (current + 1).min(self.columns.len().saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };
        self.drag_over(next);
    }

    /// Move the dragged card to the front of `column` and relabel it.
    /// The drag session stays open; `end_drag` closes it.
    pub fn drop_on(&mut self, column: usize) -> Result<Moved, BoardError> {
        // The highlight goes even when the drop is rejected
        self.drag_leave(column);
        let session = self
            .drag
            .as_ref()
            .ok_or(BoardError::PreconditionUnmet(Precondition::NoActiveDrag))?;
        if column >= self.columns.len() || !self.is_drop_target(column) {
            return Err(BoardError::PreconditionUnmet(Precondition::UnknownColumn(column)));
        }
        let card_id = session.card_id.clone();
        let (from, row) = self
            .find_card(&card_id)
            .ok_or_else(|| BoardError::PreconditionUnmet(Precondition::UnknownCard(card_id.clone())))?;

        let mut card = self.columns[from].cards.remove(row);
        card.set_status(self.columns[column].label.clone());
        let style = card.badge.style;
        self.columns[column].cards.insert(0, card);

        if style == BadgeStyle::Unstyled {
            tracing::warn!(column = %self.columns[column].label, "no badge style for column, rendering unstyled");
        }
        tracing::info!(%card_id, from = %self.columns[from].label, to = %self.columns[column].label, "lead moved");

        self.selected_column = column;
        self.selected_row = 0;
        Ok(Moved {
            card_id,
            from,
            to: column,
            style,
        })
    }

    /// Finish a drag gesture: drop on `target` if given, then always end
    /// the drag. `None` is a cancelled gesture.
    pub fn release(&mut self, target: Option<usize>) -> Result<Option<Moved>, BoardError> {
        let result = target.map(|column| self.drop_on(column)).transpose();
        self.end_drag();
        result
    }

    /// Create a lead at the top of `target`. Returns the new card's id.
    pub fn create_card(&mut self, target: usize, fields: NewLead) -> Result<String, BoardError> {
        if target >= self.columns.len() {
            return Err(BoardError::PreconditionUnmet(Precondition::UnknownColumn(target)));
        }
        let fields = fields.validated()?;
        let lead = self.build_lead(target, fields);
        let card_id = lead.id.clone();

        // Draggable before it becomes visible
        self.register_card(&card_id);
        self.columns[target].cards.insert(0, lead);
        if self.selected_column == target && self.cards_in_column(target).len() > 1 {
            self.selected_row += 1;
        }
        tracing::info!(%card_id, column = %self.columns[target].label, "lead created");
        Ok(card_id)
    }

    fn build_lead(&self, column: usize, fields: NewLead) -> Lead {
        let mut lead = Lead::new(fields.name, fields.company, self.columns[column].label.clone());
        lead.description = fields.description;
        lead.value = DealValue::parse(&fields.value);
        lead
    }
}

impl Default for KanbanBoard {
    fn default() -> Self {
        Self::with_default_columns()
    }
}
