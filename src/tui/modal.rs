//! The "add lead" dialog and the form state behind it.

use crate::leads::{BoardError, DealValue};

use super::board::{KanbanBoard, NewLead};

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

/// Dialog shown while a lead is being entered
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait ModalOperations {
    /// Show the dialog for the column labelled `target_label`
    fn open(&mut self, target_label: &str);

    fn close(&mut self);

    fn is_open(&self) -> bool;

    fn title(&self) -> String;
}

/// Overlay dialog used by the app
#[derive(Debug, Clone, Default)]
pub struct AddLeadModal {
    visible: bool,
    title: String,
}

impl ModalOperations for AddLeadModal {
    fn open(&mut self, target_label: &str) {
        self.title = format!("Add {} Lead", target_label);
        self.visible = true;
    }

    fn close(&mut self) {
        self.visible = false;
    }

    fn is_open(&self) -> bool {
        self.visible
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Company,
    Description,
    Value,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[FormField::Name, FormField::Company, FormField::Description, FormField::Value]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Company => "Company",
            FormField::Description => "Description",
            FormField::Value => "Value ($)",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::Company,
            FormField::Company => FormField::Description,
            FormField::Description => FormField::Value,
            FormField::Value => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Name => FormField::Value,
            FormField::Company => FormField::Name,
            FormField::Description => FormField::Company,
            FormField::Value => FormField::Description,
        }
    }
}

/// Values entered in the add-lead dialog, discarded on submit or cancel
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    /// Column the dialog was opened from
    pub target: usize,
    pub fields: NewLead,
    pub focus: FormField,
    /// Cursor position (in chars) within the focused field
    pub cursor: usize,
    /// Message shown after a rejected submit
    pub error: Option<String>,
}

impl LeadForm {
    pub fn clear(&mut self) {
        self.fields = NewLead::default();
        self.focus = FormField::Name;
        self.cursor = 0;
        self.error = None;
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.fields.name,
            FormField::Company => &self.fields.company,
            FormField::Description => &self.fields.description,
            FormField::Value => &self.fields.value,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.fields.name,
            FormField::Company => &mut self.fields.company,
            FormField::Description => &mut self.fields.description,
            FormField::Value => &mut self.fields.value,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.cursor = self.value(self.focus).chars().count();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.cursor = self.value(self.focus).chars().count();
    }

    /// Insert a character at the cursor. The value field only takes
    /// digits and separators.
    pub fn insert_char(&mut self, c: char) {
        if self.focus == FormField::Value && !DealValue::accepts(c) {
            return;
        }
        let cursor = self.cursor;
        let field = self.value_mut(self.focus);
        let at = byte_index(field, cursor);
        field.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let cursor = self.cursor;
        let field = self.value_mut(self.focus);
        let at = byte_index(field, cursor);
        field.remove(at);
    }

    pub fn delete(&mut self) {
        let cursor = self.cursor;
        let field = self.value_mut(self.focus);
        if cursor < field.chars().count() {
            let at = byte_index(field, cursor);
            field.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let len = self.value(self.focus).chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.value(self.focus).chars().count();
    }
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map(|(i, _)| i).unwrap_or(s.len())
}

/// Open the dialog for `column` with an empty form
pub fn open_add_lead(board: &KanbanBoard, column: usize, form: &mut LeadForm, modal: &mut dyn ModalOperations) {
    let Some(target) = board.column(column) else {
        tracing::debug!(column, "add lead requested for unknown column");
        return;
    };
    form.clear();
    form.target = column;
    modal.open(target.label.as_str());
}

/// Create the lead described by `form`. On success the dialog closes and the
/// form is cleared; on failure the dialog stays open with the message set.
pub fn submit_lead(
    board: &mut KanbanBoard,
    form: &mut LeadForm,
    modal: &mut dyn ModalOperations,
) -> Result<String, BoardError> {
    match board.create_card(form.target, form.fields.clone()) {
        Ok(card_id) => {
            modal.close();
            form.clear();
            Ok(card_id)
        }
        Err(err) => {
            form.error = Some(err.to_string());
            Err(err)
        }
    }
}
