/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode - navigating the board
    Normal,
    /// A card is grabbed with the keyboard and follows h/l
    Dragging,
    /// Entering a new lead in the add-lead dialog
    AddLead,
}

impl Default for InputMode {
    fn default() -> Self {
        Self::Normal
    }
}

/// Which view fills the main area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Board,
    Table,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Board => ViewMode::Table,
            ViewMode::Table => ViewMode::Board,
        }
    }
}
