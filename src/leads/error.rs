use std::fmt;

/// Errors returned by board operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("precondition unmet: {0}")]
    PreconditionUnmet(Precondition),
}

/// Required field missing on lead creation
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name & Company required")]
    MissingNameOrCompany,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// Drop fired with no card being dragged
    NoActiveDrag,
    UnknownColumn(usize),
    UnknownCard(String),
    /// Card exists but was never registered as a drag source
    NotDraggable(String),
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::NoActiveDrag => write!(f, "no active drag"),
            Precondition::UnknownColumn(index) => write!(f, "no column at index {}", index),
            Precondition::UnknownCard(id) => write!(f, "card {} not on the board", id),
            Precondition::NotDraggable(id) => write!(f, "card {} is not registered as draggable", id),
        }
    }
}

impl BoardError {
    pub fn is_validation(&self) -> bool {
        matches!(self, BoardError::Validation(_))
    }
}
