mod app;
pub mod board;
mod input;
pub mod layout;
pub mod modal;

pub use app::App;
pub use board::KanbanBoard;
pub use input::{InputMode, ViewMode};
