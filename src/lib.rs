pub mod cli;
pub mod config;
pub mod leads;
pub mod logging;
pub mod tui;
