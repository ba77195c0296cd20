use clap::Parser;
use std::path::PathBuf;

use crate::logging::{LogFormat, LogLevel};

#[derive(Parser, Debug, Default)]
#[command(name = "leadboard", version, about = "Terminal kanban board for CRM leads")]
pub struct Cli {
    /// Leads to load at start-up (.toml or .json)
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Config file (default: ~/.config/leadboard/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Column labels, left to right (repeatable)
    #[arg(long = "column", short = 'c')]
    pub columns: Vec<String>,

    /// Log verbosity level
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
