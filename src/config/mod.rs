use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::leads::{BadgeStyle, LeadStatus, StatusLabel};
use crate::logging::{LogFormat, LogLevel};

/// Configuration (stored in ~/.config/leadboard/)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Column labels, left to right
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Leads to show at start-up (TOML or JSON)
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// UI theme/colors
    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            seed_file: None,
            theme: ThemeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_columns() -> Vec<String> {
    LeadStatus::columns().iter().map(|s| s.as_str().to_string()).collect()
}

/// Theme configuration with hex colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Border color for selected elements (hex, e.g. "#FFFF00")
    #[serde(default = "default_color_selected")]
    pub color_selected: String,

    /// Border color for normal/unselected elements
    #[serde(default = "default_color_normal")]
    pub color_normal: String,

    /// Border color for dimmed/inactive elements
    #[serde(default = "default_color_dimmed")]
    pub color_dimmed: String,

    /// Text color for names
    #[serde(default = "default_color_text")]
    pub color_text: String,

    /// Accent color for avatars and highlights
    #[serde(default = "default_color_accent")]
    pub color_accent: String,

    /// Color for lead descriptions
    #[serde(default = "default_color_description")]
    pub color_description: String,

    /// Color for column headers when not selected
    #[serde(default = "default_color_column_header")]
    pub color_column_header: String,

    /// Border color of a column while a card is dragged over it
    #[serde(default = "default_color_drag_over")]
    pub color_drag_over: String,

    /// Color for popup borders
    #[serde(default = "default_color_popup_border")]
    pub color_popup_border: String,

    #[serde(default = "default_color_badge_new")]
    pub color_badge_new: String,

    #[serde(default = "default_color_badge_production")]
    pub color_badge_production: String,

    #[serde(default = "default_color_badge_artwork")]
    pub color_badge_artwork: String,

    #[serde(default = "default_color_badge_shipped")]
    pub color_badge_shipped: String,

    /// Color of the deal value tag
    #[serde(default = "default_color_badge_value")]
    pub color_badge_value: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_selected: default_color_selected(),
            color_normal: default_color_normal(),
            color_dimmed: default_color_dimmed(),
            color_text: default_color_text(),
            color_accent: default_color_accent(),
            color_description: default_color_description(),
            color_column_header: default_color_column_header(),
            color_drag_over: default_color_drag_over(),
            color_popup_border: default_color_popup_border(),
            color_badge_new: default_color_badge_new(),
            color_badge_production: default_color_badge_production(),
            color_badge_artwork: default_color_badge_artwork(),
            color_badge_shipped: default_color_badge_shipped(),
            color_badge_value: default_color_badge_value(),
        }
    }
}

fn default_color_selected() -> String {
    "#ead49a".to_string() // Yellow
}

fn default_color_normal() -> String {
    "#5b6b82".to_string() // Slate
}

fn default_color_dimmed() -> String {
    "#9C9991".to_string() // Dark Gray
}

fn default_color_text() -> String {
    "#f2ece6".to_string()
}

fn default_color_accent() -> String {
    "#3b82f6".to_string() // Blue
}

fn default_color_description() -> String {
    "#cbd5e1".to_string()
}

fn default_color_column_header() -> String {
    "#a0d2fa".to_string() // Light Blue Gray
}

fn default_color_drag_over() -> String {
    "#a855f7".to_string() // Purple
}

fn default_color_popup_border() -> String {
    "#9ffcf8".to_string() // Light Cyan
}

fn default_color_badge_new() -> String {
    "#3b82f6".to_string()
}

fn default_color_badge_production() -> String {
    "#f97316".to_string()
}

fn default_color_badge_artwork() -> String {
    "#eab308".to_string()
}

fn default_color_badge_shipped() -> String {
    "#10b981".to_string()
}

fn default_color_badge_value() -> String {
    "#22c55e".to_string()
}

impl ThemeConfig {
    /// Parse a hex color string to RGB tuple
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// Hex color for a badge style; `None` renders with the default color
    pub fn badge_color(&self, style: BadgeStyle) -> Option<&str> {
        match style {
            BadgeStyle::New => Some(&self.color_badge_new),
            BadgeStyle::Production => Some(&self.color_badge_production),
            BadgeStyle::Artwork => Some(&self.color_badge_artwork),
            BadgeStyle::Shipped => Some(&self.color_badge_shipped),
            BadgeStyle::Unstyled => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    /// Log file path. Defaults to the platform data directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl Config {
    /// Load config from the default location. An unreadable file yields the
    /// defaults together with the error, so it can be logged once logging is up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        match Self::config_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Like `load_from`, but never fails
    pub fn load_or_default(config_path: &Path) -> (Self, Option<anyhow::Error>) {
        match Self::load_from(config_path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Load config from a file, falling back to defaults if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            toml::from_str(&content).with_context(|| format!("Failed to parse config {:?}", config_path))
        } else {
            Ok(Self::default())
        }
    }

    /// Get the path to the config file
    /// Always uses ~/.config/leadboard/ on all platforms
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("Could not determine home directory")?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("leadboard")
            .join("config.toml"))
    }

    /// Get the data directory (log files live here)
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "leadboard")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Column identities in display order. Blank and duplicate labels are
    /// dropped; an empty list falls back to the default columns.
    pub fn column_labels(&self) -> Vec<StatusLabel> {
        let mut labels: Vec<StatusLabel> = Vec::new();
        for raw in &self.columns {
            match StatusLabel::parse(raw) {
                Some(label) if !labels.contains(&label) => labels.push(label),
                Some(label) => tracing::warn!(%label, "duplicate column ignored"),
                None => {}
            }
        }
        if labels.is_empty() {
            return LeadStatus::columns().iter().copied().map(StatusLabel::from).collect();
        }
        for label in labels.iter().filter(|l| l.badge_style() == BadgeStyle::Unstyled) {
            tracing::warn!(%label, "column has no badge style, cards will render unstyled");
        }
        labels
    }

    /// Command line flags win over the file
    pub fn apply_cli(&mut self, cli: &Cli) {
        if !cli.columns.is_empty() {
            self.columns = cli.columns.clone();
        }
        if let Some(seed) = &cli.seed {
            self.seed_file = Some(seed.clone());
        }
        if let Some(level) = cli.log_level {
            self.logging.level = level;
        }
        if let Some(format) = cli.log_format {
            self.logging.format = format;
        }
        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
    }

    /// Resolved log file path
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.logging.file {
            Some(file) => Ok(file.clone()),
            None => Ok(Self::data_dir()?.join("leadboard.log")),
        }
    }
}
