use leadboard::cli::Cli;
use leadboard::config::{Config, LoggingConfig, ThemeConfig};
use leadboard::leads::{BadgeStyle, StatusLabel};
use leadboard::logging::{LogFormat, LogLevel};
use std::path::PathBuf;
use tempfile::TempDir;

// === ThemeConfig Tests ===

#[test]
fn test_parse_hex_valid() {
    assert_eq!(ThemeConfig::parse_hex("#FFFFFF"), Some((255, 255, 255)));
    assert_eq!(ThemeConfig::parse_hex("#000000"), Some((0, 0, 0)));
    assert_eq!(ThemeConfig::parse_hex("#3b82f6"), Some((59, 130, 246)));
}

#[test]
fn test_parse_hex_without_hash() {
    assert_eq!(ThemeConfig::parse_hex("FFFFFF"), Some((255, 255, 255)));
}

#[test]
fn test_parse_hex_invalid() {
    assert_eq!(ThemeConfig::parse_hex("#FFF"), None); // Too short
    assert_eq!(ThemeConfig::parse_hex("#FFFFFFF"), None); // Too long
    assert_eq!(ThemeConfig::parse_hex("#GGGGGG"), None); // Invalid hex chars
    assert_eq!(ThemeConfig::parse_hex(""), None);
}

#[test]
fn test_theme_config_default() {
    let theme = ThemeConfig::default();

    // Verify all default colors are valid hex
    for color in [
        &theme.color_selected,
        &theme.color_normal,
        &theme.color_dimmed,
        &theme.color_text,
        &theme.color_accent,
        &theme.color_description,
        &theme.color_column_header,
        &theme.color_drag_over,
        &theme.color_popup_border,
        &theme.color_badge_new,
        &theme.color_badge_production,
        &theme.color_badge_artwork,
        &theme.color_badge_shipped,
        &theme.color_badge_value,
    ] {
        assert!(ThemeConfig::parse_hex(color).is_some(), "bad default color {}", color);
    }
}

#[test]
fn test_badge_color_per_style() {
    let theme = ThemeConfig::default();

    assert_eq!(theme.badge_color(BadgeStyle::New), Some(theme.color_badge_new.as_str()));
    assert_eq!(theme.badge_color(BadgeStyle::Shipped), Some(theme.color_badge_shipped.as_str()));
    assert_eq!(theme.badge_color(BadgeStyle::Unstyled), None);
}

// === Config Tests ===

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.columns, vec!["New", "Follow Up", "Prospect", "Won"]);
    assert!(config.seed_file.is_none());
    assert_eq!(config.logging.level, LogLevel::Info);
    assert_eq!(config.logging.format, LogFormat::Plaintext);
    assert!(config.logging.file.is_none());
}

#[test]
fn test_config_partial_toml_uses_defaults() {
    let config: Config = toml::from_str(
        r##"
        seed_file = "leads.toml"

        [theme]
        color_drag_over = "#ff00ff"
        "##,
    )
    .unwrap();

    assert_eq!(config.seed_file, Some(PathBuf::from("leads.toml")));
    assert_eq!(config.theme.color_drag_over, "#ff00ff");
    assert_eq!(config.theme.color_selected, ThemeConfig::default().color_selected);
    assert_eq!(config.columns.len(), 4);
}

#[test]
fn test_config_logging_section() {
    let config: Config = toml::from_str(
        r#"
        [logging]
        level = "debug"
        format = "json"
        file = "/tmp/leadboard.log"
        "#,
    )
    .unwrap();

    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/leadboard.log"));
}

#[test]
fn test_logging_config_default() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.level, LogLevel::Info);
    assert_eq!(logging.format, LogFormat::Plaintext);
}

#[test]
fn test_column_labels_known_and_custom() {
    let config = Config {
        columns: vec!["New".to_string(), " Lost ".to_string(), "Won".to_string()],
        ..Default::default()
    };

    let labels = config.column_labels();

    assert_eq!(labels.len(), 3);
    assert_eq!(labels[1], StatusLabel::Custom("Lost".to_string()));
    assert_eq!(labels[1].badge_style(), BadgeStyle::Unstyled);
    assert_eq!(labels[2].badge_style(), BadgeStyle::Shipped);
}

#[test]
fn test_column_labels_drop_blank_and_duplicates() {
    let config = Config {
        columns: vec!["New".to_string(), "".to_string(), "New".to_string(), "Won".to_string()],
        ..Default::default()
    };

    let labels: Vec<String> = config.column_labels().iter().map(|l| l.to_string()).collect();

    assert_eq!(labels, vec!["New", "Won"]);
}

#[test]
fn test_column_labels_empty_falls_back_to_defaults() {
    let config = Config {
        columns: vec!["  ".to_string()],
        ..Default::default()
    };

    assert_eq!(config.column_labels().len(), 4);
}

#[test]
fn test_apply_cli_overrides_file() {
    let mut config = Config::default();
    let cli = Cli {
        seed: Some(PathBuf::from("demo.json")),
        columns: vec!["Cold".to_string(), "Hot".to_string()],
        log_level: Some(LogLevel::Trace),
        log_file: Some(PathBuf::from("board.log")),
        ..Default::default()
    };

    config.apply_cli(&cli);

    assert_eq!(config.columns, vec!["Cold", "Hot"]);
    assert_eq!(config.seed_file, Some(PathBuf::from("demo.json")));
    assert_eq!(config.logging.level, LogLevel::Trace);
    assert_eq!(config.logging.format, LogFormat::Plaintext);
    assert_eq!(config.log_path().unwrap(), PathBuf::from("board.log"));
}

#[test]
fn test_apply_empty_cli_keeps_config() {
    let mut config = Config {
        columns: vec!["Only".to_string()],
        ..Default::default()
    };

    config.apply_cli(&Cli::default());

    assert_eq!(config.columns, vec!["Only"]);
}

// === Persistence Tests ===

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config.columns.len(), 4);
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        columns = ["New", "Lost"]

        [logging]
        format = "json"
        "#,
    )
    .unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.columns, vec!["New", "Lost"]);
    assert_eq!(loaded.logging.format, LogFormat::Json);
}

#[test]
fn test_load_or_default_reports_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "columns = \"not a list\"").unwrap();

    let (config, err) = Config::load_or_default(&path);

    assert_eq!(config.columns, Config::default().columns);
    let err = err.expect("malformed config should be reported");
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to parse config"));
    assert!(message.contains("config.toml"));
}

#[test]
fn test_load_or_default_missing_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    let (config, err) = Config::load_or_default(&dir.path().join("nope.toml"));

    assert!(err.is_none());
    assert_eq!(config.columns.len(), 4);
}

#[test]
fn test_load_invalid_toml_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "columns = [").unwrap();

    assert!(Config::load_from(&path).is_err());
}
