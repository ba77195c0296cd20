use anyhow::Result;
use clap::Parser;
use leadboard::{cli::Cli, config::Config, leads::seed, logging, tui};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicit --config must be readable; the default location may be broken
    let (mut config, config_error) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => Config::load(),
    };
    config.apply_cli(&cli);

    let _log_guard = logging::init(config.logging.level, config.logging.format, &config.log_path()?)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "leadboard starting");
    if let Some(err) = config_error {
        tracing::warn!(error = %format!("{:#}", err), "config unreadable, using defaults");
    }

    let leads = match &config.seed_file {
        Some(path) => seed::load(path)?,
        None => seed::demo_leads(),
    };

    // Initialize and run the app
    let mut app = tui::App::new(config, leads)?;
    app.run()?;

    tracing::info!("leadboard exiting");
    Ok(())
}
