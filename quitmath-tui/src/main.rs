//! quitmath - terminal companion for quitting smoking and vaping
//!
//! Log cravings, ride them out with short distraction tasks, close each day
//! and watch the abstinent streak and eco impact grow.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use libquitmath::logging::{LogFormat, LoggingConfig};
use libquitmath::service::events::channel;
use libquitmath::{Config, QuitMathService};
use quitmath_tui::{
    app::{event::EventHandler, reduce, Action, AppState, UiConfig},
    error::Result,
    screens::route_table,
    services::{settle, ServiceHandle},
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "quitmath")]
#[command(about = "Terminal companion for quitting smoking and vaping", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $QUITMATH_CONFIG, then <config dir>/quitmath/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file (defaults to <data dir>/quitmath/quitmath.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log format (text, json or pretty)
    #[arg(long, env = "QUITMATH_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Minimum log level (error, warn, info, debug, trace)
    #[arg(long, env = "QUITMATH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Event poll interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with(cli.config.as_deref()).context("loading configuration")?;

    // Logs go to a file; stderr belongs to the terminal UI
    let log_file = match cli.log_file.clone() {
        Some(path) => path,
        None => config.log_path()?,
    };
    let format = match cli.log_format {
        Some(format) => format,
        None => config
            .logging
            .format
            .parse()
            .map_err(anyhow::Error::msg)?,
    };
    let level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    LoggingConfig::new(format, level, false)
        .with_file(&log_file)
        .init()
        .with_context(|| format!("opening log file {}", log_file.display()))?;

    let mut ui_config = UiConfig::from_config(&config);
    if let Some(ms) = cli.tick_ms {
        ui_config.tick_rate_ms = ms;
    }

    tracing::info!(tick_ms = ui_config.tick_rate_ms, "starting");

    // Install panic hook to restore terminal on panic
    install_panic_hook();

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &config, ui_config);
    restore_terminal(terminal)?;

    result?;
    tracing::info!("exiting");
    Ok(())
}

fn run_app(terminal: &mut Tui, config: &Config, ui_config: UiConfig) -> Result<()> {
    let routes = route_table()?;
    let mut state = AppState::new(&routes, ui_config).with_model_config(config);

    let (tx, rx) = channel();
    let mut services = ServiceHandle::new(QuitMathService::from_config(config), tx);

    let events = EventHandler::new(state.config.tick_rate_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, &state, &routes))?;

        let action: Action = events.next()?.into();
        state = reduce(state, action);

        // Collaborator work raised by this event, then its results
        state = settle(state, &mut services, &rx);

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
