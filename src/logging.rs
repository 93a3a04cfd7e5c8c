use crate::models::AppSettings;
use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log files are named `mystere.<date>` inside the log directory
pub const LOG_FILE_PREFIX: &str = "mystere";

/// Level filter: `RUST_LOG` wins, otherwise `debug` or `info`.
pub fn env_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug_mode { "debug" } else { "info" }))
}

fn create_log_dir(log_dir: &Utf8Path) -> Result<()> {
    if !log_dir.is_dir() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

/// Install the global subscriber described by `settings`.
///
/// Everything goes to a daily rotating file in `settings.log_dir`. With
/// `console_logging` the same events are mirrored to stderr, leaving stdout
/// to the game.
///
/// # Returns
/// The file writer guard; drop it only when the program exits or buffered
/// lines are lost
pub fn setup_logging(settings: &AppSettings) -> Result<WorkerGuard> {
    let log_dir = Utf8Path::new(&settings.log_dir);
    create_log_dir(log_dir)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let console_layer = settings.console_logging.then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(settings.debug_mode))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!(
        log_dir = %log_dir,
        debug = settings.debug_mode,
        console = settings.console_logging,
        "Logging initialized"
    );

    Ok(guard)
}
