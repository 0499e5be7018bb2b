use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr so stdout stays clean for normalized chunks.
pub fn init_logging(log_level: Level, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level_filter = LevelFilter::from_level(log_level);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(level_filter);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(level_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

/// trace, debug, info, warn, error
pub fn parse_level(value: &str) -> Level {
    Level::from_str(value).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using WARN level.", value);
        Level::WARN
    })
}
