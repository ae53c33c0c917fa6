use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::time, layer::SubscriberExt, util::SubscriberInitExt};

/// Sends tracing output to `path`. `RUST_LOG` overrides the default level.
///
/// The game owns the terminal, so there is no stderr fallback: without a
/// log file no subscriber is installed and events are dropped.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(time::uptime())
                .with_writer(Mutex::new(file)),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()
                .context("Invalid RUST_LOG filter")?,
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
