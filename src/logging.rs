use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Sends `tracing` output to `log_file` (appending).
///
/// `RUST_LOG` overrides `level` when set. Calling this more than once keeps
/// the first subscriber.
pub fn init(log_file: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact();

    let _ = subscriber.try_init();
    Ok(())
}
