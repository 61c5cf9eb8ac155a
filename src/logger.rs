use anyhow::{Context, Result};
use std::time::SystemTime;

use fern::Dispatch;

use crate::config::LogConfig;

/// Installs the global logger. Output goes to the configured file, or to
/// stderr so command output on stdout stays clean.
pub fn initialize(config: &LogConfig) -> Result<()> {
    let level = config.level_filter()?;

    let dispatch = Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        });

    let dispatch = match &config.file {
        Some(path) => {
            let file = fern::log_file(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            dispatch.chain(file)
        }
        None => dispatch.chain(std::io::stderr()),
    };

    dispatch.apply().context("Failed to initialize logger")?;
    log::debug!("Logger initialized: level={level:?}");
    Ok(())
}
