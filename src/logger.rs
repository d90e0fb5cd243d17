use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::enums::LogLevel;

/// Installs the process-wide logger. Logs go to stderr unless `log_file` is
/// set; stdout carries only the SARIF document. `RUST_LOG` overrides `level`.
pub fn init_logger(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let filter = LevelFilter::from(level).to_string().to_lowercase();
    let mut builder = Builder::from_env(Env::default().default_filter_or(filter));

    match level {
        LogLevel::Debug => builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {} - {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        }),
        LogLevel::Info => builder.format(|buf, record| writeln!(buf, "{}", record.args())),
    };

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}
