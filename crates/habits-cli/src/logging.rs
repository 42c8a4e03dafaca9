use std::{fs::File, path::Path};

use anyhow::Context;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs the global logger.
///
/// The default level is `info` and `RUST_LOG` overrides it. With a log file every
/// record goes there. Without one, an interactive session keeps only warnings
/// and errors so that stderr output does not tear the terminal UI.
pub fn init(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None if interactive => {
            builder.filter_level(LevelFilter::Warn);
        }
        None => {}
    }
    builder
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}
