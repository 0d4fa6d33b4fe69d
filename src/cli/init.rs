//! Init command - write an example pkgscore.toml

use crate::config::EXAMPLE_CONFIG;
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

/// Write the example config into `dir` unless one already exists.
/// Returns the config path and whether it was created.
pub(crate) fn write_example_config(dir: &Path) -> Result<(PathBuf, bool)> {
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join("pkgscore.toml");
    if config_path.exists() {
        return Ok((config_path, false));
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    Ok((config_path, true))
}

/// Run the init command
pub(crate) fn run(dir: &Path) -> Result<()> {
    let (config_path, created) = write_example_config(dir)?;
    if created {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Already exists: {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }
    Ok(())
}
