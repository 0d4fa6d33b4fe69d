//! Project-level configuration support
//!
//! Loads configuration from `pkgscore.toml` or `.pkgscorerc.json` in the
//! working directory, or from an explicit file.
//!
//! # Configuration Format
//!
//! ```toml
//! # pkgscore.toml
//!
//! [scoring]
//! clamp_score = false  # Pull out-of-range quality scores back into 0-100
//!
//! [defaults]
//! format = "json"      # json or text
//! compact = false      # Single-line JSON
//! ```
//!
//! The modifier table is not configurable.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["pkgscore.toml", ".pkgscorerc.json"];

/// Project-level configuration loaded from pkgscore.toml or similar
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// Scoring configuration
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Scoring configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ScoringConfig {
    /// Clamp quality scores into 0-100 (default: false, scores are reported as computed)
    #[serde(default)]
    pub clamp_score: bool,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CliDefaults {
    /// Default output format (json, text)
    #[serde(default)]
    pub format: Option<String>,

    /// Emit single-line JSON by default
    #[serde(default)]
    pub compact: Option<bool>,
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `pkgscore.toml`
/// 2. `.pkgscorerc.json`
///
/// Returns default configuration if no config file is found or the file
/// found cannot be parsed.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from an explicit file; the format follows the extension
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

/// Example configuration written by `pkgscore init`
pub const EXAMPLE_CONFIG: &str = r#"# pkgscore configuration

[scoring]
# Pull quality scores that fall outside 0-100 back into range.
# The shipped modifier table never produces such scores.
# clamp_score = false

[defaults]
# Output format: json or text
# format = "json"

# Single-line JSON output
# compact = false
"#;
