//! Configuration module for pkgscore
//!
//! This module handles:
//! - Project-level configuration (pkgscore.toml / .pkgscorerc.json)
//! - Scoring options (clamping)
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, ProjectConfig, ScoringConfig,
    CONFIG_FILE_NAMES, EXAMPLE_CONFIG,
};
