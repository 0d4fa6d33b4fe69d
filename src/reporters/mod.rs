//! Output reporters for pkgscore results
//!
//! Supports two output formats:
//! - `json` - The scored records, every input field preserved
//! - `text` - Terminal table with colors

mod json;
mod text;

use crate::models::{EvaluatedLibrary, ScoredLibrary, TrendedLibrary};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: json, text", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Results of one scoring run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Quality(Vec<ScoredLibrary>),
    Trending(Vec<TrendedLibrary>),
    Combined(Vec<EvaluatedLibrary>),
}

impl Report {
    pub fn len(&self) -> usize {
        match self {
            Report::Quality(v) => v.len(),
            Report::Trending(v) => v.len(),
            Report::Combined(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render a report in the specified format
pub fn render(report: &Report, format: OutputFormat, compact: bool) -> Result<String> {
    match format {
        OutputFormat::Json if compact => json::render_compact(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Text => text::render(report),
    }
}
