//! `explain` command - per-record breakdown of both scores

use super::RunContext;
use crate::input::load_libraries;
use crate::models::Library;
use crate::scoring::{QualityScorer, TrendingScorer};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Markdown explanation for a single record
pub(crate) fn explain_library(
    library: &Library,
    quality: &QualityScorer,
    trending: &TrendingScorer,
    now: DateTime<Utc>,
) -> String {
    let mut out = format!("# {}\n\n", library.display_name());
    out.push_str(&quality.explain(&quality.breakdown(library, now)));
    out.push('\n');
    out.push_str(&trending.explain(&trending.breakdown(library, now)));
    out
}

pub(crate) fn run(ctx: &RunContext) -> Result<()> {
    let libraries =
        load_libraries(ctx.input.as_deref()).context("Failed to load library records")?;

    let quality = QualityScorer::new(&ctx.config.scoring);
    let trending = TrendingScorer::new();

    let sections: Vec<String> = libraries
        .iter()
        .map(|library| explain_library(library, &quality, &trending, ctx.now))
        .collect();

    ctx.emit(&sections.join("\n---\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::{library, now};

    #[test]
    fn test_explain_library_has_both_sections() {
        let text = explain_library(
            &library(),
            &QualityScorer::default(),
            &TrendingScorer::new(),
            now(),
        );
        assert!(text.starts_with("# example-lib"));
        assert!(text.contains("## Quality Score: 46/100"));
        assert!(text.contains("## Trending Popularity: 0.028"));
    }
}
