//! `modifiers` command - show the quality-score modifier table

use super::RunContext;
use crate::reporters::OutputFormat;
use crate::scoring::{QualityScorer, ScoreBounds};
use anyhow::Result;
use console::style;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ModifierRow {
    name: &'static str,
    value: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModifierTable {
    modifiers: Vec<ModifierRow>,
    min_possible_score: i32,
    max_possible_score: i32,
}

fn table(scorer: &QualityScorer) -> ModifierTable {
    let ScoreBounds { min, max } = scorer.bounds();
    ModifierTable {
        modifiers: scorer
            .modifiers()
            .iter()
            .map(|m| ModifierRow {
                name: m.name,
                value: m.value,
            })
            .collect(),
        min_possible_score: min,
        max_possible_score: max,
    }
}

fn render_text(table: &ModifierTable) -> String {
    let mut out = format!("\n{}\n", style("Quality score modifiers").bold());
    for row in &table.modifiers {
        let value = format!("{:+4}", row.value);
        let value = if row.value > 0 {
            style(value).green()
        } else {
            style(value).red()
        };
        out.push_str(&format!("  {}  {}\n", value, row.name));
    }
    out.push_str(&format!(
        "\n  {}\n",
        style(format!(
            "raw range {}..{} rescaled to 0-100",
            table.min_possible_score, table.max_possible_score
        ))
        .dim()
    ));
    out
}

pub(crate) fn run(ctx: &RunContext) -> Result<()> {
    let table = table(&QualityScorer::new(&ctx.config.scoring));
    let rendered = match ctx.format {
        OutputFormat::Json if ctx.compact => serde_json::to_string(&table)?,
        OutputFormat::Json => serde_json::to_string_pretty(&table)?,
        OutputFormat::Text => render_text(&table),
    };
    ctx.emit(&rendered)
}
