//! Text (terminal) reporter with colors and formatting

use super::Report;
use anyhow::Result;
use console::style;

const NAME_WIDTH: usize = 40;

/// Color a quality score by band
fn format_score(score: i32) -> String {
    let text = format!("{:>5}", score);
    match score {
        s if s >= 80 => style(text).green().to_string(),
        s if s >= 60 => style(text).yellow().to_string(),
        _ => style(text).red().to_string(),
    }
}

fn format_popularity(popularity: f64) -> String {
    let text = format!("{:>10.3}", popularity);
    if popularity < 0.0 {
        style(text).dim().to_string()
    } else {
        style(text).cyan().to_string()
    }
}

/// Truncate on char boundaries
fn truncate(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let head: String = name.chars().take(NAME_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Render report as formatted terminal output
pub fn render(report: &Report) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} ({} libraries)\n",
        style("pkgscore").bold(),
        report.len()
    ));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));

    if report.is_empty() {
        out.push_str("No libraries to score.\n");
        return Ok(out);
    }

    match report {
        Report::Quality(entries) => {
            out.push_str(&header(&["SCORE"]));
            for e in entries {
                out.push_str(&format!(
                    "  {:<width$} {}  {}\n",
                    truncate(e.library.display_name()),
                    format_score(e.score),
                    modifiers_cell(&e.matching_score_modifiers),
                    width = NAME_WIDTH
                ));
            }
        }
        Report::Trending(entries) => {
            out.push_str(&header(&["POPULARITY"]));
            for e in entries {
                out.push_str(&format!(
                    "  {:<width$} {}\n",
                    truncate(e.library.display_name()),
                    format_popularity(e.popularity),
                    width = NAME_WIDTH
                ));
            }
        }
        Report::Combined(entries) => {
            out.push_str(&header(&["SCORE", "POPULARITY"]));
            for e in entries {
                out.push_str(&format!(
                    "  {:<width$} {} {}  {}\n",
                    truncate(e.library.display_name()),
                    format_score(e.score),
                    format_popularity(e.popularity),
                    modifiers_cell(&e.matching_score_modifiers),
                    width = NAME_WIDTH
                ));
            }
        }
    }

    out.push('\n');
    Ok(out)
}

fn header(columns: &[&str]) -> String {
    let mut line = format!("  {:<width$}", "LIBRARY", width = NAME_WIDTH);
    for column in columns {
        match *column {
            "SCORE" => line.push_str(&format!(" {:>5}", column)),
            _ => line.push_str(&format!(" {:>10}", column)),
        }
    }
    if columns.contains(&"SCORE") {
        line.push_str("  MODIFIERS");
    }
    format!("{}\n", style(line).dim())
}

fn modifiers_cell(names: &[String]) -> String {
    if names.is_empty() {
        style("-").dim().to_string()
    } else {
        names.join(", ")
    }
}
