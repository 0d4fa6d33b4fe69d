//! `evaluate`, `score` and `trend` commands

use super::RunContext;
use crate::input::load_libraries;
use crate::reporters::{self, Report};
use crate::scoring::{evaluate_all, score_all, trend_all};
use anyhow::{Context, Result};

/// Which scorer(s) to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Quality,
    Trending,
    Combined,
}

/// Score every input record and emit the report
pub(crate) fn run(ctx: &RunContext, mode: Mode) -> Result<()> {
    let libraries =
        load_libraries(ctx.input.as_deref()).context("Failed to load library records")?;

    let report = match mode {
        Mode::Quality => Report::Quality(score_all(&libraries, &ctx.config.scoring, ctx.now)),
        Mode::Trending => Report::Trending(trend_all(&libraries, ctx.now)),
        Mode::Combined => {
            Report::Combined(evaluate_all(&libraries, &ctx.config.scoring, ctx.now))
        }
    };

    let rendered = reporters::render(&report, ctx.format, ctx.compact)?;
    ctx.emit(&rendered)
}
