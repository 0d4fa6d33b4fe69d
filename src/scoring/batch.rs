//! Parallel scoring over a collection of records
//!
//! Every record is scored independently against the same injected instant,
//! so results are stable no matter how rayon splits the work. Output order
//! always matches input order.

use super::{QualityScorer, TrendingScorer};
use crate::config::ScoringConfig;
use crate::models::{EvaluatedLibrary, Library, ScoredLibrary, TrendedLibrary};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::info;

/// Apply both scorers to every record
pub fn evaluate_all(
    libraries: &[Library],
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> Vec<EvaluatedLibrary> {
    let quality = QualityScorer::new(config);
    let trending = TrendingScorer::new();

    let evaluated: Vec<EvaluatedLibrary> = libraries
        .par_iter()
        .map(|library| {
            let q = quality.breakdown(library, now);
            let t = trending.breakdown(library, now);
            EvaluatedLibrary::new(library, q.score, q.matched_names(), t.popularity)
        })
        .collect();

    info!("Evaluated {} libraries", evaluated.len());
    evaluated
}

/// Quality-score every record
pub fn score_all(
    libraries: &[Library],
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> Vec<ScoredLibrary> {
    let quality = QualityScorer::new(config);
    let scored: Vec<ScoredLibrary> = libraries
        .par_iter()
        .map(|library| quality.score(library, now))
        .collect();

    info!("Scored {} libraries", scored.len());
    scored
}

/// Trending popularity for every record
pub fn trend_all(libraries: &[Library], now: DateTime<Utc>) -> Vec<TrendedLibrary> {
    let trending = TrendingScorer::new();
    let trended: Vec<TrendedLibrary> = libraries
        .par_iter()
        .map(|library| trending.trend(library, now))
        .collect();

    info!("Computed popularity for {} libraries", trended.len());
    trended
}
