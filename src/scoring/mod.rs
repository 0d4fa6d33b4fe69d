//! Package Scoring System
//!
//! Two independent, side-effect-free scorers over the same [`Library`]
//! record. Neither reads the other's output.
//!
//! # Quality Score (0-100)
//!
//! ```text
//! raw   = Σ value of every modifier whose condition holds
//! score = round((raw - min) / (max - min) × 100)
//!
//! min = Σ negative weights = -85
//! max = Σ positive weights = 100
//! ```
//!
//! | Modifier                        | Value | Condition                           |
//! |---------------------------------|-------|-------------------------------------|
//! | Very popular                    | +45   | combined popularity > 50000         |
//! | Popular                         | +30   | combined popularity > 10000         |
//! | Known                           | +15   | combined popularity > 2500          |
//! | Lots of open issues             | -20   | issues >= 75                        |
//! | No license                      | -20   | license is `null`                   |
//! | GPL license                     | -20   | license key starts `gpl` / `other`  |
//! | Recently updated                | +10   | updated <= 30 days ago              |
//! | Not updated recently            | -20   | updated >= 180 days ago             |
//! | Not supporting New Architecture | -5    | either New Architecture flag false  |
//!
//! Combined popularity = subscribers × 50 + forks × 25 + stars × 10 + downloads / 100
//!
//! # Trending Popularity (unbounded)
//!
//! ```text
//! no downloads → -100
//!
//! gain       = (⌊d / 4⌋ - ⌊d / 4.5⌋) / d
//! popularity = round3(gain - 0.25·[d < 500] - 0.5·[unmaintained]
//!                          - 0.1·[stars < 25] - 0.5·[created < 1 week ago]
//!                          + 5·[gain > 0.25 ∧ d > 5000])
//! ```
//!
//! The gain term is a single-reading stand-in for download velocity; it is
//! kept exactly as the directory computes it.

pub mod batch;
pub mod modifiers;
mod quality;
mod trending;

pub use batch::{evaluate_all, score_all, trend_all};
pub use modifiers::{combined_popularity, days_since_update, Modifier, ScoreBounds, MODIFIERS};
pub use quality::{rescale, QualityBreakdown, QualityScorer};
pub use trending::{TrendBreakdown, TrendingScorer, NO_DOWNLOADS_POPULARITY};

use crate::config::ScoringConfig;
use crate::models::{Library, ScoredLibrary, TrendedLibrary};
use chrono::{DateTime, Utc};

/// Round half toward positive infinity
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Quality-score a record against the current time
pub fn score(library: &Library) -> ScoredLibrary {
    score_at(library, Utc::now())
}

/// Quality-score a record against an injected "now"
pub fn score_at(library: &Library, now: DateTime<Utc>) -> ScoredLibrary {
    QualityScorer::new(&ScoringConfig::default()).score(library, now)
}

/// Trending popularity of a record against the current time
pub fn trend(library: &Library) -> TrendedLibrary {
    trend_at(library, Utc::now())
}

/// Trending popularity of a record against an injected "now"
pub fn trend_at(library: &Library, now: DateTime<Utc>) -> TrendedLibrary {
    TrendingScorer::new().trend(library, now)
}
