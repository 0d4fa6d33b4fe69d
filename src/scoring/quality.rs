//! Modifier-based quality scorer
//!
//! Sums the weights of the modifiers that fire and rescales the raw sum
//! linearly so the theoretical worst case maps to 0 and the best to 100.

use super::modifiers::{combined_popularity, days_since_update, Modifier, ScoreBounds, MODIFIERS};
use super::round_half_up;
use crate::config::ScoringConfig;
use crate::models::{Library, ScoredLibrary};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Complete score breakdown for transparency
#[derive(Debug, Clone, PartialEq)]
pub struct QualityBreakdown {
    /// Sum of matching modifier values
    pub raw_score: i32,
    /// Theoretical raw-score range used for rescaling
    pub bounds: ScoreBounds,
    /// Rescaled value before rounding
    pub normalized: f64,
    /// Final integer score
    pub score: i32,
    /// Whether the final score was pulled back into 0-100
    pub clamped: bool,
    /// Matching modifiers (name, value) in table order
    pub matched: Vec<(&'static str, i32)>,
    /// Combined popularity metric, if downloads were reported
    pub combined_popularity: Option<f64>,
    /// Days since the last repository update
    pub days_since_update: f64,
}

impl QualityBreakdown {
    pub fn matched_names(&self) -> Vec<String> {
        self.matched.iter().map(|(name, _)| name.to_string()).collect()
    }
}

/// Linear rescale of a raw score onto 0-100 (unrounded, unclamped)
pub fn rescale(raw_score: i32, bounds: ScoreBounds) -> f64 {
    (raw_score - bounds.min) as f64 / bounds.span() as f64 * 100.0
}

/// Modifier-table quality scorer
#[derive(Debug, Clone)]
pub struct QualityScorer {
    modifiers: &'static [Modifier],
    bounds: ScoreBounds,
    clamp: bool,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl QualityScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            modifiers: &MODIFIERS,
            bounds: ScoreBounds::shipped(),
            clamp: config.clamp_score,
        }
    }

    pub fn modifiers(&self) -> &'static [Modifier] {
        self.modifiers
    }

    pub fn bounds(&self) -> ScoreBounds {
        self.bounds
    }

    /// Score a record and return it with `score` and `matchingScoreModifiers`
    pub fn score(&self, library: &Library, now: DateTime<Utc>) -> ScoredLibrary {
        let breakdown = self.breakdown(library, now);
        ScoredLibrary::new(library, breakdown.score, breakdown.matched_names())
    }

    /// Calculate the score with its full breakdown
    pub fn breakdown(&self, library: &Library, now: DateTime<Utc>) -> QualityBreakdown {
        let matched: Vec<(&'static str, i32)> = self
            .modifiers
            .iter()
            .filter(|m| m.matches(library, now))
            .map(|m| (m.name, m.value))
            .collect();

        let raw_score: i32 = matched.iter().map(|(_, value)| value).sum();
        let normalized = rescale(raw_score, self.bounds);
        let (score, clamped) = self.finalize(normalized);

        debug!(
            "Quality score for {}: raw={} normalized={:.2} score={} matched={:?}",
            library.display_name(),
            raw_score,
            normalized,
            score,
            matched
        );

        QualityBreakdown {
            raw_score,
            bounds: self.bounds,
            normalized,
            score,
            clamped,
            matched,
            combined_popularity: combined_popularity(library),
            days_since_update: days_since_update(library, now),
        }
    }

    /// Round, and clamp into 0-100 when configured to
    fn finalize(&self, normalized: f64) -> (i32, bool) {
        let rounded = round_half_up(normalized) as i32;
        if (0..=100).contains(&rounded) {
            return (rounded, false);
        }

        warn!(
            "Quality score {} outside 0-100 (raw bounds {}..{})",
            rounded, self.bounds.min, self.bounds.max
        );
        if self.clamp {
            (rounded.clamp(0, 100), true)
        } else {
            (rounded, false)
        }
    }

    /// Generate human-readable explanation of the score
    pub fn explain(&self, breakdown: &QualityBreakdown) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## Quality Score: {}/100\n", breakdown.score));

        lines.push("```".to_string());
        lines.push(format!(
            "score = round(({} - ({})) / ({} - ({})) × 100) = round({:.2})",
            breakdown.raw_score,
            breakdown.bounds.min,
            breakdown.bounds.max,
            breakdown.bounds.min,
            breakdown.normalized
        ));
        lines.push("```\n".to_string());

        match breakdown.combined_popularity {
            Some(p) => lines.push(format!("- **Combined popularity**: {:.1}", p)),
            None => lines.push("- **Combined popularity**: n/a (no download data)".to_string()),
        }
        lines.push(format!(
            "- **Last updated**: {:.1} days ago",
            breakdown.days_since_update
        ));
        if breakdown.clamped {
            lines.push("- **Clamped** into 0-100".to_string());
        }

        if breakdown.matched.is_empty() {
            lines.push("- No modifiers matched\n".to_string());
        } else {
            lines.push("- Modifiers:".to_string());
            for (name, value) in &breakdown.matched {
                lines.push(format!("  - {}: {:+}", name, value));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
