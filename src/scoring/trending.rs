//! Trending popularity scorer
//!
//! Open-ended signal built from a single downloads reading, adjusted by
//! penalties for low downloads, few stars, an unmaintained flag and a very
//! young package, plus one download bonus.

use super::round_half_up;
use crate::models::{Library, TrendedLibrary};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Popularity reported for records without any downloads
pub const NO_DOWNLOADS_POPULARITY: f64 = -100.0;

const LOW_DOWNLOADS: u64 = 500;
const LOW_DOWNLOADS_PENALTY: f64 = 0.25;

const LOW_STARS: u64 = 25;
const LOW_STARS_PENALTY: f64 = 0.1;

const UNMAINTAINED_PENALTY: f64 = 0.5;

/// One week in milliseconds
const FRESH_PACKAGE_AGE_MS: i64 = 604_800_000;
const FRESH_PACKAGE_PENALTY: f64 = 0.5;

const BONUS_MIN_GAIN: f64 = 0.25;
const BONUS_MIN_DOWNLOADS: u64 = 5_000;
const DOWNLOAD_BONUS: f64 = 5.0;

/// Every term of the popularity formula
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendBreakdown {
    /// Record had no download figure (or zero); popularity is the sentinel
    pub no_downloads: bool,
    pub downloads: u64,
    pub popularity_gain: f64,
    pub downloads_penalty: f64,
    pub stars_penalty: f64,
    pub unmaintained_penalty: f64,
    pub fresh_package_penalty: f64,
    pub download_bonus: f64,
    /// Sum of all terms before rounding
    pub unrounded: f64,
    /// Final value, three decimal places
    pub popularity: f64,
}

/// Trending popularity scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendingScorer;

impl TrendingScorer {
    pub fn new() -> Self {
        Self
    }

    /// Return the record with its `popularity`
    pub fn trend(&self, library: &Library, now: DateTime<Utc>) -> TrendedLibrary {
        TrendedLibrary::new(library, self.breakdown(library, now).popularity)
    }

    /// Calculate popularity with every intermediate term
    pub fn breakdown(&self, library: &Library, now: DateTime<Utc>) -> TrendBreakdown {
        let downloads = match library.downloads() {
            Some(d) if d > 0 => d,
            _ => {
                debug!("No downloads for {}, popularity pinned", library.display_name());
                return TrendBreakdown {
                    no_downloads: true,
                    unrounded: NO_DOWNLOADS_POPULARITY,
                    popularity: NO_DOWNLOADS_POPULARITY,
                    ..Default::default()
                };
            }
        };
        let stats = library.stats();

        let popularity_gain = popularity_gain(downloads);
        let downloads_penalty = if downloads < LOW_DOWNLOADS {
            LOW_DOWNLOADS_PENALTY
        } else {
            0.0
        };
        let stars_penalty = if stats.stars < LOW_STARS {
            LOW_STARS_PENALTY
        } else {
            0.0
        };
        let unmaintained_penalty = if library.unmaintained {
            UNMAINTAINED_PENALTY
        } else {
            0.0
        };
        let age_ms = (now - stats.created_at).num_milliseconds();
        let fresh_package_penalty = if age_ms < FRESH_PACKAGE_AGE_MS {
            FRESH_PACKAGE_PENALTY
        } else {
            0.0
        };
        let download_bonus = download_bonus(popularity_gain, downloads);

        let unrounded = popularity_gain
            - downloads_penalty
            - unmaintained_penalty
            - stars_penalty
            - fresh_package_penalty
            + download_bonus;
        let popularity = round3(unrounded);

        debug!(
            "Popularity for {}: gain={:.4} penalties=({}, {}, {}, {}) bonus={} → {}",
            library.display_name(),
            popularity_gain,
            downloads_penalty,
            stars_penalty,
            unmaintained_penalty,
            fresh_package_penalty,
            download_bonus,
            popularity
        );

        TrendBreakdown {
            no_downloads: false,
            downloads,
            popularity_gain,
            downloads_penalty,
            stars_penalty,
            unmaintained_penalty,
            fresh_package_penalty,
            download_bonus,
            unrounded,
            popularity,
        }
    }

    /// Generate human-readable explanation of the popularity value
    pub fn explain(&self, breakdown: &TrendBreakdown) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## Trending Popularity: {}\n", breakdown.popularity));

        if breakdown.no_downloads {
            lines.push("- No download data, popularity fixed at -100\n".to_string());
            return lines.join("\n");
        }

        lines.push(format!("- **Downloads**: {}", breakdown.downloads));
        lines.push(format!("- **Gain**: {:.4}", breakdown.popularity_gain));

        let terms = [
            ("Low downloads", -breakdown.downloads_penalty),
            ("Few stars", -breakdown.stars_penalty),
            ("Unmaintained", -breakdown.unmaintained_penalty),
            ("Fresh package", -breakdown.fresh_package_penalty),
            ("Download bonus", breakdown.download_bonus),
        ];
        for (name, value) in terms.iter().filter(|(_, v)| *v != 0.0) {
            lines.push(format!("  - {}: {:+}", name, value));
        }
        lines.push(String::new());

        lines.join("\n")
    }
}

/// `(⌊d/4⌋ - ⌊d/4.5⌋) / d`: a velocity stand-in from a single reading
fn popularity_gain(downloads: u64) -> f64 {
    let d = downloads as f64;
    ((d / 4.0).floor() - (d / 4.5).floor()) / d
}

fn download_bonus(popularity_gain: f64, downloads: u64) -> f64 {
    if popularity_gain > BONUS_MIN_GAIN && downloads > BONUS_MIN_DOWNLOADS {
        DOWNLOAD_BONUS
    } else {
        0.0
    }
}

/// Round half-up to three decimal places
fn round3(value: f64) -> f64 {
    round_half_up(value * 1000.0) / 1000.0
}
