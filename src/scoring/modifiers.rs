//! The fixed quality-score modifier table
//!
//! Each modifier pairs a predicate over a [`Library`] with a signed weight.
//! The table is closed: nine entries, evaluated in declaration order, every
//! one checked independently (no `else` chains between tiers).

use crate::models::Library;
use chrono::{DateTime, Utc};
use std::sync::OnceLock;

/// Milliseconds in a day, used for the days-since-update metric
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Combined popularity thresholds for the three popularity tiers
pub const VERY_POPULAR_THRESHOLD: f64 = 50_000.0;
pub const POPULAR_THRESHOLD: f64 = 10_000.0;
pub const KNOWN_THRESHOLD: f64 = 2_500.0;

const LOTS_OF_ISSUES: u64 = 75;
const RECENT_UPDATE_DAYS: f64 = 30.0;
const STALE_UPDATE_DAYS: f64 = 180.0;

/// A named scoring rule
#[derive(Clone, Copy)]
pub struct Modifier {
    /// Unique, human-readable name (reported in `matchingScoreModifiers`)
    pub name: &'static str,
    /// Signed contribution to the raw score
    pub value: i32,
    /// Whether the rule applies to a record at the given instant
    pub condition: fn(&Library, DateTime<Utc>) -> bool,
}

impl Modifier {
    /// Evaluate the condition against a record at `now`
    pub fn matches(&self, library: &Library, now: DateTime<Utc>) -> bool {
        (self.condition)(library, now)
    }
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

/// The shipped modifier table, in reporting order
pub static MODIFIERS: [Modifier; 9] = [
    Modifier {
        name: "Very popular",
        value: 45,
        condition: very_popular,
    },
    Modifier {
        name: "Popular",
        value: 30,
        condition: popular,
    },
    Modifier {
        name: "Known",
        value: 15,
        condition: known,
    },
    Modifier {
        name: "Lots of open issues",
        value: -20,
        condition: lots_of_open_issues,
    },
    Modifier {
        name: "No license",
        value: -20,
        condition: no_license,
    },
    Modifier {
        name: "GPL license",
        value: -20,
        condition: restrictive_license,
    },
    Modifier {
        name: "Recently updated",
        value: 10,
        condition: recently_updated,
    },
    Modifier {
        name: "Not updated recently",
        value: -20,
        condition: not_updated_recently,
    },
    Modifier {
        name: "Not supporting New Architecture",
        value: -5,
        condition: lacks_new_architecture,
    },
];

fn very_popular(library: &Library, _now: DateTime<Utc>) -> bool {
    exceeds_popularity(library, VERY_POPULAR_THRESHOLD)
}

fn popular(library: &Library, _now: DateTime<Utc>) -> bool {
    exceeds_popularity(library, POPULAR_THRESHOLD)
}

fn known(library: &Library, _now: DateTime<Utc>) -> bool {
    exceeds_popularity(library, KNOWN_THRESHOLD)
}

fn lots_of_open_issues(library: &Library, _now: DateTime<Utc>) -> bool {
    library.stats().issues >= LOTS_OF_ISSUES
}

/// Explicit `null` only; an absent license field does not count
fn no_license(library: &Library, _now: DateTime<Utc>) -> bool {
    matches!(library.license, Some(None))
}

/// License key starting with `gpl` or `other`
fn restrictive_license(library: &Library, _now: DateTime<Utc>) -> bool {
    library
        .license
        .as_ref()
        .and_then(|license| license.as_ref())
        .and_then(|license| license.key.as_deref())
        .is_some_and(|key| key.starts_with("gpl") || key.starts_with("other"))
}

fn recently_updated(library: &Library, now: DateTime<Utc>) -> bool {
    days_since_update(library, now) <= RECENT_UPDATE_DAYS
}

fn not_updated_recently(library: &Library, now: DateTime<Utc>) -> bool {
    days_since_update(library, now) >= STALE_UPDATE_DAYS
}

/// Supported only when both the record and the repository say so
fn lacks_new_architecture(library: &Library, _now: DateTime<Utc>) -> bool {
    !(library.new_architecture && library.github.new_architecture)
}

/// Weighted sum of subscribers, forks, stars and downloads.
///
/// `None` when the registry data or its `downloads` field is absent; no
/// popularity tier can fire for such a record. An explicit `null` download
/// count contributes zero.
pub fn combined_popularity(library: &Library) -> Option<f64> {
    let downloads = library.npm.as_ref()?.downloads?.unwrap_or(0);
    let stats = library.stats();
    Some(
        stats.subscribers as f64 * 50.0
            + stats.forks as f64 * 25.0
            + stats.stars as f64 * 10.0
            + downloads as f64 / 100.0,
    )
}

fn exceeds_popularity(library: &Library, threshold: f64) -> bool {
    combined_popularity(library).is_some_and(|p| p > threshold)
}

/// Fractional days between the last repository update and `now`
pub fn days_since_update(library: &Library, now: DateTime<Utc>) -> f64 {
    (now - library.stats().updated_at).num_milliseconds() as f64 / MS_PER_DAY
}

/// Theoretical range of the raw score for a modifier table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBounds {
    /// Sum of all negative weights
    pub min: i32,
    /// Sum of all positive weights
    pub max: i32,
}

impl ScoreBounds {
    pub fn from_modifiers(modifiers: &[Modifier]) -> Self {
        let min = modifiers.iter().map(|m| m.value).filter(|v| *v < 0).sum();
        let max = modifiers.iter().map(|m| m.value).filter(|v| *v > 0).sum();
        Self { min, max }
    }

    /// Bounds of [`MODIFIERS`], computed once per process
    pub fn shipped() -> Self {
        static BOUNDS: OnceLock<ScoreBounds> = OnceLock::new();
        *BOUNDS.get_or_init(|| ScoreBounds::from_modifiers(&MODIFIERS))
    }

    /// Width of the raw range, the rescaling denominator
    pub fn span(&self) -> i32 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::{library, now};
    use chrono::Duration;
    use std::collections::HashSet;

    fn fired(lib: &Library) -> Vec<&'static str> {
        MODIFIERS
            .iter()
            .filter(|m| m.matches(lib, now()))
            .map(|m| m.name)
            .collect()
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(MODIFIERS.len(), 9);
        let names: HashSet<_> = MODIFIERS.iter().map(|m| m.name).collect();
        assert_eq!(names.len(), 9, "modifier names must be unique");
    }

    #[test]
    fn test_shipped_bounds() {
        let bounds = ScoreBounds::shipped();
        assert_eq!(bounds.min, -85);
        assert_eq!(bounds.max, 100);
        assert_eq!(bounds.span(), 185);
    }

    #[test]
    fn test_combined_popularity_formula() {
        let mut lib = library();
        lib.github.stats.subscribers = 2;
        lib.github.stats.forks = 3;
        lib.github.stats.stars = 4;
        lib.npm.as_mut().unwrap().downloads = Some(Some(250));
        assert_eq!(combined_popularity(&lib), Some(100.0 + 75.0 + 40.0 + 2.5));
    }

    #[test]
    fn test_downloads_alone_below_known_tier() {
        let mut lib = library();
        lib.github.stats.subscribers = 0;
        lib.github.stats.forks = 0;
        lib.github.stats.stars = 0;
        lib.npm.as_mut().unwrap().downloads = Some(Some(200_000));
        assert_eq!(combined_popularity(&lib), Some(2000.0));
        let names = fired(&lib);
        assert!(!names.contains(&"Known"));
        assert!(!names.contains(&"Popular"));
        assert!(!names.contains(&"Very popular"));
    }

    #[test]
    fn test_popularity_tiers_co_fire() {
        let mut lib = library();
        lib.github.stats.stars = 6_000;
        let names = fired(&lib);
        assert!(names.contains(&"Very popular"));
        assert!(names.contains(&"Popular"));
        assert!(names.contains(&"Known"));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut lib = library();
        lib.github.stats.subscribers = 0;
        lib.github.stats.forks = 0;
        lib.github.stats.stars = 250;
        lib.npm.as_mut().unwrap().downloads = Some(Some(0));
        assert_eq!(combined_popularity(&lib), Some(2500.0));
        assert!(!fired(&lib).contains(&"Known"));
    }

    #[test]
    fn test_missing_downloads_blocks_tiers() {
        let mut lib = library();
        lib.github.stats.stars = 100_000;
        lib.npm = None;
        assert_eq!(combined_popularity(&lib), None);
        assert!(!fired(&lib).contains(&"Very popular"));
    }

    #[test]
    fn test_null_downloads_count_as_zero() {
        let mut lib = library();
        lib.github.stats.subscribers = 0;
        lib.github.stats.forks = 0;
        lib.github.stats.stars = 300;
        lib.npm.as_mut().unwrap().downloads = Some(None);
        assert_eq!(combined_popularity(&lib), Some(3000.0));
        assert!(fired(&lib).contains(&"Known"));

        lib.npm.as_mut().unwrap().downloads = None;
        assert_eq!(combined_popularity(&lib), None);
        assert!(!fired(&lib).contains(&"Known"));
    }

    #[test]
    fn test_open_issues_boundary() {
        let mut lib = library();
        lib.github.stats.issues = 74;
        assert!(!fired(&lib).contains(&"Lots of open issues"));
        lib.github.stats.issues = 75;
        assert!(fired(&lib).contains(&"Lots of open issues"));
    }

    #[test]
    fn test_license_rules() {
        let mut lib = library();
        lib.license = Some(None);
        assert!(fired(&lib).contains(&"No license"));
        assert!(!fired(&lib).contains(&"GPL license"));

        for key in ["gpl-3.0", "gpl-2.0", "other"] {
            lib.license = Some(Some(crate::models::License {
                key: Some(key.to_string()),
                ..Default::default()
            }));
            assert!(fired(&lib).contains(&"GPL license"), "{key}");
            assert!(!fired(&lib).contains(&"No license"));
        }

        for key in [Some("mit"), Some("lgpl-3.0"), Some("agpl-3.0"), None] {
            lib.license = Some(Some(crate::models::License {
                key: key.map(str::to_string),
                ..Default::default()
            }));
            assert!(!fired(&lib).contains(&"GPL license"), "{key:?}");
        }

        lib.license = None;
        assert!(!fired(&lib).contains(&"No license"));
        assert!(!fired(&lib).contains(&"GPL license"));
    }

    #[test]
    fn test_update_recency_windows() {
        let mut lib = library();
        lib.github.stats.updated_at = now() - Duration::days(30);
        assert!(fired(&lib).contains(&"Recently updated"));

        lib.github.stats.updated_at = now() - Duration::days(30) - Duration::seconds(1);
        assert!(!fired(&lib).contains(&"Recently updated"));
        assert!(!fired(&lib).contains(&"Not updated recently"));

        lib.github.stats.updated_at = now() - Duration::days(180);
        assert!(fired(&lib).contains(&"Not updated recently"));
        assert!(!fired(&lib).contains(&"Recently updated"));
    }

    #[test]
    fn test_days_since_update_is_fractional() {
        let mut lib = library();
        lib.github.stats.updated_at = now() - Duration::hours(36);
        assert!((days_since_update(&lib, now()) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_new_architecture_requires_both_flags() {
        let mut lib = library();
        for (record, repo, fires) in [
            (true, true, false),
            (true, false, true),
            (false, true, true),
            (false, false, true),
        ] {
            lib.new_architecture = record;
            lib.github.new_architecture = repo;
            assert_eq!(
                fired(&lib).contains(&"Not supporting New Architecture"),
                fires,
                "record={record} repo={repo}"
            );
        }
    }
}
