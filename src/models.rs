//! Core data models for pkgscore
//!
//! A [`Library`] is one directory entry as harvested from the hosting
//! platform (repository statistics) and the package registry (download
//! counts). The scorers never mutate it; they produce output records that
//! carry a copy of every input field plus the derived values.
//!
//! Fields the engine does not model are kept in flattened `extra` maps so
//! that a round trip through the scorer re-emits them untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fields written by the quality scorer
pub const QUALITY_FIELDS: &[&str] = &["score", "matchingScoreModifiers"];

/// Field written by the trending scorer
pub const TRENDING_FIELDS: &[&str] = &["popularity"];

/// Every field either scorer writes. A scorer overrides only its own fields;
/// the other scorer's output in the input survives untouched.
pub const OUTPUT_FIELDS: &[&str] = &["score", "matchingScoreModifiers", "popularity"];

/// Repository statistics from the hosting platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats {
    pub subscribers: u64,
    pub forks: u64,
    pub stars: u64,
    pub issues: u64,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Repository-level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubData {
    pub stats: GithubStats,
    /// Repository-level New Architecture support
    #[serde(default)]
    pub new_architecture: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registry data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpmData {
    /// Monthly download count. `None` = field absent, `Some(None)` = explicit `null`.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub downloads: Option<Option<u64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// License descriptor as reported by the hosting platform
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A package directory entry (input record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub github: GithubData,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<NpmData>,

    /// `None` = field absent, `Some(None)` = explicit `null`.
    /// Only the explicit `null` counts as "no license".
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub license: Option<Option<License>>,

    /// Record-level New Architecture support
    #[serde(default)]
    pub new_architecture: bool,

    /// Explicit maintenance-status override
    #[serde(default)]
    pub unmaintained: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm_pkg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keeps an explicit `null` distinct from an absent field.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Library {
    /// Monthly downloads, if the registry reported a number
    pub fn downloads(&self) -> Option<u64> {
        self.npm.as_ref().and_then(|npm| npm.downloads.flatten())
    }

    pub fn stats(&self) -> &GithubStats {
        &self.github.stats
    }

    /// Best available human-readable identifier
    pub fn display_name(&self) -> &str {
        self.npm_pkg
            .as_deref()
            .or(self.github.full_name.as_deref())
            .or(self.github_url.as_deref())
            .unwrap_or("<unnamed>")
    }

    /// Copy of this record without the given previously computed fields
    fn without_fields(&self, fields: &[&str]) -> Library {
        let mut copy = self.clone();
        for field in fields {
            copy.extra.remove(*field);
        }
        copy
    }
}

/// Library plus its quality score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredLibrary {
    #[serde(flatten)]
    pub library: Library,
    pub score: i32,
    /// Names of the modifiers that fired, in table order
    pub matching_score_modifiers: Vec<String>,
}

impl ScoredLibrary {
    pub fn new(library: &Library, score: i32, matching_score_modifiers: Vec<String>) -> Self {
        Self {
            library: library.without_fields(QUALITY_FIELDS),
            score,
            matching_score_modifiers,
        }
    }
}

/// Library plus its trending popularity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendedLibrary {
    #[serde(flatten)]
    pub library: Library,
    pub popularity: f64,
}

impl TrendedLibrary {
    pub fn new(library: &Library, popularity: f64) -> Self {
        Self {
            library: library.without_fields(TRENDING_FIELDS),
            popularity,
        }
    }
}

/// Library with both scorers applied independently
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedLibrary {
    #[serde(flatten)]
    pub library: Library,
    pub score: i32,
    pub matching_score_modifiers: Vec<String>,
    pub popularity: f64,
}

impl EvaluatedLibrary {
    pub fn new(
        library: &Library,
        score: i32,
        matching_score_modifiers: Vec<String>,
        popularity: f64,
    ) -> Self {
        Self {
            library: library.without_fields(OUTPUT_FIELDS),
            score,
            matching_score_modifiers,
            popularity,
        }
    }
}
