//! Integration tests for pkgscore
//!
//! These tests drive the public library API against the JSON fixtures to
//! verify:
//! - Both scorers produce the documented values for realistic records
//! - Every input field survives into the output records
//! - Batch scoring matches per-record scoring
//! - Reporters and config loading work end to end

use chrono::{DateTime, TimeZone, Utc};
use pkgscore::config::{load_project_config, ScoringConfig};
use pkgscore::input::{load_libraries, parse_libraries};
use pkgscore::models::Library;
use pkgscore::reporters::{self, OutputFormat, Report};
use pkgscore::scoring::{self, evaluate_all, score_all, trend_all, QualityScorer, TrendingScorer};
use std::path::PathBuf;

/// Path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixtures() -> Vec<Library> {
    load_libraries(Some(fixtures_path().join("libraries.json").as_path())).expect("load fixtures")
}

/// Reference instant the fixture dates are written against
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_fixture_scores() {
    let evaluated = evaluate_all(&fixtures(), &ScoringConfig::default(), now());
    assert_eq!(evaluated.len(), 3);

    let popular = &evaluated[0];
    assert_eq!(popular.library.display_name(), "react-native-popular");
    assert_eq!(popular.score, 89);
    assert_eq!(
        popular.matching_score_modifiers,
        vec![
            "Very popular",
            "Popular",
            "Known",
            "Lots of open issues",
            "Recently updated"
        ]
    );
    assert_eq!(popular.popularity, 0.028);

    let abandoned = &evaluated[1];
    assert_eq!(abandoned.score, 22);
    assert_eq!(
        abandoned.matching_score_modifiers,
        vec![
            "GPL license",
            "Not updated recently",
            "Not supporting New Architecture"
        ]
    );
    assert_eq!(abandoned.popularity, -0.817);

    let fresh = &evaluated[2];
    assert_eq!(fresh.score, 41);
    assert_eq!(
        fresh.matching_score_modifiers,
        vec!["No license", "Recently updated"]
    );
    assert_eq!(fresh.popularity, -100.0);
}

#[test]
fn test_scores_stay_in_range() {
    for scored in score_all(&fixtures(), &ScoringConfig::default(), now()) {
        assert!((0..=100).contains(&scored.score), "{}", scored.score);
    }
}

#[test]
fn test_output_preserves_input_fields() {
    let report = Report::Combined(evaluate_all(&fixtures(), &ScoringConfig::default(), now()));
    let json = reporters::render(&report, OutputFormat::Json, false).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let first = &parsed[0];
    assert_eq!(first["ios"], true);
    assert_eq!(first["examples"][0], "https://snack.expo.dev/@example/popular");
    assert_eq!(first["github"]["topics"][1], "ui");
    assert_eq!(first["github"]["stats"]["hasIssues"], true);
    assert_eq!(first["github"]["stats"]["stars"], 20000);
    assert_eq!(first["npm"]["weekDownloads"], 480000);
    assert_eq!(first["license"]["spdxId"], "MIT");
    assert_eq!(first["score"], 89);

    assert!(parsed[2]["license"].is_null());
    assert_eq!(parsed[2]["web"], true);
}

#[test]
fn test_rescoring_output_overrides_previous_values() {
    let first_pass = Report::Quality(score_all(&fixtures(), &ScoringConfig::default(), now()));
    let json = reporters::render(&first_pass, OutputFormat::Json, true).unwrap();

    let reloaded = parse_libraries(&json, "first pass").unwrap();
    let second_pass = score_all(&reloaded, &ScoringConfig::default(), now());
    let rendered =
        reporters::render(&Report::Quality(second_pass), OutputFormat::Json, true).unwrap();

    assert_eq!(rendered, json);
    assert_eq!(rendered.matches("\"score\"").count(), 3);
}

#[test]
fn test_trend_after_score_keeps_quality_fields() {
    let scored = score_all(&fixtures(), &ScoringConfig::default(), now());
    let json = reporters::render(&Report::Quality(scored.clone()), OutputFormat::Json, true).unwrap();

    let reloaded = parse_libraries(&json, "scored").unwrap();
    let trended = Report::Trending(trend_all(&reloaded, now()));
    let json = reporters::render(&trended, OutputFormat::Json, false).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    for (i, (out, first)) in parsed.as_array().unwrap().iter().zip(&scored).enumerate() {
        assert_eq!(out["score"], first.score, "record {i}");
        assert_eq!(
            out["matchingScoreModifiers"],
            serde_json::json!(first.matching_score_modifiers),
            "record {i}"
        );
        assert!(out["popularity"].is_number(), "record {i}");
    }
    assert_eq!(parsed[0]["score"], 89);
    assert_eq!(parsed[0]["popularity"], 0.028);
    assert_eq!(parsed[1]["popularity"], -0.817);
}

#[test]
fn test_score_after_trend_keeps_popularity() {
    let trended = Report::Trending(trend_all(&fixtures(), now()));
    let json = reporters::render(&trended, OutputFormat::Json, true).unwrap();

    let reloaded = parse_libraries(&json, "trended").unwrap();
    let scored = Report::Quality(score_all(&reloaded, &ScoringConfig::default(), now()));
    let json = reporters::render(&scored, OutputFormat::Json, true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed[0]["popularity"], 0.028);
    assert_eq!(parsed[2]["popularity"], -100.0);
    assert_eq!(parsed[2]["score"], 41);
    assert_eq!(json.matches("\"popularity\"").count(), 3);
}

#[test]
fn test_null_downloads_still_reach_popularity_tiers() {
    let record = r#"{
        "npmPkg": "react-native-null-downloads",
        "github": {
            "newArchitecture": true,
            "stats": {
                "subscribers": 0, "forks": 0, "stars": 300, "issues": 0,
                "updatedAt": "2026-05-30T00:00:00Z",
                "createdAt": "2024-01-01T00:00:00Z"
            }
        },
        "npm": { "downloads": null },
        "license": { "key": "mit" },
        "newArchitecture": true
    }"#;
    let libs = parse_libraries(record, "null downloads").unwrap();
    let evaluated = evaluate_all(&libs, &ScoringConfig::default(), now());

    assert_eq!(
        evaluated[0].matching_score_modifiers,
        vec!["Known", "Recently updated"]
    );
    assert_eq!(evaluated[0].popularity, -100.0);

    let json = reporters::render(&Report::Combined(evaluated), OutputFormat::Json, true).unwrap();
    assert!(json.contains("\"downloads\":null"));
}

#[test]
fn test_batch_matches_single_record_functions() {
    let libs = fixtures();
    let trended = trend_all(&libs, now());
    for (lib, batch) in libs.iter().zip(&trended) {
        assert_eq!(batch, &scoring::trend_at(lib, now()));
        assert_eq!(
            scoring::score_at(lib, now()).score,
            QualityScorer::default().breakdown(lib, now()).score
        );
    }
}

#[test]
fn test_scoring_is_idempotent() {
    let libs = fixtures();
    let config = ScoringConfig::default();
    assert_eq!(
        evaluate_all(&libs, &config, now()),
        evaluate_all(&libs, &config, now())
    );
}

#[test]
fn test_zero_downloads_ignores_other_fields() {
    let mut lib = fixtures().remove(2);
    let trending = TrendingScorer::new();
    for (stars, unmaintained) in [(0, true), (100_000, false)] {
        lib.github.stats.stars = stars;
        lib.unmaintained = unmaintained;
        assert_eq!(trending.trend(&lib, now()).popularity, -100.0);
    }
}

#[test]
fn test_text_report_renders_fixture() {
    let report = Report::Combined(evaluate_all(&fixtures(), &ScoringConfig::default(), now()));
    let text = reporters::render(&report, OutputFormat::Text, false).unwrap();
    assert!(text.contains("3 libraries"));
    assert!(text.contains("react-native-abandoned"));
    assert!(text.contains("Not updated recently"));
}

#[test]
fn test_project_config_enables_clamping() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pkgscore.toml"),
        "[scoring]\nclamp_score = true\n",
    )
    .unwrap();

    let config = load_project_config(dir.path());
    assert!(config.scoring.clamp_score);

    // In-range scores are unaffected by clamping
    let clamped = score_all(&fixtures(), &config.scoring, now());
    let plain = score_all(&fixtures(), &ScoringConfig::default(), now());
    assert_eq!(clamped, plain);
}
