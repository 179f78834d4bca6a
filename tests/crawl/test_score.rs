//! Tests for the activity score engine.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ghcrawl::{InnerSourceMetadata, RepositorySnapshot, ScoreEngine, ScoreError, ScoreMode};

fn evaluation_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// A repository with zero engagement, created and updated at `instant`.
fn snapshot_at(instant: DateTime<Utc>) -> RepositorySnapshot {
    RepositorySnapshot {
        name: "widget".to_string(),
        full_name: "acme/widget".to_string(),
        forks_count: Some(0),
        subscribers_count: Some(0),
        stargazers_count: Some(0),
        open_issues_count: Some(0),
        description: Some(String::new()),
        updated_at: Some(instant),
        created_at: Some(instant),
        ..RepositorySnapshot::default()
    }
}

fn engagement_snapshot(now: DateTime<Utc>, forks: u64, subscribers: u64) -> RepositorySnapshot {
    let mut snapshot = snapshot_at(now);
    snapshot.forks_count = Some(forks);
    snapshot.subscribers_count = Some(subscribers);
    snapshot
}

#[test]
fn baseline_repository_scores_one_thousand() {
    let now = evaluation_instant();
    let snapshot = snapshot_at(now);
    let mut metadata = InnerSourceMetadata::default();

    let score = ScoreEngine::default()
        .compute(&snapshot, &mut metadata, now)
        .expect("all fields present");

    // 50 baseline * multiplier 1 + boost 1000, minus the baseline again
    assert_eq!(score, 1000);
    assert_eq!(metadata.score, 1000);
}

#[test]
fn compute_is_deterministic_and_idempotent() {
    let now = evaluation_instant();
    let mut snapshot = snapshot_at(now);
    snapshot.forks_count = Some(3);
    snapshot.stargazers_count = Some(42);

    let mut metadata = InnerSourceMetadata {
        title: "Widget".to_string(),
        skills: vec!["Rust".to_string()],
        ..InnerSourceMetadata::default()
    };
    let before = metadata.clone();

    let engine = ScoreEngine::default();
    let first = engine
        .compute(&snapshot, &mut metadata, now)
        .expect("scores");
    let second = engine
        .compute(&snapshot, &mut metadata, now)
        .expect("scores");

    assert_eq!(first, second);
    assert_eq!(metadata.score, second);

    // Only the score field changes
    assert_eq!(metadata.title, before.title);
    assert_eq!(metadata.skills, before.skills);
    assert_eq!(metadata.motivation, before.motivation);
    assert_eq!(metadata.guidelines, before.guidelines);
}

#[test]
fn engagement_divisions_truncate() {
    let now = evaluation_instant();
    let mut snapshot = snapshot_at(now);
    snapshot.forks_count = Some(1);
    snapshot.subscribers_count = Some(2);
    snapshot.stargazers_count = Some(11);
    snapshot.open_issues_count = Some(14);

    let score = ScoreEngine::default()
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("scores");

    // 1*5 + 2 + 11/3 + 14/5 = 5 + 2 + 3 + 2
    assert_eq!(score, 1012);
}

#[test]
fn stale_repository_collapses_to_negative_baseline() {
    let now = evaluation_instant();
    let then = now - Duration::days(10);
    let mut snapshot = snapshot_at(then);
    snapshot.stargazers_count = Some(300);

    let score = ScoreEngine::default()
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("scores");

    // The truncated multiplier and creation decay wipe engagement and boost
    assert_eq!(score, -50);
}

#[test]
fn aged_creation_drops_the_update_boost() {
    let now = evaluation_instant();
    let mut snapshot = snapshot_at(now);
    snapshot.created_at = Some(now - Duration::days(30));

    let score = ScoreEngine::default()
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("scores");

    // 50 * 1 + 1000 * 0, minus the baseline
    assert_eq!(score, 0);
}

#[test]
fn meaningful_description_adds_fifty() {
    let now = evaluation_instant();
    let engine = ScoreEngine::default();

    let mut short = snapshot_at(now);
    short.description = Some("x".repeat(30));
    let baseline = engine
        .compute(&short, &mut InnerSourceMetadata::default(), now)
        .expect("scores");

    let mut long = snapshot_at(now);
    long.description = Some("x".repeat(31));
    let boosted = engine
        .compute(&long, &mut InnerSourceMetadata::default(), now)
        .expect("scores");

    assert_eq!(baseline, 1000);
    assert_eq!(boosted, baseline + 50);
}

#[test]
fn long_motivation_matches_the_description_bonus() {
    let now = evaluation_instant();
    let snapshot = snapshot_at(now);
    let mut metadata = InnerSourceMetadata {
        motivation: "m".repeat(31),
        ..InnerSourceMetadata::default()
    };

    let score = ScoreEngine::default()
        .compute(&snapshot, &mut metadata, now)
        .expect("scores");

    assert_eq!(score, 1050);
}

#[test]
fn guidelines_bonus_is_independent_of_the_description() {
    let now = evaluation_instant();
    let engine = ScoreEngine::default();

    let mut metadata = InnerSourceMetadata {
        guidelines: "CONTRIBUTING.md".to_string(),
        ..InnerSourceMetadata::default()
    };

    let snapshot = snapshot_at(now);
    assert_eq!(
        engine
            .compute(&snapshot, &mut metadata, now)
            .expect("scores"),
        1100
    );

    let mut described = snapshot_at(now);
    described.description = Some("a truly meaningful description here".to_string());
    assert_eq!(
        engine
            .compute(&described, &mut metadata, now)
            .expect("scores"),
        1150
    );
}

#[test]
fn scores_at_the_compression_threshold_stay_linear() {
    let now = evaluation_instant();

    // engagement 1950 -> 50 + 1950 + 1000 = 3000, not above the threshold
    let snapshot = engagement_snapshot(now, 390, 0);
    let score = ScoreEngine::default()
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("scores");

    assert_eq!(score, 2950);
}

#[test]
fn scores_above_the_compression_threshold_are_log_damped() {
    let now = evaluation_instant();
    let engine = ScoreEngine::default();

    // engagement 1951 -> pre-compression score 3001
    let just_over = engagement_snapshot(now, 390, 1);
    let damped_low = engine
        .compute(&just_over, &mut InnerSourceMetadata::default(), now)
        .expect("scores");
    assert_eq!(damped_low, (3000.0 + 3001f64.ln() * 100.0) as i64 - 50);

    // engagement 2050 -> pre-compression score 3100
    let further_over = engagement_snapshot(now, 410, 0);
    let damped_high = engine
        .compute(&further_over, &mut InnerSourceMetadata::default(), now)
        .expect("scores");
    assert_eq!(damped_high, (3000.0 + 3100f64.ln() * 100.0) as i64 - 50);

    // 99 points of raw score collapse to almost nothing above the threshold
    assert!(damped_high > damped_low);
    assert!(damped_high - damped_low < 10);
}

#[test]
fn engagement_growth_never_decreases_the_score() {
    let now = evaluation_instant();
    let engine = ScoreEngine::default();

    let mut previous = i64::MIN;
    for forks in 0..25 {
        let snapshot = engagement_snapshot(now, forks, 0);
        let score = engine
            .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
            .expect("scores");
        assert!(score >= previous, "forks={forks} dropped the score");
        previous = score;
    }

    let mut previous = i64::MIN;
    for stars in [0, 1, 2, 3, 30, 300, 3000, 30000] {
        let mut snapshot = snapshot_at(now);
        snapshot.stargazers_count = Some(stars);
        let score = engine
            .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
            .expect("scores");
        assert!(score >= previous, "stars={stars} dropped the score");
        previous = score;
    }
}

#[test]
fn missing_fields_fail_without_writing_a_score() {
    let now = evaluation_instant();
    let engine = ScoreEngine::default();

    let cases: [(&str, fn(&mut RepositorySnapshot)); 5] = [
        ("forks_count", |s| s.forks_count = None),
        ("subscribers_count", |s| s.subscribers_count = None),
        ("stargazers_count", |s| s.stargazers_count = None),
        ("open_issues_count", |s| s.open_issues_count = None),
        ("description", |s| s.description = None),
    ];

    for (field, clear) in cases {
        let mut snapshot = snapshot_at(now);
        clear(&mut snapshot);

        let mut metadata = InnerSourceMetadata {
            score: 123,
            ..InnerSourceMetadata::default()
        };

        let err = engine
            .compute(&snapshot, &mut metadata, now)
            .expect_err("field is missing");

        assert_eq!(err, ScoreError::MissingField { field });
        assert_eq!(metadata.score, 123, "score must stay untouched on {field}");
    }
}

#[test]
fn real_valued_mode_rounds_once_at_the_end() {
    let now = evaluation_instant();
    let snapshot = snapshot_at(now);
    let mut metadata = InnerSourceMetadata::default();

    let score = ScoreEngine::new(ScoreMode::RealValued)
        .compute(&snapshot, &mut metadata, now)
        .expect("scores");

    // 50 * 1.01 + 1000 = 1050.5, rounded after subtracting the baseline
    assert_eq!(score, 1001);
    assert_eq!(metadata.score, 1001);
}

#[test]
fn real_valued_mode_keeps_partial_multipliers() {
    let now = evaluation_instant();
    let then = now - Duration::days(10);
    let mut snapshot = snapshot_at(then);
    snapshot.stargazers_count = Some(300);

    let legacy = ScoreEngine::new(ScoreMode::Legacy)
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("scores");
    let real = ScoreEngine::new(ScoreMode::RealValued)
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("scores");

    assert_eq!(legacy, -50);
    assert!(real > 0);
    assert!(real > legacy);
}

#[test]
fn future_updates_clamp_instead_of_failing() {
    let now = evaluation_instant();
    let mut snapshot = snapshot_at(now);
    snapshot.updated_at = Some(now + Duration::days(1));

    let score = ScoreEngine::default()
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("clamped, not an error");

    // The negative day count inflates the boost slightly: 1000 + 1 * 2.74
    assert_eq!(score, 1002);
}

#[test]
fn missing_timestamps_behave_like_the_far_past() {
    let now = evaluation_instant();
    let mut snapshot = snapshot_at(now);
    snapshot.updated_at = None;
    snapshot.created_at = None;
    snapshot.stargazers_count = Some(900);

    let score = ScoreEngine::default()
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("timestamps are not required");

    assert_eq!(score, -50);
}

#[test]
fn validate_flags_reversed_timestamps() {
    let now = evaluation_instant();
    let mut snapshot = snapshot_at(now);
    snapshot.created_at = Some(now);
    snapshot.updated_at = Some(now - Duration::days(2));

    let err = snapshot.validate().expect_err("created after updated");
    assert!(matches!(err, ScoreError::InvalidTimestamps { .. }));

    // The engine itself clamps rather than validates
    ScoreEngine::default()
        .compute(&snapshot, &mut InnerSourceMetadata::default(), now)
        .expect("still scores");

    snapshot.updated_at = Some(now);
    snapshot.validate().expect("ordered timestamps pass");
}
