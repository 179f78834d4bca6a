//! Repository activity scoring
//!
//! Calculates a virtual InnerSource score from forks, watches, stars, and
//! issues, following the repository-activity-score pattern
//! (<https://patterns.innersourcecommons.org/p/repository-activity-score>).

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::metadata::InnerSourceMetadata;
use super::types::RepositorySnapshot;

/// Errors raised while scoring a repository snapshot
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    /// A snapshot field required by the score formula is unset
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// `created_at` is later than `updated_at`; raised only by
    /// [`RepositorySnapshot::validate`], the engine itself clamps instead
    #[error("created_at {created_at} is later than updated_at {updated_at}")]
    InvalidTimestamps {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

/// Arithmetic used by [`ScoreEngine`].
///
/// `Legacy` truncates to an integer after every stage, which collapses the
/// update multiplier and the creation decay to 0 everywhere except right at
/// their boundary instants. `RealValued` runs the same pipeline in floating
/// point, applies the multipliers as fractions, and rounds once at the end.
/// `Legacy` is the default so historical scores reproduce bit-exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScoreMode {
    #[default]
    Legacy,
    RealValued,
}

/// Computes the activity score for a repository snapshot.
///
/// The engine is stateless; `compute` is a pure function of the snapshot,
/// the metadata's `motivation` and `guidelines` fields, and the evaluation
/// instant. Its only side effect is recording the score on the metadata
/// record.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreEngine {
    mode: ScoreMode,
}

impl ScoreEngine {
    #[must_use]
    pub fn new(mode: ScoreMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> ScoreMode {
        self.mode
    }

    /// Scores a snapshot and records the result on `metadata.score`.
    ///
    /// Fails with [`ScoreError::MissingField`] when one of the engagement
    /// counters or the description is unset; the metadata record is left
    /// untouched in that case. Missing or reversed timestamps are never an
    /// error, the `min()` clamps in the formula absorb them.
    ///
    /// # Example
    /// ```rust
    /// use chrono::Utc;
    /// use ghcrawl::{InnerSourceMetadata, RepositorySnapshot, ScoreEngine};
    ///
    /// let now = Utc::now();
    /// let snapshot = RepositorySnapshot {
    ///     forks_count: Some(4),
    ///     subscribers_count: Some(10),
    ///     stargazers_count: Some(30),
    ///     open_issues_count: Some(5),
    ///     description: Some("Internal build cache with remote storage".to_string()),
    ///     updated_at: Some(now),
    ///     created_at: Some(now),
    ///     ..RepositorySnapshot::default()
    /// };
    /// let mut metadata = InnerSourceMetadata::default();
    ///
    /// let score = ScoreEngine::default().compute(&snapshot, &mut metadata, now)?;
    /// assert_eq!(score, metadata.score);
    /// # Ok::<(), ghcrawl::ScoreError>(())
    /// ```
    pub fn compute(
        &self,
        snapshot: &RepositorySnapshot,
        metadata: &mut InnerSourceMetadata,
        now: DateTime<Utc>,
    ) -> Result<i64, ScoreError> {
        let forks = required(snapshot.forks_count, "forks_count")? as i64;
        let subscribers = required(snapshot.subscribers_count, "subscribers_count")? as i64;
        let stargazers = required(snapshot.stargazers_count, "stargazers_count")? as i64;
        let open_issues = required(snapshot.open_issues_count, "open_issues_count")? as i64;
        let description = snapshot
            .description
            .as_deref()
            .ok_or(ScoreError::MissingField {
                field: "description",
            })?;

        let days_since_update = days_since(now, snapshot.updated_at);
        let days_since_creation = days_since(now, snapshot.created_at);

        let meaningful_description =
            description.len() > 30 || metadata.motivation.len() > 30;
        let has_guidelines = !metadata.guidelines.is_empty();

        let score = match self.mode {
            ScoreMode::Legacy => legacy_score(
                forks,
                subscribers,
                stargazers,
                open_issues,
                days_since_update,
                days_since_creation,
                meaningful_description,
                has_guidelines,
            ),
            ScoreMode::RealValued => real_valued_score(
                forks,
                subscribers,
                stargazers,
                open_issues,
                days_since_update,
                days_since_creation,
                meaningful_description,
                has_guidelines,
            ),
        };

        metadata.score = score;
        Ok(score)
    }
}

fn required(value: Option<u64>, field: &'static str) -> Result<u64, ScoreError> {
    value.ok_or(ScoreError::MissingField { field })
}

fn days_since(now: DateTime<Utc>, then: Option<DateTime<Utc>>) -> f64 {
    match then {
        Some(then) => (now - then).num_milliseconds() as f64 / 86_400_000.0,
        // A missing timestamp behaves like the far past; the min() clamps
        // in both scoring modes absorb the infinity
        None => f64::INFINITY,
    }
}

/// Historical integer arithmetic, truncating toward zero after every stage.
#[allow(clippy::too_many_arguments)]
fn legacy_score(
    forks: i64,
    subscribers: i64,
    stargazers: i64,
    open_issues: i64,
    days_since_update: f64,
    days_since_creation: f64,
    meaningful_description: bool,
    has_guidelines: bool,
) -> i64 {
    // initial score is 50 to give active repos with low KPIs (forks,
    // watchers, stars) a better starting point
    let mut score: i64 = 50;

    // weighting: forks and watches count most, then stars, add some little
    // score for open issues, too
    score += forks * 5;
    score += subscribers;
    score += stargazers / 3;
    score += open_issues / 5;

    // bonus multiplier between 0..1 for recent updates (1 = updated today,
    // 0 = updated more than 100 days ago); truncating the fraction to an
    // integer collapses it to 0 for anything updated over a day ago
    let multiplier = ((1.0 + (100.0 - days_since_update.min(100.0))) / 100.0) as i64;
    score *= multiplier;

    // repositories updated in the previous year receive a boost of maximum
    // 1000, declining by days since last update
    let mut boost = (1000.0 - days_since_update.min(365.0) * 2.74) as i64;

    // gradually scale down the boost by repository age to mix with "real"
    // engagement stats; the truncation keeps it only for repositories
    // created at the evaluation instant
    boost *= ((365.0 - days_since_creation.min(365.0)) / 365.0) as i64;
    score += boost;

    // static boost of 50 for a meaningful description
    if meaningful_description {
        score += 50;
    }

    // static boost of 100 for contribution guidelines
    if has_guidelines {
        score += 100;
    }

    // logarithmic scale for very active projects (open ended but
    // stabilizing around 5000)
    if score > 3000 {
        score = (3000.0 + (score as f64).ln() * 100.0) as i64;
    }

    // final score is a rounded value starting from 0 (subtract the initial
    // value)
    (score as f64 - 50.0).round() as i64
}

/// The same pipeline with real-valued multipliers and one final rounding.
#[allow(clippy::too_many_arguments)]
fn real_valued_score(
    forks: i64,
    subscribers: i64,
    stargazers: i64,
    open_issues: i64,
    days_since_update: f64,
    days_since_creation: f64,
    meaningful_description: bool,
    has_guidelines: bool,
) -> i64 {
    let mut score = 50.0;

    score += forks as f64 * 5.0;
    score += subscribers as f64;
    score += stargazers as f64 / 3.0;
    score += open_issues as f64 / 5.0;

    score *= (1.0 + (100.0 - days_since_update.min(100.0))) / 100.0;

    let mut boost = 1000.0 - days_since_update.min(365.0) * 2.74;
    boost *= (365.0 - days_since_creation.min(365.0)) / 365.0;
    score += boost;

    if meaningful_description {
        score += 50.0;
    }

    if has_guidelines {
        score += 100.0;
    }

    if score > 3000.0 {
        score = 3000.0 + score.ln() * 100.0;
    }

    (score - 50.0).round() as i64
}
