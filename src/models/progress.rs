// src/models/progress.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;

/// Per-subtopic counters for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicStats {
    #[serde(default)]
    pub correct: u64,
    #[serde(default)]
    pub total: u64,
}

/// Cumulative quiz progress for one user.
///
/// `score` and `total_questions` are derived: they always equal the sums of
/// `correct` / `total` across the subtopic map and are recomputed on every
/// merge, never adjusted incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub username: String,
    pub subtopics: HashMap<String, SubtopicStats>,
    pub score: u64,
    pub total_questions: u64,
}

impl ProgressRecord {
    /// The zeroed default returned before a user has submitted any session.
    pub fn empty(username: &str) -> Self {
        Self {
            username: username.to_owned(),
            subtopics: HashMap::new(),
            score: 0,
            total_questions: 0,
        }
    }
}

/// Represents a row of the 'progress' table (subtopics stored as JSONB).
#[derive(Debug, FromRow)]
pub struct ProgressRow {
    pub username: String,
    pub subtopics: Json<HashMap<String, SubtopicStats>>,
    pub score: i64,
    pub total_questions: i64,
}

impl From<ProgressRow> for ProgressRecord {
    fn from(row: ProgressRow) -> Self {
        Self {
            username: row.username,
            subtopics: row.subtopics.0,
            score: row.score.max(0) as u64,
            total_questions: row.total_questions.max(0) as u64,
        }
    }
}

/// DTO for submitting one completed session's counters.
#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub username: String,
    #[serde(default)]
    pub subtopics: HashMap<String, SubtopicStats>,
}

/// Merges one session's per-subtopic counters into a cumulative record.
///
/// Starts from `existing` (or a zeroed record if the user has none), adds the
/// session's `correct`/`total` per subtopic, then recomputes the derived sums
/// from scratch so the record's invariant holds even if prior data was off.
///
/// Merging the same session twice double-counts: each call represents one
/// distinct completed session.
pub fn merge(
    existing: Option<ProgressRecord>,
    username: &str,
    session: &HashMap<String, SubtopicStats>,
) -> ProgressRecord {
    let mut record = existing.unwrap_or_else(|| ProgressRecord::empty(username));

    // Saturating arithmetic: the save endpoint accepts arbitrary u64
    // counters, so overflow must clamp rather than panic.
    for (subtopic, stats) in session {
        let entry = record.subtopics.entry(subtopic.clone()).or_default();
        entry.correct = entry.correct.saturating_add(stats.correct);
        entry.total = entry.total.saturating_add(stats.total);
    }

    record.score = record
        .subtopics
        .values()
        .fold(0u64, |acc, s| acc.saturating_add(s.correct));
    record.total_questions = record
        .subtopics
        .values()
        .fold(0u64, |acc, s| acc.saturating_add(s.total));

    record
}
