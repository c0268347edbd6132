//! Value types flowing through the ATS scoring pipeline.
//!
//! Everything here lives for a single scoring call. Only `ScoreResult` and its
//! children leave the engine; they serialize to the JSON shape the frontend reads.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Raw text pair handed to the engine once document extraction has finished.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreInput {
    #[serde(alias = "resumeText")]
    pub resume_text: String,
    #[serde(default, alias = "jobDescription")]
    pub job_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermOrigin {
    Unigram,
    Bigram,
}

/// A matching target derived from the job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTerm {
    /// Lowercase token, or two tokens joined by a single space.
    pub text: String,
    pub origin: TermOrigin,
}

impl CandidateTerm {
    pub fn unigram(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: TermOrigin::Unigram,
        }
    }

    pub fn bigram(first: &str, second: &str) -> Self {
        Self {
            text: format!("{first} {second}"),
            origin: TermOrigin::Bigram,
        }
    }
}

/// Best fuzzy match of one candidate term against the resume.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub token: String,
    pub score: f64, // 0.0 – 1.0
}

/// Shape signals of the resume, produced by the structure analyzer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureReport {
    pub sections_found: usize,
    pub total_words: usize,
    pub avg_sentence_len: usize,
    /// Four-digit 19xx/20xx runs in first-seen order.
    pub years: IndexSet<String>,
}

/// The four sub-scores behind the overall score. Each is clamped to 0 – 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match: u8,
    pub sections_format: u8,
    pub relevance: u8,
    pub readability: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMeta {
    pub total_words: usize,
    pub avg_sentence_len: usize,
    pub years: Vec<String>,
}

/// Full ATS report returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8, // 0 – 100
    pub breakdown: ScoreBreakdown,
    pub keyword_gaps: Vec<String>,
    pub highlights: Vec<String>,
    pub issues: Vec<String>,
    pub suggested_edits: Vec<String>,
    pub meta: ScoreMeta,
}
