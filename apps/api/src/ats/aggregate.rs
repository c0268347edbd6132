//! Score aggregation: folds keyword matches and structure signals into the
//! final `ScoreResult`, along with issues and suggested edits.
//!
//! Weights and thresholds are fixed: changing one shifts every historical score.

use std::collections::HashSet;

use crate::ats::models::{
    CandidateTerm, MatchResult, ScoreBreakdown, ScoreMeta, ScoreResult, StructureReport,
};
use crate::ats::structure::SECTION_HEADINGS;

// ────────────────────────────────────────────────────────────────────────────
// Weights and thresholds
// ────────────────────────────────────────────────────────────────────────────

/// Keyword match reported when the job description yields no candidates.
const NEUTRAL_KEYWORD_MATCH: f64 = 50.0;

const KEYWORD_WEIGHT: f64 = 0.4;
const SECTIONS_WEIGHT: f64 = 0.2;
const RELEVANCE_WEIGHT: f64 = 0.3;
const READABILITY_WEIGHT: f64 = 0.1;

const RELEVANCE_KEYWORD_WEIGHT: f64 = 0.7;
const RELEVANCE_YEARS_WEIGHT: f64 = 0.3;
const POINTS_PER_YEAR: usize = 3;
const MAX_YEAR_POINTS: usize = 20;

const IDEAL_SENTENCE_LEN: i64 = 15;
const SENTENCE_LEN_PENALTY: i64 = 4;
const LONG_RESUME_WORDS: usize = 1200;
const WORDS_PER_LENGTH_POINT: f64 = 50.0;
const MAX_LENGTH_PENALTY: i64 = 40;

const MAX_KEYWORD_GAPS: usize = 20;
const MAX_HIGHLIGHTS: usize = 3;
const GAPS_IN_SUGGESTION: usize = 6;

const SHORT_RESUME_WORDS: usize = 200;
const OVERLONG_RESUME_WORDS: usize = 2500;
const MIN_SECTIONS: usize = 2;
const MIN_SECTIONS_FOR_NO_EDIT: usize = 3;
const MAX_SENTENCE_LEN: usize = 30;
const MAX_SENTENCE_LEN_FOR_NO_EDIT: usize = 22;

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Builds the final report.
///
/// Algorithm:
/// 1. keyword_match = matches / candidates × 100 (50 when there are no candidates)
/// 2. sections_format = sections_found / 7 × 100
/// 3. relevance = keyword_match × 0.7 + min(years × 3, 20) × 0.3, capped at 100
/// 4. readability = 100 − |avg_sentence_len − 15| × 4, minus a length penalty past 1200 words
/// 5. score = 0.4 · keyword + 0.2 · sections + 0.3 · relevance + 0.1 · readability
///
/// Total over every input; an all-empty call still yields a well-formed result.
pub fn aggregate(
    candidates: &[CandidateTerm],
    matches: &[MatchResult],
    structure: &StructureReport,
    resume: &str,
) -> ScoreResult {
    let breakdown = compute_breakdown(candidates.len(), matches.len(), structure);

    let score = to_pct(
        f64::from(breakdown.keyword_match) * KEYWORD_WEIGHT
            + f64::from(breakdown.sections_format) * SECTIONS_WEIGHT
            + f64::from(breakdown.relevance) * RELEVANCE_WEIGHT
            + f64::from(breakdown.readability) * READABILITY_WEIGHT,
    );

    let keyword_gaps = keyword_gaps(candidates, matches);
    let highlights = highlights(matches);
    let issues = detect_issues(structure, resume);
    let suggested_edits = suggest_edits(&keyword_gaps, structure);

    ScoreResult {
        score,
        breakdown,
        keyword_gaps,
        highlights,
        issues,
        suggested_edits,
        meta: ScoreMeta {
            total_words: structure.total_words,
            avg_sentence_len: structure.avg_sentence_len,
            years: structure.years.iter().cloned().collect(),
        },
    }
}

fn compute_breakdown(
    candidate_count: usize,
    match_count: usize,
    structure: &StructureReport,
) -> ScoreBreakdown {
    let keyword_match = if candidate_count == 0 {
        to_pct(NEUTRAL_KEYWORD_MATCH)
    } else {
        to_pct(match_count as f64 / candidate_count as f64 * 100.0)
    };

    let sections_format =
        to_pct(structure.sections_found as f64 / SECTION_HEADINGS.len() as f64 * 100.0);

    let year_points = (structure.years.len() * POINTS_PER_YEAR).min(MAX_YEAR_POINTS);
    let relevance_raw = f64::from(keyword_match) * RELEVANCE_KEYWORD_WEIGHT
        + year_points as f64 * RELEVANCE_YEARS_WEIGHT;
    let relevance = to_pct(relevance_raw.min(100.0));

    let readability = readability_pct(structure.avg_sentence_len, structure.total_words);

    ScoreBreakdown {
        keyword_match,
        sections_format,
        relevance,
        readability,
    }
}

fn readability_pct(avg_sentence_len: usize, total_words: usize) -> u8 {
    let deviation = (avg_sentence_len as i64 - IDEAL_SENTENCE_LEN).abs();
    let mut readability = 100 - deviation * SENTENCE_LEN_PENALTY;

    if total_words > LONG_RESUME_WORDS {
        let excess = (total_words - LONG_RESUME_WORDS) as f64 / WORDS_PER_LENGTH_POINT;
        readability -= (excess.round() as i64).min(MAX_LENGTH_PENALTY);
    }

    readability.clamp(0, 100) as u8
}

/// Rounds half away from zero and clamps to 0 – 100.
fn to_pct(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback
// ────────────────────────────────────────────────────────────────────────────

fn keyword_gaps(candidates: &[CandidateTerm], matches: &[MatchResult]) -> Vec<String> {
    let matched: HashSet<&str> = matches.iter().map(|m| m.token.as_str()).collect();
    candidates
        .iter()
        .filter(|c| !matched.contains(c.text.as_str()))
        .take(MAX_KEYWORD_GAPS)
        .map(|c| c.text.clone())
        .collect()
}

/// Top matches by similarity; ties keep candidate order.
fn highlights(matches: &[MatchResult]) -> Vec<String> {
    let mut ranked: Vec<&MatchResult> = matches.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
        .into_iter()
        .take(MAX_HIGHLIGHTS)
        .map(|m| m.token.clone())
        .collect()
}

fn detect_issues(structure: &StructureReport, resume: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if !resume.contains('@') || !resume.contains('.') {
        issues.push("Missing or unclear contact email".to_string());
    }
    if structure.sections_found < MIN_SECTIONS {
        issues.push("Resume missing clear sections".to_string());
    }
    if structure.total_words < SHORT_RESUME_WORDS {
        issues.push("Resume too short".to_string());
    }
    if structure.total_words > OVERLONG_RESUME_WORDS {
        issues.push("Resume too long (aim for 1–2 pages)".to_string());
    }
    if structure.avg_sentence_len > MAX_SENTENCE_LEN {
        issues.push("Sentences too long — use bullet points".to_string());
    }

    issues
}

fn suggest_edits(keyword_gaps: &[String], structure: &StructureReport) -> Vec<String> {
    let mut edits = Vec::new();

    if !keyword_gaps.is_empty() {
        let top: Vec<&str> = keyword_gaps
            .iter()
            .take(GAPS_IN_SUGGESTION)
            .map(String::as_str)
            .collect();
        edits.push(format!("Add keywords: {}", top.join(", ")));
    }
    if structure.sections_found < MIN_SECTIONS_FOR_NO_EDIT {
        edits.push("Add Experience, Education, Skills, Projects sections".to_string());
    }
    if structure.avg_sentence_len > MAX_SENTENCE_LEN_FOR_NO_EDIT {
        edits.push("Shorten sentences; use bullet points".to_string());
    }
    if structure.total_words > LONG_RESUME_WORDS {
        edits.push("Trim resume to 1–2 pages".to_string());
    }

    edits
}
