//! ATS scoring engine: matches a resume against a job description and
//! produces a weighted compatibility score with feedback.
//!
//! Pipeline: normalize → extract candidates → fuzzy match → analyze structure → aggregate.
//! Every stage is a pure function; no state survives a call.
//!
//! `AppState` holds an `Arc<dyn AtsScorer>`; `FuzzyAtsScorer` is the default.

pub mod aggregate;
pub mod candidates;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod similarity;
pub mod structure;

use tracing::debug;

use crate::ats::aggregate::aggregate;
use crate::ats::candidates::extract_candidates;
use crate::ats::matcher::match_candidates;
use crate::ats::models::{ScoreResult, TermOrigin};
use crate::ats::normalize::normalize;
use crate::ats::similarity::{Similarity, SorensenDice};
use crate::ats::structure::analyze_structure;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores resume text against job-description text.
///
/// Implementations must be total: any pair of strings, empty ones included,
/// yields a well-formed `ScoreResult`.
pub trait AtsScorer: Send + Sync {
    fn score(&self, resume_text: &str, job_description: &str) -> ScoreResult;
}

// ────────────────────────────────────────────────────────────────────────────
// FuzzyAtsScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Local keyword scorer: fuzzy-matches job-description terms against resume chunks.
#[derive(Debug, Clone, Default)]
pub struct FuzzyAtsScorer<S = SorensenDice> {
    similarity: S,
}

impl FuzzyAtsScorer {
    pub fn new() -> Self {
        Self::with_similarity(SorensenDice)
    }
}

impl<S: Similarity> FuzzyAtsScorer<S> {
    pub fn with_similarity(similarity: S) -> Self {
        Self { similarity }
    }
}

impl<S: Similarity> AtsScorer for FuzzyAtsScorer<S> {
    fn score(&self, resume_text: &str, job_description: &str) -> ScoreResult {
        score_with(resume_text, job_description, &self.similarity)
    }
}

/// Scores with the default Sørensen–Dice similarity.
#[cfg(test)]
pub fn score_resume(resume_text: &str, job_description: &str) -> ScoreResult {
    score_with(resume_text, job_description, &SorensenDice)
}

fn score_with<S>(resume_text: &str, job_description: &str, similarity: &S) -> ScoreResult
where
    S: Similarity + ?Sized,
{
    let resume = normalize(resume_text).to_lowercase();
    let job = normalize(job_description).to_lowercase();

    let candidates = extract_candidates(&job);
    let matches = match_candidates(&candidates, &resume, similarity);
    let structure = analyze_structure(&resume);
    let result = aggregate(&candidates, &matches, &structure, &resume);

    let bigrams = candidates
        .iter()
        .filter(|c| c.origin == TermOrigin::Bigram)
        .count();
    debug!(
        candidates = candidates.len(),
        bigrams,
        matches = matches.len(),
        sections = structure.sections_found,
        words = structure.total_words,
        score = result.score,
        "Scored resume"
    );

    result
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
