use crate::ats::models::{CandidateTerm, MatchResult};
use crate::ats::similarity::Similarity;

/// A candidate counts as matched only when its best similarity is strictly above this.
pub const MATCH_THRESHOLD: f64 = 0.55;

/// Splits resume text into match units.
///
/// Splitting on runs of one to four whitespace chars and dropping the empty
/// pieces that longer runs leave behind is the same as whitespace tokenization.
fn resume_chunks(resume: &str) -> Vec<&str> {
    resume.split_whitespace().collect()
}

/// Finds, for every candidate, the best-scoring resume chunk and keeps the
/// candidates whose best score clears [`MATCH_THRESHOLD`].
///
/// Cost is `candidates × chunks` similarity calls. Output preserves candidate order.
pub fn match_candidates<S>(
    candidates: &[CandidateTerm],
    resume: &str,
    similarity: &S,
) -> Vec<MatchResult>
where
    S: Similarity + ?Sized,
{
    let chunks = resume_chunks(resume);
    if chunks.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter_map(|candidate| {
            let best = chunks
                .iter()
                .map(|chunk| similarity.compare(&candidate.text, chunk))
                .fold(0.0_f64, f64::max);

            (best > MATCH_THRESHOLD).then(|| MatchResult {
                token: candidate.text.clone(),
                score: best,
            })
        })
        .collect()
}
