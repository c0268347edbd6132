//! Keyword/phrase extraction from a job description.
//!
//! Tokenization is hand-rolled over ASCII character classes: a word char is
//! `[A-Za-z0-9_]`. Anything else (accented letters included) acts as a
//! separator, so candidate terms are always ASCII.

use indexmap::IndexSet;

use crate::ats::models::CandidateTerm;

/// Upper bound on candidate terms; caps the pairwise matching cost.
pub const MAX_CANDIDATES: usize = 40;
const MIN_UNIGRAM_LEN: usize = 4;
const MIN_BIGRAM_WORD_LEN: usize = 3;

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Unigrams (first-seen order, length > 3) followed by adjacent-word bigrams
/// (scan order, both words length > 2), deduplicated and capped at
/// [`MAX_CANDIDATES`]. Expects normalized, lowercased text.
pub fn extract_candidates(job_description: &str) -> Vec<CandidateTerm> {
    let mut seen: IndexSet<String> = IndexSet::new();
    let mut terms = Vec::new();

    let stripped: String = job_description
        .chars()
        .map(|ch| {
            if is_word_char(ch) || ch.is_whitespace() || ch == '-' {
                ch
            } else {
                ' '
            }
        })
        .collect();

    for token in stripped.split_whitespace() {
        if token.len() >= MIN_UNIGRAM_LEN && seen.insert(token.to_string()) {
            terms.push(CandidateTerm::unigram(token));
        }
    }

    let parts: Vec<String> = job_description
        .split_whitespace()
        .map(|part| part.chars().filter(|ch| is_word_char(*ch)).collect())
        .collect();

    for pair in parts.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        if first.len() < MIN_BIGRAM_WORD_LEN || second.len() < MIN_BIGRAM_WORD_LEN {
            continue;
        }
        let term = CandidateTerm::bigram(first, second);
        if seen.insert(term.text.clone()) {
            terms.push(term);
        }
    }

    terms.truncate(MAX_CANDIDATES);
    terms
}
