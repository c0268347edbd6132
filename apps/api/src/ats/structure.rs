//! Section/structure analysis of resume text.

use indexmap::IndexSet;

use crate::ats::models::StructureReport;

/// Headings a well-formed resume is expected to carry.
pub const SECTION_HEADINGS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "summary",
    "certifications",
    "contact",
];

/// Computes section presence, word and sentence statistics, and year mentions.
/// Expects normalized, lowercased text.
pub fn analyze_structure(resume: &str) -> StructureReport {
    // Plain substring checks: "skillset" counts as "skills".
    let sections_found = SECTION_HEADINGS
        .iter()
        .filter(|heading| resume.contains(*heading))
        .count();

    let total_words = resume.split_whitespace().count();
    let sentences = count_sentences(resume);
    let avg_sentence_len = if sentences == 0 {
        0
    } else {
        (total_words as f64 / sentences as f64).round() as usize
    };

    StructureReport {
        sections_found,
        total_words,
        avg_sentence_len,
        years: extract_years(resume),
    }
}

/// Counts non-empty pieces left after splitting on `.`, `?` or `!` followed by whitespace.
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut piece_len = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let ends_sentence = matches!(ch, '.' | '?' | '!')
            && chars.peek().is_some_and(|next| next.is_whitespace());

        if ends_sentence {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            if piece_len > 0 {
                count += 1;
            }
            piece_len = 0;
        } else {
            piece_len += 1;
        }
    }

    if piece_len > 0 {
        count += 1;
    }
    count
}

/// Left-to-right, non-overlapping scan for `19dd` / `20dd`. No word boundaries
/// are required, so digits embedded in longer numbers still count.
fn extract_years(text: &str) -> IndexSet<String> {
    let bytes = text.as_bytes();
    let mut years = IndexSet::new();
    let mut i = 0;

    while i + 4 <= bytes.len() {
        let window = &bytes[i..i + 4];
        let century = &window[..2] == b"19" || &window[..2] == b"20";
        if century && window[2].is_ascii_digit() && window[3].is_ascii_digit() {
            // all four bytes are ASCII digits, so this slice is on char boundaries
            years.insert(text[i..i + 4].to_string());
            i += 4;
        } else {
            i += 1;
        }
    }

    years
}
