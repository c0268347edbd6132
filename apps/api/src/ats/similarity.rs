//! String similarity used by the fuzzy matcher.
//!
//! Scores depend on the exact metric, so it is a fixed parameter of the engine.
//! The trait exists for tests and for swapping the metric deliberately.

use std::collections::HashMap;

/// Similarity between two strings, in the range 0.0 – 1.0.
pub trait Similarity: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> f64;
}

/// Sørensen–Dice coefficient over character bigrams, whitespace ignored.
///
/// Identical strings score 1.0; anything shorter than two chars scores 0.0.
/// Linear in input length (bigram multiset), so pairwise matching stays cheap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SorensenDice;

impl Similarity for SorensenDice {
    fn compare(&self, a: &str, b: &str) -> f64 {
        // strsim measures lengths in bytes, which equals chars only for ASCII
        if a.is_ascii() && b.is_ascii() {
            strsim::sorensen_dice(a, b)
        } else {
            char_bigram_dice(a, b)
        }
    }
}

/// Dice over `char` bigrams: `2·|shared| / (bigrams(a) + bigrams(b))`.
fn char_bigram_dice(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().filter(|ch| !ch.is_whitespace()).collect();
    let b: Vec<char> = b.chars().filter(|ch| !ch.is_whitespace()).collect();

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / (a.len() + b.len() - 2) as f64
}
