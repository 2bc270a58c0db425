//! Candidate replacements surfaced by edit-distance matching.

use std::cmp::Ordering;
use std::cmp::Ordering::Equal;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::embeddings::WordEmbeddings;

/// A vocabulary word within edit distance of a misread token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate word-form.
    pub value: SmolStr,
    /// Levenshtein distance to the normalized target.
    pub distance: usize,
}

impl Candidate {
    /// Creates a candidate replacement.
    pub fn new(value: SmolStr, distance: usize) -> Candidate {
        Candidate { value, distance }
    }

    /// Gets the candidate word-form.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Gets the edit distance to the target.
    pub fn distance(&self) -> usize {
        self.distance
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        let x = self.distance.cmp(&other.distance);

        if let Equal = x {
            return self.value.cmp(&other.value);
        }

        x
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.distance == other.distance
    }
}

impl Eq for Candidate {}

/// Levenshtein distance between `a` and `b` when it does not exceed
/// `max`. The length difference is checked first so most of the
/// vocabulary is rejected without running the full computation.
pub fn bounded_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len.abs_diff(b_len) > max {
        return None;
    }

    let distance = strsim::levenshtein(a, b);
    if distance <= max {
        Some(distance)
    } else {
        None
    }
}

/// Scans the vocabulary of `store` for words within `max` edits of
/// `key`, sorted ascending by distance (ties by word).
pub fn generate<E: WordEmbeddings + ?Sized>(store: &E, key: &str, max: usize) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = store
        .words()
        .iter()
        .filter_map(|word| bounded_distance(key, word, max).map(|d| Candidate::new(word.clone(), d)))
        .collect();
    candidates.sort();
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::EmbeddingStore;

    #[test]
    fn bounded_distance_basics() {
        assert_eq!(bounded_distance("test", "test", 2), Some(0));
        assert_eq!(bounded_distance("tst", "test", 2), Some(1));
        assert_eq!(bounded_distance("knonw", "known", 2), Some(2));
        assert_eq!(bounded_distance("kitten", "sitting", 2), None);
        assert_eq!(bounded_distance("kitten", "sitting", 3), Some(3));
    }

    #[test]
    fn length_window_rejects_early() {
        assert_eq!(bounded_distance("a", "abcdef", 2), None);
        assert_eq!(bounded_distance("abcdef", "a", 2), None);
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(bounded_distance("caffè", "caffe", 2), Some(1));
    }

    #[test]
    fn generation_sorts_by_distance_then_word() {
        let mut store = EmbeddingStore::new(1);
        for word in ["tests", "test", "text", "zebra"] {
            store.insert(word, &[1.0]).unwrap();
        }

        let candidates = generate(&store, "tst", 2);
        let ranked: Vec<(&str, usize)> = candidates
            .iter()
            .map(|c| (c.value(), c.distance()))
            .collect();
        assert_eq!(ranked, vec![("test", 1), ("tests", 2), ("text", 2)]);
    }

    #[test]
    fn generation_respects_bound() {
        let mut store = EmbeddingStore::new(1);
        store.insert("completely", &[1.0]).unwrap();
        assert!(generate(&store, "tst", 2).is_empty());
    }
}
