//! Per-word correction pipeline.

use log::debug;
use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;

use super::candidate::{self, Candidate};
use super::CorrectorConfig;
use crate::embeddings::{cosine_similarity, WordEmbeddings};
use crate::tokenizer::case_handling::preserve_formatting;

/// Lowercase, letters-only form of a token, used for vocabulary lookup.
pub(crate) fn normalize(token: &str) -> SmolStr {
    token
        .chars()
        .filter(|&c| GeneralCategory::of(c).is_letter())
        .flat_map(char::to_lowercase)
        .collect::<SmolStr>()
}

pub(crate) struct CorrectionWorker<'a, E: WordEmbeddings + ?Sized> {
    store: &'a E,
    config: &'a CorrectorConfig,
}

impl<'a, E: WordEmbeddings + ?Sized> CorrectionWorker<'a, E> {
    pub(crate) fn new(store: &'a E, config: &'a CorrectorConfig) -> CorrectionWorker<'a, E> {
        CorrectionWorker { store, config }
    }

    /// Corrects a single WORD token. Hyphenated tokens are corrected
    /// one half at a time and rejoined, so that a vocabulary knowing
    /// only the halves can still fix a compound.
    pub(crate) fn correct(&self, token: &str) -> SmolStr {
        match token.split_once('-') {
            Some((left, right)) => {
                let mut out = String::with_capacity(token.len());
                out.push_str(&self.correct_part(left));
                out.push('-');
                out.push_str(&self.correct_part(right));
                SmolStr::from(out)
            }
            None => self.correct_part(token),
        }
    }

    fn correct_part(&self, token: &str) -> SmolStr {
        let normalized = normalize(token);
        if normalized.is_empty() {
            return token.into();
        }

        if self.store.has(&normalized) {
            return preserve_formatting(token, &normalized);
        }

        let candidates =
            candidate::generate(self.store, &normalized, self.config.max_edit_distance);
        if !candidates.is_empty() {
            let best = self.best_semantic_match(&normalized, &candidates);
            return preserve_formatting(token, best);
        }

        if let Some(nearest) = self.nearest_neighbour(&normalized) {
            return preserve_formatting(token, &nearest);
        }

        debug!("no replacement for {:?}, keeping original", token);
        token.into()
    }

    /// Picks the candidate whose vector lies closest to the target
    /// vector. Without a target vector there is no similarity signal
    /// and the lowest-distance candidate wins; candidates without a
    /// vector, or with an undefined cosine, are skipped.
    fn best_semantic_match<'c>(&self, key: &str, candidates: &'c [Candidate]) -> &'c str {
        let target = match self.store.vector(key) {
            Some(vector) => vector,
            None => return candidates[0].value(),
        };

        let mut best = candidates[0].value();
        let mut best_similarity = -1f32;

        for candidate in candidates {
            let vector = match self.store.vector(candidate.value()) {
                Some(vector) => vector,
                None => continue,
            };
            let similarity = match cosine_similarity(target, vector) {
                Some(similarity) => similarity,
                None => continue,
            };
            if similarity > best_similarity {
                best_similarity = similarity;
                best = candidate.value();
            }
        }

        best
    }

    /// Full vocabulary scan by cosine similarity, used when no
    /// candidate survives the edit-distance filter but the target
    /// itself has a vector. Ties keep the earliest vocabulary word.
    fn nearest_neighbour(&self, key: &str) -> Option<SmolStr> {
        let target = self.store.vector(key)?;
        let mut best: Option<(&SmolStr, f32)> = None;

        for word in self.store.words() {
            let vector = match self.store.vector(word) {
                Some(vector) => vector,
                None => continue,
            };
            let similarity = match cosine_similarity(target, vector) {
                Some(similarity) => similarity,
                None => continue,
            };
            match best {
                Some((_, current)) if current >= similarity => {}
                _ => best = Some((word, similarity)),
            }
        }

        best.map(|(word, _)| word.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_non_letters_and_lowercases() {
        assert_eq!(normalize("Pariss"), "pariss");
        assert_eq!(normalize("well-knonw"), "wellknonw");
        assert_eq!(normalize("PARIS9!"), "paris");
        assert_eq!(normalize("ÉTÉ"), "été");
        assert_eq!(normalize("1234"), "");
    }
}
