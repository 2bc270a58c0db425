//! Correction pipeline: tokenization, candidate matching, semantic
//! ranking and formatting-preserving reassembly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::embeddings::WordEmbeddings;
use crate::tokenizer::{SegmentKind, Tokenize};

use self::worker::CorrectionWorker;

pub mod candidate;
mod worker;

pub use self::candidate::Candidate;

/// Configuration for the correction pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Maximum Levenshtein distance for candidate generation.
    pub max_edit_distance: usize,
}

impl CorrectorConfig {
    /// The default configuration: at most two edits per word.
    pub const fn default() -> CorrectorConfig {
        CorrectorConfig {
            max_edit_distance: 2,
        }
    }
}

/// Lexical corrector over a loaded word-embedding model.
///
/// The store is shared read-only state; a corrector performs no
/// internal locking or mutation and may be used from several threads
/// at once.
pub struct Corrector<E: WordEmbeddings> {
    store: Arc<E>,
    config: CorrectorConfig,
}

impl<E: WordEmbeddings> Corrector<E> {
    /// Creates a corrector with the default configuration.
    pub fn new(store: Arc<E>) -> Corrector<E> {
        Corrector::with_config(store, CorrectorConfig::default())
    }

    /// Creates a corrector with an explicit configuration.
    pub fn with_config(store: Arc<E>, config: CorrectorConfig) -> Corrector<E> {
        Corrector { store, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Corrects free text. Word segments run through the per-word
    /// pipeline; whitespace and punctuation are reproduced verbatim in
    /// their original positions.
    pub fn correct(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for segment in text.segments() {
            match segment.kind {
                SegmentKind::Word => out.push_str(&self.correct_word(segment.text)),
                _ => out.push_str(segment.text),
            }
        }
        out
    }

    /// Corrects a single word token, returning the replacement with
    /// the original formatting reapplied.
    pub fn correct_word(&self, token: &str) -> SmolStr {
        CorrectionWorker::new(&*self.store, &self.config).correct(token)
    }
}

/// Corrects `text` against `store` with the given edit-distance bound.
///
/// Convenience for one-off calls; construct a [`Corrector`] when
/// correcting repeatedly against the same model.
pub fn correct<E: WordEmbeddings>(text: &str, store: Arc<E>, max_edit_distance: usize) -> String {
    Corrector::with_config(store, CorrectorConfig { max_edit_distance }).correct(text)
}
