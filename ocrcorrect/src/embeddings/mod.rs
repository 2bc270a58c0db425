//! Word-embedding storage: vocabulary membership, vector lookup and
//! cosine similarity.

use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;
use log::warn;
use smol_str::SmolStr;

pub mod cache;
pub mod error;
pub mod text;

pub use self::error::EmbeddingError;

/// Read-only view over a loaded word-embedding model.
///
/// This is the seam between the correction pipeline and whatever holds
/// the vectors. `has` answers vocabulary membership (a word counting as
/// correctly spelled), `vector` answers whether a word has an embedding;
/// for [`EmbeddingStore`] the two coincide, but implementations backed
/// by models with separate lexicon and vector tables may answer them
/// differently.
pub trait WordEmbeddings {
    /// Whether `word` is part of the model vocabulary.
    fn has(&self, word: &str) -> bool;

    /// The embedding vector for `word`, if the model has one.
    fn vector(&self, word: &str) -> Option<&[f32]>;

    /// All vocabulary words, in a stable order.
    fn words(&self) -> &[SmolStr];

    /// Dimensionality shared by every vector in the model.
    fn dims(&self) -> usize;
}

/// In-memory word-embedding model.
///
/// Words are kept in file order next to a flat `f32` table, so that
/// vocabulary scans are deterministic and vector lookup is a single
/// index computation.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    dims: usize,
    words: Vec<SmolStr>,
    index: HashMap<SmolStr, u32>,
    vectors: Vec<f32>,
}

impl EmbeddingStore {
    /// Creates an empty store for vectors of `dims` dimensions.
    pub fn new(dims: usize) -> EmbeddingStore {
        EmbeddingStore {
            dims,
            words: Vec::new(),
            index: HashMap::new(),
            vectors: Vec::new(),
        }
    }

    /// Loads a model from `path`, accepting either the textual
    /// word-vector format or the binary cache written by
    /// [`EmbeddingStore::write_cache`]. The format is sniffed from the
    /// leading bytes of the file.
    pub fn load(path: &Path) -> Result<EmbeddingStore, EmbeddingError> {
        let mut file = std::fs::File::open(path)?;
        let mut leading = [0u8; cache::MAGIC.len()];
        let n = file.read(&mut leading)?;
        drop(file);

        if n == leading.len() && &leading == cache::MAGIC {
            cache::load(path)
        } else {
            text::load(path)
        }
    }

    /// Writes the binary cache form of this store to `path`.
    pub fn write_cache(&self, path: &Path) -> Result<(), EmbeddingError> {
        cache::write(self, path)
    }

    /// Adds a word and its vector. The first occurrence of a duplicate
    /// word wins; the vector must match the store dimensionality.
    pub fn insert(&mut self, word: &str, vector: &[f32]) -> Result<(), EmbeddingError> {
        if vector.len() != self.dims {
            return Err(EmbeddingError::DimensionMismatch {
                word: SmolStr::new(word),
                expected: self.dims,
                found: vector.len(),
            });
        }

        let word = SmolStr::new(word);
        if self.index.contains_key(&word) {
            warn!("duplicate vocabulary word {:?}; keeping first vector", word);
            return Ok(());
        }

        self.index.insert(word.clone(), self.words.len() as u32);
        self.words.push(word);
        self.vectors.extend_from_slice(vector);
        Ok(())
    }

    /// Number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordEmbeddings for EmbeddingStore {
    #[inline]
    fn has(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        let index = *self.index.get(word)? as usize;
        Some(&self.vectors[index * self.dims..(index + 1) * self.dims])
    }

    #[inline]
    fn words(&self) -> &[SmolStr] {
        &self.words
    }

    #[inline]
    fn dims(&self) -> usize {
        self.dims
    }
}

/// Cosine similarity of two vectors, in `[-1, 1]`.
///
/// Returns `None` when the vectors differ in length or either has zero
/// magnitude, where the similarity is undefined.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }

    let mut dot = 0f32;
    let mut norm_a = 0f32;
    let mut norm_b = 0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_lookup() {
        let mut store = EmbeddingStore::new(3);
        store.insert("paris", &[1.0, 0.0, 0.0]).unwrap();
        store.insert("london", &[0.0, 1.0, 0.0]).unwrap();

        assert!(store.has("paris"));
        assert!(!store.has("rome"));
        assert_eq!(store.vector("london"), Some(&[0.0, 1.0, 0.0][..]));
        assert_eq!(store.vector("rome"), None);
        assert_eq!(store.len(), 2);
        assert_eq!(store.dims(), 3);
    }

    #[test]
    fn store_preserves_insertion_order() {
        let mut store = EmbeddingStore::new(1);
        for word in ["zebra", "apple", "mango"] {
            store.insert(word, &[1.0]).unwrap();
        }

        let words: Vec<&str> = store.words().iter().map(|w| w.as_str()).collect();
        assert_eq!(words, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn duplicate_word_keeps_first_vector() {
        let mut store = EmbeddingStore::new(1);
        store.insert("word", &[1.0]).unwrap();
        store.insert("word", &[2.0]).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.vector("word"), Some(&[1.0][..]));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let mut store = EmbeddingStore::new(2);
        let err = store.insert("word", &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn cosine_basics() {
        let similarity = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        assert!((similarity - 1.0).abs() < 1e-6);

        let similarity = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(similarity.abs() < 1e-6);

        let similarity = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((similarity + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_undefined_cases() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), None);
    }
}
