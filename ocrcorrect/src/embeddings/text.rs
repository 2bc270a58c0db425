//! Loader for word-vector models in the textual format: an optional
//! `count dims` header line followed by one `word v1 .. vn` record per
//! line, whitespace-separated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::{EmbeddingError, EmbeddingStore};

/// Loads a textual word-vector model from `path`.
pub fn load(path: &Path) -> Result<EmbeddingStore, EmbeddingError> {
    let file = File::open(path)?;
    from_reader(BufReader::new(file))
}

/// Loads a textual word-vector model from any buffered reader.
pub fn from_reader<R: BufRead>(reader: R) -> Result<EmbeddingStore, EmbeddingError> {
    let mut store: Option<EmbeddingStore> = None;
    let mut vector = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim_end();

        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let word = match fields.next() {
            Some(word) => word,
            None => continue,
        };

        vector.clear();
        for field in fields {
            let value = field.parse::<f32>().map_err(|_| EmbeddingError::Parse {
                line: line_no,
                reason: format!("{:?} is not a vector component", field),
            })?;
            vector.push(value);
        }

        if store.is_none() {
            // A leading `count dims` pair is a header, not a record.
            if vector.len() == 1 && word.parse::<u64>().is_ok() {
                debug!(
                    "model header: {} words, {} dimensions",
                    word, vector[0] as u64
                );
                continue;
            }
            if vector.is_empty() {
                return Err(EmbeddingError::Parse {
                    line: line_no,
                    reason: "record has no vector components".into(),
                });
            }
            store = Some(EmbeddingStore::new(vector.len()));
        }

        if let Some(store) = store.as_mut() {
            store.insert(word, &vector)?;
        }
    }

    match store {
        Some(store) if !store.is_empty() => Ok(store),
        _ => Err(EmbeddingError::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::WordEmbeddings;

    #[test]
    fn parses_plain_records() {
        let model = "paris 1.0 0.0\nlondon 0.0 1.0\n";
        let store = from_reader(model.as_bytes()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.dims(), 2);
        assert_eq!(store.vector("paris"), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn skips_word2vec_header() {
        let model = "2 3\nparis 1.0 0.0 0.5\nlondon 0.0 1.0 0.5\n";
        let store = from_reader(model.as_bytes()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.dims(), 3);
        assert!(!store.has("2"));
    }

    #[test]
    fn rejects_non_numeric_component() {
        let model = "paris 1.0 oops\n";
        let err = from_reader(model.as_bytes()).unwrap_err();
        assert!(matches!(err, EmbeddingError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let model = "paris 1.0 0.0\nlondon 0.0\n";
        let err = from_reader(model.as_bytes()).unwrap_err();
        assert!(matches!(err, EmbeddingError::DimensionMismatch { .. }));
    }

    #[test]
    fn rejects_empty_model() {
        let err = from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, EmbeddingError::Empty));

        let err = from_reader("5 100\n".as_bytes()).unwrap_err();
        assert!(matches!(err, EmbeddingError::Empty));
    }
}
