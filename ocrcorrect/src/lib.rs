/*! OCR post-correction with word embeddings.

Implements lexical correction of OCR output against a pre-trained
word-embedding model: misread words are matched against the model
vocabulary by Levenshtein distance, the surviving candidates are ranked
by cosine similarity in embedding space, and the chosen replacement is
written back with the casing and hyphenation of the original token.
Everything that is not a word (whitespace, digits, punctuation) passes
through the pipeline verbatim.

# Usage example

```no_run
use std::path::Path;
use std::sync::Arc;

use ocrcorrect::corrector::Corrector;
use ocrcorrect::embeddings::EmbeddingStore;

let store = Arc::new(EmbeddingStore::load(Path::new("model.vec"))?);
let corrector = Corrector::new(store);
let fixed = corrector.correct("Thiss is a tst.");
# Ok::<(), ocrcorrect::embeddings::EmbeddingError>(())
```

Further examples of how to use the library can be found in
`ocrcorrect-bin` in the same repository.
*/

#![warn(missing_docs)]

pub mod corrector;
pub mod embeddings;
pub mod tokenizer;
