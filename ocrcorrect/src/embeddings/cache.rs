//! Binary cache form of an embedding model, for fast session reload.
//!
//! Layout: 8-byte magic, `u32` version, `u32` dimensionality, `u32`
//! word count, the length-prefixed UTF-8 words, then the full vector
//! table as little-endian `f32`. Reads go through a memory map.

use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;

use super::{EmbeddingError, EmbeddingStore};

/// Leading bytes identifying a cache file.
pub const MAGIC: &[u8; 8] = b"ocrvecs\0";

const VERSION: u32 = 1;

/// Writes the cache form of `store` to `path`.
pub fn write(store: &EmbeddingStore, path: &Path) -> Result<(), EmbeddingError> {
    let mut writer = BufWriter::new(File::create(path)?);

    let dims = u32::try_from(store.dims)
        .map_err(|_| EmbeddingError::CacheLimit("too many dimensions"))?;
    let count = u32::try_from(store.words.len())
        .map_err(|_| EmbeddingError::CacheLimit("too many words"))?;

    writer.write_all(MAGIC)?;
    writer.write_u32::<LittleEndian>(VERSION)?;
    writer.write_u32::<LittleEndian>(dims)?;
    writer.write_u32::<LittleEndian>(count)?;

    for word in &store.words {
        let bytes = word.as_bytes();
        let len = u16::try_from(bytes.len())
            .map_err(|_| EmbeddingError::CacheLimit("word longer than 65535 bytes"))?;
        writer.write_u16::<LittleEndian>(len)?;
        writer.write_all(bytes)?;
    }

    for value in &store.vectors {
        writer.write_f32::<LittleEndian>(*value)?;
    }

    writer.flush()?;
    Ok(())
}

/// Loads a cache file from `path`.
pub fn load(path: &Path) -> Result<EmbeddingStore, EmbeddingError> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    from_bytes(&mmap)
}

fn from_bytes(data: &[u8]) -> Result<EmbeddingStore, EmbeddingError> {
    let mut cursor = Cursor::new(data);

    let mut magic = [0u8; MAGIC.len()];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| EmbeddingError::BadCache("missing magic"))?;
    if &magic != MAGIC {
        return Err(EmbeddingError::BadCache("bad magic"));
    }

    let version = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| EmbeddingError::BadCache("missing version"))?;
    if version != VERSION {
        return Err(EmbeddingError::BadCache("unsupported version"));
    }

    let dims = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| EmbeddingError::BadCache("missing dimensionality"))? as usize;
    let count = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| EmbeddingError::BadCache("missing word count"))? as usize;

    if count == 0 {
        return Err(EmbeddingError::Empty);
    }

    let mut store = EmbeddingStore::new(dims);
    let mut word_buf = Vec::new();
    let mut words = Vec::with_capacity(count);

    for _ in 0..count {
        let len = cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| EmbeddingError::BadCache("truncated word table"))?
            as usize;
        word_buf.resize(len, 0);
        cursor
            .read_exact(&mut word_buf)
            .map_err(|_| EmbeddingError::BadCache("truncated word table"))?;
        let word = std::str::from_utf8(&word_buf)
            .map_err(|_| EmbeddingError::BadCache("word is not valid UTF-8"))?;
        words.push(word.to_string());
    }

    let mut vector = vec![0f32; dims];
    for word in &words {
        cursor
            .read_f32_into::<LittleEndian>(&mut vector)
            .map_err(|_| EmbeddingError::BadCache("truncated vector table"))?;
        store.insert(word, &vector)?;
    }

    Ok(store)
}
