//! # Chunked Allocation
//!
//! Memory is allocated in fixed-size chunks, so a large request does not
//! need a single contiguous mapping, and a failure is detected close to the
//! actual limit. Every chunk is filled with a non-zero byte, forcing the
//! kernel to back it with physical pages.

use crate::Error;

/// Default chunk size, 1 MiB.
pub const CHUNK: usize = 1 << 20;

/// Allocated memory, released on drop.
#[derive(Debug)]
pub struct Meal {
    chunks: Vec<Vec<u8>>,
}

/// Allocate `total` bytes in chunks of at most `chunk` bytes.
///
/// The last chunk is shortened to match `total` exactly.
pub fn eat(total: usize, chunk: usize) -> Result<Meal, Error> {
    let chunk = chunk.max(1);
    let mut chunks: Vec<Vec<u8>> = Vec::new();
    let mut allocated = 0;

    chunks
        .try_reserve_exact(total.div_ceil(chunk))
        .map_err(|_| Error::Exhausted(0))?;

    while allocated < total {
        let n = chunk.min(total - allocated);
        let mut buffer = Vec::new();

        buffer.try_reserve_exact(n).map_err(|_| Error::Exhausted(allocated))?;
        buffer.resize(n, 1u8);
        chunks.push(buffer);
        allocated += n;

        tracing::trace!(allocated, total, "chunk allocated");
    }

    tracing::debug!(chunks = chunks.len(), bytes = allocated, "allocation complete");

    Ok(Meal {
        chunks: chunks,
    })
}

impl Meal {
    /// Yield the number of bytes held.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(|v| v.len()).sum()
    }

    /// Check whether no memory is held.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Yield the number of chunks held.
    pub fn chunks(&self) -> usize {
        self.chunks.len()
    }
}
