//! Round-robin chunking.

use std::iter::FusedIterator;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("chunk size must be greater than zero")]
    ZeroSize,
}

/// Lazy iterator over interleaved chunks of a slice.
///
/// Chunk `i` holds `items[i]`, `items[i + count]`, `items[i + 2 * count]`, ...
#[derive(Debug, Clone)]
pub struct Chunks<'a, T> {
    items: &'a [T],
    count: usize,
    next: usize,
}

impl<'a, T: Clone> Iterator for Chunks<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let start = self.next;
        self.next += 1;
        Some(self.items.iter().skip(start).step_by(self.count).cloned().collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Chunks<'_, T> {}

impl<T: Clone> FusedIterator for Chunks<'_, T> {}

/// Split `items` into `ceil(len / size)` interleaved chunks of at most `size`
/// elements each. Returns the chunks and their count.
pub fn chunkify<T: Clone>(items: &[T], size: usize) -> Result<(Chunks<'_, T>, usize), ChunkError> {
    if size == 0 {
        return Err(ChunkError::ZeroSize);
    }
    let count = items.len().div_ceil(size);
    Ok((Chunks { items, count, next: 0 }, count))
}
