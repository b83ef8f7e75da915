//! Order-preserving partitioning of call lists into ledger-safe chunks.

/// Errors produced while splitting a list into chunks.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChunkError {
    /// The requested chunk size cannot produce a terminating split.
    #[error("invalid chunk size: {0}")]
    InvalidChunkSize(usize),
}

/// Splits `items` into consecutive chunks of at most `chunk_size` elements.
///
/// Input order is preserved and every chunk is full except possibly the
/// last. An empty input yields an empty output. A zero chunk size is
/// rejected rather than looping forever.
pub fn split_into_chunks<T>(
    items: Vec<T>,
    chunk_size: usize,
) -> Result<Vec<Vec<T>>, ChunkError> {
    if chunk_size == 0 {
        return Err(ChunkError::InvalidChunkSize(chunk_size));
    }

    let mut chunks = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut current = Vec::with_capacity(chunk_size.min(items.len()));

    for item in items {
        current.push(item);
        if current.len() == chunk_size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_with_short_tail() {
        let chunks = split_into_chunks((0..250).collect(), 100).unwrap();
        assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), [100, 100, 50]);
        assert_eq!(chunks.concat(), (0..250).collect::<Vec<_>>());
    }

    #[test]
    fn splits_evenly_divisible_input() {
        let chunks = split_into_chunks((0..300).collect(), 100).unwrap();
        assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), [100, 100, 100]);
    }

    #[test]
    fn input_shorter_than_chunk_size() {
        let chunks = split_into_chunks(vec![1, 2, 3], 100).unwrap();
        assert_eq!(chunks, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert_eq!(split_into_chunks(Vec::<u8>::new(), 7).unwrap(), Vec::<Vec<u8>>::new());
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert_eq!(
            split_into_chunks(vec![1, 2, 3], 0),
            Err(ChunkError::InvalidChunkSize(0))
        );
    }

    #[test]
    fn splitting_is_idempotent_for_a_fixed_size() {
        let original: Vec<u32> = (0..123).collect();
        let once = split_into_chunks(original.clone(), 10).unwrap();
        let again = split_into_chunks(once.concat(), 10).unwrap();
        assert_eq!(once, again);
        assert_eq!(again.concat(), original);
    }
}
