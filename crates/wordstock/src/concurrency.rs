//! # Chunked Parallelism
//!
//! Order-preserving chunk maps, run on ``rayon`` when the feature is enabled
//! and sequentially otherwise.

use std::thread;

/// The search list of environment variables that Rayon uses to control parallelism.
#[cfg(feature = "rayon")]
const RAYON_VARS: &[&str] = &["RAYON_NUM_THREADS", "RAYON_RS_NUM_CPUS"];

/// Get the max parallelism available.
///
/// When `rayon` is enabled, will scan over `RAYON_VARS`.
pub fn est_max_parallelism() -> usize {
    let default = || {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    };

    #[cfg(feature = "rayon")]
    for name in RAYON_VARS {
        if let Some(x @ 1..) = std::env::var(name).ok().and_then(|s| s.parse::<usize>().ok()) {
            return x;
        }
    }

    default()
}

/// The chunk length which splits `len` items into at most `num_chunks` chunks.
pub fn chunk_len(
    len: usize,
    num_chunks: usize,
) -> usize {
    len.div_ceil(num_chunks.max(1)).max(1)
}

/// Map `f` over `num_chunks` contiguous chunks of `items`.
///
/// ## Arguments
/// * `items` - the items to split.
/// * `num_chunks` - the target chunk count; `<= 1` runs a single chunk.
/// * `f` - called with the offset of the chunk in `items`, and the chunk.
///
/// ## Returns
/// One result per chunk, in chunk order.
pub fn map_chunks<T, R, F>(
    items: &[T],
    num_chunks: usize,
    f: F,
) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &[T]) -> R + Send + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }
    let size = chunk_len(items.len(), num_chunks);

    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            if num_chunks > 1 {
                return items
                    .par_chunks(size)
                    .enumerate()
                    .map(|(idx, chunk)| f(idx * size, chunk))
                    .collect();
            }
        }
    }

    items
        .chunks(size)
        .enumerate()
        .map(|(idx, chunk)| f(idx * size, chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_len() {
        assert_eq!(chunk_len(10, 3), 4);
        assert_eq!(chunk_len(10, 0), 10);
        assert_eq!(chunk_len(0, 4), 1);
        assert_eq!(chunk_len(3, 8), 1);
    }

    #[test]
    fn test_map_chunks_keeps_order() {
        let items: Vec<usize> = (0..103).collect();
        for num_chunks in [0, 1, 2, 7, 200] {
            let sums = map_chunks(&items, num_chunks, |offset, chunk| {
                assert_eq!(chunk[0], offset);
                chunk.to_vec()
            });
            assert_eq!(sums.concat(), items);
        }
        assert!(map_chunks(&[] as &[u8], 4, |_, c| c.len()).is_empty());
    }

    #[test]
    fn test_est_max_parallelism() {
        assert!(est_max_parallelism() >= 1);
    }
}
