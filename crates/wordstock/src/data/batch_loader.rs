//! # Batch Loader

use crate::errors::{WSResult, WordstockError};

/// Splits items into fixed-size batches and collates them on a worker pool.
///
/// With the `rayon` feature, batches are collated on a dedicated pool of
/// `num_workers` threads; `num_workers == 0` collates on the calling thread.
/// Results are always returned in batch order.
#[derive(Debug)]
pub struct BatchLoader {
    batch_size: usize,
    num_workers: usize,

    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
}

impl BatchLoader {
    /// Create a loader.
    ///
    /// ## Arguments
    /// * `batch_size` - items per batch; the last batch may be short.
    /// * `num_workers` - collation threads; `0` uses the calling thread.
    ///
    /// ## Errors
    /// `InvalidValue` if `batch_size` is zero, or the pool cannot be built.
    pub fn new(
        batch_size: usize,
        num_workers: usize,
    ) -> WSResult<Self> {
        if batch_size == 0 {
            return Err(WordstockError::InvalidValue(
                "batch_size must be positive".to_string(),
            ));
        }

        #[cfg(feature = "rayon")]
        let pool = match num_workers {
            0 => None,
            n => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|idx| format!("wordstock-batch-{idx}"))
                    .build()
                    .map_err(|e| WordstockError::InvalidValue(e.to_string()))?,
            ),
        };

        Ok(Self {
            batch_size,
            num_workers,
            #[cfg(feature = "rayon")]
            pool,
        })
    }

    /// Items per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Collation threads.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// The number of batches `len` items split into.
    pub fn num_batches(
        &self,
        len: usize,
    ) -> usize {
        len.div_ceil(self.batch_size)
    }

    /// Collate each batch of `items` with `collate`.
    ///
    /// ## Returns
    /// One result per batch, in batch order.
    pub fn map_batches<T, R, F>(
        &self,
        items: &[T],
        collate: F,
    ) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&[T]) -> R + Send + Sync,
    {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                if let Some(pool) = &self.pool {
                    return pool.install(|| {
                        items.par_chunks(self.batch_size).map(&collate).collect()
                    });
                }
            }
        }
        items.chunks(self.batch_size).map(collate).collect()
    }

    /// Collate each batch of `items` with a fallible `collate`.
    ///
    /// ## Errors
    /// The first error returned by `collate`; with several workers, which
    /// error wins is unspecified.
    pub fn try_map_batches<T, R, E, F>(
        &self,
        items: &[T],
        collate: F,
    ) -> Result<Vec<R>, E>
    where
        T: Sync,
        R: Send,
        E: Send,
        F: Fn(&[T]) -> Result<R, E> + Send + Sync,
    {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                use rayon::prelude::*;
                if let Some(pool) = &self.pool {
                    return pool.install(|| {
                        items.par_chunks(self.batch_size).map(&collate).collect()
                    });
                }
            }
        }
        items.chunks(self.batch_size).map(collate).collect()
    }
}
