// batcher.rs - keeps each request under the server-side size limit

use super::{DEFAULT_BATCH_SIZE, UploadError};

pub struct Batcher {
    batch_size: usize,
}

impl Batcher {
    pub fn new(batch_size: usize) -> Result<Self, UploadError> {
        if batch_size == 0 {
            return Err(UploadError::InvalidBatchSize);
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Contiguous slices in input order; the last one may be short.
    pub fn split<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        items.chunks(self.batch_size).collect()
    }
}

impl Default for Batcher {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}
