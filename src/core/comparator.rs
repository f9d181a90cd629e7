use crate::core::{ByteEntry, ByteSequence, ComparisonReport, Storage};
use crate::utils::error::Result;

/// Loads input files and compares them byte by byte.
///
/// Only the overlapping prefix is compared per index; trailing bytes of the
/// longer input show up solely through the length line and the verdict.
pub struct ByteComparator<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> ByteComparator<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub async fn load_bytes(&self, path: &str) -> Result<ByteSequence> {
        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Loaded {} bytes from {}", bytes.len(), path);
        Ok(ByteSequence::new(path, bytes))
    }

    pub fn compare(&self, reference: &ByteSequence, candidate: &ByteSequence) -> ComparisonReport {
        compare(reference, candidate)
    }
}

pub fn compare(reference: &ByteSequence, candidate: &ByteSequence) -> ComparisonReport {
    compare_bytes(reference.as_bytes(), candidate.as_bytes())
}

pub fn compare_bytes(reference: &[u8], candidate: &[u8]) -> ComparisonReport {
    let entries = reference
        .iter()
        .zip(candidate)
        .enumerate()
        .map(|(index, (&r, &c))| ByteEntry {
            index,
            reference: r,
            candidate: c,
        })
        .collect();

    ComparisonReport {
        reference_len: reference.len(),
        candidate_len: candidate.len(),
        entries,
        identical: reference == candidate,
    }
}
