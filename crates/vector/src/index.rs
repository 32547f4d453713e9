use reviewrag_common::DistanceMetric;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::VectorError;
use crate::similarity::distance;
use crate::types::{DocumentRecord, RecordId};

/// In-memory vector index with exact (brute-force) nearest-neighbor search.
///
/// The first insertion fixes the dimensionality for the lifetime of the
/// index. Records are immutable once inserted and are never removed.
///
/// `nearest` is a linear scan, O(n·d) per query. An approximate structure
/// (HNSW, IVF, ...) can replace it behind the same signature once the corpus
/// outgrows a scan.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    metric: DistanceMetric,
    dimension: Option<usize>,
    /// Insertion order
    records: Vec<DocumentRecord>,
    /// id -> position in `records`
    slots: HashMap<RecordId, usize>,
}

impl VectorIndex {
    /// Create new empty index
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Established dimensionality, `None` until the first insertion
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Add a record. Nothing changes when this fails.
    pub fn insert(
        &mut self,
        id: RecordId,
        text: impl Into<String>,
        vector: Vec<f32>,
    ) -> Result<(), VectorError> {
        if self.slots.contains_key(&id) {
            return Err(VectorError::DuplicateId(id));
        }

        match self.dimension {
            Some(expected) if vector.len() != expected => {
                return Err(VectorError::DimensionMismatch {
                    expected,
                    got: vector.len(),
                });
            }
            None if vector.is_empty() => return Err(VectorError::EmptyVector),
            _ => {}
        }

        if self.dimension.is_none() {
            self.dimension = Some(vector.len());
        }
        self.slots.insert(id, self.records.len());
        self.records.push(DocumentRecord {
            id,
            text: text.into(),
            vector,
        });

        Ok(())
    }

    /// Number of stored records
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get record by id
    pub fn get(&self, id: RecordId) -> Option<&DocumentRecord> {
        self.slots.get(&id).map(|&slot| &self.records[slot])
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    /// Up to `k` records closest to `query`, ascending by distance, ties
    /// broken by ascending id.
    pub fn nearest(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<(&DocumentRecord, f32)>, VectorError> {
        let Some(expected) = self.dimension else {
            return Ok(Vec::new());
        };

        if query.len() != expected {
            return Err(VectorError::DimensionMismatch {
                expected,
                got: query.len(),
            });
        }

        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(&DocumentRecord, f32)> = self
            .records
            .iter()
            .map(|record| (record, distance(self.metric, query, &record.vector)))
            .collect();

        if scored.len() > k {
            scored.select_nth_unstable_by(k - 1, by_distance_then_id);
            scored.truncate(k);
        }
        scored.sort_by(by_distance_then_id);

        Ok(scored)
    }
}

fn by_distance_then_id(a: &(&DocumentRecord, f32), b: &(&DocumentRecord, f32)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id))
}
