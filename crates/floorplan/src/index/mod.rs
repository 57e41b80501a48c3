//! Spatial index and query engine over a `RecordStore`.
//!
//! Purpose
//! - Build per-attribute lookups once: bedroom/bathroom part-count buckets and an
//!   area-sorted list.
//! - Answer multi-criteria searches by set intersection over those lookups.
//!
//! Invariants
//! - Every indexed id sits in exactly one bucket per count dimension and appears
//!   exactly once in `area_sorted`.
//! - `area_sorted` is ascending by area, ties by id.
//! - Nothing is mutated after `Index::build` returns.
//!
//! Records whose geometry cannot be counted, or whose area is not a finite
//! non-negative number, are skipped and reported through `Index::skipped`.

mod query;

pub use query::{AreaProximity, Relevance, SearchHit, SearchQuery, Uniform};

use std::collections::{BTreeMap, BTreeSet};

use crate::category::Category;
use crate::error::{DataIntegrityError, MalformedRecord};
use crate::geom::{Geometry, Region};
use crate::record::{FloorPlanRecord, RecordId, RecordStore};

/// Room count → ids with that many parts.
pub type CountIndex = BTreeMap<usize, BTreeSet<RecordId>>;

/// Dimensions with an exact-count lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountDimension {
    Bedrooms,
    Bathrooms,
}

impl CountDimension {
    pub const ALL: [CountDimension; 2] = [CountDimension::Bedrooms, CountDimension::Bathrooms];

    pub fn category(self) -> Category {
        match self {
            CountDimension::Bedrooms => Category::Bedroom,
            CountDimension::Bathrooms => Category::Bathroom,
        }
    }
}

/// Read-only index owning its record store.
#[derive(Debug)]
pub struct Index<G = Region> {
    store: RecordStore<G>,
    bedrooms: CountIndex,
    bathrooms: CountIndex,
    area_sorted: Vec<(f64, RecordId)>,
    indexed: BTreeSet<RecordId>,
    skipped: Vec<MalformedRecord>,
}

impl<G: Geometry> Index<G> {
    /// One batch pass over the store.
    ///
    /// Fails on an empty store, or when no record survives validation.
    pub fn build(store: RecordStore<G>) -> Result<Self, DataIntegrityError> {
        if store.is_empty() {
            return Err(DataIntegrityError::EmptyStore);
        }
        let mut bedrooms = CountIndex::new();
        let mut bathrooms = CountIndex::new();
        let mut area_sorted = Vec::with_capacity(store.len());
        let mut indexed = BTreeSet::new();
        let mut skipped = Vec::new();

        for record in store.iter() {
            match index_entry(record) {
                Ok((beds, baths)) => {
                    bedrooms.entry(beds).or_default().insert(record.id);
                    bathrooms.entry(baths).or_default().insert(record.id);
                    area_sorted.push((record.area, record.id));
                    indexed.insert(record.id);
                }
                Err(bad) => {
                    tracing::warn!(id = bad.id, category = ?bad.category, reason = %bad.reason, "skipping malformed record");
                    skipped.push(bad);
                }
            }
        }
        if indexed.is_empty() {
            return Err(DataIntegrityError::NoUsableRecords { total: store.len() });
        }
        area_sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        tracing::info!(
            records = store.len(),
            indexed = indexed.len(),
            skipped = skipped.len(),
            "index built"
        );
        Ok(Self {
            store,
            bedrooms,
            bathrooms,
            area_sorted,
            indexed,
            skipped,
        })
    }

    #[inline]
    pub fn store(&self) -> &RecordStore<G> {
        &self.store
    }

    /// Stored record by id (indexed or not).
    #[inline]
    pub fn get(&self, id: RecordId) -> Option<&FloorPlanRecord<G>> {
        self.store.get(id)
    }

    pub fn count_index(&self, dim: CountDimension) -> &CountIndex {
        match dim {
            CountDimension::Bedrooms => &self.bedrooms,
            CountDimension::Bathrooms => &self.bathrooms,
        }
    }

    #[inline]
    pub fn area_sorted(&self) -> &[(f64, RecordId)] {
        &self.area_sorted
    }

    /// Ids visible to search.
    #[inline]
    pub fn indexed(&self) -> &BTreeSet<RecordId> {
        &self.indexed
    }

    #[inline]
    pub fn skipped(&self) -> &[MalformedRecord] {
        &self.skipped
    }
}

fn index_entry<G: Geometry>(record: &FloorPlanRecord<G>) -> Result<(usize, usize), MalformedRecord> {
    if !(record.area.is_finite() && record.area >= 0.0) {
        return Err(MalformedRecord::new(
            record.id,
            None,
            format!("area {} is not a finite non-negative number", record.area),
        ));
    }
    let count = |dim: CountDimension| {
        let c = dim.category();
        record
            .room_count(c)
            .map_err(|e| MalformedRecord::new(record.id, Some(c), e.to_string()))
    };
    Ok((count(CountDimension::Bedrooms)?, count(CountDimension::Bathrooms)?))
}

#[cfg(test)]
mod tests;
