//! Floor-plan records and the ordered record store.
//!
//! Purpose
//! - `FloorPlanRecord<G>`: category-keyed geometry plus total area, optionally carrying
//!   orientation metadata once the optimizer has run.
//! - `RecordStore<G>`: the immutable, ordered collection the index is built over.
//!   Record ids are positions in the store.
//! - JSON loading for `Region` stores, with alias normalization applied once per record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::{normalize_keys, Category};
use crate::error::{GeometryError, LoadError};
use crate::geom::{GeoJson, Geometry, Region};

/// Position of a record in its store.
pub type RecordId = usize;

/// Outcome of an orientation pass, attached to the returned copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationMetadata {
    pub applied: bool,
    pub rotation_degrees: f64,
    /// Weighted compliance in `[0, 100]`.
    pub compliance_score: f64,
    /// One line per scored category, in monitored order.
    pub report: Vec<String>,
    /// Layers whose rotation failed; when non-empty nothing was rotated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrotated: Vec<Category>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloorPlanRecord<G = Region> {
    pub id: RecordId,
    pub regions: BTreeMap<Category, G>,
    pub area: f64,
    pub orientation: Option<OrientationMetadata>,
}

impl<G: Geometry> FloorPlanRecord<G> {
    pub fn new(id: RecordId, regions: BTreeMap<Category, G>, area: f64) -> Self {
        Self {
            id,
            regions,
            area,
            orientation: None,
        }
    }

    #[inline]
    pub fn region(&self, category: Category) -> Option<&G> {
        self.regions.get(&category)
    }

    /// Present and non-empty.
    pub fn has(&self, category: Category) -> bool {
        self.region(category).is_some_and(|g| !g.is_empty())
    }

    /// 0 when absent or empty, otherwise the region's part count.
    pub fn room_count(&self, category: Category) -> Result<usize, GeometryError> {
        match self.region(category) {
            None => Ok(0),
            Some(g) if g.is_empty() => Ok(0),
            Some(g) => g.part_count(),
        }
    }
}

/// Ordered, read-only record collection.
#[derive(Clone, Debug, Default)]
pub struct RecordStore<G = Region> {
    records: Vec<FloorPlanRecord<G>>,
}

impl<G: Geometry> RecordStore<G> {
    /// Build a store; each record's `id` is rewritten to its position.
    pub fn new(records: Vec<FloorPlanRecord<G>>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.id = i;
                r
            })
            .collect();
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, id: RecordId) -> Option<&FloorPlanRecord<G>> {
        self.records.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloorPlanRecord<G>> {
        self.records.iter()
    }
}

/// Serialized record shape: `area` plus one key per category.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    area: f64,
    #[serde(flatten)]
    layers: BTreeMap<String, Value>,
}

/// Serialized form of a `Region` record, used for writing results back out.
#[derive(Debug, Serialize)]
pub struct RecordDocument<'a> {
    pub id: RecordId,
    pub area: f64,
    #[serde(flatten)]
    pub regions: BTreeMap<Category, GeoJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'a OrientationMetadata>,
}

impl FloorPlanRecord<Region> {
    pub fn to_document(&self) -> RecordDocument<'_> {
        RecordDocument {
            id: self.id,
            area: self.area,
            regions: self
                .regions
                .iter()
                .filter_map(|(c, g)| g.to_geojson().map(|j| (*c, j)))
                .collect(),
            orientation: self.orientation.as_ref(),
        }
    }
}

impl RecordStore<Region> {
    /// Parse a JSON array of records.
    ///
    /// Keys are normalized through the alias table; keys naming no category are
    /// ignored. A `null` layer is treated as absent.
    pub fn from_json_str(doc: &str) -> Result<Self, LoadError> {
        let raw: Vec<RawRecord> = serde_json::from_str(doc)?;
        let mut records = Vec::with_capacity(raw.len());
        for (id, r) in raw.into_iter().enumerate() {
            let (layers, unknown) = normalize_keys(id, r.layers)?;
            if !unknown.is_empty() {
                tracing::debug!(id, ?unknown, "ignoring non-category keys");
            }
            let mut regions = BTreeMap::new();
            for (category, value) in layers {
                if value.is_null() {
                    continue;
                }
                let g: GeoJson = serde_json::from_value(value)?;
                regions.insert(category, Region::from(g));
            }
            records.push(FloorPlanRecord::new(id, regions, r.area));
        }
        Ok(Self::new(records))
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let docs: Vec<RecordDocument<'_>> = self.records.iter().map(|r| r.to_document()).collect();
        serde_json::to_string(&docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataIntegrityError;

    const DOC: &str = r#"[
        {"area": 90.5,
         "bedroom": {"type":"MultiPolygon","coordinates":[
             [[[0,0],[2,0],[2,2],[0,2]]],
             [[[5,5],[6,5],[6,6],[5,6]]]]},
         "kitchen": {"type":"Polygon","coordinates":[[[10,10],[12,10],[12,12],[10,12]]]},
         "balacony": {"type":"Polygon","coordinates":[[[20,20],[21,20],[21,21],[20,21]]]},
         "bathroom": null,
         "unitType": "apartment"},
        {"area": 40.0}
    ]"#;

    #[test]
    fn load_normalizes_and_counts() {
        let store = RecordStore::from_json_str(DOC).unwrap();
        assert_eq!(store.len(), 2);
        let r0 = store.get(0).unwrap();
        assert_eq!(r0.id, 0);
        assert_eq!(r0.room_count(Category::Bedroom), Ok(2));
        assert_eq!(r0.room_count(Category::Bathroom), Ok(0));
        assert!(r0.has(Category::Kitchen));
        assert!(r0.has(Category::Balcony));
        assert!(r0.region(Category::Bathroom).is_none());
        let r1 = store.get(1).unwrap();
        assert_eq!(r1.id, 1);
        assert!(r1.regions.is_empty());
        assert!((r1.area - 40.0).abs() < 1e-12);
    }

    #[test]
    fn conflicting_alias_is_fatal() {
        let doc = r#"[{"area": 1,
            "balcony": {"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1]]]},
            "balacony": {"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1]]]}}]"#;
        let err = RecordStore::from_json_str(doc).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Integrity(DataIntegrityError::ConflictingKeys {
                record: 0,
                category: Category::Balcony,
                ..
            })
        ));
    }

    #[test]
    fn written_store_reads_back() {
        let store = RecordStore::from_json_str(DOC).unwrap();
        let text = store.to_json_string().unwrap();
        let again = RecordStore::from_json_str(&text).unwrap();
        assert_eq!(again.len(), store.len());
        for (a, b) in store.iter().zip(again.iter()) {
            assert_eq!(a.regions, b.regions);
            assert_eq!(a.area, b.area);
        }
    }
}
