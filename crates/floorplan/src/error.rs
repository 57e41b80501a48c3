//! Error taxonomy shared by loading, indexing and orientation.
//!
//! - `GeometryError`: a geometry adapter call could not produce a value.
//! - `DataIntegrityError`: fatal to store loading or index construction.
//! - `MalformedRecord`: a recovered per-record (or per-category) failure. It is a
//!   value collected into build/classification diagnostics, never propagated.
//! - `PlacementError`: an ideal-placement table that fails validation.
//! - `ConfigError`: optimizer settings out of range.

use std::fmt;

use thiserror::Error;

use crate::category::Category;
use crate::record::RecordId;

/// Failure of a geometry adapter call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
    #[error("ring has {0} distinct vertices, need at least 3")]
    DegenerateRing(usize),
    #[error("zero-area geometry has no centroid")]
    ZeroArea,
    #[error("geometry has no parts")]
    NoParts,
    #[error("non-finite rotation angle {0}")]
    NonFiniteAngle(f64),
}

/// Fatal inconsistency in the record collection.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DataIntegrityError {
    #[error("record store is empty")]
    EmptyStore,
    #[error("none of the {total} records could be indexed")]
    NoUsableRecords { total: usize },
    #[error("record {record}: keys {keys:?} all normalize to `{category}`")]
    ConflictingKeys {
        record: RecordId,
        category: Category,
        keys: Vec<String>,
    },
}

/// Failure while reading a serialized record store.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed record store document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Integrity(#[from] DataIntegrityError),
}

/// Invalid ideal-placement configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlacementError {
    #[error("weight for `{category}` must be finite and positive, got {weight}")]
    InvalidWeight { category: Category, weight: f64 },
    #[error("rule for `{0}` refers to a category that is not monitored")]
    Unmonitored(Category),
    #[error("more than one rule for `{0}`")]
    DuplicateRule(Category),
    #[error("`{0}` is listed twice in the monitored set")]
    DuplicateMonitored(Category),
}

/// Invalid optimizer settings.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas size must be finite and positive, got {0}")]
    InvalidCanvasSize(f64),
}

/// A record (or one category of a record) that was skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedRecord {
    pub id: RecordId,
    /// `None` when the failure concerns the record as a whole (e.g. its area).
    pub category: Option<Category>,
    pub reason: String,
}

impl MalformedRecord {
    pub fn new(id: RecordId, category: Option<Category>, reason: impl Into<String>) -> Self {
        Self {
            id,
            category,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(c) => write!(f, "record {} [{c}]: {}", self.id, self.reason),
            None => write!(f, "record {}: {}", self.id, self.reason),
        }
    }
}
