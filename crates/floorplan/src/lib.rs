//! Floor-plan retrieval and orientation compliance.
//!
//! - `index`: per-attribute lookups over an immutable record store and bounded,
//!   multi-criteria search.
//! - `orient`: compass-sector classification of rooms, weighted compliance scoring,
//!   and a discrete rotation search.
//! - `geom`: the geometry adapter both depend on, with `Region` as the concrete value.
//!
//! Loading (`record::RecordStore::from_json_str`), summaries and the request-driven
//! `planner` are thin layers over these.

pub mod category;
pub mod error;
pub mod geom;
pub mod index;
pub mod orient;
pub mod planner;
pub mod record;
pub mod summary;
pub mod synth;

#[cfg(test)]
pub(crate) mod testutil;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::category::Category;
    pub use crate::error::{
        ConfigError, DataIntegrityError, GeometryError, LoadError, MalformedRecord,
    };
    pub use crate::geom::{Geometry, Polygon, Region};
    pub use crate::index::{Index, SearchHit, SearchQuery};
    pub use crate::orient::{CompassZone, Optimizer, OptimizerCfg, PlacementTable};
    pub use crate::planner::{PlanRequest, Planner};
    pub use crate::record::{FloorPlanRecord, RecordId, RecordStore};
    pub use crate::summary::PlanSummary;
}
