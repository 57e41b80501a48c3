//! 2-D geometry adapter for floor-plan regions.
//!
//! Purpose
//! - Define the `Geometry` contract the index and the optimizer depend on.
//! - Provide `Region` (empty / single polygon / disjoint union) as the concrete value
//!   loaded from record stores.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>` in canvas units.
//! - `rotate` takes degrees, counterclockwise positive, and returns a new value.
//!
//! Code cross-refs: `record::FloorPlanRecord`, `index::Index`, `orient::Optimizer`.

mod geojson;
mod polygon;
mod region;

pub use geojson::GeoJson;
pub use polygon::Polygon;
pub use region::Region;

use nalgebra::Vector2;

use crate::error::GeometryError;

/// Operations the core needs from a geometry value.
///
/// `is_empty` never fails; every other call may reject malformed input.
/// Implementations must keep `is_empty() == (part_count() == Ok(0))` for valid values.
pub trait Geometry: Clone {
    fn is_empty(&self) -> bool;
    /// 0 if empty, 1 for a single region, else the number of disjoint parts.
    fn part_count(&self) -> Result<usize, GeometryError>;
    fn area(&self) -> Result<f64, GeometryError>;
    /// Area-weighted centroid over all parts.
    fn centroid(&self) -> Result<Vector2<f64>, GeometryError>;
    /// Centroid of the part with the largest area (first one on ties).
    fn largest_part_centroid(&self) -> Result<Vector2<f64>, GeometryError>;
    /// Rigid rotation by `degrees` (counterclockwise) about `origin`.
    fn rotate(&self, degrees: f64, origin: Vector2<f64>) -> Result<Self, GeometryError>;
}
