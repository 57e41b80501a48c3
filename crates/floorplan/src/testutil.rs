//! Fixtures shared by unit tests.

use std::collections::BTreeMap;

use nalgebra::Vector2;

use crate::category::Category;
use crate::error::GeometryError;
use crate::geom::{Geometry, Polygon, Region};
use crate::record::{FloorPlanRecord, RecordStore};

/// `n` disjoint unit squares in a row starting at `x0` (empty for `n == 0`).
pub(crate) fn rooms(n: usize, x0: f64) -> Region {
    let parts: Vec<Polygon> = (0..n)
        .map(|i| {
            let x = x0 + 2.0 * i as f64;
            Polygon::rect(x, 0.0, x + 1.0, 1.0)
        })
        .collect();
    if n > 1 {
        Region::Multi(parts)
    } else {
        Region::from_parts(parts)
    }
}

/// Square of side `side` centered on `(cx, cy)`.
pub(crate) fn square(cx: f64, cy: f64, side: f64) -> Region {
    let h = side / 2.0;
    Region::from(Polygon::rect(cx - h, cy - h, cx + h, cy + h))
}

pub(crate) fn record(area: f64, beds: usize, baths: usize, kitchen: bool) -> FloorPlanRecord {
    let mut regions = BTreeMap::new();
    if beds > 0 {
        regions.insert(Category::Bedroom, rooms(beds, 0.0));
    }
    if baths > 0 {
        regions.insert(Category::Bathroom, rooms(baths, 100.0));
    }
    if kitchen {
        regions.insert(Category::Kitchen, rooms(1, 200.0));
    }
    FloorPlanRecord::new(0, regions, area)
}

pub(crate) fn store(records: Vec<FloorPlanRecord>) -> RecordStore {
    RecordStore::new(records)
}

/// Geometry that can be made to fail every fallible call.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Flaky {
    Good(Region),
    Broken,
}

impl Geometry for Flaky {
    fn is_empty(&self) -> bool {
        match self {
            Flaky::Good(r) => r.is_empty(),
            Flaky::Broken => false,
        }
    }

    fn part_count(&self) -> Result<usize, GeometryError> {
        match self {
            Flaky::Good(r) => r.part_count(),
            Flaky::Broken => Err(GeometryError::NonFinite("flaky")),
        }
    }

    fn area(&self) -> Result<f64, GeometryError> {
        match self {
            Flaky::Good(r) => r.area(),
            Flaky::Broken => Err(GeometryError::NonFinite("flaky")),
        }
    }

    fn centroid(&self) -> Result<Vector2<f64>, GeometryError> {
        match self {
            Flaky::Good(r) => r.centroid(),
            Flaky::Broken => Err(GeometryError::NonFinite("flaky")),
        }
    }

    fn largest_part_centroid(&self) -> Result<Vector2<f64>, GeometryError> {
        match self {
            Flaky::Good(r) => r.largest_part_centroid(),
            Flaky::Broken => Err(GeometryError::NonFinite("flaky")),
        }
    }

    fn rotate(&self, degrees: f64, origin: Vector2<f64>) -> Result<Self, GeometryError> {
        match self {
            Flaky::Good(r) => r.rotate(degrees, origin).map(Flaky::Good),
            Flaky::Broken => Err(GeometryError::NonFinite("flaky")),
        }
    }
}
