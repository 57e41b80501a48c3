//! GeoJSON-style (de)serialization of `Region`.
//!
//! Only `Polygon` and `MultiPolygon` are understood. Coordinates are `[x, y]` pairs;
//! the first ring of a polygon is the exterior, the rest are holes.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use super::region::Region;

type Ring = Vec<[f64; 2]>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoJson {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

fn ring_in(ring: Ring) -> Vec<Vector2<f64>> {
    ring.into_iter().map(|[x, y]| Vector2::new(x, y)).collect()
}

fn ring_out(ring: &[Vector2<f64>]) -> Ring {
    ring.iter().map(|p| [p.x, p.y]).collect()
}

fn polygon_in(rings: Vec<Ring>) -> Polygon {
    let mut rings = rings.into_iter();
    match rings.next() {
        Some(ext) => Polygon::with_holes(ring_in(ext), rings.map(ring_in).collect()),
        None => Polygon::default(),
    }
}

fn polygon_out(p: &Polygon) -> Vec<Ring> {
    std::iter::once(ring_out(&p.exterior))
        .chain(p.holes.iter().map(|h| ring_out(h)))
        .collect()
}

impl From<GeoJson> for Region {
    fn from(g: GeoJson) -> Self {
        match g {
            GeoJson::Polygon(rings) => {
                let p = polygon_in(rings);
                if p.is_empty() {
                    Region::Empty
                } else {
                    Region::Single(p)
                }
            }
            // A multi-part value keeps its variant even with a single part.
            GeoJson::MultiPolygon(parts) => {
                let parts: Vec<Polygon> = parts
                    .into_iter()
                    .map(polygon_in)
                    .filter(|p| !p.is_empty())
                    .collect();
                if parts.is_empty() {
                    Region::Empty
                } else {
                    Region::Multi(parts)
                }
            }
        }
    }
}

impl Region {
    /// `None` for an empty region.
    pub fn to_geojson(&self) -> Option<GeoJson> {
        match self {
            Region::Empty => None,
            Region::Single(p) => Some(GeoJson::Polygon(polygon_out(p))),
            Region::Multi(ps) => Some(GeoJson::MultiPolygon(ps.iter().map(polygon_out).collect())),
        }
    }
}
