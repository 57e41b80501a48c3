use nalgebra::{Rotation2, Vector2};

use super::polygon::{Polygon, AREA_EPS};
use super::Geometry;
use crate::error::GeometryError;

/// Geometry value of one category: empty, one polygon, or a disjoint union.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Region {
    #[default]
    Empty,
    Single(Polygon),
    Multi(Vec<Polygon>),
}

impl Region {
    /// Non-empty parts, in storage order.
    pub fn parts(&self) -> impl Iterator<Item = &Polygon> {
        let parts: &[Polygon] = match self {
            Region::Empty => &[],
            Region::Single(p) => std::slice::from_ref(p),
            Region::Multi(ps) => ps,
        };
        parts.iter().filter(|p| !p.is_empty())
    }

    /// Collapse a part list into the narrowest variant.
    pub fn from_parts(mut parts: Vec<Polygon>) -> Region {
        parts.retain(|p| !p.is_empty());
        match parts.len() {
            0 => Region::Empty,
            1 => Region::Single(parts.remove(0)),
            _ => Region::Multi(parts),
        }
    }
}

impl From<Polygon> for Region {
    fn from(p: Polygon) -> Self {
        Region::Single(p)
    }
}

impl Geometry for Region {
    fn is_empty(&self) -> bool {
        self.parts().next().is_none()
    }

    fn part_count(&self) -> Result<usize, GeometryError> {
        let mut n = 0;
        for p in self.parts() {
            p.validate()?;
            n += 1;
        }
        Ok(n)
    }

    fn area(&self) -> Result<f64, GeometryError> {
        self.parts().map(Polygon::area).sum()
    }

    fn centroid(&self) -> Result<Vector2<f64>, GeometryError> {
        let mut area = 0.0;
        let mut moment = Vector2::zeros();
        let mut any = false;
        for p in self.parts() {
            let (a, m) = p.moments()?;
            area += a;
            moment += m;
            any = true;
        }
        if !any {
            return Err(GeometryError::NoParts);
        }
        if area <= AREA_EPS {
            return Err(GeometryError::ZeroArea);
        }
        Ok(moment / area)
    }

    fn largest_part_centroid(&self) -> Result<Vector2<f64>, GeometryError> {
        let mut best: Option<(&Polygon, f64)> = None;
        for p in self.parts() {
            let a = p.area()?;
            // First part wins ties.
            if best.as_ref().map_or(true, |(_, b)| a > *b) {
                best = Some((p, a));
            }
        }
        let (p, _) = best.ok_or(GeometryError::NoParts)?;
        p.centroid()
    }

    fn rotate(&self, degrees: f64, origin: Vector2<f64>) -> Result<Self, GeometryError> {
        if !degrees.is_finite() {
            return Err(GeometryError::NonFiniteAngle(degrees));
        }
        if !(origin.x.is_finite() && origin.y.is_finite()) {
            return Err(GeometryError::NonFinite("rotation origin"));
        }
        let rot = Rotation2::new(degrees.to_radians());
        Ok(match self {
            Region::Empty => Region::Empty,
            Region::Single(p) => Region::Single(p.rotated(&rot, origin)),
            Region::Multi(ps) => Region::Multi(ps.iter().map(|p| p.rotated(&rot, origin)).collect()),
        })
    }
}
