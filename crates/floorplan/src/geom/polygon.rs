//! Simple polygons with optional holes (rings of `Vector2<f64>`).
//!
//! Rings may be given open or closed (first vertex repeated); orientation is not
//! assumed. Area and centroid use the shoelace moments of each ring, with holes
//! subtracted from the exterior.

use nalgebra::{Rotation2, Vector2};

use crate::error::GeometryError;

/// Area below which a polygon is treated as degenerate.
pub(crate) const AREA_EPS: f64 = 1e-12;

/// One connected region: an exterior ring and zero or more holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Vector2<f64>>,
    pub holes: Vec<Vec<Vector2<f64>>>,
}

impl Polygon {
    pub fn new(exterior: Vec<Vector2<f64>>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(exterior: Vec<Vector2<f64>>, holes: Vec<Vec<Vector2<f64>>>) -> Self {
        Self { exterior, holes }
    }

    /// Axis-aligned rectangle spanning `(x0, y0)`–`(x1, y1)`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(vec![
            Vector2::new(x0, y0),
            Vector2::new(x1, y0),
            Vector2::new(x1, y1),
            Vector2::new(x0, y1),
        ])
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Check every ring for finite coordinates and at least three distinct vertices.
    pub fn validate(&self) -> Result<(), GeometryError> {
        check_ring(&self.exterior, "exterior ring")?;
        for hole in &self.holes {
            check_ring(hole, "hole")?;
        }
        Ok(())
    }

    /// Net area (exterior minus holes).
    pub fn area(&self) -> Result<f64, GeometryError> {
        self.moments().map(|(a, _)| a)
    }

    /// Area centroid.
    pub fn centroid(&self) -> Result<Vector2<f64>, GeometryError> {
        let (a, m) = self.moments()?;
        if a <= AREA_EPS {
            return Err(GeometryError::ZeroArea);
        }
        Ok(m / a)
    }

    /// Rigidly transform every vertex: `p ↦ R (p − origin) + origin`.
    pub fn rotated(&self, rot: &Rotation2<f64>, origin: Vector2<f64>) -> Polygon {
        let map = |ring: &Vec<Vector2<f64>>| -> Vec<Vector2<f64>> {
            ring.iter().map(|p| rot * (p - origin) + origin).collect()
        };
        Polygon {
            exterior: map(&self.exterior),
            holes: self.holes.iter().map(map).collect(),
        }
    }

    /// `(area, first moment)`; the centroid is `moment / area`.
    pub(crate) fn moments(&self) -> Result<(f64, Vector2<f64>), GeometryError> {
        self.validate()?;
        let (a_ext, m_ext) = ring_moments(&self.exterior);
        let (mut area, mut moment) = oriented(a_ext, m_ext);
        for hole in &self.holes {
            let (a_h, m_h) = ring_moments(hole);
            let (a_h, m_h) = oriented(a_h, m_h);
            area -= a_h;
            moment -= m_h;
        }
        Ok((area.max(0.0), moment))
    }
}

/// Flip a ring's signed moments so the area is non-negative.
#[inline]
fn oriented(a: f64, m: Vector2<f64>) -> (f64, Vector2<f64>) {
    if a < 0.0 {
        (-a, -m)
    } else {
        (a, m)
    }
}

/// Signed shoelace area and first moment of a ring.
fn ring_moments(ring: &[Vector2<f64>]) -> (f64, Vector2<f64>) {
    let n = ring.len();
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    (0.5 * a, Vector2::new(cx / 6.0, cy / 6.0))
}

fn check_ring(ring: &[Vector2<f64>], what: &'static str) -> Result<(), GeometryError> {
    if ring.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(GeometryError::NonFinite(what));
    }
    let distinct = distinct_vertices(ring);
    if distinct < 3 {
        return Err(GeometryError::DegenerateRing(distinct));
    }
    Ok(())
}

/// Vertex count ignoring consecutive repeats and a closing copy of the first vertex.
fn distinct_vertices(ring: &[Vector2<f64>]) -> usize {
    let mut pts: Vec<Vector2<f64>> = ring.to_vec();
    pts.dedup();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    pts.len()
}
