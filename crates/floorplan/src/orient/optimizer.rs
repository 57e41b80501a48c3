use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::compass::{bearing, normalize_degrees, CompassZone};
use super::placement::PlacementTable;
use crate::category::Category;
use crate::error::{ConfigError, GeometryError, MalformedRecord};
use crate::geom::Geometry;
use crate::record::{FloorPlanRecord, OrientationMetadata};

/// Score of a room sitting in one of its ideal zones.
pub const OPTIMAL_SCORE: f64 = 100.0;
/// Partial credit for any other zone.
pub const ACCEPTABLE_SCORE: f64 = 50.0;
/// Result when nothing is scorable.
pub const NEUTRAL_SCORE: f64 = 50.0;
/// Rotations tried by `optimize_rotation`, in search order.
pub const ROTATION_CANDIDATES: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// Optimizer settings; the canvas size is finite and positive by construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOptimizerCfg")]
pub struct OptimizerCfg {
    /// Side of the square canvas all geometry is drawn on.
    canvas_size: f64,
}

#[derive(Deserialize)]
struct RawOptimizerCfg {
    canvas_size: f64,
}

impl TryFrom<RawOptimizerCfg> for OptimizerCfg {
    type Error = ConfigError;

    fn try_from(raw: RawOptimizerCfg) -> Result<Self, Self::Error> {
        OptimizerCfg::new(raw.canvas_size)
    }
}

impl Default for OptimizerCfg {
    fn default() -> Self {
        Self { canvas_size: 256.0 }
    }
}

impl OptimizerCfg {
    pub fn new(canvas_size: f64) -> Result<Self, ConfigError> {
        if canvas_size.is_finite() && canvas_size > 0.0 {
            Ok(Self { canvas_size })
        } else {
            Err(ConfigError::InvalidCanvasSize(canvas_size))
        }
    }

    #[inline]
    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    #[inline]
    pub fn canvas_center(&self) -> Vector2<f64> {
        Vector2::new(self.canvas_size / 2.0, self.canvas_size / 2.0)
    }
}

/// Where one monitored room sits relative to the reference center.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomPosition {
    pub category: Category,
    pub center: Vector2<f64>,
    /// Bearing in `[0, 360)`.
    pub angle: f64,
    pub distance: f64,
    pub zone: CompassZone,
}

impl RoomPosition {
    /// Same room with its bearing shifted by `degrees`.
    pub fn rotated(&self, degrees: f64) -> RoomPosition {
        let angle = normalize_degrees(self.angle + degrees);
        RoomPosition {
            angle,
            zone: CompassZone::from_bearing(angle),
            ..self.clone()
        }
    }
}

/// Shift every bearing by `degrees`.
pub fn rotate_positions(positions: &[RoomPosition], degrees: f64) -> Vec<RoomPosition> {
    positions.iter().map(|p| p.rotated(degrees)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CenterSource {
    Inner,
    CanvasFallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub center: Vector2<f64>,
    pub center_source: CenterSource,
    /// Monitored rooms that could be placed, in monitored order.
    pub positions: Vec<RoomPosition>,
    /// Categories dropped because their geometry could not be evaluated.
    pub excluded: Vec<MalformedRecord>,
}

/// Stateless orientation policy.
#[derive(Clone, Debug, Default)]
pub struct Optimizer {
    table: PlacementTable,
    cfg: OptimizerCfg,
}

impl Optimizer {
    pub fn new(table: PlacementTable, cfg: OptimizerCfg) -> Self {
        Self { table, cfg }
    }

    #[inline]
    pub fn table(&self) -> &PlacementTable {
        &self.table
    }

    #[inline]
    pub fn cfg(&self) -> &OptimizerCfg {
        &self.cfg
    }

    /// Bearing and zone of every monitored, non-empty room.
    pub fn classify<G: Geometry>(&self, record: &FloorPlanRecord<G>) -> Classification {
        let mut excluded = Vec::new();
        let (center, center_source) = match record.region(Category::Inner) {
            Some(inner) if !inner.is_empty() => match finite(inner.centroid()) {
                Ok(c) => (c, CenterSource::Inner),
                Err(e) => {
                    excluded.push(MalformedRecord::new(record.id, Some(Category::Inner), e.to_string()));
                    (self.cfg.canvas_center(), CenterSource::CanvasFallback)
                }
            },
            _ => (self.cfg.canvas_center(), CenterSource::CanvasFallback),
        };

        let mut positions = Vec::with_capacity(self.table.monitored().len());
        for &category in self.table.monitored() {
            let Some(geom) = record.region(category) else {
                continue;
            };
            if geom.is_empty() {
                continue;
            }
            let placed = finite(geom.largest_part_centroid()).and_then(|room| {
                let d = room - center;
                if d.x.is_finite() && d.y.is_finite() {
                    Ok((room, d))
                } else {
                    Err(GeometryError::NonFinite("reference center"))
                }
            });
            match placed {
                Ok((room, d)) => {
                    let angle = bearing(d.x, d.y);
                    positions.push(RoomPosition {
                        category,
                        center: room,
                        angle,
                        distance: d.norm(),
                        zone: CompassZone::from_bearing(angle),
                    });
                }
                Err(e) => excluded.push(MalformedRecord::new(record.id, Some(category), e.to_string())),
            }
        }
        Classification {
            center,
            center_source,
            positions,
            excluded,
        }
    }

    /// Weighted compliance in `[0, 100]`; `NEUTRAL_SCORE` if no position has a rule.
    pub fn score(&self, positions: &[RoomPosition]) -> f64 {
        let mut total = 0.0;
        let mut weight = 0.0;
        for p in positions {
            let Some(rule) = self.table.rule(p.category) else {
                continue;
            };
            let room = if rule.ideal.contains(&p.zone) {
                OPTIMAL_SCORE
            } else {
                ACCEPTABLE_SCORE
            };
            total += room * rule.weight;
            weight += rule.weight;
        }
        if weight > 0.0 {
            total / weight
        } else {
            NEUTRAL_SCORE
        }
    }

    /// Score of every candidate rotation, in search order.
    pub fn rotation_sweep(&self, positions: &[RoomPosition]) -> [(f64, f64); 8] {
        ROTATION_CANDIDATES.map(|r| (r, self.score(&rotate_positions(positions, r))))
    }

    /// Best rotation among `ROTATION_CANDIDATES`; the smallest one wins ties.
    pub fn optimize_rotation(&self, positions: &[RoomPosition]) -> f64 {
        let mut best_rotation = 0.0;
        let mut best_score = -1.0;
        for (rotation, score) in self.rotation_sweep(positions) {
            if score > best_score {
                best_score = score;
                best_rotation = rotation;
            }
        }
        best_rotation
    }

    /// One report line per scored position.
    pub fn report(&self, positions: &[RoomPosition]) -> Vec<String> {
        positions
            .iter()
            .filter_map(|p| {
                let rule = self.table.rule(p.category)?;
                let status = if rule.ideal.contains(&p.zone) {
                    "optimal"
                } else {
                    "acceptable"
                };
                Some(format!("{}: {} — {}", p.category, p.zone, status))
            })
            .collect()
    }

    /// Rotate a copy of `record` by the optimal rotation and annotate it.
    ///
    /// Every non-empty layer is turned counterclockwise by the chosen rotation about
    /// the canvas center, then the copy is classified and scored again. If any layer
    /// cannot be rotated, no layer is: the copy keeps the original geometry,
    /// `applied` is false and the failing layers are listed in `unrotated`.
    /// `record` itself is left untouched.
    pub fn apply<G: Geometry>(&self, record: &FloorPlanRecord<G>) -> FloorPlanRecord<G> {
        let base = self.classify(record);
        let rotation = self.optimize_rotation(&base.positions);

        let mut out = record.clone();
        let mut unrotated = Vec::new();
        if rotation != 0.0 {
            let origin = self.cfg.canvas_center();
            let mut turned = out.regions.clone();
            for (category, geom) in turned.iter_mut() {
                if geom.is_empty() {
                    continue;
                }
                match geom.rotate(rotation, origin) {
                    Ok(g) => *geom = g,
                    Err(e) => {
                        tracing::warn!(id = record.id, %category, error = %e, "region cannot be rotated");
                        unrotated.push(*category);
                    }
                }
            }
            if unrotated.is_empty() {
                out.regions = turned;
            }
        }
        let applied = unrotated.is_empty();

        let fin = self.classify(&out);
        for bad in &fin.excluded {
            tracing::warn!(id = bad.id, category = ?bad.category, reason = %bad.reason, "excluded from scoring");
        }
        let score = self.score(&fin.positions);
        tracing::debug!(id = record.id, rotation, applied, score, "orientation applied");
        out.orientation = Some(OrientationMetadata {
            applied,
            rotation_degrees: if applied { rotation } else { 0.0 },
            compliance_score: score,
            report: self.report(&fin.positions),
            unrotated,
        });
        out
    }
}

fn finite(p: Result<Vector2<f64>, GeometryError>) -> Result<Vector2<f64>, GeometryError> {
    let p = p?;
    if p.x.is_finite() && p.y.is_finite() {
        Ok(p)
    } else {
        Err(GeometryError::NonFinite("centroid"))
    }
}
