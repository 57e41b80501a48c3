//! Orientation compliance: classify rooms into compass sectors, score them against
//! an ideal-placement table, and pick the best of eight 45° rotations.
//!
//! Purpose
//! - `Optimizer::classify`: per-room bearing from the footprint (`inner`) centroid,
//!   or the canvas center when there is no footprint.
//! - `Optimizer::score`: weighted mean of 100 (ideal zone) / 50 (any other zone).
//! - `Optimizer::optimize_rotation`: analytic sweep over bearing shifts, strict
//!   improvement only, so the smallest rotation wins ties.
//! - `Optimizer::apply`: rotate a copy of the record and attach the outcome.
//!
//! Failures on single categories exclude them from scoring; nothing here is fatal.

mod compass;
mod optimizer;
mod placement;

pub use compass::{bearing, normalize_degrees, CompassZone};
pub use optimizer::{
    rotate_positions, CenterSource, Classification, Optimizer, OptimizerCfg, RoomPosition,
    ACCEPTABLE_SCORE, NEUTRAL_SCORE, OPTIMAL_SCORE, ROTATION_CANDIDATES,
};
pub use placement::{PlacementRule, PlacementTable};
