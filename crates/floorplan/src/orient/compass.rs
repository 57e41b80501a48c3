//! Compass sectors and bearing arithmetic.
//!
//! Bearings follow `atan2(dx, dy)`: 0° lies along +y and angles grow toward +x.
//! Sectors are half-open `[start, end)`, 45° wide, with `north` wrapping across 0°.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CompassZone {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassZone {
    pub const ALL: [CompassZone; 8] = [
        CompassZone::North,
        CompassZone::NorthEast,
        CompassZone::East,
        CompassZone::SouthEast,
        CompassZone::South,
        CompassZone::SouthWest,
        CompassZone::West,
        CompassZone::NorthWest,
    ];

    /// `(start, end)` in degrees; `start > end` marks the wrapping sector.
    pub fn range(self) -> (f64, f64) {
        match self {
            CompassZone::North => (337.5, 22.5),
            CompassZone::NorthEast => (22.5, 67.5),
            CompassZone::East => (67.5, 112.5),
            CompassZone::SouthEast => (112.5, 157.5),
            CompassZone::South => (157.5, 202.5),
            CompassZone::SouthWest => (202.5, 247.5),
            CompassZone::West => (247.5, 292.5),
            CompassZone::NorthWest => (292.5, 337.5),
        }
    }

    /// Whether a bearing already in `[0, 360)` falls in this sector.
    pub fn contains(self, bearing: f64) -> bool {
        let (start, end) = self.range();
        if start <= end {
            start <= bearing && bearing < end
        } else {
            bearing >= start || bearing < end
        }
    }

    /// Sector for any bearing. Non-finite input falls back to `North`.
    pub fn from_bearing(bearing: f64) -> CompassZone {
        let b = normalize_degrees(bearing);
        CompassZone::ALL
            .into_iter()
            .find(|z| z.contains(b))
            .unwrap_or(CompassZone::North)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompassZone::North => "north",
            CompassZone::NorthEast => "north_east",
            CompassZone::East => "east",
            CompassZone::SouthEast => "south_east",
            CompassZone::South => "south",
            CompassZone::SouthWest => "south_west",
            CompassZone::West => "west",
            CompassZone::NorthWest => "north_west",
        }
    }
}

impl fmt::Display for CompassZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap into `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Bearing of the offset `(dx, dy)` in degrees, in `[0, 360)`.
#[inline]
pub fn bearing(dx: f64, dy: f64) -> f64 {
    normalize_degrees(dx.atan2(dy).to_degrees())
}
