//! Reproducible synthetic floor plans.
//!
//! Model
//! - A rectangular footprint (`inner`) placed on the canvas inside a parcel (`land`).
//! - The footprint is cut into a 4×4 grid; cells are shuffled and handed out to
//!   bedrooms, bathrooms, living, and optionally a kitchen. Multi-cell rooms become
//!   multi-part regions.
//! - Walls frame the footprint; a front door, doors, windows and an optional balcony
//!   are small rectangles on its boundary.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::category::Category;
use crate::geom::{Polygon, Region};
use crate::record::{FloorPlanRecord, RecordStore};

const GRID: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct SynthCfg {
    pub canvas_size: f64,
    /// Footprint side range as a fraction of the canvas.
    pub min_side_frac: f64,
    pub max_side_frac: f64,
    pub max_bedrooms: usize,
    pub max_bathrooms: usize,
    pub kitchen_prob: f64,
    pub balcony_prob: f64,
    /// Reported area per canvas unit².
    pub area_scale: f64,
}

impl Default for SynthCfg {
    fn default() -> Self {
        Self {
            canvas_size: 256.0,
            min_side_frac: 0.45,
            max_side_frac: 0.8,
            max_bedrooms: 4,
            max_bathrooms: 3,
            kitchen_prob: 0.85,
            balcony_prob: 0.5,
            area_scale: 0.004,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One synthetic plan; `id` is set to `tok.index`.
pub fn synth_record(cfg: &SynthCfg, tok: ReplayToken) -> FloorPlanRecord {
    let mut rng = tok.to_std_rng();
    let canvas = cfg.canvas_size.max(1.0);
    let lo = cfg.min_side_frac.clamp(0.05, 0.95);
    let hi = cfg.max_side_frac.clamp(lo, 0.95);
    let w = canvas * rng.gen_range(lo..=hi);
    let h = canvas * rng.gen_range(lo..=hi);
    let x0 = rng.gen_range(0.0..=(canvas - w));
    let y0 = rng.gen_range(0.0..=(canvas - h));
    let (cw, ch) = (w / GRID as f64, h / GRID as f64);

    let mut cells: Vec<(usize, usize)> = (0..GRID)
        .flat_map(|i| (0..GRID).map(move |j| (i, j)))
        .collect();
    cells.shuffle(&mut rng);
    let mut take = |n: usize| -> Vec<Polygon> {
        let n = n.min(cells.len());
        cells
            .drain(..n)
            .map(|(i, j)| {
                let x = x0 + i as f64 * cw;
                let y = y0 + j as f64 * ch;
                Polygon::rect(x, y, x + cw, y + ch)
            })
            .collect()
    };

    let mut regions = BTreeMap::new();
    let beds = rng.gen_range(0..=cfg.max_bedrooms);
    let baths = rng.gen_range(0..=cfg.max_bathrooms);
    let kitchen = rng.gen_bool(cfg.kitchen_prob.clamp(0.0, 1.0));
    regions.insert(Category::Bedroom, Region::from_parts(take(beds)));
    regions.insert(Category::Bathroom, Region::from_parts(take(baths)));
    if kitchen {
        regions.insert(Category::Kitchen, Region::from_parts(take(1)));
    }
    regions.insert(Category::Living, Region::from_parts(take(2)));

    let t = (w.min(h) * 0.02).max(0.5);
    regions.insert(Category::Inner, Polygon::rect(x0, y0, x0 + w, y0 + h).into());
    regions.insert(
        Category::Wall,
        Region::Multi(vec![
            Polygon::rect(x0, y0, x0 + w, y0 + t),
            Polygon::rect(x0, y0 + h - t, x0 + w, y0 + h),
            Polygon::rect(x0, y0, x0 + t, y0 + h),
            Polygon::rect(x0 + w - t, y0, x0 + w, y0 + h),
        ]),
    );
    let door_x = x0 + rng.gen_range(0.1..0.8) * w;
    regions.insert(
        Category::FrontDoor,
        Polygon::rect(door_x, y0, door_x + 3.0 * t, y0 + t).into(),
    );
    regions.insert(
        Category::Door,
        Polygon::rect(x0 + cw - t, y0 + ch, x0 + cw + t, y0 + ch + 3.0 * t).into(),
    );
    let win_y = y0 + rng.gen_range(0.1..0.8) * h;
    regions.insert(
        Category::Window,
        Polygon::rect(x0 + w - t, win_y, x0 + w, win_y + 4.0 * t).into(),
    );
    if rng.gen_bool(cfg.balcony_prob.clamp(0.0, 1.0)) {
        let by = (y0 + h + 6.0 * t).min(canvas);
        regions.insert(
            Category::Balcony,
            Polygon::rect(x0 + 0.25 * w, y0 + h, x0 + 0.75 * w, by).into(),
        );
    }
    let margin = 0.04 * canvas;
    regions.insert(
        Category::Land,
        Polygon::rect(
            (x0 - margin).max(0.0),
            (y0 - margin).max(0.0),
            (x0 + w + margin).min(canvas),
            (y0 + h + margin).min(canvas),
        )
        .into(),
    );

    let area = w * h * cfg.area_scale;
    FloorPlanRecord::new(tok.index as usize, regions, area)
}

/// `count` plans drawn with tokens `(seed, 0..count)`.
pub fn synth_store(cfg: &SynthCfg, seed: u64, count: usize) -> RecordStore {
    RecordStore::new(
        (0..count as u64)
            .map(|index| synth_record(cfg, ReplayToken { seed, index }))
            .collect(),
    )
}
