//! Orient a handful of synthetic plans and print their compliance reports.
//!
//! Usage:
//!   cargo run -p floorplan --example orient_synth -- [count] [seed]
//!
//! Prints, per plan: chosen rotation, score, and one line per monitored room.

use floorplan::prelude::*;
use floorplan::synth::{synth_store, SynthCfg};

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(5usize);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025u64);

    let store = synth_store(&SynthCfg::default(), seed, count);
    let optimizer = Optimizer::new(PlacementTable::classic(), OptimizerCfg::default());
    for record in store.iter() {
        let oriented = optimizer.apply(record);
        let Some(meta) = oriented.orientation.as_ref() else {
            continue;
        };
        println!(
            "#{:<3} rotation {:>5.1}  score {:>6.2}",
            record.id, meta.rotation_degrees, meta.compliance_score
        );
        for line in &meta.report {
            println!("      {line}");
        }
    }
}
