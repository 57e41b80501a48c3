//! Tabular export of search hits (CSV, or Parquet by file extension).

use anyhow::{Context, Result};
use floorplan::category::Category;
use floorplan::geom::Geometry;
use floorplan::index::SearchHit;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::provenance::ensure_parent;

/// One row per hit.
pub fn hits_frame<G: Geometry>(hits: &[SearchHit<'_, G>]) -> Result<DataFrame> {
    let ids: Vec<u64> = hits.iter().map(|h| h.id as u64).collect();
    let areas: Vec<f64> = hits.iter().map(|h| h.record.area).collect();
    let count = |c: Category| -> Vec<u32> {
        hits.iter()
            .map(|h| h.record.room_count(c).unwrap_or(0) as u32)
            .collect()
    };
    let bedrooms = count(Category::Bedroom);
    let bathrooms = count(Category::Bathroom);
    let kitchen: Vec<bool> = hits.iter().map(|h| h.record.has(Category::Kitchen)).collect();
    let scores: Vec<f64> = hits.iter().map(|h| h.score).collect();
    let df = df!(
        "id" => ids,
        "area" => areas,
        "bedrooms" => bedrooms,
        "bathrooms" => bathrooms,
        "kitchen" => kitchen,
        "score" => scores
    )?;
    Ok(df)
}

pub fn write_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("writing parquet {}", path.display()))?;
        }
        _ => {
            CsvWriter::new(file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing csv {}", path.display()))?;
        }
    }
    Ok(())
}
