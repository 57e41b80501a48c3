use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use floorplan::index::AreaProximity;
use floorplan::prelude::*;
use floorplan::synth::{synth_store, SynthCfg};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod export;
mod provenance;

use provenance::{ensure_parent, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "floorplan")]
#[command(about = "Search a floor-plan store and orient plans by compass zone")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Search constraints; 0 means "any".
#[derive(Args, Clone, Debug)]
struct Filters {
    #[arg(long, default_value_t = 2)]
    bedrooms: usize,
    #[arg(long, default_value_t = 2)]
    bathrooms: usize,
    #[arg(long, default_value_t = 80.0)]
    min_area: f64,
    #[arg(long, default_value_t = 150.0)]
    max_area: f64,
    /// Also accept plans without a kitchen
    #[arg(long)]
    any_kitchen: bool,
}

impl Filters {
    fn request(&self, orient: bool) -> PlanRequest {
        PlanRequest {
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            min_area: self.min_area,
            max_area: self.max_area,
            require_kitchen: !self.any_kitchen,
            orient,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct OrientArgs {
    /// JSON placement table; defaults to the classic rules
    #[arg(long)]
    placement: Option<PathBuf>,
    #[arg(long, default_value_t = 256.0)]
    canvas_size: f64,
}

#[derive(Subcommand)]
enum Action {
    /// List matching plans; optionally write them as CSV/Parquet
    Search {
        #[arg(long)]
        store: PathBuf,
        #[command(flatten)]
        filters: Filters,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Rank by closeness to this area instead of store order
        #[arg(long)]
        target_area: Option<f64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Pick the first matching plan, optionally oriented
    Generate {
        #[arg(long)]
        store: PathBuf,
        #[command(flatten)]
        filters: Filters,
        #[arg(long)]
        orient: bool,
        #[command(flatten)]
        orient_args: OrientArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Orient one stored plan and print its compliance report
    Orient {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        id: RecordId,
        #[command(flatten)]
        orient_args: OrientArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a reproducible synthetic record store
    Synth {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Search {
            store,
            filters,
            limit,
            target_area,
            out,
        } => search(&store, &filters, limit, target_area, out.as_deref()).map(|_| ()),
        Action::Generate {
            store,
            filters,
            orient,
            orient_args,
            out,
        } => generate(&store, &filters, orient, &orient_args, out.as_deref()).map(|_| ()),
        Action::Orient {
            store,
            id,
            orient_args,
            out,
        } => orient(&store, id, &orient_args, out.as_deref()).map(|_| ()),
        Action::Synth { count, seed, out } => synth(count, seed, &out),
        Action::Report => report(),
    }
}

fn load_index(path: &Path) -> Result<Index> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading store {}", path.display()))?;
    let store = RecordStore::from_json_str(&text)
        .with_context(|| format!("parsing store {}", path.display()))?;
    let idx = Index::build(store).with_context(|| format!("indexing {}", path.display()))?;
    if !idx.skipped().is_empty() {
        tracing::warn!(skipped = idx.skipped().len(), "some records were not indexed");
    }
    Ok(idx)
}

fn load_optimizer(args: &OrientArgs) -> Result<Optimizer> {
    let table = match &args.placement {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading placement table {}", path.display()))?;
            serde_json::from_str::<PlacementTable>(&text)
                .with_context(|| format!("parsing placement table {}", path.display()))?
        }
        None => PlacementTable::classic(),
    };
    let cfg = OptimizerCfg::new(args.canvas_size).context("invalid --canvas-size")?;
    tracing::info!(version = table.version(), canvas_size = cfg.canvas_size(), "placement table");
    Ok(Optimizer::new(table, cfg))
}

fn write_record(out: &Path, record: &FloorPlanRecord, payload: Payload) -> Result<()> {
    ensure_parent(out)?;
    fs::write(out, serde_json::to_vec_pretty(&record.to_document())?)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(out, payload)?;
    Ok(())
}

fn search(
    store: &Path,
    filters: &Filters,
    limit: usize,
    target_area: Option<f64>,
    out: Option<&Path>,
) -> Result<usize> {
    let idx = load_index(store)?;
    let query = SearchQuery {
        limit,
        ..filters.request(false).to_query()
    };
    tracing::info!(?query, "search");
    let hits = match target_area {
        Some(target) => idx.search_with(&query, &AreaProximity { target }),
        None => idx.search(&query),
    };
    if hits.is_empty() {
        println!("no matching floor plans; try relaxing the criteria");
    }
    for h in &hits {
        let s = PlanSummary::of(h.record);
        println!(
            "#{:<6} area {:>8.2}  bedrooms {}  bathrooms {}  kitchen {}  score {:.1}",
            h.id, s.area, s.bedrooms, s.bathrooms, s.kitchen, h.score
        );
    }
    if let Some(out) = out {
        let mut df = export::hits_frame(&hits)?;
        export::write_frame(out, &mut df)?;
        let payload = Payload::new(json!({ "query": query, "target_area": target_area }))
            .with_input(store);
        write_sidecar(out, payload)?;
    }
    Ok(hits.len())
}

fn generate(
    store: &Path,
    filters: &Filters,
    orient: bool,
    orient_args: &OrientArgs,
    out: Option<&Path>,
) -> Result<Option<RecordId>> {
    let idx = load_index(store)?;
    let optimizer = load_optimizer(orient_args)?;
    let req = filters.request(orient);
    let Some(planned) = Planner::new(&idx, optimizer).generate(&req) else {
        println!("no matching floor plans; try relaxing the criteria");
        return Ok(None);
    };
    println!("{}", planned.summary);
    if let Some(out) = out {
        let payload = Payload::new(json!({ "request": req })).with_input(store);
        write_record(out, &planned.record, payload)?;
    }
    Ok(Some(planned.id))
}

fn orient(
    store: &Path,
    id: RecordId,
    orient_args: &OrientArgs,
    out: Option<&Path>,
) -> Result<FloorPlanRecord> {
    let idx = load_index(store)?;
    let record = idx
        .get(id)
        .with_context(|| format!("no record with id {id} (store has {})", idx.store().len()))?;
    let optimizer = load_optimizer(orient_args)?;
    let oriented = optimizer.apply(record);
    println!("{}", PlanSummary::of(&oriented));
    if let Some(out) = out {
        let payload = Payload::new(json!({
            "id": id,
            "canvas_size": orient_args.canvas_size,
            "placement_version": optimizer.table().version(),
        }))
        .with_input(store);
        write_record(out, &oriented, payload)?;
    }
    Ok(oriented)
}

fn synth(count: usize, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(count, seed, out = %out.display(), "synth");
    let store = synth_store(&SynthCfg::default(), seed, count);
    ensure_parent(out)?;
    fs::write(out, store.to_json_string()?).with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(out, Payload::new(json!({ "count": count, "seed": seed })))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block(&Payload::new(json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
