//! Form-style entry point: pick the best match for a request and optionally orient it.

use serde::{Deserialize, Serialize};

use crate::geom::{Geometry, Region};
use crate::index::{Index, SearchQuery};
use crate::orient::Optimizer;
use crate::record::{FloorPlanRecord, RecordId};
use crate::summary::PlanSummary;

/// Request as collected by a front-end; zero means "any".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub bedrooms: usize,
    pub bathrooms: usize,
    pub min_area: f64,
    pub max_area: f64,
    pub require_kitchen: bool,
    pub orient: bool,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            bedrooms: 2,
            bathrooms: 2,
            min_area: 80.0,
            max_area: 150.0,
            require_kitchen: true,
            orient: false,
        }
    }
}

impl PlanRequest {
    /// Single-result query with zero values mapped to "unconstrained".
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            bedrooms: (self.bedrooms > 0).then_some(self.bedrooms),
            bathrooms: (self.bathrooms > 0).then_some(self.bathrooms),
            min_area: (self.min_area > 0.0).then_some(self.min_area),
            max_area: (self.max_area > 0.0).then_some(self.max_area),
            require_kitchen: self.require_kitchen,
            limit: 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlannedFloor<G = Region> {
    pub id: RecordId,
    /// The stored record, or an oriented copy of it.
    pub record: FloorPlanRecord<G>,
    pub summary: PlanSummary,
}

pub struct Planner<'a, G = Region> {
    index: &'a Index<G>,
    optimizer: Optimizer,
}

impl<'a, G: Geometry> Planner<'a, G> {
    pub fn new(index: &'a Index<G>, optimizer: Optimizer) -> Self {
        Self { index, optimizer }
    }

    /// `None` when no stored plan matches.
    pub fn generate(&self, req: &PlanRequest) -> Option<PlannedFloor<G>> {
        let hit = self.index.search(&req.to_query()).into_iter().next()?;
        let record = if req.orient {
            self.optimizer.apply(hit.record)
        } else {
            hit.record.clone()
        };
        let summary = PlanSummary::of(&record);
        Some(PlannedFloor {
            id: hit.id,
            record,
            summary,
        })
    }
}
