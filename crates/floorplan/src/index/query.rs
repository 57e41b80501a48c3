use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CountDimension, Index};
use crate::category::Category;
use crate::geom::Geometry;
use crate::record::{FloorPlanRecord, RecordId};

/// Search constraints.
///
/// Count constraints of `0` and area bounds `<= 0` are treated as unconstrained,
/// same as `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub bedrooms: Option<usize>,
    pub bathrooms: Option<usize>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub require_kitchen: bool,
    pub limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            bedrooms: None,
            bathrooms: None,
            min_area: None,
            max_area: None,
            require_kitchen: false,
            limit: 10,
        }
    }
}

impl SearchQuery {
    /// Effective exact-count constraint for `dim`.
    pub fn count(&self, dim: CountDimension) -> Option<usize> {
        let v = match dim {
            CountDimension::Bedrooms => self.bedrooms,
            CountDimension::Bathrooms => self.bathrooms,
        };
        v.filter(|&n| n > 0)
    }

    #[inline]
    pub fn min_bound(&self) -> Option<f64> {
        self.min_area.filter(|a| *a > 0.0)
    }

    #[inline]
    pub fn max_bound(&self) -> Option<f64> {
        self.max_area.filter(|a| *a > 0.0)
    }
}

/// Ranking hook: higher scores come first.
pub trait Relevance<G> {
    fn score(&self, record: &FloorPlanRecord<G>) -> f64;
}

/// Every candidate gets the same score, so results keep id order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform(pub f64);

impl Default for Uniform {
    fn default() -> Self {
        Uniform(100.0)
    }
}

impl<G> Relevance<G> for Uniform {
    #[inline]
    fn score(&self, _record: &FloorPlanRecord<G>) -> f64 {
        self.0
    }
}

/// Prefer records whose area is close to `target`; 100 on an exact match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaProximity {
    pub target: f64,
}

impl<G> Relevance<G> for AreaProximity {
    fn score(&self, record: &FloorPlanRecord<G>) -> f64 {
        if !(self.target.is_finite() && self.target > 0.0) {
            return 100.0;
        }
        let rel = (record.area - self.target).abs() / self.target;
        100.0 / (1.0 + rel)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SearchHit<'a, G> {
    pub id: RecordId,
    pub record: &'a FloorPlanRecord<G>,
    pub score: f64,
}

impl<G: Geometry> Index<G> {
    /// Search with the uniform baseline score.
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit<'_, G>> {
        self.search_with(query, &Uniform::default())
    }

    /// Search, rank by `relevance` (descending, ties by id), truncate to `query.limit`.
    pub fn search_with<R>(&self, query: &SearchQuery, relevance: &R) -> Vec<SearchHit<'_, G>>
    where
        R: Relevance<G> + ?Sized,
    {
        let mut hits: Vec<SearchHit<'_, G>> = self
            .candidates(query)
            .into_iter()
            .filter_map(|id| {
                self.get(id).map(|record| SearchHit {
                    id,
                    record,
                    score: relevance.score(record),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)));
        hits.truncate(query.limit);
        hits
    }

    /// Unranked set of ids satisfying every constraint.
    pub fn candidates(&self, query: &SearchQuery) -> BTreeSet<RecordId> {
        let mut cands = self.indexed().clone();
        for dim in CountDimension::ALL {
            let Some(n) = query.count(dim) else {
                continue;
            };
            match self.count_index(dim).get(&n) {
                Some(bucket) => cands.retain(|id| bucket.contains(id)),
                None => return BTreeSet::new(),
            }
        }
        let (lo, hi) = (query.min_bound(), query.max_bound());
        if lo.is_some() || hi.is_some() {
            let in_range = self.area_scan(lo, hi);
            cands.retain(|id| in_range.contains(id));
        }
        if query.require_kitchen {
            cands.retain(|id| self.get(*id).is_some_and(|r| r.has(Category::Kitchen)));
        }
        cands
    }

    /// Ids with `min <= area <= max`, scanning `area_sorted` and stopping at the
    /// first area above `max`.
    pub fn area_scan(&self, min: Option<f64>, max: Option<f64>) -> BTreeSet<RecordId> {
        let mut out = BTreeSet::new();
        for &(area, id) in self.area_sorted() {
            if min.is_some_and(|lo| area < lo) {
                continue;
            }
            if max.is_some_and(|hi| area > hi) {
                break;
            }
            out.insert(id);
        }
        out
    }
}
