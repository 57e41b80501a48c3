use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use super::*;
use crate::error::DataIntegrityError;
use crate::testutil::{record, rooms, store, Flaky};

fn three_plans() -> Index {
    Index::build(store(vec![
        record(120.0, 2, 1, true),
        record(80.0, 3, 2, false),
        record(95.0, 2, 2, true),
    ]))
    .unwrap()
}

#[test]
fn empty_store_is_fatal() {
    let err = Index::build(RecordStore::<Region>::new(Vec::new())).unwrap_err();
    assert_eq!(err, DataIntegrityError::EmptyStore);
}

#[test]
fn buckets_and_area_order() {
    let idx = three_plans();
    let beds = idx.count_index(CountDimension::Bedrooms);
    assert_eq!(beds.get(&2), Some(&BTreeSet::from([0, 2])));
    assert_eq!(beds.get(&3), Some(&BTreeSet::from([1])));
    let baths = idx.count_index(CountDimension::Bathrooms);
    assert_eq!(baths.get(&1), Some(&BTreeSet::from([0])));
    assert_eq!(baths.get(&2), Some(&BTreeSet::from([1, 2])));
    let order: Vec<RecordId> = idx.area_sorted().iter().map(|(_, id)| *id).collect();
    assert_eq!(order, vec![1, 2, 0]);
}

#[test]
fn equal_areas_keep_id_order() {
    let idx = Index::build(store(vec![
        record(50.0, 1, 1, true),
        record(10.0, 1, 1, true),
        record(50.0, 1, 1, true),
        record(10.0, 1, 1, true),
    ]))
    .unwrap();
    assert_eq!(
        idx.area_sorted(),
        &[(10.0, 1), (10.0, 3), (50.0, 0), (50.0, 2)]
    );
}

#[test]
fn unconstrained_search_returns_store_order() {
    let idx = three_plans();
    let q = SearchQuery {
        limit: 5,
        ..SearchQuery::default()
    };
    let hits = idx.search(&q);
    let ids: Vec<RecordId> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(hits.iter().all(|h| h.score == hits[0].score));
    assert!(std::ptr::eq(hits[1].record, idx.get(1).unwrap()));
}

#[test]
fn missing_bucket_is_empty_not_error() {
    let idx = three_plans();
    let q = SearchQuery {
        bedrooms: Some(4),
        ..SearchQuery::default()
    };
    assert!(idx.search(&q).is_empty());
}

#[test]
fn zero_counts_and_bounds_mean_any() {
    let idx = three_plans();
    let q = SearchQuery {
        bedrooms: Some(0),
        bathrooms: Some(0),
        min_area: Some(0.0),
        max_area: Some(-1.0),
        ..SearchQuery::default()
    };
    assert_eq!(idx.search(&q).len(), 3);
}

#[test]
fn combined_constraints() {
    let idx = three_plans();
    let q = SearchQuery {
        bedrooms: Some(2),
        min_area: Some(90.0),
        max_area: Some(100.0),
        require_kitchen: true,
        ..SearchQuery::default()
    };
    let ids: Vec<RecordId> = idx.search(&q).iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![2]);

    let only_max = SearchQuery {
        max_area: Some(95.0),
        ..SearchQuery::default()
    };
    assert_eq!(idx.candidates(&only_max), BTreeSet::from([1, 2]));

    let kitchens = SearchQuery {
        require_kitchen: true,
        ..SearchQuery::default()
    };
    assert_eq!(idx.candidates(&kitchens), BTreeSet::from([0, 2]));
}

#[test]
fn limit_truncates_after_ranking() {
    let idx = three_plans();
    let q = SearchQuery {
        limit: 1,
        ..SearchQuery::default()
    };
    let hits = idx.search_with(&q, &AreaProximity { target: 100.0 });
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
    assert!(idx.search(&SearchQuery { limit: 0, ..q }).is_empty());
}

#[test]
fn proximity_ties_break_by_id() {
    let idx = Index::build(store(vec![
        record(90.0, 1, 1, true),
        record(110.0, 1, 1, true),
        record(100.0, 1, 1, true),
    ]))
    .unwrap();
    let ids: Vec<RecordId> = idx
        .search_with(&SearchQuery::default(), &AreaProximity { target: 100.0 })
        .iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(ids, vec![2, 0, 1]);
}

#[test]
fn malformed_records_are_skipped() {
    let good = |beds: usize| {
        let mut regions = BTreeMap::new();
        regions.insert(Category::Bedroom, Flaky::Good(rooms(beds, 0.0)));
        FloorPlanRecord::new(0, regions, 70.0)
    };
    let mut broken = BTreeMap::new();
    broken.insert(Category::Bathroom, Flaky::Broken);
    let records = vec![
        good(1),
        FloorPlanRecord::new(0, broken, 70.0),
        FloorPlanRecord::new(0, BTreeMap::new(), f64::NAN),
        good(2),
    ];
    let idx = Index::build(RecordStore::new(records)).unwrap();
    assert_eq!(idx.indexed(), &BTreeSet::from([0, 3]));
    assert_eq!(idx.area_sorted().len(), 2);
    let skipped: Vec<(RecordId, Option<Category>)> =
        idx.skipped().iter().map(|m| (m.id, m.category)).collect();
    assert_eq!(skipped, vec![(1, Some(Category::Bathroom)), (2, None)]);
    // Skipped records stay reachable by id but never match a search.
    assert!(idx.get(1).is_some());
    let ids: Vec<RecordId> = idx.search(&SearchQuery::default()).iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![0, 3]);
}

#[test]
fn all_malformed_is_fatal() {
    let mut broken = BTreeMap::new();
    broken.insert(Category::Bedroom, Flaky::Broken);
    let err = Index::build(RecordStore::new(vec![FloorPlanRecord::new(0, broken, 1.0)])).unwrap_err();
    assert_eq!(err, DataIntegrityError::NoUsableRecords { total: 1 });
}

fn arb_records() -> impl Strategy<Value = Vec<(f64, usize, usize, bool)>> {
    prop::collection::vec(
        ((0u32..40).prop_map(|a| a as f64 * 2.5), 0usize..4, 0usize..3, any::<bool>()),
        1..30,
    )
}

fn build(rows: &[(f64, usize, usize, bool)]) -> Index {
    let records = rows
        .iter()
        .map(|&(a, b, t, k)| record(a, b, t, k))
        .collect();
    Index::build(store(records)).unwrap()
}

proptest! {
    #[test]
    fn every_id_indexed_once(rows in arb_records()) {
        let idx = build(&rows);
        for id in 0..rows.len() {
            for dim in CountDimension::ALL {
                let hits = idx.count_index(dim).values().filter(|b| b.contains(&id)).count();
                prop_assert_eq!(hits, 1);
            }
            let n = idx.area_sorted().iter().filter(|(_, i)| *i == id).count();
            prop_assert_eq!(n, 1);
        }
        prop_assert_eq!(idx.area_sorted().len(), rows.len());
    }

    #[test]
    fn area_scan_matches_linear_filter(
        rows in arb_records(),
        lo in prop::option::of(0.0f64..100.0),
        hi in prop::option::of(0.0f64..100.0),
    ) {
        let idx = build(&rows);
        let scanned = idx.area_scan(lo, hi);
        let linear: BTreeSet<RecordId> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| lo.map_or(true, |l| r.0 >= l) && hi.map_or(true, |h| r.0 <= h))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(scanned, linear);
    }

    #[test]
    fn extra_constraint_never_grows(rows in arb_records(), baths in 1usize..3, beds in 1usize..4) {
        let idx = build(&rows);
        let loose = SearchQuery { bedrooms: Some(beds), limit: usize::MAX, ..SearchQuery::default() };
        let tight = SearchQuery { bathrooms: Some(baths), ..loose.clone() };
        let kitchen = SearchQuery { require_kitchen: true, ..tight.clone() };
        let a = idx.candidates(&loose);
        let b = idx.candidates(&tight);
        let c = idx.candidates(&kitchen);
        prop_assert!(b.is_subset(&a));
        prop_assert!(c.is_subset(&b));
    }
}
