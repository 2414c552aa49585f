//! Properties of the listing pipeline over the demo catalog.

use lostfound::seed::demo_items;
use lostfound::{
    Category, CategoryFilter, ItemCatalog, KindFilter, ListingFilter, MatchPolicy, ScoreWeights,
    ScoredItem, aggregate, partition,
};

fn scored_demo() -> Vec<ScoredItem> {
    aggregate(&demo_items(), &ScoreWeights::default())
}

fn ids(items: &[ScoredItem]) -> Vec<u64> {
    items.iter().map(ScoredItem::id).collect()
}

fn filters() -> Vec<ListingFilter> {
    let mut out = Vec::new();
    for search in ["", "wallet", "STATION", "mall", "nothing-here"] {
        for kind in [KindFilter::All, KindFilter::Lost, KindFilter::Found] {
            for category in [
                CategoryFilter::All,
                CategoryFilter::Only(Category::Bags),
                CategoryFilter::Only(Category::Electronics),
            ] {
                out.push(
                    ListingFilter::new()
                        .with_search(search)
                        .with_kind(kind)
                        .with_category(category),
                );
            }
        }
    }
    out
}

#[test]
fn filtering_is_idempotent() {
    let scored = scored_demo();
    for filter in filters() {
        let once = filter.apply(&scored);
        let twice = filter.apply(&once);
        assert_eq!(once, twice, "filter {filter:?}");
    }
}

#[test]
fn empty_search_is_a_no_op_on_kind_and_category() {
    let scored = scored_demo();
    for kind in [KindFilter::All, KindFilter::Lost, KindFilter::Found] {
        let structural = ListingFilter::new().with_kind(kind);
        let with_empty_search = structural.clone().with_search("");
        assert_eq!(structural.apply(&scored), with_empty_search.apply(&scored));
    }
}

#[test]
fn filter_output_is_an_ordered_subsequence() {
    let scored = scored_demo();
    let all = ids(&scored);
    for filter in filters() {
        let kept = ids(&filter.apply(&scored));
        let mut cursor = all.iter();
        for id in &kept {
            assert!(cursor.any(|x| x == id), "{id} out of order for {filter:?}");
        }
    }
}

#[test]
fn buckets_cover_filtered_listing_exactly() {
    let scored = scored_demo();
    for filter in filters() {
        let filtered = filter.apply(&scored);
        let buckets = partition(filtered.clone(), 75);
        assert_eq!(buckets.total(), filtered.len());
        assert!(buckets.possible_matches.iter().all(|s| s.match_score > 75));
        assert!(buckets.others.iter().all(|s| s.match_score <= 75));
    }
}

#[test]
fn catalog_query_matches_manual_pipeline() {
    let catalog = ItemCatalog::seeded(MatchPolicy::default());
    let filter = ListingFilter::new().with_search("backpack");
    let buckets = catalog.query(&filter);
    assert_eq!(ids(&buckets.possible_matches), vec![3, 4]);
    assert!(buckets.others.is_empty());
}

#[test]
fn lowering_the_threshold_promotes_wallets() {
    let policy = MatchPolicy {
        weights: ScoreWeights::default(),
        high_match_threshold: 30,
    };
    let catalog = ItemCatalog::seeded(policy);
    let buckets = catalog.query(&ListingFilter::new());
    assert_eq!(buckets.possible_matches.len(), 6);
}
