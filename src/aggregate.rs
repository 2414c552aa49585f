//! Best cross-kind match for every item in a snapshot.
//!
//! Lost items are scored against every Found item and Found items against
//! every Lost item. This is a full O(n·m) pass with no caching: callers run it
//! again on every change to the item set, so derived scores are never stale.
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item::{ItemRecord, ReportKind};
use crate::metrics::metrics_recorder;
use crate::scorer::{ScoreWeights, score_with};

/// An item paired with its best opposite-kind match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: ItemRecord,
    /// Best score against the opposite pool, 0 when nothing scored.
    pub match_score: u8,
    /// Id of the best-scoring opposite item; `None` unless `match_score > 0`.
    pub match_with: Option<u64>,
}

impl ScoredItem {
    /// Wrap a record with no match.
    pub fn unscored(item: ItemRecord) -> Self {
        Self {
            item,
            match_score: 0,
            match_with: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.item.id
    }
}

/// Score every item against the opposite pool, preserving input order.
///
/// Ties keep the first candidate in the opposite pool's input order.
pub fn aggregate(items: &[ItemRecord], weights: &ScoreWeights) -> Vec<ScoredItem> {
    let start = Instant::now();

    let (lost, found): (Vec<&ItemRecord>, Vec<&ItemRecord>) =
        items.iter().partition(|item| item.kind == ReportKind::Lost);

    let scored: Vec<ScoredItem> = items
        .iter()
        .map(|item| {
            let pool = match item.kind {
                ReportKind::Lost => &found,
                ReportKind::Found => &lost,
            };
            match best_match(item, pool, weights) {
                Some((id, score)) => ScoredItem {
                    item: item.clone(),
                    match_score: score,
                    match_with: Some(id),
                },
                None => ScoredItem::unscored(item.clone()),
            }
        })
        .collect();

    let pairs_scored = 2 * lost.len() * found.len();
    let elapsed = start.elapsed();
    debug!(
        items = items.len(),
        lost = lost.len(),
        found = found.len(),
        pairs_scored,
        elapsed_micros = elapsed.as_micros(),
        "aggregate_complete"
    );
    if let Some(recorder) = metrics_recorder() {
        recorder.record_aggregate(items.len(), pairs_scored, elapsed);
    }

    scored
}

/// Strictly-greater comparison against a running best that starts at zero,
/// so a zero-scoring candidate never becomes the match.
fn best_match(
    item: &ItemRecord,
    pool: &[&ItemRecord],
    weights: &ScoreWeights,
) -> Option<(u64, u8)> {
    let mut best: Option<(u64, u8)> = None;
    let mut best_score = 0u8;
    for candidate in pool {
        let s = score_with(item, candidate, weights);
        if s > best_score {
            best_score = s;
            best = Some((candidate.id, s));
        }
    }
    best
}
