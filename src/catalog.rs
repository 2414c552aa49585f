//! In-memory item catalog and the listing query contract.
//!
//! The catalog owns the raw reports and each viewer's liked set. Every query
//! clones a snapshot under a read lock and runs the full
//! aggregate → filter → partition pipeline over it, so derived scores always
//! reflect the current set.
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::aggregate::{ScoredItem, aggregate};
use crate::config::{LostFoundConfig, MatchPolicy};
use crate::filter::{ListingBuckets, ListingFilter, partition};
use crate::item::{ItemError, ItemRecord, NewItemReport};
use crate::seed::demo_items;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid report: {0}")]
    Item(#[from] ItemError),
    #[error("item {0} not found")]
    NotFound(u64),
}

/// A scored item together with the record it matched, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub scored: ScoredItem,
    pub match_item: Option<ItemRecord>,
}

pub struct ItemCatalog {
    items: RwLock<Vec<ItemRecord>>,
    liked: RwLock<HashMap<String, HashSet<u64>>>,
    policy: MatchPolicy,
}

impl ItemCatalog {
    /// An empty catalog.
    pub fn new(policy: MatchPolicy) -> Self {
        Self::with_items(Vec::new(), policy)
    }

    pub fn with_items(items: Vec<ItemRecord>, policy: MatchPolicy) -> Self {
        Self {
            items: RwLock::new(items),
            liked: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// A catalog holding the demo reports.
    pub fn seeded(policy: MatchPolicy) -> Self {
        Self::with_items(demo_items(), policy)
    }

    pub fn from_config(config: &LostFoundConfig) -> Self {
        if config.seed_demo_data {
            Self::seeded(config.policy)
        } else {
            Self::new(config.policy)
        }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    fn read_items(&self) -> RwLockReadGuard<'_, Vec<ItemRecord>> {
        self.items
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_items(&self) -> RwLockWriteGuard<'_, Vec<ItemRecord>> {
        self.items
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.read_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_items().is_empty()
    }

    /// Copy of the current record set, in insertion order.
    pub fn snapshot(&self) -> Vec<ItemRecord> {
        self.read_items().clone()
    }

    /// Every item with its best cross-kind match.
    pub fn scored(&self) -> Vec<ScoredItem> {
        aggregate(&self.snapshot(), &self.policy.weights)
    }

    /// Run the listing pipeline for one set of viewer criteria.
    pub fn query(&self, filter: &ListingFilter) -> ListingBuckets {
        let scored = self.scored();
        let filtered = filter.apply(&scored);
        partition(filtered, self.policy.high_match_threshold)
    }

    /// Add a report. The new id is one past the largest existing id.
    pub fn submit(&self, report: NewItemReport) -> Result<ScoredItem, CatalogError> {
        let record = {
            let mut items = self.write_items();
            let id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
            let record = report.into_record(id)?;
            items.push(record.clone());
            record
        };
        info!(
            item_id = record.id,
            kind = %record.kind,
            category = %record.category,
            "report_submitted"
        );

        // Scores of every item may have changed, so recompute from scratch.
        let id = record.id;
        self.scored()
            .into_iter()
            .find(|scored| scored.id() == id)
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn detail(&self, id: u64) -> Result<ItemDetail, CatalogError> {
        let snapshot = self.snapshot();
        let scored = aggregate(&snapshot, &self.policy.weights)
            .into_iter()
            .find(|scored| scored.id() == id)
            .ok_or(CatalogError::NotFound(id))?;
        let match_item = scored
            .match_with
            .and_then(|match_id| snapshot.iter().find(|item| item.id == match_id).cloned());
        Ok(ItemDetail { scored, match_item })
    }

    /// Flip `viewer`'s liked flag on an item and return the new state.
    pub fn toggle_like(&self, viewer: &str, id: u64) -> Result<bool, CatalogError> {
        if !self.read_items().iter().any(|item| item.id == id) {
            return Err(CatalogError::NotFound(id));
        }
        let mut liked = self
            .liked
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let set = liked.entry(viewer.to_string()).or_default();
        let now_liked = if set.remove(&id) {
            false
        } else {
            set.insert(id);
            true
        };
        Ok(now_liked)
    }

    /// Ids `viewer` has liked.
    pub fn liked_by(&self, viewer: &str) -> HashSet<u64> {
        self.liked
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(viewer)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::seeded(MatchPolicy::default())
    }
}
