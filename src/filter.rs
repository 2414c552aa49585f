//! Listing filter and high-match bucketing.
//!
//! A [`ListingFilter`] narrows an aggregated listing by three ANDed
//! predicates: free-text search over title/description/location, report kind
//! and category. Filtering is stable, so the output keeps the input's relative
//! order. [`partition`] then splits the filtered listing into the "possible
//! matches" and "other items" buckets shown to viewers.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::ScoredItem;
use crate::item::{Category, ItemError, ItemRecord, ReportKind};

/// Scores strictly above this value land in the possible-matches bucket.
pub const DEFAULT_HIGH_MATCH_THRESHOLD: u8 = 75;

/// Report-kind predicate; `All` bypasses the check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Lost,
    Found,
}

impl KindFilter {
    fn admits(self, kind: ReportKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Lost => kind == ReportKind::Lost,
            KindFilter::Found => kind == ReportKind::Found,
        }
    }
}

impl FromStr for KindFilter {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(KindFilter::All);
        }
        Ok(match s.parse::<ReportKind>()? {
            ReportKind::Lost => KindFilter::Lost,
            ReportKind::Found => KindFilter::Found,
        })
    }
}

/// Category predicate; `All` bypasses the check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// "All" followed by every category, as offered to viewers.
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ItemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.to_string()
    }
}

/// Viewer-entered listing criteria.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingFilter {
    /// Case-insensitive substring; empty matches everything.
    #[serde(default)]
    pub search: String,
    #[serde(default, rename = "type")]
    pub kind: KindFilter,
    #[serde(default)]
    pub category: CategoryFilter,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Whether a single record passes all three predicates.
    pub fn matches(&self, item: &ItemRecord) -> bool {
        self.admits(&self.search.to_lowercase(), item)
    }

    /// Keep the items that pass, in input order.
    pub fn apply(&self, items: &[ScoredItem]) -> Vec<ScoredItem> {
        let needle = self.search.to_lowercase();
        items
            .iter()
            .filter(|scored| self.admits(&needle, &scored.item))
            .cloned()
            .collect()
    }

    /// `needle` is the already-lowercased search text.
    fn admits(&self, needle: &str, item: &ItemRecord) -> bool {
        self.kind.admits(item.kind)
            && self.category.admits(item.category)
            && search_matches(needle, item)
    }
}

fn search_matches(needle: &str, item: &ItemRecord) -> bool {
    needle.is_empty()
        || item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.location.to_lowercase().contains(needle)
}

/// A filtered listing split by match strength.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingBuckets {
    /// Items scoring strictly above the threshold.
    pub possible_matches: Vec<ScoredItem>,
    /// Everything else, including unmatched items.
    pub others: Vec<ScoredItem>,
}

impl ListingBuckets {
    pub fn total(&self) -> usize {
        self.possible_matches.len() + self.others.len()
    }
}

/// Split a listing into high-match and other buckets, keeping order in each.
pub fn partition(items: Vec<ScoredItem>, threshold: u8) -> ListingBuckets {
    let (possible_matches, others) = items
        .into_iter()
        .partition(|scored| scored.match_score > threshold);
    ListingBuckets {
        possible_matches,
        others,
    }
}
