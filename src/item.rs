//! Item report data model.
//!
//! An [`ItemRecord`] is one lost or found report. Records are immutable once
//! created; everything derived from them (match scores, match references,
//! listing buckets) is recomputed from a snapshot of the whole set and lives
//! in [`ScoredItem`](crate::ScoredItem), never on the record itself.
//!
//! ```text
//! NewItemReport ──validate()──▶ into_record(id) ──▶ ItemRecord
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a report describes something lost or something found.
///
/// The kind partitions any item set into exactly two pools; the aggregator
/// only ever scores an item against the opposite pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    /// The pool this kind is matched against.
    pub fn opposite(self) -> Self {
        match self {
            ReportKind::Lost => ReportKind::Found,
            ReportKind::Found => ReportKind::Lost,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Lost => "Lost",
            ReportKind::Found => "Found",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ItemError;

    /// Accepts `Lost`/`Found` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Ok(ReportKind::Lost),
            "found" => Ok(ReportKind::Found),
            _ => Err(ItemError::UnknownKind(s.to_string())),
        }
    }
}

/// Fixed category set a report is filed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Accessories,
    Bags,
    Electronics,
    Clothing,
    Documents,
    Jewelry,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Accessories,
        Category::Bags,
        Category::Electronics,
        Category::Clothing,
        Category::Documents,
        Category::Jewelry,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Accessories => "Accessories",
            Category::Bags => "Bags",
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Documents => "Documents",
            Category::Jewelry => "Jewelry",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ItemError::UnknownCategory(s.to_string()))
    }
}

/// A single lost or found report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    /// Compared by exact string equality when scoring.
    pub location: String,
    /// Display label such as "2 days ago"; never used for ordering.
    pub reported_at: String,
    pub category: Category,
    /// Quality label ("Good", "Excellent"), compared by exact equality.
    pub condition: String,
    /// Compared by case-insensitive containment in either direction.
    pub color: String,
    pub brand: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Errors raised while validating or parsing item reports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    /// A required report field was absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown report type: {0} (expected Lost or Found)")]
    UnknownKind(String),
}

/// Label given to reports submitted without a date.
pub const DEFAULT_REPORTED_AT: &str = "just now";

/// Payload of a report submission, before an id has been assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItemReport {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewItemReport {
    /// Check that every required field is present and non-blank.
    ///
    /// Fields are checked in form order (title, category, description,
    /// location) so the first missing one is reported. The date is optional
    /// and defaults to [`DEFAULT_REPORTED_AT`].
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.title.trim().is_empty() {
            return Err(ItemError::MissingField("title"));
        }
        if self.category.is_none() {
            return Err(ItemError::MissingField("category"));
        }
        if self.description.trim().is_empty() {
            return Err(ItemError::MissingField("description"));
        }
        if self.location.trim().is_empty() {
            return Err(ItemError::MissingField("location"));
        }
        Ok(())
    }

    /// Validate and turn the submission into a record with the given id.
    pub fn into_record(self, id: u64) -> Result<ItemRecord, ItemError> {
        self.validate()?;
        let category = self.category.ok_or(ItemError::MissingField("category"))?;
        let date = self
            .date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_REPORTED_AT.to_string());

        Ok(ItemRecord {
            id,
            kind: self.kind,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            reported_at: date,
            category,
            condition: self.condition.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            image: self.image,
        })
    }
}
