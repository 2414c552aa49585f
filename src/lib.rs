//! Lost & found matching core.
//!
//! This crate holds everything about lost/found reports that is not HTTP:
//! the item model, the pairwise scorer, the cross-kind aggregator, the listing
//! filter and bucketing, per-viewer chat threads and the mock account flows.
//! The `lostfound-server` crate exposes it over REST.
//!
//! ```text
//! ItemRecord set ──aggregate()──▶ ScoredItem list ──ListingFilter::apply()──▶
//!     partition(threshold) ──▶ ListingBuckets { possible_matches, others }
//! ```
//!
//! All matching operations are pure, synchronous functions over a snapshot.
//! [`ItemCatalog`] wraps the snapshot-then-recompute cycle for callers that
//! need shared, mutable state.
//!
//! ## Example
//!
//! ```
//! use lostfound::{ItemCatalog, KindFilter, ListingFilter};
//!
//! let catalog = ItemCatalog::default();
//! let buckets = catalog.query(&ListingFilter::new().with_kind(KindFilter::Lost));
//! for item in &buckets.possible_matches {
//!     println!("{} scored {}", item.item.title, item.match_score);
//! }
//! ```

pub mod account;
pub mod aggregate;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod filter;
pub mod item;
pub mod metrics;
pub mod scorer;
pub mod seed;

pub use crate::account::{
    AuthError, IdentityIssuer, MIN_PASSWORD_LEN, Provider, SignInRequest, SignUpRequest, User,
    UuidIssuer, google_user, sign_in, sign_up,
};
pub use crate::aggregate::{ScoredItem, aggregate};
pub use crate::catalog::{CatalogError, ItemCatalog, ItemDetail};
pub use crate::chat::{ChatBook, ChatError, ChatMessage, ChatThread, Presence, Sender};
pub use crate::config::{ConfigLoadError, LostFoundConfig, MatchPolicy};
pub use crate::filter::{
    CategoryFilter, DEFAULT_HIGH_MATCH_THRESHOLD, KindFilter, ListingBuckets, ListingFilter,
    partition,
};
pub use crate::item::{Category, ItemError, ItemRecord, NewItemReport, ReportKind};
pub use crate::metrics::{AggregateMetrics, set_aggregate_metrics};
pub use crate::scorer::{ScoreBreakdown, ScoreWeights, explain, score, score_with};
