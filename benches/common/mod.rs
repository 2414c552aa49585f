//! Common utilities for lostfound benchmarks
//!
//! Synthetic report sets with a controllable size and an even Lost/Found split.

#![allow(dead_code)]

use lostfound::{Category, ItemRecord, ReportKind};

const LOCATIONS: [&str; 6] = [
    "Downtown Area",
    "Main Street",
    "Train Station",
    "Shopping Mall",
    "Central Library",
    "Harbor",
];

const COLORS: [&str; 7] = ["Black", "Brown", "Blue", "Navy", "Silver", "Dark Red", "Red"];

const CONDITIONS: [&str; 3] = ["Good", "Excellent", "Worn"];

/// Deterministic synthetic reports, alternating Lost and Found.
pub fn create_sample_items(count: usize) -> Vec<ItemRecord> {
    (0..count)
        .map(|i| ItemRecord {
            id: i as u64 + 1,
            kind: if i % 2 == 0 { ReportKind::Lost } else { ReportKind::Found },
            title: format!("Item {i}"),
            description: format!("Synthetic report number {i}"),
            location: LOCATIONS[i % LOCATIONS.len()].to_string(),
            reported_at: "today".to_string(),
            category: Category::ALL[i % Category::ALL.len()],
            condition: CONDITIONS[i % CONDITIONS.len()].to_string(),
            color: COLORS[i % COLORS.len()].to_string(),
            brand: String::new(),
            size: String::new(),
            image: None,
        })
        .collect()
}
