// ABOUTME: Shopping list aggregation engine merging ingredient lines across cart recipes
// ABOUTME: Pure function from cart snapshot to first-seen ordered, summed entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Aggregation Engine
//!
//! Scans the cart snapshot recipe by recipe and line by line, summing the
//! amounts of lines that share a key. Entries keep the order in which their
//! key was first seen.
//!
//! With the default [`AggregationKey::Name`] two lines with the same name
//! but different units are merged: the first-seen unit is kept and the
//! amounts are added as plain integers. [`AggregationKey::NameAndUnit`]
//! keeps them apart instead. Names and units are compared byte-for-byte.

use foodgram_core::models::CartSnapshot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which fields of an ingredient line decide whether two lines merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKey {
    /// Merge on name only; the first-seen unit wins (historical behavior)
    #[default]
    Name,
    /// Merge only when both name and unit match
    NameAndUnit,
}

impl AggregationKey {
    /// Parse from configuration, `None` when unrecognized
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "name" => Some(Self::Name),
            "name_and_unit" => Some(Self::NameAndUnit),
            _ => None,
        }
    }

    /// Configuration string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NameAndUnit => "name_and_unit",
        }
    }
}

/// One merged shopping list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    /// Ingredient name
    pub name: String,
    /// Unit of the first contributing line
    pub measurement_unit: String,
    /// Sum of every contributing amount
    pub total_amount: u64,
}

impl fmt::Display for AggregatedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}",
            self.name, self.measurement_unit, self.total_amount
        )
    }
}

/// Merge every ingredient line of the snapshot
///
/// An empty snapshot yields an empty list.
#[must_use]
pub fn aggregate(snapshot: &CartSnapshot, key: AggregationKey) -> Vec<AggregatedEntry> {
    let mut merged: IndexMap<(&str, Option<&str>), AggregatedEntry> = IndexMap::new();

    for line in snapshot.lines() {
        let unit_key = match key {
            AggregationKey::Name => None,
            AggregationKey::NameAndUnit => Some(line.measurement_unit.as_str()),
        };

        merged
            .entry((line.name.as_str(), unit_key))
            .and_modify(|entry| entry.total_amount += u64::from(line.amount))
            .or_insert_with(|| AggregatedEntry {
                name: line.name.clone(),
                measurement_unit: line.measurement_unit.clone(),
                total_amount: u64::from(line.amount),
            });
    }

    merged.into_values().collect()
}

/// Format one entry as `"{name} ({unit}) - {total}"`
#[must_use]
pub fn format_entry(entry: &AggregatedEntry) -> String {
    entry.to_string()
}

/// Aggregate and format every entry, in print order
#[must_use]
pub fn shopping_list_lines(snapshot: &CartSnapshot, key: AggregationKey) -> Vec<String> {
    aggregate(snapshot, key).iter().map(format_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_format() {
        let entry = AggregatedEntry {
            name: "flour".into(),
            measurement_unit: "g".into(),
            total_amount: 300,
        };
        assert_eq!(format_entry(&entry), "flour (g) - 300");
    }

    #[test]
    fn test_key_parse_round_trip() {
        for key in [AggregationKey::Name, AggregationKey::NameAndUnit] {
            assert_eq!(AggregationKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(AggregationKey::parse("unit"), None);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(aggregate(&CartSnapshot::default(), AggregationKey::Name).is_empty());
    }
}
