// ABOUTME: Integration tests for the shopping list aggregation engine
// ABOUTME: Covers first-occurrence ordering, summing, unit conflation and strict keying
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use foodgram::shopping_list::{aggregate, shopping_list_lines, AggregationKey};
use foodgram_core::models::{CartEntry, CartSnapshot, IngredientLine, RecipeSummary};

fn recipe(id: i64, lines: &[(&str, &str, u32)]) -> CartEntry {
    CartEntry {
        recipe: RecipeSummary {
            id,
            name: format!("Recipe {id}"),
            image: format!("/media/recipes/images/{id}.png"),
            cooking_time: 15,
        },
        lines: lines
            .iter()
            .map(|&(name, unit, amount)| IngredientLine::new(name, unit, amount).unwrap())
            .collect(),
    }
}

#[test]
fn test_flour_and_sugar_scenario() {
    let snapshot = CartSnapshot::new(vec![
        recipe(2, &[("flour", "g", 200)]),
        recipe(1, &[("flour", "g", 100), ("sugar", "g", 50)]),
    ]);

    assert_eq!(
        shopping_list_lines(&snapshot, AggregationKey::Name),
        vec!["flour (g) - 300", "sugar (g) - 50"]
    );
}

#[test]
fn test_unit_conflation_keeps_first_unit() {
    let snapshot = CartSnapshot::new(vec![
        recipe(2, &[("milk", "ml", 200)]),
        recipe(1, &[("milk", "l", 1)]),
    ]);

    assert_eq!(
        shopping_list_lines(&snapshot, AggregationKey::Name),
        vec!["milk (ml) - 201"]
    );
}

#[test]
fn test_strict_key_separates_units() {
    let snapshot = CartSnapshot::new(vec![
        recipe(2, &[("milk", "ml", 200)]),
        recipe(1, &[("milk", "l", 1), ("milk", "ml", 50)]),
    ]);

    assert_eq!(
        shopping_list_lines(&snapshot, AggregationKey::NameAndUnit),
        vec!["milk (ml) - 250", "milk (l) - 1"]
    );
}

#[test]
fn test_order_follows_first_occurrence() {
    let snapshot = CartSnapshot::new(vec![
        recipe(5, &[("salt", "g", 1), ("eggs", "pcs", 2)]),
        recipe(4, &[("butter", "g", 30), ("salt", "g", 2)]),
        recipe(3, &[("eggs", "pcs", 3), ("basil", "leaves", 4)]),
    ]);

    let names: Vec<String> = aggregate(&snapshot, AggregationKey::Name)
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["salt", "eggs", "butter", "basil"]);
}

#[test]
fn test_totals_equal_sum_of_occurrences() {
    let lines = [
        ("rice", "g", 150),
        ("rice", "kg", 1),
        ("onion", "pcs", 2),
        ("rice", "g", 75),
        ("onion", "pcs", 1),
    ];
    let snapshot = CartSnapshot::new(vec![
        recipe(3, &lines[..2]),
        recipe(2, &lines[2..4]),
        recipe(1, &lines[4..]),
    ]);

    for entry in aggregate(&snapshot, AggregationKey::Name) {
        let expected: u64 = lines
            .iter()
            .filter(|(name, _, _)| *name == entry.name)
            .map(|(_, _, amount)| u64::from(*amount))
            .sum();
        assert_eq!(entry.total_amount, expected, "total for {}", entry.name);
    }
}

#[test]
fn test_totals_do_not_overflow_u32() {
    let snapshot = CartSnapshot::new(vec![
        recipe(2, &[("water", "ml", u32::MAX)]),
        recipe(1, &[("water", "ml", u32::MAX)]),
    ]);

    let entries = aggregate(&snapshot, AggregationKey::Name);
    assert_eq!(entries[0].total_amount, 2 * u64::from(u32::MAX));
}

#[test]
fn test_empty_snapshot_yields_no_lines() {
    let snapshot = CartSnapshot::default();
    assert!(aggregate(&snapshot, AggregationKey::Name).is_empty());
    assert!(shopping_list_lines(&snapshot, AggregationKey::NameAndUnit).is_empty());
}

#[test]
fn test_names_compare_exactly() {
    let snapshot = CartSnapshot::new(vec![recipe(
        1,
        &[("Flour", "g", 1), ("flour", "g", 2), ("flour ", "g", 3)],
    )]);

    assert_eq!(aggregate(&snapshot, AggregationKey::Name).len(), 3);
}
