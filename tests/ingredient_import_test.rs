// ABOUTME: Integration tests for loading the ingredient catalog from files
// ABOUTME: Covers CSV and JSON imports, reruns, skipped rows and rejected inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::create_test_database;
use foodgram::import::{import_ingredients, ImportReport};
use foodgram_core::errors::ErrorCode;
use tempfile::TempDir;

#[tokio::test]
async fn test_csv_import_is_idempotent() -> Result<()> {
    let database = create_test_database().await?;
    let dir = TempDir::new()?;
    let path = dir.path().join("ingredients.csv");
    std::fs::write(
        &path,
        "абрикосовое варенье,г\nабрикосы,г\nсоль,по вкусу\n,шт\nбананы,\n",
    )?;

    let report = import_ingredients(&database, &path).await?;
    assert_eq!(
        report,
        ImportReport {
            total: 5,
            created: 3,
            existing: 0,
            skipped: 2,
        }
    );

    let rerun = import_ingredients(&database, &path).await?;
    assert_eq!(rerun.created, 0);
    assert_eq!(rerun.existing, 3);
    assert_eq!(database.count_ingredients().await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_json_import_keeps_units_distinct() -> Result<()> {
    let database = create_test_database().await?;
    let dir = TempDir::new()?;
    let path = dir.path().join("ingredients.json");
    std::fs::write(
        &path,
        r#"[
            {"name": "milk", "measurement_unit": "ml"},
            {"name": "milk", "measurement_unit": "l"},
            {"name": "milk", "measurement_unit": "ml"}
        ]"#,
    )?;

    let report = import_ingredients(&database, &path).await?;
    assert_eq!(report.total, 3);
    assert_eq!(report.created, 2);
    assert_eq!(report.existing, 1);

    let milk = database.list_ingredients(Some("MIL")).await?;
    assert_eq!(milk.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rejected_inputs() -> Result<()> {
    let database = create_test_database().await?;
    let dir = TempDir::new()?;

    let missing = import_ingredients(&database, &dir.path().join("absent.csv"))
        .await
        .unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);

    let text = dir.path().join("ingredients.txt");
    std::fs::write(&text, "flour,g\n")?;
    let unsupported = import_ingredients(&database, &text).await.unwrap_err();
    assert_eq!(unsupported.code, ErrorCode::InvalidInput);

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{not json")?;
    let malformed = import_ingredients(&database, &broken).await.unwrap_err();
    assert_eq!(malformed.code, ErrorCode::InvalidInput);

    assert_eq!(database.count_ingredients().await?, 0);
    Ok(())
}
