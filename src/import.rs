// ABOUTME: Ingredient catalog import from CSV or JSON files
// ABOUTME: Idempotent get-or-create loading used by the import-ingredients binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient Import
//!
//! Two formats, picked by file extension:
//!
//! - `.csv`: headerless `name,measurement_unit` rows
//! - `.json`: an array of `{"name": ..., "measurement_unit": ...}` objects
//!
//! Rows with an empty column are skipped. Existing ingredients are left
//! untouched, so importing the same file twice adds nothing.

use foodgram_core::errors::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::database::Database;

/// One catalog row read from an import file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngredientRecord {
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
}

/// Supported import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Headerless two-column CSV
    Csv,
    /// JSON array of objects
    Json,
}

impl ImportFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for any extension other than `csv` or `json`
    pub fn from_path(path: &Path) -> AppResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(AppError::invalid_input(format!(
                "File {} is not in csv or json format",
                path.display()
            ))),
        }
    }
}

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows read from the file
    pub total: usize,
    /// New ingredients inserted
    pub created: usize,
    /// Rows matching an existing ingredient
    pub existing: usize,
    /// Rows skipped for an empty column
    pub skipped: usize,
}

/// Parse catalog rows from file contents
///
/// # Errors
///
/// Returns `INVALID_INPUT` when the contents do not match the format
pub fn parse_records(contents: &str, format: ImportFormat) -> AppResult<Vec<IngredientRecord>> {
    match format {
        ImportFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .trim(csv::Trim::All)
                .from_reader(contents.as_bytes());
            reader
                .deserialize::<(String, String)>()
                .map(|row| {
                    row.map(|(name, measurement_unit)| IngredientRecord {
                        name,
                        measurement_unit,
                    })
                    .map_err(|e| AppError::invalid_input(format!("Malformed CSV row: {e}")))
                })
                .collect()
        }
        ImportFormat::Json => serde_json::from_str(contents)
            .map_err(|e| AppError::invalid_input(format!("Malformed JSON ingredient list: {e}"))),
    }
}

/// Import an ingredient file into the catalog
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for a missing file, `INVALID_INPUT` for an
/// unsupported extension or malformed contents, or a database error
pub async fn import_ingredients(database: &Database, path: &Path) -> AppResult<ImportReport> {
    if !path.exists() {
        return Err(AppError::not_found(format!("File {}", path.display())));
    }
    let format = ImportFormat::from_path(path)?;
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::storage(format!("Failed to read {}: {e}", path.display())))?;
    let records = parse_records(&contents, format)?;

    let mut report = ImportReport {
        total: records.len(),
        ..ImportReport::default()
    };
    for record in &records {
        let name = record.name.trim();
        let unit = record.measurement_unit.trim();
        if name.is_empty() || unit.is_empty() {
            report.skipped += 1;
            continue;
        }
        let (_, created) = database.get_or_create_ingredient(name, unit).await?;
        if created {
            report.created += 1;
        } else {
            report.existing += 1;
        }
    }

    info!(
        path = %path.display(),
        total = report.total,
        created = report.created,
        existing = report.existing,
        skipped = report.skipped,
        "Ingredient import finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ImportFormat::from_path(Path::new("data/ingredients.csv")).unwrap(),
            ImportFormat::Csv
        );
        assert_eq!(
            ImportFormat::from_path(Path::new("INGREDIENTS.JSON")).unwrap(),
            ImportFormat::Json
        );
        assert!(ImportFormat::from_path(Path::new("ingredients.txt")).is_err());
    }

    #[test]
    fn test_parse_csv_rows() {
        let records = parse_records("абрикосы,г\nсоль, по вкусу\n,шт\n", ImportFormat::Csv).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].measurement_unit, "по вкусу");
        assert!(records[2].name.is_empty());
    }

    #[test]
    fn test_parse_json_array() {
        let records = parse_records(
            r#"[{"name": "flour", "measurement_unit": "g"}]"#,
            ImportFormat::Json,
        )
        .unwrap();
        assert_eq!(
            records,
            vec![IngredientRecord {
                name: "flour".into(),
                measurement_unit: "g".into(),
            }]
        );
    }
}
