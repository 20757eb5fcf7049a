//! CSV loader for custom comparison scenarios.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive and must match exactly.
//!
//! | Column                    | Required | Type    | Notes                         |
//! |---------------------------|----------|---------|-------------------------------|
//! | `name`                    | yes      | string  | Rows with a blank name are skipped |
//! | `transaction_fee_percent` | yes      | decimal | Clamped to `[0, 100]`         |
//! | `freight_per_thousand`    | yes      | decimal | Clamped to `>= 0`             |
//!
//! ### Example
//!
//! ```csv
//! name,transaction_fee_percent,freight_per_thousand
//! Dealer promo,4,25
//! Rush freight,7,80
//! ```
use std::path::{Path, PathBuf};

use pricing_core::{Scenario, ScenarioError};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    transaction_fee_percent: Decimal,
    freight_per_thousand: Decimal,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading scenario CSV data.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    /// The file could not be read.
    #[error("cannot read scenario file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// column, a number that does not parse, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Parse CSV text and return the scenarios in file order.
///
/// Rows with a blank name are skipped with a warning, matching how the
/// calculator treats blank custom scenario names.
///
/// # Errors
///
/// [ScenarioLoadError::Parse] if the CSV is structurally invalid or a field
/// cannot be deserialised.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let mut scenarios = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let row_number = idx + 1; // 1-based for user-facing messages

        match Scenario::new(&row.name, row.transaction_fee_percent, row.freight_per_thousand) {
            Ok(scenario) => scenarios.push(scenario),
            Err(ScenarioError::BlankName) => {
                warn!(row = row_number, "skipping scenario with blank name");
            }
            Err(other) => warn!(row = row_number, "skipping scenario: {}", other),
        }
    }

    Ok(scenarios)
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenarios = load_from_str(&contents)?;
    info!(
        path = %path.display(),
        count = scenarios.len(),
        "loaded custom scenarios"
    );
    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
