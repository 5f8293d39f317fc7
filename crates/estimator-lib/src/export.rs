//! Single-row delimited export of an estimate
//!
//! Layout:
//!
//! ```text
//! delta_g,electrode_potential,enthalpy,ore_grade,melting_point,boiling_point,estimated_cost
//! -146,0.34,219,1.2,1085,2562,563.35
//! ```
//!
//! Floats are written with Rust's shortest round-trip representation, so
//! parsing an export reproduces the exported values exactly.

use crate::models::{FeatureVector, PredictionResult, RawRecord};
use crate::schema::{self, Feature, SchemaError, FEATURE_COUNT};
use serde_json::Value;
use thiserror::Error;

/// Name of the trailing cost column
pub const COST_COLUMN: &str = "estimated_cost";

pub const DELIMITER: &str = ",";

/// Failure to parse an exported record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("unexpected header: expected '{expected}', found '{found}'")]
    Header { expected: String, found: String },

    #[error("expected exactly one data row, found {0}")]
    RowCount(usize),

    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid estimated_cost value '{0}'")]
    Cost(String),
}

/// Header line in canonical column order
pub fn header() -> String {
    Feature::ALL
        .iter()
        .map(|f| f.name())
        .chain(std::iter::once(COST_COLUMN))
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// One exported estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRecord {
    pub features: FeatureVector,
    pub estimated_cost: f64,
}

impl ExportRecord {
    pub fn new(features: FeatureVector, result: &PredictionResult) -> Self {
        Self {
            features,
            estimated_cost: result.estimate,
        }
    }

    /// Render header and data row, each terminated by a newline
    pub fn to_delimited(&self) -> String {
        let row = self
            .features
            .to_array()
            .iter()
            .chain(std::iter::once(&self.estimated_cost))
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(DELIMITER);
        format!("{}\n{}\n", header(), row)
    }

    /// Parse an export produced by [`ExportRecord::to_delimited`].
    ///
    /// Feature values are re-validated through the schema, so an export
    /// edited by hand is held to the same rules as any other input.
    pub fn parse(text: &str) -> Result<Self, ExportError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let expected_header = header();
        let found_header = lines.next().unwrap_or_default();
        if found_header != expected_header {
            return Err(ExportError::Header {
                expected: expected_header,
                found: found_header.to_string(),
            });
        }

        let rows: Vec<&str> = lines.collect();
        if rows.len() != 1 {
            return Err(ExportError::RowCount(rows.len()));
        }

        let cells: Vec<&str> = rows[0].split(DELIMITER).map(str::trim).collect();
        if cells.len() != FEATURE_COUNT + 1 {
            return Err(ExportError::ColumnCount {
                expected: FEATURE_COUNT + 1,
                found: cells.len(),
            });
        }

        let record: RawRecord = Feature::ALL
            .iter()
            .zip(&cells)
            .map(|(f, cell)| (f.name().to_string(), Value::String(cell.to_string())))
            .collect();
        let features = schema::validate(&record)?;

        let cost_cell = cells[FEATURE_COUNT];
        let estimated_cost = cost_cell
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ExportError::Cost(cost_cell.to_string()))?;

        Ok(Self {
            features,
            estimated_cost,
        })
    }
}
