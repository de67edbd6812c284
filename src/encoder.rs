//! Turns an [`InsuranceRecord`] into the fixed feature layout the models were
//! fitted on.

use std::collections::HashMap;

use polars::prelude::*;

use crate::error::{PremiumError, Result};
use crate::records::InsuranceRecord;
use crate::risk::history_risk;
use crate::schema::{INCOME_LEVEL_PLACEHOLDER, MODEL_FINAL_COLUMNS, ONE_HOT_FIELDS, WORKING_COLUMNS};

/// Single-row frame holding exactly [`MODEL_FINAL_COLUMNS`], in order.
#[derive(Debug, Clone)]
pub struct EncodedFeatureRow {
    frame: DataFrame,
}

impl EncodedFeatureRow {
    /// Selects the model columns out of a wider frame, dropping everything
    /// else (the `income_level` placeholder in particular).
    pub fn from_frame(frame: &DataFrame) -> Result<Self> {
        if frame.height() != 1 {
            return Err(PremiumError::schema(format!(
                "expected a single feature row, got {}",
                frame.height()
            )));
        }
        let frame = frame.select(MODEL_FINAL_COLUMNS)?;
        Ok(EncodedFeatureRow { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.frame.get_column_names()
    }

    pub fn value(&self, column: &str) -> Result<f64> {
        cell(&self.frame, column)
    }

    /// Values in column order.
    pub fn values(&self) -> Result<Vec<f64>> {
        MODEL_FINAL_COLUMNS
            .into_iter()
            .map(|column| cell(&self.frame, column))
            .collect()
    }
}

/// Reads row 0 of a `Float64` column.
pub(crate) fn cell(frame: &DataFrame, column: &str) -> Result<f64> {
    frame
        .column(column)?
        .f64()?
        .get(0)
        .ok_or_else(|| PremiumError::schema(format!("column {} has no value", column)))
}

/// Encodes a record into its model-ready 18-column row.
pub fn encode(record: &InsuranceRecord) -> Result<EncodedFeatureRow> {
    let frame = encode_working_frame(record)?;
    EncodedFeatureRow::from_frame(&frame)
}

/// Encodes a record into the 19-column frame scalers expect, with the
/// `income_level` placeholder still present.
pub fn encode_working_frame(record: &InsuranceRecord) -> Result<DataFrame> {
    let mut cells: HashMap<&str, f64> = WORKING_COLUMNS.into_iter().map(|c| (c, 0.0)).collect();

    cells.insert("age", record.age.unwrap_or(0) as f64);
    cells.insert(
        "number_of_dependants",
        record.number_of_dependants.unwrap_or(0) as f64,
    );
    cells.insert("income_lakhs", record.income_lakhs.unwrap_or(0.0));
    cells.insert("genetical_risk", record.genetical_risk.unwrap_or(1) as f64);
    cells.insert(INCOME_LEVEL_PLACEHOLDER, 0.0);
    cells.insert(
        "insurance_plan",
        insurance_plan_rank(record.insurance_plan.as_deref()),
    );
    cells.insert(
        "normalized_risk_score",
        history_risk(record.medical_history.as_ref()),
    );

    for field in ONE_HOT_FIELDS {
        let choice = match record.choice(field) {
            Some(choice) if !choice.is_empty() => choice,
            _ => continue,
        };
        let target_column = format!("{}_{}", field, normalize_category(choice));
        if let Some(indicator) = cells.get_mut(target_column.as_str()) {
            *indicator = 1.0;
        }
    }

    let columns: Vec<Series> = WORKING_COLUMNS
        .into_iter()
        .map(|column| Series::new(column, &[cells[column]]))
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Ordinal plan tier; anything unrecognised ranks as Bronze.
pub fn insurance_plan_rank(plan: Option<&str>) -> f64 {
    match plan {
        Some("Silver") => 2.0,
        Some("Gold") => 3.0,
        _ => 1.0,
    }
}

/// Column-name spelling of a category: spaces and hyphens become underscores.
///
/// Only the user's choice is rewritten; declared columns keep their own
/// spelling, so `employment_status_Self-Employed` is never matched.
pub fn normalize_category(choice: &str) -> String {
    choice.replace([' ', '-'], "_")
}
