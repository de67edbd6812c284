//! Pre-trained regressors behind a single `predict` capability.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;

use crate::error::{PremiumError, Result};

pub type SmartcoreLinear = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type SmartcoreForest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// A fitted regressor: one output value per input row.
pub trait Model: Send + Sync {
    fn predict(&self, frame: &DataFrame) -> Result<Vec<f64>>;
}

/// Persisted model together with the column names it was fitted on.
///
/// An empty `feature_names` skips the column check.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub estimator: Estimator,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LinearRegression { model: SmartcoreLinear },
    RandomForest { model: SmartcoreForest },
    Coefficients { intercept: f64, coefficients: Vec<f64> },
}

impl ModelArtifact {
    pub fn new(feature_names: Vec<String>, estimator: Estimator) -> Self {
        ModelArtifact { feature_names, estimator }
    }

    fn check_columns(&self, frame: &DataFrame) -> Result<()> {
        if self.feature_names.is_empty() {
            return Ok(());
        }
        let names = frame.get_column_names();
        if names.len() != self.feature_names.len()
            || names.iter().zip(&self.feature_names).any(|(a, b)| *a != b.as_str())
        {
            return Err(PremiumError::schema(format!(
                "model fitted on {:?}, got {:?}",
                self.feature_names, names
            )));
        }
        Ok(())
    }
}

impl Model for ModelArtifact {
    fn predict(&self, frame: &DataFrame) -> Result<Vec<f64>> {
        self.check_columns(frame)?;
        let rows = frame_to_rows(frame)?;

        match &self.estimator {
            Estimator::LinearRegression { model } => {
                let x = DenseMatrix::from_2d_vec(&rows);
                model
                    .predict(&x)
                    .map_err(|e| PremiumError::Model { error_message: e.to_string() })
            }
            Estimator::RandomForest { model } => {
                let x = DenseMatrix::from_2d_vec(&rows);
                model
                    .predict(&x)
                    .map_err(|e| PremiumError::Model { error_message: e.to_string() })
            }
            Estimator::Coefficients { intercept, coefficients } => rows
                .iter()
                .map(|row| {
                    if row.len() != coefficients.len() {
                        return Err(PremiumError::schema(format!(
                            "{} coefficients for {} features",
                            coefficients.len(),
                            row.len()
                        )));
                    }
                    Ok(intercept + row.iter().zip(coefficients).map(|(x, w)| x * w).sum::<f64>())
                })
                .collect(),
        }
    }
}

/// Row-major copy of a numeric frame, the layout smartcore matrices take.
pub fn frame_to_rows(frame: &DataFrame) -> Result<Vec<Vec<f64>>> {
    let nrows = frame.height();
    let mut rows = vec![Vec::with_capacity(frame.width()); nrows];

    for series in frame.get_columns() {
        let column = series.cast(&DataType::Float64)?;
        for (row, value) in rows.iter_mut().zip(column.f64()?.into_iter()) {
            let value = value.ok_or_else(|| {
                PremiumError::schema(format!("column {} has a missing value", series.name()))
            })?;
            row.push(value);
        }
    }
    Ok(rows)
}
