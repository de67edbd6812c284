//! Fitted column scalers.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PremiumError, Result};

/// A fitted transform over a declared subset of columns.
pub trait Scaler: Send + Sync {
    /// Columns this scaler was fitted on, in fitted order.
    fn scaled_columns(&self) -> &[String];

    /// Scales a frame holding exactly [`Scaler::scaled_columns`].
    fn transform(&self, frame: &DataFrame) -> Result<DataFrame>;
}

/// Persisted scaler: the column list travels with the fitted parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub cols_to_scale: Vec<String>,
    pub scaler: ScalingParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingParams {
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "unit_range")]
        feature_range: (f64, f64),
    },
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
}

fn unit_range() -> (f64, f64) {
    (0.0, 1.0)
}

impl ScalingParams {
    fn param_lens(&self) -> (usize, usize) {
        match self {
            ScalingParams::MinMax { data_min, data_max, .. } => (data_min.len(), data_max.len()),
            ScalingParams::Standard { mean, scale } => (mean.len(), scale.len()),
        }
    }

    /// Scales one value of the `index`-th fitted column.
    fn apply(&self, index: usize, value: f64) -> f64 {
        match self {
            ScalingParams::MinMax { data_min, data_max, feature_range } => {
                let (low, high) = *feature_range;
                let data_range = data_max[index] - data_min[index];
                let data_range = if data_range == 0.0 { 1.0 } else { data_range };
                let scale = (high - low) / data_range;
                value * scale + (low - data_min[index] * scale)
            }
            ScalingParams::Standard { mean, scale } => {
                let scale = if scale[index] == 0.0 { 1.0 } else { scale[index] };
                (value - mean[index]) / scale
            }
        }
    }
}

impl ScalerArtifact {
    pub fn new(cols_to_scale: Vec<String>, scaler: ScalingParams) -> Result<Self> {
        let artifact = ScalerArtifact { cols_to_scale, scaler };
        artifact.check_params()?;
        Ok(artifact)
    }

    /// Parameter vectors must line up with the column list.
    pub fn check_params(&self) -> Result<()> {
        let expected = self.cols_to_scale.len();
        let (first, second) = self.scaler.param_lens();
        if first != expected || second != expected {
            return Err(PremiumError::schema(format!(
                "scaler declares {} columns but carries {}/{} parameters",
                expected, first, second
            )));
        }
        Ok(())
    }
}

impl Scaler for ScalerArtifact {
    fn scaled_columns(&self) -> &[String] {
        &self.cols_to_scale
    }

    fn transform(&self, frame: &DataFrame) -> Result<DataFrame> {
        self.check_params()?;
        let names = frame.get_column_names();
        if names.len() != self.cols_to_scale.len()
            || names.iter().zip(&self.cols_to_scale).any(|(a, b)| *a != b.as_str())
        {
            return Err(PremiumError::schema(format!(
                "scaler fitted on {:?}, got {:?}",
                self.cols_to_scale, names
            )));
        }

        let mut scaled = Vec::with_capacity(self.cols_to_scale.len());
        for (index, name) in self.cols_to_scale.iter().enumerate() {
            let values: Vec<Option<f64>> = frame
                .column(name)?
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.map(|x| self.scaler.apply(index, x)))
                .collect();
            scaled.push(Series::new(name, values));
        }
        Ok(DataFrame::new(scaled)?)
    }
}
