//! Picks the young or rest bundle by age and runs scale-then-predict.

use std::fmt;
use std::sync::Arc;

use log::debug;
use polars::prelude::*;
use serde::Serialize;

use crate::encoder::{encode_working_frame, EncodedFeatureRow};
use crate::error::{PremiumError, Result};
use crate::model::Model;
use crate::records::InsuranceRecord;
use crate::scaler::Scaler;

/// Ages up to and including this one go to the young bundle.
pub const YOUNG_AGE_THRESHOLD: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    Young,
    Rest,
}

impl BundleKind {
    pub fn for_age(age: i64) -> Self {
        if age <= YOUNG_AGE_THRESHOLD {
            BundleKind::Young
        } else {
            BundleKind::Rest
        }
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleKind::Young => write!(f, "young"),
            BundleKind::Rest => write!(f, "rest"),
        }
    }
}

/// A scaler paired with the model fitted on its output. Read-only once built.
#[derive(Clone)]
pub struct ModelBundle {
    pub scaler: Arc<dyn Scaler>,
    pub model: Arc<dyn Model>,
}

impl ModelBundle {
    pub fn new(scaler: Arc<dyn Scaler>, model: Arc<dyn Model>) -> Self {
        ModelBundle { scaler, model }
    }
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub premium: i64,
    pub bundle: BundleKind,
    /// The scaled row the model saw.
    pub features: EncodedFeatureRow,
}

/// Shared, immutable predictor; safe to call from many threads at once.
#[derive(Clone)]
pub struct PremiumPredictor {
    young: ModelBundle,
    rest: ModelBundle,
}

impl PremiumPredictor {
    pub fn new(young: ModelBundle, rest: ModelBundle) -> Self {
        PremiumPredictor { young, rest }
    }

    pub fn bundle(&self, kind: BundleKind) -> &ModelBundle {
        match kind {
            BundleKind::Young => &self.young,
            BundleKind::Rest => &self.rest,
        }
    }

    /// Premium estimate for one record.
    pub fn predict(&self, record: &InsuranceRecord) -> Result<i64> {
        Ok(self.predict_detailed(record)?.premium)
    }

    pub fn predict_detailed(&self, record: &InsuranceRecord) -> Result<Prediction> {
        let age = record.age.ok_or(PremiumError::MissingField { field: "age" })?;
        let kind = BundleKind::for_age(age);
        let bundle = self.bundle(kind);
        debug!("age {} routed to {} bundle", age, kind);

        let frame = encode_working_frame(record)?;
        let frame = apply_scaling(frame, bundle.scaler.as_ref())?;
        let features = EncodedFeatureRow::from_frame(&frame)?;

        let output = bundle.model.predict(features.frame())?;
        let value = output.first().copied().ok_or(PremiumError::EmptyPrediction)?;
        if !value.is_finite() {
            return Err(PremiumError::NonFinitePrediction { value });
        }
        debug!("{} model predicted {}", kind, value);

        Ok(Prediction {
            premium: value.trunc() as i64,
            bundle: kind,
            features,
        })
    }
}

/// Replaces the scaler's declared columns with their scaled values; all
/// other columns pass through untouched.
pub fn apply_scaling(mut frame: DataFrame, scaler: &dyn Scaler) -> Result<DataFrame> {
    let columns = scaler.scaled_columns();
    let subset = frame.select(columns.iter())?;
    let scaled = scaler.transform(&subset)?;

    if scaled.height() != frame.height() {
        return Err(PremiumError::schema(format!(
            "scaler returned {} rows for {}",
            scaled.height(),
            frame.height()
        )));
    }
    for name in columns {
        frame.with_column(scaled.column(name)?.clone())?;
    }
    Ok(frame)
}
