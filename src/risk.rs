//! Composite medical-history risk feature.
//!
//! The severity table and the `[0, 14]` normalization range were fixed when
//! the models were fitted, so they are constants here rather than settings.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::records::MedicalHistory;

lazy_static! {
    static ref RISK_SCORES: HashMap<&'static str, u32> = HashMap::from([
        ("diabetes", 6),
        ("heart disease", 8),
        ("high blood pressure", 6),
        ("thyroid", 5),
        ("no disease", 0),
        ("none", 0),
    ]);
}

pub const MIN_SCORE_TRAIN: f64 = 0.0;
/// Heart disease plus diabetes, the worst combination seen in training.
pub const MAX_SCORE_TRAIN: f64 = 14.0;

/// Matched verbatim against the list before any per-condition lookup.
pub const NO_DISEASE_SENTINEL: &str = "No disease";

/// Severity of one condition; unknown conditions weigh nothing.
pub fn condition_severity(condition: &str) -> u32 {
    let clean_condition = condition.trim().to_lowercase();
    RISK_SCORES.get(clean_condition.as_str()).copied().unwrap_or(0)
}

/// Normalized risk in `[0.0, 1.0]` for a list of conditions.
pub fn normalized_risk<S: AsRef<str>>(conditions: &[S]) -> f64 {
    if conditions.is_empty() || conditions.iter().any(|c| c.as_ref() == NO_DISEASE_SENTINEL) {
        return 0.0;
    }

    let total: u32 = conditions.iter().map(|c| condition_severity(c.as_ref())).sum();
    let normalized = (f64::from(total) - MIN_SCORE_TRAIN) / (MAX_SCORE_TRAIN - MIN_SCORE_TRAIN);
    normalized.clamp(0.0, 1.0)
}

/// Risk for an optional history; an absent history carries no risk.
pub fn history_risk(history: Option<&MedicalHistory>) -> f64 {
    history.map_or(0.0, |h| normalized_risk(h.conditions()))
}
