use serde::{Deserialize, Serialize};

use crate::error::{PremiumError, Result};

/// Raw form fields for one premium estimate.
///
/// Every field is optional: the encoder fills absent values with the same
/// defaults the models were trained against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRecord {
    pub age: Option<i64>,
    pub number_of_dependants: Option<i64>,
    pub income_lakhs: Option<f64>,
    pub genetical_risk: Option<i64>,
    pub gender: Option<String>,
    pub region: Option<String>,
    pub marital_status: Option<String>,
    pub bmi_category: Option<String>,
    pub smoking_status: Option<String>,
    pub employment_status: Option<String>,
    pub insurance_plan: Option<String>,
    pub income_level: Option<String>,
    pub medical_history: Option<MedicalHistory>,
}

/// A multi-select value; a lone string is accepted as a one-element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MedicalHistory {
    One(String),
    Many(Vec<String>),
}

impl MedicalHistory {
    pub fn conditions(&self) -> &[String] {
        match self {
            MedicalHistory::One(condition) => std::slice::from_ref(condition),
            MedicalHistory::Many(conditions) => conditions,
        }
    }
}

impl From<Vec<&str>> for MedicalHistory {
    fn from(conditions: Vec<&str>) -> Self {
        MedicalHistory::Many(conditions.into_iter().map(String::from).collect())
    }
}

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];
pub const REGION_OPTIONS: &[&str] = &["Northwest", "Southeast", "Northeast", "Southwest"];
pub const MARITAL_STATUS_OPTIONS: &[&str] = &["Married", "Unmarried"];
pub const BMI_CATEGORY_OPTIONS: &[&str] = &["Normal", "Overweight", "Obesity", "Underweight"];
pub const SMOKING_STATUS_OPTIONS: &[&str] = &["Non-Smoker", "Occasional", "Regular"];
pub const EMPLOYMENT_STATUS_OPTIONS: &[&str] = &["Salaried", "Self-Employed", "Freelancer"];
pub const INCOME_LEVEL_OPTIONS: &[&str] = &["<10L", "10L - 25L", "25L - 40L", "> 40L"];
pub const INSURANCE_PLAN_OPTIONS: &[&str] = &["Bronze", "Silver", "Gold"];
pub const MEDICAL_HISTORY_OPTIONS: &[&str] = &[
    "No Disease",
    "Diabetes",
    "High blood pressure",
    "Thyroid",
    "Heart disease",
    "Diabetes & High blood pressure",
    "Diabetes & Thyroid",
    "High blood pressure & Heart disease",
    "Diabetes & Heart disease",
];

impl InsuranceRecord {
    /// Single-choice value of a categorical field, by column-prefix name.
    pub fn choice(&self, field: &str) -> Option<&str> {
        let value = match field {
            "gender" => &self.gender,
            "region" => &self.region,
            "marital_status" => &self.marital_status,
            "bmi_category" => &self.bmi_category,
            "smoking_status" => &self.smoking_status,
            "employment_status" => &self.employment_status,
            "insurance_plan" => &self.insurance_plan,
            "income_level" => &self.income_level,
            _ => return None,
        };
        value.as_deref()
    }

    /// Checks the bounds and vocabularies the input form enforces.
    ///
    /// Callers run this before predicting; the encoder itself stays lenient.
    pub fn validate_form(&self) -> Result<()> {
        check_range("age", self.age.map(|v| v as f64), 18.0, 100.0)?;
        check_range("income_lakhs", self.income_lakhs, 1.0, 1000.0)?;
        check_range(
            "number_of_dependants",
            self.number_of_dependants.map(|v| v as f64),
            0.0,
            10.0,
        )?;
        check_range("genetical_risk", self.genetical_risk.map(|v| v as f64), 1.0, 5.0)?;

        let vocabularies = [
            ("gender", GENDER_OPTIONS),
            ("region", REGION_OPTIONS),
            ("marital_status", MARITAL_STATUS_OPTIONS),
            ("bmi_category", BMI_CATEGORY_OPTIONS),
            ("smoking_status", SMOKING_STATUS_OPTIONS),
            ("employment_status", EMPLOYMENT_STATUS_OPTIONS),
            ("income_level", INCOME_LEVEL_OPTIONS),
            ("insurance_plan", INSURANCE_PLAN_OPTIONS),
        ];
        for (field, options) in vocabularies {
            if let Some(value) = self.choice(field) {
                check_option(field, value, options)?;
            }
        }

        if let Some(history) = &self.medical_history {
            for condition in history.conditions() {
                check_option("medical_history", condition, MEDICAL_HISTORY_OPTIONS)?;
            }
        }
        Ok(())
    }
}

fn check_range(field: &str, value: Option<f64>, min: f64, max: f64) -> Result<()> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(PremiumError::invalid(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, v
        ))),
        _ => Ok(()),
    }
}

fn check_option(field: &str, value: &str, options: &[&str]) -> Result<()> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err(PremiumError::invalid(format!(
            "{} must be one of {:?}, got {:?}",
            field, options, value
        )))
    }
}
