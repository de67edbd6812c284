//! Column layout shared by the encoder, the scalers and the models.
//!
//! The order of `MODEL_FINAL_COLUMNS` is the order the regression models were
//! fitted on. Changing it silently breaks every artifact on disk.

/// Columns handed to the model, in fitted order.
pub const MODEL_FINAL_COLUMNS: [&str; 18] = [
    "age",
    "number_of_dependants",
    "income_lakhs",
    "insurance_plan",
    "genetical_risk",
    "normalized_risk_score",
    "gender_Male",
    "region_Northwest",
    "region_Southeast",
    "region_Southwest",
    "marital_status_Unmarried",
    "bmi_category_Obesity",
    "bmi_category_Overweight",
    "bmi_category_Underweight",
    "smoking_status_Occasional",
    "smoking_status_Regular",
    "employment_status_Salaried",
    "employment_status_Self-Employed",
];

pub const FEATURE_COUNT: usize = MODEL_FINAL_COLUMNS.len();

/// Scalers were fitted with this column present; it never reaches a model.
pub const INCOME_LEVEL_PLACEHOLDER: &str = "income_level";

/// Columns of the frame between encoding and scaling.
pub const WORKING_COLUMNS: [&str; 19] = [
    "age",
    "number_of_dependants",
    INCOME_LEVEL_PLACEHOLDER,
    "income_lakhs",
    "insurance_plan",
    "normalized_risk_score",
    "genetical_risk",
    "gender_Male",
    "region_Northwest",
    "region_Southeast",
    "region_Southwest",
    "marital_status_Unmarried",
    "bmi_category_Obesity",
    "bmi_category_Overweight",
    "bmi_category_Underweight",
    "smoking_status_Occasional",
    "smoking_status_Regular",
    "employment_status_Salaried",
    "employment_status_Self-Employed",
];

/// Categorical fields encoded as drop-first indicator columns.
pub const ONE_HOT_FIELDS: [&str; 6] = [
    "gender",
    "region",
    "marital_status",
    "bmi_category",
    "smoking_status",
    "employment_status",
];
