use std::path::Path;
use std::sync::Arc;
use std::thread;

use serde_json::json;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{LinearRegression, LinearRegressionParameters};

use insurance_premium::artifacts::{load_predictor, ArtifactPaths};
use insurance_premium::schema::MODEL_FINAL_COLUMNS;
use insurance_premium::{
    BundleKind, Estimator, InsuranceRecord, ModelArtifact, PremiumError, PremiumPredictor,
};

const SCALED: [&str; 6] = [
    "age",
    "number_of_dependants",
    "income_level",
    "income_lakhs",
    "insurance_plan",
    "genetical_risk",
];

fn write_json(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn weights(pairs: &[(&str, f64)]) -> Vec<f64> {
    MODEL_FINAL_COLUMNS
        .iter()
        .map(|c| pairs.iter().find(|(n, _)| n == c).map_or(0.0, |(_, w)| *w))
        .collect()
}

/// Min-max scalers plus coefficient models for both age bands.
fn write_artifacts(dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths::from_dir(dir);
    write_json(
        &paths.scaler_young,
        &json!({
            "cols_to_scale": SCALED,
            "scaler": {
                "kind": "min_max",
                "data_min": [18, 0, 1, 1, 1, 0],
                "data_max": [26, 5, 4, 100, 3, 5]
            }
        }),
    );
    write_json(
        &paths.scaler_rest,
        &json!({
            "cols_to_scale": SCALED,
            "scaler": {
                "kind": "min_max",
                "data_min": [26, 0, 1, 1, 1, 0],
                "data_max": [100, 5, 4, 100, 3, 5]
            }
        }),
    );
    write_json(
        &paths.model_young,
        &json!({
            "feature_names": MODEL_FINAL_COLUMNS,
            "estimator": {
                "kind": "coefficients",
                "intercept": 3000.0,
                "coefficients": weights(&[("age", 1000.0)])
            }
        }),
    );
    write_json(
        &paths.model_rest,
        &json!({
            "feature_names": MODEL_FINAL_COLUMNS,
            "estimator": {
                "kind": "coefficients",
                "intercept": 5000.0,
                "coefficients": weights(&[
                    ("age", 7000.0),
                    ("insurance_plan", 6000.0),
                    ("normalized_risk_score", 4000.0),
                    ("smoking_status_Regular", 3000.0),
                ])
            }
        }),
    );
    paths
}

fn scenario_record() -> InsuranceRecord {
    serde_json::from_value(json!({
        "age": 30,
        "number_of_dependants": 2,
        "income_lakhs": 10.0,
        "genetical_risk": 3,
        "insurance_plan": "Silver",
        "gender": "Male",
        "region": "Southeast",
        "marital_status": "Married",
        "bmi_category": "Overweight",
        "smoking_status": "Regular",
        "employment_status": "Salaried",
        "medical_history": ["Diabetes"]
    }))
    .unwrap()
}

async fn predictor_in(dir: &Path) -> PremiumPredictor {
    let paths = write_artifacts(dir);
    load_predictor(&paths).await.unwrap()
}

#[tokio::test]
async fn scenario_routes_to_rest_and_scores() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor_in(dir.path()).await;

    let prediction = predictor.predict_detailed(&scenario_record()).unwrap();
    assert_eq!(prediction.bundle, BundleKind::Rest);

    // 5000 + 7000 * 4/74 + 6000 * 0.5 + 4000 * 6/14 + 3000
    assert_eq!(prediction.premium, 13092);
    assert!(prediction.premium >= 0);

    let features = &prediction.features;
    assert!((features.value("age").unwrap() - 4.0 / 74.0).abs() < 1e-9);
    assert!((features.value("number_of_dependants").unwrap() - 0.4).abs() < 1e-9);
    assert!((features.value("insurance_plan").unwrap() - 0.5).abs() < 1e-9);
    assert!((features.value("normalized_risk_score").unwrap() - 6.0 / 14.0).abs() < 1e-9);
    assert_eq!(features.value("gender_Male").unwrap(), 1.0);
    assert_eq!(features.value("region_Southeast").unwrap(), 1.0);
    assert_eq!(features.value("bmi_category_Overweight").unwrap(), 1.0);
    assert_eq!(features.value("employment_status_Salaried").unwrap(), 1.0);
}

#[tokio::test]
async fn boundary_age_uses_young_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor_in(dir.path()).await;

    let mut record = scenario_record();
    // 25 scales to 7/8 under the young min-max range
    record.age = Some(25);
    let young = predictor.predict_detailed(&record).unwrap();
    assert_eq!(young.bundle, BundleKind::Young);
    assert_eq!(young.premium, 3875);

    record.age = Some(26);
    assert_eq!(predictor.predict_detailed(&record).unwrap().bundle, BundleKind::Rest);
}

#[tokio::test]
async fn absent_age_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor_in(dir.path()).await;

    let mut record = scenario_record();
    record.age = None;
    assert!(matches!(
        predictor.predict(&record),
        Err(PremiumError::MissingField { field: "age" })
    ));
}

#[tokio::test]
async fn model_with_other_schema_fails_the_call() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path());
    write_json(
        &paths.model_rest,
        &json!({
            "feature_names": ["age", "income_lakhs"],
            "estimator": {"kind": "coefficients", "intercept": 0.0, "coefficients": [1.0, 1.0]}
        }),
    );
    let predictor = load_predictor(&paths).await.unwrap();
    assert!(matches!(
        predictor.predict(&scenario_record()),
        Err(PremiumError::SchemaMismatch { .. })
    ));
}

#[tokio::test]
async fn predictions_are_stable_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = Arc::new(predictor_in(dir.path()).await);
    let expected = predictor.predict(&scenario_record()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = Arc::clone(&predictor);
            thread::spawn(move || predictor.predict(&scenario_record()).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[tokio::test]
async fn serialized_smartcore_model_serves_predictions() {
    // One unit row per feature plus the origin: y = 100 + 10 * (i + 1) * x_i
    let n = MODEL_FINAL_COLUMNS.len();
    let mut rows = vec![vec![0.0; n]];
    let mut targets = vec![100.0];
    for i in 0..n {
        let mut row = vec![0.0; n];
        row[i] = 1.0;
        rows.push(row);
        targets.push(100.0 + 10.0 * (i + 1) as f64);
    }
    let x = DenseMatrix::from_2d_vec(&rows);
    let fitted = LinearRegression::fit(&x, &targets, LinearRegressionParameters::default()).unwrap();
    let artifact = ModelArtifact::new(
        MODEL_FINAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        Estimator::LinearRegression { model: fitted },
    );

    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path());
    std::fs::write(&paths.model_rest, serde_json::to_string(&artifact).unwrap()).unwrap();
    let predictor = load_predictor(&paths).await.unwrap();

    let prediction = predictor.predict_detailed(&scenario_record()).unwrap();
    let expected: f64 = 100.0
        + prediction
            .features
            .values()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, x)| 10.0 * (i + 1) as f64 * x)
            .sum::<f64>();
    assert!((prediction.premium as f64 - expected).abs() <= 1.0);
}

#[tokio::test]
async fn bundled_sample_artifacts_load_and_score_demo_record() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let predictor = load_predictor(&ArtifactPaths::from_dir(root.join("artifacts")))
        .await
        .unwrap();
    let text = std::fs::read_to_string(root.join("demos/record.json")).unwrap();
    let record: InsuranceRecord = serde_json::from_str(&text).unwrap();
    record.validate_form().unwrap();

    let prediction = predictor.predict_detailed(&record).unwrap();
    assert_eq!(prediction.bundle, BundleKind::Rest);
    assert!(prediction.premium > 0);
}
