//! One-time loading of the persisted scalers and models.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::error::{PremiumError, Result};
use crate::model::ModelArtifact;
use crate::router::{ModelBundle, PremiumPredictor};
use crate::scaler::ScalerArtifact;

static MODEL_YOUNG_FILE: &str = "model_young.json";
static MODEL_REST_FILE: &str = "model_rest.json";
static SCALER_YOUNG_FILE: &str = "scaler_young.json";
static SCALER_REST_FILE: &str = "scaler_rest.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model_young: PathBuf,
    pub model_rest: PathBuf,
    pub scaler_young: PathBuf,
    pub scaler_rest: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside one artifact directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        ArtifactPaths {
            model_young: dir.join(MODEL_YOUNG_FILE),
            model_rest: dir.join(MODEL_REST_FILE),
            scaler_young: dir.join(SCALER_YOUNG_FILE),
            scaler_rest: dir.join(SCALER_REST_FILE),
        }
    }
}

pub async fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref().to_path_buf();
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| PremiumError::Io { path: path.clone(), source })?;
    serde_json::from_str(&text).map_err(|source| PremiumError::Artifact { path, source })
}

pub async fn read_scaler<P: AsRef<Path>>(path: P) -> Result<ScalerArtifact> {
    let scaler: ScalerArtifact = read_json(&path).await?;
    scaler.check_params()?;
    debug!(
        "loaded scaler {:?} over {:?}",
        path.as_ref(),
        scaler.cols_to_scale
    );
    Ok(scaler)
}

pub async fn read_model<P: AsRef<Path>>(path: P) -> Result<ModelArtifact> {
    let model: ModelArtifact = read_json(&path).await?;
    debug!(
        "loaded model {:?} with {} named features",
        path.as_ref(),
        model.feature_names.len()
    );
    Ok(model)
}

/// Reads all four artifacts concurrently and pairs them into bundles.
pub async fn load_predictor(paths: &ArtifactPaths) -> Result<PremiumPredictor> {
    let (scaler_young, model_young, scaler_rest, model_rest) = tokio::try_join!(
        read_scaler(&paths.scaler_young),
        read_model(&paths.model_young),
        read_scaler(&paths.scaler_rest),
        read_model(&paths.model_rest),
    )?;

    info!("model bundles loaded");
    Ok(PremiumPredictor::new(
        ModelBundle::new(Arc::new(scaler_young), Arc::new(model_young)),
        ModelBundle::new(Arc::new(scaler_rest), Arc::new(model_rest)),
    ))
}
