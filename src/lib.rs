//! Single-record health-insurance premium estimation: encode the form fields
//! into the fitted feature layout, route by age to the young or rest bundle,
//! scale, and predict.

pub mod artifacts;
pub mod config;
pub mod encoder;
pub mod error;
pub mod model;
pub mod records;
pub mod risk;
pub mod router;
pub mod scaler;
pub mod schema;

pub use encoder::{encode, EncodedFeatureRow};
pub use error::{PremiumError, Result};
pub use model::{Estimator, Model, ModelArtifact};
pub use records::{InsuranceRecord, MedicalHistory};
pub use router::{BundleKind, ModelBundle, Prediction, PremiumPredictor, YOUNG_AGE_THRESHOLD};
pub use scaler::{Scaler, ScalerArtifact, ScalingParams};
