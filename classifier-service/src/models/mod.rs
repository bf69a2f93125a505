pub mod classifier;
pub mod labels;
pub mod linear;
pub mod variant;

pub use classifier::{Classifier, ModelError};
pub use labels::{diagnosis_for, species_for};
pub use linear::{LinearArtifact, LinearClassifier, Scaler};
pub use variant::{ModelVariant, BREAST_CANCER_FEATURES, IRIS_FEATURE_COUNT};
