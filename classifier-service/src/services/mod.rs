pub mod inference;
pub mod key_guard;
pub mod metrics;
pub mod model_store;
pub mod preview;

pub use inference::{Diagnosis, InferenceService};
pub use key_guard::{AuthError, KeyGuard};
pub use metrics::{get_metrics, init_metrics};
pub use model_store::{load_artifact, ModelHandle};
pub use preview::{DataPreview, PreviewError, PreviewRow};
