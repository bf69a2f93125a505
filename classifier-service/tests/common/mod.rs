#![allow(dead_code)]

use classifier_service::config::ClassifierConfig;
use classifier_service::models::{
    Classifier, LinearArtifact, LinearClassifier, ModelError, ModelVariant,
    BREAST_CANCER_FEATURES,
};
use classifier_service::services::ModelHandle;
use classifier_service::startup::{build_router, AppState, Application};
use serde_json::json;
use service_core::axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_API_KEY: &str = "test-api-key";

pub const IRIS_CSV: &str = "sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
4.9,3.0,,0.2,setosa
4.7,3.2,1.3,0.2,setosa
4.6,3.1,1.5,0.2,setosa
5.0,3.6,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.3,3.3,6.0,2.5,virginica
";

/// Multinomial iris model: setosa for small petals, virginica for large.
pub fn iris_artifact() -> LinearArtifact {
    serde_json::from_value(json!({
        "estimator": "logistic_regression",
        "feature_names": ["sepal length (cm)", "sepal width (cm)", "petal length (cm)", "petal width (cm)"],
        "classes": [0, 1, 2],
        "coefficients": [
            [-0.42, 0.97, -2.52, -1.08],
            [0.53, -0.32, -0.21, -0.94],
            [-0.11, -0.65, 2.73, 2.02]
        ],
        "intercepts": [9.85, 2.24, -12.09]
    }))
    .expect("valid iris artifact")
}

/// Binary model that calls a tumour malignant once `mean_radius` exceeds 15.
pub fn cancer_artifact() -> LinearArtifact {
    let mut weights = vec![0.0; BREAST_CANCER_FEATURES.len()];
    weights[0] = 1.0;
    serde_json::from_value(json!({
        "estimator": "logistic_regression",
        "feature_names": BREAST_CANCER_FEATURES,
        "classes": [0, 1],
        "coefficients": [weights],
        "intercepts": [-15.0]
    }))
    .expect("valid breast cancer artifact")
}

pub fn cancer_record(mean_radius: f64) -> serde_json::Value {
    let mut record = serde_json::Map::new();
    for name in BREAST_CANCER_FEATURES {
        record.insert(name.to_string(), json!(0.0));
    }
    record.insert("mean_radius".to_string(), json!(mean_radius));
    serde_json::Value::Object(record)
}

/// Wraps a real classifier and counts how often it is asked to predict.
pub struct CountingClassifier {
    inner: Box<dyn Classifier>,
    calls: Arc<AtomicUsize>,
}

impl CountingClassifier {
    pub fn wrap(inner: impl Classifier + 'static) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: Box::new(inner),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl Classifier for CountingClassifier {
    fn n_features(&self) -> usize {
        self.inner.n_features()
    }

    fn feature_names(&self) -> &[String] {
        self.inner.feature_names()
    }

    fn classes(&self) -> &[i64] {
        self.inner.classes()
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i64>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.predict(rows)
    }
}

pub fn test_config(variant: ModelVariant) -> ClassifierConfig {
    let mut config = ClassifierConfig::from_lookup(CoreConfig::default(), |key| match key {
        "API_KEY" => Some(TEST_API_KEY.to_string()),
        _ => None,
    })
    .expect("Failed to build test configuration");
    config.common.port = 0; // Random port for testing
    config.model.variant = variant;
    config
}

/// Router over an in-memory model, for `oneshot` tests.
pub struct TestRouter {
    pub router: Router,
    pub calls: Arc<AtomicUsize>,
}

impl TestRouter {
    pub fn new(variant: ModelVariant, csv_path: Option<PathBuf>) -> Self {
        let artifact = match variant {
            ModelVariant::BreastCancer => cancer_artifact(),
            ModelVariant::Iris => iris_artifact(),
        };
        let model = LinearClassifier::from_artifact(artifact).expect("valid artifact");
        let (counting, calls) = CountingClassifier::wrap(model);
        Self::with_model(variant, ModelHandle::ready(Arc::new(counting)), csv_path, calls)
    }

    pub fn with_model(
        variant: ModelVariant,
        model: ModelHandle,
        csv_path: Option<PathBuf>,
        calls: Arc<AtomicUsize>,
    ) -> Self {
        let mut config = test_config(variant);
        config.data.csv_path = csv_path
            .unwrap_or_else(|| scratch_dir().join("absent.csv"))
            .to_string_lossy()
            .into_owned();

        let router = build_router(AppState::new(config, model));
        Self { router, calls }
    }

    pub fn invocations(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("classifier-test-{}", Uuid::new_v4()))
}

pub fn get(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, api_key: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = service_core::axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Full application on a random port, with fixture files on disk.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub dir: PathBuf,
}

impl TestApp {
    pub async fn spawn(variant: ModelVariant) -> Self {
        Self::spawn_with(variant, true).await
    }

    /// Same as `spawn` but without a model artifact on disk.
    pub async fn spawn_without_model(variant: ModelVariant) -> Self {
        Self::spawn_with(variant, false).await
    }

    async fn spawn_with(variant: ModelVariant, write_model: bool) -> Self {
        let dir = scratch_dir();
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let model_path = dir.join("model.json");
        if write_model {
            let artifact = match variant {
                ModelVariant::BreastCancer => cancer_artifact(),
                ModelVariant::Iris => iris_artifact(),
            };
            tokio::fs::write(&model_path, serde_json::to_vec(&artifact).unwrap())
                .await
                .unwrap();
        }
        let csv_path = dir.join("data.csv");
        tokio::fs::write(&csv_path, IRIS_CSV).await.unwrap();

        let mut config = test_config(variant);
        config.model.path = model_path.to_string_lossy().into_owned();
        config.data.csv_path = csv_path.to_string_lossy().into_owned();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections.
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port, dir }
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.dir).await;
    }
}
