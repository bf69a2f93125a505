//! The artifacts and dataset shipped under `models/` load and agree with
//! each other.

use classifier_service::config::ClassifierConfig;
use classifier_service::models::ModelVariant;
use classifier_service::services::{DataPreview, ModelHandle};

#[tokio::test]
async fn bundled_cancer_model_flags_the_bundled_malignant_rows() {
    let handle = ModelHandle::load(
        "models/logistic_regression_model.json",
        ModelVariant::BreastCancer,
    )
    .await;
    let classifier = handle.classifier().expect("bundled model loads");

    let rows = DataPreview::new("models/data.csv", 5).rows().await.unwrap();
    assert_eq!(rows.len(), 5);

    let features: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| {
            row.values()
                .take(30)
                .map(|v| v.as_f64().expect("numeric feature"))
                .collect()
        })
        .collect();

    let labels = classifier.predict(&features).unwrap();
    assert!(labels.iter().all(|label| *label == 1));
    assert!(rows.iter().all(|row| row["diagnosis"] == "M"));
}

#[tokio::test]
async fn bundled_iris_model_classifies_canonical_samples() {
    let handle = ModelHandle::load("models/iris_model.json", ModelVariant::Iris).await;
    let classifier = handle.classifier().expect("bundled model loads");

    let labels = classifier
        .predict(&[
            vec![5.1, 3.5, 1.4, 0.2],
            vec![7.0, 3.2, 4.7, 1.4],
            vec![6.3, 3.3, 6.0, 2.5],
        ])
        .unwrap();

    assert_eq!(labels, vec![0, 1, 2]);
}

#[tokio::test]
async fn iris_variant_alone_serves_the_bundled_iris_model() {
    let vars = [("API_KEY", "k"), ("MODEL_VARIANT", "iris")];
    let config = ClassifierConfig::from_lookup(service_core::config::Config::default(), |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .unwrap();

    let handle = ModelHandle::load(&config.model.path, config.model.variant).await;
    assert!(handle.is_loaded(), "load error: {:?}", handle.load_error());

    let rows = DataPreview::new(&config.data.csv_path, 5).rows().await.unwrap();
    assert_eq!(rows[0]["species"], "setosa");
}
