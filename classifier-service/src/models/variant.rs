use serde::Deserialize;

/// Column order the breast-cancer model was fitted on.
pub const BREAST_CANCER_FEATURES: [&str; 30] = [
    "mean_radius",
    "mean_texture",
    "mean_perimeter",
    "mean_area",
    "mean_smoothness",
    "mean_compactness",
    "mean_concavity",
    "mean_concave_points",
    "mean_symmetry",
    "mean_fractal_dimension",
    "radius_error",
    "texture_error",
    "perimeter_error",
    "area_error",
    "smoothness_error",
    "compactness_error",
    "concavity_error",
    "concave_points_error",
    "symmetry_error",
    "fractal_dimension_error",
    "worst_radius",
    "worst_texture",
    "worst_perimeter",
    "worst_area",
    "worst_smoothness",
    "worst_compactness",
    "worst_concavity",
    "worst_concave_points",
    "worst_symmetry",
    "worst_fractal_dimension",
];

pub const IRIS_FEATURE_COUNT: usize = 4;

/// Which prediction contract `/predict` serves.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Single record of 30 named fields, binary diagnosis.
    BreastCancer,
    /// Batch of 4-feature rows, three species.
    Iris,
}

impl ModelVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelVariant::BreastCancer => "breast_cancer",
            ModelVariant::Iris => "iris",
        }
    }

    pub fn feature_count(self) -> usize {
        match self {
            ModelVariant::BreastCancer => BREAST_CANCER_FEATURES.len(),
            ModelVariant::Iris => IRIS_FEATURE_COUNT,
        }
    }

    /// Bundled artifact served when `MODEL_PATH` is not set.
    pub fn default_model_path(self) -> &'static str {
        match self {
            ModelVariant::BreastCancer => "models/logistic_regression_model.json",
            ModelVariant::Iris => "models/iris_model.json",
        }
    }

    /// Bundled dataset previewed when `DATA_PATH` is not set.
    pub fn default_data_path(self) -> &'static str {
        match self {
            ModelVariant::BreastCancer => "models/data.csv",
            ModelVariant::Iris => "models/iris.csv",
        }
    }

    /// Named columns the artifact must list in this exact order, when the
    /// variant has a named schema. Iris rows are positional.
    pub fn feature_names(self) -> Option<&'static [&'static str]> {
        match self {
            ModelVariant::BreastCancer => Some(&BREAST_CANCER_FEATURES[..]),
            ModelVariant::Iris => None,
        }
    }
}

impl std::str::FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "breast_cancer" | "cancer" => Ok(ModelVariant::BreastCancer),
            "iris" => Ok(ModelVariant::Iris),
            _ => Err(format!("Invalid model variant: {}", s)),
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
