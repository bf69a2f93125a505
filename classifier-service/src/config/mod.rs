use crate::models::ModelVariant;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Clone)]
pub struct ClassifierConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub api_key: Secret<String>,
    pub model: ModelConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub path: String,
    pub variant: ModelVariant,
}

#[derive(Debug, Clone)]
pub struct DataConfig {
    pub csv_path: String,
    pub preview_rows: usize,
}

impl std::fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("common", &self.common)
            .field("environment", &self.environment)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("data", &self.data)
            .finish()
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

impl ClassifierConfig {
    /// Loads `.env`, the common `APP__*` settings, then the service variables.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment: Environment = lookup("ENVIRONMENT")
            .unwrap_or_else(|| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;
        let get = |key: &str, default: Option<&str>| get_var(&lookup, key, default, is_prod);

        // Never defaulted, in any environment.
        let api_key = get("API_KEY", None)?;
        if api_key.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "API_KEY must not be empty"
            )));
        }

        let variant: ModelVariant = get("MODEL_VARIANT", Some("breast_cancer"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let preview_rows: usize = get("PREVIEW_ROWS", Some("5"))?
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                AppError::ConfigError(anyhow::anyhow!("PREVIEW_ROWS: {}", e))
            })?;

        Ok(ClassifierConfig {
            common,
            environment,
            api_key: Secret::new(api_key),
            model: ModelConfig {
                path: get("MODEL_PATH", Some(variant.default_model_path()))?,
                variant,
            },
            data: DataConfig {
                csv_path: get("DATA_PATH", Some(variant.default_data_path()))?,
                preview_rows,
            },
        })
    }
}

fn get_var<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
