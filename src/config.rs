use std::env;
use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;

pub const ENV_AZURE_DEPLOYMENT: &str = "AZURE_DEPLOYMENT_NAME";
pub const ENV_AZURE_API_KEY: &str = "AZURE_API_KEY";
pub const ENV_AZURE_ENDPOINT: &str = "AZURE_ENDPOINT";
pub const ENV_AZURE_API_VERSION: &str = "AZURE_API_VERSION";
pub const ENV_AZURE_AI_PROJECT: &str = "AZURE_AI_PROJECT";

/// Explicit configuration values. Anything left `None` falls back to the
/// corresponding environment variable during resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub azure_deployment: Option<String>,
    pub api_key: Option<String>,
    pub azure_endpoint: Option<String>,
    pub api_version: Option<String>,
    pub azure_ai_project: Option<String>,
}

/// Model-endpoint configuration, resolved once at construction. The
/// environment is read during [`EvaluationConfig::resolve`] only, never on
/// field access.
#[derive(Clone, PartialEq)]
pub struct EvaluationConfig {
    pub azure_deployment: Option<String>,
    pub api_key: Option<String>,
    pub azure_endpoint: Option<String>,
    pub api_version: Option<String>,
    pub azure_ai_project: Option<String>,
}

/// The four fields evaluator SDKs take as a model configuration.
/// `azure_ai_project` is deliberately not part of this set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub azure_deployment: Option<String>,
    pub api_key: Option<String>,
    pub azure_endpoint: Option<String>,
    pub api_version: Option<String>,
}

impl EvaluationConfig {
    pub fn from_env() -> Self {
        Self::resolve(ConfigOverrides::default())
    }

    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |name| env::var(name).ok())
    }

    // Empty strings count as unset on both sides, so a blank override still
    // falls through to the environment and a blank variable resolves to None.
    fn resolve_with(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |explicit: Option<String>, var: &str| {
            explicit
                .filter(|value| !value.is_empty())
                .or_else(|| lookup(var).filter(|value| !value.is_empty()))
        };

        Self {
            azure_deployment: pick(overrides.azure_deployment, ENV_AZURE_DEPLOYMENT),
            api_key: pick(overrides.api_key, ENV_AZURE_API_KEY),
            azure_endpoint: pick(overrides.azure_endpoint, ENV_AZURE_ENDPOINT),
            api_version: pick(overrides.api_version, ENV_AZURE_API_VERSION),
            azure_ai_project: pick(overrides.azure_ai_project, ENV_AZURE_AI_PROJECT),
        }
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            azure_deployment: self.azure_deployment.clone(),
            api_key: self.api_key.clone(),
            azure_endpoint: self.azure_endpoint.clone(),
            api_version: self.api_version.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.azure_deployment.is_some()
            && self.api_key.is_some()
            && self.azure_endpoint.is_some()
            && self.api_version.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.azure_deployment.is_none() {
            missing.push("azure_deployment");
        }
        if self.api_key.is_none() {
            missing.push("api_key");
        }
        if self.azure_endpoint.is_none() {
            missing.push("azure_endpoint");
        }
        if self.api_version.is_none() {
            missing.push("api_version");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingFields(missing))
        }
    }
}

// Manual Debug so the raw API key can never leak through logging.
impl fmt::Debug for EvaluationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationConfig")
            .field("azure_deployment", &self.azure_deployment)
            .field("api_key", &self.api_key.as_deref().map(mask_api_key))
            .field("azure_endpoint", &self.azure_endpoint)
            .field("api_version", &self.api_version)
            .field("azure_ai_project", &self.azure_ai_project)
            .finish()
    }
}

/// First four and last four characters for keys longer than twelve
/// characters; anything shorter is fully masked.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}
