use anyhow::Result;
use tracing::{info, warn};

use evalgate::config::EvaluationConfig;

use crate::cli::CheckConfigArgs;

pub fn run(_args: CheckConfigArgs) -> Result<()> {
    check(EvaluationConfig::from_env())
}

fn check(config: EvaluationConfig) -> Result<()> {
    // Debug output masks the API key, so the whole config is safe to log.
    info!(config = ?config, "resolved evaluation configuration");

    match config.validate() {
        Ok(()) => {
            info!("configuration is complete");
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "configuration is incomplete");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> EvaluationConfig {
        EvaluationConfig {
            azure_deployment: Some("test-deployment".to_string()),
            api_key: Some("test-key-123456789".to_string()),
            azure_endpoint: Some("https://test.endpoint.com".to_string()),
            api_version: Some("2024-01-01".to_string()),
            azure_ai_project: None,
        }
    }

    #[test]
    fn check_succeeds_for_a_complete_configuration() {
        check(complete_config()).expect("complete config should succeed");
    }

    #[test]
    fn check_fails_for_an_unresolved_configuration() {
        let config = EvaluationConfig {
            azure_deployment: None,
            api_key: None,
            azure_endpoint: None,
            api_version: None,
            azure_ai_project: None,
        };

        let err = check(config).expect_err("incomplete config must fail");
        let message = err.to_string();
        assert!(message.contains("azure_deployment"));
        assert!(message.contains("api_key"));
        assert!(message.contains("azure_endpoint"));
        assert!(message.contains("api_version"));
    }

    #[test]
    fn check_fails_when_a_single_field_is_missing() {
        let mut config = complete_config();
        config.api_version = None;

        let err = check(config).expect_err("incomplete config must fail");
        assert!(err.to_string().contains("api_version"));
    }
}
