use crate::config::ApiConfig;
use crate::domain::model::ApplicationPayload;
use crate::domain::ports::Submitter;
use crate::utils::error::{CheckoutError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const MISSING_CONFIG_HELP: &str = "Database credentials missing. Set BACKEND_API_URL and \
     BACKEND_API_KEY in the deployment environment, then redeploy.";

/// Pushes one application to the hosted applications table. Exactly one
/// outbound call per invocation; no retries.
pub struct SubmissionClient {
    config: ApiConfig,
    client: Client,
}

impl SubmissionClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn on_local_host(&self) -> bool {
        let host = self.config.hostname.as_str();
        host == "localhost" || host.starts_with("127.") || host.contains("stackblitz")
    }
}

#[async_trait]
impl Submitter for SubmissionClient {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<()> {
        if !self.config.is_configured() {
            if self.on_local_host() {
                // Keeps the flow demoable on a dev box without credentials.
                tracing::warn!("no API credentials resolved, simulating successful submission");
                tokio::time::sleep(Duration::from_secs(1)).await;
                return Ok(());
            }
            tracing::error!("no API credentials resolved and host is not local");
            return Err(CheckoutError::ConfigMissing {
                message: MISSING_CONFIG_HELP.to_string(),
            });
        }

        tracing::debug!("POST {}", self.config.endpoint);
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Prefer", "return=minimal")
            .json(payload)
            .send()
            .await
            .map_err(CheckoutError::Network)?;

        let status = response.status();
        tracing::debug!("applications insert responded with {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
