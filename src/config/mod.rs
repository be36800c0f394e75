pub mod catalog;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::env;

/// Deployments have set the endpoint under several names over time (plain,
/// Vite-prefixed, CRA-prefixed). One resolver walks them in priority order
/// instead of duplicating lookup code per naming convention.
pub const URL_ENV_CANDIDATES: [&str; 3] = [
    "BACKEND_API_URL",
    "VITE_BACKEND_API_URL",
    "REACT_APP_BACKEND_API_URL",
];

pub const KEY_ENV_CANDIDATES: [&str; 3] = [
    "BACKEND_API_KEY",
    "VITE_BACKEND_API_KEY",
    "REACT_APP_BACKEND_API_KEY",
];

const REST_PATH: &str = "/rest/v1";
const APPLICATIONS_PATH: &str = "/rest/v1/applications";

#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Full applications endpoint. Empty when nothing resolved; an empty
    /// value is a configuration concern, not an error at resolve time.
    pub endpoint: String,
    pub api_key: String,
    /// Host this process runs on, used for the local simulated-success
    /// fallback when no credentials are configured.
    pub hostname: String,
}

impl ApiConfig {
    pub fn new(base_url: &str, api_key: &str, hostname: &str) -> Self {
        Self {
            endpoint: normalize_endpoint(base_url),
            api_key: api_key.trim().to_string(),
            hostname: hostname.trim().to_string(),
        }
    }

    /// Resolves from the process environment, loading `.env` first.
    pub fn resolve() -> Self {
        dotenvy::dotenv().ok();
        Self::resolve_from(|name| env::var(name).ok())
    }

    /// Same resolution over an injectable lookup, so tests never touch the
    /// real process environment.
    pub fn resolve_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = first_non_empty(&lookup, &URL_ENV_CANDIDATES);
        let api_key = first_non_empty(&lookup, &KEY_ENV_CANDIDATES);
        let hostname = lookup("HOSTNAME").unwrap_or_default();
        Self::new(&base_url, &api_key, &hostname)
    }

    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        // An unconfigured instance is legal; the client decides what to do
        // with it. A half-configured or malformed one is not.
        if self.endpoint.is_empty() && self.api_key.is_empty() {
            return Ok(());
        }
        validate_url("endpoint", &self.endpoint)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        Ok(())
    }
}

fn first_non_empty(lookup: &impl Fn(&str) -> Option<String>, candidates: &[&str]) -> String {
    for name in candidates {
        if let Some(value) = lookup(name) {
            let value = value.trim().to_string();
            if !value.is_empty() {
                tracing::debug!("resolved {} from environment", name);
                return value;
            }
        }
    }
    String::new()
}

/// Raw service URLs (e.g. `https://xyz.supabase.co`) are accepted and pointed
/// at the applications table; URLs already carrying the REST path pass
/// through untouched.
fn normalize_endpoint(base_url: &str) -> String {
    let base_url = base_url.trim();
    if base_url.is_empty() || base_url.contains(REST_PATH) {
        return base_url.to_string();
    }
    format!("{}{}", base_url.trim_end_matches('/'), APPLICATIONS_PATH)
}
