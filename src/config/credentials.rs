// src/config/credentials.rs
// DOCUMENTATION: Google service account credential loading
// PURPOSE: Read the spreadsheet credentials from a base64 env var or a JSON file

use crate::config::Config;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use std::fs;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Subset of a Google service account key file
/// DOCUMENTATION: Only the fields needed for the JWT-bearer token grant
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// PEM-encoded RSA private key
    pub private_key: String,
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

// The private key must never reach the logs.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a service account key from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Service account JSON is not valid")
    }

    /// Decode a base64 blob holding the service account JSON
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .context("Service account credentials are not valid base64")?;
        let json = String::from_utf8(bytes).context("Service account credentials are not UTF-8")?;
        Self::from_json(&json)
    }
}

/// Load spreadsheet credentials
/// DOCUMENTATION: The base64 environment variable wins over the file path
/// Called once during application startup in main.rs
pub fn load_service_account(config: &Config) -> Result<ServiceAccountKey> {
    if let Some(encoded) = &config.service_account_base64 {
        log::info!("Loading service account from GOOGLE_SERVICE_ACCOUNT_JSON_BASE64");
        return ServiceAccountKey::from_base64(encoded);
    }

    log::info!(
        "Loading service account from file: {}",
        config.service_account_file
    );
    let json = fs::read_to_string(&config.service_account_file).with_context(|| {
        format!(
            "Failed to read service account file {}",
            config.service_account_file
        )
    })?;
    ServiceAccountKey::from_json(&json)
}
