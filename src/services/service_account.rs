// src/services/service_account.rs
// DOCUMENTATION: OAuth2 service account authentication for Google APIs
// PURPOSE: Exchange a signed JWT for a bearer token used by the sheets client

use crate::config::ServiceAccountKey;
use crate::errors::ReviewsError;
use crate::services::token_cache::TokenCache;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scopes needed to find the spreadsheet by title and append to it
pub const SHEETS_SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Requested assertion lifetime; Google caps it at one hour
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of the JWT-bearer assertion
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, issued_at: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: SHEETS_SCOPES.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

/// Service account token provider
/// DOCUMENTATION: Signs assertions with the account's RSA key and caches the access token
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: Client,
    cache: TokenCache,
}

impl ServiceAccountAuth {
    /// Create provider from loaded credentials
    /// DOCUMENTATION: Fails when the private key is not an RSA PEM key
    pub fn new(key: ServiceAccountKey, client: Client) -> Result<Self, ReviewsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            ReviewsError::Configuration(format!("Service account private key: {}", e))
        })?;

        Ok(Self {
            key,
            encoding_key,
            client,
            cache: TokenCache::new(),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Sign a fresh assertion
    fn assertion(&self) -> Result<String, ReviewsError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let claims = AssertionClaims::new(&self.key, chrono::Utc::now().timestamp());

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ReviewsError::Configuration(format!("Failed to sign assertion: {}", e)))
    }

    /// Get a bearer token, exchanging a new assertion when the cached one is stale
    pub async fn access_token(&self) -> Result<String, ReviewsError> {
        if let Some(token) = self.cache.get().await {
            return Ok(token);
        }

        log::debug!("Requesting access token for {}", self.key.client_email);

        let assertion = self.assertion()?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Token request failed: {}", e);
                ReviewsError::UpstreamUnavailable("token request failed".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Token endpoint error {}: {}", status, body);
            return Err(ReviewsError::UpstreamUnavailable(format!(
                "token endpoint returned HTTP {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ReviewsError::MalformedUpstreamResponse(format!("token response: {}", e))
        })?;

        self.cache
            .set(
                token.access_token.clone(),
                Duration::from_secs(token.expires_in),
            )
            .await;

        Ok(token.access_token)
    }

    /// Forget the cached token, e.g. after the API rejected it
    pub async fn invalidate(&self) {
        self.cache.clear().await;
    }
}
