// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0")
    pub server_address: String,

    /// Server listen port (default 8080)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Maps API key (geocoding, nearby search, place details)
    pub google_maps_api_key: String,

    /// Timeout applied to every outbound HTTP call, in seconds
    pub http_timeout_secs: u64,

    /// Base64-encoded service account JSON, preferred over the file path
    pub service_account_base64: Option<String>,

    /// Path to the service account JSON file
    pub service_account_file: String,

    /// Spreadsheet title, looked up through Drive when no id is given
    pub spreadsheet_name: String,

    /// Spreadsheet id, skips the title lookup
    pub spreadsheet_id: Option<String>,

    /// Worksheet title; the first worksheet is used when unset
    pub worksheet_name: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()),

            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_else(|_| String::new()),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            service_account_base64: non_empty_var("GOOGLE_SERVICE_ACCOUNT_JSON_BASE64"),

            service_account_file: env::var("GOOGLE_SERVICE_ACCOUNT_FILE")
                .unwrap_or_else(|_| "service_account.json".to_string()),

            spreadsheet_name: env::var("SPREADSHEET_NAME")
                .unwrap_or_else(|_| "DPC Reviews".to_string()),

            spreadsheet_id: non_empty_var("SPREADSHEET_ID"),

            worksheet_name: non_empty_var("WORKSHEET_NAME"),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.google_maps_api_key.is_empty() {
            return Err("GOOGLE_MAPS_API_KEY is required".to_string());
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECS must be greater than zero".to_string());
        }

        if self.spreadsheet_id.is_none() && self.spreadsheet_name.trim().is_empty() {
            log::warn!("Neither SPREADSHEET_ID nor SPREADSHEET_NAME set - export will not work");
        }

        Ok(())
    }

    /// Per-request timeout for outbound HTTP calls
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1".to_string(),
        server_port: 8080,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        google_maps_api_key: "test_key".to_string(),
        http_timeout_secs: 5,
        service_account_base64: None,
        service_account_file: "service_account.json".to_string(),
        spreadsheet_name: "DPC Reviews".to_string(),
        spreadsheet_id: None,
        worksheet_name: None,
    }
}
