// src/state.rs
// DOCUMENTATION: Application context shared by all workers
// PURPOSE: Build the external collaborators once and hand them to handlers

use crate::config::{load_service_account, Config};
use crate::errors::ReviewsError;
use crate::services::{
    ExportSink, Geocoder, GoogleMapsClient, PlacesApi, ServiceAccountAuth, SheetTarget,
    SheetsClient,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub geocoder: Arc<dyn Geocoder>,
    pub places: Arc<dyn PlacesApi>,
    /// Absent when spreadsheet credentials could not be loaded
    pub export_sink: Option<Arc<dyn ExportSink>>,
}

impl AppContext {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        places: Arc<dyn PlacesApi>,
        export_sink: Option<Arc<dyn ExportSink>>,
    ) -> Self {
        Self {
            geocoder,
            places,
            export_sink,
        }
    }

    /// Wire the Google clients from configuration
    /// DOCUMENTATION: Missing sheet credentials disable export but not search
    pub fn from_config(config: &Config) -> Result<Self, ReviewsError> {
        let maps = Arc::new(GoogleMapsClient::new(
            config.google_maps_api_key.clone(),
            config.http_timeout(),
        )?);

        let export_sink = match build_sheets_client(config) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn ExportSink>),
            Err(e) => {
                log::warn!("Spreadsheet export disabled: {:#}", e);
                None
            }
        };

        Ok(Self::new(maps.clone(), maps, export_sink))
    }

    /// The export sink, or a configuration error when export is disabled
    pub fn export_sink(&self) -> Result<&dyn ExportSink, ReviewsError> {
        self.export_sink.as_deref().ok_or_else(|| {
            ReviewsError::Configuration("spreadsheet credentials are not configured".to_string())
        })
    }
}

fn build_sheets_client(config: &Config) -> anyhow::Result<SheetsClient> {
    let key = load_service_account(config)?;
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;
    let auth = ServiceAccountAuth::new(key, http.clone())?;

    log::info!("Spreadsheet export enabled for {}", auth.client_email());
    Ok(SheetsClient::new(http, auth, SheetTarget::from_config(config)))
}
