// src/services/ports.rs
// DOCUMENTATION: Interfaces to the external collaborators
// PURPOSE: Let the pipeline and handlers run against real clients or test doubles

use crate::errors::ReviewsError;
use crate::models::{ExportRow, Location, PlaceDetail, PlaceSummary};
use async_trait::async_trait;

/// Postal code to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the service reports a non-OK status or no results
    async fn geocode(&self, zip_code: &str) -> Result<Option<Location>, ReviewsError>;
}

/// Nearby search and place details
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Empty when the service reports a non-OK status or no results
    async fn nearby_search(
        &self,
        location: Location,
        keyword: &str,
        radius_meters: u32,
    ) -> Result<Vec<PlaceSummary>, ReviewsError>;

    /// `Ok(None)` when the service reports a non-OK status for this place
    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetail>, ReviewsError>;
}

/// Persistent tabular storage accepting one row at a time
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn append_row(&self, row: &ExportRow) -> Result<(), ReviewsError>;
}
