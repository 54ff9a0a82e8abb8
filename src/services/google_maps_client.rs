// src/services/google_maps_client.rs
// DOCUMENTATION: Google Maps Platform client
// PURPOSE: Geocode postal codes, run nearby searches and fetch place reviews

use crate::errors::ReviewsError;
use crate::models::{Location, PlaceDetail, PlaceSummary, Review};
use crate::services::ports::{Geocoder, PlacesApi};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Fields requested from the place details endpoint
const DETAIL_FIELDS: &str = "name,formatted_address,rating,reviews";

/// Google Maps API client
/// DOCUMENTATION: Holds the API key and a shared HTTP client with a bounded timeout
pub struct GoogleMapsClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Base URL for the Maps web services
    base_url: String,
}

/// Response from the Geocoding API
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GoogleGeometry,
}

/// Geographic location from Google
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleGeometry {
    pub location: GoogleLocation,
}

/// Coordinates from Google
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Response from Google Places Nearby Search
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GoogleNearbyPlace>,
    pub error_message: Option<String>,
}

/// Nearby search entry; only the identifier is needed for the details lookup
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleNearbyPlace {
    pub place_id: String,
}

/// Response from Google Place Details
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<GooglePlaceDetails>,
    pub error_message: Option<String>,
}

/// Place detail payload restricted to DETAIL_FIELDS
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlaceDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    pub reviews: Option<Vec<GoogleReview>>,
}

/// Review from Google Places
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleReview {
    /// Rating (1-5)
    pub rating: Option<f64>,
    pub text: Option<String>,
}

impl GooglePlaceDetails {
    /// Convert into the domain record
    /// DOCUMENTATION: Reviews without a rating cannot fill the stars column and are dropped
    pub fn into_detail(self) -> PlaceDetail {
        let reviews = self
            .reviews
            .unwrap_or_default()
            .into_iter()
            .filter_map(|review| {
                let rating = review.rating?;
                Some(Review::new(rating, review.text.unwrap_or_default()))
            })
            .collect();

        PlaceDetail {
            name: self.name,
            formatted_address: self.formatted_address,
            reviews,
        }
    }
}

impl GoogleMapsClient {
    /// Create new Google Maps API client
    /// DOCUMENTATION: Every request made by this client is bounded by `timeout`
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, ReviewsError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewsError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different host (used by tests and proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the geocoding request for a postal code
    pub fn geocode_request(&self, zip_code: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/geocode/json", self.base_url))
            .query(&[("address", zip_code), ("key", self.api_key.as_str())])
    }

    /// Build the nearby search request
    pub fn nearby_search_request(
        &self,
        location: Location,
        keyword: &str,
        radius_meters: u32,
    ) -> RequestBuilder {
        let location = location.to_query_value();
        let radius = radius_meters.to_string();

        self.client
            .get(format!("{}/place/nearbysearch/json", self.base_url))
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", keyword),
                ("key", self.api_key.as_str()),
            ])
    }

    /// Build the place details request
    pub fn place_details_request(&self, place_id: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/place/details/json", self.base_url))
            .query(&[
                ("place_id", place_id),
                ("fields", DETAIL_FIELDS),
                ("key", self.api_key.as_str()),
            ])
    }

    /// Send a request once and decode its JSON body
    /// DOCUMENTATION: Transport failures and non-2xx statuses are UpstreamUnavailable,
    /// bodies that do not decode are MalformedUpstreamResponse
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ReviewsError> {
        let response = request.send().await.map_err(|e| {
            log::error!("Google {} request failed: {}", endpoint, e.without_url());
            ReviewsError::UpstreamUnavailable(format!("{} request failed", endpoint))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            log::error!("Google {} returned HTTP {}", endpoint, status);
            return Err(ReviewsError::UpstreamUnavailable(format!(
                "{} returned HTTP {}",
                endpoint, status
            )));
        }

        let body = response.text().await.map_err(|e| {
            log::error!("Google {} body read failed: {}", endpoint, e.without_url());
            ReviewsError::UpstreamUnavailable(format!("{} body read failed", endpoint))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to parse Google {} response: {}", endpoint, e);
            ReviewsError::MalformedUpstreamResponse(format!("{}: {}", endpoint, e))
        })
    }
}

/// Log a non-OK API status that is being treated as "no result"
fn log_absorbed_status(endpoint: &str, status: &str, error_message: Option<&str>) {
    if status == "ZERO_RESULTS" {
        log::info!("Google {} returned ZERO_RESULTS", endpoint);
    } else {
        log::warn!(
            "Google {} returned status {}: {}",
            endpoint,
            status,
            error_message.unwrap_or("no error message")
        );
    }
}

/// Interpret a decoded geocoding response
pub fn location_from_geocode(response: GeocodeResponse) -> Option<Location> {
    if response.status != "OK" {
        log_absorbed_status("geocode", &response.status, response.error_message.as_deref());
        return None;
    }

    response
        .results
        .into_iter()
        .next()
        .map(|result| Location::new(result.geometry.location.lat, result.geometry.location.lng))
}

/// Interpret a decoded nearby search response
pub fn summaries_from_search(response: NearbySearchResponse) -> Vec<PlaceSummary> {
    if response.status != "OK" {
        log_absorbed_status(
            "nearby search",
            &response.status,
            response.error_message.as_deref(),
        );
        return Vec::new();
    }

    response
        .results
        .into_iter()
        .map(|place| PlaceSummary::new(place.place_id))
        .collect()
}

/// Interpret a decoded place details response
pub fn detail_from_response(response: PlaceDetailsResponse) -> Option<PlaceDetail> {
    if response.status != "OK" {
        log_absorbed_status(
            "place details",
            &response.status,
            response.error_message.as_deref(),
        );
        return None;
    }

    response.result.map(GooglePlaceDetails::into_detail)
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, zip_code: &str) -> Result<Option<Location>, ReviewsError> {
        log::debug!("Google geocode lookup: address={}", zip_code);

        let response: GeocodeResponse = self
            .fetch(self.geocode_request(zip_code), "geocode")
            .await?;

        Ok(location_from_geocode(response))
    }
}

#[async_trait]
impl PlacesApi for GoogleMapsClient {
    async fn nearby_search(
        &self,
        location: Location,
        keyword: &str,
        radius_meters: u32,
    ) -> Result<Vec<PlaceSummary>, ReviewsError> {
        log::debug!(
            "Google Places nearby search: lat={}, lng={}, radius={}, keyword={}",
            location.latitude,
            location.longitude,
            radius_meters,
            keyword
        );

        let response: NearbySearchResponse = self
            .fetch(
                self.nearby_search_request(location, keyword, radius_meters),
                "nearby search",
            )
            .await?;

        let places = summaries_from_search(response);
        log::info!("Google Places search returned {} results", places.len());
        Ok(places)
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetail>, ReviewsError> {
        log::debug!("Google Places details lookup: place_id={}", place_id);

        let response: PlaceDetailsResponse = self
            .fetch(self.place_details_request(place_id), "place details")
            .await?;

        Ok(detail_from_response(response))
    }
}
