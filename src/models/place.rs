// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Domain records produced by the geocode, search and details lookups

use serde::{Deserialize, Serialize};

use super::Review;

/// Fixed nearby-search radius: 20 miles expressed in meters
pub const SEARCH_RADIUS_METERS: u32 = 32_186;

/// Geographic point resolved from a postal code
/// DOCUMENTATION: Produced once per request by the geocoder, never mutated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as the `lat,lng` pair expected by the nearby-search endpoint
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// One entry of a nearby-search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSummary {
    /// Opaque Google place identifier
    pub place_id: String,
}

impl PlaceSummary {
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
        }
    }
}

/// Detail record for a single place
/// DOCUMENTATION: Only the fields the review export needs are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub name: String,
    pub formatted_address: String,
    /// Reviews in the order the details endpoint returned them
    pub reviews: Vec<Review>,
}
