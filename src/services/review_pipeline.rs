// src/services/review_pipeline.rs
// DOCUMENTATION: Review aggregation pipeline
// PURPOSE: Turn a nearby search into a flat, export-ready list of review rows

use crate::errors::ReviewsError;
use crate::models::{ExportRow, Location, SEARCH_RADIUS_METERS};
use crate::services::ports::{Geocoder, PlacesApi};

/// Review aggregation service
/// DOCUMENTATION: Stateless orchestration over the collaborator traits
///
/// Process:
/// 1. Nearby search around the location with the fixed radius
/// 2. Fetch details for each place, in search order
/// 3. Emit one ExportRow per review, in review order
/// 4. Report NoReviewsFound when nothing was collected
pub struct ReviewPipeline;

impl ReviewPipeline {
    /// Geocode a postal code, then aggregate reviews around it
    /// DOCUMENTATION: An unknown postal code is InvalidLocation and no search is made
    pub async fn search_reviews(
        geocoder: &dyn Geocoder,
        places: &dyn PlacesApi,
        zip_code: &str,
        search_term: &str,
    ) -> Result<Vec<ExportRow>, ReviewsError> {
        let location = geocoder
            .geocode(zip_code)
            .await?
            .ok_or(ReviewsError::InvalidLocation)?;

        log::info!(
            "Geocoded {} to lat={}, lng={}",
            zip_code,
            location.latitude,
            location.longitude
        );

        Self::aggregate(places, location, search_term).await
    }

    /// Collect review rows for every place matching `search_term` near `location`
    ///
    /// # Returns
    /// Rows ordered by place (search order) then review (details order).
    /// A place whose details are absent contributes nothing. Transport and
    /// decoding failures abort the whole aggregation.
    pub async fn aggregate(
        places: &dyn PlacesApi,
        location: Location,
        search_term: &str,
    ) -> Result<Vec<ExportRow>, ReviewsError> {
        let summaries = places
            .nearby_search(location, search_term, SEARCH_RADIUS_METERS)
            .await?;

        if summaries.is_empty() {
            log::info!("No businesses found for '{}'", search_term);
            return Err(ReviewsError::NoBusinessesFound);
        }

        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for summary in &summaries {
            match places.place_details(&summary.place_id).await? {
                Some(detail) => {
                    rows.extend(
                        detail
                            .reviews
                            .iter()
                            .map(|review| ExportRow::from_review(&detail, review)),
                    );
                }
                None => skipped += 1,
            }
        }

        log::info!(
            "Aggregated {} reviews from {} places ({} without details)",
            rows.len(),
            summaries.len(),
            skipped
        );

        if rows.is_empty() {
            return Err(ReviewsError::NoReviewsFound);
        }

        Ok(rows)
    }
}
