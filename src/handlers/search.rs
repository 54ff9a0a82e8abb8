// src/handlers/search.rs
// DOCUMENTATION: HTTP handlers for the review search form
// PURPOSE: Parse form input, run the pipeline, render the result page

use crate::errors::ReviewsError;
use crate::models::SearchForm;
use crate::services::ReviewPipeline;
use crate::state::AppContext;
use crate::views;
use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use validator::Validate;

/// GET /
/// Render the search form
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::render_index())
}

/// POST /
/// Search reviews for a zip code and keyword
pub async fn search(
    context: web::Data<AppContext>,
    form: web::Form<SearchForm>,
) -> Result<impl Responder, ReviewsError> {
    if let Err(e) = form.validate() {
        log::debug!("Rejected search form: {}", e);
        return Err(ReviewsError::ValidationError(
            "zip_code and search_term are required".to_string(),
        ));
    }

    let (zip_code, search_term) = form.normalized();
    log::info!("Review search: zip={}, term={}", zip_code, search_term);

    let rows = ReviewPipeline::search_reviews(
        context.geocoder.as_ref(),
        context.places.as_ref(),
        &zip_code,
        &search_term,
    )
    .await?;

    let html = views::render_results(&rows, &zip_code, &search_term)
        .map_err(|e| ReviewsError::Internal(format!("Failed to render results: {}", e)))?;

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Configuration for search routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index))
            .route(web::post().to(search)),
    );
}
