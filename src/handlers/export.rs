// src/handlers/export.rs
// DOCUMENTATION: HTTP handler for the spreadsheet export
// PURPOSE: Accept a result set from the browser and append it to the sheet

use crate::errors::ReviewsError;
use crate::models::{ExportRequest, ExportResponse};
use crate::services::ExportService;
use crate::state::AppContext;
use actix_web::{web, HttpResponse, Responder};

/// POST /export
/// Append the posted rows to the configured spreadsheet
/// DOCUMENTATION: Both outcomes answer JSON; a failed export is a 502 carrying
/// how many rows made it into the sheet
pub async fn export(
    context: web::Data<AppContext>,
    body: web::Json<ExportRequest>,
) -> Result<impl Responder, ReviewsError> {
    let sink = context.export_sink()?;
    let rows = body.into_inner().results;

    log::info!("Export requested for {} rows", rows.len());

    match ExportService::export_rows(sink, &rows).await {
        Ok(rows_written) => Ok(HttpResponse::Ok().json(ExportResponse {
            message: "Exported successfully".to_string(),
            rows_written,
        })),
        Err(e) => Ok(HttpResponse::BadGateway().json(ExportResponse {
            message: format!("Export failed: {}", e.message),
            rows_written: e.rows_written,
        })),
    }
}

/// Configuration for export routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/export", web::post().to(export));
}
