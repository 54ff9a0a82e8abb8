// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Report service status and whether spreadsheet export is available

use crate::state::AppContext;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /health
/// `export_enabled` is false when sheet credentials failed to load at startup
pub async fn health_check(context: web::Data<AppContext>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "places-reviews",
        "version": env!("CARGO_PKG_VERSION"),
        "export_enabled": context.export_sink.is_some()
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
