// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and collaborators, then start the HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;
mod state;
mod views;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use state::AppContext;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting places-reviews service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Build the external collaborators
    let context = match AppContext::from_config(&config) {
        Ok(context) => web::Data::new(context),
        Err(e) => {
            log::error!("Failed to initialize clients: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            .configure(handlers::health_config)
            .configure(handlers::search_config)
            .configure(handlers::export_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
