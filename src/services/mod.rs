// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod export_service;
pub mod google_maps_client;
pub mod ports;
pub mod review_pipeline;
pub mod service_account;
pub mod sheets_client;
pub mod token_cache;

#[cfg(test)]
pub mod testing;

pub use export_service::*;
pub use google_maps_client::*;
pub use ports::*;
pub use review_pipeline::*;
pub use service_account::*;
pub use sheets_client::*;
