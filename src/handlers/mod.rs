// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod export;
pub mod health;
pub mod search;

pub use export::config as export_config;
pub use health::config as health_config;
pub use search::config as search_config;
