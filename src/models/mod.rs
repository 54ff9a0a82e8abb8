// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod place;
pub mod review;
pub mod search;

pub use place::*;
pub use review::*;
pub use search::*;
