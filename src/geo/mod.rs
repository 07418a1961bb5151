//! Geolocation module for vpncheck-rs
//!
//! - `types`: wire payloads, `LookupResult`, `RequestOutcome`
//! - `client`: `GeoClient`, the HTTP side with timeout classification

pub mod client;
pub mod types;

pub use client::GeoClient;
pub use types::{LatLng, LookupResult, RequestOutcome, PLACEHOLDER};
