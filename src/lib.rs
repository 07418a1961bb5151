//! vpncheck-rs: public IP and geolocation checker
//!
//! Resolves the caller's public address (or any IPv4 address) to an
//! approximate location through two HTTP services, keeps the result in
//! per-viewport display panels, and renders it on a map.

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod flow;
pub mod geo;
pub mod map;
pub mod menu;
pub mod regex;
pub mod utils;

pub use error::{CheckError, Result};
pub use flow::App;
pub use geo::{GeoClient, LookupResult, RequestOutcome};
