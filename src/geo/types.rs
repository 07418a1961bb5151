//! Type definitions for the geolocation module
//!
//! Wire payloads of the two remote services plus the per-request
//! `LookupResult` / `RequestOutcome` pair handed to the flows.

use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};

/// Substitute for an absent optional field
pub const PLACEHOLDER: &str = "Unknown";

/// Response body of the address-discovery endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryResponse {
    pub ip: String,
}

/// Response body of the geolocation endpoint
///
/// The provider reports failures with a 200 status and `error: true`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Location data for one address, with placeholders already applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    pub ip: String,
    pub city: String,
    pub country: String,
    pub org: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LookupResult {
    /// Human readable "city, country"
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    /// Both coordinates, if the provider sent both
    pub fn coordinates(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(LatLng::new(lat, lon)),
            _ => None,
        }
    }
}

/// Treat empty strings like absent ones
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl GeoResponse {
    /// Convert a provider payload into a `LookupResult`
    ///
    /// `requested_ip` is used when the provider omits the address. An
    /// embedded error flag becomes `CheckError::Service` carrying the
    /// provider reason, or `fallback_reason` when none was given.
    pub fn into_result(self, requested_ip: &str, fallback_reason: &str) -> Result<LookupResult> {
        if self.error {
            let reason = non_empty(self.reason).unwrap_or_else(|| fallback_reason.to_string());
            return Err(CheckError::Service(reason));
        }

        Ok(LookupResult {
            ip: non_empty(self.ip).unwrap_or_else(|| requested_ip.to_string()),
            city: non_empty(self.city).unwrap_or_else(|| PLACEHOLDER.to_string()),
            country: non_empty(self.country_name).unwrap_or_else(|| PLACEHOLDER.to_string()),
            org: non_empty(self.org).unwrap_or_else(|| PLACEHOLDER.to_string()),
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

/// Tagged result of one lookup attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum RequestOutcome {
    Success(LookupResult),
    Timeout,
    ServiceError(String),
    ValidationError(String),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }
}

impl From<Result<LookupResult>> for RequestOutcome {
    fn from(result: Result<LookupResult>) -> Self {
        match result {
            Ok(found) => RequestOutcome::Success(found),
            Err(e) if e.is_timeout() => RequestOutcome::Timeout,
            Err(CheckError::Validation(msg)) => RequestOutcome::ValidationError(msg),
            Err(CheckError::Service(msg)) => RequestOutcome::ServiceError(msg),
            Err(other) => RequestOutcome::ServiceError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeoResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_response() {
        let geo = parse(
            r#"{"ip":"8.8.8.8","city":"Mountain View","country_name":"United States",
                "org":"GOOGLE","latitude":37.42,"longitude":-122.08}"#,
        );
        let result = geo.into_result("8.8.8.8", "fallback").unwrap();
        assert_eq!(result.location(), "Mountain View, United States");
        assert_eq!(result.org, "GOOGLE");
        assert_eq!(result.coordinates(), Some(LatLng::new(37.42, -122.08)));
    }

    #[test]
    fn test_missing_fields_use_placeholder() {
        let result = parse("{}").into_result("1.2.3.4", "fallback").unwrap();
        assert_eq!(result.ip, "1.2.3.4");
        assert_eq!(result.location(), "Unknown, Unknown");
        assert_eq!(result.org, "Unknown");
        assert_eq!(result.coordinates(), None);
    }

    #[test]
    fn test_null_and_empty_fields_use_placeholder() {
        let geo = parse(r#"{"ip":"","city":null,"country_name":"","org":null,"latitude":null}"#);
        let result = geo.into_result("1.2.3.4", "fallback").unwrap();
        assert_eq!(result.ip, "1.2.3.4");
        assert_eq!(result.city, PLACEHOLDER);
        assert_eq!(result.country, PLACEHOLDER);
    }

    #[test]
    fn test_single_coordinate_is_not_a_point() {
        let result = parse(r#"{"latitude":10.0}"#).into_result("1.2.3.4", "x").unwrap();
        assert_eq!(result.coordinates(), None);
    }

    #[test]
    fn test_zero_coordinates_are_present() {
        let result = parse(r#"{"latitude":0.0,"longitude":0.0}"#)
            .into_result("1.2.3.4", "x")
            .unwrap();
        assert_eq!(result.coordinates(), Some(LatLng::new(0.0, 0.0)));
    }

    #[test]
    fn test_embedded_error_uses_reason() {
        let geo = parse(r#"{"ip":"10.0.0.1","error":true,"reason":"Reserved IP Address"}"#);
        let err = geo.into_result("10.0.0.1", "Invalid IP address").unwrap_err();
        assert!(matches!(err, CheckError::Service(ref r) if r == "Reserved IP Address"));
    }

    #[test]
    fn test_embedded_error_without_reason_uses_fallback() {
        for json in [r#"{"error":true}"#, r#"{"error":true,"reason":""}"#] {
            let err = parse(json).into_result("10.0.0.1", "Invalid IP address").unwrap_err();
            assert!(matches!(err, CheckError::Service(ref r) if r == "Invalid IP address"));
        }
    }

    fn classify(err: CheckError) -> RequestOutcome {
        let failed: Result<LookupResult> = Err(err);
        RequestOutcome::from(failed)
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(classify(CheckError::Timeout(10)), RequestOutcome::Timeout);
        assert_eq!(
            classify(CheckError::validation("empty")),
            RequestOutcome::ValidationError("empty".to_string())
        );
        assert_eq!(
            classify(CheckError::service("IP service unavailable")),
            RequestOutcome::ServiceError("IP service unavailable".to_string())
        );
        assert!(matches!(
            classify(CheckError::network("refused")),
            RequestOutcome::ServiceError(_)
        ));
    }
}
