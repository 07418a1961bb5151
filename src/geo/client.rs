//! Geolocation client
//!
//! Talks to the address-discovery and geolocation services. Every outbound
//! call is bounded by the configured timeout, and an elapsed timeout is kept
//! apart from every other failure so the flows can word it differently.

use crate::config::ServiceConfig;
use crate::error::{CheckError, Result};
use crate::geo::types::{DiscoveryResponse, GeoResponse, LookupResult, RequestOutcome};
use crate::regex::is_valid_ipv4;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Fixed failure wording for one kind of lookup
#[derive(Debug, Clone, Copy)]
struct StageMessages {
    /// Non-success HTTP status from the geolocation endpoint
    unavailable: &'static str,
    /// Embedded error flag without a provider reason
    fallback_reason: &'static str,
}

const DISCOVERY_UNAVAILABLE: &str = "IP service unavailable";

const SELF_STAGE: StageMessages = StageMessages {
    unavailable: "Location service unavailable",
    fallback_reason: "Unable to get location data",
};

const LOOKUP_STAGE: StageMessages = StageMessages {
    unavailable: "Lookup service unavailable",
    fallback_reason: "Invalid IP address",
};

/// Stateless client for both remote services
///
/// Cloning is cheap; the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    service: ServiceConfig,
}

impl GeoClient {
    /// Create a new client from the service configuration
    pub fn new(service: &ServiceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(service.user_agent.clone());

        if let Some(proxy_url) = &service.proxy {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .map_err(|e| CheckError::config(format!("Invalid proxy {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| CheckError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            service: service.clone(),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.service.timeout()
    }

    /// Resolve location data for `ip`, or for the caller when `ip` is `None`
    ///
    /// Never fails; every error is folded into the returned outcome.
    pub async fn resolve(&self, ip: Option<&str>) -> RequestOutcome {
        self.try_resolve(ip).await.into()
    }

    async fn try_resolve(&self, ip: Option<&str>) -> Result<LookupResult> {
        match ip {
            Some(ip) => self.geolocate(ip, LOOKUP_STAGE).await,
            None => {
                let discovered = self.discover_ip().await?;
                log::debug!("Discovered public address {}", discovered);
                self.geolocate(&discovered, SELF_STAGE).await
            }
        }
    }

    /// Ask the discovery endpoint for the caller's public address
    ///
    /// Anything but a dotted-quad IPv4 address is a service error, so the
    /// reply can never reshape the geolocation URL.
    pub async fn discover_ip(&self) -> Result<String> {
        let body: DiscoveryResponse = self
            .get_json(&self.service.ip_discovery_url, DISCOVERY_UNAVAILABLE)
            .await?;

        let ip = body.ip.trim();
        if !is_valid_ipv4(ip) {
            log::warn!("Discovery endpoint returned a non-IPv4 address: {:?}", body.ip);
            return Err(CheckError::service(DISCOVERY_UNAVAILABLE));
        }
        Ok(ip.to_string())
    }

    async fn geolocate(&self, ip: &str, stage: StageMessages) -> Result<LookupResult> {
        let url = self.service.geolocation_url_for(ip);
        let body: GeoResponse = self.get_json(&url, stage.unavailable).await?;
        body.into_result(ip, stage.fallback_reason)
    }

    /// GET `url` and decode its JSON body within the timeout bound
    ///
    /// A non-success status becomes `CheckError::Service(unavailable)`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, unavailable: &str) -> Result<T> {
        let timeout = self.timeout();
        log::debug!("GET {} (timeout {:?})", url, timeout);

        let request = async {
            let response = self.client.get(url).send().await.map_err(|e| classify(e, timeout))?;

            if !response.status().is_success() {
                log::warn!("{} answered HTTP {}", url, response.status());
                return Err(CheckError::service(unavailable));
            }

            response.json::<T>().await.map_err(|e| {
                if e.is_timeout() {
                    CheckError::Timeout(timeout.as_secs())
                } else {
                    CheckError::service(format!("Malformed response from {}: {}", url, e))
                }
            })
        };

        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(CheckError::Timeout(timeout.as_secs())),
        }
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> CheckError {
    if err.is_timeout() {
        CheckError::Timeout(timeout.as_secs())
    } else {
        CheckError::network(format!("Failed to send request: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GeoClient::new(&ServiceConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let service = ServiceConfig {
            proxy: Some("not a url at all".to_string()),
            ..ServiceConfig::default()
        };
        assert!(matches!(GeoClient::new(&service), Err(CheckError::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_service_error() {
        // Port 9 on localhost is expected to refuse connections
        let service = ServiceConfig {
            ip_discovery_url: "http://127.0.0.1:9/".to_string(),
            timeout_secs: 2,
            ..ServiceConfig::default()
        };
        let client = GeoClient::new(&service).unwrap();
        let outcome = client.resolve(None).await;
        assert!(matches!(outcome, RequestOutcome::ServiceError(_) | RequestOutcome::Timeout));
    }
}
