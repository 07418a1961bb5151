//! Lookup flows
//!
//! `App` hosts the two flows. It owns the geolocation client, the text of
//! both panels and the viewport registry. Each flow is one async task that
//! writes loading text, suspends on the network, and ends by writing exactly
//! one outcome into its panel.
//!
//! Locks are only held while writing, never across an await, so two
//! invocations of the same flow may interleave; the last write wins.

pub mod lookup;
pub mod messages;
pub mod self_check;

use crate::config::AppConfig;
use crate::display::{Dashboard, Panel, Viewport};
use crate::error::Result;
use crate::geo::{GeoClient, RequestOutcome};
use crate::map::{self, MapInstance, ViewportRegistry};
use messages::FailureMessages;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub use lookup::{validate_input, InputProblem};

pub struct App {
    client: GeoClient,
    dashboard: Mutex<Dashboard>,
    maps: Mutex<ViewportRegistry>,
}

/// Poisoning only means another flow panicked mid-write; the text is still usable
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl App {
    /// Build an app from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = GeoClient::new(&config.service)?;
        let backend = map::backend_for(&config.map)?;
        let maps = ViewportRegistry::new(backend, config.map.clone());
        Ok(Self::with_parts(client, maps))
    }

    pub fn with_parts(client: GeoClient, maps: ViewportRegistry) -> Self {
        Self {
            client,
            dashboard: Mutex::new(Dashboard::new()),
            maps: Mutex::new(maps),
        }
    }

    /// Current text of a panel
    pub fn panel(&self, viewport: Viewport) -> Panel {
        lock(&self.dashboard).panel(viewport).clone()
    }

    /// Live map instances in a viewport
    pub fn live_maps(&self, viewport: Viewport) -> Vec<MapInstance> {
        lock(&self.maps).live_maps(viewport)
    }

    fn write(&self, viewport: Viewport, panel: Panel) {
        lock(&self.dashboard).set(viewport, panel);
    }

    /// Write the panel for a finished request and render its map
    fn apply(&self, viewport: Viewport, outcome: &RequestOutcome, failures: FailureMessages) {
        match outcome {
            RequestOutcome::Success(found) => {
                self.write(
                    viewport,
                    Panel::new(found.ip.clone(), found.location(), found.org.clone()),
                );

                if let Some(center) = found.coordinates() {
                    if let Err(e) = lock(&self.maps).show(viewport, center) {
                        log::warn!("Failed to render map for {:?}: {}", viewport, e);
                    }
                }
            }
            RequestOutcome::Timeout => {
                log::error!("{:?} lookup failed: request timeout", viewport);
                self.write(viewport, failures.timeout.to_panel());
            }
            RequestOutcome::ServiceError(reason) | RequestOutcome::ValidationError(reason) => {
                log::error!("{:?} lookup failed: {}", viewport, reason);
                self.write(viewport, failures.unavailable.to_panel());
            }
        }
    }
}
