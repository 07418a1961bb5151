//! Viewport registry - one swappable map slot per viewport

use crate::config::MapConfig;
use crate::display::Viewport;
use crate::error::Result;
use crate::geo::LatLng;
use crate::map::backend::{MapBackend, MapHandle, MapInstance};

/// The current map handle of one viewport
#[derive(Debug)]
struct MapSlot {
    viewport: Viewport,
    handle: Option<MapHandle>,
}

impl MapSlot {
    fn new(viewport: Viewport) -> Self {
        Self { viewport, handle: None }
    }
}

/// Owns the map backend and the two viewport slots
///
/// A slot releases its previous map before a new one is attached, so at most
/// one instance lives in each viewport.
pub struct ViewportRegistry {
    backend: Box<dyn MapBackend>,
    settings: MapConfig,
    self_check: MapSlot,
    lookup: MapSlot,
}

impl ViewportRegistry {
    pub fn new(backend: Box<dyn MapBackend>, settings: MapConfig) -> Self {
        Self {
            backend,
            settings,
            self_check: MapSlot::new(Viewport::SelfCheck),
            lookup: MapSlot::new(Viewport::Lookup),
        }
    }

    fn slot_mut(&mut self, viewport: Viewport) -> &mut MapSlot {
        match viewport {
            Viewport::SelfCheck => &mut self.self_check,
            Viewport::Lookup => &mut self.lookup,
        }
    }

    /// Replace the map of `viewport` with one centered on `center`
    pub fn show(&mut self, viewport: Viewport, center: LatLng) -> Result<MapHandle> {
        let element_id = viewport.map_element();
        let zoom = self.settings.zoom;

        if let Some(previous) = self.slot_mut(viewport).handle.take() {
            log::debug!("Releasing map {:?} in #{}", previous, element_id);
            self.backend.remove(previous)?;
        }

        let handle = self.backend.create_map(element_id, center, zoom)?;
        if let Err(e) = self.decorate(handle, center) {
            if let Err(cleanup) = self.backend.remove(handle) {
                log::warn!("Failed to release map {:?} in #{}: {}", handle, element_id, cleanup);
                // Still attached, so the slot must own it for the next swap
                self.slot_mut(viewport).handle = Some(handle);
            }
            return Err(e);
        }
        self.slot_mut(viewport).handle = Some(handle);

        log::info!(
            "Map in #{} centered at {}, {} ({} backend)",
            element_id,
            center.lat,
            center.lon,
            self.backend.name()
        );
        Ok(handle)
    }

    fn decorate(&mut self, handle: MapHandle, center: LatLng) -> Result<()> {
        self.backend
            .add_tile_layer(handle, &self.settings.tile_url, &self.settings.attribution)?;
        self.backend.add_marker(handle, center)
    }

    /// Handle currently installed in `viewport`
    pub fn current(&self, viewport: Viewport) -> Option<MapHandle> {
        match viewport {
            Viewport::SelfCheck => self.self_check.handle,
            Viewport::Lookup => self.lookup.handle,
        }
    }

    /// Live map instances attached to `viewport`
    pub fn live_maps(&self, viewport: Viewport) -> Vec<MapInstance> {
        let slot = match viewport {
            Viewport::SelfCheck => &self.self_check,
            Viewport::Lookup => &self.lookup,
        };
        self.backend.instances_in(slot.viewport.map_element())
    }
}
