//! Map library surface
//!
//! `MapBackend` is the small slice of a Leaflet-like API the flows need:
//! create a map in an element, remove it, add a tile layer, add a marker.

use crate::error::{CheckError, Result};
use crate::geo::LatLng;
use serde::Serialize;
use std::collections::HashMap;

/// Opaque handle to a live map instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MapHandle(pub u64);

/// Base tile layer attached to a map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

/// State of one live map instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapInstance {
    pub handle: MapHandle,
    pub element_id: String,
    pub center: LatLng,
    pub zoom: u8,
    pub tile_layers: Vec<TileLayer>,
    pub markers: Vec<LatLng>,
}

/// Common trait for all map backends
pub trait MapBackend: Send {
    fn name(&self) -> &str;

    /// Create a map centered on `center` inside `element_id`
    fn create_map(&mut self, element_id: &str, center: LatLng, zoom: u8) -> Result<MapHandle>;

    /// Detach and destroy a map
    fn remove(&mut self, handle: MapHandle) -> Result<()>;

    fn add_tile_layer(&mut self, handle: MapHandle, url_template: &str, attribution: &str) -> Result<()>;

    fn add_marker(&mut self, handle: MapHandle, at: LatLng) -> Result<()>;

    /// Snapshot of the live maps attached to `element_id`
    fn instances_in(&self, element_id: &str) -> Vec<MapInstance>;
}

/// Backend keeping map instances in memory only
#[derive(Debug, Default)]
pub struct InMemoryMapBackend {
    next_handle: u64,
    instances: HashMap<MapHandle, MapInstance>,
}

impl InMemoryMapBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: MapHandle) -> Option<&MapInstance> {
        self.instances.get(&handle)
    }

    fn get_mut(&mut self, handle: MapHandle) -> Result<&mut MapInstance> {
        self.instances
            .get_mut(&handle)
            .ok_or_else(|| CheckError::map(format!("Unknown map handle: {:?}", handle)))
    }
}

impl MapBackend for InMemoryMapBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn create_map(&mut self, element_id: &str, center: LatLng, zoom: u8) -> Result<MapHandle> {
        self.next_handle += 1;
        let handle = MapHandle(self.next_handle);

        self.instances.insert(
            handle,
            MapInstance {
                handle,
                element_id: element_id.to_string(),
                center,
                zoom,
                tile_layers: Vec::new(),
                markers: Vec::new(),
            },
        );

        log::debug!("Created map {:?} in #{}", handle, element_id);
        Ok(handle)
    }

    fn remove(&mut self, handle: MapHandle) -> Result<()> {
        self.instances
            .remove(&handle)
            .map(|_| ())
            .ok_or_else(|| CheckError::map(format!("Unknown map handle: {:?}", handle)))
    }

    fn add_tile_layer(&mut self, handle: MapHandle, url_template: &str, attribution: &str) -> Result<()> {
        self.get_mut(handle)?.tile_layers.push(TileLayer {
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
        });
        Ok(())
    }

    fn add_marker(&mut self, handle: MapHandle, at: LatLng) -> Result<()> {
        self.get_mut(handle)?.markers.push(at);
        Ok(())
    }

    fn instances_in(&self, element_id: &str) -> Vec<MapInstance> {
        let mut found: Vec<MapInstance> = self
            .instances
            .values()
            .filter(|m| m.element_id == element_id)
            .cloned()
            .collect();
        found.sort_by_key(|m| m.handle);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_decorate() {
        let mut backend = InMemoryMapBackend::new();
        let handle = backend.create_map("map", LatLng::new(1.0, 2.0), 10).unwrap();
        backend.add_tile_layer(handle, "https://t/{z}/{x}/{y}.png", "tiles").unwrap();
        backend.add_marker(handle, LatLng::new(1.0, 2.0)).unwrap();

        let map = backend.get(handle).unwrap();
        assert_eq!(map.zoom, 10);
        assert_eq!(map.tile_layers.len(), 1);
        assert_eq!(map.markers, vec![LatLng::new(1.0, 2.0)]);
    }

    #[test]
    fn test_remove_unknown_handle_fails() {
        let mut backend = InMemoryMapBackend::new();
        assert!(backend.remove(MapHandle(42)).is_err());
        assert!(backend.add_marker(MapHandle(42), LatLng::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_instances_are_scoped_by_element() {
        let mut backend = InMemoryMapBackend::new();
        backend.create_map("map", LatLng::new(0.0, 0.0), 10).unwrap();
        backend.create_map("lookup-map", LatLng::new(1.0, 1.0), 10).unwrap();

        assert_eq!(backend.instances_in("map").len(), 1);
        assert_eq!(backend.instances_in("lookup-map").len(), 1);
        assert!(backend.instances_in("other").is_empty());
    }
}
