//! Map rendering module
//!
//! - `backend`: the `MapBackend` trait and an in-memory implementation
//! - `html`: Leaflet page backend
//! - `registry`: per-viewport slots that swap map instances

pub mod backend;
pub mod html;
pub mod registry;

pub use backend::{InMemoryMapBackend, MapBackend, MapHandle, MapInstance, TileLayer};
pub use html::HtmlMapBackend;
pub use registry::ViewportRegistry;

use crate::config::MapConfig;
use crate::error::Result;

/// Pick the backend for a configuration: Leaflet pages when an output
/// directory is set, memory only otherwise
pub fn backend_for(settings: &MapConfig) -> Result<Box<dyn MapBackend>> {
    match &settings.output_dir {
        Some(dir) => Ok(Box::new(HtmlMapBackend::new(dir)?)),
        None => Ok(Box::new(InMemoryMapBackend::new())),
    }
}
