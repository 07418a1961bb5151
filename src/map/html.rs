//! Leaflet HTML backend
//!
//! Each live map is written to `<dir>/<element_id>.html` as a standalone
//! Leaflet page. Removing the map removes its page.

use crate::error::{CheckError, Result};
use crate::geo::LatLng;
use crate::map::backend::{InMemoryMapBackend, MapBackend, MapHandle, MapInstance};
use crate::utils::path;
use std::fs;
use std::path::{Path, PathBuf};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub struct HtmlMapBackend {
    dir: PathBuf,
    maps: InMemoryMapBackend,
}

impl HtmlMapBackend {
    /// Create a backend writing into `dir`, creating it if needed
    pub fn new(dir: &Path) -> Result<Self> {
        path::ensure_dir(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            maps: InMemoryMapBackend::new(),
        })
    }

    /// Page location for an element
    pub fn page_path(&self, element_id: &str) -> PathBuf {
        self.dir.join(format!("{}.html", element_id))
    }

    fn write_page(&self, handle: MapHandle) -> Result<()> {
        let map = self
            .maps
            .get(handle)
            .ok_or_else(|| CheckError::map(format!("Unknown map handle: {:?}", handle)))?;
        let target = self.page_path(&map.element_id);
        fs::write(&target, render_page(map))?;
        log::debug!("Wrote map page {:?}", target);
        Ok(())
    }
}

impl MapBackend for HtmlMapBackend {
    fn name(&self) -> &str {
        "leaflet-html"
    }

    fn create_map(&mut self, element_id: &str, center: LatLng, zoom: u8) -> Result<MapHandle> {
        let handle = self.maps.create_map(element_id, center, zoom)?;
        if let Err(e) = self.write_page(handle) {
            // Undo the registration so no unpaged instance stays attached
            self.maps.remove(handle)?;
            return Err(e);
        }
        Ok(handle)
    }

    fn remove(&mut self, handle: MapHandle) -> Result<()> {
        let element_id = self
            .maps
            .get(handle)
            .map(|m| m.element_id.clone())
            .ok_or_else(|| CheckError::map(format!("Unknown map handle: {:?}", handle)))?;
        self.maps.remove(handle)?;

        let page = self.page_path(&element_id);
        if page.exists() {
            fs::remove_file(&page)?;
        }
        Ok(())
    }

    fn add_tile_layer(&mut self, handle: MapHandle, url_template: &str, attribution: &str) -> Result<()> {
        self.maps.add_tile_layer(handle, url_template, attribution)?;
        self.write_page(handle)
    }

    fn add_marker(&mut self, handle: MapHandle, at: LatLng) -> Result<()> {
        self.maps.add_marker(handle, at)?;
        self.write_page(handle)
    }

    fn instances_in(&self, element_id: &str) -> Vec<MapInstance> {
        self.maps.instances_in(element_id)
    }
}

/// Render one map instance as a Leaflet page
fn render_page(map: &MapInstance) -> String {
    let mut script = format!(
        "var map = L.map({}).setView([{}, {}], {});\n",
        js_string(&map.element_id),
        map.center.lat,
        map.center.lon,
        map.zoom
    );
    for layer in &map.tile_layers {
        script.push_str(&format!(
            "L.tileLayer({}, {{ attribution: {} }}).addTo(map);\n",
            js_string(&layer.url_template),
            js_string(&layer.attribution)
        ));
    }
    for marker in &map.markers {
        script.push_str(&format!("L.marker([{}, {}]).addTo(map);\n", marker.lat, marker.lon));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="{css}">
<script src="{js}"></script>
<style>html, body, #{id} {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="{id}"></div>
<script>
{script}</script>
</body>
</html>
"#,
        title = map.element_id,
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
        id = map.element_id,
        script = script
    )
}

/// Quote a value as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
