//! Display panels
//!
//! The page has two panels, one per lookup flow, each made of three text
//! fields (ip, location, isp) and one map viewport.

pub mod formatter;

use serde::Serialize;

/// A named region of the page hosting one panel and one map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewport {
    /// The caller's own address
    SelfCheck,
    /// Manually entered address
    Lookup,
}

impl Viewport {
    /// Element id of the map container
    pub fn map_element(&self) -> &'static str {
        match self {
            Viewport::SelfCheck => "map",
            Viewport::Lookup => "lookup-map",
        }
    }
}

/// Three text fields written together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub ip: String,
    pub location: String,
    pub isp: String,
}

impl Panel {
    pub fn new(ip: impl Into<String>, location: impl Into<String>, isp: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            location: location.into(),
            isp: isp.into(),
        }
    }
}

/// Current text of both panels
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    pub self_check: Panel,
    pub lookup: Panel,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, viewport: Viewport) -> &Panel {
        match viewport {
            Viewport::SelfCheck => &self.self_check,
            Viewport::Lookup => &self.lookup,
        }
    }

    /// Replace all three fields of a panel at once
    pub fn set(&mut self, viewport: Viewport, panel: Panel) {
        log::trace!("{:?} <- {:?}", viewport, panel);
        match viewport {
            Viewport::SelfCheck => self.self_check = panel,
            Viewport::Lookup => self.lookup = panel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        assert_eq!(Viewport::SelfCheck.map_element(), "map");
        assert_eq!(Viewport::Lookup.map_element(), "lookup-map");
    }

    #[test]
    fn test_set_touches_one_panel() {
        let mut dashboard = Dashboard::new();
        dashboard.set(Viewport::Lookup, Panel::new("1.2.3.4", "A, B", "C"));

        assert_eq!(dashboard.panel(Viewport::Lookup).ip, "1.2.3.4");
        assert_eq!(dashboard.panel(Viewport::SelfCheck), &Panel::default());
    }
}
