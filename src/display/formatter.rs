//! Panel formatter - formats panels and outcomes for terminal output

use crate::display::{Panel, Viewport};
use crate::geo::RequestOutcome;
use crate::map::MapInstance;

#[cfg(feature = "colored-output")]
use colored::Colorize;

fn label(viewport: Viewport) -> &'static str {
    match viewport {
        Viewport::SelfCheck => "Your connection",
        Viewport::Lookup => "IP lookup",
    }
}

/// Format a panel as aligned text lines
pub fn format_text(viewport: Viewport, panel: &Panel, outcome: &RequestOutcome, use_color: bool) -> String {
    let title = label(viewport);
    let title = paint_title(title, outcome, use_color);

    format!(
        "{}\n  IP:       {}\n  Location: {}\n  ISP:      {}",
        title, panel.ip, panel.location, panel.isp
    )
}

fn paint_title(title: &str, outcome: &RequestOutcome, use_color: bool) -> String {
    if !use_color {
        return title.to_string();
    }

    #[cfg(feature = "colored-output")]
    {
        if outcome.is_success() {
            title.green().bold().to_string()
        } else {
            title.red().bold().to_string()
        }
    }
    #[cfg(not(feature = "colored-output"))]
    {
        let _ = outcome;
        title.to_string()
    }
}

/// Format a panel, its outcome and its live map as JSON
pub fn format_json(
    viewport: Viewport,
    panel: &Panel,
    outcome: &RequestOutcome,
    maps: &[MapInstance],
) -> Result<String, serde_json::Error> {
    use serde_json::json;

    serde_json::to_string_pretty(&json!({
        "viewport": viewport,
        "fields": panel,
        "result": outcome,
        "map": maps.last().map(|m| json!({
            "element": m.element_id,
            "center": m.center,
            "zoom": m.zoom,
        })),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{LatLng, LookupResult};
    use crate::map::MapHandle;

    fn sample() -> (Panel, RequestOutcome) {
        let result = LookupResult {
            ip: "8.8.8.8".to_string(),
            city: "Mountain View".to_string(),
            country: "United States".to_string(),
            org: "GOOGLE".to_string(),
            latitude: Some(37.4),
            longitude: Some(-122.1),
        };
        (
            Panel::new("8.8.8.8", result.location(), "GOOGLE"),
            RequestOutcome::Success(result),
        )
    }

    #[test]
    fn test_format_text_plain() {
        let (panel, outcome) = sample();
        let text = format_text(Viewport::Lookup, &panel, &outcome, false);
        assert!(text.starts_with("IP lookup"));
        assert!(text.contains("Location: Mountain View, United States"));
        assert!(text.contains("ISP:      GOOGLE"));
    }

    #[test]
    fn test_format_json() {
        let (panel, outcome) = sample();
        let maps = vec![MapInstance {
            handle: MapHandle(1),
            element_id: "lookup-map".to_string(),
            center: LatLng::new(37.4, -122.1),
            zoom: 10,
            tile_layers: Vec::new(),
            markers: Vec::new(),
        }];

        let json = format_json(Viewport::Lookup, &panel, &outcome, &maps).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["viewport"], "lookup");
        assert_eq!(value["fields"]["ip"], "8.8.8.8");
        assert_eq!(value["result"]["outcome"], "success");
        assert_eq!(value["map"]["element"], "lookup-map");
    }

    #[test]
    fn test_format_json_without_map() {
        let panel = Panel::new("Request timeout", "Please try again", "Timeout");
        let json = format_json(Viewport::SelfCheck, &panel, &RequestOutcome::Timeout, &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["outcome"], "timeout");
        assert!(value["map"].is_null());
    }
}
