use serde::{Deserialize, Serialize};

/// Visual style of the stroke overlay. The overlay is stroke-only; fills
/// belong to the host page's nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub stroke_color: String,
    pub stroke_width: f32,
    pub stroke_linecap: String,
    pub transition_easing: String,
    /// Backdrop used only for raster export; the SVG overlay itself stays
    /// transparent.
    pub export_background: String,
}

impl Theme {
    /// Default palette: a light slate line over white cards.
    pub fn slate() -> Self {
        Self {
            stroke_color: "#CBD5E1".to_string(),
            stroke_width: 2.5,
            stroke_linecap: "round".to_string(),
            transition_easing: "ease-out".to_string(),
            export_background: "#FFFFFF".to_string(),
        }
    }

    /// Higher-contrast variant for print or dark backdrops.
    pub fn ink() -> Self {
        Self {
            stroke_color: "#475569".to_string(),
            stroke_width: 2.0,
            stroke_linecap: "round".to_string(),
            transition_easing: "ease-out".to_string(),
            export_background: "#F8FAFC".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate()
    }
}
