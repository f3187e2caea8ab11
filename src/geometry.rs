use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::{MeasureSurface, NodeRegistry};

/// Viewport-absolute rectangle as sampled by the measurement surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl RawRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Anchor rectangle normalized to the container origin. Only the values the
/// path synthesizer consumes survive normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub bottom: f32,
    pub center_x: f32,
}

impl Rect {
    pub fn relative_to(raw: RawRect, container: RawRect) -> Self {
        Self {
            top: raw.top - container.top,
            bottom: raw.bottom() - container.top,
            center_x: raw.left - container.left + raw.width / 2.0,
        }
    }
}

/// Result of one geometry pass: the container frame plus every registered
/// anchor, all sampled within the same synchronous call.
#[derive(Debug, Clone)]
pub struct ResolvedGeometry {
    pub container: RawRect,
    pub rects: BTreeMap<String, Rect>,
}

/// Reads the container and every anchor the registry knows about. Returns
/// `None` if anything is missing so a pass never works from partial or
/// mixed-generation geometry.
pub fn resolve_rects(
    surface: &dyn MeasureSurface,
    registry: &NodeRegistry,
) -> Option<ResolvedGeometry> {
    let container = surface.container_rect()?;
    let mut rects = BTreeMap::new();
    for (anchor_id, element_id) in registry.entries() {
        let raw = surface.anchor_rect(element_id)?;
        rects.insert(anchor_id.to_string(), Rect::relative_to(raw, container));
    }
    Some(ResolvedGeometry { container, rects })
}
