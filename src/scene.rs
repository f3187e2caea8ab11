use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::geometry::RawRect;
use crate::registry::{MeasureSurface, NodeRegistry};
use crate::topology::TopologyEdge;

/// Snapshot of a laid-out host page: the container plus the viewport
/// rectangle of every connector anchor. Stands in for live DOM measurement
/// in the CLI, fixtures, and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub container: RawRect,
    /// Keyed by surface element id, not by logical anchor id.
    pub anchors: BTreeMap<String, RawRect>,
    /// Optional anchor-id-to-element-id override; defaults to the built-in
    /// organogram registry.
    #[serde(default)]
    pub registry: Option<BTreeMap<String, String>>,
    /// Optional topology override; defaults to the built-in organogram.
    #[serde(default)]
    pub topology: Option<Vec<TopologyEdge>>,
}

impl Scene {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Registry declared by the scene, or the built-in organogram one.
    pub fn build_registry(&self) -> NodeRegistry {
        match &self.registry {
            Some(entries) => {
                let mut registry = NodeRegistry::new();
                for (anchor_id, element_id) in entries {
                    registry.insert(anchor_id, element_id);
                }
                registry
            }
            None => NodeRegistry::organogram(),
        }
    }
}

impl MeasureSurface for Scene {
    fn container_rect(&self) -> Option<RawRect> {
        Some(self.container)
    }

    fn anchor_rect(&self, element_id: &str) -> Option<RawRect> {
        self.anchors.get(element_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_scene() {
        let scene = Scene::from_json(
            r#"{
                "container": {"left": 0, "top": 0, "width": 800, "height": 600},
                "anchors": {
                    "org-ceo-shape": {"left": 85, "top": 40, "width": 80, "height": 60}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(scene.container.width, 800.0);
        assert_eq!(scene.anchor_rect("org-ceo-shape").unwrap().left, 85.0);
        assert!(scene.anchor_rect("org-ghost-shape").is_none());
        assert_eq!(scene.build_registry().len(), 6);
    }

    #[test]
    fn registry_and_topology_overrides_are_honored() {
        let scene = Scene::from_json(
            r#"{
                "container": {"left": 0, "top": 0, "width": 400, "height": 300},
                "anchors": {
                    "parent-card": {"left": 150, "top": 20, "width": 100, "height": 40},
                    "child-card": {"left": 150, "top": 200, "width": 100, "height": 40}
                },
                "registry": {"parent": "parent-card", "child": "child-card"},
                "topology": [
                    {
                        "id": "spine",
                        "kind": "straight-drop",
                        "sources": ["parent"],
                        "targets": ["child"],
                        "depth": 0.0
                    }
                ]
            }"#,
        )
        .unwrap();
        let registry = scene.build_registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.element_id("parent"), Some("parent-card"));
        let topology = scene.topology.as_ref().unwrap();
        assert_eq!(topology.len(), 1);
        assert_eq!(topology[0].id, "spine");
    }
}
