use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::geometry::RawRect;

/// Element ids of the built-in organogram chart, keyed by logical anchor id.
static ORGANOGRAM_ELEMENT_IDS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("ceo", "org-ceo-shape"),
        ("cofounder", "org-cofounder-shape"),
        ("manager", "org-manager-shape"),
        ("lead1", "org-lead1-shape"),
        ("lead2", "org-lead2-shape"),
        ("lead3", "org-lead3-shape"),
    ])
});

/// Live geometry provider. The engine never queries a host document
/// directly; hosts expose their element rectangles through this trait and
/// every read happens inside one synchronous pass.
pub trait MeasureSurface {
    /// Rectangle of the container element, or `None` while it is unmounted.
    fn container_rect(&self) -> Option<RawRect>;

    /// Rectangle of the element with the given id, or `None` if it is not
    /// (or no longer) part of the layout.
    fn anchor_rect(&self, element_id: &str) -> Option<RawRect>;
}

/// Injected mapping from logical anchor id to the surface element that
/// represents it. All DOM-equivalent reads go through this one layer.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    entries: BTreeMap<String, String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for the built-in six-anchor organogram.
    pub fn organogram() -> Self {
        let mut registry = Self::new();
        for (anchor_id, element_id) in ORGANOGRAM_ELEMENT_IDS.iter() {
            registry.insert(anchor_id, element_id);
        }
        registry
    }

    pub fn insert(&mut self, anchor_id: &str, element_id: &str) {
        self.entries
            .insert(anchor_id.to_string(), element_id.to_string());
    }

    pub fn element_id(&self, anchor_id: &str) -> Option<&str> {
        self.entries.get(anchor_id).map(String::as_str)
    }

    pub fn contains(&self, anchor_id: &str) -> bool {
        self.entries.contains_key(anchor_id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(anchor, element)| (anchor.as_str(), element.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organogram_registry_covers_all_anchors() {
        let registry = NodeRegistry::organogram();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.element_id("ceo"), Some("org-ceo-shape"));
        assert_eq!(registry.element_id("lead3"), Some("org-lead3-shape"));
        assert!(!registry.contains("intern"));
    }

    #[test]
    fn insert_overrides_existing_mapping() {
        let mut registry = NodeRegistry::organogram();
        registry.insert("ceo", "custom-ceo");
        assert_eq!(registry.element_id("ceo"), Some("custom-ceo"));
        assert_eq!(registry.len(), 6);
    }
}
