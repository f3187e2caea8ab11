use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConnectorConfig;
use crate::registry::NodeRegistry;

/// Curve style of a configured connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// Vertical line from the derived start point down to the target (or
    /// `depth` further down when the edge has no target).
    StraightDrop,
    /// Single cubic between two sibling bottoms, control points `depth`
    /// straight below each endpoint.
    SymmetricDualCurve,
    /// Cubic fanning out from the source's drop point to an off-axis
    /// target; degrades to a vertical line for an aligned target.
    BranchCurve,
}

/// Fixed, build-time-configured connection between anchors. Never inferred
/// from measured geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyEdge {
    pub id: String,
    pub kind: CurveKind,
    pub sources: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    /// How far the curve dips, or the drop extends, before reaching its
    /// target, in container pixels.
    pub depth: f32,
}

impl TopologyEdge {
    pub fn new(id: &str, kind: CurveKind, sources: &[&str], targets: &[&str], depth: f32) -> Self {
        Self {
            id: id.to_string(),
            kind,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("edge `{edge}` references unknown anchor `{anchor}`")]
    UnknownAnchor { edge: String, anchor: String },
    #[error("duplicate edge id `{0}`")]
    DuplicateEdgeId(String),
    #[error("edge `{edge}`: expected {expected} for this curve kind")]
    BadArity { edge: String, expected: &'static str },
}

/// The built-in six-edge organogram topology: a sibling curve
/// between ceo and cofounder, a drop from its low point to the manager, a
/// stub below the manager, and three fanned branches to the leads.
pub fn organogram_topology(config: &ConnectorConfig) -> Vec<TopologyEdge> {
    vec![
        TopologyEdge::new(
            "top-curve",
            CurveKind::SymmetricDualCurve,
            &["ceo"],
            &["cofounder"],
            config.curve_depth,
        ),
        TopologyEdge::new(
            "top-to-manager",
            CurveKind::StraightDrop,
            &["ceo", "cofounder"],
            &["manager"],
            config.curve_depth,
        ),
        TopologyEdge::new(
            "manager-drop",
            CurveKind::StraightDrop,
            &["manager"],
            &[],
            config.branch_drop,
        ),
        TopologyEdge::new(
            "curve-to-lead1",
            CurveKind::BranchCurve,
            &["manager"],
            &["lead1"],
            config.branch_drop,
        ),
        TopologyEdge::new(
            "curve-to-lead2",
            CurveKind::BranchCurve,
            &["manager"],
            &["lead2"],
            config.branch_drop,
        ),
        TopologyEdge::new(
            "curve-to-lead3",
            CurveKind::BranchCurve,
            &["manager"],
            &["lead3"],
            config.branch_drop,
        ),
    ]
}

fn check_edge(edge: &TopologyEdge, registry: &NodeRegistry) -> Result<(), TopologyError> {
    match edge.kind {
        CurveKind::StraightDrop => {
            if edge.sources.is_empty() || edge.targets.len() > 1 {
                return Err(TopologyError::BadArity {
                    edge: edge.id.clone(),
                    expected: "at least one source and at most one target",
                });
            }
        }
        CurveKind::SymmetricDualCurve | CurveKind::BranchCurve => {
            if edge.sources.len() != 1 || edge.targets.len() != 1 {
                return Err(TopologyError::BadArity {
                    edge: edge.id.clone(),
                    expected: "exactly one source and one target",
                });
            }
        }
    }
    for anchor in edge.sources.iter().chain(edge.targets.iter()) {
        if !registry.contains(anchor) {
            return Err(TopologyError::UnknownAnchor {
                edge: edge.id.clone(),
                anchor: anchor.clone(),
            });
        }
    }
    Ok(())
}

/// Full validation of a configured topology against the anchor registry.
pub fn validate_topology(
    edges: &[TopologyEdge],
    registry: &NodeRegistry,
) -> Result<(), TopologyError> {
    let mut seen = std::collections::BTreeSet::new();
    for edge in edges {
        if !seen.insert(edge.id.as_str()) {
            return Err(TopologyError::DuplicateEdgeId(edge.id.clone()));
        }
        check_edge(edge, registry)?;
    }
    Ok(())
}

/// Release-mode fallback: drop misconfigured edges instead of aborting the
/// whole chart.
pub fn sanitize_topology(edges: Vec<TopologyEdge>, registry: &NodeRegistry) -> Vec<TopologyEdge> {
    let mut seen = std::collections::BTreeSet::new();
    edges
        .into_iter()
        .filter(|edge| seen.insert(edge.id.clone()) && check_edge(edge, registry).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectorConfig;

    #[test]
    fn built_in_topology_is_valid() {
        let config = ConnectorConfig::default();
        let topology = organogram_topology(&config);
        assert_eq!(topology.len(), 6);
        assert!(validate_topology(&topology, &NodeRegistry::organogram()).is_ok());
    }

    #[test]
    fn unknown_anchor_is_rejected() {
        let edges = vec![TopologyEdge::new(
            "bad",
            CurveKind::StraightDrop,
            &["ghost"],
            &[],
            80.0,
        )];
        let err = validate_topology(&edges, &NodeRegistry::organogram()).unwrap_err();
        assert_eq!(
            err,
            TopologyError::UnknownAnchor {
                edge: "bad".to_string(),
                anchor: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_edge_ids_are_rejected() {
        let edges = vec![
            TopologyEdge::new("dup", CurveKind::StraightDrop, &["ceo"], &[], 80.0),
            TopologyEdge::new("dup", CurveKind::StraightDrop, &["manager"], &[], 80.0),
        ];
        let err = validate_topology(&edges, &NodeRegistry::organogram()).unwrap_err();
        assert_eq!(err, TopologyError::DuplicateEdgeId("dup".to_string()));
    }

    #[test]
    fn dual_curve_requires_one_source_and_one_target() {
        let edges = vec![TopologyEdge::new(
            "pair",
            CurveKind::SymmetricDualCurve,
            &["ceo", "cofounder"],
            &["manager"],
            160.0,
        )];
        assert!(matches!(
            validate_topology(&edges, &NodeRegistry::organogram()),
            Err(TopologyError::BadArity { .. })
        ));
    }

    #[test]
    fn sanitize_drops_only_the_offending_edge() {
        let config = ConnectorConfig::default();
        let mut edges = organogram_topology(&config);
        edges.push(TopologyEdge::new(
            "stray",
            CurveKind::BranchCurve,
            &["manager"],
            &["ghost"],
            80.0,
        ));
        let kept = sanitize_topology(edges, &NodeRegistry::organogram());
        assert_eq!(kept.len(), 6);
        assert!(kept.iter().all(|edge| edge.id != "stray"));
    }

    #[test]
    fn curve_kinds_use_kebab_case_names() {
        let json = serde_json::to_string(&CurveKind::SymmetricDualCurve).unwrap();
        assert_eq!(json, "\"symmetric-dual-curve\"");
        let kind: CurveKind = serde_json::from_str("\"straight-drop\"").unwrap();
        assert_eq!(kind, CurveKind::StraightDrop);
    }
}
