use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::config::ConnectorConfig;
use crate::geometry::Rect;
use crate::topology::{CurveKind, TopologyEdge};

/// Targets closer than this to the drop-point axis count as vertically
/// aligned and get a plain line instead of a curve.
const ALIGNMENT_EPSILON: f32 = 0.5;

/// A zero-height anchor has not been laid out yet. Edges touching one get
/// a bare move (zero length, draws instantly) instead of a guessed shape.
fn unrendered(rect: &Rect) -> bool {
    rect.bottom - rect.top <= 0.0
}

fn any_unrendered(edge: &TopologyEdge, rects: &BTreeMap<String, Rect>) -> bool {
    edge.sources
        .iter()
        .chain(edge.targets.iter())
        .filter_map(|anchor| rects.get(anchor))
        .any(unrendered)
}

/// One command of a synthesized path, in container-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f32, f32),
    VerticalTo(f32),
    CurveTo {
        c1: (f32, f32),
        c2: (f32, f32),
        to: (f32, f32),
    },
}

/// A synthesized edge: the typed command list the measurer walks and the
/// renderer serializes. Both views come from the same commands, so dash
/// metrics always match the drawn stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub id: String,
    pub commands: Vec<PathCommand>,
}

impl EdgePath {
    pub fn to_svg(&self) -> String {
        path_data(&self.commands)
    }
}

fn push_coord(out: &mut String, value: f32) {
    // Shortest round-trip float formatting; integral values print bare and
    // negative zero collapses to zero.
    let value = if value == 0.0 { 0.0 } else { value };
    let _ = write!(out, "{value}");
}

/// Serializes commands as an SVG path `d` attribute.
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match *command {
            PathCommand::MoveTo(x, y) => {
                d.push('M');
                push_coord(&mut d, x);
                d.push(',');
                push_coord(&mut d, y);
            }
            PathCommand::VerticalTo(y) => {
                d.push('V');
                push_coord(&mut d, y);
            }
            PathCommand::CurveTo { c1, c2, to } => {
                d.push('C');
                push_coord(&mut d, c1.0);
                d.push(',');
                push_coord(&mut d, c1.1);
                d.push(' ');
                push_coord(&mut d, c2.0);
                d.push(',');
                push_coord(&mut d, c2.1);
                d.push(' ');
                push_coord(&mut d, to.0);
                d.push(',');
                push_coord(&mut d, to.1);
            }
        }
    }
    d
}

/// Where a straight drop continues downward from a symmetric dual curve.
/// The extremum of a symmetric cubic with equal-height anchors and
/// vertically-offset control points sits at `fraction` (3/4) of the offset
/// below the anchors; the fraction does not hold for asymmetric control
/// points.
pub fn curve_drop_point(a: &Rect, b: &Rect, depth: f32, fraction: f32) -> (f32, f32) {
    (
        (a.center_x + b.center_x) / 2.0,
        (a.bottom + b.bottom) / 2.0 + depth * fraction,
    )
}

fn start_point(
    edge: &TopologyEdge,
    rects: &BTreeMap<String, Rect>,
    config: &ConnectorConfig,
) -> Option<(f32, f32)> {
    let mut center_x = 0.0;
    let mut bottom = 0.0;
    for source in &edge.sources {
        let rect = rects.get(source)?;
        center_x += rect.center_x;
        bottom += rect.bottom;
    }
    let count = edge.sources.len() as f32;
    let center_x = center_x / count;
    let bottom = bottom / count;
    if edge.sources.len() > 1 {
        // Multi-source drops hang off the sibling curve's lowest point.
        Some((center_x, bottom + edge.depth * config.drop_point_fraction))
    } else {
        Some((center_x, bottom))
    }
}

fn straight_drop(
    edge: &TopologyEdge,
    rects: &BTreeMap<String, Rect>,
    config: &ConnectorConfig,
) -> Option<Vec<PathCommand>> {
    let (x, y) = start_point(edge, rects, config)?;
    let end_y = match edge.targets.first() {
        Some(target) => rects.get(target)?.top,
        None => y + edge.depth,
    };
    Some(vec![PathCommand::MoveTo(x, y), PathCommand::VerticalTo(end_y)])
}

fn symmetric_dual_curve(
    edge: &TopologyEdge,
    rects: &BTreeMap<String, Rect>,
) -> Option<Vec<PathCommand>> {
    let a = rects.get(edge.sources.first()?)?;
    let b = rects.get(edge.targets.first()?)?;
    if (a.center_x - b.center_x).abs() <= ALIGNMENT_EPSILON
        && (a.bottom - b.bottom).abs() <= ALIGNMENT_EPSILON
    {
        // Coincident siblings: nothing to span.
        return Some(vec![PathCommand::MoveTo(a.center_x, a.bottom)]);
    }
    Some(vec![
        PathCommand::MoveTo(a.center_x, a.bottom),
        PathCommand::CurveTo {
            c1: (a.center_x, a.bottom + edge.depth),
            c2: (b.center_x, b.bottom + edge.depth),
            to: (b.center_x, b.bottom),
        },
    ])
}

fn branch_curve(
    edge: &TopologyEdge,
    rects: &BTreeMap<String, Rect>,
    config: &ConnectorConfig,
) -> Option<Vec<PathCommand>> {
    let source = rects.get(edge.sources.first()?)?;
    let target = rects.get(edge.targets.first()?)?;
    let drop = (source.center_x, source.bottom + edge.depth);
    if (target.center_x - drop.0).abs() <= ALIGNMENT_EPSILON {
        // Directly below the drop point: no elbow, just fall through.
        return Some(vec![
            PathCommand::MoveTo(drop.0, drop.1),
            PathCommand::VerticalTo(target.top),
        ]);
    }
    Some(vec![
        PathCommand::MoveTo(drop.0, drop.1),
        PathCommand::CurveTo {
            c1: (drop.0, drop.1 + config.branch_spread_down),
            c2: (target.center_x, target.top - config.branch_spread_up),
            to: (target.center_x, target.top),
        },
    ])
}

/// Builds one path per topology edge from rectangles resolved in the same
/// pass. Pure and deterministic: identical inputs yield identical paths.
/// Edges whose anchors are absent from the rect map are skipped; degenerate
/// geometry produces zero-length paths, never a panic.
pub fn synthesize_paths(
    rects: &BTreeMap<String, Rect>,
    topology: &[TopologyEdge],
    config: &ConnectorConfig,
) -> Vec<EdgePath> {
    let mut paths = Vec::with_capacity(topology.len());
    for edge in topology {
        let commands = if any_unrendered(edge, rects) {
            start_point(edge, rects, config).map(|(x, y)| vec![PathCommand::MoveTo(x, y)])
        } else {
            match edge.kind {
                CurveKind::StraightDrop => straight_drop(edge, rects, config),
                CurveKind::SymmetricDualCurve => symmetric_dual_curve(edge, rects),
                CurveKind::BranchCurve => branch_curve(edge, rects, config),
            }
        };
        if let Some(commands) = commands {
            paths.push(EdgePath {
                id: edge.id.clone(),
                commands,
            });
        }
    }
    paths
}
