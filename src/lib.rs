//! Connector overlay engine for organogram-style charts.
//!
//! Given a measured scene (container plus anchor rectangles) and an edge
//! topology, the engine synthesizes cubic Bezier SVG paths between node
//! bottoms, measures their arc lengths, and schedules a staggered
//! draw-on reveal via stroke-dashoffset. All timing is cooperative: the
//! host supplies millisecond timestamps and polls at reported deadlines,
//! so the same core drives a browser overlay, the CLI, and tests.

pub mod animate;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod measure;
pub mod path;
pub mod registry;
pub mod render;
pub mod scene;
pub mod theme;
pub mod topology;

pub use animate::{AnimationScheduler, EdgePhase};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, ConnectorConfig, RenderConfig, load_config};
pub use engine::{ComputedPath, ConnectorEngine};
pub use geometry::{RawRect, Rect, ResolvedGeometry, resolve_rects};
pub use measure::path_length;
pub use path::{EdgePath, PathCommand, synthesize_paths};
pub use registry::{MeasureSurface, NodeRegistry};
pub use render::render_overlay_svg;
pub use scene::Scene;
pub use theme::Theme;
pub use topology::{CurveKind, TopologyEdge, TopologyError, organogram_topology};
