use crate::animate::{AnimationScheduler, EdgePhase};
use crate::config::ConnectorConfig;
use crate::geometry::resolve_rects;
use crate::measure::path_length;
use crate::path::synthesize_paths;
use crate::registry::{MeasureSurface, NodeRegistry};
use crate::topology::{TopologyEdge, sanitize_topology, validate_topology};

/// One synthesized connector. The collection is rebuilt wholesale on every
/// geometry pass, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedPath {
    pub id: String,
    pub d: String,
    /// Total stroke length, recomputed from `d`'s command list each pass
    /// before any animation references it.
    pub length: f32,
    /// Current dash offset: `length` fully hidden, `0.0` fully drawn.
    pub offset: f32,
}

/// The connector pipeline driver. Single-threaded and cooperative: the
/// host reports `ready`/`visible`/resize as they happen, asks for
/// `next_deadline`, and calls `poll` at or after it with the current
/// monotonic time in milliseconds. The engine owns no timers and touches
/// the surface only inside `poll`.
pub struct ConnectorEngine {
    registry: NodeRegistry,
    topology: Vec<TopologyEdge>,
    config: ConnectorConfig,
    scheduler: AnimationScheduler,
    paths: Vec<ComputedPath>,
    container_size: Option<(f32, f32)>,
    ready: bool,
    visible: bool,
    /// Pending settle or debounce deadline; a later resize overwrites it,
    /// coalescing rapid-fire events into one recomputation.
    measure_deadline: Option<f64>,
    disposed: bool,
}

impl ConnectorEngine {
    /// A topology edge naming an unknown anchor is a configuration error:
    /// asserted in development builds, silently dropped in release.
    pub fn new(registry: NodeRegistry, topology: Vec<TopologyEdge>, config: ConnectorConfig) -> Self {
        if let Err(err) = validate_topology(&topology, &registry) {
            debug_assert!(false, "invalid connector topology: {err}");
        }
        let topology = sanitize_topology(topology, &registry);
        let scheduler = AnimationScheduler::new(&config);
        Self {
            registry,
            topology,
            config,
            scheduler,
            paths: Vec::new(),
            container_size: None,
            ready: false,
            visible: false,
            measure_deadline: None,
            disposed: false,
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn paths(&self) -> &[ComputedPath] {
        &self.paths
    }

    pub fn phases(&self) -> &[EdgePhase] {
        self.scheduler.phases()
    }

    /// Stagger delay of the edge at `index`.
    pub fn delay_ms(&self, index: usize) -> f64 {
        self.scheduler.delay_ms(index)
    }

    /// Container dimensions captured by the latest successful pass.
    pub fn container_size(&self) -> Option<(f32, f32)> {
        self.container_size
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// All anchors are mounted and safe to measure. Arms the settle timer
    /// so late font/image layout shifts land before the first read.
    pub fn set_ready(&mut self, now: f64) {
        if self.disposed || self.ready {
            return;
        }
        self.ready = true;
        self.measure_deadline = Some(now + self.config.settle_delay_ms);
    }

    /// The chart scrolled into view. Level-sensitive: arriving before the
    /// first pass, or after a resize, still starts the reveal exactly once.
    pub fn set_visible(&mut self, now: f64) {
        if self.disposed {
            return;
        }
        self.visible = true;
        if !self.paths.is_empty() {
            self.scheduler.activate(now);
            self.sync_offsets(now);
        }
    }

    /// Viewport changed; schedule a debounced recomputation.
    pub fn notify_resize(&mut self, now: f64) {
        if self.disposed || !self.ready {
            return;
        }
        self.measure_deadline = Some(now + self.config.resize_debounce_ms);
    }

    /// When the host should call `poll` next, or `None` when idle.
    pub fn next_deadline(&self) -> Option<f64> {
        if self.disposed {
            return None;
        }
        [self.measure_deadline, self.scheduler.next_deadline()]
            .into_iter()
            .flatten()
            .reduce(f64::min)
    }

    /// Runs whatever became due: an armed measurement pass, then phase
    /// latching. Geometry reads and path synthesis all happen inside this
    /// one synchronous call, so no two passes can interleave.
    pub fn poll(&mut self, surface: &dyn MeasureSurface, now: f64) {
        if self.disposed {
            return;
        }
        if let Some(deadline) = self.measure_deadline
            && now >= deadline
        {
            self.measure_deadline = None;
            self.run_pass(surface, now);
        }
        self.scheduler.tick(now);
        self.sync_offsets(now);
    }

    /// Cancels pending timers and detaches the engine from its surface.
    /// Every entry point afterwards is a no-op.
    pub fn teardown(&mut self) {
        self.disposed = true;
        self.measure_deadline = None;
    }

    fn run_pass(&mut self, surface: &dyn MeasureSurface, now: f64) {
        let Some(geometry) = resolve_rects(surface, &self.registry) else {
            // An anchor is not mounted; keep the previous overlay intact.
            return;
        };
        let synthesized = synthesize_paths(&geometry.rects, &self.topology, &self.config);
        let mut paths = Vec::with_capacity(synthesized.len());
        for edge_path in &synthesized {
            let length = path_length(&edge_path.commands);
            paths.push(ComputedPath {
                id: edge_path.id.clone(),
                d: edge_path.to_svg(),
                length,
                offset: length,
            });
        }
        self.container_size = Some((geometry.container.width, geometry.container.height));
        self.paths = paths;
        self.scheduler.bind_pass(self.paths.len());
        if self.visible {
            self.scheduler.activate(now);
        }
        self.sync_offsets(now);
    }

    fn sync_offsets(&mut self, now: f64) {
        for (index, path) in self.paths.iter_mut().enumerate() {
            path.offset = self.scheduler.offset(index, path.length, now);
        }
    }
}
