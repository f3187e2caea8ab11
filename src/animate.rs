use crate::config::ConnectorConfig;

/// Draw-in state of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePhase {
    /// No path computed yet.
    Pending,
    /// Path computed, dash offset parked at full length.
    Hidden,
    /// Offset transitioning to zero; `start` already includes the edge's
    /// stagger delay.
    Revealing { start: f64 },
    /// Fully drawn. A later geometry pass recomputes the path but keeps
    /// the edge drawn; only a full remount re-animates.
    Revealed,
}

/// Maps the visibility gate and per-edge stagger delays onto dash offsets.
/// Activation is a one-shot latch per chart instance: recomputation passes
/// after the reveal never re-hide an edge.
#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    stagger_step_ms: f64,
    reveal_duration_ms: f64,
    activated_at: Option<f64>,
    phases: Vec<EdgePhase>,
}

impl AnimationScheduler {
    pub fn new(config: &ConnectorConfig) -> Self {
        Self {
            stagger_step_ms: config.stagger_step_ms,
            reveal_duration_ms: config.reveal_duration_ms,
            activated_at: None,
            phases: Vec::new(),
        }
    }

    pub fn phases(&self) -> &[EdgePhase] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> EdgePhase {
        self.phases.get(index).copied().unwrap_or(EdgePhase::Pending)
    }

    pub fn is_activated(&self) -> bool {
        self.activated_at.is_some()
    }

    /// Stagger delay of the edge at `index`, proportional to its position.
    pub fn delay_ms(&self, index: usize) -> f64 {
        self.stagger_step_ms * index as f64
    }

    pub fn reveal_duration_ms(&self) -> f64 {
        self.reveal_duration_ms
    }

    /// A geometry pass produced `count` paths. Edges keep their phase
    /// across passes once the reveal has run; before that they park at
    /// `Hidden`.
    pub fn bind_pass(&mut self, count: usize) {
        self.phases.truncate(count);
        while self.phases.len() < count {
            self.phases.push(EdgePhase::Pending);
        }
        for phase in &mut self.phases {
            if matches!(phase, EdgePhase::Pending) {
                *phase = EdgePhase::Hidden;
            }
        }
        if let Some(at) = self.activated_at {
            self.start_reveals(at);
        }
    }

    /// Visibility gate. One-shot: the first call with paths bound starts
    /// the staggered reveal; later calls are no-ops. Safe to call before
    /// any pass has run, in which case the gate stays open for the next
    /// `bind_pass`.
    pub fn activate(&mut self, now: f64) {
        if self.activated_at.is_some() || self.phases.is_empty() {
            return;
        }
        self.activated_at = Some(now);
        self.start_reveals(now);
    }

    fn start_reveals(&mut self, at: f64) {
        let stagger = self.stagger_step_ms;
        for (index, phase) in self.phases.iter_mut().enumerate() {
            if matches!(phase, EdgePhase::Hidden) {
                *phase = EdgePhase::Revealing {
                    start: at + stagger * index as f64,
                };
            }
        }
    }

    /// Latches edges whose transition has finished.
    pub fn tick(&mut self, now: f64) {
        let duration = self.reveal_duration_ms;
        for phase in &mut self.phases {
            if let EdgePhase::Revealing { start } = *phase
                && now >= start + duration
            {
                *phase = EdgePhase::Revealed;
            }
        }
    }

    /// Earliest instant at which `tick` would change a phase.
    pub fn next_deadline(&self) -> Option<f64> {
        self.phases
            .iter()
            .filter_map(|phase| match phase {
                EdgePhase::Revealing { start } => Some(start + self.reveal_duration_ms),
                _ => None,
            })
            .reduce(f64::min)
    }

    /// Dash offset for the edge at `index` on a path of the given length:
    /// full length while hidden, zero once drawn, linear in between.
    /// Zero-length paths draw instantly.
    pub fn offset(&self, index: usize, length: f32, now: f64) -> f32 {
        match self.phase(index) {
            EdgePhase::Pending | EdgePhase::Hidden => length,
            EdgePhase::Revealed => 0.0,
            EdgePhase::Revealing { start } => {
                if length <= 0.0 || self.reveal_duration_ms <= 0.0 {
                    return 0.0;
                }
                let progress = ((now - start) / self.reveal_duration_ms).clamp(0.0, 1.0);
                length * (1.0 - progress as f32)
            }
        }
    }
}
