use mandelscope_core::Viewport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable parameters for the explorer. `Default` gives the classic
/// whole-set framing at a moderate iteration budget.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Plane coordinates at the middle of the initial frame.
    pub initial_center: (f64, f64),
    /// Pixels per plane unit of the initial frame.
    pub initial_scale: f64,
    /// Starting iteration cap.
    pub iteration_cap: u32,
    /// Multiplier applied to the scale per zoom step.
    pub zoom_factor: f64,
    /// Amount added to or removed from the cap per adjustment action.
    pub cap_step: u32,
    /// Worker threads to spawn; `None` means hardware concurrency.
    pub workers: Option<usize>,
    /// Longest a render pass may run before it commits with fallback rows.
    pub pass_deadline: Duration,
    /// Interval between held-key movement steps.
    pub input_tick: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            initial_center: (-0.75, 0.0),
            initial_scale: 200.0,
            iteration_cap: 2000,
            zoom_factor: 1.5,
            cap_step: 100,
            workers: None,
            pass_deadline: Duration::from_secs(30),
            input_tick: Duration::from_millis(10),
        }
    }
}

impl ExplorerConfig {
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.initial_center, self.initial_scale, self.iteration_cap)
    }
}
