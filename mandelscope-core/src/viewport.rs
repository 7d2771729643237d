use serde::{Deserialize, Serialize};

/// Lowest value the iteration cap can be adjusted down to. Keeps the cap
/// strictly positive no matter how many decrease actions arrive.
pub const MIN_ITERATION_CAP: u32 = 100;

/// Mapping window between screen pixels and the complex plane.
///
/// - `center`: plane coordinates shown at the middle of the frame
/// - `scale`: pixels per plane unit (larger = deeper zoom), always > 0
/// - `iteration_cap`: user-configured ceiling on the iteration budget, always > 0
///
/// A render pass snapshots the whole viewport at dispatch time; in-flight
/// passes never observe later mutations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: (f64, f64),
    pub scale: f64,
    pub iteration_cap: u32,
}

impl Viewport {
    pub fn new(center: (f64, f64), scale: f64, iteration_cap: u32) -> Self {
        debug_assert!(scale > 0.0, "viewport scale must be positive");
        debug_assert!(iteration_cap > 0, "iteration cap must be positive");
        Self {
            center,
            scale,
            iteration_cap,
        }
    }

    /// Constructor for viewports built from untrusted input, such as a
    /// saved-state file. Returns `None` when any field would break the
    /// invariants: non-finite center or scale, non-positive scale, or a
    /// zero iteration cap.
    pub fn try_new(center: (f64, f64), scale: f64, iteration_cap: u32) -> Option<Self> {
        let finite = center.0.is_finite() && center.1.is_finite() && scale.is_finite();
        if finite && scale > 0.0 && iteration_cap > 0 {
            Some(Self {
                center,
                scale,
                iteration_cap,
            })
        } else {
            None
        }
    }

    /// Shift the center by `(dx, dy)` plane units.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center.0 += dx;
        self.center.1 += dy;
    }

    /// Multiply the scale by `factor` (zoom about the frame center).
    pub fn zoom_by(&mut self, factor: f64) {
        debug_assert!(factor > 0.0, "zoom factor must be positive");
        self.scale *= factor;
    }

    pub fn increase_cap(&mut self, step: u32) {
        self.iteration_cap = self.iteration_cap.saturating_add(step);
    }

    /// Decrease the cap by `step`, saturating at [`MIN_ITERATION_CAP`].
    pub fn decrease_cap(&mut self, step: u32) {
        self.iteration_cap = self
            .iteration_cap
            .saturating_sub(step)
            .max(MIN_ITERATION_CAP);
    }
}
