//! Iteration-budget policy: the budget grows with zoom depth but never
//! exceeds the user-configured cap.

/// `min(iteration_cap, floor(50 + scale / 10))`, kept at least 1.
///
/// At the default starting scale of 200 px/unit this yields 70 iterations;
/// deep zooms earn a larger budget until the cap takes over.
pub fn effective_iterations(iteration_cap: u32, scale: f64) -> u32 {
    let budget = (50.0 + scale / 10.0).floor().clamp(1.0, f64::from(u32::MAX));
    iteration_cap.min(budget as u32).max(1)
}
