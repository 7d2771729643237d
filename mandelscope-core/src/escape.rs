/// Outcome of the escape-time iteration for one plane point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapePoint {
    /// Index of the first iterate with `|z|² > 4`, or `max_iterations` if
    /// the orbit stayed bounded.
    pub count: u32,
    pub escaped: bool,
}

/// Escape-time kernel for the quadratic map `z ← z² + c` from `z₀ = 0`.
///
/// The bound is tested before each update, starting from `z₁ = c`, so a
/// point with `|c|² > 4` escapes with `count == 0`. Pure f64 arithmetic,
/// no shared state; safe to call from any number of threads.
pub fn escape_iterations(cx: f64, cy: f64, max_iterations: u32) -> EscapePoint {
    let mut zx = cx;
    let mut zy = cy;

    for i in 0..max_iterations {
        let zx_sq = zx * zx;
        let zy_sq = zy * zy;
        if zx_sq + zy_sq > 4.0 {
            return EscapePoint {
                count: i,
                escaped: true,
            };
        }
        let new_zx = zx_sq - zy_sq + cx;
        zy = 2.0 * zx * zy + cy;
        zx = new_zx;
    }

    EscapePoint {
        count: max_iterations,
        escaped: false,
    }
}
