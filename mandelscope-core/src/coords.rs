//! Pixel-space ↔ plane-space mapping.
//!
//! This is the only place the two coordinate spaces are related; everything
//! else (kernel, dispatcher, compositor) goes through these two functions
//! rather than re-deriving the formula.

use crate::Viewport;

/// Map a pixel position to the complex-plane point it samples.
///
/// The frame center pixel `(width/2, height/2)` maps to `viewport.center`;
/// one plane unit spans `viewport.scale` pixels in both axes.
pub fn pixel_to_complex(
    px: f64,
    py: f64,
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> (f64, f64) {
    let cx = viewport.center.0 + (px - width as f64 / 2.0) / viewport.scale;
    let cy = viewport.center.1 + (py - height as f64 / 2.0) / viewport.scale;
    (cx, cy)
}

/// Inverse of [`pixel_to_complex`].
pub fn complex_to_pixel(
    cx: f64,
    cy: f64,
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> (f64, f64) {
    let px = (cx - viewport.center.0) * viewport.scale + width as f64 / 2.0;
    let py = (cy - viewport.center.1) * viewport.scale + height as f64 / 2.0;
    (px, py)
}
