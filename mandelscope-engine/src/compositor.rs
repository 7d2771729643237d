//! Committed frame, affine previews, and overlay drawing.

use crate::framebuffer::FrameBuffer;
use mandelscope_core::{compose_transforms, Transform};

const OVERLAY_RADIUS: i32 = 5;
const OVERLAY_COLOR: [u8; 4] = [255, 0, 0, 128];

/// Holds the last committed frame and produces cheap visual feedback
/// while the authoritative recompute is still in flight.
pub struct Compositor {
    current: FrameBuffer,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            current: FrameBuffer::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    /// Replace the committed frame wholesale. Partial results never land
    /// here; the pool hands over a buffer only once its pass is done.
    pub fn commit(&mut self, frame: FrameBuffer) {
        self.current = frame;
    }

    /// Resample the committed frame to approximate a viewport change of
    /// `dx`/`dy` complex units and a zoom of `factor`, using the screen
    /// scale to convert units to pixels. The preview is stretched or
    /// shifted imagery only; it is replaced when the next pass commits.
    pub fn preview(&mut self, dx: f64, dy: f64, factor: f64, pixels_per_unit: f64) {
        let matrix = compose_transforms([
            Transform::Scale {
                factor,
                center_x: 0.0,
                center_y: 0.0,
            },
            Transform::Translate {
                dx: dx * pixels_per_unit,
                dy: dy * pixels_per_unit,
            },
        ]);
        self.current = self.current.transformed(&matrix);
    }

    /// Drop the committed frame and start blank at the new size. Stale
    /// imagery at a mismatched size is worse than a flash of background.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.current = FrameBuffer::new(width, height);
    }

    /// Copy the committed frame into a raw RGBA output slice, optionally
    /// blending the center marker on top.
    pub fn render_into(&self, out: &mut [u8], overlay_visible: bool) {
        let bytes = self.current.as_bytes();
        debug_assert_eq!(out.len(), bytes.len());
        out.copy_from_slice(bytes);
        if overlay_visible {
            self.draw_center_dot(out);
        }
    }

    fn draw_center_dot(&self, out: &mut [u8]) {
        let (w, h) = (self.current.width() as i32, self.current.height() as i32);
        let (cx, cy) = (w / 2, h / 2);
        for oy in -OVERLAY_RADIUS..=OVERLAY_RADIUS {
            for ox in -OVERLAY_RADIUS..=OVERLAY_RADIUS {
                if ox * ox + oy * oy > OVERLAY_RADIUS * OVERLAY_RADIUS {
                    continue;
                }
                let (x, y) = (cx + ox, cy + oy);
                if x < 0 || y < 0 || x >= w || y >= h {
                    continue;
                }
                let idx = 4 * (y as usize * w as usize + x as usize);
                blend_over(&mut out[idx..idx + 4], OVERLAY_COLOR);
            }
        }
    }
}

/// Source-over blend of a straight-alpha RGBA color onto an opaque pixel.
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    let a = u32::from(src[3]);
    for c in 0..3 {
        let s = u32::from(src[c]);
        let d = u32::from(dst[c]);
        dst[c] = ((s * a + d * (255 - a)) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelscope_core::INTERIOR_COLOR;

    fn solid_frame(width: u32, height: u32, color: [u8; 4]) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for y in 0..height {
            fb.write_row(y, &vec![color; width as usize]);
        }
        fb
    }

    #[test]
    fn commit_replaces_the_whole_frame() {
        let mut comp = Compositor::new(4, 4);
        comp.commit(solid_frame(4, 4, [10, 20, 30, 255]));
        let mut out = vec![0u8; 4 * 4 * 4];
        comp.render_into(&mut out, false);
        assert_eq!(&out[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn overlay_tints_the_center_pixel_only_when_visible() {
        let mut comp = Compositor::new(32, 32);
        comp.commit(solid_frame(32, 32, [0, 0, 0, 255]));
        let mut out = vec![0u8; 32 * 32 * 4];

        comp.render_into(&mut out, false);
        let center = 4 * (16 * 32 + 16);
        assert_eq!(&out[center..center + 4], &[0, 0, 0, 255]);

        comp.render_into(&mut out, true);
        assert_eq!(out[center], 128);
        assert_eq!(out[center + 1], 0);
    }

    #[test]
    fn overlay_leaves_corners_untouched() {
        let mut comp = Compositor::new(32, 32);
        comp.commit(solid_frame(32, 32, [7, 7, 7, 255]));
        let mut out = vec![0u8; 32 * 32 * 4];
        comp.render_into(&mut out, true);
        assert_eq!(&out[..4], &[7, 7, 7, 255]);
    }

    #[test]
    fn identity_preview_keeps_the_image() {
        let mut comp = Compositor::new(8, 8);
        comp.commit(solid_frame(8, 8, [50, 60, 70, 255]));
        comp.preview(0.0, 0.0, 1.0, 200.0);
        let mut out = vec![0u8; 8 * 8 * 4];
        comp.render_into(&mut out, false);
        assert!(out.chunks(4).all(|px| px == [50, 60, 70, 255]));
    }

    #[test]
    fn pan_preview_shifts_pixels_by_whole_units() {
        let mut comp = Compositor::new(8, 8);
        let mut fb = FrameBuffer::new(8, 8);
        fb.set_pixel(2, 3, [200, 0, 0, 255]);
        comp.commit(fb);
        // 1 complex unit at 2 px/unit shifts the image right by 2 px
        comp.preview(1.0, 0.0, 1.0, 2.0);
        let mut out = vec![0u8; 8 * 8 * 4];
        comp.render_into(&mut out, false);
        let idx = 4 * (3 * 8 + 4);
        assert_eq!(&out[idx..idx + 4], &[200, 0, 0, 255]);
    }

    #[test]
    fn resize_clears_to_interior_color() {
        let mut comp = Compositor::new(4, 4);
        comp.commit(solid_frame(4, 4, [255, 255, 255, 255]));
        comp.resize(6, 2);
        assert_eq!((comp.width(), comp.height()), (6, 2));
        let mut out = vec![0u8; 6 * 2 * 4];
        comp.render_into(&mut out, false);
        assert!(out.chunks(4).all(|px| px == INTERIOR_COLOR));
    }
}
