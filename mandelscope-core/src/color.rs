//! Smooth escape-time coloring: fractional iteration value → hue cycle →
//! HSL → RGBA.

/// One RGBA pixel, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Color for points that never escape (and the fallback for rows a stalled
/// worker failed to deliver).
pub const INTERIOR_COLOR: Rgba = [0, 0, 0, 255];

/// Map an escape count to an RGBA pixel.
///
/// Non-escaping points (`count == max_iterations`) are opaque black.
/// Escaping points get a smoothed iteration value
/// `count + 1 - ln(log₂(count))`, which is undefined for `count ≤ 1`; the
/// count is clamped to 2 inside the formula so very fast escapes share one
/// color instead of producing NaN. The hue is reduced into `[0, 360)` by
/// euclidean modulo before conversion.
pub fn color_for(count: u32, max_iterations: u32) -> Rgba {
    if max_iterations == 0 || count >= max_iterations {
        return INTERIOR_COLOR;
    }

    let n = f64::from(count.max(2));
    let smooth = n + 1.0 - n.log2().ln();
    let hue = (360.0 * smooth / f64::from(max_iterations)).rem_euclid(360.0);

    let (r, g, b) = hsl_to_rgb(hue / 360.0, 1.0, 0.5);
    // Channels truncate to [0, 255], matching floor semantics
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, 255]
}

/// Standard HSL → RGB conversion. All inputs and outputs in `[0, 1]`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_is_black_for_any_cap() {
        for max in [1, 70, 2000, u32::MAX] {
            assert_eq!(color_for(max, max), [0, 0, 0, 255]);
        }
    }

    #[test]
    fn zero_max_iterations_is_black() {
        assert_eq!(color_for(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn low_counts_share_the_clamped_color() {
        // counts 0, 1, 2 all evaluate the formula at the clamp value
        let c2 = color_for(2, 1000);
        assert_eq!(color_for(0, 1000), c2);
        assert_eq!(color_for(1, 1000), c2);
    }

    #[test]
    fn escaped_pixels_are_opaque_and_not_black() {
        for count in [0, 5, 50, 500, 999] {
            let [r, g, b, a] = color_for(count, 1000);
            assert_eq!(a, 255);
            assert!(
                u32::from(r) + u32::from(g) + u32::from(b) > 0,
                "count {count} produced black"
            );
        }
    }

    #[test]
    fn nearby_counts_change_color_gradually() {
        let a = color_for(100, 1000);
        let b = color_for(101, 1000);
        let dist: i32 = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (i32::from(*x) - i32::from(*y)).abs())
            .sum();
        assert!(dist < 40, "adjacent counts jumped by {dist}");
    }

    #[test]
    fn hsl_primaries() {
        // Full saturation, mid lightness: hue 0 = red, 1/3 = green, 2/3 = blue
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (1.0, 0.0, 0.0));
        let (r, g, b) = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
        assert!(r.abs() < 1e-9 && (g - 1.0).abs() < 1e-9 && b.abs() < 1e-9);
        let (r, g, b) = hsl_to_rgb(2.0 / 3.0, 1.0, 0.5);
        assert!(r.abs() < 1e-9 && g.abs() < 1e-9 && (b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hsl_achromatic_is_gray() {
        assert_eq!(hsl_to_rgb(0.42, 0.0, 0.25), (0.25, 0.25, 0.25));
    }

    #[test]
    fn hue_wraps_instead_of_going_out_of_range() {
        // Large smooth values push the raw hue past 360; output channels
        // must still be finite, valid colors
        for count in 2..100 {
            let [r, g, b, a] = color_for(count, 50_000);
            assert_eq!(a, 255);
            let _ = (r, g, b);
        }
    }
}
