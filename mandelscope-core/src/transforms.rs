//! 2D affine transforms in pixel space, used by the compositor to
//! approximate pan/zoom on the cached raster while a recompute is in
//! flight.

/// A 2D affine transformation in pixel/canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Translate by (dx, dy) pixels. Positive dx moves right, positive dy
    /// moves down.
    Translate { dx: f64, dy: f64 },
    /// Scale by `factor` around `(center_x, center_y)`; the center point
    /// stays fixed. Factor < 1 zooms out, > 1 zooms in.
    Scale {
        factor: f64,
        center_x: f64,
        center_y: f64,
    },
}

/// A 3x3 homogeneous matrix for 2D affine transformations, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub data: [[f64; 3]; 3],
}

impl Mat3 {
    pub fn identity() -> Self {
        Self {
            data: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            data: [[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]],
        }
    }

    /// Scale around `(cx, cy)`: translate(-cx,-cy) → scale → translate(cx,cy)
    /// collapsed into one matrix.
    pub fn scale_around(factor: f64, cx: f64, cy: f64) -> Self {
        Self {
            data: [
                [factor, 0.0, cx * (1.0 - factor)],
                [0.0, factor, cy * (1.0 - factor)],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// self × other. To compose transforms [T1, T2] so T1 applies first,
    /// compute T2 × T1.
    pub fn multiply(&self, other: &Mat3) -> Self {
        let mut result = [[0.0; 3]; 3];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.data[i][0] * other.data[0][j]
                    + self.data[i][1] * other.data[1][j]
                    + self.data[i][2] * other.data[2][j];
            }
        }
        Self { data: result }
    }

    /// Transform a point.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.data[0][0] * x + self.data[0][1] * y + self.data[0][2],
            self.data[1][0] * x + self.data[1][1] * y + self.data[1][2],
        )
    }

    /// Inverse of the affine part. `None` when the matrix is singular
    /// (degenerate scale), in which case there is nothing sensible to
    /// resample.
    pub fn inverse(&self) -> Option<Mat3> {
        let [[a, b, tx], [c, d, ty], _] = self.data;
        let det = a * d - b * c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        Some(Self {
            data: [
                [d / det, -b / det, (b * ty - d * tx) / det],
                [-c / det, a / det, (c * tx - a * ty) / det],
                [0.0, 0.0, 1.0],
            ],
        })
    }
}

/// Compose a sequence of transforms into one matrix; the first element of
/// the sequence is applied first to any point the result transforms.
pub fn compose_transforms(transforms: impl IntoIterator<Item = Transform>) -> Mat3 {
    let mut result = Mat3::identity();
    for transform in transforms {
        let matrix = match transform {
            Transform::Translate { dx, dy } => Mat3::translation(dx, dy),
            Transform::Scale {
                factor,
                center_x,
                center_y,
            } => Mat3::scale_around(factor, center_x, center_y),
        };
        result = matrix.multiply(&result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn identity_leaves_points_alone() {
        assert_close(Mat3::identity().apply(12.5, -3.0), (12.5, -3.0));
    }

    #[test]
    fn translation_moves_origin() {
        assert_close(Mat3::translation(200.0, 100.0).apply(0.0, 0.0), (200.0, 100.0));
    }

    #[test]
    fn scale_around_point_keeps_center_fixed() {
        let s = Mat3::scale_around(0.5, 200.0, 0.0);
        assert_close(s.apply(200.0, 0.0), (200.0, 0.0));
        // Point at the origin moves halfway toward the center
        assert_close(s.apply(0.0, 0.0), (100.0, 0.0));
    }

    #[test]
    fn compose_translate_then_scale() {
        // translate(200, 0), then scale 0.5 around (200, 0): the origin
        // lands on the scale center and stays there
        let m = compose_transforms([
            Transform::Translate { dx: 200.0, dy: 0.0 },
            Transform::Scale {
                factor: 0.5,
                center_x: 200.0,
                center_y: 0.0,
            },
        ]);
        assert_close(m.apply(0.0, 0.0), (200.0, 0.0));
    }

    #[test]
    fn compose_empty_sequence_is_identity() {
        assert_eq!(compose_transforms([]).data, Mat3::identity().data);
    }

    #[test]
    fn inverse_round_trips_points() {
        let m = compose_transforms([
            Transform::Scale {
                factor: 1.5,
                center_x: 0.0,
                center_y: 0.0,
            },
            Transform::Translate { dx: -37.0, dy: 12.0 },
        ]);
        let inv = m.inverse().unwrap();
        for (x, y) in [(0.0, 0.0), (100.0, 50.0), (-3.0, 7.5)] {
            let (fx, fy) = m.apply(x, y);
            assert_close(inv.apply(fx, fy), (x, y));
        }
    }

    #[test]
    fn inverse_of_degenerate_scale_is_none() {
        assert!(Mat3::scale_around(0.0, 10.0, 10.0).inverse().is_none());
    }
}
