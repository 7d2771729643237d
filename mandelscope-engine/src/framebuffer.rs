use mandelscope_core::{Mat3, Rgba, INTERIOR_COLOR};

/// A width × height grid of RGBA pixels, stored as flat bytes so it can be
/// handed to a presentation surface without conversion.
///
/// New buffers start out filled with the interior color, which doubles as
/// the fallback for rows a stalled worker never delivered.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut bytes = vec![0; width as usize * height as usize * 4];
        for px in bytes.chunks_exact_mut(4) {
            px.copy_from_slice(&INTERIOR_COLOR);
        }
        Self {
            width,
            height,
            bytes,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat RGBA bytes, row-major, 4 bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.offset(x, y);
        [
            self.bytes[i],
            self.bytes[i + 1],
            self.bytes[i + 2],
            self.bytes[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: Rgba) {
        let i = self.offset(x, y);
        self.bytes[i..i + 4].copy_from_slice(&rgba);
    }

    /// Copy one computed row into place. Rows outside the buffer or with
    /// the wrong width are ignored; they can only come from a pass
    /// dispatched at different dimensions.
    pub fn write_row(&mut self, row: u32, pixels: &[Rgba]) {
        if row >= self.height || pixels.len() != self.width as usize {
            return;
        }
        let start = self.offset(0, row);
        for (px, chunk) in pixels
            .iter()
            .zip(self.bytes[start..start + self.width as usize * 4].chunks_exact_mut(4))
        {
            chunk.copy_from_slice(px);
        }
    }

    /// Resample this buffer through an affine pixel transform: each
    /// destination pixel is looked up at the inverse-mapped source
    /// position, nearest neighbour. Pixels mapping outside the source
    /// stay at the interior color. A singular matrix yields a blank frame.
    pub fn transformed(&self, matrix: &Mat3) -> FrameBuffer {
        let mut out = FrameBuffer::new(self.width, self.height);
        let Some(inverse) = matrix.inverse() else {
            return out;
        };

        for y in 0..self.height {
            for x in 0..self.width {
                let (sx, sy) = inverse.apply(f64::from(x), f64::from(y));
                let (sx, sy) = (sx.round(), sy.round());
                if sx >= 0.0
                    && sy >= 0.0
                    && (sx as u32) < self.width
                    && (sy as u32) < self.height
                {
                    out.set_pixel(x, y, self.pixel(sx as u32, sy as u32));
                }
            }
        }
        out
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }
}
