//! Growable 8-bit compositing canvas.

use crate::error::{FontError, Result};

/// Saturating subtraction: `a - b`, or 0 when `b > a`.
#[inline]
pub fn sat_sub(a: usize, b: usize) -> usize {
    a.saturating_sub(b)
}

/// A point on a bitmap or canvas, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitmapPoint {
    pub x: usize,
    pub y: usize,
}

/// Row-major, one byte per pixel. Never shrinks while in use.
#[derive(Debug, Default)]
pub struct Canvas {
    width: usize,
    height: usize,
    buf: Vec<u8>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Grows the canvas to at least `width x height`.
    ///
    /// Existing content keeps its position in the top-left corner and the new
    /// area is zero-filled. On allocation failure the canvas is released and
    /// left empty.
    pub fn ensure_capacity(&mut self, width: usize, height: usize) -> Result<()> {
        if self.width >= width && self.height >= height {
            return Ok(());
        }
        let width = width.max(self.width);
        let height = height.max(self.height);
        let Some(len) = width.checked_mul(height) else {
            self.release();
            return Err(FontError::AllocationFailure {
                operation: "ensure_capacity",
                bytes: usize::MAX,
            });
        };

        let mut grown = Vec::new();
        if grown.try_reserve_exact(len).is_err() {
            self.release();
            return Err(FontError::AllocationFailure {
                operation: "ensure_capacity",
                bytes: len,
            });
        }
        grown.resize(len, 0);

        if self.width > 0 {
            for (old_row, new_row) in self
                .buf
                .chunks_exact(self.width)
                .zip(grown.chunks_exact_mut(width))
            {
                new_row[..self.width].copy_from_slice(old_row);
            }
        }
        log::trace!(
            "canvas grown from {}x{} to {}x{}",
            self.width,
            self.height,
            width,
            height
        );

        self.buf = grown;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Copies `bitmap` rows into the canvas.
    ///
    /// Starts at `src` in the bitmap and `dest` on the canvas; each row copy
    /// is clipped to both the canvas width and the source pitch, and rows
    /// stop at whichever of the two runs out first. Existing pixels are
    /// overwritten.
    pub fn blit(
        &mut self,
        bitmap: &crate::bitmap::GlyphBitmap<'_>,
        src: BitmapPoint,
        dest: BitmapPoint,
    ) {
        let copy_width = sat_sub(self.width, dest.x).min(sat_sub(bitmap.pitch, src.x));
        if copy_width == 0 {
            return;
        }

        let mut sy = src.y;
        let mut dy = dest.y;
        while sy < bitmap.rows && dy < self.height {
            let Some(row) = bitmap.row(sy) else { break };
            let from = &row[src.x..src.x + copy_width];
            let start = dy * self.width + dest.x;
            self.buf[start..start + copy_width].copy_from_slice(from);
            sy += 1;
            dy += 1;
        }
    }

    /// Frees the buffer and resets the dimensions.
    pub fn release(&mut self) {
        self.buf = Vec::new();
        self.width = 0;
        self.height = 0;
    }

    /// Consumes the canvas, returning its pixels and dimensions.
    pub fn into_parts(self) -> (Vec<u8>, usize, usize) {
        (self.buf, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{GlyphBitmap, PixelMode};

    fn gray(width: usize, rows: usize, data: &[u8]) -> GlyphBitmap<'_> {
        GlyphBitmap {
            width,
            rows,
            pitch: width,
            pixel_mode: PixelMode::Gray,
            buffer: data,
        }
    }

    #[test]
    fn test_sat_sub() {
        assert_eq!(sat_sub(5, 3), 2);
        assert_eq!(sat_sub(3, 5), 0);
        assert_eq!(sat_sub(0, 0), 0);
    }

    #[test]
    fn test_growth_preserves_content_and_zero_fills() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(2, 2).unwrap();
        let data = [1, 2, 3, 4];
        canvas.blit(&gray(2, 2, &data), BitmapPoint::default(), BitmapPoint::default());

        canvas.ensure_capacity(4, 3).unwrap();
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        #[rustfmt::skip]
        let expected = [
            1, 2, 0, 0,
            3, 4, 0, 0,
            0, 0, 0, 0,
        ];
        assert_eq!(canvas.as_bytes(), &expected);
    }

    #[test]
    fn test_growth_never_shrinks() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(5, 4).unwrap();
        canvas.ensure_capacity(2, 2).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (5, 4));
    }

    #[test]
    fn test_taller_but_narrower_request_keeps_width() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(5, 2).unwrap();
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        canvas.blit(&gray(5, 2, &data), BitmapPoint::default(), BitmapPoint::default());

        canvas.ensure_capacity(3, 3).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (5, 3));
        #[rustfmt::skip]
        let expected = [
            1, 2, 3, 4, 5,
            6, 7, 8, 9, 10,
            0, 0, 0, 0, 0,
        ];
        assert_eq!(canvas.as_bytes(), &expected);
    }

    #[test]
    fn test_wider_but_shorter_request_keeps_height() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(2, 3).unwrap();
        let data = [1, 2, 3, 4, 5, 6];
        canvas.blit(&gray(2, 3, &data), BitmapPoint::default(), BitmapPoint::default());

        canvas.ensure_capacity(3, 1).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (3, 3));
        assert_eq!(canvas.as_bytes(), &[1, 2, 0, 3, 4, 0, 5, 6, 0]);
    }

    #[test]
    fn test_overflowing_request_releases_canvas() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(3, 3).unwrap();
        let err = canvas.ensure_capacity(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, FontError::AllocationFailure { .. }));
        assert!(canvas.is_empty());
        assert_eq!((canvas.width(), canvas.height()), (0, 0));
    }

    #[test]
    fn test_blit_clips_to_canvas() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(3, 2).unwrap();
        let data = [9, 8, 7, 6, 5, 4];
        canvas.blit(
            &gray(3, 2, &data),
            BitmapPoint::default(),
            BitmapPoint { x: 1, y: 1 },
        );
        assert_eq!(canvas.as_bytes(), &[0, 0, 0, 0, 9, 8]);
    }

    #[test]
    fn test_blit_honors_source_offset() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(3, 1).unwrap();
        let data = [1, 2, 3, 4, 5, 6];
        canvas.blit(
            &gray(3, 2, &data),
            BitmapPoint { x: 1, y: 1 },
            BitmapPoint::default(),
        );
        assert_eq!(canvas.as_bytes(), &[5, 6, 0]);
    }

    #[test]
    fn test_blit_overwrites_without_blending() {
        let mut canvas = Canvas::new();
        canvas.ensure_capacity(2, 1).unwrap();
        canvas.blit(&gray(2, 1, &[200, 200]), BitmapPoint::default(), BitmapPoint::default());
        canvas.blit(&gray(1, 1, &[10]), BitmapPoint::default(), BitmapPoint { x: 1, y: 0 });
        assert_eq!(canvas.as_bytes(), &[200, 10]);
    }
}
