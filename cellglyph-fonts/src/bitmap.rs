//! Bitmap and glyph metric types shared by the rasterizer, compositor and trimmer.

use serde::{Deserialize, Serialize};

use crate::error::{FontError, Result};

/// Threshold above which a pixel counts as inked when trimming.
pub const TEXT_INTENSITY_THRESHOLD: u8 = 200;

/// Number of gray levels in an 8-bit grayscale bitmap.
pub const GRAY_LEVELS: u16 = 256;

/// Pixel layout of a rendered bitmap.
///
/// Discriminants follow the conventional rasterizer numbering so the value
/// can travel over the wire as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum PixelMode {
    #[default]
    None = 0,
    /// 1 bit per pixel.
    Mono = 1,
    /// Single 8-bit intensity channel. The only mode this crate composites.
    Gray = 2,
    Gray2 = 3,
    Gray4 = 4,
    /// Horizontal subpixel coverage.
    Lcd = 5,
    /// Vertical subpixel coverage.
    LcdV = 6,
    /// 32-bit color.
    Bgra = 7,
}

impl PixelMode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Metrics of one rasterized glyph, in 26.6 fixed-point pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub width: i64,
    pub height: i64,
    pub hori_bearing_x: i64,
    pub hori_bearing_y: i64,
    pub hori_advance: i64,
    pub vert_bearing_x: i64,
    pub vert_bearing_y: i64,
    pub vert_advance: i64,
}

/// A borrowed view of the rasterizer's current bitmap slot.
///
/// Valid only until the next glyph is loaded on the same rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct GlyphBitmap<'a> {
    pub width: usize,
    pub rows: usize,
    /// Bytes per row, `>= width`.
    pub pitch: usize,
    pub pixel_mode: PixelMode,
    pub buffer: &'a [u8],
}

impl<'a> GlyphBitmap<'a> {
    /// Returns source row `y`, or `None` when the buffer is shorter than the
    /// advertised geometry.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        let start = y.checked_mul(self.pitch)?;
        self.buffer.get(start..start.checked_add(self.pitch)?)
    }

    /// Copies the slot into an owned [`Bitmap`].
    pub fn to_owned_bitmap(&self) -> Bitmap {
        let len = self.rows.saturating_mul(self.pitch).min(self.buffer.len());
        Bitmap {
            rows: self.rows,
            width: self.width,
            pitch: self.pitch,
            buffer: self.buffer[..len].to_vec(),
            num_grays: if self.pixel_mode == PixelMode::Gray {
                GRAY_LEVELS
            } else {
                0
            },
            pixel_mode: self.pixel_mode,
            palette_mode: 0,
        }
    }
}

/// A rasterized glyph: the slot's bitmap plus its metrics.
#[derive(Debug, Clone, Copy)]
pub struct RasterizedGlyph<'a> {
    pub bitmap: GlyphBitmap<'a>,
    pub metrics: GlyphMetrics,
}

/// Owned bitmap, the input and output of trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitmap {
    pub rows: usize,
    pub width: usize,
    pub pitch: usize,
    pub buffer: Vec<u8>,
    pub num_grays: u16,
    pub pixel_mode: PixelMode,
    pub palette_mode: u8,
}

impl Bitmap {
    /// Builds a grayscale bitmap with `pitch == width`.
    pub fn gray(width: usize, rows: usize, buffer: Vec<u8>) -> Self {
        Bitmap {
            rows,
            width,
            pitch: width,
            buffer,
            num_grays: GRAY_LEVELS,
            pixel_mode: PixelMode::Gray,
            palette_mode: 0,
        }
    }

    /// Checks the geometry against the buffer and the pixel mode.
    pub fn validate(&self) -> Result<()> {
        if self.pixel_mode != PixelMode::Gray {
            return Err(FontError::InvalidBitmap(format!(
                "pixel mode {:?} is not 8-bit grayscale",
                self.pixel_mode
            )));
        }
        if self.pitch < self.width {
            return Err(FontError::InvalidBitmap(format!(
                "pitch {} is smaller than width {}",
                self.pitch, self.width
            )));
        }
        let needed = self.rows.checked_mul(self.pitch).ok_or_else(|| {
            FontError::InvalidBitmap(format!("{} rows of {} bytes overflow", self.rows, self.pitch))
        })?;
        if self.buffer.len() < needed {
            return Err(FontError::InvalidBitmap(format!(
                "buffer holds {} bytes, expected {}",
                self.buffer.len(),
                needed
            )));
        }
        Ok(())
    }

    /// Pixel at column `x`, row `y`, or `None` outside the bitmap or buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.rows {
            return None;
        }
        let index = y.checked_mul(self.pitch)?.checked_add(x)?;
        self.buffer.get(index).copied()
    }

    /// Unchecked variant of [`Bitmap::get`] for bitmaps that passed `validate`.
    pub(crate) fn pixel(&self, x: usize, y: usize) -> u8 {
        self.buffer[y * self.pitch + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_bitmap_row_bounds() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let bitmap = GlyphBitmap {
            width: 2,
            rows: 2,
            pitch: 3,
            pixel_mode: PixelMode::Gray,
            buffer: &data,
        };
        assert_eq!(bitmap.row(0), Some(&data[0..3]));
        assert_eq!(bitmap.row(1), Some(&data[3..6]));
        assert_eq!(bitmap.row(2), None);
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        let bitmap = Bitmap::gray(4, 2, vec![0; 7]);
        assert!(matches!(bitmap.validate(), Err(FontError::InvalidBitmap(_))));
    }

    #[test]
    fn test_validate_rejects_color() {
        let mut bitmap = Bitmap::gray(1, 1, vec![0]);
        bitmap.pixel_mode = PixelMode::Bgra;
        assert!(bitmap.validate().is_err());
    }

    #[test]
    fn test_get_is_bounds_checked() {
        let bitmap = Bitmap {
            pitch: 3,
            ..Bitmap::gray(2, 2, vec![1, 2, 9, 3, 4])
        };
        assert_eq!(bitmap.get(1, 0), Some(2));
        assert_eq!(bitmap.get(0, 1), Some(3));
        // Padding column and rows past the end
        assert_eq!(bitmap.get(2, 0), None);
        assert_eq!(bitmap.get(0, 2), None);
        // Short buffer: row 1 column 1 would be index 4, row 1 is truncated
        let short = Bitmap {
            buffer: vec![1, 2, 9, 3],
            ..bitmap
        };
        assert_eq!(short.get(1, 1), None);
    }

    #[test]
    fn test_pixel_mode_wire_values() {
        assert_eq!(PixelMode::Gray.as_u8(), 2);
        assert_eq!(PixelMode::Bgra.as_u8(), 7);
    }
}
