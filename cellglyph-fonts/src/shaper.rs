//! Text shaping using HarfBuzz via rustybuzz
//!
//! The shaper turns UTF-8 text into an ordered sequence of [`ShapedGlyph`]
//! records positioned in 26.6 fixed-point pixel units. The sequence may be
//! shorter or longer than the input's codepoint count (ligatures,
//! decompositions).

use rustybuzz::UnicodeBuffer;
use serde::{Deserialize, Serialize};

use crate::error::{FontError, Result};
use crate::face::FontData;
use crate::hinting::LoadFlags;

/// Glyph id reserved for "no glyph available".
pub const NOTDEF: u32 = 0;

/// One shaped glyph with positioning deltas relative to the pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedGlyph {
    /// Glyph ID from the font (0 = notdef)
    pub glyph_id: u32,

    /// Index of the source cluster this glyph came from
    pub cluster: u32,

    /// Horizontal offset from the pen, 1/64 px
    pub x_offset: i32,

    /// Vertical offset from the baseline, 1/64 px (positive raises)
    pub y_offset: i32,

    /// Horizontal advance, 1/64 px
    pub x_advance: i32,

    /// Vertical advance, 1/64 px (usually 0 for horizontal text)
    pub y_advance: i32,
}

impl ShapedGlyph {
    pub fn is_notdef(&self) -> bool {
        self.glyph_id == NOTDEF
    }
}

/// Turns text into shaped glyph records.
pub trait Shaper {
    /// Shapes `text`. Deterministic for a fixed text, face, size and flags.
    fn shape(&mut self, text: &str, flags: LoadFlags) -> Result<Vec<ShapedGlyph>>;
}

/// Shaper over a single face, reusing one work buffer between calls.
pub struct RustybuzzShaper {
    font: FontData,
    buffer: Option<UnicodeBuffer>,
    x_ppem: f32,
    y_ppem: f32,
}

impl RustybuzzShaper {
    pub fn new(font: FontData) -> Self {
        Self {
            font,
            buffer: Some(UnicodeBuffer::new()),
            x_ppem: 0.0,
            y_ppem: 0.0,
        }
    }

    /// Sets the pixel size used to scale design units into 26.6 pixels.
    pub fn set_pixel_size(&mut self, x_ppem: f32, y_ppem: f32) {
        self.x_ppem = x_ppem;
        self.y_ppem = y_ppem;
    }
}

/// Converts design units to 26.6 pixels.
fn to_26_6(units: i32, ppem: f32, units_per_em: f32) -> i32 {
    if units_per_em <= 0.0 {
        return 0;
    }
    (units as f32 * ppem * 64.0 / units_per_em).round() as i32
}

impl Shaper for RustybuzzShaper {
    fn shape(&mut self, text: &str, flags: LoadFlags) -> Result<Vec<ShapedGlyph>> {
        let face = rustybuzz::Face::from_slice(self.font.bytes(), self.font.index).ok_or_else(
            || FontError::backend("shape", format!("cannot parse face {}", self.font.index)),
        )?;
        let units_per_em = face.units_per_em() as f32;

        let mut buffer = self.buffer.take().unwrap_or_else(UnicodeBuffer::new);
        buffer.clear();
        buffer.push_str(text);
        buffer.guess_segment_properties();

        log::trace!(
            "shaping {:?} at {}x{} ppem (hinted: {})",
            text,
            self.x_ppem,
            self.y_ppem,
            flags.is_hinted()
        );
        let output = rustybuzz::shape(&face, &[], buffer);

        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id,
                cluster: info.cluster,
                x_offset: to_26_6(pos.x_offset, self.x_ppem, units_per_em),
                y_offset: to_26_6(pos.y_offset, self.y_ppem, units_per_em),
                x_advance: to_26_6(pos.x_advance, self.x_ppem, units_per_em),
                y_advance: to_26_6(pos.y_advance, self.y_ppem, units_per_em),
            })
            .collect();

        self.buffer = Some(output.clear());
        Ok(glyphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_26_6_scaling() {
        // 1000 upem at 16 ppem: 500 units = 8 px = 512 in 26.6
        assert_eq!(to_26_6(500, 16.0, 1000.0), 512);
        assert_eq!(to_26_6(-250, 16.0, 1000.0), -256);
        assert_eq!(to_26_6(500, 16.0, 0.0), 0);
    }

    #[test]
    fn test_notdef() {
        let glyph = ShapedGlyph {
            glyph_id: NOTDEF,
            cluster: 0,
            x_offset: 0,
            y_offset: 0,
            x_advance: 640,
            y_advance: 0,
        };
        assert!(glyph.is_notdef());
    }
}
