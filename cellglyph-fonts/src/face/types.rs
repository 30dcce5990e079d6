//! Font data ownership and face-level metrics.

use std::fmt;
use std::sync::Arc;

use swash::FontRef;

use crate::error::{FontError, Result};

/// Owns font bytes and a swash `FontRef` into them.
///
/// The `FontRef` is valid for as long as this struct (or a clone) lives.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Face index within a collection
    pub index: u32,
    /// Swash font reference for metrics and rasterization
    pub font_ref: FontRef<'static>,
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontData {
    /// Parses `data` and selects face `index`.
    ///
    /// Collections (.ttc) hold several faces sharing the same bytes.
    pub fn new(data: Vec<u8>, index: u32) -> Result<Self> {
        let data = Arc::new(data);

        // SAFETY: the slice points into the Arc's heap allocation, which is
        // kept alive by `self.data` for as long as `font_ref` exists. Both are
        // dropped together and the Vec is never mutated.
        let font_ref = unsafe {
            let bytes = data.as_slice();
            let static_bytes: &'static [u8] = std::mem::transmute(bytes);
            FontRef::from_index(static_bytes, index as usize)
        }
        .ok_or_else(|| {
            FontError::backend(
                "load_face",
                format!("no usable face at index {index} in {} bytes of font data", data.len()),
            )
        })?;

        Ok(FontData {
            data,
            index,
            font_ref,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        self.data.as_slice()
    }
}

/// Face-wide metrics in font design units, copied once at load.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct FaceMetrics {
    pub units_per_em: u32,
    pub ascender: i32,
    /// Negative below the baseline.
    pub descender: i32,
    pub height: i32,
    pub max_advance_width: i32,
    pub max_advance_height: i32,
    pub underline_position: i32,
    pub underline_thickness: i32,
    pub is_scalable: bool,
}

impl FaceMetrics {
    pub(crate) fn from_font(font: &FontData, is_scalable: bool) -> Self {
        let m = font.font_ref.metrics(&[]);
        let ascender = m.ascent.round() as i32;
        let descender = -(m.descent.round() as i32);
        let height = (m.ascent + m.descent + m.leading).round() as i32;
        let max_advance_height = if m.has_vertical_metrics {
            (m.vertical_ascent + m.vertical_descent).round() as i32
        } else {
            height
        };
        FaceMetrics {
            units_per_em: u32::from(m.units_per_em),
            ascender,
            descender,
            height,
            max_advance_width: m.max_width.round() as i32,
            max_advance_height,
            underline_position: m.underline_offset.round() as i32,
            underline_thickness: m.stroke_size.round() as i32,
            is_scalable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_data_invalid_bytes() {
        let err = FontData::new(vec![0u8; 100], 0).unwrap_err();
        assert!(matches!(err, FontError::FontBackend { operation: "load_face", .. }));
    }

    #[test]
    fn test_font_data_empty_bytes() {
        assert!(FontData::new(Vec::new(), 0).is_err());
    }
}
