//! A sized font face with its shaper and rasterizer.
//!
//! A `Face` owns the font bytes, a rustybuzz shaper with one reusable work
//! buffer and a swash rasterizer with one reusable bitmap slot. Neither is
//! safe to share between threads; use one face per thread or lock around it.

mod types;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::backend::FaceLease;
use crate::bitmap::{Bitmap, GlyphMetrics};
use crate::compositor::{self, CompositeGlyph};
use crate::error::{FontError, Result};
use crate::hinting::{HintSettings, LoadFlags};
use crate::rasterizer::{Rasterizer, SwashRasterizer};
use crate::shaper::{RustybuzzShaper, ShapedGlyph, Shaper};
use crate::trim;

pub use types::{FaceMetrics, FontData};

/// Character size used until [`Face::set_char_size`] is called: 12pt at 96 dpi.
pub const DEFAULT_CHAR_SIZE: CharSize = CharSize {
    char_width: 12 * 64,
    char_height: 12 * 64,
    xdpi: 96,
    ydpi: 96,
};

/// Character size in 1/64 pt plus the device resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSize {
    pub char_width: i64,
    pub char_height: i64,
    pub xdpi: u32,
    pub ydpi: u32,
}

impl CharSize {
    /// Pixels per em on each axis.
    ///
    /// A zero width or height takes the other's value; a zero dpi means 72.
    pub fn pixels_per_em(&self) -> Result<(f32, f32)> {
        let (w, h) = match (self.char_width, self.char_height) {
            (0, 0) => {
                return Err(FontError::backend("set_char_size", "width and height are both 0"));
            }
            (0, h) => (h, h),
            (w, 0) => (w, w),
            (w, h) => (w, h),
        };
        if w < 0 || h < 0 {
            return Err(FontError::backend(
                "set_char_size",
                format!("negative size {w}x{h}"),
            ));
        }
        let dpi = |d: u32| if d == 0 { 72.0 } else { d as f32 };
        let x_ppem = w as f32 / 64.0 * dpi(self.xdpi) / 72.0;
        let y_ppem = h as f32 / 64.0 * dpi(self.ydpi) / 72.0;
        Ok((x_ppem, y_ppem))
    }
}

pub struct Face {
    path: Option<PathBuf>,
    font: FontData,
    metrics: FaceMetrics,
    hints: HintSettings,
    char_size: CharSize,
    shaper: RustybuzzShaper,
    rasterizer: SwashRasterizer,
    _lease: FaceLease,
}

impl Face {
    pub(crate) fn new(
        font: FontData,
        path: Option<PathBuf>,
        hints: HintSettings,
        lease: FaceLease,
        cache_entries: usize,
    ) -> Self {
        let mut rasterizer = SwashRasterizer::new(font.clone(), cache_entries);
        let metrics = FaceMetrics::from_font(&font, rasterizer.has_outlines());
        let mut face = Face {
            path,
            shaper: RustybuzzShaper::new(font.clone()),
            font,
            metrics,
            hints,
            char_size: DEFAULT_CHAR_SIZE,
            rasterizer,
            _lease: lease,
        };
        // The default size is always valid.
        if let Ok((x, y)) = DEFAULT_CHAR_SIZE.pixels_per_em() {
            face.apply_pixel_size(x, y);
        }
        log::debug!("{}", face);
        face
    }

    fn apply_pixel_size(&mut self, x_ppem: f32, y_ppem: f32) {
        self.shaper.set_pixel_size(x_ppem, y_ppem);
        self.rasterizer.set_pixel_size(y_ppem);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn metrics(&self) -> &FaceMetrics {
        &self.metrics
    }

    pub fn font_data(&self) -> &FontData {
        &self.font
    }

    pub fn hints(&self) -> HintSettings {
        self.hints
    }

    pub fn set_hints(&mut self, hints: HintSettings) {
        self.hints = hints;
    }

    /// Flags used for glyph loads (`render`) and shaping.
    pub fn load_flags(&self, render: bool) -> LoadFlags {
        self.hints.load_flags(render)
    }

    pub fn char_size(&self) -> CharSize {
        self.char_size
    }

    /// Current vertical size in pixels per em.
    pub fn pixel_size(&self) -> f32 {
        self.rasterizer.pixel_size()
    }

    /// Sets the character size in 1/64 pt at the given resolution.
    pub fn set_char_size(
        &mut self,
        char_width: i64,
        char_height: i64,
        xdpi: u32,
        ydpi: u32,
    ) -> Result<()> {
        let size = CharSize {
            char_width,
            char_height,
            xdpi,
            ydpi,
        };
        let (x_ppem, y_ppem) = size.pixels_per_em()?;
        log::debug!("char size set to {:?} ({}x{} ppem)", size, x_ppem, y_ppem);
        self.char_size = size;
        self.apply_pixel_size(x_ppem, y_ppem);
        Ok(())
    }

    /// Glyph index for `ch`, 0 when the face has no glyph for it.
    pub fn char_index(&self, ch: char) -> u32 {
        u32::from(self.font.font_ref.charmap().map(ch))
    }

    /// Renders the glyph for `ch` into the face's bitmap slot.
    pub fn load_char(&mut self, ch: char) -> Result<()> {
        let glyph_id = self.char_index(ch);
        let flags = self.load_flags(true);
        self.rasterizer.load_glyph(glyph_id, flags)?;
        Ok(())
    }

    /// Metrics of the glyph currently in the slot.
    pub fn glyph_metrics(&self) -> Option<GlyphMetrics> {
        self.rasterizer.current().map(|g| g.metrics)
    }

    /// Owned copy of the bitmap currently in the slot.
    pub fn bitmap(&self) -> Option<Bitmap> {
        self.rasterizer.current().map(|g| g.bitmap.to_owned_bitmap())
    }

    pub fn shape(&mut self, text: &str) -> Result<Vec<ShapedGlyph>> {
        let flags = self.load_flags(false);
        self.shaper.shape(text, flags)
    }

    /// Shapes and composites `text` into a single bitmap.
    pub fn draw_complex_glyph(&mut self, text: &str) -> Result<CompositeGlyph> {
        compositor::draw_complex_glyph(&mut self.shaper, &mut self.rasterizer, self.hints, text)
    }

    /// Trims `bitmap` to `cell_width` columns.
    pub fn trim_to_width(&self, bitmap: &Bitmap, cell_width: usize) -> Result<Bitmap> {
        trim::trim_to_width(bitmap, cell_width)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        let path = self
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        write!(
            f,
            "Face(path={}, index={}, is_scalable={}, units_per_EM={}, ascender={}, descender={}, \
             height={}, max_advance_width={}, max_advance_height={}, underline_position={}, \
             underline_thickness={})",
            path,
            self.font.index,
            m.is_scalable,
            m.units_per_em,
            m.ascender,
            m.descender,
            m.height,
            m.max_advance_width,
            m.max_advance_height,
            m.underline_position,
            m.underline_thickness
        )
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Face")
            .field("path", &self.path)
            .field("font", &self.font)
            .field("hints", &self.hints)
            .field("char_size", &self.char_size)
            .finish()
    }
}
