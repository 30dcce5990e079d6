//! Glyph rasterization into a single reusable bitmap slot.

use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;

use crate::bitmap::{GlyphBitmap, GlyphMetrics, PixelMode, RasterizedGlyph};
use crate::error::{FontError, Result};
use crate::face::FontData;
use crate::hinting::LoadFlags;

/// Renders glyphs one at a time into an internal slot.
///
/// Not re-entrant: the returned borrow ends when the next glyph is loaded,
/// so callers copy what they need before loading again.
pub trait Rasterizer {
    fn load_glyph(&mut self, glyph_id: u32, flags: LoadFlags) -> Result<RasterizedGlyph<'_>>;
}

// Color bitmaps stay in the list so color-only fonts surface as an
// unsupported pixel mode instead of an empty bitmap.
const SOURCES: &[Source] = &[
    Source::Outline,
    Source::Bitmap(StrikeWith::BestFit),
    Source::ColorBitmap(StrikeWith::BestFit),
];

/// swash-backed rasterizer bound to one face.
pub struct SwashRasterizer {
    font: FontData,
    context: ScaleContext,
    slot: Image,
    metrics: GlyphMetrics,
    loaded: bool,
    ppem: f32,
}

impl SwashRasterizer {
    pub fn new(font: FontData, cache_entries: usize) -> Self {
        Self {
            font,
            context: ScaleContext::with_max_entries(cache_entries),
            slot: Image::new(),
            metrics: GlyphMetrics::default(),
            loaded: false,
            ppem: 0.0,
        }
    }

    pub fn set_pixel_size(&mut self, ppem: f32) {
        self.ppem = ppem;
    }

    pub fn pixel_size(&self) -> f32 {
        self.ppem
    }

    /// True when the face has scalable outlines.
    pub fn has_outlines(&mut self) -> bool {
        self.context.builder(self.font.font_ref).build().has_outlines()
    }

    /// The slot's current contents, if any glyph has been loaded.
    pub fn current(&self) -> Option<RasterizedGlyph<'_>> {
        self.loaded.then(|| RasterizedGlyph {
            bitmap: slot_bitmap(&self.slot),
            metrics: self.metrics,
        })
    }

    fn glyph_metrics(&self, glyph_id: u16) -> GlyphMetrics {
        let scaled = self.font.font_ref.glyph_metrics(&[]).scale(self.ppem);
        let placement = self.slot.placement;
        let to_26_6 = |v: f32| (v * 64.0).round() as i64;
        let width = i64::from(placement.width) * 64;
        GlyphMetrics {
            width,
            height: i64::from(placement.height) * 64,
            hori_bearing_x: i64::from(placement.left) * 64,
            hori_bearing_y: i64::from(placement.top) * 64,
            hori_advance: to_26_6(scaled.advance_width(glyph_id)),
            vert_bearing_x: -(width / 2),
            vert_bearing_y: to_26_6(scaled.tsb(glyph_id)),
            vert_advance: to_26_6(scaled.advance_height(glyph_id)),
        }
    }
}

fn slot_bitmap(image: &Image) -> GlyphBitmap<'_> {
    let width = image.placement.width as usize;
    let (pixel_mode, bytes_per_pixel) = match image.content {
        Content::Mask => (PixelMode::Gray, 1),
        Content::SubpixelMask => (PixelMode::Lcd, 4),
        Content::Color => (PixelMode::Bgra, 4),
    };
    GlyphBitmap {
        width,
        rows: image.placement.height as usize,
        pitch: width * bytes_per_pixel,
        pixel_mode,
        buffer: &image.data,
    }
}

impl Rasterizer for SwashRasterizer {
    fn load_glyph(&mut self, glyph_id: u32, flags: LoadFlags) -> Result<RasterizedGlyph<'_>> {
        let glyph_count = u32::from(self.font.font_ref.metrics(&[]).glyph_count);
        let id = u16::try_from(glyph_id)
            .ok()
            .filter(|_| glyph_id < glyph_count)
            .ok_or_else(|| {
                FontError::backend(
                    "load_glyph",
                    format!("glyph id {glyph_id} out of range (face has {glyph_count} glyphs)"),
                )
            })?;

        self.loaded = false;
        self.slot.clear();
        if flags.render {
            let mut scaler = self
                .context
                .builder(self.font.font_ref)
                .size(self.ppem)
                .hint(flags.is_hinted())
                .build();
            // Blank glyphs (spaces) have nothing to render and leave an empty slot.
            if !Render::new(SOURCES)
                .format(Format::Alpha)
                .render_into(&mut scaler, id, &mut self.slot)
            {
                log::trace!("glyph {} rendered no image", glyph_id);
                self.slot.clear();
            }
        }

        self.metrics = self.glyph_metrics(id);
        self.loaded = true;
        Ok(RasterizedGlyph {
            bitmap: slot_bitmap(&self.slot),
            metrics: self.metrics,
        })
    }
}
