//! Compositing a shaped glyph run into a single grayscale bitmap.
//!
//! Each shaped glyph is rasterized on its own and copied onto a growing
//! [`Canvas`] at the running pen position. Offsets and advances arrive in
//! 26.6 units and are tracked as fractional pixels; bitmaps land on whole
//! pixels.

use crate::bitmap::{GlyphMetrics, PixelMode};
use crate::canvas::{BitmapPoint, Canvas};
use crate::error::{FontError, Result};
use crate::hinting::HintSettings;
use crate::rasterizer::Rasterizer;
use crate::shaper::Shaper;

/// Output of [`draw_complex_glyph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeGlyph {
    /// `width * height` bytes, row-major.
    pub pixels: Vec<u8>,
    /// Metrics of the first glyph drawn.
    pub metrics: GlyphMetrics,
    pub width: usize,
    pub height: usize,
}

#[inline]
fn ceil_to_usize(v: f32) -> usize {
    // Negative extents clamp to an empty box.
    v.ceil().max(0.0) as usize
}

/// First bitmap row/column still visible when the pen sits at `pos`.
#[inline]
fn clip_start(pos: f32) -> usize {
    if pos < 0.0 { (-pos).ceil() as usize } else { 0 }
}

/// Canvas row/column a bitmap lands on when the pen sits at `pos`.
#[inline]
fn place_start(pos: f32) -> usize {
    if pos < 0.0 { 0 } else { pos.round() as usize }
}

/// Shapes `text` and composites every drawable glyph into one bitmap.
///
/// Notdef glyphs are skipped outright: no rasterization, no pen movement and
/// no growth. A run that leaves no pixels on the canvas fails with
/// [`FontError::NoGlyphsFound`]. Any error aborts the run and drops the
/// partial canvas.
pub fn draw_complex_glyph<S, R>(
    shaper: &mut S,
    rasterizer: &mut R,
    hints: HintSettings,
    text: &str,
) -> Result<CompositeGlyph>
where
    S: Shaper + ?Sized,
    R: Rasterizer + ?Sized,
{
    let glyphs = shaper.shape(text, hints.load_flags(false))?;
    let render_flags = hints.load_flags(true);

    let mut canvas = Canvas::new();
    let (mut pen_x, mut pen_y) = (0.0f32, 0.0f32);
    let (mut width, mut height) = (0usize, 0usize);
    let mut metrics: Option<GlyphMetrics> = None;

    for shaped in &glyphs {
        if shaped.is_notdef() {
            log::trace!("skipping notdef glyph for cluster {}", shaped.cluster);
            continue;
        }

        let glyph = rasterizer.load_glyph(shaped.glyph_id, render_flags)?;
        metrics.get_or_insert(glyph.metrics);
        let bitmap = glyph.bitmap;

        pen_x += shaped.x_offset as f32 / 64.0;
        pen_y -= shaped.y_offset as f32 / 64.0;

        width = width.max(ceil_to_usize(pen_x + bitmap.pitch as f32));
        height = height.max(ceil_to_usize(pen_y + bitmap.rows as f32));
        canvas.ensure_capacity(width, height)?;

        if bitmap.pixel_mode != PixelMode::Gray {
            canvas.release();
            log::warn!(
                "aborting run {:?}: glyph {} has pixel mode {:?}",
                text,
                shaped.glyph_id,
                bitmap.pixel_mode
            );
            return Err(FontError::UnsupportedPixelMode {
                glyph_id: shaped.glyph_id,
                mode: bitmap.pixel_mode,
            });
        }

        let src = BitmapPoint {
            x: clip_start(pen_x),
            y: clip_start(pen_y),
        };
        let dest = BitmapPoint {
            x: place_start(pen_x),
            y: place_start(pen_y),
        };
        canvas.blit(&bitmap, src, dest);

        pen_x += shaped.x_advance as f32 / 64.0;
        pen_y = 0.0;
    }

    // Blank glyphs (spaces) advance the pen but leave no pixels behind.
    let Some(metrics) = metrics.filter(|_| !canvas.is_empty()) else {
        return Err(FontError::NoGlyphsFound {
            text: text.to_string(),
        });
    };

    let (pixels, width, height) = canvas.into_parts();
    log::debug!(
        "composited {} glyphs for {:?} into {}x{}",
        glyphs.len(),
        text,
        width,
        height
    );
    Ok(CompositeGlyph {
        pixels,
        metrics,
        width,
        height,
    })
}
