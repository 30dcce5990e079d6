//! Render pipeline: configuration to face, face to composited run, run to
//! cell-width bitmap and PNG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cellglyph_config::Config;
use cellglyph_fonts::{Bitmap, Face, FontBackend, GlyphMetrics, HintSettings};
use serde::Serialize;

/// Opens the configured face and sizes it.
pub fn open_face(backend: &FontBackend, config: &Config) -> Result<Face> {
    let Some(path) = config.font_path.as_deref() else {
        bail!("no font given: pass --font or set font_path in the config file");
    };
    let hints = HintSettings::new(config.hinting, config.hintstyle);
    let mut face = backend
        .open_face(path, config.face_index, hints)
        .with_context(|| format!("failed to open {}", path.display()))?;
    face.set_char_size(0, config.char_size_26_6(), config.dpi_x, config.dpi_y)?;
    Ok(face)
}

/// A composited run, trimmed to the cell width when one was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub bitmap: Bitmap,
    pub metrics: GlyphMetrics,
    /// Width of the run before trimming.
    pub composite_width: usize,
    pub trimmed: bool,
}

impl Rendered {
    pub fn summary<'a>(&'a self, text: &'a str, output: Option<&'a Path>) -> RenderSummary<'a> {
        RenderSummary {
            text,
            width: self.bitmap.width,
            height: self.bitmap.rows,
            composite_width: self.composite_width,
            trimmed: self.trimmed,
            metrics: &self.metrics,
            output: output.map(Path::to_path_buf),
        }
    }
}

/// JSON report printed by `cellglyph render`.
#[derive(Debug, Serialize)]
pub struct RenderSummary<'a> {
    pub text: &'a str,
    pub width: usize,
    pub height: usize,
    pub composite_width: usize,
    pub trimmed: bool,
    pub metrics: &'a GlyphMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Composites `text` and trims the result when it is wider than `cell_width`.
pub fn render_text(face: &mut Face, text: &str, cell_width: Option<usize>) -> Result<Rendered> {
    let run = face
        .draw_complex_glyph(text)
        .with_context(|| format!("failed to composite {text:?}"))?;
    let composite_width = run.width;
    let bitmap = Bitmap::gray(run.width, run.height, run.pixels);

    let (bitmap, trimmed) = match cell_width {
        Some(cell_width) if bitmap.width > cell_width => {
            let trimmed = face
                .trim_to_width(&bitmap, cell_width)
                .with_context(|| format!("failed to fit {text:?} into {cell_width} columns"))?;
            (trimmed, true)
        }
        _ => (bitmap, false),
    };

    Ok(Rendered {
        bitmap,
        metrics: run.metrics,
        composite_width,
        trimmed,
    })
}

/// Writes a grayscale bitmap as PNG, dropping any row padding.
pub fn write_png(bitmap: &Bitmap, path: &Path) -> Result<()> {
    bitmap.validate()?;
    if bitmap.width == 0 || bitmap.rows == 0 {
        bail!("cannot write an empty {}x{} bitmap", bitmap.width, bitmap.rows);
    }

    let mut pixels = Vec::with_capacity(bitmap.width * bitmap.rows);
    for row in bitmap.buffer.chunks(bitmap.pitch).take(bitmap.rows) {
        pixels.extend_from_slice(&row[..bitmap.width]);
    }

    let image = image::GrayImage::from_raw(
        u32::try_from(bitmap.width)?,
        u32::try_from(bitmap.rows)?,
        pixels,
    )
    .context("bitmap buffer does not match its dimensions")?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
