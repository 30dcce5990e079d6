//! Typed error types for cellglyph-fonts.
//!
//! Every compositing or trimming failure aborts the whole operation; callers
//! match on the variant to decide whether to substitute a placeholder glyph.

use thiserror::Error;

use crate::bitmap::PixelMode;

/// Errors produced while shaping, rasterizing, compositing or trimming.
#[derive(Debug, Error)]
pub enum FontError {
    /// The canvas (or an output buffer) could not be allocated.
    #[error("Allocation failed in {operation}: could not obtain {bytes} bytes")]
    AllocationFailure {
        /// Operation that requested the memory.
        operation: &'static str,
        /// Requested size in bytes (saturated on overflow).
        bytes: usize,
    },

    /// A rasterized glyph was not an 8-bit grayscale bitmap.
    #[error("Rasterizer rendered glyph {glyph_id} with an unsupported pixel mode: {mode:?}")]
    UnsupportedPixelMode {
        /// Glyph that produced the bitmap.
        glyph_id: u32,
        /// Pixel mode reported by the rasterizer.
        mode: PixelMode,
    },

    /// Shaping produced no drawable glyph.
    #[error("No glyphs found for string: {text}")]
    NoGlyphsFound {
        /// The text that was shaped.
        text: String,
    },

    /// Trimming would remove at least as many columns as it keeps.
    #[error("Too large for trimming: width {width} exceeds cell width {cell_width} by {excess}")]
    TooLargeForTrimming {
        /// Width of the input bitmap.
        width: usize,
        /// Requested cell width.
        cell_width: usize,
        /// Number of columns that would have to go.
        excess: usize,
    },

    /// A bitmap handed to the trimmer is malformed.
    #[error("Invalid bitmap: {0}")]
    InvalidBitmap(String),

    /// The shaper or rasterizer failed (malformed font, unknown glyph, ...).
    #[error("Font backend error in {operation}: {details}")]
    FontBackend {
        /// Backend operation that failed.
        operation: &'static str,
        /// Offending value and reason.
        details: String,
    },

    /// A font file could not be read from disk.
    #[error("Font file read failed for '{path}': {source}")]
    Io {
        /// Path to the font file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FontError {
    /// Shorthand for [`FontError::FontBackend`].
    pub fn backend(operation: &'static str, details: impl Into<String>) -> Self {
        FontError::FontBackend {
            operation,
            details: details.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FontError>;
