//! Glyph run compositing for terminal cells.
//!
//! This crate provides:
//! - A growable grayscale [`Canvas`] for compositing
//! - [`draw_complex_glyph`]: shapes a run and blits each rasterized glyph at
//!   its pen position, producing one bitmap
//! - [`trim_to_width`]: fits an over-wide bitmap into a cell, trimming blank
//!   trailing columns first
//! - HarfBuzz-based shaping via rustybuzz and rasterization via swash,
//!   behind the [`Shaper`] and [`Rasterizer`] traits
//!
//! # Architecture
//!
//! A [`FontBackend`] is constructed explicitly and hands out [`Face`]s. Each
//! face owns one shaper work buffer and one rasterizer bitmap slot, so a face
//! must not be used from several threads at once.

pub mod backend;
pub mod bitmap;
pub mod canvas;
pub mod compositor;
pub mod error;
pub mod face;
pub mod hinting;
pub mod rasterizer;
pub mod shaper;
pub mod trim;

// Re-export main types for convenience
pub use backend::FontBackend;
pub use bitmap::{Bitmap, GlyphBitmap, GlyphMetrics, PixelMode, RasterizedGlyph};
pub use canvas::{BitmapPoint, Canvas, sat_sub};
pub use compositor::{CompositeGlyph, draw_complex_glyph};
pub use error::{FontError, Result};
pub use face::{CharSize, Face, FaceMetrics, FontData};
pub use hinting::{HintSettings, HintTarget, Hinting, LoadFlags};
pub use rasterizer::{Rasterizer, SwashRasterizer};
pub use shaper::{NOTDEF, RustybuzzShaper, ShapedGlyph, Shaper};
pub use trim::{TrimPlan, plan_trim, trim_to_width};
