//! cellglyph: shapes a text run into one grayscale bitmap and fits it into a
//! terminal cell.
//!
//! The heavy lifting lives in `cellglyph-fonts`; this crate wires it to the
//! configuration file, the log sink and the command line.

pub mod cli;
pub mod logging;
pub mod render;

pub use cellglyph_config as config;
pub use cellglyph_fonts as fonts;
