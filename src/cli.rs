//! Command-line interface for cellglyph.
//!
//! Parses arguments, merges them over the loaded configuration and runs the
//! `render`, `shape` and `info` subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cellglyph_config::{Config, LogLevel};
use cellglyph_fonts::FontBackend;
use clap::{Args, Parser, Subcommand};

use crate::render;

/// cellglyph - composite a shaped text run into one cell-sized bitmap
#[derive(Parser, Debug)]
#[command(name = "cellglyph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to load (default: ~/.config/cellglyph/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Composite TEXT, trim it to the cell width and write a PNG
    Render {
        /// Text run to render
        text: String,

        #[command(flatten)]
        face: FaceArgs,

        /// Cell width in pixels; wider runs are trimmed
        #[arg(long, value_name = "PX")]
        cell_width: Option<usize>,

        /// PNG file to write
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the shaped glyph records for TEXT as JSON
    Shape {
        /// Text run to shape
        text: String,

        #[command(flatten)]
        face: FaceArgs,
    },
    /// Print a summary of the face's metrics
    Info {
        #[command(flatten)]
        face: FaceArgs,
    },
}

/// Face selection flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FaceArgs {
    /// Font file (TTF/OTF/TTC)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Face index inside a font collection
    #[arg(long, value_name = "N")]
    pub index: Option<u32>,

    /// Font size in points
    #[arg(long, value_name = "PT")]
    pub size: Option<f32>,

    /// Resolution in dots per inch (both axes)
    #[arg(long, value_name = "N")]
    pub dpi: Option<u32>,

    /// Disable hinting
    #[arg(long)]
    pub no_hinting: bool,

    /// Hint style: 0 = default, 1-2 = light, 3+ = full
    #[arg(long, value_name = "N")]
    pub hintstyle: Option<i32>,
}

impl FaceArgs {
    /// Overrides `config` with every flag that was given.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
        if let Some(index) = self.index {
            config.face_index = index;
        }
        if let Some(size) = self.size {
            config.font_size = size;
        }
        if let Some(dpi) = self.dpi {
            config.dpi_x = dpi;
            config.dpi_y = dpi;
        }
        if self.no_hinting {
            config.hinting = false;
        }
        if let Some(hintstyle) = self.hintstyle {
            config.hintstyle = hintstyle;
        }
        config
    }
}

/// Loads `path` when given, otherwise the default config file.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load(),
    }
}

/// Runs `command` against `config`, writing its report to `out`.
pub fn execute(command: &Commands, config: Config, out: &mut dyn Write) -> Result<()> {
    let backend = FontBackend::with_cache_entries(config.scale_cache_entries);

    match command {
        Commands::Render {
            text,
            face,
            cell_width,
            output,
        } => {
            let mut config = face.apply(config);
            if let Some(cell_width) = cell_width {
                config.cell_width = Some(*cell_width);
            }
            config.validate()?;

            let mut face = render::open_face(&backend, &config)?;
            let rendered = render::render_text(&mut face, text, config.cell_width)?;
            if let Some(output) = output {
                render::write_png(&rendered.bitmap, output)?;
                log::info!(
                    "Wrote {}x{} bitmap to {:?}",
                    rendered.bitmap.width,
                    rendered.bitmap.rows,
                    output
                );
            }
            let summary = rendered.summary(text, output.as_deref());
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)?;
        }
        Commands::Shape { text, face } => {
            let config = face.apply(config);
            config.validate()?;

            let mut face = render::open_face(&backend, &config)?;
            let glyphs = face.shape(text)?;
            serde_json::to_writer_pretty(&mut *out, &glyphs)?;
            writeln!(out)?;
        }
        Commands::Info { face } => {
            let config = face.apply(config);
            config.validate()?;

            let face = render::open_face(&backend, &config)?;
            writeln!(out, "{}", face)?;
        }
    }

    Ok(())
}
