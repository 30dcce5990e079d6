//! Trimming an over-wide bitmap down to a terminal cell width.
//!
//! Glyphs usually overflow on their advance side, so blank trailing columns
//! go first; only the remainder is taken from the leading edge.

use crate::bitmap::{Bitmap, TEXT_INTENSITY_THRESHOLD};
use crate::error::{FontError, Result};

/// How many columns to drop from each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimPlan {
    pub left: usize,
    pub right: usize,
}

fn column_has_text(bitmap: &Bitmap, x: usize) -> bool {
    (0..bitmap.rows).any(|y| bitmap.pixel(x, y) > TEXT_INTENSITY_THRESHOLD)
}

/// Counts blank trailing columns, up to `excess`, and splits the trim.
pub fn plan_trim(bitmap: &Bitmap, excess: usize) -> TrimPlan {
    let blank = (0..bitmap.width)
        .rev()
        .take(excess)
        .take_while(|&x| !column_has_text(bitmap, x))
        .count();
    let right = excess.min(blank);
    TrimPlan {
        left: excess - right,
        right,
    }
}

/// Returns a copy of `bitmap` exactly `cell_width` columns wide.
///
/// Fails with [`FontError::TooLargeForTrimming`] when at least as many
/// columns would be removed as kept; nothing is allocated in that case.
pub fn trim_to_width(bitmap: &Bitmap, cell_width: usize) -> Result<Bitmap> {
    bitmap.validate()?;
    if bitmap.width <= cell_width {
        return Err(FontError::InvalidBitmap(format!(
            "width {} does not exceed cell width {}",
            bitmap.width, cell_width
        )));
    }
    let excess = bitmap.width - cell_width;
    if excess >= cell_width {
        return Err(FontError::TooLargeForTrimming {
            width: bitmap.width,
            cell_width,
            excess,
        });
    }

    let plan = plan_trim(bitmap, excess);
    let len = cell_width.saturating_mul(bitmap.rows);
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| FontError::AllocationFailure {
            operation: "trim_to_width",
            bytes: len,
        })?;
    for y in 0..bitmap.rows {
        let start = y * bitmap.pitch + plan.left;
        buffer.extend_from_slice(&bitmap.buffer[start..start + cell_width]);
    }
    log::trace!(
        "trimmed {}px bitmap to {}px (left {}, right {})",
        bitmap.width,
        cell_width,
        plan.left,
        plan.right
    );

    Ok(Bitmap {
        rows: bitmap.rows,
        width: cell_width,
        pitch: cell_width,
        buffer,
        num_grays: bitmap.num_grays,
        pixel_mode: bitmap.pixel_mode,
        palette_mode: bitmap.palette_mode,
    })
}
