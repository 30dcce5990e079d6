//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields.

pub fn font_size() -> f32 {
    12.0 // points
}

pub fn dpi() -> u32 {
    96
}

pub fn hintstyle() -> i32 {
    3 // full hinting
}

pub fn scale_cache_entries() -> usize {
    8
}

pub fn bool_true() -> bool {
    true
}
