//! Load-flag derivation from the face's hinting settings.

use serde::{Deserialize, Serialize};

/// Which hinting target to request from the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintTarget {
    /// No explicit target; the rasterizer picks its default.
    Default,
    /// Full hinting on both axes.
    Normal,
    /// Vertical-only hinting.
    Light,
}

/// Hinting half of the load flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hinting {
    Disabled,
    Target(HintTarget),
}

/// Flags passed to every glyph load and to the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFlags {
    /// Render a bitmap in addition to loading the outline.
    pub render: bool,
    pub hinting: Hinting,
}

impl LoadFlags {
    /// Derives flags from a face's `hinting` switch and `hintstyle` level.
    ///
    /// `hintstyle >= 3` requests normal hinting, `1..=2` light hinting and
    /// `0` leaves the target unspecified.
    pub fn new(hinting: bool, hintstyle: i32, render: bool) -> Self {
        let hinting = if !hinting {
            Hinting::Disabled
        } else if hintstyle >= 3 {
            Hinting::Target(HintTarget::Normal)
        } else if 0 < hintstyle && hintstyle < 3 {
            Hinting::Target(HintTarget::Light)
        } else {
            Hinting::Target(HintTarget::Default)
        };
        LoadFlags { render, hinting }
    }

    pub fn is_hinted(&self) -> bool {
        self.hinting != Hinting::Disabled
    }
}

/// The face-level settings the flags are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintSettings {
    pub hinting: bool,
    pub hintstyle: i32,
}

impl HintSettings {
    pub fn new(hinting: bool, hintstyle: i32) -> Self {
        Self { hinting, hintstyle }
    }

    pub fn load_flags(&self, render: bool) -> LoadFlags {
        LoadFlags::new(self.hinting, self.hintstyle, render)
    }
}

impl Default for HintSettings {
    fn default() -> Self {
        Self::new(true, 3)
    }
}
