//! Explicit font backend context.
//!
//! Faces are created through a [`FontBackend`] instead of a process-wide
//! library handle. The backend carries the settings every face's scaler is
//! built with and counts the faces still alive, so teardown order can be
//! checked.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{FontError, Result};
use crate::face::{Face, FontData};
use crate::hinting::HintSettings;

/// Default number of cached scaler entries per face.
pub const DEFAULT_SCALE_CACHE_ENTRIES: usize = 8;

#[derive(Debug)]
struct BackendState {
    scale_cache_entries: usize,
    live_faces: AtomicUsize,
}

/// Keeps a face counted against its backend until dropped.
#[derive(Debug)]
pub(crate) struct FaceLease {
    state: Arc<BackendState>,
}

impl Drop for FaceLease {
    fn drop(&mut self) {
        self.state.live_faces.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Owns backend-wide settings and hands out faces.
#[derive(Debug)]
pub struct FontBackend {
    state: Arc<BackendState>,
}

impl FontBackend {
    pub fn new() -> Self {
        Self::with_cache_entries(DEFAULT_SCALE_CACHE_ENTRIES)
    }

    pub fn with_cache_entries(scale_cache_entries: usize) -> Self {
        log::debug!(
            "font backend initialized ({} scaler cache entries per face)",
            scale_cache_entries
        );
        Self {
            state: Arc::new(BackendState {
                scale_cache_entries,
                live_faces: AtomicUsize::new(0),
            }),
        }
    }

    /// Number of faces created by this backend that are still alive.
    pub fn live_faces(&self) -> usize {
        self.state.live_faces.load(Ordering::Acquire)
    }

    pub fn scale_cache_entries(&self) -> usize {
        self.state.scale_cache_entries
    }

    /// Reads a font file and opens face `index` from it.
    pub fn open_face(
        &self,
        path: impl AsRef<Path>,
        index: u32,
        hints: HintSettings,
    ) -> Result<Face> {
        let path = path.as_ref();
        log::info!("Loading face {} from {:?}", index, path);
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let font = FontData::new(data, index).map_err(|e| {
            FontError::backend(
                "load_face",
                format!("failed to load face {index} from '{}': {e}", path.display()),
            )
        })?;
        Ok(Face::new(
            font,
            Some(path.to_path_buf()),
            hints,
            self.lease(),
            self.scale_cache_entries(),
        ))
    }

    /// Opens face `index` from in-memory font data.
    pub fn face_from_bytes(&self, data: Vec<u8>, index: u32, hints: HintSettings) -> Result<Face> {
        let font = FontData::new(data, index)?;
        Ok(Face::new(
            font,
            None,
            hints,
            self.lease(),
            self.scale_cache_entries(),
        ))
    }

    fn lease(&self) -> FaceLease {
        self.state.live_faces.fetch_add(1, Ordering::AcqRel);
        FaceLease {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for FontBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FontBackend {
    fn drop(&mut self) {
        match self.live_faces() {
            0 => log::debug!("font backend shut down"),
            n => log::warn!("font backend shut down with {} faces still open", n),
        }
    }
}
