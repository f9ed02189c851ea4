//! Bulk image import, decoded one file per tick.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::error::ImportError;
use crate::model::{Layer, Project};

/// Decode `path` into a layer named after the file stem.
///
/// The format is sniffed from the file contents, so a misnamed extension
/// still loads.
pub fn load_layer(path: &Path) -> Result<Layer, ImportError> {
    let read_error = |source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    };
    let decoded = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(read_error)?
        .decode()
        .map_err(|source| ImportError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    let empty = || ImportError::Empty {
        path: path.to_path_buf(),
    };
    let size = IntSize::from_wh(width, height).ok_or_else(empty)?;

    // tiny-skia stores premultiplied alpha
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        px.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let pixmap = Pixmap::from_vec(data, size).ok_or_else(empty)?;

    Ok(Layer::from_pixmap(layer_name(path), pixmap))
}

fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Progress of a running import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    /// Files processed so far, decoded or failed.
    pub done: usize,
    pub total: usize,
}

impl ImportProgress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f32 / self.total as f32
        }
    }
}

/// A batch import stepped from the event loop.
///
/// Decoded layers are held back until [`ImportJob::finish`] so the project
/// sees the whole batch as a single addition.
#[derive(Debug)]
pub struct ImportJob {
    pending: VecDeque<PathBuf>,
    total: usize,
    loaded: Vec<Layer>,
    failed: Vec<ImportError>,
    cancelled: bool,
}

impl ImportJob {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let pending: VecDeque<PathBuf> = paths.into_iter().collect();
        log::info!("Importing {} file(s)", pending.len());
        Self {
            total: pending.len(),
            pending,
            loaded: Vec::new(),
            failed: Vec::new(),
            cancelled: false,
        }
    }

    /// Decode the next file. Returns `false` once nothing is left.
    pub fn step(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        let Some(path) = self.pending.pop_front() else {
            return false;
        };
        match load_layer(&path) {
            Ok(layer) => {
                log::debug!("Loaded {:?} ({}x{})", path, layer.size().width, layer.size().height);
                self.loaded.push(layer);
            }
            Err(e) => {
                log::warn!("{}", e);
                self.failed.push(e);
            }
        }
        true
    }

    /// Skip the remaining files; already decoded layers are kept.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::info!("Import cancelled, {} file(s) skipped", self.pending.len());
        }
        self.cancelled = true;
        self.pending.clear();
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.pending.is_empty()
    }

    pub fn progress(&self) -> ImportProgress {
        ImportProgress {
            done: self.loaded.len() + self.failed.len(),
            total: self.total,
        }
    }

    /// Name of the file the next step decodes.
    pub fn current_name(&self) -> Option<String> {
        self.pending.front().map(|path| layer_name(path))
    }

    /// Append the decoded layers in one batch and report failures.
    pub fn finish(self, project: &mut Project) -> ImportReport {
        let loaded = self.loaded.len();
        project.add_layers(self.loaded);
        log::info!(
            "Import finished: {} loaded, {} failed{}",
            loaded,
            self.failed.len(),
            if self.cancelled { " (cancelled)" } else { "" }
        );
        ImportReport {
            loaded,
            failed: self.failed.iter().map(|e| e.path().clone()).collect(),
            cancelled: self.cancelled,
        }
    }

    /// Run every step at once.
    pub fn run_to_end(mut self, project: &mut Project) -> ImportReport {
        while self.step() {}
        self.finish(project)
    }
}

/// Outcome of a finished import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub loaded: usize,
    pub failed: Vec<PathBuf>,
    pub cancelled: bool,
}

impl ImportReport {
    /// Title and body of the aggregated failure warning, if any.
    pub fn warning(&self) -> Option<(String, String)> {
        if self.failed.is_empty() {
            return None;
        }
        let paths: Vec<String> = self.failed.iter().map(|p| p.display().to_string()).collect();
        Some((
            "Failed to load images".to_string(),
            format!("Some images failed to load:\n{}", paths.join("\n")),
        ))
    }
}
