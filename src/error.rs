use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one file into a layer.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image {path:?} has no pixels")]
    Empty { path: PathBuf },
}

impl ImportError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ImportError::Read { path, .. }
            | ImportError::Decode { path, .. }
            | ImportError::Empty { path } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Cannot allocate a {width}x{height} canvas buffer")]
    Allocation { width: u32, height: u32 },
}
