//! Error types for camera access

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reasons a camera request can fail
#[derive(Debug, Error)]
pub enum CameraError {
    /// The user or the operating system refused access
    #[error("access to camera {device:?} was denied")]
    Denied { device: PathBuf },

    /// No camera at the configured device path
    #[error("no camera found at {device:?}")]
    NotFound { device: PathBuf },

    /// Camera support is turned off
    #[error("camera is disabled")]
    Disabled,

    /// Any other I/O failure while opening the device
    #[error("failed to open camera {device:?}: {source}")]
    Io {
        device: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CameraError {
    /// Classify an I/O error raised while opening `device`
    pub fn from_io(device: &Path, source: std::io::Error) -> Self {
        let device = device.to_path_buf();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => CameraError::Denied { device },
            std::io::ErrorKind::NotFound => CameraError::NotFound { device },
            _ => CameraError::Io { device, source },
        }
    }
}
