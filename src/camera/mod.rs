//! Optional camera preview
//!
//! Camera access is requested asynchronously and may be refused. A granted
//! [`CameraStream`] is owned by whoever requested it and must be handed back
//! to [`CameraPreview::stop`] when no longer needed.

pub mod device;
pub mod error;

pub use device::DeviceCamera;
pub use error::CameraError;

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;

use crate::config::CameraConfig;

/// An open camera
#[derive(Debug)]
pub struct CameraStream {
    device: PathBuf,
    handle: Option<tokio::fs::File>,
}

impl CameraStream {
    pub fn new(device: PathBuf, handle: Option<tokio::fs::File>) -> Self {
        Self { device, handle }
    }

    /// Device the stream was opened from
    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Whether the stream still holds the device
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the device. Returns false if it was already released.
    pub fn release(&mut self) -> bool {
        self.handle.take().is_some()
    }
}

/// Camera collaborator
pub trait CameraPreview: Send + Sync {
    /// Ask for access to the camera
    fn request_access(&self) -> BoxFuture<'static, Result<CameraStream, CameraError>>;

    /// Stop a stream. Safe on streams that are already stopped.
    fn stop(&self, stream: &mut CameraStream);
}

/// Camera that always declines, used when camera support is off
#[derive(Debug, Default)]
pub struct DisabledCamera;

impl CameraPreview for DisabledCamera {
    fn request_access(&self) -> BoxFuture<'static, Result<CameraStream, CameraError>> {
        Box::pin(async { Err(CameraError::Disabled) })
    }

    fn stop(&self, stream: &mut CameraStream) {
        stream.release();
    }
}

/// Build the camera described by the configuration
pub fn from_config(config: &CameraConfig) -> Box<dyn CameraPreview> {
    if config.enabled {
        Box::new(DeviceCamera::new(config.device.clone()))
    } else {
        Box::new(DisabledCamera)
    }
}
