//! Camera backed by a video device node

use std::path::PathBuf;

use futures_util::future::BoxFuture;

use super::{CameraError, CameraPreview, CameraStream};

/// Opens a video device (e.g. `/dev/video0`) and holds it for the session
#[derive(Debug, Clone)]
pub struct DeviceCamera {
    device: PathBuf,
}

impl DeviceCamera {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self { device: device.into() }
    }
}

impl CameraPreview for DeviceCamera {
    fn request_access(&self) -> BoxFuture<'static, Result<CameraStream, CameraError>> {
        let device = self.device.clone();
        Box::pin(async move {
            let handle = tokio::fs::OpenOptions::new()
                .read(true)
                .open(&device)
                .await
                .map_err(|e| CameraError::from_io(&device, e))?;
            tracing::info!(device = %device.display(), "camera opened");
            Ok(CameraStream::new(device, Some(handle)))
        })
    }

    fn stop(&self, stream: &mut CameraStream) {
        if stream.release() {
            tracing::info!(device = %stream.device().display(), "camera released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_device_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let camera = DeviceCamera::new(dir.path().join("video0"));

        let result = camera.request_access().await;
        assert!(matches!(result, Err(CameraError::NotFound { .. })));
    }

    #[tokio::test]
    async fn open_device_can_be_stopped_twice() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let camera = DeviceCamera::new(file.path());

        let mut stream = camera.request_access().await.unwrap();
        assert!(stream.is_active());

        camera.stop(&mut stream);
        assert!(!stream.is_active());
        camera.stop(&mut stream);
        assert!(!stream.is_active());
    }
}
