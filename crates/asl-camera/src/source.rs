use crate::CameraError;
use asl_image::Image;

/// Geometry and rate of an open device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f32,
}

/// A camera the capture loop can pull frames from.
///
/// `read` blocks until a frame arrives. `None` means this read failed (device
/// hiccup, corrupt payload); the caller retries, it is not end-of-stream.
pub trait FrameSource: Send {
    /// Open the device with the given index (`/dev/video{index}` for V4L2).
    fn open(&mut self, index: usize) -> Result<(), CameraError>;

    fn read(&mut self) -> Option<Image>;

    /// Release the device. Safe to call when already closed.
    fn close(&mut self);

    /// Geometry of the open device, `None` while closed.
    fn info(&self) -> Option<CameraInfo>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn open(&mut self, index: usize) -> Result<(), CameraError> {
        (**self).open(index)
    }

    fn read(&mut self) -> Option<Image> {
        (**self).read()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn info(&self) -> Option<CameraInfo> {
        (**self).info()
    }
}
