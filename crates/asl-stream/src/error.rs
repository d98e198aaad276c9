use asl_camera::CameraError;
use asl_image::ImageError;
use asl_infer::InferError;
use std::fmt;

#[derive(Debug)]
pub enum StreamError {
    /// The camera could not be opened.
    Device(CameraError),
    /// A previous stop has not finished yet.
    Busy,
    /// The capture thread did not exit in time.
    Timeout,
    /// The capture thread could not be spawned or panicked.
    Thread(String),
    Infer(InferError),
    Image(ImageError),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Device(err) => write!(f, "camera error: {err}"),
            StreamError::Busy => write!(f, "stream is still stopping"),
            StreamError::Timeout => write!(f, "timed out waiting for the camera thread"),
            StreamError::Thread(msg) => write!(f, "camera thread error: {msg}"),
            StreamError::Infer(err) => write!(f, "inference error: {err}"),
            StreamError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<CameraError> for StreamError {
    fn from(err: CameraError) -> Self {
        StreamError::Device(err)
    }
}

impl From<InferError> for StreamError {
    fn from(err: InferError) -> Self {
        StreamError::Infer(err)
    }
}

impl From<ImageError> for StreamError {
    fn from(err: ImageError) -> Self {
        StreamError::Image(err)
    }
}
