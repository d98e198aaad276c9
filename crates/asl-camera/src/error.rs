use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    /// The device could not be opened or configured.
    Device(String),
    /// The device is open but streaming failed.
    Stream(String),
    Decode(asl_image::ImageError),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<asl_image::ImageError> for CameraError {
    fn from(err: asl_image::ImageError) -> Self {
        CameraError::Decode(err)
    }
}
