//! Camera frame sources for the sign stream.
//!
//! A `FrameSource` owns a device for the lifetime between `open` and `close`
//! and hands out decoded RGB frames one at a time. The capture loop is the
//! only caller while the stream runs.

pub mod config;
pub mod error;
pub mod source;
pub mod synthetic;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::{CameraConfig, PixelFormat};
pub use error::CameraError;
pub use source::{CameraInfo, FrameSource};
pub use synthetic::SyntheticCamera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
