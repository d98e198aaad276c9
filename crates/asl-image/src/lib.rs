//! RGB frame type and the pixel work the stream needs around it.
//!
//! Frames are 8-bit RGB in HWC order. This crate decodes camera payloads into
//! frames, applies the zoom transform, draws overlays, and encodes the result
//! as JPEG for transport.

pub mod codec;
pub mod convert;
pub mod draw;
pub mod error;
pub mod font;
pub mod image;
pub mod zoom;

pub use codec::{decode_image, encode_jpeg};
pub use convert::yuyv_to_rgb;
pub use draw::{draw_rect, draw_text, fill_rect, text_size};
pub use error::ImageError;
pub use image::Image;
pub use zoom::{apply_zoom, resize};

/// RGB color triple.
pub type Color = [u8; 3];
