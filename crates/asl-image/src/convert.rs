use crate::{Image, ImageError};
use asl_base::Vec2;

// BT.601 YUV to RGB, fixed point with 8 fractional bits
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    [r, g, b]
}

/// Convert a packed YUYV (4:2:2) buffer to an RGB frame.
///
/// YUYV packs two pixels as `[Y0, U, Y1, V]`; both share the chroma pair.
///
/// # Errors
///
/// Returns `ImageError::Size` if `data` is shorter than `width * height * 2`.
pub fn yuyv_to_rgb(size: Vec2<usize>, data: &[u8]) -> Result<Image, ImageError> {
    let expected = size.area() * 2;
    if data.len() < expected {
        return Err(ImageError::Size {
            expected,
            got: data.len(),
        });
    }

    let mut rgb = Vec::with_capacity(size.area() * Image::CHANNELS);
    for chunk in data[..expected].chunks_exact(4) {
        rgb.extend_from_slice(&yuv_to_rgb(chunk[0], chunk[1], chunk[3]));
        rgb.extend_from_slice(&yuv_to_rgb(chunk[2], chunk[1], chunk[3]));
    }

    Image::new(size, rgb)
}
