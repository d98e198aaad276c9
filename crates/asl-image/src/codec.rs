use crate::{Image, ImageError};
use crates_image::ImageEncoder;

/// Decode a compressed frame (MJPEG payload, PNG, ...) into RGB.
///
/// Grayscale and alpha images are converted to 3-channel RGB.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is corrupt or the format is unsupported.
pub fn decode_image(data: &[u8]) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory(data)?;
    Ok(Image::from_rgb_image(decoded.to_rgb8()))
}

/// Encode a frame as JPEG bytes.
///
/// `quality` is clamped to 1..=100.
///
/// # Errors
///
/// Returns `ImageError::Encode` if the encoder rejects the frame (e.g. zero size).
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(
        &mut buffer,
        quality.clamp(1, 100),
    );
    encoder
        .write_image(
            &image.data,
            image.width() as u32,
            image.height() as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}
