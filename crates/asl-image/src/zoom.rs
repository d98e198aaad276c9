use crate::{Image, ImageError};
use asl_base::Vec2;
use crates_image::imageops::{self, FilterType};

const FILTER: FilterType = FilterType::Triangle;

/// Bilinear resize to `size`.
///
/// # Errors
///
/// Returns `ImageError::Size` if the frame buffer does not match its size.
pub fn resize(image: &Image, size: Vec2<usize>) -> Result<Image, ImageError> {
    if image.size == size {
        return Ok(image.clone());
    }
    let rgb = image.clone().into_rgb_image()?;
    Ok(Image::from_rgb_image(imageops::resize(
        &rgb,
        size.x as u32,
        size.y as u32,
        FILTER,
    )))
}

/// Apply a digital zoom while keeping the frame size.
///
/// - `factor == 1.0` returns the frame untouched.
/// - `factor > 1.0` crops a centered `(h / factor, w / factor)` region and
///   scales it back up to `(h, w)`.
/// - `factor < 1.0` scales the frame down to `(h * factor, w * factor)` and
///   centers it on a black canvas of the original size.
///
/// Non-positive factors are rejected by the settings store before they get
/// here; this function treats them as identity.
///
/// # Errors
///
/// Returns `ImageError::Size` if the frame buffer does not match its size.
pub fn apply_zoom(image: Image, factor: f32) -> Result<Image, ImageError> {
    if factor == 1.0 || !(factor > 0.0) || !factor.is_finite() {
        return Ok(image);
    }
    if image.width() == 0 || image.height() == 0 {
        return Ok(image);
    }

    let (w, h) = (image.width() as u32, image.height() as u32);
    let rgb = image.into_rgb_image()?;

    if factor > 1.0 {
        let crop_w = ((w as f32 / factor) as u32).clamp(1, w);
        let crop_h = ((h as f32 / factor) as u32).clamp(1, h);
        let x = (w - crop_w) / 2;
        let y = (h - crop_h) / 2;
        let cropped = imageops::crop_imm(&rgb, x, y, crop_w, crop_h).to_image();
        Ok(Image::from_rgb_image(imageops::resize(&cropped, w, h, FILTER)))
    } else {
        let small_w = ((w as f32 * factor) as u32).clamp(1, w);
        let small_h = ((h as f32 * factor) as u32).clamp(1, h);
        let small = imageops::resize(&rgb, small_w, small_h, FILTER);
        let mut canvas = crates_image::RgbImage::new(w, h);
        let x = (w - small_w) / 2;
        let y = (h - small_h) / 2;
        imageops::replace(&mut canvas, &small, x as i64, y as i64);
        Ok(Image::from_rgb_image(canvas))
    }
}
