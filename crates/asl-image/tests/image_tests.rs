use asl_base::{Rect, Vec2};
use asl_image::*;

fn gradient(width: usize, height: usize) -> Image {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 255 / width) as u8, (y * 255 / height) as u8, 128]);
        }
    }
    Image::new(Vec2::new(width, height), data).unwrap()
}

#[test]
fn test_new_rejects_wrong_length() {
    let result = Image::new(Vec2::new(4, 4), vec![0; 10]);
    assert!(matches!(
        result,
        Err(ImageError::Size {
            expected: 48,
            got: 10
        })
    ));
}

#[test]
fn test_filled_and_pixel() {
    let image = Image::filled(Vec2::new(3, 2), [1, 2, 3]);
    assert_eq!(image.pixel(2, 1), Some([1, 2, 3]));
    assert_eq!(image.pixel(3, 0), None);
}

#[test]
fn test_zoom_identity_is_pixel_exact() {
    let image = gradient(64, 48);
    let zoomed = apply_zoom(image.clone(), 1.0).unwrap();
    assert_eq!(zoomed, image);
}

#[test]
fn test_zoom_keeps_shape() {
    for factor in [0.1, 0.5, 0.75, 1.5, 2.0, 3.0] {
        let zoomed = apply_zoom(gradient(64, 48), factor).unwrap();
        assert_eq!(zoomed.size, Vec2::new(64, 48), "factor {factor}");
        assert_eq!(zoomed.data.len(), 64 * 48 * 3);
    }
}

#[test]
fn test_zoom_in_then_out_keeps_shape() {
    let zoomed = apply_zoom(gradient(64, 48), 2.0).unwrap();
    let restored = apply_zoom(zoomed, 0.5).unwrap();
    assert_eq!(restored.size, Vec2::new(64, 48));
}

#[test]
fn test_zoom_out_pads_with_black() {
    let image = Image::filled(Vec2::new(40, 40), [200, 200, 200]);
    let zoomed = apply_zoom(image, 0.5).unwrap();
    assert_eq!(zoomed.pixel(0, 0), Some([0, 0, 0]));
    assert_eq!(zoomed.pixel(39, 39), Some([0, 0, 0]));
    let center = zoomed.pixel(20, 20).unwrap();
    assert!(center.iter().all(|v| v.abs_diff(200) <= 1));
}

#[test]
fn test_zoom_in_of_uniform_frame_stays_uniform() {
    let image = Image::filled(Vec2::new(32, 32), [10, 20, 30]);
    let zoomed = apply_zoom(image, 2.0).unwrap();
    let expected = [10u8, 20, 30];
    assert!(
        zoomed
            .data
            .chunks(3)
            .all(|p| p.iter().zip(expected).all(|(a, b)| a.abs_diff(b) <= 1))
    );
}

#[test]
fn test_jpeg_roundtrip_keeps_size() {
    let image = gradient(32, 24);
    let jpeg = encode_jpeg(&image, 85).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    let decoded = decode_image(&jpeg).unwrap();
    assert_eq!(decoded.size, image.size);
}

#[test]
fn test_decode_garbage_fails() {
    assert!(matches!(
        decode_image(&[0, 1, 2, 3]),
        Err(ImageError::Decode(_))
    ));
}

#[test]
fn test_yuyv_gray() {
    // Y=128, U=V=128 is mid gray for both pixels
    let image = yuyv_to_rgb(Vec2::new(2, 1), &[128, 128, 128, 128]).unwrap();
    assert_eq!(image.pixel(0, 0), Some([128, 128, 128]));
    assert_eq!(image.pixel(1, 0), Some([128, 128, 128]));
}

#[test]
fn test_yuyv_short_buffer() {
    assert!(yuyv_to_rgb(Vec2::new(4, 4), &[0; 8]).is_err());
}

#[test]
fn test_draw_rect_outline() {
    let mut image = Image::zeros(Vec2::new(20, 20));
    let rect = Rect::new(Vec2::new(5, 5), Vec2::new(10, 10));
    draw_rect(&mut image, rect, [255, 0, 0], 2);
    assert_eq!(image.pixel(5, 5), Some([255, 0, 0]));
    assert_eq!(image.pixel(14, 14), Some([255, 0, 0]));
    assert_eq!(image.pixel(10, 10), Some([0, 0, 0]));
    assert_eq!(image.pixel(4, 4), Some([0, 0, 0]));
}

#[test]
fn test_draw_clips_outside_frame() {
    let mut image = Image::zeros(Vec2::new(10, 10));
    let rect = Rect::new(Vec2::new(-20, -20), Vec2::new(100, 100));
    fill_rect(&mut image, rect, [1, 1, 1]);
    assert!(image.data.iter().all(|v| *v == 1));
}

#[test]
fn test_text_size_and_draw() {
    assert_eq!(text_size("AB", 2), Vec2::new(22, 14));
    assert_eq!(text_size("", 2), Vec2::new(0, 0));

    let mut image = Image::zeros(Vec2::new(40, 20));
    draw_text(&mut image, Vec2::new(1, 1), "H", 1, [0, 255, 0]);
    // left stem of H
    assert_eq!(image.pixel(1, 1), Some([0, 255, 0]));
    // H is hollow at the top center
    assert_eq!(image.pixel(3, 1), Some([0, 0, 0]));
}

#[test]
fn test_resize() {
    let resized = resize(&gradient(64, 48), Vec2::new(16, 12)).unwrap();
    assert_eq!(resized.size, Vec2::new(16, 12));
    assert_eq!(resized.data.len(), 16 * 12 * 3);
}
