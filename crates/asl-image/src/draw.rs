use crate::{Color, Image, font};
use asl_base::{Rect, Vec2};

/// Outline a rectangle, `thickness` pixels wide, growing inward.
///
/// Parts outside the frame are clipped.
pub fn draw_rect(image: &mut Image, rect: Rect<i32>, color: Color, thickness: i32) {
    let t = thickness.max(1);
    let min = rect.min();
    let max = rect.max();
    // top, bottom, left, right
    fill_rect(image, Rect::from_min_max(min, Vec2::new(max.x, min.y + t)), color);
    fill_rect(image, Rect::from_min_max(Vec2::new(min.x, max.y - t), max), color);
    fill_rect(image, Rect::from_min_max(min, Vec2::new(min.x + t, max.y)), color);
    fill_rect(image, Rect::from_min_max(Vec2::new(max.x - t, min.y), max), color);
}

/// Fill a rectangle, clipped to the frame.
pub fn fill_rect(image: &mut Image, rect: Rect<i32>, color: Color) {
    let min = rect.min();
    let max = rect.max();
    let x0 = min.x.max(0);
    let y0 = min.y.max(0);
    let x1 = max.x.min(image.width() as i32);
    let y1 = max.y.min(image.height() as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// Size in pixels of `text` rendered at `scale`.
pub fn text_size(text: &str, scale: i32) -> Vec2<i32> {
    let scale = scale.max(1);
    let count = text.chars().count() as i32;
    if count == 0 {
        return Vec2::new(0, 0);
    }
    Vec2::new(
        (count * font::ADVANCE - 1) * scale,
        font::GLYPH_HEIGHT * scale,
    )
}

/// Render `text` with its top-left corner at `origin`.
pub fn draw_text(image: &mut Image, origin: Vec2<i32>, text: &str, scale: i32, color: Color) {
    let scale = scale.max(1);
    let mut pen = origin.x;
    for c in text.chars() {
        let rows = font::glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..font::GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let x = pen + col * scale;
                let y = origin.y + row as i32 * scale;
                fill_rect(
                    image,
                    Rect::new(Vec2::new(x, y), Vec2::new(scale, scale)),
                    color,
                );
            }
        }
        pen += font::ADVANCE * scale;
    }
}
