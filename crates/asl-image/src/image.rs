use crate::{Color, ImageError};
use asl_base::Vec2;
use crates_image::RgbImage;

/// 8-bit RGB frame, row-major, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
}

impl Image {
    pub const CHANNELS: usize = 3;

    pub fn new(size: Vec2<usize>, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = size.area() * Self::CHANNELS;
        if data.len() != expected {
            return Err(ImageError::Size {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// All-black frame.
    pub fn zeros(size: Vec2<usize>) -> Self {
        Self {
            size,
            data: vec![0u8; size.area() * Self::CHANNELS],
        }
    }

    /// Frame filled with a single color.
    pub fn filled(size: Vec2<usize>, color: Color) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(size.area() * Self::CHANNELS)
            .collect();
        Self { size, data }
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * Self::CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Set one pixel; coordinates outside the frame are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.size.x || y as usize >= self.size.y {
            return;
        }
        let i = (y as usize * self.size.x + x as usize) * Self::CHANNELS;
        self.data[i..i + 3].copy_from_slice(&color);
    }

    pub(crate) fn into_rgb_image(self) -> Result<RgbImage, ImageError> {
        let expected = self.size.area() * Self::CHANNELS;
        let got = self.data.len();
        RgbImage::from_raw(self.size.x as u32, self.size.y as u32, self.data)
            .ok_or(ImageError::Size { expected, got })
    }

    pub(crate) fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            size: Vec2::new(width as usize, height as usize),
            data: image.into_raw(),
        }
    }
}
