use asl_base::Vec2;
use std::time::Duration;

/// Pixel formats the capture path can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Motion JPEG, decoded per frame.
    Mjpeg,
    /// Packed 4:2:2, converted to RGB with BT.601.
    Yuyv,
}

impl PixelFormat {
    pub fn fourcc(&self) -> [u8; 4] {
        match self {
            PixelFormat::Mjpeg => *b"MJPG",
            PixelFormat::Yuyv => *b"YUYV",
        }
    }

    pub fn from_fourcc(fourcc: &[u8; 4]) -> Option<Self> {
        match fourcc {
            b"MJPG" => Some(PixelFormat::Mjpeg),
            b"YUYV" => Some(PixelFormat::Yuyv),
            _ => None,
        }
    }

    /// The format to ask for when the driver refuses this one.
    pub fn fallback(&self) -> Self {
        match self {
            PixelFormat::Mjpeg => PixelFormat::Yuyv,
            PixelFormat::Yuyv => PixelFormat::Mjpeg,
        }
    }
}

/// What to ask the camera for. The driver may settle on something else; the
/// source reports the negotiated values through `FrameSource::info`.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    size: Vec2<u32>,
    fps: u32,
    buffer_count: u32,
    preferred_format: PixelFormat,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(640, 480),
            fps: 30,
            buffer_count: 4,
            preferred_format: PixelFormat::Mjpeg,
        }
    }
}

impl CameraConfig {
    pub fn with_width(mut self, width: u32) -> Self {
        self.size.x = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.size.y = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Number of mmap buffers in the V4L2 capture stream.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn with_preferred_format(mut self, format: PixelFormat) -> Self {
        self.preferred_format = format;
        self
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// Requested frame size in pixels.
    pub fn frame_size(&self) -> Vec2<usize> {
        Vec2::new(self.size.x as usize, self.size.y as usize)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time between two frames, `None` for fps 0 (unpaced).
    pub fn frame_period(&self) -> Option<Duration> {
        (self.fps > 0).then(|| Duration::from_secs_f64(1.0 / self.fps as f64))
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    pub fn preferred_format(&self) -> PixelFormat {
        self.preferred_format
    }
}
