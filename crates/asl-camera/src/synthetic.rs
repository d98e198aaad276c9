use crate::{CameraConfig, CameraError, CameraInfo, FrameSource};
use asl_base::{Rect, Vec2};
use asl_image::{Image, fill_rect};
use std::time::Instant;

const BAR_WIDTH: i32 = 40;
const BAR_STEP: i32 = 8;

/// Test pattern source for running without a camera.
///
/// Produces a vertical gradient with a bright bar sweeping left to right, one
/// step per frame. Frames are paced to the configured fps unless pacing is
/// switched off.
pub struct SyntheticCamera {
    config: CameraConfig,
    paced: bool,
    open: bool,
    frame_index: u64,
    last_frame: Option<Instant>,
}

impl SyntheticCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            paced: true,
            open: false,
            frame_index: 0,
            last_frame: None,
        }
    }

    /// Deliver frames as fast as they are read.
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    fn render(&self) -> Image {
        let size = self.config.frame_size();
        let (width, height) = (size.x, size.y);
        let mut image = Image::zeros(size);
        for y in 0..height {
            let shade = (y * 200 / height.max(1)) as u8;
            for x in 0..width {
                image.put_pixel(x as i32, y as i32, [shade / 2, shade / 2, shade]);
            }
        }
        let span = width as i32 + BAR_WIDTH;
        let x = (self.frame_index as i32)
            .wrapping_mul(BAR_STEP)
            .rem_euclid(span.max(1))
            - BAR_WIDTH;
        fill_rect(
            &mut image,
            Rect::new(Vec2::new(x, 0), Vec2::new(BAR_WIDTH, height as i32)),
            [240, 240, 240],
        );
        image
    }

    fn wait_for_next_frame(&mut self) {
        let Some(period) = self.config.frame_period().filter(|_| self.paced) else {
            return;
        };
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < period {
                std::thread::sleep(period - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

impl FrameSource for SyntheticCamera {
    fn open(&mut self, index: usize) -> Result<(), CameraError> {
        log::info!(
            "synthetic camera {}: {}x{} @ {} fps",
            index,
            self.config.width(),
            self.config.height(),
            self.config.fps()
        );
        self.open = true;
        self.frame_index = 0;
        self.last_frame = None;
        Ok(())
    }

    fn read(&mut self) -> Option<Image> {
        if !self.open {
            return None;
        }
        self.wait_for_next_frame();
        let image = self.render();
        self.frame_index += 1;
        Some(image)
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn info(&self) -> Option<CameraInfo> {
        self.open.then(|| CameraInfo {
            width: self.config.width(),
            height: self.config.height(),
            fps: self.config.fps() as f32,
        })
    }
}
