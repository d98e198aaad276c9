use crate::{CameraConfig, CameraError, CameraInfo, FrameSource, PixelFormat};
use asl_base::Vec2;
use asl_image::Image;
use v4l::{
    Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
    io::traits::CaptureStream, video::Capture,
};

/// V4L2 camera, `/dev/video{index}`.
///
/// Asks for the preferred pixel format of the config (MJPEG by default) and
/// falls back to the other one when the driver refuses it.
pub struct V4l2Camera {
    config: CameraConfig,
    stream: Option<MmapStream<'static>>,
    format: PixelFormat,
    size: Vec2<usize>,
    fps: f32,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("stream", &self.stream.is_some())
            .field("format", &self.format)
            .field("size", &self.size)
            .finish()
    }
}

impl V4l2Camera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            format: config.preferred_format(),
            config,
            stream: None,
            size: Vec2::new(0, 0),
            fps: 0.0,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    fn negotiate_format(&mut self, device: &Device) -> Result<(), CameraError> {
        let (width, height) = (self.config.width(), self.config.height());
        let preferred = self.config.preferred_format();

        let request = |format: PixelFormat| {
            Capture::set_format(device, &Format::new(width, height, FourCC::new(&format.fourcc())))
        };
        let mut actual = request(preferred)?;
        if PixelFormat::from_fourcc(&actual.fourcc.repr) != Some(preferred) {
            log::warn!("camera refused {:?}, trying {:?}", preferred, preferred.fallback());
            actual = request(preferred.fallback())?;
        }

        self.format = PixelFormat::from_fourcc(&actual.fourcc.repr).ok_or_else(|| {
            CameraError::Device(format!("no supported pixel format (got {})", actual.fourcc))
        })?;
        // the driver may pick a different resolution than requested
        self.size = Vec2::new(actual.width as usize, actual.height as usize);
        Ok(())
    }

    fn decode(&self, data: &[u8]) -> Result<Image, CameraError> {
        let image = match self.format {
            PixelFormat::Mjpeg => asl_image::decode_image(data)?,
            PixelFormat::Yuyv => asl_image::yuyv_to_rgb(self.size, data)?,
        };
        Ok(image)
    }
}

impl FrameSource for V4l2Camera {
    fn open(&mut self, index: usize) -> Result<(), CameraError> {
        self.close();

        let device = Device::new(index)?;
        self.negotiate_format(&device)?;

        let params = Capture::set_params(
            &device,
            &v4l::video::capture::Parameters::with_fps(self.config.fps()),
        )?;
        self.fps = params.interval.denominator as f32 / params.interval.numerator.max(1) as f32;

        let stream =
            MmapStream::with_buffers(&device, Type::VideoCapture, self.config.buffer_count())
                .map_err(|e| CameraError::Stream(e.to_string()))?;
        self.stream = Some(stream);

        log::info!(
            "opened /dev/video{}: {}x{} {:?} @ {} fps",
            index,
            self.size.x,
            self.size.y,
            self.format,
            self.fps
        );
        Ok(())
    }

    fn read(&mut self) -> Option<Image> {
        let stream = self.stream.as_mut()?;
        let data = match CaptureStream::next(stream) {
            Ok((data, _metadata)) => data.to_vec(),
            Err(e) => {
                log::error!("camera read failed: {}", e);
                return None;
            }
        };
        match self.decode(&data) {
            Ok(image) => Some(image),
            Err(e) => {
                log::error!("camera frame dropped: {}", e);
                None
            }
        }
    }

    fn close(&mut self) {
        self.stream.take();
    }

    fn info(&self) -> Option<CameraInfo> {
        self.stream.as_ref().map(|_| CameraInfo {
            width: self.size.x as u32,
            height: self.size.y as u32,
            fps: self.fps,
        })
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.close();
    }
}
