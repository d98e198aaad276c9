use crate::{FrameBuffer, Recognition, RecognitionStage, SettingsStore, StreamError};
use asl_camera::{CameraInfo, FrameSource};
use asl_image::{Image, apply_zoom, encode_jpeg};
use bytes::Bytes;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use std::time::Duration;

/// Tuning of the capture loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Pause after a failed read before trying again.
    pub read_retry_delay: Duration,
    pub jpeg_quality: u8,
    /// Log the frame count every this many frames.
    pub frame_log_interval: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            read_retry_delay: Duration::from_millis(100),
            jpeg_quality: 85,
            frame_log_interval: 100,
        }
    }
}

impl LoopConfig {
    pub fn with_read_retry_delay(mut self, delay: Duration) -> Self {
        self.read_retry_delay = delay;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn with_frame_log_interval(mut self, interval: u64) -> Self {
        self.frame_log_interval = interval;
        self
    }
}

/// State shared between the pipeline handle and the capture thread.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub settings: SettingsStore,
    pub frames: FrameBuffer,
    pub recognition: Mutex<Recognition>,
    pub frame_count: AtomicU64,
    pub camera_info: Mutex<Option<CameraInfo>>,
}

impl Shared {
    pub fn set_recognition(&self, recognition: Recognition) {
        *self.recognition.lock().unwrap_or_else(|e| e.into_inner()) = recognition;
    }

    pub fn recognition(&self) -> Recognition {
        self.recognition
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_camera_info(&self, info: Option<CameraInfo>) {
        *self.camera_info.lock().unwrap_or_else(|e| e.into_inner()) = info;
    }

    pub fn camera_info(&self) -> Option<CameraInfo> {
        *self.camera_info.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

/// The body of the `camera` thread.
pub(crate) struct CaptureLoop {
    pub source: Box<dyn FrameSource>,
    pub stage: Box<dyn RecognitionStage>,
    pub shared: Arc<Shared>,
    pub running: Arc<AtomicBool>,
    pub config: LoopConfig,
}

impl CaptureLoop {
    /// Run until `running` is cleared, then hand the camera and stage back.
    pub fn run(mut self) -> (Box<dyn FrameSource>, Box<dyn RecognitionStage>) {
        log::info!("==================================");
        log::info!("Camera thread started");
        log::info!("==================================");

        while self.running.load(Ordering::Acquire) {
            let Some(frame) = self.source.read() else {
                log::error!("Failed to read frame from camera");
                std::thread::sleep(self.config.read_retry_delay);
                continue;
            };

            // a panicking stage costs one frame, not the camera
            match panic::catch_unwind(AssertUnwindSafe(|| self.process(frame))) {
                Ok(Ok(jpeg)) => {
                    self.shared.frames.publish(jpeg);
                    let count = self.shared.frame_count.fetch_add(1, Ordering::AcqRel) + 1;
                    let interval = self.config.frame_log_interval;
                    if interval > 0 && count % interval == 0 {
                        log::debug!("Processed {} frames", count);
                    }
                }
                Ok(Err(err)) => log::error!("Error processing frame: {}", err),
                Err(payload) => {
                    log::error!("Frame processing panicked: {}", panic_message(&*payload))
                }
            }
        }

        log::info!("==================================");
        log::info!("Camera thread stopped");
        log::info!("==================================");
        (self.source, self.stage)
    }

    // zoom, recognize, overlay, encode; the recognition snapshot is updated
    // only when the frame makes it all the way through
    fn process(&mut self, frame: Image) -> Result<Bytes, StreamError> {
        let settings = self.shared.settings.snapshot();
        let mut frame = apply_zoom(frame, settings.zoom_factor)?;
        let recognition = self.stage.process(&mut frame, &settings)?;
        let jpeg = encode_jpeg(&frame, self.config.jpeg_quality)?;
        self.shared.set_recognition(recognition);
        Ok(Bytes::from(jpeg))
    }
}
