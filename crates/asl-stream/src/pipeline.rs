use crate::capture::{CaptureLoop, Shared};
use crate::{LoopConfig, Recognition, RecognitionStage, Settings, SettingsStore, StreamError};
use asl_camera::{CameraInfo, FrameSource};
use bytes::Bytes;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
    mpsc,
};
use std::thread::JoinHandle;
use std::time::Duration;

/// How long `stop` and `Drop` wait for the capture thread by default.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Stopped,
    Running,
    /// Stop was requested but the capture thread has not exited yet. The
    /// camera is still held.
    Stopping,
}

impl StreamState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamState::Stopped => "stopped",
            StreamState::Running => "running",
            StreamState::Stopping => "stopping",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The capture thread exited and the camera was released.
    Stopped,
    /// Stop was requested; the thread has not exited yet.
    Stopping,
    NotRunning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineStatus {
    pub state: StreamState,
    pub frames_processed: u64,
    pub has_frame: bool,
    pub camera: Option<CameraInfo>,
}

type Parts = (Box<dyn FrameSource>, Box<dyn RecognitionStage>);

// sends on drop, so the waiter also wakes when the thread panics
struct DoneSignal(mpsc::Sender<()>);

impl Drop for DoneSignal {
    fn drop(&mut self) {
        let _ = self.0.send(());
    }
}

struct Worker {
    running: Arc<AtomicBool>,
    done: mpsc::Receiver<()>,
    handle: JoinHandle<Parts>,
}

struct Lifecycle {
    state: StreamState,
    // camera and stage while stopped
    idle: Option<Parts>,
    worker: Option<Worker>,
}

/// The stream: one camera, one recognition stage, one capture thread at a
/// time.
///
/// Lifecycle calls block (spawn, join) and are meant for
/// `spawn_blocking` when called from async code. Readers (`latest_frame`,
/// `recognition`, `status`, `settings`) never wait on the lifecycle.
pub struct Pipeline {
    lifecycle: Mutex<Lifecycle>,
    state: Mutex<StreamState>,
    shared: Arc<Shared>,
    config: LoopConfig,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn FrameSource>,
        stage: Box<dyn RecognitionStage>,
        settings: Settings,
        config: LoopConfig,
    ) -> Self {
        let shared = Shared {
            settings: SettingsStore::new(settings),
            ..Default::default()
        };
        Self {
            lifecycle: Mutex::new(Lifecycle {
                state: StreamState::Stopped,
                idle: Some((source, stage)),
                worker: None,
            }),
            state: Mutex::new(StreamState::Stopped),
            shared: Arc::new(shared),
            config,
        }
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, lifecycle: &mut Lifecycle, state: StreamState) {
        lifecycle.state = state;
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Open camera `device_index` and start the capture thread.
    ///
    /// Starting a running stream is a no-op. While a previous stop is still
    /// pending the camera is held, so this fails with `StreamError::Busy`.
    pub fn start(&self, device_index: usize) -> Result<StartOutcome, StreamError> {
        let mut lifecycle = self.lock_lifecycle();
        match lifecycle.state {
            StreamState::Running => return Ok(StartOutcome::AlreadyRunning),
            StreamState::Stopping => {
                // the thread may have exited since the stop timed out
                if let Err(StreamError::Timeout) =
                    self.wait_for_worker(&mut lifecycle, Duration::ZERO)
                {
                    return Err(StreamError::Busy);
                }
            }
            StreamState::Stopped => {}
        }

        let (mut source, mut stage) = lifecycle.idle.take().ok_or_else(|| {
            StreamError::Thread("camera was lost by a crashed capture thread".to_string())
        })?;

        if let Err(err) = source.open(device_index) {
            log::error!("Failed to open camera {}: {}", device_index, err);
            lifecycle.idle = Some((source, stage));
            return Err(StreamError::Device(err));
        }

        stage.reset();
        self.shared.set_recognition(Recognition::default());
        self.shared.frame_count.store(0, Ordering::Release);
        self.shared.set_camera_info(source.info());

        let running = Arc::new(AtomicBool::new(true));
        let (done_tx, done) = mpsc::channel();
        let capture = CaptureLoop {
            source,
            stage,
            shared: Arc::clone(&self.shared),
            running: Arc::clone(&running),
            config: self.config,
        };

        let handle = std::thread::Builder::new()
            .name("camera".to_string())
            .spawn(move || {
                let _done = DoneSignal(done_tx);
                capture.run()
            })
            .map_err(|e| {
                self.shared.set_camera_info(None);
                StreamError::Thread(e.to_string())
            })?;

        lifecycle.worker = Some(Worker {
            running,
            done,
            handle,
        });
        self.set_state(&mut lifecycle, StreamState::Running);
        log::info!("Stream started on camera {}", device_index);
        Ok(StartOutcome::Started)
    }

    /// Ask the capture thread to exit after its current iteration.
    pub fn request_stop(&self) -> StopOutcome {
        let mut lifecycle = self.lock_lifecycle();
        self.request_stop_locked(&mut lifecycle)
    }

    fn request_stop_locked(&self, lifecycle: &mut Lifecycle) -> StopOutcome {
        match lifecycle.state {
            StreamState::Stopped => StopOutcome::NotRunning,
            StreamState::Stopping => StopOutcome::Stopping,
            StreamState::Running => {
                log::info!("Stopping camera");
                if let Some(worker) = &lifecycle.worker {
                    worker.running.store(false, Ordering::Release);
                }
                self.set_state(lifecycle, StreamState::Stopping);
                StopOutcome::Stopping
            }
        }
    }

    /// Wait up to `timeout` for a stopping capture thread to exit.
    ///
    /// On exit the camera is closed, the published frame and detections are
    /// cleared and the state becomes `Stopped`. On timeout the state stays
    /// `Stopping`. Returns immediately when already stopped, and with
    /// `StreamError::Busy` when the stream is running.
    pub fn await_termination(&self, timeout: Duration) -> Result<(), StreamError> {
        let mut lifecycle = self.lock_lifecycle();
        match lifecycle.state {
            StreamState::Stopped => Ok(()),
            StreamState::Running => Err(StreamError::Busy),
            StreamState::Stopping => self.wait_for_worker(&mut lifecycle, timeout),
        }
    }

    fn wait_for_worker(
        &self,
        lifecycle: &mut Lifecycle,
        timeout: Duration,
    ) -> Result<(), StreamError> {
        let Some(worker) = lifecycle.worker.take() else {
            self.set_state(lifecycle, StreamState::Stopped);
            return Ok(());
        };

        match worker.done.recv_timeout(timeout) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => {}
            Err(mpsc::RecvTimeoutError::Timeout) => {
                log::warn!("Camera thread did not stop within {:?}", timeout);
                lifecycle.worker = Some(worker);
                return Err(StreamError::Timeout);
            }
        }

        let result = match worker.handle.join() {
            Ok((mut source, stage)) => {
                source.close();
                lifecycle.idle = Some((source, stage));
                Ok(())
            }
            Err(_) => {
                log::error!("Camera thread panicked");
                Err(StreamError::Thread("capture thread panicked".to_string()))
            }
        };

        self.shared.frames.clear();
        self.shared.set_camera_info(None);
        {
            let mut recognition = self
                .shared
                .recognition
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            recognition.detections.clear();
        }
        self.set_state(lifecycle, StreamState::Stopped);
        log::info!("Camera stopped");
        result
    }

    /// `request_stop` then `await_termination`.
    pub fn stop(&self, timeout: Duration) -> Result<StopOutcome, StreamError> {
        let mut lifecycle = self.lock_lifecycle();
        if self.request_stop_locked(&mut lifecycle) == StopOutcome::NotRunning {
            return Ok(StopOutcome::NotRunning);
        }
        self.wait_for_worker(&mut lifecycle, timeout)?;
        Ok(StopOutcome::Stopped)
    }

    pub fn state(&self) -> StreamState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_running(&self) -> bool {
        self.state() == StreamState::Running
    }

    pub fn status(&self) -> PipelineStatus {
        PipelineStatus {
            state: self.state(),
            frames_processed: self.shared.frame_count.load(Ordering::Acquire),
            has_frame: self.shared.frames.has_frame(),
            camera: self.shared.camera_info(),
        }
    }

    /// The most recent encoded frame, if any.
    pub fn latest_frame(&self) -> Option<Bytes> {
        self.shared.frames.get()
    }

    pub fn recognition(&self) -> Recognition {
        self.shared.recognition()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.shared.settings
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        if let Err(err) = self.stop(DEFAULT_STOP_TIMEOUT) {
            log::error!("Failed to stop camera on shutdown: {}", err);
        }
    }
}
