//! Real-time sign recognition stream.
//!
//! A [`Pipeline`] owns a camera and a recognition stage. While running, a
//! dedicated `camera` thread reads frames, applies the current zoom, runs the
//! stage, draws the overlay, encodes JPEG and publishes the result into a
//! single-slot [`FrameBuffer`] that any number of readers poll.

pub mod buffer;
pub mod capture;
pub mod error;
pub mod pipeline;
pub mod recognizer;
pub mod settings;
pub mod stage;
pub mod window;

pub use buffer::FrameBuffer;
pub use capture::LoopConfig;
pub use error::StreamError;
pub use pipeline::{
    DEFAULT_STOP_TIMEOUT, Pipeline, PipelineStatus, StartOutcome, StopOutcome, StreamState,
};
pub use recognizer::{RecognitionOutcome, RecognizerConfig, TemporalRecognizer};
pub use settings::{Settings, SettingsError, SettingsErrorReason, SettingsStore};
pub use stage::{LetterStage, Recognition, RecognitionStage, SignStage};
pub use window::SlidingWindow;
