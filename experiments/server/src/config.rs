use asl_base::log::LevelFilter;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Dynamic signs from landmark sequences.
    Sign,
    /// Static letters from a single-frame detector.
    Letters,
}

impl Mode {
    pub fn model_type(&self) -> &'static str {
        match self {
            Mode::Sign => "Sign sequence classifier",
            Mode::Letters => "YOLO ASL Letters",
        }
    }
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Real-time sign language recognition stream", long_about = None)]
pub struct Args {
    #[arg(long, env = "ASL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "ASL_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Camera index, `/dev/video{index}`.
    #[arg(long, env = "ASL_CAMERA_INDEX", default_value_t = 0)]
    pub camera_index: usize,

    #[arg(long, env = "ASL_CAMERA_WIDTH", default_value_t = 640)]
    pub camera_width: u32,

    #[arg(long, env = "ASL_CAMERA_HEIGHT", default_value_t = 480)]
    pub camera_height: u32,

    #[arg(long, env = "ASL_CAMERA_FPS", default_value_t = 30)]
    pub camera_fps: u32,

    #[arg(long, env = "ASL_MODE", value_enum, default_value_t = Mode::Sign)]
    pub mode: Mode,

    /// ONNX model: sign classifier or letter detector, depending on mode.
    #[arg(long, env = "ASL_MODEL")]
    pub model: PathBuf,

    /// Class labels in model order. Defaults to the bundled label set of the mode.
    #[arg(long, env = "ASL_LABELS", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Holistic landmark ONNX model. Without it sign mode sees all-zero landmarks.
    #[arg(long, env = "ASL_LANDMARK_MODEL")]
    pub landmark_model: Option<PathBuf>,

    #[arg(long, env = "ASL_THRESHOLD", default_value_t = 0.5)]
    pub threshold: f32,

    #[arg(long, env = "ASL_ZOOM", default_value_t = 1.0)]
    pub zoom: f32,

    /// How long to wait for the camera thread on stop, in milliseconds.
    #[arg(long, env = "ASL_STOP_TIMEOUT_MS", default_value_t = 2000)]
    pub stop_timeout_ms: u64,

    #[arg(long, env = "ASL_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Write daily log files here instead of stdout.
    #[arg(long, env = "ASL_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Use a generated test pattern instead of a camera.
    #[arg(long, env = "ASL_SYNTHETIC")]
    pub synthetic: bool,
}

impl Args {
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured labels, or the default set of the mode.
    pub fn labels(&self) -> Vec<String> {
        if !self.labels.is_empty() {
            return self.labels.clone();
        }
        match self.mode {
            Mode::Sign => asl_infer::default_sign_labels(),
            Mode::Letters => asl_infer::default_letter_labels(),
        }
    }
}
