use crate::{Args, Mode, ServerError};
use asl_camera::{CameraConfig, FrameSource, SyntheticCamera};
use asl_infer::{
    LandmarkExtractor, NoLandmarks, OnnxLandmarkExtractor, OnnxLetterDetector, OnnxSignClassifier,
};
use asl_stream::{
    LetterStage, LoopConfig, Pipeline, RecognitionStage, RecognizerConfig, Settings, SignStage,
};
use std::sync::Arc;
use std::time::Duration;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub camera_index: usize,
    pub stop_timeout: Duration,
    pub mode: Mode,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, args: &Args) -> Self {
        Self {
            pipeline,
            camera_index: args.camera_index,
            stop_timeout: args.stop_timeout(),
            mode: args.mode,
        }
    }
}

fn build_source(args: &Args) -> Result<Box<dyn FrameSource>, ServerError> {
    let config = CameraConfig::default()
        .with_width(args.camera_width)
        .with_height(args.camera_height)
        .with_fps(args.camera_fps);

    if args.synthetic {
        log::info!("Using synthetic camera");
        return Ok(Box::new(SyntheticCamera::new(config)));
    }

    #[cfg(feature = "v4l2")]
    {
        Ok(Box::new(asl_camera::V4l2Camera::new(config)))
    }
    #[cfg(not(feature = "v4l2"))]
    {
        Err(ServerError::Config(
            "built without camera support, run with --synthetic".to_string(),
        ))
    }
}

fn build_stage(args: &Args) -> Result<Box<dyn RecognitionStage>, ServerError> {
    let labels = args.labels();
    match args.mode {
        Mode::Sign => {
            let extractor: Box<dyn LandmarkExtractor> = match &args.landmark_model {
                Some(path) => Box::new(OnnxLandmarkExtractor::new(path)?),
                None => {
                    log::warn!("No landmark model given, features will be all zeros");
                    Box::new(NoLandmarks)
                }
            };
            let classifier = OnnxSignClassifier::new(&args.model, labels)?;
            Ok(Box::new(SignStage::new(
                extractor,
                Box::new(classifier),
                RecognizerConfig::default(),
            )))
        }
        Mode::Letters => {
            let detector = OnnxLetterDetector::new(&args.model, labels)?;
            Ok(Box::new(LetterStage::new(Box::new(detector))))
        }
    }
}

/// Camera, models and settings from the command line.
pub fn build_pipeline(args: &Args) -> Result<Pipeline, ServerError> {
    let settings = Settings::new(args.threshold, args.zoom)?;
    let source = build_source(args)?;
    let stage = build_stage(args)?;
    Ok(Pipeline::new(source, stage, settings, LoopConfig::default()))
}
