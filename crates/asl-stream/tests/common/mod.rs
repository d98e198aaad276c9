#![allow(dead_code)]

use asl_base::Vec2;
use asl_camera::{CameraError, CameraInfo, FrameSource};
use asl_image::Image;
use asl_infer::{
    Detection, FeatureVector, InferError, LandmarkExtractor, Landmarks, LetterDetector,
    SignClassifier,
};
use std::collections::VecDeque;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Classifier that replays a list of distributions, repeating the last one.
pub struct ScriptedClassifier {
    pub labels: Vec<String>,
    pub script: VecDeque<Result<Vec<f32>, String>>,
    last: Vec<f32>,
}

impl ScriptedClassifier {
    pub fn new(labels: &[&str], script: Vec<Result<Vec<f32>, String>>) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            script: script.into(),
            last: Vec::new(),
        }
    }

    /// Always answers `distribution`.
    pub fn constant(labels: &[&str], distribution: Vec<f32>) -> Self {
        let mut classifier = Self::new(labels, Vec::new());
        classifier.last = distribution;
        classifier
    }

    /// One-hot answers for a sequence of class indices.
    pub fn indices(labels: &[&str], indices: &[usize], confidence: f32) -> Self {
        let script = indices
            .iter()
            .map(|&i| {
                let rest = (1.0 - confidence) / (labels.len() - 1) as f32;
                let mut distribution = vec![rest; labels.len()];
                distribution[i] = confidence;
                Ok(distribution)
            })
            .collect();
        Self::new(labels, script)
    }
}

impl SignClassifier for ScriptedClassifier {
    fn classify(&mut self, window: &[FeatureVector]) -> Result<Vec<f32>, InferError> {
        assert!(!window.is_empty());
        match self.script.pop_front() {
            Some(Ok(distribution)) => {
                self.last = distribution.clone();
                Ok(distribution)
            }
            Some(Err(msg)) => Err(InferError::Runtime(msg)),
            None => Ok(self.last.clone()),
        }
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Extractor that reports one hand in the middle of the frame.
pub struct HandInMiddle;

impl LandmarkExtractor for HandInMiddle {
    fn extract(&mut self, _image: &Image) -> Result<Landmarks, InferError> {
        Ok(Landmarks {
            right_hand: Some(vec![[0.4, 0.4, 0.0], [0.6, 0.6, 0.0]]),
            ..Default::default()
        })
    }
}

/// Extractor whose hand points lie far outside the frame on both sides.
pub struct OffscreenHand;

impl LandmarkExtractor for OffscreenHand {
    fn extract(&mut self, _image: &Image) -> Result<Landmarks, InferError> {
        Ok(Landmarks {
            right_hand: Some(vec![[-1e9, 0.5, 0.0], [1e9, 0.5, 0.0]]),
            ..Default::default()
        })
    }
}

pub struct FixedDetector(pub Vec<Detection>);

impl LetterDetector for FixedDetector {
    fn detect(&mut self, _image: &Image, threshold: f32) -> Result<Vec<Detection>, InferError> {
        Ok(self
            .0
            .iter()
            .filter(|d| d.confidence >= threshold)
            .cloned()
            .collect())
    }
}

/// Source yielding `frames` gray frames, then failing reads.
pub struct StubSource {
    pub frames: usize,
    pub size: Vec2<usize>,
    pub fail_open: bool,
    pub opened: Arc<AtomicBool>,
    served: usize,
}

impl StubSource {
    pub fn new(frames: usize) -> Self {
        Self {
            frames,
            size: Vec2::new(64, 48),
            fail_open: false,
            opened: Arc::new(AtomicBool::new(false)),
            served: 0,
        }
    }

    pub fn endless() -> Self {
        Self::new(usize::MAX)
    }

    pub fn failing() -> Self {
        let mut source = Self::new(0);
        source.fail_open = true;
        source
    }
}

impl FrameSource for StubSource {
    fn open(&mut self, index: usize) -> Result<(), CameraError> {
        if self.fail_open {
            return Err(CameraError::Device(format!("no camera at index {index}")));
        }
        self.served = 0;
        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn read(&mut self) -> Option<Image> {
        if !self.opened.load(Ordering::SeqCst) || self.served >= self.frames {
            std::thread::sleep(std::time::Duration::from_millis(1));
            return None;
        }
        self.served += 1;
        std::thread::sleep(std::time::Duration::from_millis(1));
        Some(Image::filled(self.size, [90, 90, 90]))
    }

    fn close(&mut self) {
        self.opened.store(false, Ordering::SeqCst);
    }

    fn info(&self) -> Option<CameraInfo> {
        self.opened.load(Ordering::SeqCst).then_some(CameraInfo {
            width: self.size.x as u32,
            height: self.size.y as u32,
            fps: 30.0,
        })
    }
}

pub fn wait_until(timeout_ms: u64, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = std::time::Instant::now() + std::time::Duration::from_millis(timeout_ms);
    while std::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    condition()
}
