//! Model adapters behind the recognition stage.
//!
//! The stream only talks to the three traits here: a landmark extractor that
//! turns a frame into body/hand/face keypoints, a sign classifier that turns a
//! window of keypoint vectors into a class distribution, and a letter detector
//! that finds static hand shapes in a single frame. The ONNX implementations
//! run on the CPU execution provider.

pub mod classifier;
pub mod detector;
pub mod error;
pub mod landmarks;
pub mod onnx;

pub use classifier::{Prediction, SignClassifier, default_sign_labels};
pub use detector::{Detection, LetterDetector, default_letter_labels, label_for};
pub use error::InferError;
pub use landmarks::{FEATURE_LEN, FeatureVector, LandmarkExtractor, Landmarks, NoLandmarks};
pub use onnx::{OnnxLandmarkExtractor, OnnxLetterDetector, OnnxSignClassifier};
