use crate::{FeatureVector, InferError, label_for};

/// Class labels of the bundled sign model.
pub fn default_sign_labels() -> Vec<String> {
    ["hello", "thanks", "iloveyou"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Classifies a full window of feature vectors into one of `labels()`.
pub trait SignClassifier: Send {
    /// Class distribution for `window`, one probability per label.
    fn classify(&mut self, window: &[FeatureVector]) -> Result<Vec<f32>, InferError>;

    fn labels(&self) -> &[String];
}

/// The winning class of one classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    /// Argmax of `distribution`; ties go to the lowest index.
    ///
    /// Returns `None` for an empty distribution. NaN scores never win.
    pub fn from_distribution(distribution: &[f32], labels: &[String]) -> Option<Self> {
        let mut best: Option<(usize, f32)> = None;
        for (index, &score) in distribution.iter().enumerate() {
            if score.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }
        let (index, confidence) = best?;
        Some(Self {
            index,
            label: label_for(labels, index),
            confidence,
        })
    }
}
