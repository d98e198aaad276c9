use super::{load_session, run_single};
use crate::{FeatureVector, InferError, SignClassifier};
use ndarray::Array3;
use ort::session::Session;
use std::path::Path;

/// Sequence classifier over a window of feature vectors.
///
/// Input `[1, T, F]` (T frames of F features), output `[1, N]` with one score
/// per label.
pub struct OnnxSignClassifier {
    session: Session,
    labels: Vec<String>,
}

impl OnnxSignClassifier {
    pub fn new(model_path: impl AsRef<Path>, labels: Vec<String>) -> Result<Self, InferError> {
        let session = load_session(model_path.as_ref())?;
        Ok(Self { session, labels })
    }
}

impl SignClassifier for OnnxSignClassifier {
    fn classify(&mut self, window: &[FeatureVector]) -> Result<Vec<f32>, InferError> {
        let features = window.first().map(|v| v.len()).unwrap_or(0);
        if features == 0 || window.iter().any(|v| v.len() != features) {
            return Err(InferError::Shape(format!(
                "window of {} frames has ragged or empty feature vectors",
                window.len()
            )));
        }

        let data: Vec<f32> = window.iter().flatten().copied().collect();
        let input = Array3::from_shape_vec((1, window.len(), features), data)?;
        let output = run_single(&mut self.session, input.into_dyn())?;

        let shape = output.shape();
        if shape.len() != 2 || shape[0] != 1 {
            return Err(InferError::Shape(format!(
                "expected [1, N] output, got {:?}",
                shape
            )));
        }
        if shape[1] != self.labels.len() {
            log::warn!(
                "model outputs {} classes but {} labels are configured",
                shape[1],
                self.labels.len()
            );
        }
        Ok(output.iter().copied().collect())
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
