//! ONNX Runtime adapters, CPU execution provider only.

mod landmarks;
mod letters;
mod sign;

pub use landmarks::OnnxLandmarkExtractor;
pub use letters::{LETTER_INPUT_SIZE, Letterbox, OnnxLetterDetector, decode_detections, letterbox};
pub use sign::OnnxSignClassifier;

use crate::InferError;
use ndarray::ArrayD;
use ort::{inputs, session::Session, value::TensorRef};
use std::path::Path;

pub(crate) fn load_session(path: &Path) -> Result<Session, InferError> {
    let mut builder = Session::builder().map_err(|e| {
        InferError::ModelLoad(format!("failed to create session builder: {}", e))
    })?;
    let session = builder.commit_from_file(path).map_err(|e| {
        InferError::ModelLoad(format!("failed to load {}: {}", path.display(), e))
    })?;
    log::info!("loaded ONNX model {}", path.display());
    Ok(session)
}

/// Run a single-input, single-output model.
pub(crate) fn run_single(
    session: &mut Session,
    input: ArrayD<f32>,
) -> Result<ArrayD<f32>, InferError> {
    let tensor_ref = TensorRef::from_array_view(input.view())
        .map_err(|e| InferError::Runtime(format!("failed to create tensor ref: {}", e)))?;
    let outputs = session
        .run(inputs![tensor_ref])
        .map_err(|e| InferError::Runtime(format!("inference failed: {}", e)))?;
    let array = outputs[0]
        .try_extract_array::<f32>()
        .map_err(|e| InferError::Runtime(format!("output is not f32: {}", e)))?;
    Ok(array.to_owned())
}
