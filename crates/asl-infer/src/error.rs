use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    Shape(String),
    Runtime(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Shape(msg) => write!(f, "shape error: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<ort::Error> for InferError {
    fn from(err: ort::Error) -> Self {
        InferError::Runtime(err.to_string())
    }
}

impl From<ndarray::ShapeError> for InferError {
    fn from(err: ndarray::ShapeError) -> Self {
        InferError::Shape(err.to_string())
    }
}

impl From<asl_image::ImageError> for InferError {
    fn from(err: asl_image::ImageError) -> Self {
        InferError::Shape(err.to_string())
    }
}
