use crate::InferError;
use asl_base::Rect;
use asl_image::Image;

/// Labels A through Z, in class-id order.
pub fn default_letter_labels() -> Vec<String> {
    ('A'..='Z').map(|c| c.to_string()).collect()
}

/// Label for a class id, `Class_{id}` past the end of the list.
pub fn label_for(labels: &[String], index: usize) -> String {
    labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("Class_{index}"))
}

/// One detected hand shape in frame pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
    pub bbox: Rect<i32>,
}

/// Finds static letter hand shapes in a single frame.
pub trait LetterDetector: Send {
    /// Detections with confidence at or above `threshold`, best first.
    fn detect(&mut self, image: &Image, threshold: f32) -> Result<Vec<Detection>, InferError>;
}
