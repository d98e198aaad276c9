use super::{load_session, run_single};
use crate::{Detection, InferError, LetterDetector, label_for};
use asl_base::{Rect, Vec2};
use asl_image::Image;
use ndarray::{Array4, ArrayViewD, Ix3};
use ort::session::Session;
use std::path::Path;

/// Square model input side of the letter detector.
pub const LETTER_INPUT_SIZE: usize = 640;

const PAD_VALUE: f32 = 114.0 / 255.0;
const IOU_THRESHOLD: f32 = 0.45;

/// Mapping between frame pixels and letterboxed model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad: Vec2<f32>,
}

impl Letterbox {
    /// Model-space point back to frame pixels.
    pub fn unmap(&self, p: Vec2<f32>) -> Vec2<f32> {
        (p - self.pad) / self.scale
    }
}

/// Resize keeping aspect ratio, center on a gray `target`×`target` canvas,
/// and lay out as NCHW `[1, 3, target, target]` in [0, 1].
pub fn letterbox(image: &Image, target: usize) -> Result<(Array4<f32>, Letterbox), InferError> {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return Err(InferError::Shape("empty frame".to_string()));
    }

    let scale = (target as f32 / w as f32).min(target as f32 / h as f32);
    let new_w = ((w as f32 * scale) as usize).clamp(1, target);
    let new_h = ((h as f32 * scale) as usize).clamp(1, target);
    let resized = asl_image::resize(image, Vec2::new(new_w, new_h))?;

    let pad_x = (target - new_w) / 2;
    let pad_y = (target - new_h) / 2;

    let mut input = Array4::from_elem((1, 3, target, target), PAD_VALUE);
    for y in 0..new_h {
        for x in 0..new_w {
            let i = (y * new_w + x) * Image::CHANNELS;
            for c in 0..3 {
                input[[0, c, y + pad_y, x + pad_x]] = resized.data[i + c] as f32 / 255.0;
            }
        }
    }

    Ok((
        input,
        Letterbox {
            scale,
            pad: Vec2::new(pad_x as f32, pad_y as f32),
        },
    ))
}

/// Decode a YOLOv8 head `[1, 4 + N, A]` into detections.
///
/// Each anchor column holds `cx, cy, w, h` in model pixels followed by N class
/// scores. Candidates below `threshold` are dropped, the rest go through
/// per-class greedy NMS and are clipped to the frame. Best first.
pub fn decode_detections(
    output: &ArrayViewD<f32>,
    letterbox: &Letterbox,
    frame: Vec2<usize>,
    labels: &[String],
    threshold: f32,
) -> Result<Vec<Detection>, InferError> {
    let shape = output.shape();
    if shape.len() != 3 || shape[0] != 1 || shape[1] <= 4 {
        return Err(InferError::Shape(format!(
            "expected [1, 4+N, A] output, got {:?}",
            shape
        )));
    }
    let classes = shape[1] - 4;
    let anchors = shape[2];
    let output = output.view().into_dimensionality::<Ix3>()?;

    let mut candidates: Vec<(usize, f32, Rect<f32>)> = Vec::new();
    for a in 0..anchors {
        let mut best = (0, f32::NEG_INFINITY);
        for c in 0..classes {
            let score = output[[0, 4 + c, a]];
            if score > best.1 {
                best = (c, score);
            }
        }
        if !(best.1 >= threshold) {
            continue;
        }

        let center = Vec2::new(output[[0, 0, a]], output[[0, 1, a]]);
        let size = Vec2::new(output[[0, 2, a]], output[[0, 3, a]]);
        let min = letterbox.unmap(center - size / 2.0);
        let max = letterbox.unmap(center + size / 2.0);
        candidates.push((best.0, best.1, Rect::from_min_max(min, max)));
    }

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut kept: Vec<(usize, f32, Rect<f32>)> = Vec::new();
    for candidate in candidates {
        let overlaps = kept
            .iter()
            .any(|k| k.0 == candidate.0 && k.2.iou(&candidate.2) > IOU_THRESHOLD);
        if !overlaps {
            kept.push(candidate);
        }
    }

    let (fw, fh) = (frame.x as f32, frame.y as f32);
    Ok(kept
        .into_iter()
        .map(|(class, confidence, rect)| {
            let min = rect.min();
            let max = rect.max();
            let clipped = Rect::from_min_max(
                Vec2::new(min.x.clamp(0.0, fw), min.y.clamp(0.0, fh)),
                Vec2::new(max.x.clamp(0.0, fw), max.y.clamp(0.0, fh)),
            );
            Detection {
                label: label_for(labels, class),
                confidence,
                bbox: clipped.to_pixels(),
            }
        })
        .collect())
}

/// YOLOv8 letter detector exported to ONNX.
pub struct OnnxLetterDetector {
    session: Session,
    labels: Vec<String>,
}

impl OnnxLetterDetector {
    pub fn new(model_path: impl AsRef<Path>, labels: Vec<String>) -> Result<Self, InferError> {
        let session = load_session(model_path.as_ref())?;
        Ok(Self { session, labels })
    }
}

impl LetterDetector for OnnxLetterDetector {
    fn detect(&mut self, image: &Image, threshold: f32) -> Result<Vec<Detection>, InferError> {
        let (input, letterbox) = letterbox(image, LETTER_INPUT_SIZE)?;
        let output = run_single(&mut self.session, input.into_dyn())?;
        decode_detections(&output.view(), &letterbox, image.size, &self.labels, threshold)
    }
}
