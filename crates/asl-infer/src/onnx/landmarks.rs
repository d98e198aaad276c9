use super::{load_session, run_single};
use crate::landmarks::{FACE_POINTS, HAND_POINTS, POSE_POINTS};
use crate::{InferError, LandmarkExtractor, Landmarks};
use asl_base::Vec2;
use asl_image::Image;
use ndarray::{Array4, ArrayView2, Ix3, s};
use ort::session::Session;
use std::path::Path;

const DEFAULT_INPUT_SIZE: usize = 256;
const PRESENCE_THRESHOLD: f32 = 0.5;
const TOTAL_POINTS: usize = POSE_POINTS + FACE_POINTS + 2 * HAND_POINTS;

/// Holistic landmark model exported as a single ONNX graph.
///
/// Input is the frame resized to `[1, 3, S, S]` in [0, 1]. Output is
/// `[1, 543, 4]`: pose, face, left hand and right hand points in that order,
/// each `(x, y, z, presence)` with x and y normalized to the frame. A part
/// whose mean presence is below 0.5 counts as not detected.
pub struct OnnxLandmarkExtractor {
    session: Session,
    input_size: usize,
}

impl OnnxLandmarkExtractor {
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, InferError> {
        let session = load_session(model_path.as_ref())?;
        Ok(Self {
            session,
            input_size: DEFAULT_INPUT_SIZE,
        })
    }

    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    fn preprocess(&self, image: &Image) -> Result<Array4<f32>, InferError> {
        let n = self.input_size;
        let resized = asl_image::resize(image, Vec2::new(n, n))?;
        let mut input = Array4::zeros((1, 3, n, n));
        for (i, pixel) in resized.data.chunks_exact(Image::CHANNELS).enumerate() {
            let (y, x) = (i / n, i % n);
            for c in 0..3 {
                input[[0, c, y, x]] = pixel[c] as f32 / 255.0;
            }
        }
        Ok(input)
    }
}

fn present(points: &ArrayView2<f32>) -> bool {
    points.column(3).mean().unwrap_or(0.0) >= PRESENCE_THRESHOLD
}

fn part3(points: ArrayView2<f32>) -> Option<Vec<[f32; 3]>> {
    present(&points).then(|| points.rows().into_iter().map(|r| [r[0], r[1], r[2]]).collect())
}

/// Split a `[543, 4]` point table into landmark parts.
pub(crate) fn split_parts(points: ArrayView2<f32>) -> Landmarks {
    let face_start = POSE_POINTS;
    let left_start = face_start + FACE_POINTS;
    let right_start = left_start + HAND_POINTS;

    let pose = points.slice(s![..face_start, ..]);
    Landmarks {
        pose: present(&pose).then(|| {
            pose.rows()
                .into_iter()
                .map(|r| [r[0], r[1], r[2], r[3]])
                .collect()
        }),
        face: part3(points.slice(s![face_start..left_start, ..])),
        left_hand: part3(points.slice(s![left_start..right_start, ..])),
        right_hand: part3(points.slice(s![right_start..TOTAL_POINTS, ..])),
    }
}

impl LandmarkExtractor for OnnxLandmarkExtractor {
    fn extract(&mut self, image: &Image) -> Result<Landmarks, InferError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(InferError::Shape("empty frame".to_string()));
        }
        let input = self.preprocess(image)?;
        let output = run_single(&mut self.session, input.into_dyn())?;
        let shape = output.shape().to_vec();
        if shape.len() != 3 || shape[0] != 1 || shape[1] != TOTAL_POINTS || shape[2] != 4 {
            return Err(InferError::Shape(format!(
                "expected [1, {}, 4] output, got {:?}",
                TOTAL_POINTS, shape
            )));
        }
        let output = output.into_dimensionality::<Ix3>()?;
        Ok(split_parts(output.slice(s![0, .., ..])))
    }
}
