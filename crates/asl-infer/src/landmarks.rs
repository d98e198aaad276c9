use crate::InferError;
use asl_base::{Rect, Vec2};
use asl_image::Image;

pub const POSE_POINTS: usize = 33;
pub const FACE_POINTS: usize = 468;
pub const HAND_POINTS: usize = 21;

/// Length of one per-frame feature vector: pose (x, y, z, visibility), face,
/// left hand and right hand (x, y, z).
pub const FEATURE_LEN: usize = POSE_POINTS * 4 + FACE_POINTS * 3 + 2 * HAND_POINTS * 3;

/// Per-frame keypoints in classifier order, see [`FEATURE_LEN`].
pub type FeatureVector = Vec<f32>;

// pixels added around the hand box on every side
const HAND_BOX_PADDING: i32 = 20;

/// Keypoints found in one frame, coordinates normalized to [0, 1].
///
/// A part that was not detected is `None` and contributes zeros to the
/// feature vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Landmarks {
    pub pose: Option<Vec<[f32; 4]>>,
    pub face: Option<Vec<[f32; 3]>>,
    pub left_hand: Option<Vec<[f32; 3]>>,
    pub right_hand: Option<Vec<[f32; 3]>>,
}

fn push_part<const N: usize>(out: &mut Vec<f32>, part: &Option<Vec<[f32; N]>>, points: usize) {
    let start = out.len();
    if let Some(part) = part {
        for point in part.iter().take(points) {
            out.extend_from_slice(point);
        }
    }
    out.resize(start + points * N, 0.0);
}

impl Landmarks {
    pub fn has_hands(&self) -> bool {
        self.left_hand.is_some() || self.right_hand.is_some()
    }

    /// Flatten into a feature vector of exactly [`FEATURE_LEN`] values.
    ///
    /// Missing parts are zero-filled, short parts are zero-padded and extra
    /// points are ignored.
    pub fn extract_keypoints(&self) -> FeatureVector {
        let mut out = Vec::with_capacity(FEATURE_LEN);
        push_part(&mut out, &self.pose, POSE_POINTS);
        push_part(&mut out, &self.face, FACE_POINTS);
        push_part(&mut out, &self.left_hand, HAND_POINTS);
        push_part(&mut out, &self.right_hand, HAND_POINTS);
        out
    }

    /// Pixel box around all visible hand points in a frame of `size`, padded
    /// by 20 px. `None` when no hand is visible.
    ///
    /// Points outside the frame are clamped to its edges.
    pub fn hand_bbox(&self, size: Vec2<usize>) -> Option<Rect<i32>> {
        let to_pixel = |v: f32, extent: usize| (v.clamp(0.0, 1.0) * extent as f32) as i32;
        let points: Vec<Vec2<i32>> = self
            .left_hand
            .iter()
            .chain(self.right_hand.iter())
            .flatten()
            .map(|p| Vec2::new(to_pixel(p[0], size.x), to_pixel(p[1], size.y)))
            .collect();

        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rect::from_min_max(min, max).pad(HAND_BOX_PADDING))
    }
}

/// Finds body, face and hand keypoints in a frame.
pub trait LandmarkExtractor: Send {
    fn extract(&mut self, image: &Image) -> Result<Landmarks, InferError>;
}

/// Extractor for running without a landmark model: every frame has no
/// landmarks, so every feature vector is all zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLandmarks;

impl LandmarkExtractor for NoLandmarks {
    fn extract(&mut self, _image: &Image) -> Result<Landmarks, InferError> {
        Ok(Landmarks::default())
    }
}
