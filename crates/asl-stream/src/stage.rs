use crate::{RecognitionOutcome, RecognizerConfig, Settings, StreamError, TemporalRecognizer};
use asl_base::{Rect, Vec2};
use asl_image::{Color, Image, draw_rect, draw_text, fill_rect, text_size};
use asl_infer::{Detection, LandmarkExtractor, LetterDetector, Prediction, SignClassifier};

const GREEN: Color = [0, 255, 0];
const WHITE: Color = [255, 255, 255];
const BLACK: Color = [0, 0, 0];
const BANNER: Color = [16, 117, 245];
const BANNER_HEIGHT: i32 = 40;
const TEXT_SCALE: i32 = 2;

/// What the stream currently recognizes, as read by the HTTP side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    /// Committed signs, oldest first.
    pub sentence: Vec<String>,
    /// Most recent window prediction.
    pub last_prediction: Option<Prediction>,
    /// Letter detections in the most recent frame, best first.
    pub detections: Vec<Detection>,
}

impl Recognition {
    /// Best current guess: the last prediction, or the most confident detection.
    pub fn best(&self) -> Option<(&str, f32)> {
        if let Some(prediction) = &self.last_prediction {
            return Some((&prediction.label, prediction.confidence));
        }
        self.detections
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .map(|d| (d.label.as_str(), d.confidence))
    }
}

/// Per-frame recognition plus the overlay it draws.
pub trait RecognitionStage: Send {
    /// Drop all temporal state. Called when the stream starts.
    fn reset(&mut self);

    /// Recognize `frame` and draw the overlay into it.
    fn process(
        &mut self,
        frame: &mut Image,
        settings: &Settings,
    ) -> Result<Recognition, StreamError>;
}

// label with a filled background, sitting just above `anchor`
fn draw_label(frame: &mut Image, anchor: Vec2<i32>, text: &str, background: Color) {
    let size = text_size(text, TEXT_SCALE);
    let y = (anchor.y - 10 - size.y).max(0);
    fill_rect(
        frame,
        Rect::new(Vec2::new(anchor.x, y - 2), Vec2::new(size.x + 4, size.y + 4)),
        background,
    );
    draw_text(frame, Vec2::new(anchor.x + 2, y), text, TEXT_SCALE, WHITE);
}

/// Dynamic signs: landmarks per frame, classified over a sliding window.
pub struct SignStage {
    extractor: Box<dyn LandmarkExtractor>,
    classifier: Box<dyn SignClassifier>,
    recognizer: TemporalRecognizer,
}

impl SignStage {
    pub fn new(
        extractor: Box<dyn LandmarkExtractor>,
        classifier: Box<dyn SignClassifier>,
        config: RecognizerConfig,
    ) -> Self {
        Self {
            extractor,
            classifier,
            recognizer: TemporalRecognizer::new(config),
        }
    }

    pub fn recognizer(&self) -> &TemporalRecognizer {
        &self.recognizer
    }
}

impl RecognitionStage for SignStage {
    fn reset(&mut self) {
        self.recognizer.reset();
    }

    fn process(
        &mut self,
        frame: &mut Image,
        settings: &Settings,
    ) -> Result<Recognition, StreamError> {
        let landmarks = self.extractor.extract(frame)?;
        let threshold = settings.confidence_threshold;

        match self
            .recognizer
            .push(landmarks.extract_keypoints(), self.classifier.as_mut(), threshold)
        {
            RecognitionOutcome::Filling { .. } => {}
            RecognitionOutcome::Predicted { prediction, committed } => {
                if committed {
                    log::info!(
                        "Recognized '{}' ({:.2})",
                        prediction.label,
                        prediction.confidence
                    );
                }
                if prediction.confidence > threshold {
                    if let Some(bbox) = landmarks.hand_bbox(frame.size) {
                        draw_rect(frame, bbox, GREEN, 3);
                        draw_label(frame, bbox.min(), &prediction.label, GREEN);
                    }
                }
            }
            RecognitionOutcome::Failed(err) => {
                log::error!("sign classification failed: {}", err);
            }
        }

        let sentence = self.recognizer.sentence();
        fill_rect(
            frame,
            Rect::new(
                Vec2::new(0, 0),
                Vec2::new(frame.width() as i32, BANNER_HEIGHT),
            ),
            BANNER,
        );
        draw_text(frame, Vec2::new(6, 10), &sentence.join(" "), 3, WHITE);

        Ok(Recognition {
            sentence,
            last_prediction: self.recognizer.last_prediction().cloned(),
            detections: Vec::new(),
        })
    }
}

/// Static letters: one detector pass per frame, no temporal state.
pub struct LetterStage {
    detector: Box<dyn LetterDetector>,
}

impl LetterStage {
    pub fn new(detector: Box<dyn LetterDetector>) -> Self {
        Self { detector }
    }
}

impl RecognitionStage for LetterStage {
    fn reset(&mut self) {}

    fn process(
        &mut self,
        frame: &mut Image,
        settings: &Settings,
    ) -> Result<Recognition, StreamError> {
        let detections = self
            .detector
            .detect(frame, settings.confidence_threshold)?;

        for detection in &detections {
            draw_rect(frame, detection.bbox, GREEN, 2);
            let label = format!("{} {:.2}", detection.label, detection.confidence);
            draw_label(frame, detection.bbox.min(), &label, GREEN);
        }

        let info = format!(
            "Detections: {} | Confidence: {:.2} | Zoom: {:.1}x",
            detections.len(),
            settings.confidence_threshold,
            settings.zoom_factor
        );
        fill_rect(
            frame,
            Rect::from_min_max(Vec2::new(10, 10), Vec2::new(600, 40)),
            BLACK,
        );
        draw_text(frame, Vec2::new(15, 18), &info, TEXT_SCALE, WHITE);

        Ok(Recognition {
            sentence: Vec::new(),
            last_prediction: None,
            detections,
        })
    }
}
