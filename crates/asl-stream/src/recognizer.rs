use crate::SlidingWindow;
use asl_infer::{FeatureVector, InferError, Prediction, SignClassifier};

/// Sizes of the recognizer's buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Frames per classification window.
    pub window: usize,
    /// Recent argmax indices kept.
    pub history: usize,
    /// How many of the most recent indices must agree before committing.
    pub stability: usize,
    /// Committed labels kept.
    pub sentence: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            window: 30,
            history: 10,
            stability: 10,
            sentence: 5,
        }
    }
}

impl RecognizerConfig {
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_history(mut self, history: usize) -> Self {
        self.history = history;
        self
    }

    pub fn with_stability(mut self, stability: usize) -> Self {
        self.stability = stability;
        self
    }

    pub fn with_sentence(mut self, sentence: usize) -> Self {
        self.sentence = sentence;
        self
    }
}

/// What one pushed feature vector led to.
#[derive(Debug)]
pub enum RecognitionOutcome {
    /// The window is not full yet.
    Filling { len: usize },
    /// The window was classified; `committed` tells whether the label was
    /// appended to the sentence.
    Predicted {
        prediction: Prediction,
        committed: bool,
    },
    /// The classifier failed. The window was still updated.
    Failed(InferError),
}

/// Debounces per-window predictions into a short sentence of signs.
///
/// A label is committed only when every one of the most recent `stability`
/// predictions agrees, its confidence is strictly above the threshold, and it
/// differs from the last committed label.
#[derive(Debug, Clone)]
pub struct TemporalRecognizer {
    config: RecognizerConfig,
    window: SlidingWindow<FeatureVector>,
    history: SlidingWindow<usize>,
    sentence: SlidingWindow<String>,
    last_prediction: Option<Prediction>,
}

impl Default for TemporalRecognizer {
    fn default() -> Self {
        Self::new(RecognizerConfig::default())
    }
}

impl TemporalRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            config,
            window: SlidingWindow::new(config.window),
            history: SlidingWindow::new(config.history),
            sentence: SlidingWindow::new(config.sentence),
            last_prediction: None,
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Feed one frame's features; classify once the window is full.
    pub fn push(
        &mut self,
        features: FeatureVector,
        classifier: &mut dyn SignClassifier,
        threshold: f32,
    ) -> RecognitionOutcome {
        self.window.push(features);
        if !self.window.is_ready() {
            return RecognitionOutcome::Filling {
                len: self.window.len(),
            };
        }

        let distribution = match classifier.classify(self.window.as_slice()) {
            Ok(distribution) => distribution,
            Err(err) => return RecognitionOutcome::Failed(err),
        };
        let Some(prediction) = Prediction::from_distribution(&distribution, classifier.labels())
        else {
            return RecognitionOutcome::Failed(InferError::Shape(
                "classifier returned an empty distribution".to_string(),
            ));
        };

        self.history.push(prediction.index);
        let committed = self.is_stable(prediction.index)
            && prediction.confidence > threshold
            && self.sentence.last() != Some(&prediction.label);
        if committed {
            self.sentence.push(prediction.label.clone());
        }
        self.last_prediction = Some(prediction.clone());

        RecognitionOutcome::Predicted {
            prediction,
            committed,
        }
    }

    // every one of the last `stability` history entries equals `index`
    fn is_stable(&self, index: usize) -> bool {
        let recent = self.history.len().min(self.config.stability);
        recent > 0
            && self
                .history
                .iter()
                .skip(self.history.len() - recent)
                .all(|&i| i == index)
    }

    pub fn sentence(&self) -> Vec<String> {
        self.sentence.iter().cloned().collect()
    }

    pub fn history(&self) -> Vec<usize> {
        self.history.iter().copied().collect()
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn is_ready(&self) -> bool {
        self.window.is_ready()
    }

    /// Forget window, history, sentence and last prediction.
    pub fn reset(&mut self) {
        self.window.clear();
        self.history.clear();
        self.sentence.clear();
        self.last_prediction = None;
    }
}
