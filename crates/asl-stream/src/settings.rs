use std::fmt;
use std::sync::RwLock;

/// Runtime knobs shared between the HTTP side and the capture loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Minimum confidence, in [0, 1].
    pub confidence_threshold: f32,
    /// Digital zoom, > 0. 1.0 is no zoom.
    pub zoom_factor: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            zoom_factor: 1.0,
        }
    }
}

impl Settings {
    /// Validated settings.
    pub fn new(confidence_threshold: f32, zoom_factor: f32) -> Result<Self, SettingsError> {
        Ok(Self {
            confidence_threshold: validate_threshold(confidence_threshold)?,
            zoom_factor: validate_zoom(zoom_factor)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsErrorReason {
    ThresholdOutOfRange,
    ZoomNotPositive,
    NotFinite,
}

impl SettingsErrorReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SettingsErrorReason::ThresholdOutOfRange => "threshold_out_of_range",
            SettingsErrorReason::ZoomNotPositive => "zoom_not_positive",
            SettingsErrorReason::NotFinite => "not_finite",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsError {
    pub reason: SettingsErrorReason,
    pub message: String,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SettingsError {}

fn validate_threshold(value: f32) -> Result<f32, SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError {
            reason: SettingsErrorReason::NotFinite,
            message: "Threshold must be a finite number".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(SettingsError {
            reason: SettingsErrorReason::ThresholdOutOfRange,
            message: "Threshold must be between 0 and 1".to_string(),
        });
    }
    Ok(value)
}

fn validate_zoom(value: f32) -> Result<f32, SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError {
            reason: SettingsErrorReason::NotFinite,
            message: "Zoom factor must be a finite number".to_string(),
        });
    }
    if value <= 0.0 {
        return Err(SettingsError {
            reason: SettingsErrorReason::ZoomNotPositive,
            message: "Zoom factor must be greater than 0".to_string(),
        });
    }
    Ok(value)
}

/// Process-wide settings, last write wins. Rejected writes leave the
/// previous value in place.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<Settings>,
}

impl SettingsStore {
    pub fn new(initial: Settings) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn snapshot(&self) -> Settings {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the confidence threshold; returns the settings after the write.
    pub fn set_threshold(&self, threshold: f32) -> Result<Settings, SettingsError> {
        let threshold = validate_threshold(threshold)?;
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        current.confidence_threshold = threshold;
        log::info!("Confidence threshold updated to {}", threshold);
        Ok(*current)
    }

    /// Set the zoom factor; returns the settings after the write.
    pub fn set_zoom(&self, zoom: f32) -> Result<Settings, SettingsError> {
        let zoom = validate_zoom(zoom)?;
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        current.zoom_factor = zoom;
        log::info!("Zoom factor updated to {}", zoom);
        Ok(*current)
    }
}
