//! Error types for gaze tracking.
//!
//! Transient misses (no face in frame, eyes not both found) and
//! out-of-window samples are not errors; they simply produce no
//! emission for that frame.

use thiserror::Error;

/// Result type for tracking operations.
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Errors that can occur in the tracking pipeline.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Landmark model failed to load: {0}")]
    ModelLoadFailed(String),

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Detection failed: {0}")]
    DetectionFailed(String),

    #[error("Invalid frame: expected {expected} bytes, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrackingError {
    /// Create a model load failure error.
    pub fn model_load_failed(message: impl Into<String>) -> Self {
        Self::ModelLoadFailed(message.into())
    }

    /// Create a camera unavailable error.
    pub fn camera_unavailable(message: impl Into<String>) -> Self {
        Self::CameraUnavailable(message.into())
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Initialization failures abort the feature; the session stays
    /// in its pre-active state with no retry.
    pub fn is_initialization_failure(&self) -> bool {
        matches!(
            self,
            TrackingError::ModelLoadFailed(_) | TrackingError::CameraUnavailable(_)
        )
    }
}
