//! Shared data models for the Gazeburn reveal pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Face-landmark keypoints and per-frame detections
//! - Normalized gaze ratios and viewport coordinates
//! - Session lifecycle phases and ambient environment values

pub mod face;
pub mod gaze;
pub mod keypoint;
pub mod session;

// Re-export common types
pub use face::{FaceBox, FaceDetection};
pub use gaze::{GazeRatio, ScreenCoordinate};
pub use keypoint::{Keypoint, KeypointName};
pub use session::{ColorScheme, SessionPhase, Viewport};
