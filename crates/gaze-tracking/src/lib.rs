//! Gaze-to-screen mapping and reveal pipeline.
//!
//! This crate provides:
//! - A landmark-source contract for external face detectors
//! - The per-frame gaze estimation loop with cancellation support
//! - Coordinate normalization, re-ranging and clamping
//! - A monotonic reveal surface punched at the gaze point
//! - The countdown-gated session controller

pub mod camera;
pub mod config;
pub mod environment;
pub mod error;
pub mod estimator;
pub mod mapper;
pub mod metrics;
pub mod reveal;
pub mod session;
pub mod source;

pub use camera::{Frame, FrameSource, SyntheticCamera};
pub use config::TrackingConfig;
pub use environment::{Environment, FixedEnvironment};
pub use error::{TrackingError, TrackingResult};
pub use estimator::GazeEstimator;
pub use mapper::{eye_center, FramePoint, GazeMapper, VerticalBand};
pub use reveal::RevealSurface;
pub use session::{SessionController, SessionHandle};
pub use source::{
    DetectorConfig, JitteredLandmarkSource, LandmarkSource, ModelVariant, ScriptedLandmarkSource,
};
