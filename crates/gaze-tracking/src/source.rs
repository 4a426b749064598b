//! Landmark source contract and synthetic implementations.
//!
//! The face-landmark model is an external capability: given a frame
//! it asynchronously returns zero or one detected face with named
//! keypoints and a bounding box. The real model is not reimplemented
//! here; the synthetic sources below stand in for it in tests and the
//! demo binary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use gaze_models::FaceDetection;

use crate::camera::Frame;
use crate::error::TrackingResult;

/// Landmark model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelVariant {
    /// Full-range model (the authored experience fixes this variant)
    #[default]
    Full,
    /// Short-range model for close-up faces
    Short,
}

/// Detector configuration.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Model variant to load
    pub variant: ModelVariant,
    /// Maximum detections returned per frame
    pub max_faces: usize,
    /// Minimum confidence for a detection to be returned
    pub score_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            variant: ModelVariant::Full,
            max_faces: 1,
            score_threshold: 0.5,
        }
    }
}

/// Face-landmark detection capability.
#[async_trait]
pub trait LandmarkSource: Send + Sync {
    /// Estimate faces in a frame.
    ///
    /// `flip_horizontal` asks the detector to mirror its output; the
    /// pipeline passes `false` and applies its own mirror compensation
    /// downstream.
    async fn estimate_faces(
        &self,
        frame: &Frame,
        flip_horizontal: bool,
    ) -> TrackingResult<Vec<FaceDetection>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Deterministic landmark source replaying a canned script.
///
/// Each call returns the next scripted frame result; once the script
/// is exhausted every further call reports no face. Call counts are
/// tracked for assertions.
pub struct ScriptedLandmarkSource {
    script: Vec<Vec<FaceDetection>>,
    cursor: AtomicUsize,
    calls: AtomicUsize,
    cycling: bool,
    config: DetectorConfig,
}

impl ScriptedLandmarkSource {
    /// Create a source replaying the given per-frame results.
    pub fn new(script: Vec<Vec<FaceDetection>>) -> Self {
        Self {
            script,
            cursor: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            cycling: false,
            config: DetectorConfig::default(),
        }
    }

    /// Replay the script from the start once exhausted instead of
    /// reporting no face.
    pub fn cycling(mut self) -> Self {
        self.cycling = true;
        self
    }

    /// Override the detector configuration.
    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// How many times `estimate_faces` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LandmarkSource for ScriptedLandmarkSource {
    async fn estimate_faces(
        &self,
        _frame: &Frame,
        _flip_horizontal: bool,
    ) -> TrackingResult<Vec<FaceDetection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut index = self.cursor.fetch_add(1, Ordering::SeqCst);
        if self.cycling && !self.script.is_empty() {
            index %= self.script.len();
        }

        let mut faces = match self.script.get(index) {
            Some(frame_result) => frame_result.clone(),
            None => Vec::new(),
        };
        faces.retain(|face| face.score >= self.config.score_threshold);
        faces.truncate(self.config.max_faces);
        Ok(faces)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Wrapper adding bounded uniform noise to another source's output.
///
/// Approximates real detector jitter so the demo's erasure trail looks
/// like live tracking rather than a ruled line.
pub struct JitteredLandmarkSource<S> {
    inner: S,
    amplitude: f64,
}

impl<S: LandmarkSource> JitteredLandmarkSource<S> {
    /// Wrap a source, jittering keypoints and boxes by up to
    /// `amplitude` pixels on each axis.
    pub fn new(inner: S, amplitude: f64) -> Self {
        Self { inner, amplitude }
    }
}

#[async_trait]
impl<S: LandmarkSource> LandmarkSource for JitteredLandmarkSource<S> {
    async fn estimate_faces(
        &self,
        frame: &Frame,
        flip_horizontal: bool,
    ) -> TrackingResult<Vec<FaceDetection>> {
        let mut faces = self.inner.estimate_faces(frame, flip_horizontal).await?;
        if self.amplitude > 0.0 {
            let mut rng = rand::rng();
            for face in &mut faces {
                for kp in &mut face.keypoints {
                    kp.x += rng.random_range(-self.amplitude..=self.amplitude);
                    kp.y += rng.random_range(-self.amplitude..=self.amplitude);
                }
                face.bbox.x_min += rng.random_range(-self.amplitude..=self.amplitude);
                face.bbox.y_min += rng.random_range(-self.amplitude..=self.amplitude);
            }
        }
        Ok(faces)
    }

    fn name(&self) -> &'static str {
        "jittered"
    }
}

/// Convenience alias for sharing a source across tasks.
pub type SharedLandmarkSource = Arc<dyn LandmarkSource>;

#[cfg(test)]
mod tests {
    use super::*;
    use gaze_models::{FaceBox, Keypoint, KeypointName};

    fn detection(score: f64) -> FaceDetection {
        FaceDetection::new(
            vec![
                Keypoint::new(KeypointName::LeftEye, 120.0, 90.0),
                Keypoint::new(KeypointName::RightEye, 180.0, 92.0),
            ],
            FaceBox::new(100.0, 60.0, 120.0, 140.0),
            score,
        )
    }

    #[tokio::test]
    async fn test_scripted_sequencing_and_exhaustion() {
        let source =
            ScriptedLandmarkSource::new(vec![vec![detection(0.9)], Vec::new()]);
        let frame = Frame::solid(640, 480, 0);

        assert_eq!(source.estimate_faces(&frame, false).await.unwrap().len(), 1);
        assert!(source.estimate_faces(&frame, false).await.unwrap().is_empty());
        // Past the end of the script: no face, not an error
        assert!(source.estimate_faces(&frame, false).await.unwrap().is_empty());
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_max_faces_and_score_threshold() {
        let source = ScriptedLandmarkSource::new(vec![vec![
            detection(0.3),
            detection(0.9),
            detection(0.8),
        ]])
        .with_config(DetectorConfig {
            max_faces: 1,
            ..DetectorConfig::default()
        });
        let frame = Frame::solid(640, 480, 0);

        let faces = source.estimate_faces(&frame, false).await.unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].score, 0.9);
    }

    #[tokio::test]
    async fn test_cycling_replays_the_script() {
        let source =
            ScriptedLandmarkSource::new(vec![vec![detection(0.9)], Vec::new()]).cycling();
        let frame = Frame::solid(640, 480, 0);

        assert_eq!(source.estimate_faces(&frame, false).await.unwrap().len(), 1);
        assert!(source.estimate_faces(&frame, false).await.unwrap().is_empty());
        // Wraps back to the first scripted frame
        assert_eq!(source.estimate_faces(&frame, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_jitter_is_bounded() {
        let source = JitteredLandmarkSource::new(
            ScriptedLandmarkSource::new(vec![vec![detection(0.9)]]),
            2.0,
        );
        let frame = Frame::solid(640, 480, 0);

        let faces = source.estimate_faces(&frame, false).await.unwrap();
        let left = faces[0].keypoint(KeypointName::LeftEye).unwrap();
        assert!((left.x - 120.0).abs() <= 2.0);
        assert!((left.y - 90.0).abs() <= 2.0);
        assert!((faces[0].bbox.x_min - 100.0).abs() <= 2.0);
    }
}
