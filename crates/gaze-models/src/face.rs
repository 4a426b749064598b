//! Face bounding boxes and per-frame detection results.

use serde::{Deserialize, Serialize};

use crate::keypoint::{Keypoint, KeypointName};

/// Face bounding box in frame-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    /// Left edge x-coordinate
    pub x_min: f64,
    /// Top edge y-coordinate
    pub y_min: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl FaceBox {
    /// Create a new face box.
    pub fn new(x_min: f64, y_min: f64, width: f64, height: f64) -> Self {
        Self {
            x_min,
            y_min,
            width,
            height,
        }
    }

    /// Right edge x-coordinate.
    #[inline]
    pub fn x_max(&self) -> f64 {
        self.x_min + self.width
    }

    /// Bottom edge y-coordinate.
    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y_min + self.height
    }

    /// Box area in pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check whether a frame-pixel point falls inside the box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max() && y >= self.y_min && y <= self.y_max()
    }

    /// A box is usable for normalization only with positive extents.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// One face detection for the current frame.
///
/// Lifecycle: created per estimation call, ephemeral. At most one
/// instance (the first result) is consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Named landmarks in frame-pixel space
    pub keypoints: Vec<Keypoint>,
    /// Bounding region of the detected face
    pub bbox: FaceBox,
    /// Detection confidence [0, 1]
    pub score: f64,
}

impl FaceDetection {
    /// Create a new detection.
    pub fn new(keypoints: Vec<Keypoint>, bbox: FaceBox, score: f64) -> Self {
        Self {
            keypoints,
            bbox,
            score,
        }
    }

    /// Look up a keypoint by name.
    pub fn keypoint(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_box_edges() {
        let bbox = FaceBox::new(100.0, 50.0, 200.0, 250.0);
        assert_eq!(bbox.x_max(), 300.0);
        assert_eq!(bbox.y_max(), 300.0);
        assert_eq!(bbox.area(), 50_000.0);
    }

    #[test]
    fn test_face_box_contains() {
        let bbox = FaceBox::new(100.0, 50.0, 200.0, 250.0);
        assert!(bbox.contains(150.0, 100.0));
        assert!(bbox.contains(100.0, 50.0)); // edges inclusive
        assert!(!bbox.contains(99.9, 100.0));
        assert!(!bbox.contains(150.0, 301.0));
    }

    #[test]
    fn test_face_box_validity() {
        assert!(FaceBox::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!FaceBox::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!FaceBox::new(0.0, 0.0, 1.0, -1.0).is_valid());
    }

    #[test]
    fn test_keypoint_lookup() {
        let detection = FaceDetection::new(
            vec![
                Keypoint::new(KeypointName::LeftEye, 120.0, 90.0),
                Keypoint::new(KeypointName::RightEye, 180.0, 92.0),
            ],
            FaceBox::new(100.0, 60.0, 120.0, 140.0),
            0.98,
        );

        let left = detection.keypoint(KeypointName::LeftEye).unwrap();
        assert_eq!(left.x, 120.0);
        assert!(detection.keypoint(KeypointName::NoseTip).is_none());
    }
}
