//! Named face-landmark keypoints.

use serde::{Deserialize, Serialize};

/// The six keypoints produced by the MediaPipe face detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeypointName {
    LeftEye,
    RightEye,
    NoseTip,
    MouthCenter,
    LeftEarTragion,
    RightEarTragion,
}

impl KeypointName {
    /// Wire name as emitted by the detector.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeypointName::LeftEye => "leftEye",
            KeypointName::RightEye => "rightEye",
            KeypointName::NoseTip => "noseTip",
            KeypointName::MouthCenter => "mouthCenter",
            KeypointName::LeftEarTragion => "leftEarTragion",
            KeypointName::RightEarTragion => "rightEarTragion",
        }
    }
}

/// A named landmark in frame-pixel space (origin top-left).
///
/// Produced fresh each frame by the landmark source and consumed
/// immediately; never retained across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Which landmark this is
    pub name: KeypointName,
    /// X coordinate in frame pixels
    pub x: f64,
    /// Y coordinate in frame pixels
    pub y: f64,
}

impl Keypoint {
    /// Create a new keypoint.
    pub fn new(name: KeypointName, x: f64, y: f64) -> Self {
        Self { name, x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_detector_output() {
        assert_eq!(KeypointName::LeftEye.as_str(), "leftEye");
        assert_eq!(KeypointName::RightEye.as_str(), "rightEye");

        // Serde uses the same camelCase names
        let json = serde_json::to_string(&KeypointName::LeftEye).unwrap();
        assert_eq!(json, "\"leftEye\"");
    }

    #[test]
    fn test_keypoint_roundtrip() {
        let kp = Keypoint::new(KeypointName::RightEye, 200.0, 180.5);
        let json = serde_json::to_string(&kp).unwrap();
        let back: Keypoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kp);
    }
}
