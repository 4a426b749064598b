//! Gaze ratios and viewport coordinates.

use serde::{Deserialize, Serialize};

/// Eye-center position normalized into the face box's local frame.
///
/// Values outside the acceptance window signal an unreliable sample
/// (detection noise) and are rejected by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeRatio {
    /// Horizontal position within the face box (0 = left edge)
    pub ratio_x: f64,
    /// Vertical position within the face box (0 = top edge)
    pub ratio_y: f64,
}

impl GazeRatio {
    /// Create a new gaze ratio.
    pub fn new(ratio_x: f64, ratio_y: f64) -> Self {
        Self { ratio_x, ratio_y }
    }
}

/// Gaze position in viewport-pixel space.
///
/// Holds the last accepted gaze-derived point. Single writer (the
/// estimator continuation), multiple readers; updates are serialized
/// through one watch channel so there is no concurrent-mutation
/// hazard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenCoordinate {
    /// X position in viewport pixels
    pub x: f64,
    /// Y position in viewport pixels
    pub y: f64,
}

impl ScreenCoordinate {
    /// Create a new screen coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_origin() {
        let coord = ScreenCoordinate::default();
        assert_eq!(coord, ScreenCoordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_ratio_roundtrip() {
        let ratio = GazeRatio::new(0.42, 0.31);
        let json = serde_json::to_string(&ratio).unwrap();
        let back: GazeRatio = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ratio);
    }
}
