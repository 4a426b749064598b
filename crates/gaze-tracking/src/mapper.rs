//! Gaze-to-screen coordinate mapping.
//!
//! Turns one eye-center/bounding-box pair into a viewport coordinate,
//! or rejects it. Pure transforms: identical inputs always yield
//! identical outputs; the only state in the pipeline is which
//! coordinate ultimately gets published, and that cell is owned by
//! the session, not by the mapper.

use gaze_models::{FaceBox, GazeRatio, Keypoint, ScreenCoordinate, Viewport};

/// A point in frame-pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePoint {
    pub x: f64,
    pub y: f64,
}

impl FramePoint {
    /// Create a new frame point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Compute the mirrored eye-center point from both eye keypoints.
///
/// The horizontal axis is mirrored against the frame width to
/// compensate for a front-facing camera, so "left" on screen matches
/// the user's left. Y is the unmirrored average.
pub fn eye_center(left_eye: &Keypoint, right_eye: &Keypoint, frame_width: f64) -> FramePoint {
    FramePoint::new(
        frame_width - (left_eye.x + right_eye.x) / 2.0,
        (left_eye.y + right_eye.y) / 2.0,
    )
}

/// The empirically fixed vertical gaze band.
///
/// Eyes always sit near the top fraction of a face box; re-ranging
/// this narrow band onto [0, 1] maps it across the full viewport
/// height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBand {
    /// Ratio mapped to the top of the viewport
    pub min: f64,
    /// Ratio mapped to the bottom of the viewport
    pub max: f64,
}

impl Default for VerticalBand {
    fn default() -> Self {
        Self { min: 0.2, max: 0.4 }
    }
}

impl VerticalBand {
    /// Re-range a raw vertical ratio against the band, clamped to
    /// [0, 1].
    pub fn rescale(&self, ratio_y: f64) -> f64 {
        ((ratio_y - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Stateless gaze-to-screen transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct GazeMapper {
    band: VerticalBand,
}

impl GazeMapper {
    /// Create a mapper with the given vertical band.
    pub fn new(band: VerticalBand) -> Self {
        Self { band }
    }

    /// Normalize an eye center into the face box's local frame.
    pub fn ratios(&self, center: FramePoint, bbox: &FaceBox) -> GazeRatio {
        GazeRatio::new(
            (center.x - bbox.x_min) / bbox.width,
            (center.y - bbox.y_min) / bbox.height,
        )
    }

    /// Map an eye center to a viewport coordinate, or reject the
    /// sample.
    ///
    /// Acceptance requires `ratio_x > 0`, `ratio_y > 0`, `ratio_x <= 1`
    /// and the re-ranged Y `<= 1`. The asymmetric `>`/`<=` boundary on
    /// X is observable behavior and kept as-is. A rejected sample
    /// returns `None` and the previously published coordinate
    /// persists.
    pub fn to_screen(
        &self,
        center: FramePoint,
        bbox: &FaceBox,
        viewport: Viewport,
    ) -> Option<ScreenCoordinate> {
        if !bbox.is_valid() {
            return None;
        }

        let ratio = self.ratios(center, bbox);
        let scaled_y = self.band.rescale(ratio.ratio_y);

        let accepted =
            ratio.ratio_x > 0.0 && ratio.ratio_y > 0.0 && ratio.ratio_x <= 1.0 && scaled_y <= 1.0;
        if !accepted {
            return None;
        }

        Some(ScreenCoordinate::new(
            viewport.width * ratio.ratio_x,
            viewport.height * scaled_y,
        ))
    }
}
