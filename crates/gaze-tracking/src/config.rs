//! Tracking configuration.

use std::time::Duration;

use crate::mapper::VerticalBand;

/// Tracking configuration.
///
/// All values have fixed defaults matching the authored experience;
/// `from_env` exists for tuning without a rebuild.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Camera frame width in pixels
    pub frame_width: u32,
    /// Camera frame height in pixels
    pub frame_height: u32,
    /// Countdown start value in seconds
    pub countdown_start: u8,
    /// Countdown tick interval
    pub countdown_tick: Duration,
    /// Sampling loop pacing (display-refresh stand-in)
    pub frame_interval: Duration,
    /// Reveal hole radius in viewport pixels
    pub erase_radius: u32,
    /// Horizontal offset correcting for the indicator graphic's anchor
    pub erase_offset_x: f64,
    /// Vertical offset correcting for the indicator graphic's anchor
    pub erase_offset_y: f64,
    /// Empirical vertical gaze band re-ranged onto the full viewport
    pub vertical_band: VerticalBand,
    /// Minimum detection confidence accepted from the landmark source
    pub score_threshold: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            frame_width: 640,
            frame_height: 480,
            countdown_start: 5,
            countdown_tick: Duration::from_secs(1),
            frame_interval: Duration::from_millis(33),
            erase_radius: 30,
            erase_offset_x: -50.0,
            erase_offset_y: -100.0,
            vertical_band: VerticalBand::default(),
            score_threshold: 0.5,
        }
    }
}

impl TrackingConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            frame_width: std::env::var("GAZE_FRAME_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.frame_width),
            frame_height: std::env::var("GAZE_FRAME_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.frame_height),
            countdown_start: std::env::var("GAZE_COUNTDOWN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.countdown_start),
            countdown_tick: Duration::from_millis(
                std::env::var("GAZE_COUNTDOWN_TICK_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            ),
            frame_interval: Duration::from_millis(
                std::env::var("GAZE_FRAME_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(33),
            ),
            erase_radius: std::env::var("GAZE_ERASE_RADIUS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.erase_radius),
            erase_offset_x: defaults.erase_offset_x,
            erase_offset_y: defaults.erase_offset_y,
            vertical_band: defaults.vertical_band,
            score_threshold: std::env::var("GAZE_SCORE_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.score_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_authored_constants() {
        let config = TrackingConfig::default();
        assert_eq!(config.frame_width, 640);
        assert_eq!(config.frame_height, 480);
        assert_eq!(config.countdown_start, 5);
        assert_eq!(config.countdown_tick, Duration::from_secs(1));
        assert_eq!(config.erase_radius, 30);
        assert_eq!(config.erase_offset_x, -50.0);
        assert_eq!(config.erase_offset_y, -100.0);
        assert!((config.vertical_band.min - 0.2).abs() < 1e-12);
        assert!((config.vertical_band.max - 0.4).abs() < 1e-12);
    }
}
