//! Metrics for the estimation loop.

use metrics::counter;

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_SAMPLED_TOTAL: &str = "gaze_frames_sampled_total";
    pub const FRAMES_SKIPPED_TOTAL: &str = "gaze_frames_skipped_total";
    pub const SAMPLES_ACCEPTED_TOTAL: &str = "gaze_samples_accepted_total";
    pub const SAMPLES_REJECTED_TOTAL: &str = "gaze_samples_rejected_total";
}

/// Record one completed sampling iteration.
pub fn record_frame_sampled() {
    counter!(names::FRAMES_SAMPLED_TOTAL).increment(1);
}

/// Record a frame that produced no emission (no face, missing eyes,
/// or a per-frame detection error).
pub fn record_frame_skipped(reason: &'static str) {
    let labels = [("reason", reason)];
    counter!(names::FRAMES_SKIPPED_TOTAL, &labels).increment(1);
}

/// Record an accepted gaze sample.
pub fn record_sample_accepted() {
    counter!(names::SAMPLES_ACCEPTED_TOTAL).increment(1);
}

/// Record a sample rejected by the acceptance window.
pub fn record_sample_rejected() {
    counter!(names::SAMPLES_REJECTED_TOTAL).increment(1);
}
