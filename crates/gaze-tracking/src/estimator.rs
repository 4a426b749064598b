//! Per-frame gaze estimation loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use gaze_models::{KeypointName, ScreenCoordinate};

use crate::camera::FrameSource;
use crate::config::TrackingConfig;
use crate::environment::Environment;
use crate::mapper::{eye_center, GazeMapper};
use crate::metrics;
use crate::source::LandmarkSource;

/// Continuous gaze estimator.
///
/// While started, samples the frame source once per pacer tick, runs
/// landmark detection, and publishes accepted viewport coordinates on
/// a watch channel. At most one detection is ever in flight: the next
/// iteration is only scheduled after the current call resolves, so
/// detector latency naturally back-pressures the sampling rate.
pub struct GazeEstimator {
    source: Arc<dyn LandmarkSource>,
    camera: Arc<dyn FrameSource>,
    env: Arc<dyn Environment>,
    config: TrackingConfig,
    mapper: GazeMapper,
    active: Arc<AtomicBool>,
    coord_tx: Arc<watch::Sender<ScreenCoordinate>>,
}

impl GazeEstimator {
    /// Create an estimator publishing on the given coordinate channel.
    pub fn new(
        source: Arc<dyn LandmarkSource>,
        camera: Arc<dyn FrameSource>,
        env: Arc<dyn Environment>,
        config: TrackingConfig,
        coord_tx: watch::Sender<ScreenCoordinate>,
    ) -> Self {
        let mapper = GazeMapper::new(config.vertical_band);
        Self {
            source,
            camera,
            env,
            config,
            mapper,
            active: Arc::new(AtomicBool::new(false)),
            coord_tx: Arc::new(coord_tx),
        }
    }

    /// Whether the sampling loop is currently running.
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Shared handle to the active flag, for external observers.
    pub(crate) fn active_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.active)
    }

    /// Subscribe to published coordinates.
    pub fn subscribe(&self) -> watch::Receiver<ScreenCoordinate> {
        self.coord_tx.subscribe()
    }

    /// Start the sampling loop.
    ///
    /// Returns `None` if the loop is already running.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        if self.active.swap(true, Ordering::SeqCst) {
            warn!("Estimator already running, start ignored");
            return None;
        }

        debug!(
            source = self.source.name(),
            camera = self.camera.name(),
            "Starting gaze estimation loop"
        );

        let source = Arc::clone(&self.source);
        let camera = Arc::clone(&self.camera);
        let env = Arc::clone(&self.env);
        let active = Arc::clone(&self.active);
        let coord_tx = Arc::clone(&self.coord_tx);
        let config = self.config.clone();
        let mapper = self.mapper;

        Some(tokio::spawn(async move {
            let mut pacer = tokio::time::interval(config.frame_interval);
            pacer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                pacer.tick().await;

                // Stop signal is observed before every reschedule
                if !active.load(Ordering::SeqCst) {
                    break;
                }

                let frame = match camera.next_frame().await {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(error = %e, "Frame acquisition failed, skipping frame");
                        metrics::record_frame_skipped("camera");
                        continue;
                    }
                };

                // Detection failures cost this iteration only; the
                // loop continues on the next frame.
                let faces = match source.estimate_faces(&frame, false).await {
                    Ok(faces) => faces,
                    Err(e) => {
                        warn!(error = %e, "Detection failed, skipping frame");
                        metrics::record_frame_skipped("detector_error");
                        continue;
                    }
                };

                // An in-flight detection may complete after stop();
                // its result is discarded.
                if !active.load(Ordering::SeqCst) {
                    break;
                }

                metrics::record_frame_sampled();

                // Only the first detection is considered
                let Some(face) = faces.first() else {
                    metrics::record_frame_skipped("no_face");
                    continue;
                };

                let (Some(left), Some(right)) = (
                    face.keypoint(KeypointName::LeftEye),
                    face.keypoint(KeypointName::RightEye),
                ) else {
                    metrics::record_frame_skipped("missing_eyes");
                    continue;
                };

                let center = eye_center(left, right, config.frame_width as f64);
                let viewport = env.viewport();

                match mapper.to_screen(center, &face.bbox, viewport) {
                    Some(coord) => {
                        trace!(x = coord.x, y = coord.y, "Accepted gaze sample");
                        metrics::record_sample_accepted();
                        coord_tx.send_replace(coord);
                    }
                    None => {
                        // Stale coordinate persists
                        metrics::record_sample_rejected();
                    }
                }
            }

            debug!("Gaze estimation loop stopped");
        }))
    }

    /// Signal the loop to stop.
    ///
    /// The loop observes the flag before scheduling its next
    /// iteration and terminates without emitting further estimates.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
