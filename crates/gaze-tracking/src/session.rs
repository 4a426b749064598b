//! Countdown-gated session controller.
//!
//! Supervises the whole feature: ticks the countdown, transitions to
//! the active phase exactly once, activates the estimator and the
//! reveal surface, and applies accepted coordinates to the surface
//! until shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

use gaze_models::{ScreenCoordinate, SessionPhase};

use crate::camera::FrameSource;
use crate::config::TrackingConfig;
use crate::environment::Environment;
use crate::error::TrackingResult;
use crate::estimator::GazeEstimator;
use crate::reveal::RevealSurface;
use crate::source::LandmarkSource;

/// Session controller owning the phase, the estimator and the
/// surface.
///
/// Invariant: the estimation loop runs if and only if the phase is
/// `Active`, and the reveal surface exists only while `Active`.
pub struct SessionController {
    session_id: Uuid,
    config: TrackingConfig,
    env: Arc<dyn Environment>,
    estimator: GazeEstimator,
    estimator_task: Option<JoinHandle<()>>,
    surface: Option<RevealSurface>,
    phase_tx: watch::Sender<SessionPhase>,
    coord_rx: watch::Receiver<ScreenCoordinate>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

/// Cloneable handle for observing and shutting down a running
/// session.
#[derive(Clone)]
pub struct SessionHandle {
    shutdown: Arc<watch::Sender<bool>>,
    phase: watch::Receiver<SessionPhase>,
    coordinate: watch::Receiver<ScreenCoordinate>,
    estimator_active: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Signal the session to stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    /// Subscribe to phase transitions.
    pub fn phase_receiver(&self) -> watch::Receiver<SessionPhase> {
        self.phase.clone()
    }

    /// Last accepted gaze coordinate.
    pub fn coordinate(&self) -> ScreenCoordinate {
        *self.coordinate.borrow()
    }

    /// Subscribe to accepted coordinates.
    pub fn coordinate_receiver(&self) -> watch::Receiver<ScreenCoordinate> {
        self.coordinate.clone()
    }

    /// Whether the estimation loop is currently running.
    pub fn estimator_running(&self) -> bool {
        self.estimator_active.load(Ordering::SeqCst)
    }
}

impl SessionController {
    /// Create a session in its initial countdown phase.
    pub fn new(
        source: Arc<dyn LandmarkSource>,
        camera: Arc<dyn FrameSource>,
        env: Arc<dyn Environment>,
        config: TrackingConfig,
    ) -> Self {
        let (coord_tx, coord_rx) = watch::channel(ScreenCoordinate::default());
        let estimator = GazeEstimator::new(
            source,
            camera,
            Arc::clone(&env),
            config.clone(),
            coord_tx,
        );
        let (phase_tx, _) = watch::channel(SessionPhase::countdown(config.countdown_start));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            session_id: Uuid::new_v4(),
            config,
            env,
            estimator,
            estimator_task: None,
            surface: None,
            phase_tx,
            coord_rx,
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Handle for observers and shutdown.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            shutdown: Arc::clone(&self.shutdown_tx),
            phase: self.phase_tx.subscribe(),
            coordinate: self.coord_rx.clone(),
            estimator_active: self.estimator.active_flag(),
        }
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        *self.phase_tx.borrow()
    }

    /// The reveal surface, present only once the session has
    /// activated.
    pub fn surface(&self) -> Option<&RevealSurface> {
        self.surface.as_ref()
    }

    /// Session identifier used in log fields.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Run the session to completion: countdown, activation, then the
    /// reveal loop until shutdown.
    pub async fn run(&mut self) -> TrackingResult<()> {
        info!(
            session_id = %self.session_id,
            countdown = self.config.countdown_start,
            "Session starting"
        );

        self.run_countdown().await;
        if self.phase().is_active() {
            self.reveal_loop().await;
        }
        self.stop_estimator().await;

        info!(session_id = %self.session_id, "Session stopped");
        Ok(())
    }

    /// Tick the countdown to zero, then activate.
    ///
    /// The ticker is dropped at the Countdown -> Active transition and
    /// never fires again. A shutdown during the countdown aborts
    /// without activating.
    pub async fn run_countdown(&mut self) {
        let mut shutdown_rx = self.shutdown_rx.clone();
        let mut ticker = tokio::time::interval(self.config.countdown_tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick resolves immediately
        ticker.tick().await;

        loop {
            let remaining = match self.phase() {
                SessionPhase::Countdown { seconds_remaining } => seconds_remaining,
                SessionPhase::Active => return,
            };
            if remaining == 0 {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    let next = remaining - 1;
                    debug!(
                        session_id = %self.session_id,
                        seconds_remaining = next,
                        "Countdown tick"
                    );
                    self.phase_tx.send_replace(SessionPhase::countdown(next));
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!(session_id = %self.session_id, "Shutdown during countdown");
                        return;
                    }
                }
            }
        }

        drop(ticker);
        self.activate();
    }

    /// Transition to `Active`: opaque-fill the surface with the
    /// ambient scheme (read once) and start the estimator. Happens at
    /// most once per session.
    fn activate(&mut self) {
        if self.phase().is_active() {
            return;
        }

        let scheme = self.env.color_scheme();
        let viewport = self.env.viewport();
        self.surface = Some(RevealSurface::opaque(viewport, scheme, &self.config));
        self.phase_tx.send_replace(SessionPhase::Active);
        self.estimator_task = self.estimator.start();

        info!(
            session_id = %self.session_id,
            ?scheme,
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            "Session active, estimator started"
        );
    }

    /// Apply every accepted coordinate to the surface until shutdown.
    async fn reveal_loop(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let mut coord_rx = self.coord_rx.clone();
        let mut shutdown_rx = self.shutdown_rx.clone();

        loop {
            tokio::select! {
                result = coord_rx.changed() => {
                    if result.is_err() {
                        break;
                    }
                    let coord = *coord_rx.borrow_and_update();
                    surface.erase_at(coord);
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
    }

    /// Stop the estimator and wait for its loop to exit.
    async fn stop_estimator(&mut self) {
        self.estimator.stop();
        if let Some(task) = self.estimator_task.take() {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use gaze_models::{ColorScheme, Viewport};

    use crate::camera::SyntheticCamera;
    use crate::environment::FixedEnvironment;
    use crate::source::ScriptedLandmarkSource;

    fn fast_config() -> TrackingConfig {
        TrackingConfig {
            countdown_tick: Duration::from_millis(10),
            frame_interval: Duration::from_millis(5),
            ..TrackingConfig::default()
        }
    }

    fn session_with(script: Vec<Vec<gaze_models::FaceDetection>>) -> SessionController {
        SessionController::new(
            Arc::new(ScriptedLandmarkSource::new(script)),
            Arc::new(SyntheticCamera::new(640, 480)),
            Arc::new(FixedEnvironment::new(
                Viewport::new(1000.0, 500.0),
                ColorScheme::Dark,
            )),
            fast_config(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_phase_is_countdown() {
        let session = session_with(Vec::new());
        assert_eq!(session.phase(), SessionPhase::countdown(5));
        assert!(session.surface().is_none());
        assert!(!session.handle().estimator_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_activates_and_starts_estimator() {
        let mut session = session_with(Vec::new());
        let handle = session.handle();

        session.run_countdown().await;

        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.surface().is_some());
        assert!(handle.estimator_running());

        session.stop_estimator().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_countdown_never_activates() {
        let mut session = session_with(Vec::new());
        let handle = session.handle();

        handle.shutdown();
        session.run().await.unwrap();

        assert!(!session.phase().is_active());
        assert!(session.surface().is_none());
        assert!(!handle.estimator_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_activate_is_a_no_op() {
        let mut session = session_with(Vec::new());

        session.run_countdown().await;
        assert!(session.estimator_task.is_some());

        // A second activation attempt must not restart anything
        session.activate();
        assert!(session.estimator.start().is_none());

        session.stop_estimator().await;
    }
}
