//! Gaze reveal session binary.
//!
//! Runs a full countdown -> active -> reveal session against a
//! synthetic camera and a scripted landmark source that sweeps the
//! gaze across the viewport, then writes the punched overlay to a
//! PNG. Swap the sources for real camera/model bindings to run live.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gaze_models::{FaceBox, FaceDetection, Keypoint, KeypointName};
use gaze_tracking::{
    FixedEnvironment, JitteredLandmarkSource, ScriptedLandmarkSource, SessionController,
    SyntheticCamera, TrackingConfig,
};

/// Script a horizontal sweep of the eyes across a fixed face box.
///
/// Keypoints are authored pre-mirror: the estimator mirrors X against
/// the frame width, so the sweep runs left-to-right on screen.
fn sweep_script(config: &TrackingConfig, frames: usize) -> Vec<Vec<FaceDetection>> {
    let bbox = FaceBox::new(200.0, 140.0, 240.0, 240.0);
    let eye_gap = 60.0;
    let frame_width = config.frame_width as f64;

    (0..frames)
        .map(|i| {
            let t = i as f64 / (frames.max(2) - 1) as f64;
            // Post-mirror center sweeps the box interior; eye Y runs
            // down the vertical band so the trail crosses the screen
            let center_x = bbox.x_min + bbox.width * (0.05 + 0.9 * t);
            let center_y = bbox.y_min + bbox.height * (0.22 + 0.16 * t);
            let pre_mirror_x = frame_width - center_x;

            vec![FaceDetection::new(
                vec![
                    Keypoint::new(
                        KeypointName::LeftEye,
                        pre_mirror_x - eye_gap / 2.0,
                        center_y - 2.0,
                    ),
                    Keypoint::new(
                        KeypointName::RightEye,
                        pre_mirror_x + eye_gap / 2.0,
                        center_y + 2.0,
                    ),
                ],
                bbox,
                0.97,
            )]
        })
        .collect()
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,gaze=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting gaze-session");

    let config = TrackingConfig::from_env();
    info!("Tracking config: {:?}", config);

    let active_secs: u64 = std::env::var("GAZE_DEMO_ACTIVE_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);
    let output_path = PathBuf::from(
        std::env::var("GAZE_OUTPUT_PATH").unwrap_or_else(|_| "reveal.png".to_string()),
    );

    // Enough scripted frames to cover the active window at the
    // configured sampling rate
    let frames = (active_secs * 1000 / config.frame_interval.as_millis().max(1) as u64) as usize;
    let source = Arc::new(JitteredLandmarkSource::new(
        ScriptedLandmarkSource::new(sweep_script(&config, frames.max(2))),
        1.5,
    ));
    let camera = Arc::new(SyntheticCamera::new(config.frame_width, config.frame_height));
    let env = Arc::new(FixedEnvironment::from_env());

    let mut session = SessionController::new(source, camera, env, config);
    let handle = session.handle();
    info!(session_id = %session.session_id(), "Session created");

    // Stop after the active window elapses, or on Ctrl-C
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        let mut phases = shutdown_handle.phase_receiver();
        // Wait for activation, then let the sweep play out
        while !phases.borrow_and_update().is_active() {
            if phases.changed().await.is_err() {
                return;
            }
        }
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
            }
            _ = tokio::time::sleep(Duration::from_secs(active_secs)) => {}
        }
        shutdown_handle.shutdown();
    });

    if let Err(e) = session.run().await {
        error!("Session error: {}", e);
        std::process::exit(1);
    }

    match session.surface() {
        Some(surface) => {
            if let Err(e) = surface.save_png(&output_path) {
                error!("Failed to write {}: {}", output_path.display(), e);
                std::process::exit(1);
            }
            info!(
                erased_pixels = surface.erased_pixels(),
                output = %output_path.display(),
                "Reveal surface written"
            );
        }
        None => {
            info!("Session never activated, nothing to write");
        }
    }

    info!("Session shutdown complete");
}
