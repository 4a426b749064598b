//! Ambient environment queries.
//!
//! The viewport and light-scheme preference come from the host. They
//! sit behind a small read-only trait so tests and the demo binary
//! can substitute fixed values.

use gaze_models::{ColorScheme, Viewport};

/// Read-only ambient environment.
///
/// The viewport is read at mapping time (not cached); the color
/// scheme is read once at activation.
pub trait Environment: Send + Sync {
    /// Current viewport dimensions in pixels.
    fn viewport(&self) -> Viewport;

    /// Light-scheme preference for the opaque fill.
    fn color_scheme(&self) -> ColorScheme;
}

/// Environment with constant values.
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
    viewport: Viewport,
    scheme: ColorScheme,
}

impl FixedEnvironment {
    /// Create an environment with the given values.
    pub fn new(viewport: Viewport, scheme: ColorScheme) -> Self {
        Self { viewport, scheme }
    }

    /// Create from environment variables, with a 1920x1080 light
    /// fallback.
    pub fn from_env() -> Self {
        let width = std::env::var("GAZE_VIEWPORT_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1920.0);
        let height = std::env::var("GAZE_VIEWPORT_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1080.0);
        let scheme = match std::env::var("GAZE_COLOR_SCHEME").as_deref() {
            Ok("dark") => ColorScheme::Dark,
            _ => ColorScheme::Light,
        };
        Self::new(Viewport::new(width, height), scheme)
    }
}

impl Default for FixedEnvironment {
    fn default() -> Self {
        Self::new(Viewport::new(1920.0, 1080.0), ColorScheme::Light)
    }
}

impl Environment for FixedEnvironment {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_environment() {
        let env = FixedEnvironment::new(Viewport::new(800.0, 600.0), ColorScheme::Dark);
        assert_eq!(env.viewport().width, 800.0);
        assert_eq!(env.color_scheme(), ColorScheme::Dark);
    }
}
