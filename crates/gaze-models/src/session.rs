//! Session lifecycle and ambient environment values.

use serde::{Deserialize, Serialize};

/// Countdown-then-active lifecycle gate for the whole feature.
///
/// Starts at `Countdown(5)`, decrements once per tick, and
/// transitions to `Active` exactly once when the count reaches zero.
/// `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    Countdown { seconds_remaining: u8 },
    Active,
}

impl SessionPhase {
    /// Create a countdown phase.
    pub fn countdown(seconds_remaining: u8) -> Self {
        SessionPhase::Countdown { seconds_remaining }
    }

    /// Whether the estimation loop is allowed to run.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Active)
    }
}

/// Ambient light-scheme preference, read once at activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Viewport dimensions in pixels, read at mapping time (not cached).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Client width in pixels
    pub width: f64,
    /// Client height in pixels
    pub height: f64,
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_activity() {
        assert!(!SessionPhase::countdown(5).is_active());
        assert!(!SessionPhase::countdown(0).is_active());
        assert!(SessionPhase::Active.is_active());
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&SessionPhase::countdown(3)).unwrap();
        assert!(json.contains("\"countdown\""));
        assert!(json.contains("\"seconds_remaining\":3"));

        let json = serde_json::to_string(&SessionPhase::Active).unwrap();
        assert!(json.contains("\"active\""));
    }
}
