//! Frame acquisition contract.
//!
//! Real camera capture is a host capability; this module fixes the
//! frame format the rest of the pipeline consumes. Acquisition
//! failure is logged by the caller and the feature never starts; no
//! fallback frame source.

use async_trait::async_trait;

use crate::error::{TrackingError, TrackingResult};

/// One raw RGB frame (width * height * 3 bytes).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Raw RGB bytes, row-major
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a frame, validating the buffer length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> TrackingResult<Self> {
        let expected = (width * height * 3) as usize;
        if data.len() != expected {
            return Err(TrackingError::InvalidFrame {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a frame filled with a single value.
    pub fn solid(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width * height * 3) as usize],
        }
    }
}

/// Live frame source (camera stand-in).
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Acquire the current frame.
    async fn next_frame(&self) -> TrackingResult<Frame>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Frame source producing solid frames at a fixed size.
///
/// The synthetic landmark sources ignore pixel content, so a blank
/// frame is enough to drive the loop in tests and the demo.
#[derive(Debug, Clone)]
pub struct SyntheticCamera {
    width: u32,
    height: u32,
}

impl SyntheticCamera {
    /// Create a synthetic camera at the given frame size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[async_trait]
impl FrameSource for SyntheticCamera {
    async fn next_frame(&self) -> TrackingResult<Frame> {
        Ok(Frame::solid(self.width, self.height, 0))
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_length_validation() {
        assert!(Frame::new(2, 2, vec![0; 12]).is_ok());

        let err = Frame::new(2, 2, vec![0; 11]).unwrap_err();
        match err {
            TrackingError::InvalidFrame { expected, actual } => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 11);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_synthetic_camera_frame_size() {
        let camera = SyntheticCamera::new(640, 480);
        let frame = camera.next_frame().await.unwrap();
        assert_eq!(frame.width, 640);
        assert_eq!(frame.height, 480);
        assert_eq!(frame.data.len(), 640 * 480 * 3);
    }
}
