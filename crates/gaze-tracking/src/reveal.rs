//! Reveal surface: an opaque overlay punched at the gaze point.
//!
//! The surface starts fully opaque and accumulates transparent
//! circular holes wherever the gaze has rested. Erasure is monotonic:
//! nothing ever refills after activation.

use std::path::Path;

use image::{Rgba, RgbaImage};

use gaze_models::{ColorScheme, ScreenCoordinate, Viewport};

use crate::config::TrackingConfig;
use crate::error::TrackingResult;

/// Full-viewport overlay surface.
pub struct RevealSurface {
    canvas: RgbaImage,
    radius: u32,
    offset_x: f64,
    offset_y: f64,
}

impl RevealSurface {
    /// Create the surface filled fully opaque.
    ///
    /// The fill color follows the ambient light-scheme preference,
    /// read once at activation: dark scheme gets a black overlay,
    /// light gets white.
    pub fn opaque(viewport: Viewport, scheme: ColorScheme, config: &TrackingConfig) -> Self {
        let width = viewport.width.max(1.0) as u32;
        let height = viewport.height.max(1.0) as u32;
        let fill = match scheme {
            ColorScheme::Dark => Rgba([0, 0, 0, 255]),
            ColorScheme::Light => Rgba([255, 255, 255, 255]),
        };

        let mut canvas = RgbaImage::new(width, height);
        for pixel in canvas.pixels_mut() {
            *pixel = fill;
        }

        Self {
            canvas,
            radius: config.erase_radius,
            offset_x: config.erase_offset_x,
            offset_y: config.erase_offset_y,
        }
    }

    /// Punch a transparent circle centered at the coordinate's
    /// indicator anchor.
    ///
    /// Destination-out semantics: overlay pixels under the circle
    /// become fully transparent and stay transparent permanently.
    /// Regions outside the canvas are ignored.
    pub fn erase_at(&mut self, coord: ScreenCoordinate) {
        let cx = coord.x.ceil() + self.offset_x;
        let cy = coord.y.ceil() + self.offset_y;
        let r = self.radius as f64;

        let x_lo = (cx - r).floor().max(0.0) as i64;
        let x_hi = (cx + r).ceil().min(self.canvas.width() as f64 - 1.0) as i64;
        let y_lo = (cy - r).floor().max(0.0) as i64;
        let y_hi = (cy + r).ceil().min(self.canvas.height() as f64 - 1.0) as i64;

        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.canvas.get_pixel_mut(x as u32, y as u32)[3] = 0;
                }
            }
        }
    }

    /// Whether the overlay pixel at (x, y) has been erased.
    pub fn is_erased(&self, x: u32, y: u32) -> bool {
        self.canvas
            .get_pixel_checked(x, y)
            .is_some_and(|pixel| pixel[3] == 0)
    }

    /// Number of fully transparent pixels.
    pub fn erased_pixels(&self) -> usize {
        self.canvas.pixels().filter(|pixel| pixel[3] == 0).count()
    }

    /// Surface dimensions in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// Write the surface out as a PNG.
    pub fn save_png(&self, path: &Path) -> TrackingResult<()> {
        self.canvas.save(path)?;
        Ok(())
    }
}
