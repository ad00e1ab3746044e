//! Zoom buttons and slider

use serde::{Deserialize, Serialize};

/// Smallest zoom level
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom level
pub const MAX_ZOOM: f64 = 2.5;
/// Increment of the zoom buttons
pub const ZOOM_BUTTON_STEP: f64 = 0.25;
/// Increment of the zoom slider
pub const ZOOM_SLIDER_STEP: f64 = 0.1;

/// Instruction for the rendering engine to animate to a zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomCommand {
    /// Target zoom level
    pub level: f64,
    /// Animation duration
    pub duration_ms: u64,
}

/// Local zoom level of the toolbar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomControl {
    level: f64,
    transition_ms: u64,
}

impl ZoomControl {
    /// Create control at a level, clamped to bounds
    #[must_use]
    pub fn new(level: f64, transition_ms: u64) -> Self {
        Self {
            level: clamp(level),
            transition_ms,
        }
    }

    /// Current level
    #[inline]
    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Step in, unless already at the maximum
    pub fn zoom_in(&mut self) -> ZoomCommand {
        if self.level < MAX_ZOOM {
            self.level = clamp(self.level + ZOOM_BUTTON_STEP);
        }
        self.command()
    }

    /// Step out, unless already at the minimum
    pub fn zoom_out(&mut self) -> ZoomCommand {
        if self.level > MIN_ZOOM {
            self.level = clamp(self.level - ZOOM_BUTTON_STEP);
        }
        self.command()
    }

    /// Jump to a slider position, snapped to the slider step
    pub fn set_from_slider(&mut self, level: f64) -> ZoomCommand {
        self.level = clamp((level / ZOOM_SLIDER_STEP).round() * ZOOM_SLIDER_STEP);
        self.command()
    }

    /// Adopt a level committed by the viewport
    ///
    /// Returns whether the local level changed. No command is produced since
    /// the viewport is already there.
    pub fn sync(&mut self, level: f64) -> bool {
        let level = clamp(level);
        if (level - self.level).abs() < f64::EPSILON {
            return false;
        }
        self.level = level;
        true
    }

    fn command(&self) -> ZoomCommand {
        ZoomCommand {
            level: self.level,
            duration_ms: self.transition_ms,
        }
    }
}

fn clamp(level: f64) -> f64 {
    if level.is_nan() {
        return MIN_ZOOM;
    }
    level.clamp(MIN_ZOOM, MAX_ZOOM)
}
