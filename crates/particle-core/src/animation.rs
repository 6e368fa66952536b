//! Per-frame animation state: the elapsed clock, pointer side-channel and
//! the model rotation derived from them.

use crate::constants::{
    POINTER_INFLUENCE, POINTER_ROTATION_GAIN, TILT_AMPLITUDE, TILT_FREQUENCY,
};
use crate::tier::QualityTier;
use glam::{Mat4, Vec2};

/// Wall-clock seconds since the first admitted frame.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    start_ms: Option<f64>,
}

impl FrameClock {
    pub fn elapsed_sec(&mut self, now_ms: f64) -> f32 {
        let start = *self.start_ms.get_or_insert(now_ms);
        ((now_ms - start).max(0.0) / 1000.0) as f32
    }
}

/// Last pointer position in normalised device coordinates (x right, y up,
/// both in `[-1, 1]`). Disabled trackers ignore every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    enabled: bool,
    ndc: Vec2,
}

impl PointerTracker {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ndc: Vec2::ZERO,
        }
    }

    /// Record a pointer sample in client pixels. Degenerate viewports and
    /// non-finite coordinates are dropped.
    pub fn record(&mut self, client_x: f64, client_y: f64, viewport_w: f64, viewport_h: f64) {
        if !self.enabled || viewport_w <= 0.0 || viewport_h <= 0.0 {
            return;
        }
        let x = (client_x / viewport_w) * 2.0 - 1.0;
        let y = -(client_y / viewport_h) * 2.0 + 1.0;
        if x.is_finite() && y.is_finite() {
            self.ndc = Vec2::new(x as f32, y as f32);
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }
}

/// Everything a draw needs from the animation side for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub elapsed_sec: f32,
    /// Rotation about X (`x`) and Y (`y`) in radians.
    pub rotation: Vec2,
}

impl FrameUpdate {
    pub fn model_matrix(&self) -> Mat4 {
        // Euler XYZ with z = 0
        Mat4::from_rotation_x(self.rotation.x) * Mat4::from_rotation_y(self.rotation.y)
    }
}

/// Continuous spin about Y, slow tilt about X, and on pointer-tracking tiers
/// a small bias toward the last pointer position.
pub fn rotation_at(elapsed_sec: f32, tier: &QualityTier, pointer: Option<Vec2>) -> Vec2 {
    let mut ry = elapsed_sec * tier.rotation_speed;
    let mut rx = (elapsed_sec * TILT_FREQUENCY).sin() * TILT_AMPLITUDE;
    if tier.tracks_pointer() {
        if let Some(p) = pointer {
            ry += p.x * POINTER_INFLUENCE * POINTER_ROTATION_GAIN;
            rx += p.y * POINTER_INFLUENCE * POINTER_ROTATION_GAIN;
        }
    }
    Vec2::new(rx, ry)
}
