//! Debounce-then-confirm viewport reconciliation.
//!
//! Mobile browsers fire `resize` while their toolbars slide in and out during
//! scroll. Resizing the surface on each of those produces visible jitter, so a
//! size change is only committed once it has been quiet for the debounce
//! window, exceeds the pixel threshold, and is still the same after a short
//! confirmation delay.
//!
//! The reconciler owns no timers. Each transition returns the timer the host
//! should arm next; the host calls back into the matching `*_elapsed` method
//! when it fires.

use crate::constants::{RESIZE_CONFIRM_MS, RESIZE_DEBOUNCE_MS, RESIZE_THRESHOLD_PX};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewportError {
    #[error("viewport has no area ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ViewportError> {
        if width == 0 || height == 0 {
            return Err(ViewportError::Empty { width, height });
        }
        Ok(Self { width, height })
    }

    /// Build from CSS pixel dimensions as reported by the window. Fractional
    /// values are truncated.
    pub fn from_css(width: f64, height: f64) -> Result<Self, ViewportError> {
        let clamp = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v.min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        Self::new(clamp(width), clamp(height))
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing-store size for a given pixel ratio, never below 1x1.
    pub fn scaled(&self, pixel_ratio: f32) -> (u32, u32) {
        let w = (self.width as f32 * pixel_ratio) as u32;
        let h = (self.height as f32 * pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }

    /// `scaled`, shrunk uniformly so neither side exceeds `max_dimension`
    /// (the device's largest 2D texture).
    pub fn scaled_within(&self, pixel_ratio: f32, max_dimension: u32) -> (u32, u32) {
        let (w, h) = self.scaled(pixel_ratio);
        let max_dimension = max_dimension.max(1);
        let longest = w.max(h);
        if longest <= max_dimension {
            return (w, h);
        }
        let fit = |v: u32| {
            ((v as u64 * max_dimension as u64 / longest as u64) as u32).clamp(1, max_dimension)
        };
        (fit(w), fit(h))
    }

    /// True when either dimension moved by more than `threshold_px`.
    pub fn differs_from(&self, other: &ViewportSize, threshold_px: u32) -> bool {
        self.width.abs_diff(other.width) > threshold_px
            || self.height.abs_diff(other.height) > threshold_px
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconcilerConfig {
    pub debounce_ms: f64,
    pub confirm_ms: f64,
    pub threshold_px: u32,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: RESIZE_DEBOUNCE_MS,
            confirm_ms: RESIZE_CONFIRM_MS,
            threshold_px: RESIZE_THRESHOLD_PX,
        }
    }
}

/// Timer the host should arm (replacing any timer it already holds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerRequest {
    Debounce { delay_ms: f64 },
    Confirm { delay_ms: f64 },
}

impl TimerRequest {
    pub fn delay_ms(&self) -> f64 {
        match *self {
            TimerRequest::Debounce { delay_ms } | TimerRequest::Confirm { delay_ms } => delay_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReconcileState {
    Idle,
    /// Waiting out the debounce window.
    Pending,
    /// Debounce passed with a significant change; waiting to re-measure.
    Confirming { measured: ViewportSize },
}

#[derive(Clone, Debug)]
pub struct ViewportReconciler {
    config: ReconcilerConfig,
    committed: ViewportSize,
    state: ReconcileState,
}

impl ViewportReconciler {
    pub fn new(initial: ViewportSize, config: ReconcilerConfig) -> Self {
        Self {
            config,
            committed: initial,
            state: ReconcileState::Idle,
        }
    }

    pub fn committed(&self) -> ViewportSize {
        self.committed
    }

    pub fn state(&self) -> ReconcileState {
        self.state
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// A raw resize notification. Always restarts the debounce window,
    /// abandoning any confirmation in flight.
    pub fn notify_resize(&mut self) -> TimerRequest {
        self.state = ReconcileState::Pending;
        TimerRequest::Debounce {
            delay_ms: self.config.debounce_ms,
        }
    }

    /// The debounce timer fired. Returns the confirmation timer to arm when
    /// `current` is a significant change from the committed size.
    pub fn debounce_elapsed(&mut self, current: Option<ViewportSize>) -> Option<TimerRequest> {
        if self.state != ReconcileState::Pending {
            return None;
        }
        match current {
            Some(size) if size.differs_from(&self.committed, self.config.threshold_px) => {
                self.state = ReconcileState::Confirming { measured: size };
                Some(TimerRequest::Confirm {
                    delay_ms: self.config.confirm_ms,
                })
            }
            _ => {
                self.state = ReconcileState::Idle;
                None
            }
        }
    }

    /// The confirmation timer fired. Returns the size to apply if the
    /// viewport still matches what the debounce stage measured.
    pub fn confirm_elapsed(&mut self, current: Option<ViewportSize>) -> Option<ViewportSize> {
        let ReconcileState::Confirming { measured } = self.state else {
            return None;
        };
        self.state = ReconcileState::Idle;
        if current != Some(measured) {
            log::debug!(
                "[viewport] {}x{} did not hold; keeping {}x{}",
                measured.width,
                measured.height,
                self.committed.width,
                self.committed.height
            );
            return None;
        }
        log::info!(
            "[viewport] commit {}x{} -> {}x{}",
            self.committed.width,
            self.committed.height,
            measured.width,
            measured.height
        );
        self.committed = measured;
        Some(measured)
    }

    /// Forget any in-flight stage, e.g. when the host cancels its timer.
    pub fn reset(&mut self) {
        self.state = ReconcileState::Idle;
    }
}
