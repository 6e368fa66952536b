//! Render loop lifecycle, independent of the browser.
//!
//! `Uninitialized -> Running -> Disposed`. The loop holds at most one pending
//! refresh callback. Each callback either skips (governor), or advances the
//! clock, draws, and only then asks for the next callback, so frame N+1 can
//! never start before frame N's draw has returned. Disposal cancels the
//! pending callback and is terminal.

use crate::animation::{rotation_at, FrameClock, FrameUpdate, PointerTracker};
use crate::governor::FrameGovernor;
use crate::tier::QualityTier;
use std::fmt;
use thiserror::Error;

/// Source of display-refresh callbacks (`requestAnimationFrame` in a browser,
/// a simulated clock in tests).
pub trait FrameScheduler {
    type Handle: Copy + fmt::Debug;

    /// Ask for one callback on the next refresh. `None` if the platform
    /// refused; the loop then simply stops receiving frames.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Whatever consumes a frame's animation state and puts pixels on screen.
pub trait DrawTarget {
    type Error: fmt::Debug;

    fn draw(&mut self, frame: &FrameUpdate) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Disposed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoopError {
    #[error("render loop has been disposed")]
    Disposed,
    #[error("render loop is already running")]
    AlreadyStarted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Too soon after the last drawn frame; rescheduled without work.
    Skipped,
    Drawn(FrameUpdate),
    /// Callback arrived outside `Running`; nothing done, nothing rescheduled.
    Halted,
}

pub struct RenderLoop<S: FrameScheduler> {
    tier: QualityTier,
    scheduler: S,
    state: LoopState,
    pending: Option<S::Handle>,
    governor: FrameGovernor,
    clock: FrameClock,
    frames_drawn: u64,
}

impl<S: FrameScheduler> RenderLoop<S> {
    pub fn new(tier: QualityTier, scheduler: S) -> Self {
        Self {
            governor: FrameGovernor::new(tier.target_frame_interval_ms()),
            tier,
            scheduler,
            state: LoopState::Uninitialized,
            pending: None,
            clock: FrameClock::default(),
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn governor(&self) -> &FrameGovernor {
        &self.governor
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Enter `Running` and request the first callback.
    pub fn start(&mut self) -> Result<(), LoopError> {
        match self.state {
            LoopState::Disposed => Err(LoopError::Disposed),
            LoopState::Running => Err(LoopError::AlreadyStarted),
            LoopState::Uninitialized => {
                self.state = LoopState::Running;
                self.schedule_next();
                log::info!(
                    "[loop] running at {} fps target ({:.1} ms)",
                    self.tier.target_fps,
                    self.governor.interval_ms()
                );
                Ok(())
            }
        }
    }

    /// Handle one refresh callback at `now_ms`.
    pub fn on_frame<T: DrawTarget>(
        &mut self,
        now_ms: f64,
        pointer: &PointerTracker,
        target: &mut T,
    ) -> FrameOutcome {
        // The callback that got us here is no longer pending.
        self.pending = None;
        if self.state != LoopState::Running {
            return FrameOutcome::Halted;
        }
        if !self.governor.admit(now_ms) {
            self.schedule_next();
            return FrameOutcome::Skipped;
        }

        let elapsed_sec = self.clock.elapsed_sec(now_ms);
        let pointer_ndc = pointer.enabled().then(|| pointer.ndc());
        let update = FrameUpdate {
            elapsed_sec,
            rotation: rotation_at(elapsed_sec, &self.tier, pointer_ndc),
        };
        if let Err(e) = target.draw(&update) {
            log::warn!("[loop] draw failed: {:?}", e);
        }
        self.frames_drawn += 1;
        self.schedule_next();
        FrameOutcome::Drawn(update)
    }

    /// Cancel any pending callback and enter `Disposed`. Safe to call in any
    /// state and any number of times; returns whether this call did the
    /// transition.
    pub fn dispose(&mut self) -> bool {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state == LoopState::Disposed {
            return false;
        }
        log::debug!(
            "[loop] disposed after {} frames ({} skipped)",
            self.frames_drawn,
            self.governor.skipped()
        );
        self.state = LoopState::Disposed;
        true
    }

    fn schedule_next(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("[loop] refresh callback unavailable; loop stalls");
        }
    }
}

impl<S: FrameScheduler> Drop for RenderLoop<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
