// Host-side tests for the render loop lifecycle and frame admission, driven by
// a simulated refresh clock.

use particle_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default, Debug)]
struct SimState {
    next_handle: u32,
    pending: Option<u32>,
    requested: u32,
    cancelled: Vec<u32>,
    refuse: bool,
}

#[derive(Clone, Default)]
struct SimScheduler(Rc<RefCell<SimState>>);

impl FrameScheduler for SimScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        let mut s = self.0.borrow_mut();
        if s.refuse {
            return None;
        }
        assert!(s.pending.is_none(), "at most one callback may be pending");
        s.next_handle += 1;
        s.requested += 1;
        s.pending = Some(s.next_handle);
        s.pending
    }

    fn cancel_frame(&mut self, handle: u32) {
        let mut s = self.0.borrow_mut();
        if s.pending == Some(handle) {
            s.pending = None;
        }
        s.cancelled.push(handle);
    }
}

#[derive(Default)]
struct Recorder {
    sched: Rc<RefCell<SimState>>,
    frames: Vec<FrameUpdate>,
    fail: bool,
}

impl DrawTarget for Recorder {
    type Error = &'static str;

    fn draw(&mut self, frame: &FrameUpdate) -> Result<(), &'static str> {
        // The next frame is only requested after this draw returns.
        assert!(self.sched.borrow().pending.is_none());
        self.frames.push(*frame);
        if self.fail {
            Err("surface lost")
        } else {
            Ok(())
        }
    }
}

fn setup(tier: QualityTier) -> (RenderLoop<SimScheduler>, Recorder) {
    let sched = SimScheduler::default();
    let recorder = Recorder {
        sched: sched.0.clone(),
        ..Default::default()
    };
    (RenderLoop::new(tier, sched), recorder)
}

/// Fire the pending callback (if any) at every `step_ms` from `from_ms` up to
/// but excluding `to_ms`. Returns the timestamps of drawn frames.
fn run(
    lp: &mut RenderLoop<SimScheduler>,
    target: &mut Recorder,
    pointer: &PointerTracker,
    from_ms: f64,
    to_ms: f64,
    step_ms: f64,
) -> Vec<f64> {
    let mut drawn = Vec::new();
    let mut k = 0u64;
    loop {
        let now = from_ms + k as f64 * step_ms;
        if now >= to_ms {
            break;
        }
        let fired = lp.scheduler().0.borrow_mut().pending.take();
        if fired.is_some() {
            if let FrameOutcome::Drawn(_) = lp.on_frame(now, pointer, target) {
                drawn.push(now);
            }
        }
        k += 1;
    }
    drawn
}

#[test]
fn desktop_frame_count_tracks_60fps() {
    let tier = profile(1920, "", 8);
    let (mut lp, mut target) = setup(tier);
    lp.start().unwrap();
    let drawn = run(&mut lp, &mut target, &PointerTracker::new(true), 0.0, 1000.0, 0.25);

    let expected = 1000.0 / tier.target_frame_interval_ms();
    assert!(
        (drawn.len() as f64 - expected).abs() <= 1.0,
        "drew {} frames, expected ~{expected}",
        drawn.len()
    );
    assert_eq!(lp.frames_drawn(), drawn.len() as u64);
}

#[test]
fn mobile_frame_count_tracks_30fps() {
    let tier = profile(390, "iPhone", 6);
    let (mut lp, mut target) = setup(tier);
    lp.start().unwrap();
    let drawn = run(&mut lp, &mut target, &PointerTracker::new(false), 0.0, 1000.0, 0.25);

    let expected = 1000.0 / tier.target_frame_interval_ms();
    assert!((drawn.len() as f64 - expected).abs() <= 1.0);
    assert!(lp.governor().skipped() > 0);
}

#[test]
fn no_frame_runs_before_the_interval() {
    let tier = profile(1920, "", 8);
    let (mut lp, mut target) = setup(tier);
    lp.start().unwrap();
    let drawn = run(&mut lp, &mut target, &PointerTracker::new(true), 3.0, 2003.0, 1.0);
    for pair in drawn.windows(2) {
        assert!(pair[1] - pair[0] >= tier.target_frame_interval_ms());
    }
}

#[test]
fn clock_and_rotation_advance_per_frame() {
    let tier = profile(1920, "", 8);
    let (mut lp, mut target) = setup(tier);
    lp.start().unwrap();
    run(&mut lp, &mut target, &PointerTracker::new(true), 500.0, 2500.0, 16.0);

    let first = target.frames.first().unwrap();
    let last = target.frames.last().unwrap();
    assert_eq!(first.elapsed_sec, 0.0);
    assert!(last.elapsed_sec > 1.9 && last.elapsed_sec < 2.0);
    assert!(last.rotation.y > first.rotation.y);
    assert!((last.rotation.y - last.elapsed_sec * tier.rotation_speed).abs() < 1e-6);
}

#[test]
fn pointer_bias_reaches_the_frame_on_desktop() {
    let tier = profile(1920, "", 8);
    let (mut lp, mut target) = setup(tier);
    let mut pointer = PointerTracker::new(tier.tracks_pointer());
    pointer.record(1920.0, 0.0, 1920.0, 1080.0);
    lp.start().unwrap();
    run(&mut lp, &mut target, &pointer, 0.0, 1.0, 1.0);
    let f = target.frames[0];
    assert!(f.rotation.y > 0.0);
    assert!(f.rotation.x > 0.0);
}

#[test]
fn draw_errors_do_not_stop_the_loop() {
    let (mut lp, mut target) = setup(profile(1920, "", 8));
    target.fail = true;
    lp.start().unwrap();
    let drawn = run(&mut lp, &mut target, &PointerTracker::default(), 0.0, 200.0, 1.0);
    assert!(drawn.len() > 5);
    assert!(lp.has_pending_frame());
}

#[test]
fn start_is_one_shot() {
    let (mut lp, _) = setup(profile(1920, "", 8));
    assert_eq!(lp.state(), LoopState::Uninitialized);
    lp.start().unwrap();
    assert_eq!(lp.state(), LoopState::Running);
    assert_eq!(lp.start(), Err(LoopError::AlreadyStarted));
    assert_eq!(lp.scheduler().0.borrow().requested, 1);
}

#[test]
fn dispose_before_start_is_safe() {
    let (mut lp, _) = setup(profile(1920, "", 8));
    assert!(lp.dispose());
    assert_eq!(lp.state(), LoopState::Disposed);
    assert!(!lp.has_pending_frame());
    assert_eq!(lp.start(), Err(LoopError::Disposed));
    let s = lp.scheduler().0.borrow();
    assert_eq!(s.requested, 0);
    assert!(s.pending.is_none());
}

#[test]
fn dispose_twice_cancels_once() {
    let (mut lp, mut target) = setup(profile(1920, "", 8));
    lp.start().unwrap();
    run(&mut lp, &mut target, &PointerTracker::default(), 0.0, 100.0, 1.0);
    assert!(lp.has_pending_frame());

    assert!(lp.dispose());
    assert!(!lp.dispose());
    let s = lp.scheduler().0.borrow();
    assert!(s.pending.is_none());
    assert_eq!(s.cancelled.len(), 1);
}

#[test]
fn late_callback_after_dispose_is_inert() {
    let (mut lp, mut target) = setup(profile(1920, "", 8));
    lp.start().unwrap();
    lp.dispose();
    let before = lp.scheduler().0.borrow().requested;
    let outcome = lp.on_frame(1000.0, &PointerTracker::default(), &mut target);
    assert_eq!(outcome, FrameOutcome::Halted);
    assert!(target.frames.is_empty());
    assert_eq!(lp.scheduler().0.borrow().requested, before);
    assert!(!lp.has_pending_frame());
}

#[test]
fn refused_schedule_stalls_without_panicking() {
    let (mut lp, mut target) = setup(profile(1920, "", 8));
    lp.scheduler().0.borrow_mut().refuse = true;
    lp.start().unwrap();
    assert!(!lp.has_pending_frame());
    let drawn = run(&mut lp, &mut target, &PointerTracker::default(), 0.0, 100.0, 1.0);
    assert!(drawn.is_empty());
    assert!(lp.dispose());
}

#[test]
fn dropping_a_running_loop_cancels_its_callback() {
    let (mut lp, _) = setup(profile(1920, "", 8));
    let state = lp.scheduler().0.clone();
    lp.start().unwrap();
    assert!(state.borrow().pending.is_some());
    drop(lp);
    assert!(state.borrow().pending.is_none());
    assert_eq!(state.borrow().cancelled.len(), 1);
}
