// Host-side tests for the debounce-then-confirm resize protocol, driven by a
// simulated single-timer host.

use particle_core::*;

fn size(w: u32, h: u32) -> ViewportSize {
    ViewportSize::new(w, h).unwrap()
}

/// Mimics the browser side: one timer slot, a live window size, and a log of
/// committed surface resizes.
struct Host {
    now: f64,
    window: ViewportSize,
    timer: Option<(f64, TimerRequest)>,
    reconciler: ViewportReconciler,
    commits: Vec<ViewportSize>,
}

impl Host {
    fn new(initial: ViewportSize) -> Self {
        Self {
            now: 0.0,
            window: initial,
            timer: None,
            reconciler: ViewportReconciler::new(initial, ReconcilerConfig::default()),
            commits: Vec::new(),
        }
    }

    /// Window changes size and fires a resize notification at `at_ms`.
    fn resize(&mut self, at_ms: f64, to: ViewportSize) {
        self.advance(at_ms);
        self.window = to;
        let req = self.reconciler.notify_resize();
        self.timer = Some((self.now + req.delay_ms(), req));
    }

    /// Window changes size without any notification.
    fn silent_change(&mut self, at_ms: f64, to: ViewportSize) {
        self.advance(at_ms);
        self.window = to;
    }

    fn advance(&mut self, to_ms: f64) {
        while let Some((due, req)) = self.timer {
            if due > to_ms {
                break;
            }
            self.now = due;
            self.timer = None;
            match req {
                TimerRequest::Debounce { .. } => {
                    if let Some(next) = self.reconciler.debounce_elapsed(Some(self.window)) {
                        self.timer = Some((self.now + next.delay_ms(), next));
                    }
                }
                TimerRequest::Confirm { .. } => {
                    if let Some(applied) = self.reconciler.confirm_elapsed(Some(self.window)) {
                        self.commits.push(applied);
                    }
                }
            }
        }
        self.now = to_ms;
    }
}

#[test]
fn sub_threshold_burst_never_resizes() {
    let mut host = Host::new(size(800, 600));
    let jitter = [(810, 600), (805, 615), (820, 620), (800, 590), (795, 605)];
    for (i, &(w, h)) in jitter.iter().enumerate() {
        host.resize(i as f64 * 10.0, size(w, h));
    }
    host.advance(5_000.0);
    assert!(host.commits.is_empty());
    assert_eq!(host.reconciler.committed(), size(800, 600));
    assert_eq!(host.reconciler.state(), ReconcileState::Idle);
}

#[test]
fn stable_genuine_resize_commits_once() {
    let mut host = Host::new(size(800, 600));
    host.resize(100.0, size(1200, 900));
    host.advance(5_000.0);
    assert_eq!(host.commits, vec![size(1200, 900)]);
    assert_eq!(host.reconciler.committed(), size(1200, 900));
}

#[test]
fn nothing_commits_before_both_windows_pass() {
    let cfg = ReconcilerConfig::default();
    let mut host = Host::new(size(800, 600));
    host.resize(0.0, size(1200, 900));
    host.advance(cfg.debounce_ms + cfg.confirm_ms - 1.0);
    assert!(host.commits.is_empty());
    host.advance(cfg.debounce_ms + cfg.confirm_ms);
    assert_eq!(host.commits.len(), 1);
}

#[test]
fn window_drag_collapses_to_final_size() {
    let mut host = Host::new(size(800, 600));
    for step in 1..=20u32 {
        host.resize(step as f64 * 40.0, size(800 + step * 20, 600 + step * 10));
    }
    host.advance(10_000.0);
    assert_eq!(host.commits, vec![size(1200, 800)]);
}

#[test]
fn scroll_chrome_toggling_is_ignored() {
    // Mobile toolbars collapsing and expanding while the user scrolls.
    let mut host = Host::new(size(390, 664));
    for i in 0..40 {
        let h = if i % 2 == 0 { 740 } else { 664 };
        host.resize(i as f64 * 120.0, size(390, h));
    }
    host.advance(20_000.0);
    assert!(host.commits.is_empty());
}

#[test]
fn change_that_does_not_hold_is_dropped() {
    let cfg = ReconcilerConfig::default();
    let mut host = Host::new(size(800, 600));
    host.resize(0.0, size(1200, 900));
    // Inside the confirmation window the viewport moves again.
    host.silent_change(cfg.debounce_ms + cfg.confirm_ms / 2.0, size(1000, 900));
    host.advance(5_000.0);
    assert!(host.commits.is_empty());
    assert_eq!(host.reconciler.committed(), size(800, 600));
}

#[test]
fn separate_resizes_commit_separately() {
    let mut host = Host::new(size(800, 600));
    host.resize(0.0, size(1200, 900));
    host.resize(2_000.0, size(1000, 700));
    host.advance(5_000.0);
    assert_eq!(host.commits, vec![size(1200, 900), size(1000, 700)]);
}

#[test]
fn small_change_after_commit_is_measured_against_new_size() {
    let mut host = Host::new(size(800, 600));
    host.resize(0.0, size(1200, 900));
    host.resize(2_000.0, size(1210, 905));
    host.advance(5_000.0);
    assert_eq!(host.commits, vec![size(1200, 900)]);
}

#[test]
fn unreadable_viewport_skips_the_stage() {
    let mut r = ViewportReconciler::new(size(800, 600), ReconcilerConfig::default());
    r.notify_resize();
    assert_eq!(r.debounce_elapsed(None), None);
    assert_eq!(r.state(), ReconcileState::Idle);

    r.notify_resize();
    assert!(r.debounce_elapsed(Some(size(1200, 900))).is_some());
    assert_eq!(r.confirm_elapsed(None), None);
    assert_eq!(r.committed(), size(800, 600));
}
