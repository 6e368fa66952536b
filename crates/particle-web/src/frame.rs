use crate::session::Session;
use particle_core::FrameScheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` scheduler. The callback closure lives in a shared
/// slot so each request hands the same JS function back to the browser.
pub struct RafScheduler {
    window: web::Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Install the per-frame closure. It holds the session weakly so the
    /// session can be dropped while a frame is still queued.
    pub fn bind(&self, session: Weak<RefCell<Session>>) {
        let closure = Closure::wrap(Box::new(move |now_ms: f64| {
            let Some(session) = session.upgrade() else {
                return;
            };
            // Re-entrancy (e.g. unmount mid-frame) drops the frame instead of panicking
            let Ok(mut s) = session.try_borrow_mut() else {
                log::warn!("[frame] session busy; frame dropped");
                return;
            };
            s.tick(now_ms);
        }) as Box<dyn FnMut(f64)>);
        *self.callback.borrow_mut() = Some(closure);
    }

    /// Forget the closure. Must not run from inside the frame callback.
    pub fn unbind(&self) {
        self.callback.borrow_mut().take();
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("[frame] cancelAnimationFrame failed: {:?}", e);
        }
    }
}
