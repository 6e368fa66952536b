use crate::session::Session;
use particle_core::TimerRequest;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Run `f` against the session if it is still alive and not mid-callback.
/// Listener callbacks must never throw into the page.
fn with_session(session: &Weak<RefCell<Session>>, f: impl FnOnce(&mut Session)) {
    let Some(session) = session.upgrade() else {
        return;
    };
    match session.try_borrow_mut() {
        Ok(mut s) => f(&mut s),
        Err(_) => log::warn!("[events] session busy; event dropped"),
    };
}

/// Window listeners installed for the lifetime of a running session.
pub struct Listeners {
    window: web::Window,
    pointermove: Option<Closure<dyn FnMut(web::PointerEvent)>>,
    resize: Closure<dyn FnMut()>,
}

impl Listeners {
    /// Pointer tracking is only wired when the tier uses it.
    pub fn install(
        window: &web::Window,
        session: Weak<RefCell<Session>>,
        track_pointer: bool,
    ) -> Self {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);

        let pointermove = track_pointer.then(|| {
            let session = session.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                with_session(&session, |s| {
                    s.on_pointer_move(ev.client_x() as f64, ev.client_y() as f64)
                });
            }) as Box<dyn FnMut(_)>);
            if let Err(e) = window.add_event_listener_with_callback_and_add_event_listener_options(
                "pointermove",
                closure.as_ref().unchecked_ref(),
                &opts,
            ) {
                log::warn!("[events] pointermove listener: {:?}", e);
            }
            closure
        });

        let resize = Closure::wrap(Box::new(move || {
            with_session(&session, Session::on_resize);
        }) as Box<dyn FnMut()>);
        if let Err(e) = window.add_event_listener_with_callback_and_add_event_listener_options(
            "resize",
            resize.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[events] resize listener: {:?}", e);
        }

        Self {
            window: window.clone(),
            pointermove,
            resize,
        }
    }

    /// Detach both listeners; each removal is independent.
    pub fn remove(self) {
        if let Some(cb) = &self.pointermove {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("pointermove", cb.as_ref().unchecked_ref())
            {
                log::warn!("[events] remove pointermove: {:?}", e);
            }
        }
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref())
        {
            log::warn!("[events] remove resize: {:?}", e);
        }
    }
}

/// The single resize timer slot. Both stages share one `setTimeout` handle so
/// arming either stage replaces whatever was pending.
pub struct ResizeTimer {
    window: web::Window,
    debounce: Closure<dyn FnMut()>,
    confirm: Closure<dyn FnMut()>,
    active: Option<i32>,
}

impl ResizeTimer {
    pub fn new(window: &web::Window, session: Weak<RefCell<Session>>) -> Self {
        let debounce_session = session.clone();
        let debounce = Closure::wrap(Box::new(move || {
            with_session(&debounce_session, Session::on_debounce_elapsed);
        }) as Box<dyn FnMut()>);
        let confirm = Closure::wrap(Box::new(move || {
            with_session(&session, Session::on_confirm_elapsed);
        }) as Box<dyn FnMut()>);
        Self {
            window: window.clone(),
            debounce,
            confirm,
            active: None,
        }
    }

    pub fn arm(&mut self, request: TimerRequest) {
        self.cancel();
        let cb = match request {
            TimerRequest::Debounce { .. } => &self.debounce,
            TimerRequest::Confirm { .. } => &self.confirm,
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                request.delay_ms().round() as i32,
            ) {
            Ok(id) => self.active = Some(id),
            Err(e) => log::warn!("[events] setTimeout: {:?}", e),
        }
    }

    /// The armed timer has fired; its handle is spent.
    pub fn fired(&mut self) {
        self.active = None;
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.active.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}
