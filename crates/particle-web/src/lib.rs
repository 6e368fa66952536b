#![cfg(target_arch = "wasm32")]
//! Browser front-end for the particle backdrop: mounts a canvas into a host
//! element and drives the WebGPU/WebGL renderer from `requestAnimationFrame`.

use particle_core::RendererConfig;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod frame;
mod gpu_caps;
mod input;
mod render;
mod session;

use session::Session;

// At most one backdrop per page
static MOUNTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("particle-web loaded");
    Ok(())
}

/// Handle returned to the host view. Dropping it (or calling `unmount`)
/// tears the backdrop down.
#[wasm_bindgen]
pub struct ParticleBackground {
    session: Option<Rc<RefCell<Session>>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Attach the backdrop to the element with id `container_id`.
    #[wasm_bindgen]
    pub fn mount(container_id: &str) -> Result<ParticleBackground, JsValue> {
        if MOUNTED.swap(true, Ordering::SeqCst) {
            log::warn!("[mount] backdrop already mounted; ignoring");
            return Err(JsValue::from_str("particle background already mounted"));
        }
        match session::mount(container_id, RendererConfig::default()) {
            Ok(session) => Ok(Self {
                session: Some(session),
            }),
            Err(e) => {
                MOUNTED.store(false, Ordering::SeqCst);
                log::error!("[mount] {:?}", e);
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }

    /// Release everything the backdrop acquired. Idempotent.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session.try_borrow_mut() {
            Ok(mut s) => s.dispose(),
            // Dropping the last strong reference still disposes via `Drop`
            Err(_) => log::warn!("[mount] session busy at unmount; deferring to drop"),
        }
        drop(session);
        MOUNTED.store(false, Ordering::SeqCst);
    }

    #[wasm_bindgen(getter)]
    pub fn rendering(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.try_borrow().ok().map(|s| s.is_rendering()))
            .unwrap_or(false)
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}
