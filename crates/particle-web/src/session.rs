use crate::dom;
use crate::events::{Listeners, ResizeTimer};
use crate::frame::RafScheduler;
use crate::input;
use crate::render::GpuState;
use anyhow::anyhow;
use instant::Instant;
use particle_core::{
    profile_with, ConnectionGraph, ParticleField, PointerTracker, QualityTier, RenderLoop,
    RendererConfig, ViewportReconciler, ViewportSize,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// One mounted backdrop: the canvas, the GPU state once acquired, the loop,
/// listeners and resize timer. Created by `mount`, torn down by `dispose`.
pub struct Session {
    tier: QualityTier,
    window: web::Window,
    canvas: web::HtmlCanvasElement,
    device_pixel_ratio: f64,
    pointer: PointerTracker,
    reconciler: ViewportReconciler,
    gpu: Option<GpuState>,
    render_loop: Option<RenderLoop<RafScheduler>>,
    listeners: Option<Listeners>,
    resize_timer: Option<ResizeTimer>,
    disposed: bool,
}

/// Probe the environment, pick a tier, attach the canvas and start acquiring
/// the graphics context. The returned session is live immediately; drawing
/// begins once the GPU is ready.
pub fn mount(container_id: &str, config: RendererConfig) -> anyhow::Result<Rc<RefCell<Session>>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;
    let container = dom::find_container(&document, container_id)?;

    let probe = dom::probe_environment(&window, &config.thresholds);
    let tier = profile_with(
        &config.thresholds,
        probe.profile_width(),
        &probe.user_agent,
        probe.cores,
    );
    // A zero-area viewport still mounts; the canvas is sized 1x1 until a resize commits
    let viewport = probe.viewport.unwrap_or(ViewportSize {
        width: 1,
        height: 1,
    });
    let pixel_ratio = tier.effective_pixel_ratio(probe.device_pixel_ratio);

    let field = ParticleField::generate(config.seed, &tier);
    let graph = ConnectionGraph::for_tier(&field, &tier);
    log::info!(
        "[session] {:?} mobile={} particles={} connections={} viewport={}x{} pr={}",
        tier.class,
        tier.mobile,
        field.len(),
        graph.len(),
        viewport.width,
        viewport.height,
        pixel_ratio
    );

    let canvas = dom::attach_canvas(&document, &container)?;
    dom::size_canvas(&canvas, viewport, viewport.scaled(pixel_ratio));

    let session = Rc::new(RefCell::new(Session {
        tier,
        window,
        canvas: canvas.clone(),
        device_pixel_ratio: probe.device_pixel_ratio,
        pointer: PointerTracker::new(tier.tracks_pointer()),
        reconciler: ViewportReconciler::new(viewport, config.reconciler),
        gpu: None,
        render_loop: None,
        listeners: None,
        resize_timer: None,
        disposed: false,
    }));

    let weak = Rc::downgrade(&session);
    spawn_local(async move {
        let began = Instant::now();
        let result = GpuState::new(&canvas, &tier, &field, &graph, viewport, pixel_ratio).await;
        log::debug!("[session] graphics init took {:?}", began.elapsed());
        let Some(session) = weak.upgrade() else {
            if let Ok(mut gpu) = result {
                gpu.release();
            }
            return;
        };
        let weak = Rc::downgrade(&session);
        let Ok(mut s) = session.try_borrow_mut() else {
            log::error!("[session] busy at graphics init; renderer not started");
            if let Ok(mut gpu) = result {
                gpu.release();
            }
            return;
        };
        match result {
            Ok(gpu) => s.start(gpu, weak),
            Err(e) => s.degrade(e),
        }
    });

    Ok(session)
}

impl Session {
    pub fn is_rendering(&self) -> bool {
        self.render_loop.is_some() && !self.disposed
    }

    fn start(&mut self, mut gpu: GpuState, weak: Weak<RefCell<Session>>) {
        if self.disposed {
            // Unmounted while the context was being acquired
            gpu.release();
            return;
        }
        self.gpu = Some(gpu);

        self.listeners = Some(Listeners::install(
            &self.window,
            weak.clone(),
            self.tier.tracks_pointer(),
        ));
        self.resize_timer = Some(ResizeTimer::new(&self.window, weak.clone()));

        let scheduler = RafScheduler::new(self.window.clone());
        scheduler.bind(weak);
        let mut render_loop = RenderLoop::new(self.tier, scheduler);
        if let Err(e) = render_loop.start() {
            log::error!("[session] loop start: {}", e);
        }
        self.render_loop = Some(render_loop);
    }

    /// No graphics context: stay mounted, draw nothing.
    fn degrade(&mut self, err: anyhow::Error) {
        log::error!("[session] graphics unavailable, rendering disabled: {:?}", err);
        dom::detach_canvas(&self.canvas);
    }

    fn pixel_ratio(&self) -> f32 {
        self.tier.effective_pixel_ratio(self.device_pixel_ratio)
    }

    pub(crate) fn tick(&mut self, now_ms: f64) {
        let (Some(render_loop), Some(gpu)) = (self.render_loop.as_mut(), self.gpu.as_mut()) else {
            return;
        };
        render_loop.on_frame(now_ms, &self.pointer, gpu);
    }

    pub(crate) fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        let Some(viewport) = dom::current_viewport(&self.window) else {
            return;
        };
        self.pointer.record(
            client_x,
            client_y,
            viewport.width as f64,
            viewport.height as f64,
        );
    }

    pub(crate) fn on_resize(&mut self) {
        if self.disposed {
            return;
        }
        let request = self.reconciler.notify_resize();
        if let Some(timer) = &mut self.resize_timer {
            timer.arm(request);
        }
    }

    pub(crate) fn on_debounce_elapsed(&mut self) {
        let Some(timer) = &mut self.resize_timer else {
            return;
        };
        timer.fired();
        let current = dom::current_viewport(&self.window);
        if let Some(request) = self.reconciler.debounce_elapsed(current) {
            timer.arm(request);
        }
    }

    pub(crate) fn on_confirm_elapsed(&mut self) {
        let Some(timer) = &mut self.resize_timer else {
            return;
        };
        timer.fired();
        let current = dom::current_viewport(&self.window);
        if let Some(size) = self.reconciler.confirm_elapsed(current) {
            self.apply_viewport(size);
        }
    }

    /// Commit a confirmed size. The field and graph are left untouched.
    fn apply_viewport(&mut self, viewport: ViewportSize) {
        self.device_pixel_ratio = input::sanitize_pixel_ratio(self.window.device_pixel_ratio());
        let pixel_ratio = self.pixel_ratio();
        let backing = match &mut self.gpu {
            Some(gpu) => gpu.resize(viewport, pixel_ratio),
            None => viewport.scaled(pixel_ratio),
        };
        dom::size_canvas(&self.canvas, viewport, backing);
    }

    /// Cancel the pending frame and timer, remove listeners, free GPU
    /// resources and the canvas. Safe at any point, any number of times.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(mut render_loop) = self.render_loop.take() {
            render_loop.dispose();
            render_loop.scheduler().unbind();
        }
        if let Some(mut timer) = self.resize_timer.take() {
            timer.cancel();
        }
        self.reconciler.reset();
        if let Some(listeners) = self.listeners.take() {
            listeners.remove();
        }
        if let Some(mut gpu) = self.gpu.take() {
            gpu.release();
        }
        dom::detach_canvas(&self.canvas);
        log::info!("[session] disposed");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.dispose();
    }
}
