use crate::constants::{CANVAS_CLASS, CANVAS_STYLE};
use crate::input::{self, EnvironmentProbe};
use anyhow::anyhow;
use particle_core::{ProfileThresholds, ViewportSize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Current `innerWidth` x `innerHeight`, or `None` if unreadable or empty.
pub fn current_viewport(window: &web::Window) -> Option<ViewportSize> {
    let w = window.inner_width().ok().and_then(|v| v.as_f64());
    let h = window.inner_height().ok().and_then(|v| v.as_f64());
    input::viewport_from_js(w, h)
}

pub fn probe_environment(window: &web::Window, thresholds: &ProfileThresholds) -> EnvironmentProbe {
    let navigator = window.navigator();
    EnvironmentProbe {
        viewport: current_viewport(window),
        device_pixel_ratio: input::sanitize_pixel_ratio(window.device_pixel_ratio()),
        user_agent: navigator.user_agent().unwrap_or_default(),
        cores: input::sanitize_core_count(hardware_concurrency(&navigator), thresholds),
    }
}

/// `navigator.hardwareConcurrency`, or `None` where the browser hides it.
fn hardware_concurrency(navigator: &web::Navigator) -> Option<f64> {
    js_sys::Reflect::get(navigator, &JsValue::from_str("hardwareConcurrency"))
        .ok()
        .and_then(|v| v.as_f64())
}

pub fn find_container(document: &web::Document, element_id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow!("missing #{element_id}"))
}

/// Create the backdrop canvas and append it to `container`.
pub fn attach_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("not a canvas: {:?}", e))?;
    canvas.set_class_name(CANVAS_CLASS);
    let style = canvas.style();
    for (prop, value) in CANVAS_STYLE {
        _ = style.set_property(prop, value);
    }
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn detach_canvas(canvas: &web::HtmlCanvasElement) {
    if let Some(parent) = canvas.parent_node() {
        if let Err(e) = parent.remove_child(canvas) {
            log::warn!("[dom] remove canvas: {:?}", e);
        }
    }
}

/// CSS size follows the viewport; the backing store gets `backing` device
/// pixels.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, viewport: ViewportSize, backing: (u32, u32)) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    canvas.set_width(backing.0);
    canvas.set_height(backing.1);
}
