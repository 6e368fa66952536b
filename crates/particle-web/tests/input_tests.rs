// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;
use particle_core::{profile_with, DeviceClass, ProfileThresholds, ViewportSize};

#[test]
fn missing_core_count_is_neither_low_end_nor_high_core() {
    let t = ProfileThresholds::default();
    let unknown = sanitize_core_count(None, &t);
    assert!(unknown > t.low_end_max_cores);
    assert!(unknown < t.capable_mobile_min_cores);
    assert_eq!(sanitize_core_count(Some(0.0), &t), unknown);
    assert_eq!(sanitize_core_count(Some(f64::NAN), &t), unknown);
    assert_eq!(sanitize_core_count(Some(8.0), &t), 8);
}

#[test]
fn unknown_cores_on_desktop_width_stays_desktop() {
    let t = ProfileThresholds::default();
    let tier = profile_with(
        &t,
        1440,
        "Mozilla/5.0 (X11; Linux x86_64)",
        sanitize_core_count(None, &t),
    );
    assert_eq!(tier.class, DeviceClass::Desktop);
}

#[test]
fn viewport_readings_require_both_dimensions() {
    assert_eq!(
        viewport_from_js(Some(1024.0), Some(768.0)),
        Some(ViewportSize::new(1024, 768).unwrap())
    );
    assert_eq!(viewport_from_js(None, Some(768.0)), None);
    assert_eq!(viewport_from_js(Some(1024.0), Some(0.0)), None);
    assert_eq!(viewport_from_js(Some(-5.0), Some(768.0)), None);
}

#[test]
fn unreadable_viewport_profiles_as_zero_width() {
    let probe = EnvironmentProbe {
        viewport: None,
        device_pixel_ratio: 2.0,
        user_agent: String::new(),
        cores: 16,
    };
    assert_eq!(probe.profile_width(), 0);
    let tier = profile_with(&ProfileThresholds::default(), probe.profile_width(), "", 16);
    assert_eq!(tier.class, DeviceClass::LowEnd);
    assert!(tier.mobile);
}

#[test]
fn pixel_ratio_falls_back_to_one() {
    assert_eq!(sanitize_pixel_ratio(2.5), 2.5);
    assert_eq!(sanitize_pixel_ratio(0.0), 1.0);
    assert_eq!(sanitize_pixel_ratio(f64::INFINITY), 1.0);
    assert_eq!(sanitize_pixel_ratio(-1.0), 1.0);
}
