// Host-side tests for tuning constants and their relationships.

use particle_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn classification_thresholds_are_ordered() {
    assert!(LOW_END_MAX_WIDTH < MOBILE_MAX_WIDTH);
    assert!(LOW_END_MAX_CORES < CAPABLE_MOBILE_MIN_CORES);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn richer_tiers_get_more() {
    assert!(FULL_PARTICLE_COUNT > LOW_END_PARTICLE_COUNT);
    // The O(n²) connection sweep is only acceptable for small clouds.
    assert!(FULL_PARTICLE_COUNT <= 150);
    assert!(DESKTOP_CONNECTION_DISTANCE > CAPABLE_MOBILE_CONNECTION_DISTANCE);
    assert!(CAPABLE_MOBILE_CONNECTION_DISTANCE > STANDARD_MOBILE_CONNECTION_DISTANCE);
    assert!(DESKTOP_TARGET_FPS > MOBILE_TARGET_FPS);
    assert!(PIXEL_RATIO_CAP > LOW_END_PIXEL_RATIO_CAP);
    assert!(DESKTOP_XY_RANGE > MOBILE_XY_RANGE);
    assert!(DESKTOP_ROTATION_SPEED > MOBILE_ROTATION_SPEED);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn palette_stays_in_unit_range() {
    assert!(INTENSITY_BASE + INTENSITY_SPAN <= 1.0);
    assert!(GREEN_RATIO > 0.0 && GREEN_RATIO < 1.0);
    assert!(BLUE_LEVEL < INTENSITY_BASE as f32);
    assert!(LINE_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(DESKTOP_POINT_ALPHA <= 1.0 && MOBILE_POINT_ALPHA <= DESKTOP_POINT_ALPHA);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn resize_stages_are_positive_and_confirm_is_shorter() {
    assert!(RESIZE_DEBOUNCE_MS > 0.0);
    assert!(RESIZE_CONFIRM_MS > 0.0);
    assert!(RESIZE_CONFIRM_MS < RESIZE_DEBOUNCE_MS);
    assert!(RESIZE_THRESHOLD_PX > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_sees_the_cloud() {
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZFAR > CAMERA_ZNEAR);
    // The front face of the cloud reaches the eye plane; the near plane clips
    // whatever crosses it, and the back face stays well inside the far plane.
    assert!(CAMERA_Z >= DESKTOP_Z_RANGE / 2.0);
    assert!(CAMERA_Z + DESKTOP_Z_RANGE / 2.0 < CAMERA_ZFAR);
    assert!(MAX_POINT_SIZE_PX > 0.0 && POINT_SIZE_ATTENUATION > 0.0);
    assert!(CAMERA_FOVY_DEGREES > 0.0 && CAMERA_FOVY_DEGREES < 180.0);
}
