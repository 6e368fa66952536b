//! Device capability profiling.
//!
//! The profiler is a pure function of the viewport width, the user-agent string
//! and the reported logical core count. The browser front-end gathers those
//! three values once at mount time and everything downstream (particle count,
//! connection graph, frame rate, pointer use) is read from the resulting
//! [`QualityTier`].

use crate::constants::*;

/// Coarse device bucket. Ordered from most to least constrained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    LowEnd,
    MobileStandard,
    MobileCapable,
    Desktop,
}

/// Classification thresholds. Defaults mirror the constants module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileThresholds {
    pub low_end_max_width: u32,
    pub mobile_max_width: u32,
    pub low_end_max_cores: u32,
    pub capable_mobile_min_cores: u32,
}

impl Default for ProfileThresholds {
    fn default() -> Self {
        Self {
            low_end_max_width: LOW_END_MAX_WIDTH,
            mobile_max_width: MOBILE_MAX_WIDTH,
            low_end_max_cores: LOW_END_MAX_CORES,
            capable_mobile_min_cores: CAPABLE_MOBILE_MIN_CORES,
        }
    }
}

/// Rendering parameters chosen once per session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityTier {
    pub class: DeviceClass,
    /// Mobile user agent or narrow viewport. Tracked separately from `class`
    /// because a low-end device may be either.
    pub mobile: bool,
    pub particle_count: usize,
    pub connection_distance: f32,
    pub pixel_ratio_cap: f32,
    pub antialias: bool,
    pub connections: bool,
    pub target_fps: u32,
    pub xy_range: f32,
    pub z_range: f32,
    pub size_span: f32,
    pub line_alpha: f32,
    pub wobble_scale: f32,
    pub point_alpha: f32,
    pub rotation_speed: f32,
}

impl QualityTier {
    pub fn target_frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }

    /// Device pixel ratio clamped to the tier cap. Non-finite or non-positive
    /// inputs fall back to 1.
    pub fn effective_pixel_ratio(&self, device_pixel_ratio: f64) -> f32 {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio as f32
        } else {
            1.0
        };
        dpr.min(self.pixel_ratio_cap)
    }

    /// Pointer bias is only applied off mobile.
    pub fn tracks_pointer(&self) -> bool {
        !self.mobile
    }

    pub fn prefers_low_power(&self) -> bool {
        self.mobile
    }
}

/// Case-insensitive substring match against the known mobile markers.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m))
}

/// Derive the quality tier using the default thresholds.
pub fn profile(viewport_width: u32, user_agent: &str, cores: u32) -> QualityTier {
    profile_with(&ProfileThresholds::default(), viewport_width, user_agent, cores)
}

pub fn profile_with(
    thresholds: &ProfileThresholds,
    viewport_width: u32,
    user_agent: &str,
    cores: u32,
) -> QualityTier {
    let mobile =
        viewport_width <= thresholds.mobile_max_width || is_mobile_user_agent(user_agent);
    let low_end =
        viewport_width <= thresholds.low_end_max_width || cores <= thresholds.low_end_max_cores;

    let class = if low_end {
        DeviceClass::LowEnd
    } else if mobile && cores >= thresholds.capable_mobile_min_cores {
        DeviceClass::MobileCapable
    } else if mobile {
        DeviceClass::MobileStandard
    } else {
        DeviceClass::Desktop
    };

    let tier = build_tier(class, mobile);
    log::debug!(
        "[tier] width={} cores={} mobile={} -> {:?} particles={} connections={}",
        viewport_width,
        cores,
        mobile,
        class,
        tier.particle_count,
        tier.connections
    );
    tier
}

fn build_tier(class: DeviceClass, mobile: bool) -> QualityTier {
    let (particle_count, connection_distance, line_alpha) = match class {
        DeviceClass::LowEnd => (LOW_END_PARTICLE_COUNT, 0.0, 0.0),
        DeviceClass::MobileStandard => (
            FULL_PARTICLE_COUNT,
            STANDARD_MOBILE_CONNECTION_DISTANCE,
            STANDARD_MOBILE_LINE_ALPHA,
        ),
        DeviceClass::MobileCapable => (
            FULL_PARTICLE_COUNT,
            CAPABLE_MOBILE_CONNECTION_DISTANCE,
            CAPABLE_MOBILE_LINE_ALPHA,
        ),
        DeviceClass::Desktop => (
            FULL_PARTICLE_COUNT,
            DESKTOP_CONNECTION_DISTANCE,
            DESKTOP_LINE_ALPHA,
        ),
    };
    let low_end = class == DeviceClass::LowEnd;

    QualityTier {
        class,
        mobile,
        particle_count,
        connection_distance,
        pixel_ratio_cap: if low_end {
            LOW_END_PIXEL_RATIO_CAP
        } else {
            PIXEL_RATIO_CAP
        },
        antialias: !low_end,
        connections: !low_end,
        target_fps: if mobile {
            MOBILE_TARGET_FPS
        } else {
            DESKTOP_TARGET_FPS
        },
        xy_range: if mobile { MOBILE_XY_RANGE } else { DESKTOP_XY_RANGE },
        z_range: if mobile { MOBILE_Z_RANGE } else { DESKTOP_Z_RANGE },
        size_span: if mobile {
            MOBILE_SIZE_SPAN
        } else {
            DESKTOP_SIZE_SPAN
        },
        line_alpha,
        wobble_scale: if mobile {
            MOBILE_WOBBLE_SCALE
        } else {
            DESKTOP_WOBBLE_SCALE
        },
        point_alpha: if mobile {
            MOBILE_POINT_ALPHA
        } else {
            DESKTOP_POINT_ALPHA
        },
        rotation_speed: if mobile {
            MOBILE_ROTATION_SPEED
        } else {
            DESKTOP_ROTATION_SPEED
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ua_markers_match_regardless_of_case() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (Linux; ANDROID 14; Pixel 8) AppleWebKit/537.36"
        ));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
        assert!(!is_mobile_user_agent(""));
    }

    #[test]
    fn effective_pixel_ratio_is_capped_and_sane() {
        let desktop = profile(1920, "", 8);
        assert_eq!(desktop.effective_pixel_ratio(3.0), 2.0);
        assert_eq!(desktop.effective_pixel_ratio(1.5), 1.5);
        assert_eq!(desktop.effective_pixel_ratio(f64::NAN), 1.0);
        assert_eq!(desktop.effective_pixel_ratio(0.0), 1.0);

        let low = profile(1920, "", 2);
        assert_eq!(low.effective_pixel_ratio(3.0), 1.0);
    }
}
