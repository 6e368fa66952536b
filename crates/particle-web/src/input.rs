use particle_core::{ProfileThresholds, ViewportSize};

/// Raw environment readings gathered once at mount.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentProbe {
    pub viewport: Option<ViewportSize>,
    pub device_pixel_ratio: f64,
    pub user_agent: String,
    pub cores: u32,
}

impl EnvironmentProbe {
    /// Width fed to the profiler; an unreadable viewport counts as zero,
    /// which lands in the most conservative tier.
    pub fn profile_width(&self) -> u32 {
        self.viewport.map(|v| v.width).unwrap_or(0)
    }
}

/// `navigator.hardwareConcurrency` may be missing or zero. An unknown count is
/// treated as neither low-end nor high-core.
#[inline]
pub fn sanitize_core_count(raw: Option<f64>, thresholds: &ProfileThresholds) -> u32 {
    match raw {
        Some(v) if v.is_finite() && v >= 1.0 => v.min(u32::MAX as f64) as u32,
        _ => thresholds.low_end_max_cores + 1,
    }
}

/// Convert `innerWidth`/`innerHeight` readings into a viewport size.
#[inline]
pub fn viewport_from_js(width: Option<f64>, height: Option<f64>) -> Option<ViewportSize> {
    ViewportSize::from_css(width?, height?).ok()
}

/// `devicePixelRatio` with a sane fallback.
#[inline]
pub fn sanitize_pixel_ratio(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        1.0
    }
}
