// Browser-side constants for the particle backdrop.

// Class applied to the injected canvas so host stylesheets can target it
pub const CANVAS_CLASS: &str = "particle-background";

// Inline style keeping the canvas behind page content and out of hit-testing
pub const CANVAS_STYLE: [(&str, &str); 5] = [
    ("position", "fixed"),
    ("inset", "0"),
    ("pointer-events", "none"),
    ("z-index", "0"),
    ("display", "block"),
];

// Multisample count used when the tier enables antialiasing
pub const MSAA_SAMPLES: u32 = 4;

// Transparent clear so the page background shows through
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};
