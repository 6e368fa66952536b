// Tuning constants for profiling, field generation, animation and resize handling.

// Seeded sequence
pub const DEFAULT_SEED: u32 = 144; // chosen for a pleasing arrangement; changing it moves every particle

// Device classification thresholds (CSS pixels / logical cores)
pub const LOW_END_MAX_WIDTH: u32 = 480;
pub const MOBILE_MAX_WIDTH: u32 = 768;
pub const LOW_END_MAX_CORES: u32 = 4;
pub const CAPABLE_MOBILE_MIN_CORES: u32 = 6;

// User-agent fragments treated as mobile (matched case-insensitively)
pub const MOBILE_UA_MARKERS: [&str; 7] = [
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

// Particle counts
pub const LOW_END_PARTICLE_COUNT: usize = 50;
pub const FULL_PARTICLE_COUNT: usize = 150;

// Connection cutoffs (world units)
pub const DESKTOP_CONNECTION_DISTANCE: f32 = 5.0;
pub const CAPABLE_MOBILE_CONNECTION_DISTANCE: f32 = 4.0;
pub const STANDARD_MOBILE_CONNECTION_DISTANCE: f32 = 3.0;

// Connection opacity multipliers
pub const CAPABLE_MOBILE_LINE_ALPHA: f32 = 0.8;
pub const STANDARD_MOBILE_LINE_ALPHA: f32 = 0.5;
pub const DESKTOP_LINE_ALPHA: f32 = 1.0;

// Pixel density caps
pub const LOW_END_PIXEL_RATIO_CAP: f32 = 1.0;
pub const PIXEL_RATIO_CAP: f32 = 2.0;

// Frame rate targets
pub const MOBILE_TARGET_FPS: u32 = 30;
pub const DESKTOP_TARGET_FPS: u32 = 60;

// Spatial extent of the cloud (world units, centred on the origin)
pub const DESKTOP_XY_RANGE: f32 = 20.0;
pub const DESKTOP_Z_RANGE: f32 = 10.0;
pub const MOBILE_XY_RANGE: f32 = 15.0;
pub const MOBILE_Z_RANGE: f32 = 8.0;

// Particle sizes: size = draw * span + min
pub const DESKTOP_SIZE_SPAN: f32 = 3.0;
pub const MOBILE_SIZE_SPAN: f32 = 2.0;
pub const MIN_PARTICLE_SIZE: f64 = 1.0;

// Warm palette: intensity = base + draw * span, rgb = (i, i * green, blue)
pub const INTENSITY_BASE: f64 = 0.3;
pub const INTENSITY_SPAN: f64 = 0.7;
pub const GREEN_RATIO: f64 = 0.8;
pub const BLUE_LEVEL: f32 = 0.1;
pub const LINE_COLOR: [f32; 3] = [1.0, 0.8, 0.1];

// Shader-side appearance
pub const DESKTOP_WOBBLE_SCALE: f32 = 1.0;
pub const MOBILE_WOBBLE_SCALE: f32 = 0.5;
pub const DESKTOP_POINT_ALPHA: f32 = 0.8;
pub const MOBILE_POINT_ALPHA: f32 = 0.6;
pub const LINE_ALPHA_FACTOR: f32 = 0.3;
pub const POINT_SIZE_ATTENUATION: f32 = 300.0; // pixels per world unit at unit depth
pub const MAX_POINT_SIZE_PX: f32 = 511.0; // common GL point-size ceiling (ANGLE/Metal, iOS)

// Rotation (radians / second about Y, tilt about X)
pub const DESKTOP_ROTATION_SPEED: f32 = 0.02;
pub const MOBILE_ROTATION_SPEED: f32 = 0.01;
pub const TILT_FREQUENCY: f32 = 0.015;
pub const TILT_AMPLITUDE: f32 = 0.05;
pub const POINTER_INFLUENCE: f32 = 0.2;
pub const POINTER_ROTATION_GAIN: f32 = 0.005;

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Viewport reconciliation
pub const RESIZE_DEBOUNCE_MS: f64 = 300.0; // quiet period after the last raw resize
pub const RESIZE_CONFIRM_MS: f64 = 50.0; // second look before committing
pub const RESIZE_THRESHOLD_PX: u32 = 20; // changes at or below this are layout noise
