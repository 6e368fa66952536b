pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod field;
pub mod governor;
pub mod render_loop;
pub mod rng;
pub mod tier;
pub mod uniforms;
pub mod viewport;

pub use animation::*;
pub use camera::*;
pub use config::*;
pub use field::*;
pub use governor::*;
pub use render_loop::*;
pub use rng::*;
pub use tier::*;
pub use uniforms::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
