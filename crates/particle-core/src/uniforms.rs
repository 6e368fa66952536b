//! Uniform block shared by the point and line shaders (`Scene` in WGSL).

use crate::animation::FrameUpdate;
use crate::camera::Camera;
use crate::constants::{LINE_ALPHA_FACTOR, MAX_POINT_SIZE_PX, POINT_SIZE_ATTENUATION};
use crate::tier::QualityTier;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub pixel_ratio: f32,
    pub wobble_scale: f32,
    pub point_alpha: f32,
    pub line_alpha: f32,
    pub point_attenuation: f32,
    pub max_point_px: f32,
    pub _pad: [f32; 3],
}

impl SceneUniforms {
    /// `resolution` is the backing-store size in physical pixels.
    pub fn new(
        camera: &Camera,
        frame: &FrameUpdate,
        tier: &QualityTier,
        resolution: (u32, u32),
        pixel_ratio: f32,
    ) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: frame.model_matrix().to_cols_array_2d(),
            resolution: [resolution.0 as f32, resolution.1 as f32],
            time: frame.elapsed_sec,
            pixel_ratio,
            wobble_scale: tier.wobble_scale,
            point_alpha: tier.point_alpha,
            line_alpha: LINE_ALPHA_FACTOR,
            point_attenuation: POINT_SIZE_ATTENUATION,
            max_point_px: MAX_POINT_SIZE_PX,
            _pad: [0.0; 3],
        }
    }
}
