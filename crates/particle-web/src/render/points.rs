use super::helpers::{self, PipelineSpec};
use particle_core::ParticleField;

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const SIZE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32];

/// Point cloud geometry: the field's parallel arrays uploaded as three
/// per-instance vertex buffers, each instance expanded to a quad in the shader.
pub(crate) struct PointResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) positions: wgpu::Buffer,
    pub(crate) colors: wgpu::Buffer,
    pub(crate) sizes: wgpu::Buffer,
    pub(crate) count: u32,
}

pub(crate) fn create_point_resources(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    field: &ParticleField,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> PointResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(particle_core::PARTICLES_WGSL.into()),
    });
    let buffers = [
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &COLOR_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: 4,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &SIZE_ATTRS,
        },
    ];
    let pipeline = helpers::make_additive_pipeline(
        device,
        layout,
        PipelineSpec {
            label: "particles_pipeline",
            shader: &shader,
            vs_entry: "vs_points",
            fs_entry: "fs_points",
            buffers: &buffers,
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            color_format,
            sample_count,
        },
    );

    PointResources {
        pipeline,
        positions: helpers::create_vertex_buffer(device, "particle_positions", &field.positions),
        colors: helpers::create_vertex_buffer(device, "particle_colors", &field.colors),
        sizes: helpers::create_vertex_buffer(device, "particle_sizes", &field.sizes),
        count: field.len() as u32,
    }
}

impl PointResources {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.positions.slice(..));
        rpass.set_vertex_buffer(1, self.colors.slice(..));
        rpass.set_vertex_buffer(2, self.sizes.slice(..));
        rpass.draw(0..4, 0..self.count);
    }

    pub(crate) fn release(self) {
        self.positions.destroy();
        self.colors.destroy();
        self.sizes.destroy();
    }
}
