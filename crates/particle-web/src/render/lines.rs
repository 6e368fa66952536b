use super::helpers::{self, PipelineSpec};
use particle_core::{ConnectionGraph, ParticleField};

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

/// Connection graph as a static line list. Built once; never rewritten.
pub(crate) struct LineResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) positions: wgpu::Buffer,
    pub(crate) colors: wgpu::Buffer,
    pub(crate) vertex_count: u32,
}

/// `None` when there is nothing to draw (tier disabled links, or no pair is
/// close enough).
pub(crate) fn create_line_resources(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    field: &ParticleField,
    graph: &ConnectionGraph,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> Option<LineResources> {
    if graph.is_empty() {
        return None;
    }
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("lines_shader"),
        source: wgpu::ShaderSource::Wgsl(particle_core::LINES_WGSL.into()),
    });
    let buffers = [
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: 16,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRS,
        },
    ];
    let pipeline = helpers::make_additive_pipeline(
        device,
        layout,
        PipelineSpec {
            label: "lines_pipeline",
            shader: &shader,
            vs_entry: "vs_lines",
            fs_entry: "fs_lines",
            buffers: &buffers,
            topology: wgpu::PrimitiveTopology::LineList,
            color_format,
            sample_count,
        },
    );

    Some(LineResources {
        pipeline,
        positions: helpers::create_vertex_buffer(
            device,
            "line_positions",
            &graph.line_positions(field),
        ),
        colors: helpers::create_vertex_buffer(device, "line_colors", &graph.line_colors()),
        vertex_count: (graph.len() * 2) as u32,
    })
}

impl LineResources {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.positions.slice(..));
        rpass.set_vertex_buffer(1, self.colors.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }

    pub(crate) fn release(self) {
        self.positions.destroy();
        self.colors.destroy();
    }
}
