use crate::constants::{CLEAR_COLOR, MSAA_SAMPLES};
use crate::gpu_caps;
use particle_core::{
    Camera, ConnectionGraph, DrawTarget, FrameUpdate, ParticleField, QualityTier, SceneUniforms,
    ViewportSize,
};
use web_sys as web;

mod helpers;
mod lines;
mod points;
mod targets;

use lines::{create_line_resources, LineResources};
use points::{create_point_resources, PointResources};
use targets::MsaaTarget;

/// Everything acquired from the graphics API for one session.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    points: Option<PointResources>,
    lines: Option<LineResources>,
    msaa: Option<MsaaTarget>,

    camera: Camera,
    tier: QualityTier,
    pixel_ratio: f32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        tier: &QualityTier,
        field: &ParticleField,
        graph: &ConnectionGraph,
        viewport: ViewportSize,
        pixel_ratio: f32,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: if tier.prefers_low_power() {
                    wgpu::PowerPreference::LowPower
                } else {
                    wgpu::PowerPreference::HighPerformance
                },
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no graphics adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: gpu_caps::required_limits(&adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("particle_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = gpu_caps::surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let max_dimension = device.limits().max_texture_dimension_2d;
        let (width, height) = viewport.scaled_within(pixel_ratio, max_dimension);
        canvas.set_width(width);
        canvas.set_height(height);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if tier.antialias { MSAA_SAMPLES } else { 1 };
        let msaa = (sample_count > 1)
            .then(|| MsaaTarget::new(&device, width, height, format, sample_count));

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let points = create_point_resources(&device, &layout, field, format, sample_count);
        let lines = create_line_resources(&device, &layout, field, graph, format, sample_count);
        log::info!(
            "[gpu] {}x{} {:?} msaa={} points={} line_vertices={}",
            width,
            height,
            format,
            sample_count,
            points.count,
            lines.as_ref().map_or(0, |l| l.vertex_count)
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            bind_group,
            points: Some(points),
            lines,
            msaa,
            camera: Camera::for_viewport(viewport),
            tier: *tier,
            pixel_ratio,
        })
    }

    /// Backing-store size for `viewport`, clamped to the device texture limit.
    pub fn backing_size(&self, viewport: ViewportSize, pixel_ratio: f32) -> (u32, u32) {
        viewport.scaled_within(pixel_ratio, self.device.limits().max_texture_dimension_2d)
    }

    /// Apply a committed viewport: camera aspect, surface and MSAA target.
    /// Returns the backing-store size now in use.
    pub fn resize(&mut self, viewport: ViewportSize, pixel_ratio: f32) -> (u32, u32) {
        let (width, height) = self.backing_size(viewport, pixel_ratio);
        self.camera.set_viewport(viewport);
        self.pixel_ratio = pixel_ratio;
        if width == self.config.width && height == self.config.height {
            return (width, height);
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        if let Some(msaa) = &mut self.msaa {
            msaa.recreate(&self.device, width, height);
        }
        (width, height)
    }

    /// Free every buffer, texture and the device. Each release stands alone.
    pub fn release(&mut self) {
        if let Some(points) = self.points.take() {
            points.release();
        }
        if let Some(lines) = self.lines.take() {
            lines.release();
        }
        if let Some(msaa) = self.msaa.take() {
            msaa.tex.destroy();
        }
        self.uniform_buffer.destroy();
        self.device.destroy();
    }
}

impl DrawTarget for GpuState {
    type Error = wgpu::SurfaceError;

    fn draw(&mut self, frame: &FrameUpdate) -> Result<(), wgpu::SurfaceError> {
        let Some(points) = &self.points else {
            return Ok(());
        };
        let uniforms = SceneUniforms::new(
            &self.camera,
            frame,
            &self.tier,
            (self.config.width, self.config.height),
            self.pixel_ratio,
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (target, resolve_target) = match &self.msaa {
            Some(m) => (&m.view, Some(&view)),
            None => (&view, None),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("particles_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            if let Some(lines) = &self.lines {
                lines.draw(&mut rpass);
            }
            points.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
