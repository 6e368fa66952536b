use super::helpers;

/// Multisampled colour target resolved into the swapchain image each frame.
///
/// Only exists when the tier enables antialiasing; it must track the surface
/// size, so it is rebuilt on every committed resize.
pub(crate) struct MsaaTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    sample_count: u32,
}

impl MsaaTarget {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let (tex, view) = helpers::create_color_texture_device(
            device,
            "msaa_color",
            width,
            height,
            format,
            sample_count,
        );
        Self {
            tex,
            view,
            format,
            sample_count,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.tex.destroy();
        (self.tex, self.view) = helpers::create_color_texture_device(
            device,
            "msaa_color",
            width,
            height,
            self.format,
            self.sample_count,
        );
    }
}
