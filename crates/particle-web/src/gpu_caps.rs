// Device limits and surface format choice, kept free of browser types so the
// host can test them.

/// Limits requested from the adapter: the WebGL2 baseline, raised to the
/// adapter's own texture sizes. Anything the backdrop draws fits in this.
pub fn required_limits(adapter: &wgpu::Limits) -> wgpu::Limits {
    wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.clone())
}

/// Prefer a linear 8-bit format so shader colours reach the canvas unchanged;
/// an sRGB target would gamma-lift the amber palette.
pub fn surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| {
            matches!(
                f,
                wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
            )
        })
        .or_else(|| formats.iter().copied().find(|f| !f.is_srgb()))
        .or_else(|| formats.first().copied())
}
