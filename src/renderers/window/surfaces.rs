use anyhow::{bail, Result};

// Owns the window surface and keeps its configuration in one place.
pub struct SurfaceManager {
    surface: wgpu::Surface<'static>,
    settings: SurfaceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SurfaceSettings {
    format: wgpu::TextureFormat,
    present_mode: wgpu::PresentMode,
    alpha_mode: wgpu::CompositeAlphaMode,
}

impl SurfaceSettings {
    // Prefers an sRGB format; the other modes take the adapter's first choice.
    fn choose(capabilities: &wgpu::SurfaceCapabilities) -> Result<Self> {
        let Some(&fallback) = capabilities.formats.first() else {
            bail!("surface reports no supported texture formats for this adapter");
        };
        let Some(&present_mode) = capabilities.present_modes.first() else {
            bail!("surface reports no supported present modes for this adapter");
        };
        let Some(&alpha_mode) = capabilities.alpha_modes.first() else {
            bail!("surface reports no supported alpha modes for this adapter");
        };

        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(fallback);

        Ok(Self {
            format,
            present_mode,
            alpha_mode,
        })
    }
}

impl SurfaceManager {
    pub fn new(surface: wgpu::Surface<'static>, adapter: &wgpu::Adapter) -> Result<Self> {
        let settings = SurfaceSettings::choose(&surface.get_capabilities(adapter))?;
        Ok(Self { surface, settings })
    }

    pub fn configure(&self, device: &wgpu::Device, width: u32, height: u32) {
        let surface_config = self.create_surface_config(width, height);
        self.surface.configure(device, &surface_config);
    }

    pub fn get_optimal_format(&self) -> wgpu::TextureFormat {
        self.settings.format
    }

    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    fn create_surface_config(&self, width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.settings.format,
            width: width.max(1),
            height: height.max(1),
            present_mode: self.settings.present_mode,
            alpha_mode: self.settings.alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }
}

/// True for surface errors that a reconfigure recovers from.
pub fn needs_reconfigure(err: &wgpu::SurfaceError) -> bool {
    matches!(err, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)
}
