use anyhow::{Context, Result};

pub struct GpuDevice {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuDevice {
    pub async fn new(instance: &wgpu::Instance, surface: &wgpu::Surface<'_>) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a GPU adapter compatible with the window surface")?;

        let info = adapter.get_info();
        tracing::info!("Renderer: {} ({:?})", info.name, info.backend);
        tracing::info!("Driver: {} {}", info.driver, info.driver_info);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("rtlive device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .context("failed to create GPU device")?;

        Ok(GpuDevice {
            adapter,
            device,
            queue,
        })
    }

    pub fn new_blocking(instance: &wgpu::Instance, surface: &wgpu::Surface<'_>) -> Result<Self> {
        pollster::block_on(Self::new(instance, surface))
    }
}
