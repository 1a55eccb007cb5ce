use std::rc::Rc;

use anyhow::{Context, Result};

use crate::gpu::{GpuDevice, QuadBuffer, UniformBuffer, Uniforms, WgpuShaderApi};
use crate::shader::LinkedProgram;

use super::window::{needs_reconfigure, SurfaceManager};

/// Draws the full-viewport quad with whatever program the caller hands it.
/// Owns the surface, device and static buffers; never owns a program.
pub struct WindowRenderer {
    surface_manager: SurfaceManager,
    gpu_device: GpuDevice,
    quad: QuadBuffer,
    uniform_buffer: UniformBuffer,
    api: Rc<WgpuShaderApi>,
    width: u32,
    height: u32,
}

impl WindowRenderer {
    pub fn new(
        instance: wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window_size: (u32, u32),
    ) -> Result<Self> {
        let gpu_device = GpuDevice::new_blocking(&instance, &surface)?;
        let (width, height) = window_size;

        let surface_manager = SurfaceManager::new(surface, &gpu_device.adapter)?;
        let surface_format = surface_manager.get_optimal_format();
        surface_manager.configure(&gpu_device.device, width, height);
        tracing::debug!(?surface_format, width, height, "configured surface");

        let quad = QuadBuffer::new(&gpu_device.device);
        let uniform_buffer = UniformBuffer::new(&gpu_device.device);
        uniform_buffer.update(&gpu_device.queue, &Uniforms::new(width, height, 0.0));

        let api = Rc::new(WgpuShaderApi::new(
            gpu_device.device.clone(),
            &uniform_buffer.bind_group_layout,
            surface_format,
        ));

        Ok(Self {
            surface_manager,
            gpu_device,
            quad,
            uniform_buffer,
            api,
            width,
            height,
        })
    }

    /// Graphics context handle for building programs that this renderer can draw.
    pub fn shader_api(&self) -> Rc<WgpuShaderApi> {
        Rc::clone(&self.api)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.surface_manager
            .configure(&self.gpu_device.device, width, height);
    }

    pub fn render(&mut self, program: &LinkedProgram<WgpuShaderApi>, time: f32) -> Result<()> {
        let pipeline = program
            .raw()
            .pipeline()
            .context("active program has no render pipeline")?;

        self.uniform_buffer.update(
            &self.gpu_device.queue,
            &Uniforms::new(self.width, self.height, time),
        );

        let output = match self.surface_manager.get_current_texture() {
            Ok(output) => output,
            Err(err) if needs_reconfigure(&err) => {
                tracing::debug!("surface {err}; reconfiguring");
                self.surface_manager
                    .configure(&self.gpu_device.device, self.width, self.height);
                return Ok(());
            }
            Err(err) => return Err(err).context("failed to acquire surface texture"),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.gpu_device
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Window Render Encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &self.uniform_buffer.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad.buffer.slice(..));
            render_pass.draw(0..QuadBuffer::vertex_count(), 0..1);
        }

        self.gpu_device
            .queue
            .submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
