use std::borrow::Cow;

use crate::gpu::{has_entry_point, validate_wgsl, QuadBuffer};
use crate::shader::{GraphicsApi, StageKind};

pub struct WgpuStage {
    kind: StageKind,
    module: Option<wgpu::ShaderModule>,
    log: String,
}

pub struct WgpuProgram {
    vertex: Option<wgpu::ShaderModule>,
    fragment: Option<wgpu::ShaderModule>,
    pipeline: Option<wgpu::RenderPipeline>,
    log: String,
}

impl WgpuProgram {
    /// The render pipeline to bind for drawing; `None` only before linking or
    /// after deletion.
    pub fn pipeline(&self) -> Option<&wgpu::RenderPipeline> {
        self.pipeline.as_ref()
    }
}

/// [`GraphicsApi`] over a wgpu device. Stages are WGSL shader modules checked
/// by naga, and linking builds a render pipeline for the full-screen quad.
/// Validation errors are captured with error scopes so a bad shader never
/// reaches the device's uncaptured-error handler.
pub struct WgpuShaderApi {
    device: wgpu::Device,
    pipeline_layout: wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
}

impl WgpuShaderApi {
    pub fn new(
        device: wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Program Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        Self {
            device,
            pipeline_layout,
            surface_format,
        }
    }

    // AIDEV-NOTE: Error scopes turn wgpu failures into compile/link logs. Backend
    // translation errors arrive as Internal, so every filter is captured or the
    // default handler would panic on a bad reload.
    fn capture_errors<T>(&self, f: impl FnOnce() -> T) -> Result<T, String> {
        for filter in CAPTURED_FILTERS {
            self.device.push_error_scope(filter);
        }
        let value = f();
        let popped = CAPTURED_FILTERS
            .iter()
            .map(|_| pollster::block_on(self.device.pop_error_scope()))
            .collect::<Vec<_>>();
        match first_error(popped) {
            Some(log) => Err(log),
            None => Ok(value),
        }
    }
}

const CAPTURED_FILTERS: [wgpu::ErrorFilter; 3] = [
    wgpu::ErrorFilter::Validation,
    wgpu::ErrorFilter::OutOfMemory,
    wgpu::ErrorFilter::Internal,
];

// Scopes pop innermost first; every scope must be popped even after a hit.
fn first_error(popped: impl IntoIterator<Item = Option<wgpu::Error>>) -> Option<String> {
    popped
        .into_iter()
        .flatten()
        .next()
        .map(|err| err.to_string())
}

impl GraphicsApi for WgpuShaderApi {
    type Shader = WgpuStage;
    type Program = WgpuProgram;

    // wgpu has no separate allocation step, so this never fails.
    fn create_shader(&self, kind: StageKind) -> Option<WgpuStage> {
        Some(WgpuStage {
            kind,
            module: None,
            log: String::new(),
        })
    }

    fn compile_shader(&self, shader: &mut WgpuStage, source: &str) -> bool {
        let module = match validate_wgsl(source) {
            Ok(module) => module,
            Err(log) => {
                shader.log = log;
                return false;
            }
        };

        let stage = match shader.kind {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        };
        if !has_entry_point(&module, stage) {
            shader.log = format!("no @{} entry point found", shader.kind.label().to_lowercase());
            return false;
        }

        let compiled = self.capture_errors(|| {
            self.device
                .create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(shader.kind.label()),
                    source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
                })
        });
        match compiled {
            Ok(module) => {
                shader.module = Some(module);
                true
            }
            Err(log) => {
                shader.log = log;
                false
            }
        }
    }

    fn shader_info_log(&self, shader: &WgpuStage) -> String {
        shader.log.clone()
    }

    fn delete_shader(&self, shader: &mut WgpuStage) {
        shader.module = None;
    }

    fn create_program(&self) -> Option<WgpuProgram> {
        Some(WgpuProgram {
            vertex: None,
            fragment: None,
            pipeline: None,
            log: String::new(),
        })
    }

    fn attach_shader(&self, program: &mut WgpuProgram, shader: &WgpuStage) {
        let slot = match shader.kind {
            StageKind::Vertex => &mut program.vertex,
            StageKind::Fragment => &mut program.fragment,
        };
        *slot = shader.module.clone();
    }

    fn link_program(&self, program: &mut WgpuProgram) -> bool {
        let (Some(vertex), Some(fragment)) = (&program.vertex, &program.fragment) else {
            program.log = "program needs one vertex and one fragment stage".to_string();
            return false;
        };

        let linked = self.capture_errors(|| {
            self.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("Shader Program"),
                    layout: Some(&self.pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: vertex,
                        entry_point: None,
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                        buffers: &[QuadBuffer::layout()],
                    },
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),
                    fragment: Some(wgpu::FragmentState {
                        module: fragment,
                        entry_point: None,
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: self.surface_format,
                            blend: Some(wgpu::BlendState::REPLACE),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    multiview: None,
                    cache: None,
                })
        });

        match linked {
            Ok(pipeline) => {
                program.pipeline = Some(pipeline);
                true
            }
            Err(log) => {
                program.log = log;
                false
            }
        }
    }

    fn program_info_log(&self, program: &WgpuProgram) -> String {
        program.log.clone()
    }

    fn delete_program(&self, program: &mut WgpuProgram) {
        program.pipeline = None;
        program.vertex = None;
        program.fragment = None;
    }
}
