use std::fmt;

use super::{GraphicsApi, ShaderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub fn label(self) -> &'static str {
        match self {
            StageKind::Vertex => "Vertex",
            StageKind::Fragment => "Fragment",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One compiled stage object. The underlying handle is deleted when this
/// value is dropped, whether or not it was ever attached to a program.
pub struct CompiledShader<'a, A: GraphicsApi> {
    api: &'a A,
    shader: A::Shader,
}

impl<'a, A: GraphicsApi> CompiledShader<'a, A> {
    pub fn compile(
        api: &'a A,
        kind: StageKind,
        source: &str,
        label: &str,
    ) -> Result<Self, ShaderError> {
        let shader = api
            .create_shader(kind)
            .ok_or_else(|| ShaderError::StageCreationFailed {
                label: label.to_string(),
            })?;

        // Guard owns the handle from here on, so the error path below releases it.
        let mut stage = Self { api, shader };
        if api.compile_shader(&mut stage.shader, source) {
            return Ok(stage);
        }

        let log = api.shader_info_log(&stage.shader);
        tracing::debug!(stage = %kind, "shader stage rejected by compiler");
        Err(ShaderError::CompileFailed {
            label: label.to_string(),
            log,
        })
    }

    pub fn raw(&self) -> &A::Shader {
        &self.shader
    }
}

impl<A: GraphicsApi> Drop for CompiledShader<'_, A> {
    fn drop(&mut self) {
        self.api.delete_shader(&mut self.shader);
    }
}
