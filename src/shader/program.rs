use std::rc::Rc;

use super::{CompiledShader, GraphicsApi, ShaderError, StageKind};

/// A fully linked vertex + fragment program.
///
/// A `LinkedProgram` only exists once linking succeeded. Every failed
/// [`build`](LinkedProgram::build) releases the program and stage objects it
/// allocated before the error reaches the caller.
pub struct LinkedProgram<A: GraphicsApi> {
    api: Rc<A>,
    program: A::Program,
}

impl<A: GraphicsApi> LinkedProgram<A> {
    pub fn build(
        api: &Rc<A>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let program = api
            .create_program()
            .ok_or(ShaderError::ProgramCreationFailed)?;
        let mut linked = Self {
            api: Rc::clone(api),
            program,
        };

        let vertex = CompiledShader::compile(
            api.as_ref(),
            StageKind::Vertex,
            vertex_source,
            StageKind::Vertex.label(),
        )?;
        let fragment = CompiledShader::compile(
            api.as_ref(),
            StageKind::Fragment,
            fragment_source,
            StageKind::Fragment.label(),
        )?;

        api.attach_shader(&mut linked.program, vertex.raw());
        api.attach_shader(&mut linked.program, fragment.raw());

        if !api.link_program(&mut linked.program) {
            let log = api.program_info_log(&linked.program);
            return Err(ShaderError::LinkFailed { log });
        }

        Ok(linked)
    }

    pub fn raw(&self) -> &A::Program {
        &self.program
    }
}

impl<A: GraphicsApi> Drop for LinkedProgram<A> {
    fn drop(&mut self) {
        self.api.delete_program(&mut self.program);
    }
}
