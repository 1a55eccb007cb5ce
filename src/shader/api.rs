use super::StageKind;

/// The slice of a graphics context the program lifecycle needs.
///
/// Shaped after a GL-style context: objects are allocated empty, fed source,
/// queried for status and log, and deleted explicitly. Deleting leaves the
/// handle in an unusable state; callers never touch a handle after deleting it.
pub trait GraphicsApi {
    type Shader;
    type Program;

    /// Returns `None` when the API cannot allocate a stage object.
    fn create_shader(&self, kind: StageKind) -> Option<Self::Shader>;
    /// Submits `source` and compiles it, returning the compile status.
    fn compile_shader(&self, shader: &mut Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> String;
    fn delete_shader(&self, shader: &mut Self::Shader);

    /// Returns `None` when the API cannot allocate a program object.
    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &mut Self::Program, shader: &Self::Shader);
    /// Links the attached stages, returning the link status.
    fn link_program(&self, program: &mut Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> String;
    fn delete_program(&self, program: &mut Self::Program);
}
