use std::cell::Cell;

use super::{GraphicsApi, StageKind};

/// Marker that makes [`RecordingApi`] reject a stage at compile time.
pub const COMPILE_ERROR: &str = "SYNTAX ERROR";
/// Marker that makes [`RecordingApi`] reject a program at link time.
pub const LINK_ERROR: &str = "LINK ERROR";

pub struct FakeShader {
    pub kind: StageKind,
    pub source: Option<String>,
    log: String,
    deleted: bool,
}

pub struct FakeProgram {
    pub id: u32,
    pub stages: Vec<(StageKind, String)>,
    log: String,
    deleted: bool,
}

impl FakeProgram {
    pub fn vertex_source(&self) -> Option<&str> {
        self.stage_source(StageKind::Vertex)
    }

    pub fn fragment_source(&self) -> Option<&str> {
        self.stage_source(StageKind::Fragment)
    }

    fn stage_source(&self, wanted: StageKind) -> Option<&str> {
        self.stages
            .iter()
            .find(|(kind, _)| *kind == wanted)
            .map(|(_, source)| source.as_str())
    }
}

/// In-memory stand-in for a graphics context that counts every object it
/// hands out and every compile/link it performs.
#[derive(Default)]
pub struct RecordingApi {
    pub live_shaders: Cell<usize>,
    pub live_programs: Cell<usize>,
    pub compiles: Cell<usize>,
    pub links: Cell<usize>,
    pub refuse_shaders: Cell<bool>,
    pub refuse_programs: Cell<bool>,
    next_program: Cell<u32>,
}

impl RecordingApi {
    pub fn gpu_operations(&self) -> usize {
        self.compiles.get() + self.links.get()
    }
}

impl GraphicsApi for RecordingApi {
    type Shader = FakeShader;
    type Program = FakeProgram;

    fn create_shader(&self, kind: StageKind) -> Option<FakeShader> {
        if self.refuse_shaders.get() {
            return None;
        }
        self.live_shaders.set(self.live_shaders.get() + 1);
        Some(FakeShader {
            kind,
            source: None,
            log: String::new(),
            deleted: false,
        })
    }

    fn compile_shader(&self, shader: &mut FakeShader, source: &str) -> bool {
        assert!(!shader.deleted, "compile on a deleted shader");
        self.compiles.set(self.compiles.get() + 1);
        if source.contains(COMPILE_ERROR) {
            shader.log = format!("0:1({}): error: syntax error", shader.kind.label());
            return false;
        }
        shader.source = Some(source.to_string());
        true
    }

    fn shader_info_log(&self, shader: &FakeShader) -> String {
        shader.log.clone()
    }

    fn delete_shader(&self, shader: &mut FakeShader) {
        assert!(!shader.deleted, "shader deleted twice");
        shader.deleted = true;
        self.live_shaders.set(self.live_shaders.get() - 1);
    }

    fn create_program(&self) -> Option<FakeProgram> {
        if self.refuse_programs.get() {
            return None;
        }
        let id = self.next_program.get() + 1;
        self.next_program.set(id);
        self.live_programs.set(self.live_programs.get() + 1);
        Some(FakeProgram {
            id,
            stages: Vec::new(),
            log: String::new(),
            deleted: false,
        })
    }

    fn attach_shader(&self, program: &mut FakeProgram, shader: &FakeShader) {
        let source = shader.source.clone().expect("attached an uncompiled shader");
        program.stages.push((shader.kind, source));
    }

    fn link_program(&self, program: &mut FakeProgram) -> bool {
        self.links.set(self.links.get() + 1);
        if program.stages.iter().any(|(_, source)| source.contains(LINK_ERROR)) {
            program.log = "error: vertex output does not match fragment input".to_string();
            return false;
        }
        program.stages.len() == 2
    }

    fn program_info_log(&self, program: &FakeProgram) -> String {
        program.log.clone()
    }

    fn delete_program(&self, program: &mut FakeProgram) {
        assert!(!program.deleted, "program deleted twice");
        program.deleted = true;
        self.live_programs.set(self.live_programs.get() - 1);
    }
}
