use std::rc::Rc;

use super::{GraphicsApi, LinkedProgram, ShaderError, ShaderOrigin};

/// The source pair behind the active program. Only used to decide whether a
/// tick has anything to rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSnapshot {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Debug)]
pub enum ReloadOutcome {
    Unchanged,
    Reloaded,
    /// The attempt failed; the previous program is still active.
    Failed(ShaderError),
}

// Program and snapshot are only ever replaced together.
struct ActiveProgram<A: GraphicsApi> {
    program: LinkedProgram<A>,
    snapshot: SourceSnapshot,
}

/// Owns the active program and swaps in rebuilt programs when the sources on
/// disk change. Timing is up to the caller: `tick` does one check and returns.
pub struct ReloadController<A: GraphicsApi> {
    api: Rc<A>,
    vertex_origin: ShaderOrigin,
    fragment_origin: ShaderOrigin,
    active: ActiveProgram<A>,
}

impl<A: GraphicsApi> ReloadController<A> {
    /// Builds the startup program. There is nothing to fall back to yet, so
    /// any failure here is returned to the caller.
    pub fn new(
        api: Rc<A>,
        vertex_origin: ShaderOrigin,
        fragment_origin: ShaderOrigin,
    ) -> Result<Self, ShaderError> {
        let snapshot = resolve_pair(&vertex_origin, &fragment_origin)?;
        let program = LinkedProgram::build(&api, &snapshot.vertex, &snapshot.fragment)?;
        tracing::debug!(
            vertex = %vertex_origin,
            fragment = %fragment_origin,
            "built startup shader program"
        );

        Ok(Self {
            api,
            vertex_origin,
            fragment_origin,
            active: ActiveProgram { program, snapshot },
        })
    }

    pub fn tick(&mut self) -> ReloadOutcome {
        let fresh = match resolve_pair(&self.vertex_origin, &self.fragment_origin) {
            Ok(fresh) => fresh,
            Err(err) => return ReloadOutcome::Failed(err),
        };

        if fresh == self.active.snapshot {
            return ReloadOutcome::Unchanged;
        }

        match LinkedProgram::build(&self.api, &fresh.vertex, &fresh.fragment) {
            Ok(program) => {
                // Dropping the old pair here deletes the previous program.
                self.active = ActiveProgram {
                    program,
                    snapshot: fresh,
                };
                ReloadOutcome::Reloaded
            }
            Err(err) => ReloadOutcome::Failed(err),
        }
    }

    pub fn active(&self) -> &LinkedProgram<A> {
        &self.active.program
    }

    pub fn snapshot(&self) -> &SourceSnapshot {
        &self.active.snapshot
    }

    pub fn origins(&self) -> (&ShaderOrigin, &ShaderOrigin) {
        (&self.vertex_origin, &self.fragment_origin)
    }
}

fn resolve_pair(
    vertex: &ShaderOrigin,
    fragment: &ShaderOrigin,
) -> Result<SourceSnapshot, ShaderError> {
    Ok(SourceSnapshot {
        vertex: vertex.resolve()?,
        fragment: fragment.resolve()?,
    })
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::shader::testing::{RecordingApi, COMPILE_ERROR};

    fn embedded(text: &'static str) -> ShaderOrigin {
        ShaderOrigin::Embedded(Cow::Borrowed(text))
    }

    fn file_backed(api: &Rc<RecordingApi>, fragment: &Path) -> ReloadController<RecordingApi> {
        ReloadController::new(
            Rc::clone(api),
            embedded("VALID_VS"),
            ShaderOrigin::File(fragment.to_path_buf()),
        )
        .unwrap()
    }

    fn active_fragment(controller: &ReloadController<RecordingApi>) -> String {
        controller
            .active()
            .raw()
            .fragment_source()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_startup_with_embedded_sources() {
        let api = Rc::new(RecordingApi::default());
        let controller =
            ReloadController::new(Rc::clone(&api), embedded("VALID_VS"), embedded("VALID_FS"))
                .unwrap();

        assert_eq!(api.live_programs.get(), 1);
        assert_eq!(controller.snapshot().vertex, "VALID_VS");
        assert_eq!(controller.snapshot().fragment, "VALID_FS");
        assert_eq!(active_fragment(&controller), "VALID_FS");
    }

    #[test]
    fn test_startup_failure_is_returned() {
        let api = Rc::new(RecordingApi::default());
        let result =
            ReloadController::new(Rc::clone(&api), embedded("VALID_VS"), embedded(COMPILE_ERROR));

        assert!(matches!(
            result,
            Err(ShaderError::CompileFailed { ref label, .. }) if label == "Fragment"
        ));
        assert_eq!(api.live_programs.get(), 0);
        assert_eq!(api.live_shaders.get(), 0);
    }

    #[test]
    fn test_startup_with_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let api = Rc::new(RecordingApi::default());
        let result = ReloadController::new(
            Rc::clone(&api),
            embedded("VALID_VS"),
            ShaderOrigin::File(dir.path().join("rt.frag.wgsl")),
        );

        assert!(matches!(result, Err(ShaderError::SourceUnavailable { .. })));
        assert_eq!(api.gpu_operations(), 0);
    }

    #[test]
    fn test_unchanged_sources_skip_compilation_indefinitely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.frag.wgsl");
        fs::write(&path, "RED").unwrap();

        let api = Rc::new(RecordingApi::default());
        let mut controller = file_backed(&api, &path);
        let operations = api.gpu_operations();

        for _ in 0..100 {
            assert!(matches!(controller.tick(), ReloadOutcome::Unchanged));
        }
        assert_eq!(api.gpu_operations(), operations);
        assert_eq!(api.live_programs.get(), 1);
        assert_eq!(api.live_shaders.get(), 0);
    }

    #[test]
    fn test_syntax_error_keeps_previous_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.frag.wgsl");
        fs::write(&path, "RED").unwrap();

        let api = Rc::new(RecordingApi::default());
        let mut controller = file_backed(&api, &path);
        let program_id = controller.active().raw().id;

        fs::write(&path, COMPILE_ERROR).unwrap();
        match controller.tick() {
            ReloadOutcome::Failed(err) => {
                let message = err.to_string();
                assert!(message.contains("Fragment"));
                match err {
                    ShaderError::CompileFailed { log, .. } => assert!(!log.is_empty()),
                    other => panic!("unexpected error: {other}"),
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert_eq!(controller.active().raw().id, program_id);
        assert_eq!(active_fragment(&controller), "RED");
        assert_eq!(controller.snapshot().fragment, "RED");
        assert_eq!(api.live_programs.get(), 1);
        assert_eq!(api.live_shaders.get(), 0);
    }

    #[test]
    fn test_repeated_failures_leave_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.frag.wgsl");
        fs::write(&path, "RED").unwrap();

        let api = Rc::new(RecordingApi::default());
        let mut controller = file_backed(&api, &path);
        let program_id = controller.active().raw().id;
        let snapshot = controller.snapshot().clone();

        fs::write(&path, COMPILE_ERROR).unwrap();
        for _ in 0..5 {
            assert!(matches!(controller.tick(), ReloadOutcome::Failed(_)));
        }

        assert_eq!(controller.active().raw().id, program_id);
        assert_eq!(controller.snapshot(), &snapshot);
        assert_eq!(api.live_programs.get(), 1);
    }

    #[test]
    fn test_corrected_source_reloads_and_destroys_old_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.frag.wgsl");
        fs::write(&path, "RED").unwrap();

        let api = Rc::new(RecordingApi::default());
        let mut controller = file_backed(&api, &path);
        let first_id = controller.active().raw().id;

        fs::write(&path, COMPILE_ERROR).unwrap();
        assert!(matches!(controller.tick(), ReloadOutcome::Failed(_)));

        fs::write(&path, "GREEN").unwrap();
        assert!(matches!(controller.tick(), ReloadOutcome::Reloaded));

        assert_ne!(controller.active().raw().id, first_id);
        assert_eq!(active_fragment(&controller), "GREEN");
        assert_eq!(controller.snapshot().fragment, "GREEN");
        // Only the new program is alive; the old one was deleted in the swap.
        assert_eq!(api.live_programs.get(), 1);
        assert_eq!(api.live_shaders.get(), 0);

        assert!(matches!(controller.tick(), ReloadOutcome::Unchanged));
    }

    #[test]
    fn test_program_and_snapshot_change_together() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.frag.wgsl");
        fs::write(&path, "RED").unwrap();

        let api = Rc::new(RecordingApi::default());
        let mut controller = file_backed(&api, &path);

        for source in ["GREEN", COMPILE_ERROR, "BLUE", COMPILE_ERROR, "BLUE"] {
            fs::write(&path, source).unwrap();
            controller.tick();
            assert_eq!(active_fragment(&controller), controller.snapshot().fragment);
        }
        assert_eq!(controller.snapshot().fragment, "BLUE");
    }

    #[test]
    fn test_deleted_file_fails_without_touching_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.frag.wgsl");
        fs::write(&path, "RED").unwrap();

        let api = Rc::new(RecordingApi::default());
        let mut controller = file_backed(&api, &path);
        let program_id = controller.active().raw().id;
        let operations = api.gpu_operations();

        fs::remove_file(&path).unwrap();
        assert!(matches!(
            controller.tick(),
            ReloadOutcome::Failed(ShaderError::SourceUnavailable { .. })
        ));

        assert_eq!(controller.active().raw().id, program_id);
        assert_eq!(api.gpu_operations(), operations);
        assert_eq!(active_fragment(&controller), "RED");
    }

    #[test]
    fn test_vertex_change_reloads_and_vertex_failure_keeps_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.vert.wgsl");
        fs::write(&path, "VS_ONE").unwrap();

        let api = Rc::new(RecordingApi::default());
        let mut controller = ReloadController::new(
            Rc::clone(&api),
            ShaderOrigin::File(path.clone()),
            embedded("VALID_FS"),
        )
        .unwrap();

        fs::write(&path, "VS_TWO").unwrap();
        assert!(matches!(controller.tick(), ReloadOutcome::Reloaded));
        assert_eq!(controller.active().raw().vertex_source(), Some("VS_TWO"));
        assert_eq!(controller.snapshot().vertex, "VS_TWO");
        let program_id = controller.active().raw().id;

        fs::write(&path, COMPILE_ERROR).unwrap();
        match controller.tick() {
            ReloadOutcome::Failed(ShaderError::CompileFailed { label, log }) => {
                assert_eq!(label, "Vertex");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        assert_eq!(controller.active().raw().id, program_id);
        assert_eq!(controller.active().raw().vertex_source(), Some("VS_TWO"));
        assert_eq!(controller.snapshot().vertex, "VS_TWO");
        assert_eq!(api.live_programs.get(), 1);
        assert_eq!(api.live_shaders.get(), 0);
    }

    #[test]
    fn test_origins_are_exposed_for_logging() {
        let api = Rc::new(RecordingApi::default());
        let controller =
            ReloadController::new(Rc::clone(&api), embedded("VALID_VS"), embedded("VALID_FS"))
                .unwrap();

        let (vertex, fragment) = controller.origins();
        assert_eq!(vertex, &embedded("VALID_VS"));
        assert_eq!(fragment, &embedded("VALID_FS"));
    }
}
