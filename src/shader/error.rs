use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning shader origins into a program.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to read shader source {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create shader [{label}]")]
    StageCreationFailed { label: String },

    #[error("Failed to compile shader [{label}]{}", with_log(.log))]
    CompileFailed { label: String, log: String },

    #[error("Failed to create shader program")]
    ProgramCreationFailed,

    #[error("Failed to link shader program{}", with_log(.log))]
    LinkFailed { log: String },
}

// Compiler and linker logs are appended verbatim.
fn with_log(log: &str) -> String {
    if log.is_empty() {
        String::new()
    } else {
        format!(":\n{log}")
    }
}
