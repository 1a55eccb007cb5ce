use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::ShaderError;

/// Where a stage's source text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderOrigin {
    /// Text compiled into the binary (or otherwise fixed at startup).
    Embedded(Cow<'static, str>),
    /// A file re-read every time the origin is resolved.
    File(PathBuf),
}

impl ShaderOrigin {
    /// Produces the origin's current text. File origins are read fresh on
    /// every call so edits on disk show up immediately.
    pub fn resolve(&self) -> Result<String, ShaderError> {
        match self {
            ShaderOrigin::Embedded(text) => Ok(text.to_string()),
            ShaderOrigin::File(path) => {
                fs::read_to_string(path).map_err(|source| ShaderError::SourceUnavailable {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

impl fmt::Display for ShaderOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderOrigin::Embedded(_) => write!(f, "<embedded>"),
            ShaderOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}
