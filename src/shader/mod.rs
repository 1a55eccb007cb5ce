pub mod api;
pub mod error;
pub mod origin;
pub mod program;
pub mod reload;
pub mod stage;

#[cfg(test)]
pub(crate) mod testing;

pub use api::GraphicsApi;
pub use error::ShaderError;
pub use origin::ShaderOrigin;
pub use program::LinkedProgram;
pub use reload::{ReloadController, ReloadOutcome, SourceSnapshot};
pub use stage::{CompiledShader, StageKind};
