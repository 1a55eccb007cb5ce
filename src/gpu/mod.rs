pub mod buffer;
pub mod device;
pub mod pipeline;
pub mod uniforms;
pub mod validation;

pub use buffer::*;
pub use device::*;
pub use pipeline::*;
pub use uniforms::*;
pub use validation::*;
