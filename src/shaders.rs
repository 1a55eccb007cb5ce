//! Shaders compiled into the binary, used when hot reload is off.

pub const EMBEDDED_VERTEX: &str = include_str!("../shaders/rt.vert.wgsl");
pub const EMBEDDED_FRAGMENT: &str = include_str!("../shaders/rt.frag.wgsl");

/// Files watched when hot reload is on, relative to the working directory.
pub const DEFAULT_VERTEX_PATH: &str = "shaders/rt.vert.wgsl";
pub const DEFAULT_FRAGMENT_PATH: &str = "shaders/rt.frag.wgsl";
