use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::shader::ShaderOrigin;
use crate::shaders::{
    DEFAULT_FRAGMENT_PATH, DEFAULT_VERTEX_PATH, EMBEDDED_FRAGMENT, EMBEDDED_VERTEX,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    rtlive                                   # Render the built-in ray tracer
    rtlive --reload                          # Hot-reload shaders/rt.vert.wgsl and shaders/rt.frag.wgsl
    rtlive --reload --fragment scene.wgsl    # Hot-reload a different fragment shader
    rtlive --fps --size 1024                 # 1024x1024 window, log FPS every second")]
pub struct Cli {
    /// Re-read the shader files periodically and swap in the new program when they change
    #[arg(long)]
    pub reload: bool,

    /// Log frames per second
    #[arg(long)]
    pub fps: bool,

    /// Window size in pixels (the window is square)
    #[arg(long, value_name = "N", default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// Seconds between reload checks
    #[arg(long, value_name = "SECS", default_value_t = 2.0, value_parser = parse_interval)]
    pub reload_interval: f64,

    /// Vertex shader file watched with --reload
    #[arg(long, value_name = "PATH", default_value = DEFAULT_VERTEX_PATH, requires = "reload")]
    pub vertex: PathBuf,

    /// Fragment shader file watched with --reload
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FRAGMENT_PATH, requires = "reload")]
    pub fragment: PathBuf,
}

/// Startup values handed to the host once the command line is parsed.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub reload_enabled: bool,
    pub vertex_origin: ShaderOrigin,
    pub fragment_origin: ShaderOrigin,
    pub reload_interval: Duration,
    pub show_fps: bool,
    pub window_size: u32,
}

impl Cli {
    pub fn into_config(self) -> HostConfig {
        let (vertex_origin, fragment_origin) = if self.reload {
            (
                ShaderOrigin::File(self.vertex),
                ShaderOrigin::File(self.fragment),
            )
        } else {
            (
                ShaderOrigin::Embedded(Cow::Borrowed(EMBEDDED_VERTEX)),
                ShaderOrigin::Embedded(Cow::Borrowed(EMBEDDED_FRAGMENT)),
            )
        };

        HostConfig {
            reload_enabled: self.reload,
            vertex_origin,
            fragment_origin,
            reload_interval: Duration::from_secs_f64(self.reload_interval),
            show_fps: self.fps,
            window_size: self.size,
        }
    }
}

fn parse_interval(value: &str) -> Result<f64, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err(format!("reload interval must be a positive number of seconds, got {value}"))
    }
}
