mod cli;
mod gpu;
mod renderers;
mod shader;
mod shaders;
mod windowed_event_loop;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use windowed_event_loop::run_windowed_event_loop;

fn main() {
    let config = Cli::parse().into_config();
    initialise_tracing();

    if let Err(err) = run_windowed_event_loop(config) {
        tracing::error!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
