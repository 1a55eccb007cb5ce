pub mod state;
pub mod surfaces;

pub use state::{FpsCounter, FrameClock, IntervalTimer};
pub use surfaces::{needs_reconfigure, SurfaceManager};
