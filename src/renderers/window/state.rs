use std::time::{Duration, Instant};

/// Countdown that fires once every `period` of accumulated frame time and then
/// restarts from the full period.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    remaining: Duration,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            remaining: period,
        }
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        if delta >= self.remaining {
            self.remaining = self.period;
            true
        } else {
            self.remaining -= delta;
            false
        }
    }
}

// Counts frames and reports the total once per second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window: IntervalTimer,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            window: IntervalTimer::new(Duration::from_secs(1)),
        }
    }

    pub fn record_frame(&mut self, delta: Duration) -> Option<u32> {
        self.frames += 1;
        if self.window.advance(delta) {
            Some(std::mem::take(&mut self.frames))
        } else {
            None
        }
    }
}

/// Wall-clock bookkeeping for the render loop.
pub struct FrameClock {
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame_time: now,
        }
    }

    /// Time since the previous call (or since construction).
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        delta
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}
