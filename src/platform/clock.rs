//! Clocks and frame pacing

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::Millis;

/// Source of in-game timestamps
pub trait Clock {
    /// Milliseconds since the unix epoch
    fn now_ms(&self) -> Millis;
}

/// The host's wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

/// Measures the real interval between frames and sleeps to hold the target rate
#[derive(Debug)]
pub struct FramePacer {
    frame_time: Duration,
    max_dt: f32,
    last: Instant,
    /// Frames counted in the current one-second window
    window_frames: u32,
    window_start: Instant,
    fps: u32,
}

impl FramePacer {
    pub fn new(target_fps: u32, max_dt: f32) -> Self {
        let now = Instant::now();
        Self {
            frame_time: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            max_dt,
            last: now,
            window_frames: 0,
            window_start: now,
            fps: 0,
        }
    }

    /// Wait out the rest of the frame, then return the measured dt in
    /// seconds since the previous call, clamped to `max_dt`
    pub fn wait_next(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame_time {
            thread::sleep(self.frame_time - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;

        self.window_frames += 1;
        let window = now.duration_since(self.window_start);
        if window >= Duration::from_secs(1) {
            self.fps = (self.window_frames as f64 / window.as_secs_f64()).round() as u32;
            self.window_frames = 0;
            self.window_start = now;
        }

        dt.min(self.max_dt)
    }

    /// Frames per second over the last full window
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
