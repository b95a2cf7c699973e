//! Time facilities for the simulation.
//!
//! Two clocks live here:
//!
//! - [`SimulationClock`] owns the pause flag and the time-speed multiplier.
//!   Every body and particle updater reads the simulated delta it produces.
//! - [`FrameTimer`] measures wall-clock frame deltas with `std::time`, for
//!   drivers that do not get a delta from a windowing layer.
//!
//! # Example
//!
//! ```ignore
//! use orrery::time::{FrameTimer, SimulationClock};
//!
//! let mut timer = FrameTimer::new();
//! let mut clock = SimulationClock::new();
//!
//! // In your frame loop:
//! let frame = clock.tick(timer.update());
//! println!("real {:.4}s, simulated {:.4}s", frame.real_delta, frame.sim_delta);
//! ```

use std::time::{Duration, Instant};

/// Timing values for one frame, produced by [`SimulationClock::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Wall-clock seconds since the previous frame.
    pub real_delta: f32,
    /// Simulated seconds since the previous frame (0 while paused).
    pub sim_delta: f32,
    /// Wall-clock seconds since the clock started.
    pub real_elapsed: f32,
    /// Simulated seconds since the clock started.
    pub sim_elapsed: f32,
    /// Index of this frame, starting at 1 for the first tick.
    pub frame: u64,
}

/// Global simulation clock: pause flag plus time-speed multiplier.
///
/// Mutated only by explicit commands; read once per frame through
/// [`tick`](Self::tick).
#[derive(Clone, Debug)]
pub struct SimulationClock {
    /// Whether simulated time is frozen.
    paused: bool,
    /// Time scale multiplier (1.0 = normal speed, never negative).
    time_scale: f32,
    /// Total wall-clock seconds seen by `tick`.
    real_elapsed: f32,
    /// Total simulated seconds.
    sim_elapsed: f32,
    /// Total ticks since start.
    frame_count: u64,
}

impl SimulationClock {
    /// Create a running clock at normal speed.
    pub fn new() -> Self {
        Self {
            paused: false,
            time_scale: 1.0,
            real_elapsed: 0.0,
            sim_elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock by one frame of `real_delta` wall-clock seconds.
    ///
    /// Negative deltas are treated as zero.
    pub fn tick(&mut self, real_delta: f32) -> FrameTime {
        let real_delta = real_delta.max(0.0);
        let sim_delta = self.sim_delta(real_delta);

        self.real_elapsed += real_delta;
        self.sim_elapsed += sim_delta;
        self.frame_count += 1;

        FrameTime {
            real_delta,
            sim_delta,
            real_elapsed: self.real_elapsed,
            sim_elapsed: self.sim_elapsed,
            frame: self.frame_count,
        }
    }

    /// Simulated seconds corresponding to `real_delta` under the current
    /// pause state and time scale.
    #[inline]
    pub fn sim_delta(&self, real_delta: f32) -> f32 {
        if self.paused {
            0.0
        } else {
            real_delta * self.time_scale
        }
    }

    /// Whether simulated time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Total simulated seconds.
    #[inline]
    pub fn sim_elapsed(&self) -> f32 {
        self.sim_elapsed
    }

    /// Total wall-clock seconds.
    #[inline]
    pub fn real_elapsed(&self) -> f32 {
        self.real_elapsed
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Freeze simulated time. Real time keeps flowing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume simulated time.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed
    /// - `0.0` = frozen without pausing
    ///
    /// Negative values would run time backwards and are clamped to zero.
    pub fn set_time_scale(&mut self, scale: f32) {
        if scale < 0.0 || scale.is_nan() {
            log::warn!("time scale {} is not allowed, clamping to 0", scale);
            self.time_scale = 0.0;
        } else {
            self.time_scale = scale;
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock frame timer.
///
/// Provides frame deltas, frame counting and FPS calculation.
#[derive(Debug)]
pub struct FrameTimer {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frames seen since creation.
    frame_count: u64,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<f32>,
}

impl FrameTimer {
    /// Create a new timer starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            fps: 0.0,
            frame_count: 0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fixed_delta: None,
        }
    }

    /// Create a timer that always reports `delta` seconds per frame.
    pub fn fixed(delta: f32) -> Self {
        let mut timer = Self::new();
        timer.set_fixed_delta(Some(delta));
        timer
    }

    /// Measure one frame. Call once per frame; returns the delta in seconds.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.fixed_delta.unwrap_or(raw_delta)
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total frames measured.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Set a fixed delta time for deterministic updates.
    ///
    /// Pass `None` to use real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.map(|d| d.max(0.0));
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
