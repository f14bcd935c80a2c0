//! Real-time frame pacing.
//!
//! [`FrameDriver`] turns a [`TimeSource`] into a stream of `step(delta_ms)`
//! calls at `target_fps`.  Swap in [`ManualTimeSource`] for headless or test
//! runs: every frame then covers exactly one nominal frame of time and
//! nothing sleeps.

use std::time::{Duration, Instant};

use sw_link::ProximityIndex;
use sw_motion::MotionPolicy;

use crate::{Sim, SimObserver, StepOutcome};

/// A monotonic millisecond clock that can also wait.
pub trait TimeSource {
    fn now_ms(&mut self) -> f64;
    fn wait_ms(&mut self, ms: f64);
}

/// Wall-clock time via [`Instant`]; waits by sleeping the thread.
pub struct MonotonicTimeSource {
    start: Instant,
}

impl MonotonicTimeSource {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000.0
    }

    fn wait_ms(&mut self, ms: f64) {
        if ms > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(ms / 1_000.0));
        }
    }
}

/// Deterministic time that only moves when waited on or advanced.
#[derive(Clone, Debug, Default)]
pub struct ManualTimeSource {
    now: f64,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump forward by `ms` (ignored if not positive).
    pub fn advance(&mut self, ms: f64) {
        if ms > 0.0 {
            self.now += ms;
        }
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&mut self) -> f64 {
        self.now
    }

    fn wait_ms(&mut self, ms: f64) {
        self.advance(ms);
    }
}

/// Paces [`Sim::step`] calls to a target frame rate.
///
/// Each frame measures the time since the previous frame started, steps the
/// simulation with that delta, then waits out whatever is left of the frame
/// budget.  The first frame uses the nominal frame length.  A frame that
/// overruns its budget simply delays the next one.
pub struct FrameDriver<T: TimeSource> {
    time:     T,
    frame_ms: f64,
    last_ms:  Option<f64>,
}

impl<T: TimeSource> FrameDriver<T> {
    pub fn new(time: T, target_fps: u32) -> Self {
        Self { time, frame_ms: 1_000.0 / target_fps.max(1) as f64, last_ms: None }
    }

    #[inline]
    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut T {
        &mut self.time
    }

    /// Run one frame.
    pub fn frame<P, I, O>(&mut self, sim: &mut Sim<P, I>, observer: &mut O) -> StepOutcome
    where
        P: MotionPolicy,
        I: ProximityIndex,
        O: SimObserver,
    {
        let start = self.time.now_ms();
        let delta = self.last_ms.map_or(self.frame_ms, |last| start - last);
        self.last_ms = Some(start);

        let outcome = sim.step_observed(delta, observer);

        let spent = self.time.now_ms() - start;
        self.time.wait_ms(self.frame_ms - spent);
        outcome
    }

    /// Run `n` frames.  Returns how many of them advanced the simulation.
    pub fn run_frames<P, I, O>(&mut self, n: u64, sim: &mut Sim<P, I>, observer: &mut O) -> u64
    where
        P: MotionPolicy,
        I: ProximityIndex,
        O: SimObserver,
    {
        (0..n).filter(|_| self.frame(sim, observer).ticked()).count() as u64
    }
}
