//! Emission cadence.
//!
//! Emission runs on a fixed wall-clock period, independent of how often the
//! host calls [`Simulation::frame`](crate::Simulation::frame). The timer
//! accumulates frame deltas and reports how many whole periods have passed.
//!
//! # Example
//!
//! ```ignore
//! use slitsim::time::EmissionTimer;
//! use std::time::Duration;
//!
//! let mut timer = EmissionTimer::new(Duration::from_millis(16));
//! timer.start();
//!
//! // In your frame loop:
//! for _ in 0..timer.advance(frame_delta) {
//!     // emit
//! }
//! ```

use std::time::Duration;

/// Fixed-period tick source for the emitter.
///
/// Starts stopped. [`start`](Self::start) and [`stop`](Self::stop) are both
/// idempotent, so a host can call them freely from UI callbacks.
#[derive(Clone, Debug)]
pub struct EmissionTimer {
    /// Time between ticks.
    period: Duration,
    /// Time carried over from the last advance.
    accumulated: Duration,
    /// Total ticks fired since creation or the last reset.
    tick_count: u64,
    /// Whether ticks are being scheduled.
    running: bool,
}

impl EmissionTimer {
    /// Create a stopped timer with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
            tick_count: 0,
            running: false,
        }
    }

    /// Begin scheduling ticks. No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
        }
    }

    /// Stop scheduling ticks and drop any partial period.
    ///
    /// Safe to call when already stopped.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.accumulated = Duration::ZERO;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Change the period. Accumulated time is kept.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Total ticks fired.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Feed elapsed wall-clock time; returns the number of ticks now due.
    ///
    /// Returns 0 while stopped. A zero period fires exactly one tick per call.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        let due = if self.period.is_zero() {
            1
        } else {
            self.accumulated += dt;
            let whole = self.accumulated.as_nanos() / self.period.as_nanos();
            let due = u32::try_from(whole).unwrap_or(u32::MAX);
            self.accumulated -= self.period * due;
            due
        };

        self.tick_count += u64::from(due);
        due
    }

    /// Clear accumulated time and the tick counter. Running state is kept.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.tick_count = 0;
    }
}

impl Default for EmissionTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}
