//! Frame clock converting host timestamps into elapsed seconds.
//!
//! The host render loop hands us a monotonic nanosecond timestamp once per
//! frame. The clock turns that stream into non-negative deltas and forgets
//! its baseline whenever the simulation pauses, so wall time spent paused
//! never shows up as a burst of simulated time.

use crate::types::NANOS_PER_SECOND;

/// Monotonic timestamp stream to elapsed-seconds adapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameClock {
    /// Timestamp of the previous tick; `None` while awaiting the first tick.
    last_tick: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one timestamp and return seconds elapsed since the previous one.
    ///
    /// The first tick after construction or [`invalidate`](Self::invalidate)
    /// only records the baseline and returns `0.0`. A timestamp earlier than
    /// the baseline also yields `0.0`.
    pub fn tick(&mut self, now_nanos: u64) -> f64 {
        let elapsed = match self.last_tick {
            Some(last) => now_nanos.saturating_sub(last) as f64 / NANOS_PER_SECOND,
            None => 0.0,
        };
        self.last_tick = Some(now_nanos);
        elapsed
    }

    /// Forget the baseline; the next tick is treated as a first tick.
    pub fn invalidate(&mut self) {
        self.last_tick = None;
    }

    /// Set the baseline explicitly.
    pub fn rebase(&mut self, now_nanos: u64) {
        self.last_tick = Some(now_nanos);
    }

    /// Whether a baseline is recorded.
    pub fn is_armed(&self) -> bool {
        self.last_tick.is_some()
    }
}
