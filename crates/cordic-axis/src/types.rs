//! Streaming types and data structures

use cordic_core::CordicMode;
use serde::{Deserialize, Serialize};

/// One atomic transfer: a pair of 16-bit lanes
///
/// In sin/cos mode the input beat carries the angle code in `lane0`
/// (reinterpreted as `u16`); `lane1` is unused. Output beats carry
/// `(sin, cos)` or `(angle, magnitude)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Beat {
    pub lane0: i16,
    pub lane1: i16,
}

impl Beat {
    /// Create a beat from two lanes
    pub fn new(lane0: i16, lane1: i16) -> Self {
        Self { lane0, lane1 }
    }

    /// Sin/cos input beat for an angle code
    pub fn angle(code: u16) -> Self {
        Self {
            lane0: code as i16,
            lane1: 0,
        }
    }

    /// Angle/magnitude input beat for a vector
    pub fn vector(x: i16, y: i16) -> Self {
        Self { lane0: x, lane1: y }
    }

    /// `lane0` as an unsigned angle code
    pub fn angle_code(&self) -> u16 {
        self.lane0 as u16
    }

    /// Both lanes as a tuple
    pub fn lanes(&self) -> (i16, i16) {
        (self.lane0, self.lane1)
    }
}

impl From<(i16, i16)> for Beat {
    fn from((lane0, lane1): (i16, i16)) -> Self {
        Self { lane0, lane1 }
    }
}

/// What happened on one tick at the core boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The offered input beat was transferred into the core
    pub accepted: bool,

    /// Output beat transferred to the consumer on this tick
    pub output: Option<Beat>,
}

/// Information about a streaming core
#[derive(Debug, Clone, PartialEq)]
pub struct CoreInfo {
    /// Core identifier
    pub name: String,

    /// Function computed
    pub mode: CordicMode,

    /// Micro-rotations per beat
    pub iterations: usize,

    /// Ticks from input transfer to output transfer without backpressure
    pub latency: usize,

    /// Crate version
    pub version: String,
}

/// Counters for a running core
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamStats {
    /// Ticks evaluated (including reset)
    pub ticks: u64,

    /// Ticks spent in reset or reset recovery
    pub reset_ticks: u64,

    /// Beats accepted at the input
    pub beats_in: u64,

    /// Beats delivered at the output
    pub beats_out: u64,

    /// Beats discarded by reset before reaching the output
    pub flushed: u64,

    /// Ticks where the core was ready but no input was offered
    pub idle_ticks: u64,

    /// Ticks where an output was held because the consumer was not ready
    pub stall_ticks: u64,

    /// Smallest input-to-output latency seen, in ticks
    pub min_latency: Option<u64>,

    /// Largest input-to-output latency seen, in ticks
    pub max_latency: Option<u64>,

    /// Sum of all latencies, for the average
    pub total_latency: u64,
}

impl StreamStats {
    /// Record the latency of one delivered beat
    pub fn record_latency(&mut self, latency: u64) {
        self.beats_out += 1;
        self.total_latency += latency;
        self.min_latency = Some(self.min_latency.map_or(latency, |m| m.min(latency)));
        self.max_latency = Some(self.max_latency.map_or(latency, |m| m.max(latency)));
    }

    /// Average input-to-output latency in ticks
    pub fn avg_latency(&self) -> f64 {
        if self.beats_out == 0 {
            0.0
        } else {
            self.total_latency as f64 / self.beats_out as f64
        }
    }

    /// Beats accepted but not yet delivered
    pub fn in_flight(&self) -> u64 {
        self.beats_in
            .saturating_sub(self.beats_out)
            .saturating_sub(self.flushed)
    }

    /// Delivered beats per tick
    pub fn throughput(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.beats_out as f64 / self.ticks as f64
        }
    }
}
