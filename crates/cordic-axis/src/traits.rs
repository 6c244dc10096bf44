//! Streaming core trait definition

use crate::types::{Beat, CoreInfo, StreamStats, TickOutcome};

/// A synchronous core behind valid/ready input and output channels
///
/// Time advances only through [`StreamingCore::tick`]. On each tick the
/// producer offers at most one beat (`input`, i.e. "valid") and the
/// consumer states whether it accepts output (`m_ready`). A transfer
/// happens on a channel only when both sides are asserted on the same
/// tick. Intermediate state is private to the core: only the committed
/// input and output beats are visible.
///
/// # Example
///
/// ```rust
/// use cordic_axis::{Beat, CordicPipeline, CoreConfig, StreamingCore};
///
/// let mut core = CordicPipeline::new(CoreConfig::default()).unwrap();
/// let outcome = core.tick(Some(Beat::angle(0)), true);
/// assert!(outcome.accepted);
/// assert!(outcome.output.is_none()); // result appears after `latency()` ticks
/// ```
pub trait StreamingCore: Send {
    // =========================================================================
    // Device Information
    // =========================================================================

    /// Get information about the core
    fn info(&self) -> CoreInfo;

    /// Ticks from input transfer to output transfer without backpressure
    fn latency(&self) -> usize;

    /// Get transfer statistics
    fn stats(&self) -> StreamStats;

    // =========================================================================
    // Reset
    // =========================================================================

    /// Drive the reset input
    ///
    /// While asserted the core holds every stage empty and asserts neither
    /// input readiness nor output validity.
    fn set_reset(&mut self, active: bool);

    /// Check if reset is asserted
    fn in_reset(&self) -> bool;

    // =========================================================================
    // Handshake
    // =========================================================================

    /// Input readiness for the current tick given the consumer's readiness
    fn s_ready(&self, m_ready: bool) -> bool;

    /// Output validity for the current tick
    fn m_valid(&self) -> bool;

    /// Output beat presented on the current tick, if any
    fn peek_output(&self) -> Option<Beat>;

    /// Evaluate one tick
    ///
    /// `input` is the beat offered by the producer (`None` when idle).
    /// If it is not accepted the producer must offer it again.
    fn tick(&mut self, input: Option<Beat>, m_ready: bool) -> TickOutcome;

    // =========================================================================
    // Occupancy
    // =========================================================================

    /// Number of beats currently inside the core
    fn occupancy(&self) -> usize;

    /// Check if no beat is in flight
    fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }
}

/// Convenience operations available on every streaming core
pub trait StreamingCoreExt: StreamingCore {
    /// Push `beats` through with an always-ready producer and consumer
    ///
    /// Returns the outputs in order. Returns nothing while reset is held.
    fn process(&mut self, beats: &[Beat]) -> Vec<Beat> {
        if self.in_reset() {
            return Vec::new();
        }

        let mut outputs = Vec::with_capacity(beats.len());
        let mut next = 0;
        while next < beats.len() || !self.is_empty() {
            let outcome = self.tick(beats.get(next).copied(), true);
            if outcome.accepted {
                next += 1;
            }
            outputs.extend(outcome.output);
        }
        outputs
    }
}

// Blanket implementation
impl<T: StreamingCore + ?Sized> StreamingCoreExt for T {}
