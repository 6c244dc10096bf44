//! Cycle-level testbench for streaming cores
//!
//! Drives a [`StreamingCore`] the way a hardware verification harness
//! drives the RTL: a source queues input beats and withholds "valid" on
//! idle ticks, a sink collects output beats and withholds "ready" on
//! backpressure ticks. Both sides follow their configured
//! [`PausePattern`](crate::PausePattern), so a run is fully reproducible.
//!
//! ```rust
//! use cordic_axis::{Beat, CordicPipeline, CoreConfig, HarnessConfig, PausePattern, Testbench};
//!
//! let core = CordicPipeline::new(CoreConfig::default()).unwrap();
//! let harness = HarnessConfig::default()
//!     .idle(PausePattern::cycle_pause())
//!     .backpressure(PausePattern::cycle_pause());
//! let mut tb = Testbench::new(core, harness).unwrap();
//!
//! tb.reset();
//! tb.send([Beat::angle(0), Beat::angle(0x4000)]);
//! let outputs = tb.run().unwrap();
//! assert_eq!(outputs.len(), 2);
//! ```

use std::collections::VecDeque;

use crate::config::HarnessConfig;
use crate::error::{AxisError, AxisResult};
use crate::frame;
use crate::pause::{PauseGenerator, PausePattern};
use crate::traits::StreamingCore;
use crate::types::{Beat, StreamStats};

/// Ticks reset is held asserted, then released, by [`Testbench::reset`].
pub const RESET_TICKS: usize = 2;

/// Producer side of the input channel
///
/// Once "valid" is raised for a beat it stays raised until the core takes
/// the beat; the idle pattern only decides when a new beat is presented.
#[derive(Debug, Clone)]
pub struct AxisSource {
    queue: VecDeque<Beat>,
    idle: PauseGenerator,
    presenting: bool,
    sent: u64,
}

impl AxisSource {
    /// Create a source with the given idle pattern
    pub fn new(idle: &PausePattern) -> AxisResult<Self> {
        Ok(Self {
            queue: VecDeque::new(),
            idle: idle.generator()?,
            presenting: false,
            sent: 0,
        })
    }

    /// Queue beats for transmission
    pub fn send(&mut self, beats: impl IntoIterator<Item = Beat>) {
        self.queue.extend(beats);
    }

    /// Beats not yet accepted by the core
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Check if every queued beat has been accepted
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Beats accepted by the core so far
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Drop queued beats
    pub fn clear(&mut self) {
        self.queue.clear();
        self.presenting = false;
    }

    /// Beat driven on this tick (`None` = valid low)
    pub fn offer(&mut self) -> Option<Beat> {
        let paused = self.idle.pause();
        if !self.presenting && !paused && !self.queue.is_empty() {
            self.presenting = true;
        }
        if self.presenting {
            self.queue.front().copied()
        } else {
            None
        }
    }

    /// Record the handshake result for this tick
    pub fn complete(&mut self, accepted: bool) {
        if accepted && self.presenting {
            self.queue.pop_front();
            self.presenting = false;
            self.sent += 1;
        }
    }
}

/// Consumer side of the output channel
#[derive(Debug, Clone)]
pub struct AxisSink {
    received: Vec<Beat>,
    backpressure: PauseGenerator,
}

impl AxisSink {
    /// Create a sink with the given backpressure pattern
    pub fn new(backpressure: &PausePattern) -> AxisResult<Self> {
        Ok(Self {
            received: Vec::new(),
            backpressure: backpressure.generator()?,
        })
    }

    /// Ready decision for this tick
    pub fn ready(&mut self) -> bool {
        !self.backpressure.pause()
    }

    /// Store a transferred beat
    pub fn receive(&mut self, beat: Beat) {
        self.received.push(beat);
    }

    /// Beats received and not yet drained
    pub fn received(&self) -> &[Beat] {
        &self.received
    }

    /// Take all received beats
    pub fn drain(&mut self) -> Vec<Beat> {
        std::mem::take(&mut self.received)
    }
}

/// Source, core and sink clocked together
pub struct Testbench<C: StreamingCore> {
    core: C,
    config: HarnessConfig,
    source: AxisSource,
    sink: AxisSink,
    ticks: u64,
}

impl<C: StreamingCore> Testbench<C> {
    /// Wrap `core` with a source and sink configured by `config`
    pub fn new(core: C, config: HarnessConfig) -> AxisResult<Self> {
        config.validate()?;
        Ok(Self {
            source: AxisSource::new(&config.idle)?,
            sink: AxisSink::new(&config.backpressure)?,
            core,
            config,
            ticks: 0,
        })
    }

    /// The core under test
    pub fn core(&self) -> &C {
        &self.core
    }

    /// Mutable access to the core under test
    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Harness configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Ticks driven since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Core transfer statistics
    pub fn stats(&self) -> StreamStats {
        self.core.stats()
    }

    /// Pulse reset: asserted for two ticks, then two ticks of recovery
    ///
    /// Queued input and unread output are discarded.
    pub fn reset(&mut self) {
        self.source.clear();
        self.sink.drain();

        self.core.set_reset(true);
        for _ in 0..RESET_TICKS {
            self.step_idle();
        }
        self.core.set_reset(false);
        for _ in 0..RESET_TICKS {
            self.step_idle();
        }
    }

    fn step_idle(&mut self) {
        self.core.tick(None, false);
        self.ticks += 1;
    }

    /// Queue input beats
    pub fn send(&mut self, beats: impl IntoIterator<Item = Beat>) {
        self.source.send(beats);
    }

    /// Queue a packed input frame for the core's mode
    pub fn send_frame(&mut self, bytes: &[u8]) -> AxisResult<()> {
        let beats = frame::decode_input(self.core.info().mode, bytes)?;
        self.source.send(beats);
        Ok(())
    }

    /// Drive one tick through source, core and sink
    pub fn step(&mut self) {
        let input = self.source.offer();
        let m_ready = self.sink.ready();
        let outcome = self.core.tick(input, m_ready);
        self.source.complete(outcome.accepted);
        if let Some(beat) = outcome.output {
            self.sink.receive(beat);
        }
        self.ticks += 1;
    }

    /// Tick until every queued beat has come out of the core
    ///
    /// Returns the received beats in order.
    pub fn run(&mut self) -> AxisResult<Vec<Beat>> {
        let start = self.ticks;
        let queued = self.source.pending();

        while !self.source.is_empty() || !self.core.is_empty() {
            let elapsed = self.ticks - start;
            if elapsed >= self.config.max_ticks {
                let pending = self.source.pending() + self.core.occupancy();
                tracing::warn!(elapsed, pending, "testbench run hit tick budget");
                return Err(AxisError::Timeout {
                    ticks: elapsed,
                    pending,
                });
            }
            self.step();
        }

        let outputs = self.sink.drain();
        let stats = self.core.stats();
        tracing::info!(
            beats = queued,
            received = outputs.len(),
            ticks = self.ticks - start,
            avg_latency = stats.avg_latency(),
            max_latency = stats.max_latency.unwrap_or(0),
            "testbench run complete"
        );
        Ok(outputs)
    }

    /// Queue `beats` and run to completion
    pub fn run_beats(&mut self, beats: impl IntoIterator<Item = Beat>) -> AxisResult<Vec<Beat>> {
        self.send(beats);
        self.run()
    }

    /// Take the received beats as a packed output frame
    pub fn recv_frame(&mut self) -> Vec<u8> {
        frame::encode_output(&self.sink.drain())
    }
}
