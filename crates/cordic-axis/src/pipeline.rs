//! Pipelined CORDIC core
//!
//! One stage per micro-rotation. Stage `i` holds the state of a beat after
//! `i + 1` iterations; the last stage drives the output channel through the
//! final quadrant correction. Every stage advances on the same tick, so a
//! full pipeline accepts and delivers one beat per tick.
//!
//! Flow control uses a global stall: when the last stage holds a result and
//! the consumer is not ready, no stage moves and input readiness drops.
//! When the producer is idle the stages still advance, carrying empty
//! slots, so the pipeline drains without new input.

use cordic_core::{Cordic, StageState};

use crate::config::CoreConfig;
use crate::error::AxisResult;
use crate::traits::StreamingCore;
use crate::types::{Beat, CoreInfo, StreamStats, TickOutcome};

/// Ticks after reset deassertion before input is accepted again.
pub const RESET_RECOVERY_TICKS: u32 = 2;

#[derive(Debug, Clone, Copy)]
struct Slot {
    state: StageState,
    accepted_at: u64,
}

/// Cycle-level model of the pipelined core
#[derive(Debug, Clone)]
pub struct CordicPipeline {
    config: CoreConfig,
    cordic: Cordic,
    slots: Vec<Option<Slot>>,
    reset: bool,
    recovery: u32,
    stats: StreamStats,
}

impl CordicPipeline {
    /// Build a pipeline with one stage per configured iteration.
    pub fn new(config: CoreConfig) -> AxisResult<Self> {
        config.validate()?;
        let cordic = Cordic::new(config.mode, config.iterations)?;

        tracing::debug!(
            mode = %config.mode,
            depth = config.iterations,
            "CORDIC pipeline created"
        );

        Ok(Self {
            slots: vec![None; config.iterations],
            config,
            cordic,
            reset: false,
            recovery: 0,
            stats: StreamStats::default(),
        })
    }

    /// Configuration the pipeline was built from
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Engine evaluated by the stages
    pub fn cordic(&self) -> &Cordic {
        &self.cordic
    }

    /// Number of stages
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    fn output_slot(&self) -> Option<&Slot> {
        self.slots.last().and_then(Option::as_ref)
    }

    fn active(&self) -> bool {
        !self.reset && self.recovery == 0
    }

    fn finish(&self, slot: &Slot) -> Beat {
        self.cordic.finish(slot.state).into()
    }
}

impl StreamingCore for CordicPipeline {
    fn info(&self) -> CoreInfo {
        CoreInfo {
            name: format!("cordic_{:?}", self.config.mode).to_lowercase(),
            mode: self.config.mode,
            iterations: self.config.iterations,
            latency: self.depth(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn latency(&self) -> usize {
        self.depth()
    }

    fn stats(&self) -> StreamStats {
        self.stats.clone()
    }

    fn set_reset(&mut self, active: bool) {
        if active {
            let dropped = self.occupancy();
            self.slots.iter_mut().for_each(|slot| *slot = None);
            self.stats.flushed += dropped as u64;
            if !self.reset {
                tracing::debug!(dropped, "reset asserted");
            }
            self.reset = true;
            self.recovery = 0;
        } else if self.reset {
            tracing::debug!(recovery = RESET_RECOVERY_TICKS, "reset released");
            self.reset = false;
            self.recovery = RESET_RECOVERY_TICKS;
        }
    }

    fn in_reset(&self) -> bool {
        self.reset
    }

    fn s_ready(&self, m_ready: bool) -> bool {
        let stalled = self.output_slot().is_some() && !m_ready;
        self.active() && !stalled
    }

    fn m_valid(&self) -> bool {
        self.active() && self.output_slot().is_some()
    }

    fn peek_output(&self) -> Option<Beat> {
        if !self.active() {
            return None;
        }
        self.output_slot().map(|slot| self.finish(slot))
    }

    fn tick(&mut self, input: Option<Beat>, m_ready: bool) -> TickOutcome {
        let now = self.stats.ticks;
        self.stats.ticks += 1;

        if !self.active() {
            self.stats.reset_ticks += 1;
            self.recovery = self.recovery.saturating_sub(1);
            return TickOutcome::default();
        }

        // Phase 1: handshakes, evaluated on the state before the edge
        if !self.s_ready(m_ready) {
            self.stats.stall_ticks += 1;
            return TickOutcome::default();
        }

        // Phase 2: clock edge
        let last = self.depth() - 1;
        let output = match self.slots[last].take() {
            Some(slot) => {
                self.stats.record_latency(now - slot.accepted_at);
                Some(self.finish(&slot))
            }
            None => None,
        };

        let cordic = &self.cordic;
        for i in (1..=last).rev() {
            self.slots[i] = self.slots[i - 1].take().map(|slot| Slot {
                state: cordic.step(slot.state, i),
                ..slot
            });
        }

        self.slots[0] = input.map(|beat| Slot {
            state: cordic.step(cordic.prepare(beat.lane0, beat.lane1), 0),
            accepted_at: now,
        });

        match input {
            Some(beat) => {
                self.stats.beats_in += 1;
                tracing::trace!(tick = now, lane0 = beat.lane0, lane1 = beat.lane1, "input transfer");
            }
            None => self.stats.idle_ticks += 1,
        }
        if let Some(beat) = output {
            tracing::trace!(tick = now, lane0 = beat.lane0, lane1 = beat.lane1, "output transfer");
        }

        TickOutcome {
            accepted: input.is_some(),
            output,
        }
    }

    fn occupancy(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
