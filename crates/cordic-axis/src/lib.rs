//! Streaming CORDIC core
//!
//! This crate wraps the fixed-point engine from `cordic-core` in a
//! pipelined core with valid/ready input and output channels:
//!
//! - **Pipeline**: one stage per micro-rotation, global stall on
//!   backpressure, fixed latency and strict FIFO order
//! - **Framing**: little-endian 16-bit lane packing for input and output frames
//! - **Simulation**: cycle-level testbench with idle and backpressure patterns
//!
//! # Feature Flags
//!
//! - `sim` (default): testbench and the `cordic-sweep` binary
//!
//! # Example
//!
//! ```rust
//! use cordic_axis::{Beat, CordicPipeline, CoreConfig, StreamingCoreExt};
//!
//! let mut core = CordicPipeline::new(CoreConfig::default()).unwrap();
//! let outputs = core.process(&[Beat::angle(0), Beat::angle(0x4000)]);
//!
//! // sin(π/2), cos(π/2)
//! assert!(outputs[1].lane0 >= 32765);
//! assert!(outputs[1].lane1.abs() <= 2);
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod observe;
pub mod pause;
pub mod pipeline;
pub mod traits;
pub mod types;

#[cfg(feature = "sim")]
pub mod sim;

// Re-export main types
pub use config::{AxisConfig, CoreConfig, HarnessConfig};
pub use error::{AxisError, AxisResult};
pub use observe::{init_logging, LogConfig, LogFormat, LogLevel};
pub use pause::{PauseGenerator, PausePattern};
pub use pipeline::{CordicPipeline, RESET_RECOVERY_TICKS};
pub use traits::{StreamingCore, StreamingCoreExt};
pub use types::{Beat, CoreInfo, StreamStats, TickOutcome};

pub use cordic_core::CordicMode;

#[cfg(feature = "sim")]
pub use sim::{AxisSink, AxisSource, Testbench};

/// Create a streaming core for `config`
pub fn create_core(config: &CoreConfig) -> AxisResult<Box<dyn StreamingCore>> {
    Ok(Box::new(CordicPipeline::new(config.clone())?))
}

/// Create the default streaming core (sin/cos, default iteration count)
pub fn create_default() -> AxisResult<Box<dyn StreamingCore>> {
    create_core(&CoreConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default() {
        let mut core = create_default().unwrap();
        assert_eq!(core.info().mode, CordicMode::SinCos);
        assert_eq!(core.latency(), cordic_core::DEFAULT_ITERATIONS);

        // Extension trait works through the trait object
        let outputs = core.process(&[Beat::angle(0)]);
        assert_eq!(outputs.len(), 1);
    }

    #[test]
    fn test_create_core_rejects_bad_config() {
        assert!(create_core(&CoreConfig::default().iterations(99)).is_err());
    }
}
