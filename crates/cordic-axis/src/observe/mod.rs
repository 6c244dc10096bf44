//! # Observability
//!
//! Library code reports through `tracing` macros only; binaries and tests
//! choose where those events go by calling [`init_logging`] once.
//!
//! | Target                 | Level | Events                              |
//! |------------------------|-------|-------------------------------------|
//! | `cordic_axis::pipeline`| debug | reset edges, construction           |
//! | `cordic_axis::pipeline`| trace | every input/output transfer         |
//! | `cordic_axis::sim`     | info  | run summaries                       |
//! | `cordic_axis::sim`     | warn  | runs that hit the tick budget       |

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
