//! Fixed-point CORDIC engine
//!
//! This crate computes trigonometric quantities on Q1.15 samples using
//! only shifts and additions:
//!
//! - **Rotation mode**: 16-bit angle code → `(sin, cos)`
//! - **Vectoring mode**: `(x, y)` → `(angle, magnitude)`
//!
//! It is the arithmetic half of the streaming core in `cordic-axis`; the
//! split into [`Cordic::prepare`], [`Cordic::step`] and [`Cordic::finish`]
//! lets a pipeline hold one [`StageState`] per stage.
//!
//! # Example
//!
//! ```rust
//! use cordic_core::{Cordic, CordicMode};
//!
//! let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
//! let (sin, cos) = cordic.compute(0x4000u16 as i16, 0); // π/2
//! assert!(sin >= 32765);
//! assert!(cos.abs() <= 2);
//! ```

pub mod cordic;
pub mod error;
pub mod fixed;
pub mod gain;
pub mod quadrant;
pub mod reference;

pub use cordic::{
    Cordic, CordicMode, StageState, ATAN_TABLE, DEFAULT_ITERATIONS, MAX_ITERATIONS,
    MIN_ITERATIONS,
};
pub use error::{CordicError, CordicResult};
pub use fixed::BinaryAngle;
pub use gain::{cordic_gain, GainCorrector, CORDIC_GAIN_LIMIT};
pub use quadrant::Quadrant;
pub use reference::{ErrorStats, ACCURACY_BOUND_LSB};
