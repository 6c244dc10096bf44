//! Gain corrector
//!
//! Every micro-rotation stretches the vector by `√(1 + 2^-2i)`, so after
//! `n` iterations the result is scaled by the constant
//! `K(n) = Π √(1 + 2^-2i)`, which converges to ≈1.6467602581.
//!
//! Rotation mode folds the correction into the initial vector (x₀ = 1/K),
//! so the outputs land on the unit circle with no extra multiply. Vectoring
//! mode has no free initial condition to absorb it and pays one fixed-point
//! multiply by the reciprocal on the final magnitude.

use crate::fixed::{round_shift, saturate_i16, FRAC_BITS, INTERNAL_FRAC_BITS};

/// Fractional bits of the reciprocal gain constant.
const INV_GAIN_FRAC_BITS: u32 = 30;

/// Asymptotic CORDIC gain for an unbounded number of iterations.
pub const CORDIC_GAIN_LIMIT: f64 = 1.646_760_258_121_066;

/// CORDIC gain after `iterations` micro-rotations.
pub fn cordic_gain(iterations: usize) -> f64 {
    (0..iterations)
        .map(|i| (1.0 + 2.0_f64.powi(-2 * i as i32)).sqrt())
        .product()
}

/// Precomputed fixed-point gain compensation for one iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainCorrector {
    seed: i32,
    inv_gain: i64,
}

impl GainCorrector {
    /// Build the constants for `iterations` micro-rotations.
    pub fn new(iterations: usize) -> Self {
        let gain = cordic_gain(iterations);
        let seed = ((1i64 << INTERNAL_FRAC_BITS) as f64 / gain).round() as i32;
        let inv_gain = ((1i64 << INV_GAIN_FRAC_BITS) as f64 / gain).round() as i64;
        Self { seed, inv_gain }
    }

    /// Rotation-mode initial x (1/K in the internal format).
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Scale a vectoring-mode `x_N` (internal format) to a Q1.15 magnitude.
    ///
    /// Magnitudes above full scale (e.g. the corner `(32767, 32767)`)
    /// saturate to `i16::MAX`.
    pub fn correct_magnitude(&self, x_n: i32) -> i16 {
        let shift = INV_GAIN_FRAC_BITS + INTERNAL_FRAC_BITS - FRAC_BITS;
        saturate_i16(round_shift(x_n as i64 * self.inv_gain, shift))
    }
}
