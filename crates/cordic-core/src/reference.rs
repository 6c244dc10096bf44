//! Floating-point reference and accuracy statistics
//!
//! The engine is verified against `f64` trigonometry scaled to the same
//! Q1.15 representation. Reference values follow the hardware verification
//! convention of truncating toward zero, so `cos(0)` is 32768 (one past
//! full scale) and the engine's saturated 32767 counts as a 1 LSB error.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::cordic::Cordic;
use crate::error::{CordicError, CordicResult};
use crate::fixed::{angle_q15_to_radians, code_to_radians, CODES_PER_TURN, Q15_ONE};

/// Maximum absolute error, in Q1.15 LSB, tolerated across the input domain.
pub const ACCURACY_BOUND_LSB: f64 = 16.0;

/// Amplitude of reference unit-circle vectors (largest positive Q1.15 value).
pub const UNIT_AMPLITUDE: f64 = (Q15_ONE - 1) as f64;

/// Reference `(sin, cos)` of an angle code, truncated toward zero.
pub fn reference_sin_cos(code: u16) -> (i32, i32) {
    let (sin, cos) = code_to_radians(code).sin_cos();
    (
        (sin * Q15_ONE as f64) as i32,
        (cos * Q15_ONE as f64) as i32,
    )
}

/// Point on the unit circle at `theta`, scaled to ±32767 and truncated.
pub fn unit_vector(theta: f64) -> (i16, i16) {
    let (sin, cos) = theta.sin_cos();
    ((cos * UNIT_AMPLITUDE) as i16, (sin * UNIT_AMPLITUDE) as i16)
}

/// Rebuild `(x, y)` from a Q1.15 angle (±32768 ↔ ±π) and magnitude.
pub fn reconstruct(angle: i16, magnitude: i16) -> (f64, f64) {
    let v = Complex64::from_polar(magnitude as f64, angle_q15_to_radians(angle));
    (v.re, v.im)
}

/// Running absolute-error statistics in LSB units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorStats {
    count: u64,
    sum: f64,
    max: f64,
}

impl ErrorStats {
    /// Empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one comparison.
    pub fn record(&mut self, expected: f64, actual: f64) {
        let err = (expected - actual).abs();
        self.count += 1;
        self.sum += err;
        self.max = self.max.max(err);
    }

    /// Number of comparisons recorded.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Largest absolute error seen.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Mean absolute error, zero if nothing was recorded.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// True if every error is strictly below `bound`.
    pub fn within(&self, bound: f64) -> bool {
        self.max < bound
    }

    /// Merge another set of statistics into this one.
    pub fn merge(&mut self, other: &ErrorStats) {
        self.count += other.count;
        self.sum += other.sum;
        self.max = self.max.max(other.max);
    }
}

impl std::fmt::Display for ErrorStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} max={:.2} mean={:.3} LSB",
            self.count,
            self.max,
            self.mean()
        )
    }
}

fn check_lengths(expected: usize, actual: usize) -> CordicResult<()> {
    if expected != actual {
        return Err(CordicError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Compare `(sin, cos)` outputs for `codes` against the reference.
///
/// `outputs[i]` must be the result for `codes[i]`; a dropped or extra
/// output is an error.
pub fn score_sin_cos(codes: &[u16], outputs: &[(i16, i16)]) -> CordicResult<(ErrorStats, ErrorStats)> {
    check_lengths(codes.len(), outputs.len())?;
    let mut sin_stats = ErrorStats::new();
    let mut cos_stats = ErrorStats::new();
    for (&code, &(sin, cos)) in codes.iter().zip(outputs) {
        let (ref_sin, ref_cos) = reference_sin_cos(code);
        sin_stats.record(ref_sin as f64, sin as f64);
        cos_stats.record(ref_cos as f64, cos as f64);
    }
    Ok((sin_stats, cos_stats))
}

/// Compare `(angle, magnitude)` outputs by reconstructing the input vectors.
///
/// `outputs[i]` must be the result for `inputs[i]`. Returns the x and y
/// reconstruction errors.
pub fn score_angle_mag(
    inputs: &[(i16, i16)],
    outputs: &[(i16, i16)],
) -> CordicResult<(ErrorStats, ErrorStats)> {
    check_lengths(inputs.len(), outputs.len())?;
    let mut x_stats = ErrorStats::new();
    let mut y_stats = ErrorStats::new();
    for (&(x, y), &(angle, magnitude)) in inputs.iter().zip(outputs) {
        let (rx, ry) = reconstruct(angle, magnitude);
        x_stats.record(x as f64, rx);
        y_stats.record(y as f64, ry);
    }
    Ok((x_stats, y_stats))
}

/// All 65536 angle codes in order.
pub fn sin_cos_sweep_codes() -> Vec<u16> {
    (0..CODES_PER_TURN).map(|code| code as u16).collect()
}

/// `points` unit-circle vectors at evenly spaced angles covering `[0, 2π]`.
///
/// Both endpoints are included, matching the verification sweep.
pub fn angle_mag_sweep_vectors(points: usize) -> Vec<(i16, i16)> {
    match points {
        0 => Vec::new(),
        1 => vec![unit_vector(0.0)],
        _ => (0..points)
            .map(|i| unit_vector(2.0 * PI * i as f64 / (points - 1) as f64))
            .collect(),
    }
}

/// Full-domain sin/cos sweep through an unpipelined engine.
pub fn sweep_sin_cos(cordic: &Cordic) -> CordicResult<(ErrorStats, ErrorStats)> {
    let codes = sin_cos_sweep_codes();
    let outputs: Vec<_> = codes.iter().map(|&code| cordic.sin_cos(code)).collect();
    score_sin_cos(&codes, &outputs)
}

/// Unit-circle angle/magnitude sweep through an unpipelined engine.
pub fn sweep_angle_mag(cordic: &Cordic, points: usize) -> CordicResult<(ErrorStats, ErrorStats)> {
    let inputs = angle_mag_sweep_vectors(points);
    let outputs: Vec<_> = inputs.iter().map(|&(x, y)| cordic.angle_mag(x, y)).collect();
    score_angle_mag(&inputs, &outputs)
}
