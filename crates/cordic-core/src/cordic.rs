//! CORDIC (COordinate Rotation DIgital Computer)
//!
//! Fixed-point CORDIC engine operating on Q1.15 samples. Two modes are
//! supported:
//!
//! - **Rotation** ([`CordicMode::SinCos`]): drives the residual angle `z`
//!   to zero, rotating a pre-scaled unit vector. Input is a 16-bit angle
//!   code covering one turn; output is `(sin, cos)`.
//! - **Vectoring** ([`CordicMode::AngleMag`]): drives `y` to zero,
//!   accumulating the rotation in `z`. Input is `(x, y)`; output is
//!   `(angle, magnitude)` with ±32768 representing ±π.
//!
//! The evaluation is split into [`Cordic::prepare`], one [`Cordic::step`]
//! per micro-rotation and [`Cordic::finish`], so a pipeline can hold one
//! [`StageState`] per stage and advance them independently.
//!
//! ## Example
//!
//! ```rust
//! use cordic_core::{Cordic, CordicMode};
//!
//! let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
//! let (sin, cos) = cordic.sin_cos(0x2000); // π/4
//! assert!((sin as i32 - 23170).abs() <= 2);
//! assert!((cos as i32 - 23170).abs() <= 2);
//!
//! let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
//! let (angle, mag) = cordic.angle_mag(0, 16384);
//! assert!((angle as i32 - 16384).abs() <= 2); // π/2
//! assert!((mag as i32 - 16384).abs() <= 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CordicError, CordicResult};
use crate::fixed::{from_internal, to_internal, BinaryAngle};
use crate::gain::GainCorrector;
use crate::quadrant::{self, Quadrant};

/// Smallest supported iteration count.
pub const MIN_ITERATIONS: usize = 1;

/// Largest supported iteration count (size of the arctangent table).
pub const MAX_ITERATIONS: usize = 24;

/// Iteration count used when none is configured.
///
/// 13 or more iterations keep the Q1.15 error under 16 LSB; 16 leaves a
/// comfortable margin.
pub const DEFAULT_ITERATIONS: usize = 16;

/// Arctangent step angles `atan(2^-i)` in binary-angle units (2^32 per turn).
pub const ATAN_TABLE: [i32; MAX_ITERATIONS] = [
    536_870_912, // atan(2^0) = π/4
    316_933_406, // atan(2^-1)
    167_458_907, // atan(2^-2)
    85_004_756,  // atan(2^-3)
    42_667_331,  // atan(2^-4)
    21_354_465,
    10_679_838,
    5_340_245,
    2_670_163,
    1_335_087,
    667_544,
    333_772,
    166_886,
    83_443,
    41_722,
    20_861,
    10_430,
    5_215,
    2_608,
    1_304,
    652,
    326,
    163,
    81,
];

/// Function computed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CordicMode {
    /// Rotation mode: angle code → (sin, cos)
    #[default]
    SinCos,
    /// Vectoring mode: (x, y) → (angle, magnitude)
    AngleMag,
}

impl CordicMode {
    /// Number of 16-bit lanes in one input beat.
    pub fn input_lanes(self) -> usize {
        match self {
            CordicMode::SinCos => 1,
            CordicMode::AngleMag => 2,
        }
    }

    /// Number of 16-bit lanes in one output beat.
    pub fn output_lanes(self) -> usize {
        2
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            CordicMode::SinCos => "sin/cos",
            CordicMode::AngleMag => "angle/magnitude",
        }
    }
}

impl std::fmt::Display for CordicMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Iteration state of one in-flight sample.
///
/// `x` and `y` are in the internal fixed-point format, `z` is a binary
/// angle (residual in rotation mode, accumulated angle in vectoring mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageState {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub quadrant: Quadrant,
}

/// Fixed-point CORDIC engine for one mode and iteration count.
#[derive(Debug, Clone)]
pub struct Cordic {
    mode: CordicMode,
    iterations: usize,
    gain: GainCorrector,
}

impl Cordic {
    /// Create an engine running `iterations` micro-rotations.
    pub fn new(mode: CordicMode, iterations: usize) -> CordicResult<Self> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
            return Err(CordicError::InvalidIterations {
                requested: iterations,
                min: MIN_ITERATIONS,
                max: MAX_ITERATIONS,
            });
        }

        Ok(Self {
            mode,
            iterations,
            gain: GainCorrector::new(iterations),
        })
    }

    /// Configured mode.
    pub fn mode(&self) -> CordicMode {
        self.mode
    }

    /// Number of micro-rotations per sample.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Gain compensation constants.
    pub fn gain(&self) -> &GainCorrector {
        &self.gain
    }

    /// Normalize an input sample and load the initial iteration state.
    ///
    /// In [`CordicMode::SinCos`] `lane0` is the angle code (reinterpreted as
    /// `u16`) and `lane1` is ignored.
    pub fn prepare(&self, lane0: i16, lane1: i16) -> StageState {
        match self.mode {
            CordicMode::SinCos => {
                let (quadrant, residual) = quadrant::normalize_angle(lane0 as u16);
                StageState {
                    x: self.gain.seed(),
                    y: 0,
                    z: residual.0,
                    quadrant,
                }
            }
            CordicMode::AngleMag => {
                let (quadrant, x, y) = quadrant::normalize_vector(lane0 as i32, lane1 as i32);
                StageState {
                    x: to_internal(x),
                    y: to_internal(y),
                    z: 0,
                    quadrant,
                }
            }
        }
    }

    /// Apply micro-rotation `i` to a state.
    pub fn step(&self, state: StageState, i: usize) -> StageState {
        debug_assert!(i < self.iterations);

        let dx = state.y >> i;
        let dy = state.x >> i;
        let angle = ATAN_TABLE[i];

        // Rotate counter-clockwise when the residual is non-negative
        // (rotation) or when the vector is below the x axis (vectoring).
        // y == 0 in vectoring mode rotates clockwise, keeping every step
        // a full micro-rotation so the gain stays constant.
        let ccw = match self.mode {
            CordicMode::SinCos => state.z >= 0,
            CordicMode::AngleMag => state.y < 0,
        };

        if ccw {
            StageState {
                x: state.x - dx,
                y: state.y + dy,
                z: state.z.wrapping_sub(angle),
                quadrant: state.quadrant,
            }
        } else {
            StageState {
                x: state.x + dx,
                y: state.y - dy,
                z: state.z.wrapping_add(angle),
                quadrant: state.quadrant,
            }
        }
    }

    /// Post-correct a fully iterated state into an output sample.
    ///
    /// Returns `(sin, cos)` or `(angle, magnitude)` depending on the mode.
    pub fn finish(&self, state: StageState) -> (i16, i16) {
        match self.mode {
            CordicMode::SinCos => {
                let (sin, cos) = quadrant::correct_sin_cos(state.quadrant, state.y, state.x);
                (from_internal(sin), from_internal(cos))
            }
            CordicMode::AngleMag => {
                // x only stays zero for the zero vector: normalization gives
                // x >= |y| and every vectoring step adds |y| >> i to x.
                if state.x == 0 {
                    return (0, 0);
                }
                let angle = quadrant::correct_angle(state.quadrant, BinaryAngle(state.z));
                (angle.to_q15(), self.gain.correct_magnitude(state.x))
            }
        }
    }

    /// Run all micro-rotations on a prepared state.
    pub fn iterate(&self, state: StageState) -> StageState {
        (0..self.iterations).fold(state, |s, i| self.step(s, i))
    }

    /// Unpipelined evaluation of one sample.
    pub fn compute(&self, lane0: i16, lane1: i16) -> (i16, i16) {
        self.finish(self.iterate(self.prepare(lane0, lane1)))
    }

    /// `(sin, cos)` of an angle code, independent of the configured mode.
    pub fn sin_cos(&self, code: u16) -> (i16, i16) {
        self.with_mode(CordicMode::SinCos).compute(code as i16, 0)
    }

    /// `(angle, magnitude)` of a vector, independent of the configured mode.
    pub fn angle_mag(&self, x: i16, y: i16) -> (i16, i16) {
        self.with_mode(CordicMode::AngleMag).compute(x, y)
    }

    fn with_mode(&self, mode: CordicMode) -> Cordic {
        Cordic {
            mode,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{angle_q15_to_radians, radians_to_code};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn close(actual: i16, expected: i32, tol: i32) -> bool {
        (actual as i32 - expected).abs() <= tol
    }

    #[test]
    fn test_atan_table_matches_float() {
        for (i, &entry) in ATAN_TABLE.iter().enumerate() {
            let expected = (2.0_f64).powi(-(i as i32)).atan() / (2.0 * PI) * 4_294_967_296.0;
            assert_eq!(entry as i64, expected.round() as i64, "entry {}", i);
        }
    }

    #[test]
    fn test_invalid_iterations() {
        assert!(Cordic::new(CordicMode::SinCos, 0).is_err());
        assert!(Cordic::new(CordicMode::SinCos, MAX_ITERATIONS + 1).is_err());
        assert!(Cordic::new(CordicMode::AngleMag, MAX_ITERATIONS).is_ok());
    }

    #[test]
    fn test_sincos_zero() {
        let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
        let (sin, cos) = cordic.sin_cos(0);
        assert!(close(sin, 0, 2), "sin(0) = {}", sin);
        assert!(close(cos, 32767, 2), "cos(0) = {}", cos);
    }

    #[test]
    fn test_sincos_pi_over_4() {
        let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
        let (sin, cos) = cordic.sin_cos(radians_to_code(FRAC_PI_4));
        assert!(close(sin, 23170, 2), "sin(pi/4) = {}", sin);
        assert!(close(cos, 23170, 2), "cos(pi/4) = {}", cos);
    }

    #[test]
    fn test_sincos_quadrant_centers() {
        let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
        let expected = [
            (0x0000u16, 0, 32767),
            (0x4000, 32767, 0),
            (0x8000, 0, -32768),
            (0xC000, -32768, 0),
        ];
        for (code, s, c) in expected {
            let (sin, cos) = cordic.sin_cos(code);
            assert!(close(sin, s, 2), "sin({:#06x}) = {}", code, sin);
            assert!(close(cos, c, 2), "cos({:#06x}) = {}", code, cos);
        }
    }

    #[test]
    fn test_sincos_negative_angle() {
        let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
        let (sin, cos) = cordic.sin_cos(radians_to_code(-FRAC_PI_4));
        assert!(close(sin, -23170, 2));
        assert!(close(cos, 23170, 2));
    }

    #[test]
    fn test_sincos_boundary_is_deterministic() {
        let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
        for code in [0x2000u16, 0x6000, 0xA000, 0xE000] {
            let first = cordic.sin_cos(code);
            for _ in 0..3 {
                assert_eq!(cordic.sin_cos(code), first);
            }
            // Neighbours on either side of the boundary agree within a few LSB
            let below = cordic.sin_cos(code - 1);
            assert!(close(first.0, below.0 as i32, 4));
            assert!(close(first.1, below.1 as i32, 4));
        }
    }

    #[test]
    fn test_rotation_residual_converges() {
        let cordic = Cordic::new(CordicMode::SinCos, 16).unwrap();
        for code in (0..=u16::MAX).step_by(13) {
            let mut state = cordic.prepare(code as i16, 0);
            for i in 0..cordic.iterations() {
                state = cordic.step(state, i);
                assert!(state.z.abs() <= ATAN_TABLE[i], "code {} step {}", code, i);
            }
        }
    }

    #[test]
    fn test_angle_mag_axes() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();

        let (angle, mag) = cordic.angle_mag(16384, 0);
        assert!(close(angle, 0, 2));
        assert!(close(mag, 16384, 2));

        let (angle, mag) = cordic.angle_mag(0, 16384);
        assert!(close(angle, 16384, 2));
        assert!(close(mag, 16384, 2));

        let (angle, mag) = cordic.angle_mag(0, -16384);
        assert!(close(angle, -16384, 2));
        assert!(close(mag, 16384, 2));
    }

    #[test]
    fn test_angle_mag_negative_x_axis() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
        let (angle, mag) = cordic.angle_mag(-16384, 0);
        // ±π: either end of the range is the same angle
        assert!(angle as i32 >= 32765 || angle as i32 <= -32766, "angle = {}", angle);
        assert!(close(mag, 16384, 2));
    }

    #[test]
    fn test_angle_mag_third_quadrant() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
        let (angle, mag) = cordic.angle_mag(-10000, -10000);
        let radians = angle_q15_to_radians(angle);
        assert!((radians + 3.0 * FRAC_PI_4).abs() < 1e-3, "angle = {}", radians);
        assert!(close(mag, 14142, 3));
    }

    #[test]
    fn test_angle_mag_3_4_5() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
        let (angle, mag) = cordic.angle_mag(3 * 4096, 4 * 4096);
        assert!(close(mag, 5 * 4096, 3));
        let expected = (4.0_f64).atan2(3.0);
        assert!((angle_q15_to_radians(angle) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_zero_vector() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
        for _ in 0..3 {
            assert_eq!(cordic.angle_mag(0, 0), (0, 0));
        }
    }

    #[test]
    fn test_magnitude_saturates() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
        let (angle, mag) = cordic.angle_mag(32767, 32767);
        assert_eq!(mag, i16::MAX);
        assert!(close(angle, 8192, 2));

        let (_, mag) = cordic.angle_mag(-32768, -32768);
        assert_eq!(mag, i16::MAX);
    }

    #[test]
    fn test_vectoring_drives_y_to_zero() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
        let state = cordic.iterate(cordic.prepare(12000, -7000));
        // Residual y is within a couple of LSB at Q1.15 scale
        assert!(state.y.abs() < 3 << 13, "y_N = {}", state.y);
    }

    #[test]
    fn test_compute_matches_stepwise() {
        let cordic = Cordic::new(CordicMode::AngleMag, 12).unwrap();
        let mut state = cordic.prepare(-1234, 20000);
        for i in 0..12 {
            state = cordic.step(state, i);
        }
        assert_eq!(cordic.finish(state), cordic.compute(-1234, 20000));
    }

    #[test]
    fn test_precision_increases_with_iterations() {
        let coarse = Cordic::new(CordicMode::SinCos, 8).unwrap();
        let fine = Cordic::new(CordicMode::SinCos, 16).unwrap();
        let mut coarse_err = 0;
        let mut fine_err = 0;
        for code in (0..=u16::MAX).step_by(101) {
            let exact = (crate::fixed::code_to_radians(code).sin() * 32768.0) as i32;
            coarse_err = coarse_err.max((coarse.sin_cos(code).0 as i32 - exact).abs());
            fine_err = fine_err.max((fine.sin_cos(code).0 as i32 - exact).abs());
        }
        assert!(fine_err < coarse_err, "fine {} coarse {}", fine_err, coarse_err);
    }

    #[test]
    fn test_mode_independent_helpers() {
        let cordic = Cordic::new(CordicMode::AngleMag, 16).unwrap();
        let (sin, _) = cordic.sin_cos(radians_to_code(FRAC_PI_2));
        assert!(close(sin, 32767, 2));
        assert_eq!(cordic.mode(), CordicMode::AngleMag);
    }

    #[test]
    fn test_mode_lanes() {
        assert_eq!(CordicMode::SinCos.input_lanes(), 1);
        assert_eq!(CordicMode::AngleMag.input_lanes(), 2);
        assert_eq!(CordicMode::SinCos.output_lanes(), 2);
        assert_eq!(CordicMode::AngleMag.to_string(), "angle/magnitude");
    }
}
