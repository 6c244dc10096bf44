//! Q1.15 fixed-point format and binary angles
//!
//! I/O samples are signed 16-bit two's-complement values interpreted as
//! `value / 32768`. Inside the engine, coordinates carry 13 extra guard bits
//! (`INTERNAL_FRAC_BITS = 28`) so that the shift-add recurrence does not
//! accumulate truncation error at the output precision.
//!
//! Angles are carried as *binary angles*: an `i32` where one full turn is
//! 2^32. Additions wrap modulo one turn for free, which is exactly the
//! behavior wanted for angle arithmetic.
//!
//! ```text
//!   code (u16)      0x0000   0x4000   0x8000   0xC000   0x10000
//!   binary angle    0        2^30     -2^31    -2^30    (wraps to 0)
//!   radians         0        π/2      ±π       -π/2     2π
//! ```

use std::f64::consts::PI;

/// Fractional bits of the Q1.15 I/O format.
pub const FRAC_BITS: u32 = 15;

/// Full-scale value of the Q1.15 format (1.0).
pub const Q15_ONE: i32 = 1 << FRAC_BITS;

/// Fractional bits carried by the iteration state.
pub const INTERNAL_FRAC_BITS: u32 = 28;

/// Guard bits between the I/O format and the internal format.
pub const GUARD_BITS: u32 = INTERNAL_FRAC_BITS - FRAC_BITS;

/// Binary angle of a quarter turn (π/2).
pub const QUARTER_TURN: i32 = 1 << 30;

/// Binary angle of a half turn (π). Equal to `i32::MIN`; ±π are the same angle.
pub const HALF_TURN: i32 = i32::MIN;

/// Number of distinct angle codes in one turn.
pub const CODES_PER_TURN: u32 = 1 << 16;

/// Angle in binary-angle units (2^32 per turn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BinaryAngle(pub i32);

impl BinaryAngle {
    /// Zero angle.
    pub const ZERO: BinaryAngle = BinaryAngle(0);

    /// Map an unsigned 16-bit angle code (one turn = 65536) to a binary angle.
    pub fn from_code(code: u16) -> Self {
        BinaryAngle(((code as u32) << 16) as i32)
    }

    /// Convert radians to a binary angle, wrapping modulo one turn.
    pub fn from_radians(radians: f64) -> Self {
        let turns = radians / (2.0 * PI);
        let frac = turns - turns.floor();
        BinaryAngle((frac * 4_294_967_296.0).round() as i64 as u32 as i32)
    }

    /// Angle in radians in `[-π, π)`.
    pub fn to_radians(self) -> f64 {
        self.0 as f64 * PI / (HALF_TURN as f64).abs()
    }

    /// Wrapping addition (modulo one turn).
    pub fn wrapping_add(self, other: BinaryAngle) -> Self {
        BinaryAngle(self.0.wrapping_add(other.0))
    }

    /// Wrapping subtraction (modulo one turn).
    pub fn wrapping_sub(self, other: BinaryAngle) -> Self {
        BinaryAngle(self.0.wrapping_sub(other.0))
    }

    /// Round to the Q1.15 output scale where ±32768 is ±π.
    ///
    /// -π is -32768. Rounding up to +π saturates to 32767 instead of
    /// wrapping to -π, so the positive end reads as 32767 (one LSB short
    /// of π).
    pub fn to_q15(self) -> i16 {
        saturate_i16(round_shift(self.0 as i64, 16))
    }
}

/// Clamp to the `i16` range.
#[inline]
pub fn saturate_i16(value: i64) -> i16 {
    value.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

/// Arithmetic right shift with round-half-up.
#[inline]
pub fn round_shift(value: i64, bits: u32) -> i64 {
    if bits == 0 {
        return value;
    }
    (value + (1i64 << (bits - 1))) >> bits
}

/// Extend a Q1.15 sample to the internal format.
#[inline]
pub fn to_internal(sample: i32) -> i32 {
    sample << GUARD_BITS
}

/// Reduce an internal coordinate to Q1.15 with rounding and saturation.
#[inline]
pub fn from_internal(value: i32) -> i16 {
    saturate_i16(round_shift(value as i64, GUARD_BITS))
}

/// Interpret a Q1.15 sample as a real number.
pub fn q15_to_f64(sample: i16) -> f64 {
    sample as f64 / Q15_ONE as f64
}

/// Convert a real number to Q1.15, rounding and saturating.
pub fn f64_to_q15(value: f64) -> i16 {
    saturate_i16((value * Q15_ONE as f64).round() as i64)
}

/// Angle in radians `[0, 2π)` represented by a 16-bit angle code.
pub fn code_to_radians(code: u16) -> f64 {
    2.0 * PI * code as f64 / CODES_PER_TURN as f64
}

/// Nearest angle code for an angle in radians, wrapping modulo one turn.
pub fn radians_to_code(radians: f64) -> u16 {
    ((BinaryAngle::from_radians(radians).0 as u32).wrapping_add(1 << 15) >> 16) as u16
}

/// Angle in radians of a Q1.15 angle output (±32768 ↔ ±π).
pub fn angle_q15_to_radians(angle: i16) -> f64 {
    angle as f64 * PI / Q15_ONE as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_saturate() {
        assert_eq!(saturate_i16(40_000), i16::MAX);
        assert_eq!(saturate_i16(-40_000), i16::MIN);
        assert_eq!(saturate_i16(1234), 1234);
    }

    #[test]
    fn test_round_shift() {
        assert_eq!(round_shift(3, 1), 2);
        assert_eq!(round_shift(-3, 1), -1);
        assert_eq!(round_shift(4095, 13), 0);
        assert_eq!(round_shift(4096, 13), 1);
        assert_eq!(round_shift(7, 0), 7);
    }

    #[test]
    fn test_internal_roundtrip() {
        for sample in [-32768, -1, 0, 1, 12345, 32767] {
            assert_eq!(from_internal(to_internal(sample)) as i32, sample);
        }
        // Full scale +1.0 does not fit in Q1.15
        assert_eq!(from_internal(1 << INTERNAL_FRAC_BITS), i16::MAX);
    }

    #[test]
    fn test_binary_angle_codes() {
        assert_eq!(BinaryAngle::from_code(0x4000).0, QUARTER_TURN);
        assert_eq!(BinaryAngle::from_code(0x8000).0, HALF_TURN);
        assert_eq!(BinaryAngle::from_code(0xC000).0, -QUARTER_TURN);
        assert_relative_eq!(BinaryAngle::from_code(0x4000).to_radians(), FRAC_PI_2);
    }

    #[test]
    fn test_binary_angle_wraps() {
        let a = BinaryAngle(HALF_TURN).wrapping_add(BinaryAngle(QUARTER_TURN));
        assert_eq!(a.0, -QUARTER_TURN);
        assert_eq!(BinaryAngle::from_radians(2.0 * PI).0, 0);
        assert_eq!(BinaryAngle::from_radians(-FRAC_PI_2).0, -QUARTER_TURN);
    }

    #[test]
    fn test_angle_q15_saturates_at_pi() {
        assert_eq!(BinaryAngle(i32::MAX).to_q15(), i16::MAX);
        assert_eq!(BinaryAngle(HALF_TURN).to_q15(), i16::MIN);
        assert_eq!(BinaryAngle(QUARTER_TURN).to_q15(), 16384);
    }

    #[test]
    fn test_code_conversions() {
        assert_eq!(radians_to_code(FRAC_PI_2), 0x4000);
        assert_eq!(radians_to_code(-FRAC_PI_2), 0xC000);
        assert_relative_eq!(code_to_radians(0x8000), PI);
        assert_relative_eq!(angle_q15_to_radians(-32768), -PI);
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(f64_to_q15(0.5), 16384);
        assert_eq!(f64_to_q15(1.0), i16::MAX);
        assert_eq!(f64_to_q15(-1.0), i16::MIN);
        assert_relative_eq!(q15_to_f64(-16384), -0.5);
    }
}
