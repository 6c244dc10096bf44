//! Quadrant normalizer
//!
//! The shift-add recurrence only converges for angles within roughly
//! ±1.74 rad. Before iterating, inputs are rotated by a multiple of π/2 so
//! the residual lies in `[-π/4, π/4]`, and the removed multiple is recorded
//! as a 2-bit [`Quadrant`] tag. After the last iteration the tag is used
//! once to undo the pre-rotation and is then discarded.
//!
//! Rotations by multiples of π/2 are exact in fixed point (coordinate swaps
//! and negations), so normalization adds no error of its own.

use crate::fixed::{BinaryAngle, HALF_TURN, QUARTER_TURN};

/// Multiple of π/2 removed from the input before iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quadrant {
    /// No pre-rotation
    #[default]
    Q0,
    /// Input was rotated by -π/2
    Q1,
    /// Input was rotated by π
    Q2,
    /// Input was rotated by +π/2
    Q3,
}

impl Quadrant {
    /// Decode the low two bits of a tag.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Quadrant::Q0,
            1 => Quadrant::Q1,
            2 => Quadrant::Q2,
            _ => Quadrant::Q3,
        }
    }

    /// 2-bit tag value.
    pub fn bits(self) -> u8 {
        match self {
            Quadrant::Q0 => 0,
            Quadrant::Q1 => 1,
            Quadrant::Q2 => 2,
            Quadrant::Q3 => 3,
        }
    }

    /// Angle removed by normalization (`bits · π/2`).
    pub fn offset(self) -> BinaryAngle {
        match self {
            Quadrant::Q0 => BinaryAngle::ZERO,
            Quadrant::Q1 => BinaryAngle(QUARTER_TURN),
            Quadrant::Q2 => BinaryAngle(HALF_TURN),
            Quadrant::Q3 => BinaryAngle(-QUARTER_TURN),
        }
    }
}

/// Split an angle code into a quadrant and a residual in `[-π/4, π/4)`.
///
/// Codes exactly on an octant boundary (0x2000, 0x6000, ...) belong to the
/// higher quadrant, so 0x2000 yields `Q1` with residual -π/4.
pub fn normalize_angle(code: u16) -> (Quadrant, BinaryAngle) {
    let bits = ((code as u32 + 0x2000) >> 14) as u8;
    let quadrant = Quadrant::from_bits(bits);
    let residual = code.wrapping_sub((quadrant.bits() as u16) << 14) as i16;
    (quadrant, BinaryAngle((residual as i32) << 16))
}

/// Rotate a vector by a multiple of π/2 so that `x >= |y|`.
///
/// Ties go to the horizontal quadrants: `|x| == |y|` is `Q0` or `Q2`. The
/// zero vector is `Q0`.
pub fn normalize_vector(x: i32, y: i32) -> (Quadrant, i32, i32) {
    if x.abs() >= y.abs() {
        if x >= 0 {
            (Quadrant::Q0, x, y)
        } else {
            (Quadrant::Q2, -x, -y)
        }
    } else if y > 0 {
        (Quadrant::Q1, y, -x)
    } else {
        (Quadrant::Q3, -y, x)
    }
}

/// Undo the quadrant pre-rotation on a rotation-mode result.
///
/// `sin` and `cos` are the outputs for the residual angle; the return value
/// is `(sin, cos)` of the original angle.
pub fn correct_sin_cos(quadrant: Quadrant, sin: i32, cos: i32) -> (i32, i32) {
    match quadrant {
        Quadrant::Q0 => (sin, cos),
        Quadrant::Q1 => (cos, -sin),
        Quadrant::Q2 => (-sin, -cos),
        Quadrant::Q3 => (-cos, sin),
    }
}

/// Add the removed multiple of π/2 back to a vectoring-mode angle.
pub fn correct_angle(quadrant: Quadrant, angle: BinaryAngle) -> BinaryAngle {
    angle.wrapping_add(quadrant.offset())
}
