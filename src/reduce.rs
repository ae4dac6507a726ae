/*
 * // Copyright (c) Radzivon Bartoshyk 8/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::dd::DoubleDouble;

/// Quarter-turn tag produced by range reduction.
///
/// Encodes the identity that recovers cos(x) from the reduced angle r in
/// [0, π/2): q0 → cos(r), q1 → −sin(r), q2 → −cos(r), q3 → sin(r).
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    #[inline]
    pub(crate) fn from_wraps(k: i64) -> Quadrant {
        match k.rem_euclid(4) {
            0 => Quadrant::First,
            1 => Quadrant::Second,
            2 => Quadrant::Third,
            _ => Quadrant::Fourth,
        }
    }

    /// Whether the identity reads the sine of the reduced angle.
    #[inline]
    pub const fn uses_sine(self) -> bool {
        matches!(self, Quadrant::Second | Quadrant::Fourth)
    }

    /// Whether the partial result is negated.
    #[inline]
    pub const fn negates(self) -> bool {
        matches!(self, Quadrant::Second | Quadrant::Third)
    }
}

/// Output of range reduction, not meant to be persisted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReducedAngle {
    pub value: DoubleDouble,
    pub quadrant: Quadrant,
}

/// Maps an arbitrary finite angle into [0, π/2) with a quadrant tag.
///
/// The wrap count is taken from the hi component only; the count is an
/// exact integer for any finite input, so no extended bits are lost
/// there. The quarter-turn count may come out as −1 when the remainder
/// lands a hair below zero, the raw count still places the reduced value
/// inside the canonical interval while the tag is normalized mod 4.
pub fn reduce(x: DoubleDouble) -> ReducedAngle {
    let n = (x.hi / DoubleDouble::TAU.hi).floor();
    let remainder = x - DoubleDouble::TAU * n;
    let k = ((remainder / DoubleDouble::FRAC_PI_2).hi).floor() as i64;
    let value = remainder - DoubleDouble::FRAC_PI_2 * (k as f64);
    ReducedAngle {
        value,
        quadrant: Quadrant::from_wraps(k),
    }
}

/// Converts degrees to radians in extended precision.
pub fn degrees_to_radians(x: DoubleDouble) -> DoubleDouble {
    x * (DoubleDouble::PI / DoubleDouble::from_f64(180.0))
}
