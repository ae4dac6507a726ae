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
use crate::common::pow2i;
use crate::dd::DoubleDouble;

/// Scale of the terminal CORDIC vector, 1 / Π sqrt(1 + 2^−2i).
///
/// Starting the rotation from (GAIN, 0) makes the terminal vector land on
/// the unit circle directly. The infinite-product value is used, the
/// deviation for k iterations is ~2^(1−2k) and sits far below the native
/// precision the samples are stored at.
pub(crate) const CORDIC_GAIN: DoubleDouble =
    DoubleDouble::new(0.6072529350088812, 3.339130356955507e-17);

const ATAN_EPSILON: f64 = 1e-40;
const ATAN_MAX_TERMS: usize = 160;

/// Rotation step angles atan(2^−i) for i in [0, iterations).
///
/// atan(1) is the exact π/4 constant; the rest are summed from the
/// alternating arctangent series, which loses at least two bits per term
/// for arguments at or below 1/2.
pub(crate) fn arctan_steps(iterations: usize) -> Vec<DoubleDouble> {
    (0..iterations)
        .map(|i| {
            if i == 0 {
                DoubleDouble::FRAC_PI_4
            } else {
                atan_pow2(i as i32)
            }
        })
        .collect()
}

fn atan_pow2(i: i32) -> DoubleDouble {
    let x = DoubleDouble::from_f64(pow2i(-i));
    let x2 = x * x;
    let mut power = x;
    let mut sum = x;
    for n in 1..=ATAN_MAX_TERMS {
        power = power * x2;
        let mut term = power / (2 * n + 1) as f64;
        if n & 1 == 1 {
            term = -term;
        }
        sum = sum + term;
        if term.hi.abs() < ATAN_EPSILON {
            break;
        }
    }
    sum
}

/// Direction of the next micro-rotation.
#[inline]
pub(crate) fn rotation_sign(residual: DoubleDouble) -> f64 {
    if residual >= DoubleDouble::ZERO { 1.0 } else { -1.0 }
}

/// Rotates (GAIN, 0) onto (cos θ, sin θ) by driving the angle residual
/// to zero one arctangent step at a time.
///
/// Angles outside (−π/2, π/2] are folded by a half turn with the sign
/// carried on the initial vector.
pub(crate) fn rotate(theta: DoubleDouble, steps: &[DoubleDouble]) -> (DoubleDouble, DoubleDouble) {
    let mut x = CORDIC_GAIN;
    let mut y = DoubleDouble::ZERO;
    let mut z = theta;

    if z > DoubleDouble::FRAC_PI_2 {
        z = z - DoubleDouble::PI;
        x = -x;
    } else if z < -DoubleDouble::FRAC_PI_2 {
        z = z + DoubleDouble::PI;
        x = -x;
    }

    for (i, step) in steps.iter().enumerate() {
        let sigma = rotation_sign(z);
        // σ · 2^−i is exact, the shift never touches the mantissa.
        let factor = sigma * pow2i(-(i as i32));
        let xr = x - y * factor;
        let yr = y + x * factor;
        z = z - *step * sigma;
        x = xr;
        y = yr;
    }

    (x, y)
}
