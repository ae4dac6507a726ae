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
use crate::common::f_fmla;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Unevaluated sum of two doubles, `hi + lo`, carrying roughly 106
/// significand bits.
///
/// Every operation returns a renormalized value: `|lo|` does not exceed
/// half an ulp of `hi`. Field order matters, the derived comparisons are
/// lexicographic with `hi` compared first and `lo` breaking ties.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct DoubleDouble {
    pub hi: f64,
    pub lo: f64,
}

impl DoubleDouble {
    pub const ZERO: DoubleDouble = DoubleDouble::new(0., 0.);
    pub const ONE: DoubleDouble = DoubleDouble::new(1., 0.);
    /// π
    pub const PI: DoubleDouble =
        DoubleDouble::new(std::f64::consts::PI, 1.2246467991473532e-16);
    /// π/2
    pub const FRAC_PI_2: DoubleDouble =
        DoubleDouble::new(std::f64::consts::FRAC_PI_2, 6.123233995736766e-17);
    /// π/4
    pub const FRAC_PI_4: DoubleDouble =
        DoubleDouble::new(std::f64::consts::FRAC_PI_4, 3.061616997868383e-17);
    /// 2π
    pub const TAU: DoubleDouble =
        DoubleDouble::new(std::f64::consts::TAU, 2.4492935982947064e-16);

    #[inline(always)]
    pub const fn new(hi: f64, lo: f64) -> Self {
        Self { hi, lo }
    }

    #[inline(always)]
    pub const fn from_f64(v: f64) -> DoubleDouble {
        DoubleDouble { hi: v, lo: 0. }
    }

    #[inline(always)]
    pub const fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    #[inline(always)]
    pub const fn abs(self) -> Self {
        if self.hi < 0. {
            Self::new(-self.hi, -self.lo)
        } else {
            self
        }
    }

    #[inline(always)]
    pub const fn is_finite(self) -> bool {
        self.hi.is_finite() && self.lo.is_finite()
    }

    /// Exact sum of two doubles: `hi + lo` reproduces `a + b` without
    /// rounding loss.
    #[inline(always)]
    pub const fn two_sum(a: f64, b: f64) -> DoubleDouble {
        let s = a + b;
        let v = s - a;
        let e = (a - (s - v)) + (b - v);
        DoubleDouble::new(s, e)
    }

    /// Exact difference of two doubles.
    #[inline(always)]
    pub const fn two_diff(a: f64, b: f64) -> DoubleDouble {
        let s = a - b;
        let v = s - a;
        let e = (a - (s - v)) - (b + v);
        DoubleDouble::new(s, e)
    }

    /// Cheaper renormalization step, requires `|a| >= |b|`.
    #[inline(always)]
    pub const fn quick_two_sum(a: f64, b: f64) -> DoubleDouble {
        let s = a + b;
        let e = b - (s - a);
        DoubleDouble::new(s, e)
    }

    /// Exact product of two doubles.
    #[inline(always)]
    pub fn two_prod(a: f64, b: f64) -> DoubleDouble {
        #[cfg(any(
            all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "fma"
            ),
            all(target_arch = "aarch64", target_feature = "neon")
        ))]
        {
            let p = a * b;
            let e = f_fmla(a, b, -p);
            DoubleDouble::new(p, e)
        }
        #[cfg(not(any(
            all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "fma"
            ),
            all(target_arch = "aarch64", target_feature = "neon")
        )))]
        {
            let sa = DoubleDouble::split(a);
            let sb = DoubleDouble::split(b);
            let p = a * b;
            let t1 = sa.hi * sb.hi - p;
            let t2 = sa.hi * sb.lo + t1;
            let t3 = sa.lo * sb.hi + t2;
            let e = sa.lo * sb.lo + t3;
            DoubleDouble::new(p, e)
        }
    }

    // Veltkamp splitting, non FMA fallback for the product residual.
    #[allow(dead_code)]
    #[inline]
    const fn split(a: f64) -> DoubleDouble {
        // CN = 2^N.
        const CN: f64 = (1 << 27) as f64;
        const C: f64 = CN + 1.0;
        let t1 = C * a;
        let t2 = a - t1;
        let hi = t1 + t2;
        let lo = a - hi;
        DoubleDouble::new(hi, lo)
    }
}

impl Add<DoubleDouble> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn add(self, rhs: DoubleDouble) -> Self::Output {
        let s = DoubleDouble::two_sum(self.hi, rhs.hi);
        let t = DoubleDouble::two_sum(self.lo, rhs.lo);
        let c = s.lo + t.hi;
        let r = DoubleDouble::quick_two_sum(s.hi, c);
        let w = r.lo + t.lo;
        DoubleDouble::quick_two_sum(r.hi, w)
    }
}

impl Add<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn add(self, rhs: f64) -> Self::Output {
        let s = DoubleDouble::two_sum(self.hi, rhs);
        let w = s.lo + self.lo;
        DoubleDouble::quick_two_sum(s.hi, w)
    }
}

impl Sub<DoubleDouble> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn sub(self, rhs: DoubleDouble) -> Self::Output {
        let s = DoubleDouble::two_diff(self.hi, rhs.hi);
        let t = DoubleDouble::two_diff(self.lo, rhs.lo);
        let c = s.lo + t.hi;
        let r = DoubleDouble::quick_two_sum(s.hi, c);
        let w = r.lo + t.lo;
        DoubleDouble::quick_two_sum(r.hi, w)
    }
}

impl Sub<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn sub(self, rhs: f64) -> Self::Output {
        self + (-rhs)
    }
}

impl Mul<DoubleDouble> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn mul(self, rhs: DoubleDouble) -> Self::Output {
        let p = DoubleDouble::two_prod(self.hi, rhs.hi);
        // Correction terms are kept in an operand-symmetric shape, the
        // product must stay commutative bit for bit.
        let w = self.hi * rhs.lo + self.lo * rhs.hi + p.lo + self.lo * rhs.lo;
        DoubleDouble::two_sum(p.hi, w)
    }
}

impl Mul<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        let p = DoubleDouble::two_prod(self.hi, rhs);
        let w = f_fmla(self.lo, rhs, p.lo);
        DoubleDouble::two_sum(p.hi, w)
    }
}

impl Mul<DoubleDouble> for f64 {
    type Output = DoubleDouble;

    #[inline]
    fn mul(self, rhs: DoubleDouble) -> Self::Output {
        rhs * self
    }
}

impl Div<DoubleDouble> for DoubleDouble {
    type Output = DoubleDouble;

    /// Newton refinement with three quotient terms. A divisor near zero
    /// propagates IEEE Inf/NaN through the result.
    #[inline]
    fn div(self, rhs: DoubleDouble) -> Self::Output {
        let q1 = self.hi / rhs.hi;
        let r1 = self - rhs * q1;
        let q2 = r1.hi / rhs.hi;
        let r2 = r1 - rhs * q2;
        let q3 = r2.hi / rhs.hi;
        let s = DoubleDouble::two_sum(q1, q2);
        let e = s.lo + q3;
        DoubleDouble::quick_two_sum(s.hi, e)
    }
}

impl Div<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        self / DoubleDouble::from_f64(rhs)
    }
}

impl Neg for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn two_sum_recovers_rounding_error() {
        let tiny = 2f64.powi(-60);
        let s = DoubleDouble::two_sum(1.0, tiny);
        assert_eq!(s.hi, 1.0);
        assert_eq!(s.lo, tiny);

        let d = DoubleDouble::two_diff(1.0, tiny);
        assert_eq!(d.hi, 1.0);
        assert_eq!(d.lo, -tiny);
    }

    #[test]
    fn two_sum_matches_quick_two_sum_on_ordered_inputs() {
        // For |a| >= |b| the quick variant is exact, so both must agree
        // bit-for-bit.
        let mut rng = rand::rng();
        for _ in 0..2000 {
            let x: f64 = rng.random_range(-1.0e8..1.0e8);
            let y: f64 = rng.random_range(-1.0..1.0);
            let (a, b) = if x.abs() >= y.abs() { (x, y) } else { (y, x) };
            let full = DoubleDouble::two_sum(a, b);
            let quick = DoubleDouble::quick_two_sum(a, b);
            assert_eq!(full.hi.to_bits(), quick.hi.to_bits());
            assert_eq!(full.lo.to_bits(), quick.lo.to_bits());
        }
    }

    #[test]
    fn two_prod_residual_is_exact() {
        // (1 + 2^-30)^2 = 1 + 2^-29 + 2^-60, the squared tail does not fit
        // into one double and must land in the residual.
        let a = 1.0 + 2f64.powi(-30);
        let p = DoubleDouble::two_prod(a, a);
        assert_eq!(p.hi, 1.0 + 2f64.powi(-29));
        assert_eq!(p.lo, 2f64.powi(-60));

        let z = DoubleDouble::two_prod(3.0, 0.5);
        assert_eq!(z.hi, 1.5);
        assert_eq!(z.lo, 0.0);
    }

    #[test]
    fn add_mul_are_commutative() {
        let mut rng = rand::rng();
        for _ in 0..2000 {
            let a = DoubleDouble::two_sum(
                rng.random_range(-1.0e6..1.0e6),
                rng.random_range(-1.0e-10..1.0e-10),
            );
            let b = DoubleDouble::two_sum(
                rng.random_range(-1.0e6..1.0e6),
                rng.random_range(-1.0e-10..1.0e-10),
            );
            let s0 = a + b;
            let s1 = b + a;
            assert_eq!(s0.hi.to_bits(), s1.hi.to_bits());
            assert_eq!(s0.lo.to_bits(), s1.lo.to_bits());
            let p0 = a * b;
            let p1 = b * a;
            assert_eq!(p0.hi.to_bits(), p1.hi.to_bits());
            assert_eq!(p0.lo.to_bits(), p1.lo.to_bits());
        }
    }

    #[test]
    fn results_stay_renormalized() {
        let mut rng = rand::rng();
        for _ in 0..2000 {
            let a = DoubleDouble::two_sum(
                rng.random_range(-1.0e3..1.0e3),
                rng.random_range(-1.0e-14..1.0e-14),
            );
            let b = DoubleDouble::two_sum(
                rng.random_range(-1.0e3..1.0e3),
                rng.random_range(-1.0e-14..1.0e-14),
            );
            for v in [a + b, a - b, a * b, a / b] {
                if v.hi == 0. {
                    assert_eq!(v.lo, 0.);
                    continue;
                }
                // ulp(hi) <= |hi| * eps, so this bound is implied by the
                // half-ulp contract.
                assert!(
                    v.lo.abs() <= 0.5 * v.hi.abs() * f64::EPSILON,
                    "lo {} exceeds half ulp of hi {}",
                    v.lo,
                    v.hi
                );
            }
        }
    }

    #[test]
    fn division_refines_to_double_double_accuracy() {
        let third = DoubleDouble::ONE / DoubleDouble::from_f64(3.0);
        let back = third * DoubleDouble::from_f64(3.0) - DoubleDouble::ONE;
        assert!(back.to_f64().abs() < 1e-31);

        let q = DoubleDouble::PI / DoubleDouble::FRAC_PI_2;
        assert_eq!(q.hi, 2.0);
        assert_eq!(q.lo, 0.0);
    }

    #[test]
    fn division_by_zero_propagates_ieee() {
        let q = DoubleDouble::ONE / DoubleDouble::ZERO;
        assert!(q.hi.is_infinite() || q.hi.is_nan());
    }

    #[test]
    fn comparisons_are_lexicographic() {
        let a = DoubleDouble::new(1.0, 1e-20);
        let b = DoubleDouble::new(1.0, 2e-20);
        let c = DoubleDouble::new(2.0, -1e-20);
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        assert_eq!(a, DoubleDouble::new(1.0, 1e-20));
    }

    #[test]
    fn pi_constants_are_consistent() {
        let two_pi = DoubleDouble::PI + DoubleDouble::PI;
        assert_eq!(two_pi.hi, DoubleDouble::TAU.hi);
        assert_eq!(two_pi.lo, DoubleDouble::TAU.lo);
        let half = DoubleDouble::PI / 2.0;
        assert_eq!(half.hi, DoubleDouble::FRAC_PI_2.hi);
        assert_eq!(half.lo, DoubleDouble::FRAC_PI_2.lo);
    }
}
