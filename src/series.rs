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
use crate::reduce::reduce;

pub(crate) const DEFAULT_SERIES_EPSILON: f64 = 1e-40;
pub(crate) const DEFAULT_SERIES_MAX_TERMS: usize = 256;

/// Outcome of a Taylor summation.
///
/// `converged: false` means the term cap fired before the tail dropped
/// under the tolerance; `value` still holds the best partial sum. The cap
/// is a defensive bound against reduction defects, a properly reduced
/// argument converges long before any reasonable cap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SeriesEvaluation {
    pub value: DoubleDouble,
    pub terms_used: usize,
    pub converged: bool,
}

/// Sums cos(x) = Σ (−1)^k x^(2k) / (2k)! in extended precision.
///
/// Intended for arguments already reduced into [0, π/2).
pub fn cos_taylor(x: DoubleDouble, epsilon: f64, max_terms: usize) -> SeriesEvaluation {
    let x2 = x * x;
    let mut term = DoubleDouble::ONE;
    let mut sum = DoubleDouble::ONE;
    for n in 1..=max_terms {
        let k = 2. * n as f64;
        term = term * x2 / (k * (k - 1.));
        term = -term;
        sum = sum + term;
        if term.hi.abs() < epsilon {
            return SeriesEvaluation {
                value: sum,
                terms_used: n,
                converged: true,
            };
        }
    }
    SeriesEvaluation {
        value: sum,
        terms_used: max_terms,
        converged: false,
    }
}

/// Full series pipeline: range reduction, quadrant identity, summation.
pub(crate) fn cos_with_reduction(
    x: DoubleDouble,
    epsilon: f64,
    max_terms: usize,
) -> SeriesEvaluation {
    let r = reduce(x);
    let arg = if r.quadrant.uses_sine() {
        DoubleDouble::FRAC_PI_2 - r.value
    } else {
        r.value
    };
    let mut eval = cos_taylor(arg, epsilon, max_terms);
    if r.quadrant.negates() {
        eval.value = -eval.value;
    }
    eval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_zero_is_exact() {
        let e = cos_taylor(
            DoubleDouble::ZERO,
            DEFAULT_SERIES_EPSILON,
            DEFAULT_SERIES_MAX_TERMS,
        );
        assert!(e.converged);
        assert_eq!(e.value.hi, 1.0);
        assert_eq!(e.value.lo, 0.0);
    }

    #[test]
    fn matches_reference_cosine_on_reduced_range() {
        for i in 0..200 {
            let x = i as f64 * (std::f64::consts::FRAC_PI_2 / 200.0);
            let e = cos_taylor(
                DoubleDouble::from_f64(x),
                DEFAULT_SERIES_EPSILON,
                DEFAULT_SERIES_MAX_TERMS,
            );
            assert!(e.converged);
            let d = (e.value.to_f64() - pxfm::f_cos(x)).abs();
            assert!(d < 1e-15, "x = {x}, diff = {d}");
        }
    }

    #[test]
    fn reduced_pipeline_handles_all_quadrants() {
        let cases = [
            (0.0, 1.0),
            (std::f64::consts::FRAC_PI_3, 0.5),
            (2.0, pxfm::f_cos(2.0)),
            (4.0, pxfm::f_cos(4.0)),
            (5.5, pxfm::f_cos(5.5)),
            (-1.0, pxfm::f_cos(-1.0)),
            (100.0, pxfm::f_cos(100.0)),
        ];
        for (x, want) in cases {
            let e = cos_with_reduction(
                DoubleDouble::from_f64(x),
                DEFAULT_SERIES_EPSILON,
                DEFAULT_SERIES_MAX_TERMS,
            );
            let d = (e.value.to_f64() - want).abs();
            assert!(d < 1e-14, "x = {x}, diff = {d}");
        }
    }

    #[test]
    fn term_cap_reports_without_failing() {
        let e = cos_taylor(DoubleDouble::from_f64(1.5), DEFAULT_SERIES_EPSILON, 2);
        assert!(!e.converged);
        assert_eq!(e.terms_used, 2);
        // Best partial sum: 1 − x²/2 + x⁴/24.
        let x = 1.5f64;
        let partial = 1.0 - x * x / 2.0 + x * x * x * x / 24.0;
        assert!((e.value.to_f64() - partial).abs() < 1e-12);
    }

    #[test]
    fn convergence_needs_few_terms_on_reduced_arguments() {
        let e = cos_taylor(
            DoubleDouble::from_f64(1.0),
            DEFAULT_SERIES_EPSILON,
            DEFAULT_SERIES_MAX_TERMS,
        );
        assert!(e.converged);
        assert!(e.terms_used < 40, "terms = {}", e.terms_used);
    }
}
