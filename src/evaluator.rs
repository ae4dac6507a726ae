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
use crate::err::CosError;
use crate::interp::{TableComponent, lagrange_interpolate};
use crate::reduce::{degrees_to_radians, reduce};
use crate::series::{
    DEFAULT_SERIES_EPSILON, DEFAULT_SERIES_MAX_TERMS, cos_with_reduction,
};
use crate::table::{MAX_CORDIC_ITERATIONS, TrigTable};
use std::sync::OnceLock;

/// Selects how a cosine query is evaluated.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum CosMethod {
    /// Direct Taylor summation of the reduced angle.
    #[default]
    Series,
    /// Lagrange reconstruction from the CORDIC sample table.
    TableInterpolation,
}

/// Declares evaluation options.
///
/// Nothing here is hard-coded into the evaluators: table geometry,
/// CORDIC depth, reconstruction degree and series termination are all
/// taken from this struct.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CosineOptions {
    /// Node count of the lazily built quadrant table.
    pub table_size: usize,
    /// Micro-rotations per table sample.
    pub cordic_iterations: usize,
    /// Lagrange reconstruction degree, the window holds `degree + 1`
    /// nodes.
    pub degree: usize,
    /// Series terminates once the hi part of a term drops under this.
    pub series_epsilon: f64,
    /// Defensive cap on series terms.
    pub series_max_terms: usize,
}

impl Default for CosineOptions {
    fn default() -> Self {
        Self {
            table_size: 524288,
            cordic_iterations: 50,
            degree: 3,
            series_epsilon: DEFAULT_SERIES_EPSILON,
            series_max_terms: DEFAULT_SERIES_MAX_TERMS,
        }
    }
}

/// Cosine evaluation context owning the options and the sample table.
///
/// The table is built on the first `TableInterpolation` query and kept
/// for the lifetime of the context; `OnceLock` makes that one-time build
/// safe for concurrent callers. Series queries never touch it.
pub struct CosineEvaluator {
    options: CosineOptions,
    table: OnceLock<TrigTable>,
}

impl CosineEvaluator {
    /// Validates the options up front so a lazy table build cannot fail
    /// in the middle of a query.
    pub fn new(options: CosineOptions) -> Result<CosineEvaluator, CosError> {
        if options.table_size < 2 {
            return Err(CosError::InvalidTableSize);
        }
        if options.cordic_iterations == 0 || options.cordic_iterations > MAX_CORDIC_ITERATIONS {
            return Err(CosError::InvalidCordicIterations);
        }
        if options.degree == 0 {
            return Err(CosError::InvalidInterpolationDegree);
        }
        if options.series_max_terms == 0
            || !(options.series_epsilon.is_finite() && options.series_epsilon > 0.)
        {
            return Err(CosError::InvalidSeriesTolerance);
        }
        Ok(CosineEvaluator {
            options,
            table: OnceLock::new(),
        })
    }

    pub fn options(&self) -> &CosineOptions {
        &self.options
    }

    /// The quadrant table, built on first use.
    pub fn table(&self) -> &TrigTable {
        self.table.get_or_init(|| {
            TrigTable::sample_quadrant(self.options.table_size, self.options.cordic_iterations)
        })
    }

    /// Extended-precision cos(x), `x` in radians.
    pub fn cos(&self, angle: DoubleDouble, method: CosMethod) -> Result<DoubleDouble, CosError> {
        if !angle.is_finite() {
            return Err(CosError::NonFiniteAngle);
        }
        let value = match method {
            CosMethod::Series => {
                cos_with_reduction(
                    angle,
                    self.options.series_epsilon,
                    self.options.series_max_terms,
                )
                .value
            }
            CosMethod::TableInterpolation => self.interpolated(angle, self.options.degree),
        };
        Ok(value)
    }

    fn interpolated(&self, angle: DoubleDouble, degree: usize) -> DoubleDouble {
        let r = reduce(angle);
        let component = if r.quadrant.uses_sine() {
            TableComponent::Sin
        } else {
            TableComponent::Cos
        };
        let partial = lagrange_interpolate(self.table(), r.value, degree, component);
        if r.quadrant.negates() { -partial } else { partial }
    }

    /// Table-interpolated cos(x) with a per-query degree overriding the
    /// configured one.
    pub fn cos_with_degree(
        &self,
        angle: DoubleDouble,
        degree: usize,
    ) -> Result<DoubleDouble, CosError> {
        if !angle.is_finite() {
            return Err(CosError::NonFiniteAngle);
        }
        if degree == 0 {
            return Err(CosError::InvalidInterpolationDegree);
        }
        Ok(self.interpolated(angle, degree))
    }

    /// Extended-precision sin(x) through the cofunction identity.
    pub fn sin(&self, angle: DoubleDouble, method: CosMethod) -> Result<DoubleDouble, CosError> {
        if !angle.is_finite() {
            return Err(CosError::NonFiniteAngle);
        }
        self.cos(DoubleDouble::FRAC_PI_2 - angle, method)
    }

    /// cos(x) with `x` in degrees.
    pub fn cos_degrees(
        &self,
        angle: DoubleDouble,
        method: CosMethod,
    ) -> Result<DoubleDouble, CosError> {
        if !angle.is_finite() {
            return Err(CosError::NonFiniteAngle);
        }
        self.cos(degrees_to_radians(angle), method)
    }
}
