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
use crate::cordic::{arctan_steps, rotate};
use crate::dd::DoubleDouble;
use crate::err::CosError;
use crate::series::{DEFAULT_SERIES_EPSILON, DEFAULT_SERIES_MAX_TERMS, cos_with_reduction};
use std::cmp::Ordering;
use std::ops::Range;

pub(crate) const MAX_CORDIC_ITERATIONS: usize = 64;

/// One CORDIC sample on the unit circle.
///
/// The angle keeps its extended precision because interpolation weights
/// are formed from angle differences; the sampled values are stored at
/// native precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TableNode {
    pub angle: DoubleDouble,
    pub cos: f64,
    pub sin: f64,
}

/// Immutable quadrant sample table, strictly ascending by angle.
#[derive(Debug, Clone)]
pub struct TrigTable {
    nodes: Vec<TableNode>,
}

impl TrigTable {
    /// Builds `size` CORDIC samples over [0, π/2].
    pub fn build(size: usize, cordic_iterations: usize) -> Result<TrigTable, CosError> {
        if size < 2 {
            return Err(CosError::InvalidTableSize);
        }
        if cordic_iterations == 0 || cordic_iterations > MAX_CORDIC_ITERATIONS {
            return Err(CosError::InvalidCordicIterations);
        }
        Ok(Self::sample_quadrant(size, cordic_iterations))
    }

    /// Wraps caller-supplied samples. Nodes are sorted by angle; two nodes
    /// sharing an angle cannot be interpolated and are rejected.
    pub fn from_nodes(mut nodes: Vec<TableNode>) -> Result<TrigTable, CosError> {
        if nodes.len() < 2 {
            return Err(CosError::InvalidTableSize);
        }
        sort_by_angle(&mut nodes);
        if nodes.windows(2).any(|w| !(w[0].angle < w[1].angle)) {
            return Err(CosError::DuplicateTableAngle);
        }
        Ok(TrigTable { nodes })
    }

    /// Sampling pass over one quadrant, callers validate the parameters.
    pub(crate) fn sample_quadrant(size: usize, cordic_iterations: usize) -> TrigTable {
        let steps = arctan_steps(cordic_iterations);
        let mut nodes = Vec::with_capacity(size);
        for i in 0..size {
            let angle = chebyshev_placement(i, size);
            let (cos_v, sin_v) = rotate(angle, &steps);
            nodes.push(TableNode {
                angle,
                cos: cos_v.to_f64(),
                sin: sin_v.to_f64(),
            });
        }
        // Placement is dense near both interval edges and not monotonic
        // in the sample index.
        sort_by_angle(&mut nodes);
        debug_assert!(nodes.windows(2).all(|w| w[0].angle < w[1].angle));
        TrigTable { nodes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[TableNode] {
        &self.nodes
    }

    /// Index of the first node whose angle is not below `x`.
    #[inline]
    pub(crate) fn lower_bound(&self, x: DoubleDouble) -> usize {
        self.nodes.partition_point(|node| node.angle < x)
    }
}

#[inline]
fn sort_by_angle(nodes: &mut [TableNode]) {
    nodes.sort_by(|a, b| a.angle.partial_cmp(&b.angle).unwrap_or(Ordering::Equal));
}

/// Node window of `degree + 1` entries around the insertion point,
/// shifted inward at the table edges instead of erroring.
///
/// The insertion point sits between nodes `center − 1` and `center`, so
/// half the window (rounded up) goes below it; a degree-1 window is then
/// exactly the bracketing pair.
pub(crate) fn interpolation_window(center: usize, degree: usize, len: usize) -> Range<usize> {
    debug_assert!(degree < len);
    let start = center.saturating_sub((degree + 1) / 2);
    let last = (start + degree).min(len - 1);
    let start = last - degree;
    start..last + 1
}

/// Chebyshev-like placement θ_i = (π/2)(1 + cos((2i+1)π/(2N)))/2.
///
/// The spacing cosine is evaluated with the crate's own reduced series
/// so the placement itself carries extended precision.
fn chebyshev_placement(i: usize, n: usize) -> DoubleDouble {
    let seed = DoubleDouble::PI * (2 * i + 1) as f64 / (2 * n) as f64;
    let c = cos_with_reduction(seed, DEFAULT_SERIES_EPSILON, DEFAULT_SERIES_MAX_TERMS).value;
    DoubleDouble::FRAC_PI_2 * ((c + 1.0) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_validates_parameters() {
        assert_eq!(TrigTable::build(0, 40).unwrap_err(), CosError::InvalidTableSize);
        assert_eq!(TrigTable::build(1, 40).unwrap_err(), CosError::InvalidTableSize);
        assert_eq!(
            TrigTable::build(16, 0).unwrap_err(),
            CosError::InvalidCordicIterations
        );
        assert_eq!(
            TrigTable::build(16, MAX_CORDIC_ITERATIONS + 1).unwrap_err(),
            CosError::InvalidCordicIterations
        );
    }

    #[test]
    fn nodes_are_strictly_ascending() {
        let table = TrigTable::build(257, 46).unwrap();
        assert_eq!(table.len(), 257);
        for w in table.nodes().windows(2) {
            assert!(w[0].angle < w[1].angle);
        }
    }

    #[test]
    fn nodes_cover_one_quadrant() {
        let table = TrigTable::build(128, 46).unwrap();
        let first = table.nodes().first().unwrap();
        let last = table.nodes().last().unwrap();
        assert!(first.angle.hi < 0.001);
        assert!(last.angle.hi > std::f64::consts::FRAC_PI_2 - 0.001);
        assert!(last.angle.hi <= std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn node_samples_sit_on_unit_circle() {
        let table = TrigTable::build(64, 50).unwrap();
        for node in table.nodes() {
            let norm = node.cos * node.cos + node.sin * node.sin;
            assert!((norm - 1.0).abs() < 1e-13);
            assert!((node.cos - pxfm::f_cos(node.angle.to_f64())).abs() < 1e-13);
            assert!((node.sin - pxfm::f_sin(node.angle.to_f64())).abs() < 1e-13);
        }
    }

    #[test]
    fn from_nodes_sorts_and_rejects_duplicates() {
        let node = |a: f64, c: f64, s: f64| TableNode {
            angle: DoubleDouble::from_f64(a),
            cos: c,
            sin: s,
        };
        let table =
            TrigTable::from_nodes(vec![node(0.3, 3.0, 0.0), node(0.1, 1.0, 0.0), node(0.2, 2.0, 0.0)])
                .unwrap();
        assert_eq!(table.nodes()[0].cos, 1.0);
        assert_eq!(table.nodes()[2].cos, 3.0);

        let dup = TrigTable::from_nodes(vec![node(0.1, 1.0, 0.0), node(0.1, 2.0, 0.0)]);
        assert_eq!(dup.unwrap_err(), CosError::DuplicateTableAngle);

        let short = TrigTable::from_nodes(vec![node(0.1, 1.0, 0.0)]);
        assert_eq!(short.unwrap_err(), CosError::InvalidTableSize);
    }

    #[test]
    fn lower_bound_brackets_queries() {
        let table = TrigTable::build(64, 40).unwrap();
        let probe = DoubleDouble::from_f64(0.7);
        let idx = table.lower_bound(probe);
        assert!(idx > 0 && idx < table.len());
        assert!(table.nodes()[idx - 1].angle < probe);
        assert!(probe <= table.nodes()[idx].angle);

        assert_eq!(table.lower_bound(DoubleDouble::from_f64(-1.0)), 0);
        assert_eq!(table.lower_bound(DoubleDouble::from_f64(2.0)), table.len());
    }

    #[test]
    fn window_shifts_at_edges() {
        assert_eq!(interpolation_window(0, 3, 100), 0..4);
        assert_eq!(interpolation_window(1, 3, 100), 0..4);
        assert_eq!(interpolation_window(50, 3, 100), 48..52);
        assert_eq!(interpolation_window(50, 1, 100), 49..51);
        assert_eq!(interpolation_window(99, 3, 100), 96..100);
        assert_eq!(interpolation_window(100, 3, 100), 96..100);
        assert_eq!(interpolation_window(5, 99, 100), 0..100);
    }
}
