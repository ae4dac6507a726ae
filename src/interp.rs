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
use crate::table::{TrigTable, interpolation_window};

/// Which sample row of the table a reconstruction reads.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum TableComponent {
    Cos,
    Sin,
}

/// Lagrange reconstruction from the `degree + 1` nodes nearest to `x`.
///
/// Weights are formed entirely in extended precision, nearly coincident
/// nodes cancel catastrophically in native arithmetic. A degree at or
/// above the table size is clamped to the widest valid window. Cost is
/// O(degree²) per query.
pub fn lagrange_interpolate(
    table: &TrigTable,
    x: DoubleDouble,
    degree: usize,
    component: TableComponent,
) -> DoubleDouble {
    let degree = degree.min(table.len() - 1);
    let window = interpolation_window(table.lower_bound(x), degree, table.len());
    let nodes = table.nodes();
    let mut sum = DoubleDouble::ZERO;
    for i in window.clone() {
        let mut weight = DoubleDouble::ONE;
        for j in window.clone() {
            if j == i {
                continue;
            }
            let num = x - nodes[j].angle;
            let den = nodes[i].angle - nodes[j].angle;
            weight = weight * (num / den);
        }
        let y = match component {
            TableComponent::Cos => nodes[i].cos,
            TableComponent::Sin => nodes[i].sin,
        };
        sum = sum + weight * y;
    }
    sum
}
