// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Column-break computation — equal-width partition of the page by x offset.

use lesefluss_core::config::MAX_COLUMN_COUNT;
use lesefluss_core::types::{TextFragment, Transform};

/// Ordered x positions separating adjacent columns.
///
/// Computed once from the real fragments of a page. Divider fragments added
/// afterwards never feed back into the boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnBreaks {
    boundaries: Vec<f64>,
}

impl ColumnBreaks {
    /// Split `[0, max offset_x]` into `column_count` equal-width columns.
    ///
    /// Returns an empty set when `column_count <= 1` or there are no
    /// fragments. Counts above [`MAX_COLUMN_COUNT`] are capped.
    pub fn compute(fragments: &[TextFragment], column_count: usize) -> Self {
        if column_count <= 1 || fragments.is_empty() {
            return Self::default();
        }
        let column_count = column_count.min(MAX_COLUMN_COUNT);

        let max_offset_x = fragments
            .iter()
            .map(TextFragment::offset_x)
            .fold(f64::NEG_INFINITY, f64::max);

        let boundaries = (1..column_count)
            .map(|c| c as f64 * max_offset_x / column_count as f64)
            .collect();

        Self { boundaries }
    }

    /// Build from explicit boundaries (ascending).
    #[cfg(test)]
    pub(crate) fn from_boundaries(boundaries: Vec<f64>) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Column of a fragment at `offset_x`: the index of the first boundary
    /// strictly greater than it.
    ///
    /// An offset at or beyond every boundary, or a NaN offset, lands in the
    /// last column (`boundaries.len()`).
    pub fn column_index(&self, offset_x: f64) -> usize {
        self.boundaries
            .iter()
            .position(|&boundary| boundary > offset_x)
            .unwrap_or(self.boundaries.len())
    }

    /// One divider fragment per boundary, placed one unit left of it at
    /// vertical offset 0.
    pub fn divider_fragments(&self, divider: &str) -> Vec<TextFragment> {
        self.boundaries
            .iter()
            .map(|&boundary| {
                TextFragment::new(
                    divider,
                    Transform([0.0, 0.0, 0.0, 1.0, boundary - 1.0, 0.0]),
                )
            })
            .collect()
    }
}
