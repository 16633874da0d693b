// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fragment ordering — column, then fuzzy line, then horizontal position.
//
// The fuzzy line rule makes the comparator non-transitive: two fragments can
// each be within tolerance of a third but not of each other. The standard
// library sorts may panic when they detect an inconsistent order, so the
// ordering here runs through a plain stable merge sort that accepts whatever
// the comparator says.

use std::cmp::Ordering;
use std::collections::VecDeque;

use lesefluss_core::types::{SortMode, TextFragment};

use super::columns::ColumnBreaks;

/// The three values a fragment is ordered by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub column: usize,
    pub y: f64,
    pub x: f64,
}

impl SortKey {
    pub fn of(fragment: &TextFragment, breaks: &ColumnBreaks) -> Self {
        Self {
            column: breaks.column_index(fragment.offset_x()),
            y: fragment.offset_y(),
            x: fragment.offset_x(),
        }
    }
}

/// Comparator over [`SortKey`]s for one direction and tolerance.
#[derive(Debug, Clone, Copy)]
pub struct FragmentOrder {
    mode: SortMode,
    fuzziness: f64,
}

impl FragmentOrder {
    pub fn new(mode: SortMode, fuzziness: f64) -> Self {
        Self { mode, fuzziness }
    }

    /// Compare two keys. `SortMode::None` treats everything as equal.
    ///
    /// Descending flips each of the three comparisons on its own; the fuzzy
    /// line rule is applied identically in both directions.
    pub fn compare(&self, a: &SortKey, b: &SortKey) -> Ordering {
        match self.mode {
            SortMode::None => Ordering::Equal,
            SortMode::Asc => a
                .column
                .cmp(&b.column)
                .then_with(|| self.compare_lines(b.y, a.y))
                .then_with(|| compare_f64(a.x, b.x)),
            SortMode::Desc => b
                .column
                .cmp(&a.column)
                .then_with(|| self.compare_lines(a.y, b.y))
                .then_with(|| compare_f64(b.x, a.x)),
        }
    }

    /// Vertical comparison; values within `fuzziness` of each other are equal.
    fn compare_lines(&self, first: f64, second: f64) -> Ordering {
        if (first - second).abs() <= self.fuzziness {
            Ordering::Equal
        } else {
            compare_f64(first, second)
        }
    }

    /// Stable-sort `fragments` in this order, keying each fragment once.
    pub fn sort(&self, fragments: Vec<TextFragment>, breaks: &ColumnBreaks) -> Vec<TextFragment> {
        if !self.mode.is_sorted() {
            return fragments;
        }

        let keyed: Vec<(SortKey, TextFragment)> = fragments
            .into_iter()
            .map(|fragment| (SortKey::of(&fragment, breaks), fragment))
            .collect();

        stable_sort_by(keyed, |(a, _), (b, _)| self.compare(a, b))
            .into_iter()
            .map(|(_, fragment)| fragment)
            .collect()
    }
}

/// Malformed coordinates (NaN) compare as equal.
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Top-down stable merge sort. Never panics, whatever `compare` returns.
pub(crate) fn stable_sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    merge_sort(items, &mut compare)
}

fn merge_sort<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = merge_sort(left, compare);
    let right = merge_sort(right, compare);
    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = VecDeque::from(left);
    let mut right = VecDeque::from(right);

    while let (Some(l), Some(r)) = (left.front(), right.front()) {
        // Right only overtakes left when strictly smaller.
        let next = if compare(r, l) == Ordering::Less {
            right.pop_front()
        } else {
            left.pop_front()
        };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}
