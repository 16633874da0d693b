// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for text reconstruction in the lesefluss-document
// crate, on a synthetic three-column page with jittered baselines.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use lesefluss_core::config::ReconstructionConfig;
use lesefluss_core::types::{SortMode, TextFragment};
use lesefluss_document::extract_text;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Three columns of 60 lines, five words per line, with a deterministic
/// sub-point baseline wobble so fuzzy grouping has work to do.
fn synthetic_page() -> Vec<TextFragment> {
    let mut fragments = Vec::new();
    for column in 0..3 {
        for line in 0..60 {
            for word in 0..5 {
                let wobble = ((line * 7 + word * 3) % 5) as f64 * 0.2;
                let x = column as f64 * 200.0 + word as f64 * 36.0;
                let y = 780.0 - line as f64 * 12.0 + wobble;
                fragments.push(TextFragment::at(format!("w{column}{line}{word}"), x, y));
            }
        }
    }
    // Content streams rarely arrive in reading order.
    fragments.reverse();
    fragments
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_reconstruction(c: &mut Criterion) {
    let fragments = synthetic_page();

    let unsorted = ReconstructionConfig::default();
    c.bench_function("reconstruct unsorted (900 fragments)", |b| {
        b.iter(|| black_box(extract_text(black_box(&fragments), &unsorted)));
    });

    let columns = ReconstructionConfig::sorted()
        .with_columns(3, Some("|"))
        .with_fuzziness(1.0);
    c.bench_function("reconstruct asc, 3 columns, fuzzy (900 fragments)", |b| {
        b.iter(|| black_box(extract_text(black_box(&fragments), &columns)));
    });

    let descending = columns.clone().with_sort_mode(SortMode::Desc);
    c.bench_function("reconstruct desc, 3 columns, fuzzy (900 fragments)", |b| {
        b.iter(|| black_box(extract_text(black_box(&fragments), &descending)));
    });
}

criterion_group!(benches, bench_reconstruction);
criterion_main!(benches);
