// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text reconstruction — turn an unordered set of positioned fragments into
// reading-order text.
//
// Two phases: build a working list (real fragments plus synthetic column
// dividers), then sort it and assemble lines. The caller's fragments are never
// modified.

pub mod assembly;
pub mod columns;
pub mod ordering;

use lesefluss_core::config::ReconstructionConfig;
use lesefluss_core::types::TextFragment;
use tracing::{debug, instrument};

pub use assembly::assemble_lines;
pub use columns::ColumnBreaks;
pub use ordering::{FragmentOrder, SortKey};

/// Reconstructs reading-order text under one configuration.
///
/// The configuration is normalized once on construction, so a reconstructor
/// can be reused across many pages.
#[derive(Debug, Clone)]
pub struct TextReconstructor {
    config: ReconstructionConfig,
}

impl TextReconstructor {
    pub fn new(config: &ReconstructionConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// Produce the text for one page's fragments. Never fails; an empty slice
    /// gives an empty string.
    #[instrument(skip_all, fields(fragments = fragments.len(), sort = ?self.config.sort_mode))]
    pub fn reconstruct(&self, fragments: &[TextFragment]) -> String {
        if fragments.is_empty() {
            return String::new();
        }

        let config = &self.config;
        if !config.sort_mode.is_sorted() {
            return assemble_lines(fragments, config.fuzziness);
        }

        let breaks = ColumnBreaks::compute(fragments, config.column_count);

        let mut working = fragments.to_vec();
        if let Some(divider) = config.column_divider.as_deref() {
            working.extend(breaks.divider_fragments(divider));
        }
        debug!(
            boundaries = ?breaks.boundaries(),
            working = working.len(),
            "Column breaks computed"
        );

        let ordered =
            FragmentOrder::new(config.sort_mode, config.fuzziness).sort(working, &breaks);
        assemble_lines(&ordered, config.fuzziness)
    }
}

/// Reconstruct text from `fragments` under `config`.
///
/// Shorthand for `TextReconstructor::new(config).reconstruct(fragments)`;
/// `ReconstructionConfig::default()` keeps input order with no columns and no
/// fuzziness.
pub fn extract_text(fragments: &[TextFragment], config: &ReconstructionConfig) -> String {
    TextReconstructor::new(config).reconstruct(fragments)
}
