// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line assembly — walk ordered fragments and join them into text.

use lesefluss_core::types::TextFragment;

/// Concatenate ordered fragments, starting a new line whenever the vertical
/// offset changes by more than `fuzziness`.
///
/// A fragment within tolerance of the previous one but not exactly level with
/// it is wrapped in single spaces on both sides. The reference line follows
/// the raw `offset_y` of every fragment, so a long run of small steps keeps
/// extending one line. Nothing is trimmed.
pub fn assemble_lines<'a>(
    fragments: impl IntoIterator<Item = &'a TextFragment>,
    fuzziness: f64,
) -> String {
    let mut text = String::new();
    let mut last_line_y: Option<f64> = None;

    for fragment in fragments {
        let y = fragment.offset_y();

        let is_fuzzy = match last_line_y {
            Some(last) => fuzziness > 0.0 && (last - y).abs() <= fuzziness,
            None => false,
        };
        let same_line = last_line_y.is_none_or(|last| last == y);

        if same_line || is_fuzzy {
            if is_fuzzy && !same_line {
                text.push(' ');
                text.push_str(&fragment.content);
                text.push(' ');
            } else {
                text.push_str(&fragment.content);
            }
        } else {
            text.push('\n');
            text.push_str(&fragment.content);
        }

        last_line_y = Some(y);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_text() {
        let none: [TextFragment; 0] = [];
        assert_eq!(assemble_lines(&none, 5.0), "");
    }

    #[test]
    fn level_fragments_join_without_separator() {
        let fragments = [
            TextFragment::at("foo", 0.0, 100.0),
            TextFragment::at("bar", 30.0, 100.0),
        ];
        assert_eq!(assemble_lines(&fragments, 0.0), "foobar");
        assert_eq!(assemble_lines(&fragments, 3.0), "foobar");
    }

    #[test]
    fn fuzzy_neighbour_is_padded_on_both_sides() {
        let fragments = [
            TextFragment::at("foo", 0.0, 100.0),
            TextFragment::at("bar", 30.0, 101.0),
        ];
        assert_eq!(assemble_lines(&fragments, 2.0), "foo bar ");
    }

    #[test]
    fn vertical_change_starts_new_line() {
        let fragments = [
            TextFragment::at("one", 0.0, 700.0),
            TextFragment::at("two", 0.0, 680.0),
            TextFragment::at("three", 0.0, 660.0),
        ];
        assert_eq!(assemble_lines(&fragments, 0.0), "one\ntwo\nthree");
        assert_eq!(assemble_lines(&fragments, 5.0), "one\ntwo\nthree");
    }

    #[test]
    fn reference_line_drifts_with_each_fragment() {
        // Each step is within tolerance of its predecessor even though the
        // first and last are 4 units apart.
        let fragments = [
            TextFragment::at("a", 0.0, 100.0),
            TextFragment::at("b", 0.0, 101.0),
            TextFragment::at("c", 0.0, 102.0),
            TextFragment::at("d", 0.0, 103.0),
            TextFragment::at("e", 0.0, 104.0),
        ];
        assert_eq!(assemble_lines(&fragments, 1.0), "a b  c  d  e ");
    }

    #[test]
    fn first_fragment_never_gets_a_separator() {
        let fragments = [
            TextFragment::at("", 0.0, 5.0),
            TextFragment::at("x", 0.0, 5.0),
        ];
        assert_eq!(assemble_lines(&fragments, 0.0), "x");
    }
}
