// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content-stream interpretation — walk the text-showing operators of a page
// and emit one positioned fragment per shown string.
//
// Only the state that affects placement is tracked: the graphics CTM
// (`q`/`Q`/`cm`), the text and line matrices, font size, leading, rise, and
// horizontal scaling. Glyph widths are not known here, so the text matrix is
// not advanced after a string is shown.

use lesefluss_core::types::{TextFragment, Transform};
use lopdf::Object;
use lopdf::content::Operation;
use tracing::trace;

/// Text state carried across `BT`/`ET` blocks.
#[derive(Debug, Clone)]
struct TextState {
    font: Vec<u8>,
    font_size: f64,
    leading: f64,
    rise: f64,
    /// `Tz` as a fraction (100% = 1.0).
    horizontal_scale: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: Vec::new(),
            font_size: 1.0,
            leading: 0.0,
            rise: 0.0,
            horizontal_scale: 1.0,
        }
    }
}

/// Turns a sequence of content-stream operations into text fragments.
///
/// `decode` maps `(font resource name, raw string bytes)` to Unicode text.
pub(crate) struct ContentInterpreter<D> {
    decode: D,
    ctm: Transform,
    ctm_stack: Vec<Transform>,
    text_matrix: Transform,
    line_matrix: Transform,
    state: TextState,
    fragments: Vec<TextFragment>,
}

impl<D> ContentInterpreter<D>
where
    D: Fn(&[u8], &[u8]) -> String,
{
    pub(crate) fn new(decode: D) -> Self {
        Self {
            decode,
            ctm: Transform::IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: Transform::IDENTITY,
            line_matrix: Transform::IDENTITY,
            state: TextState::default(),
            fragments: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, operations: &[Operation]) -> Vec<TextFragment> {
        for op in operations {
            self.apply(op);
        }
        self.fragments
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                // Unbalanced `Q` in the wild; keep the current CTM.
                if let Some(saved) = self.ctm_stack.pop() {
                    self.ctm = saved;
                }
            }
            "cm" => {
                if let Some(matrix) = matrix_operand(operands) {
                    self.ctm = matrix.then(&self.ctm);
                }
            }
            "BT" => {
                self.text_matrix = Transform::IDENTITY;
                self.line_matrix = Transform::IDENTITY;
            }
            "ET" => {}
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    self.state.font = name.clone();
                }
                if let Some(size) = operands.get(1).and_then(number) {
                    self.state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.state.leading = leading;
                }
            }
            "Ts" => {
                if let Some(rise) = operands.first().and_then(number) {
                    self.state.rise = rise;
                }
            }
            "Tz" => {
                if let Some(scale) = operands.first().and_then(number) {
                    self.state.horizontal_scale = scale / 100.0;
                }
            }
            "Td" | "TD" => {
                let tx = operands.first().and_then(number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                if op.operator == "TD" {
                    self.state.leading = -ty;
                }
                self.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(matrix) = matrix_operand(operands) {
                    self.text_matrix = matrix;
                    self.line_matrix = matrix;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode_bytes(bytes);
                    self.emit(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text: String = items
                        .iter()
                        .filter_map(|item| match item {
                            Object::String(bytes, _) => Some(self.decode_bytes(bytes)),
                            _ => None,
                        })
                        .collect();
                    self.emit(text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode_bytes(bytes);
                    self.emit(text);
                }
            }
            "\"" => {
                // aw ac string
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    let text = self.decode_bytes(bytes);
                    self.emit(text);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Transform::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.state.leading);
    }

    fn decode_bytes(&self, bytes: &[u8]) -> String {
        (self.decode)(&self.state.font, bytes)
    }

    /// Record `text` at the current text rendering matrix.
    fn emit(&mut self, text: String) {
        let state = &self.state;
        let rendering = Transform([
            state.font_size * state.horizontal_scale,
            0.0,
            0.0,
            state.font_size,
            0.0,
            state.rise,
        ])
        .then(&self.text_matrix)
        .then(&self.ctm);

        trace!(
            text = %text,
            x = rendering.offset_x(),
            y = rendering.offset_y(),
            "Text shown"
        );
        self.fragments.push(TextFragment::new(text, rendering));
    }
}

/// Numeric operand as `f64`.
pub(crate) fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn matrix_operand(operands: &[Object]) -> Option<Transform> {
    if operands.len() < 6 {
        return None;
    }
    let mut matrix = [0.0; 6];
    for (slot, operand) in matrix.iter_mut().zip(operands) {
        *slot = number(operand)?;
    }
    Some(Transform(matrix))
}

/// Fallback decoding when no font encoding is available: UTF-16BE with a byte
/// order mark, otherwise Latin-1.
pub(crate) fn decode_fallback(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin1(_font: &[u8], bytes: &[u8]) -> String {
        decode_fallback(bytes)
    }

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn text(s: &str) -> Object {
        Object::string_literal(s)
    }

    fn run(operations: Vec<Operation>) -> Vec<TextFragment> {
        ContentInterpreter::new(latin1).run(&operations)
    }

    #[test]
    fn tm_places_fragment_and_font_size_scales() {
        let fragments = run(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 12.into()]),
            op(
                "Tm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 700.into()],
            ),
            op("Tj", vec![text("Hello")]),
            op("ET", vec![]),
        ]);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].content, "Hello");
        assert_eq!(fragments[0].transform.0, [12.0, 0.0, 0.0, 12.0, 72.0, 700.0]);
    }

    #[test]
    fn td_and_t_star_move_relative_to_line_start() {
        let fragments = run(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 10.into()]),
            op("TL", vec![14.into()]),
            op("Td", vec![50.into(), 600.into()]),
            op("Tj", vec![text("one")]),
            op("T*", vec![]),
            op("Tj", vec![text("two")]),
            op("Td", vec![20.into(), 0.into()]),
            op("'", vec![text("three")]),
            op("ET", vec![]),
        ]);
        let positions: Vec<(f64, f64)> = fragments
            .iter()
            .map(|f| (f.offset_x(), f.offset_y()))
            .collect();
        assert_eq!(positions, vec![(50.0, 600.0), (50.0, 586.0), (70.0, 572.0)]);
    }

    #[test]
    fn td_uppercase_sets_leading() {
        let fragments = run(vec![
            op("BT", vec![]),
            op("TD", vec![0.into(), (-20).into()]),
            op("T*", vec![]),
            op("Tj", vec![text("x")]),
            op("ET", vec![]),
        ]);
        assert_eq!(fragments[0].offset_y(), -40.0);
    }

    #[test]
    fn tj_array_concatenates_strings() {
        let fragments = run(vec![
            op("BT", vec![]),
            op(
                "TJ",
                vec![Object::Array(vec![
                    text("Wo"),
                    (-120).into(),
                    text("rld"),
                ])],
            ),
            op("ET", vec![]),
        ]);
        assert_eq!(fragments[0].content, "World");
    }

    #[test]
    fn cm_is_saved_and_restored() {
        let fragments = run(vec![
            op("q", vec![]),
            op(
                "cm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), 100.into(), 50.into()],
            ),
            op("BT", vec![]),
            op("Td", vec![10.into(), 10.into()]),
            op("Tj", vec![text("inside")]),
            op("ET", vec![]),
            op("Q", vec![]),
            op("Q", vec![]),
            op("BT", vec![]),
            op("Td", vec![10.into(), 10.into()]),
            op("Tj", vec![text("outside")]),
            op("ET", vec![]),
        ]);
        assert_eq!((fragments[0].offset_x(), fragments[0].offset_y()), (110.0, 60.0));
        assert_eq!((fragments[1].offset_x(), fragments[1].offset_y()), (10.0, 10.0));
    }

    #[test]
    fn rise_shifts_vertical_offset() {
        let fragments = run(vec![
            op("BT", vec![]),
            op("Ts", vec![3.into()]),
            op("Td", vec![0.into(), 100.into()]),
            op("Tj", vec![text("sup")]),
            op("ET", vec![]),
        ]);
        assert_eq!(fragments[0].offset_y(), 103.0);
    }

    #[test]
    fn fallback_decodes_utf16_with_bom() {
        assert_eq!(decode_fallback(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0xE9]), "Hé");
        assert_eq!(decode_fallback(b"caf\xe9"), "café");
    }
}
