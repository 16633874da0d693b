// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Optical character recognition over rendered page images.

#[cfg(feature = "ocr")]
pub mod ocr;

#[cfg(feature = "ocr")]
pub use ocr::{OcrEngine, OcrModelPaths};
