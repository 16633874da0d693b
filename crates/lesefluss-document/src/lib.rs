// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lesefluss-document — Reading-order text reconstruction for PDF pages.
//
// Turns the positioned text fragments of a page into readable text (column
// detection, fuzzy line grouping, divider injection), reads those fragments
// out of PDF files, exports rendered pages as JPEG/PNG, and optionally runs
// OCR over them.

pub mod extract;
pub mod image;
pub mod pdf;
pub mod reconstruct;
pub mod scan;
pub mod traits;

// Re-export the primary entry points so callers can use
// `lesefluss_document::extract_text` etc.
pub use extract::{
    export_page, export_page_image, extract_document_text, extract_page_text, join_pages,
    recognize_page,
};
pub use image::Canvas;
pub use pdf::PdfReader;
pub use reconstruct::{TextReconstructor, extract_text};
pub use traits::{FragmentSource, PageRenderer, RasterEncoder, TextRecognizer};

#[cfg(feature = "ocr")]
pub use scan::{OcrEngine, OcrModelPaths};
