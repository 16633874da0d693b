// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits — the services text extraction and image export call
// out to. Pages are 1-indexed throughout.

use std::future::Future;

use lesefluss_core::error::Result;
use lesefluss_core::types::TextFragment;

use crate::image::Canvas;

/// Supplies the raw positioned fragments of a page.
pub trait FragmentSource {
    /// Number of pages available.
    fn page_count(&self) -> usize;

    /// Fetch every text fragment of `page`, in content-stream order.
    fn fragments(&self, page: usize) -> impl Future<Output = Result<Vec<TextFragment>>> + Send;
}

/// Draws a page onto a caller-provided surface.
///
/// The surface carries its declared width and height; the renderer scales the
/// page to fit it.
pub trait PageRenderer {
    fn render(&self, page: usize, surface: &mut Canvas) -> impl Future<Output = Result<()>> + Send;
}

/// Encodes a rendered surface into an image file format.
pub trait RasterEncoder {
    /// Lossy JPEG with `quality` in 1..=100 (values outside are clamped).
    fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>>;

    fn encode_png(&self) -> Result<Vec<u8>>;
}

/// Recognizes text in an encoded page image.
pub trait TextRecognizer {
    /// Return the recognized lines of text, top to bottom.
    ///
    /// `language_hints` are advisory (e.g. `["eng"]`); engines that cannot use
    /// them ignore them.
    fn recognize(&self, image_bytes: &[u8], language_hints: &[String]) -> Result<Vec<String>>;
}
