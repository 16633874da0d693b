// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction entry points — fetch a page's fragments from a source and
// reconstruct its text, render a page to an encoded image, or run OCR over
// that image.

use lesefluss_core::config::{ImageExportConfig, ReconstructionConfig};
use lesefluss_core::error::Result;
use lesefluss_core::types::{PageText, RasterFormat};
use tracing::{debug, info, instrument, warn};

use crate::image::Canvas;
use crate::reconstruct::TextReconstructor;
use crate::traits::{FragmentSource, PageRenderer, TextRecognizer};

/// Separator placed between pages by [`join_pages`].
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Reading-order text of one page.
///
/// Best effort: if the source cannot deliver the page, the failure is logged
/// and an empty string is returned.
#[instrument(skip(source, config))]
pub async fn extract_page_text<S: FragmentSource>(
    source: &S,
    page: usize,
    config: &ReconstructionConfig,
) -> String {
    let reconstructor = TextReconstructor::new(config);
    page_text(source, page, &reconstructor).await
}

/// Text of each requested page, or of every page when `pages` is `None`.
///
/// Pages are processed in the order given. A page that cannot be read yields
/// an empty text rather than aborting the whole document.
#[instrument(skip(source, config))]
pub async fn extract_document_text<S: FragmentSource>(
    source: &S,
    pages: Option<&[usize]>,
    config: &ReconstructionConfig,
) -> Vec<PageText> {
    let selected: Vec<usize> = match pages {
        Some(pages) => pages.to_vec(),
        None => (1..=source.page_count()).collect(),
    };
    info!(pages = selected.len(), "Extracting document text");

    let reconstructor = TextReconstructor::new(config);
    let mut texts = Vec::with_capacity(selected.len());
    for page in selected {
        let text = page_text(source, page, &reconstructor).await;
        texts.push(PageText { page, text });
    }
    texts
}

/// Concatenate page texts with a blank line between consecutive pages.
pub fn join_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Render `page` onto a `width` x `height` canvas and encode it.
#[instrument(skip(renderer))]
pub async fn export_page_image<R: PageRenderer>(
    renderer: &R,
    page: usize,
    width: u32,
    height: u32,
    format: RasterFormat,
) -> Result<Vec<u8>> {
    let mut canvas = Canvas::new(width, height)?;
    renderer.render(page, &mut canvas).await?;
    let bytes = canvas.encode(format)?;
    debug!(
        page,
        bytes = bytes.len(),
        mime = format.mime_type(),
        "Page image exported"
    );
    Ok(bytes)
}

/// Render and encode `page` with the surface size and format of the
/// `image` section of an extraction config.
pub async fn export_page<R: PageRenderer>(
    renderer: &R,
    page: usize,
    settings: &ImageExportConfig,
) -> Result<Vec<u8>> {
    export_page_image(
        renderer,
        page,
        settings.width,
        settings.height,
        settings.format,
    )
    .await
}

/// Render `page` to PNG and run it through `recognizer`.
#[instrument(skip(renderer, recognizer, language_hints))]
pub async fn recognize_page<R, T>(
    renderer: &R,
    recognizer: &T,
    page: usize,
    width: u32,
    height: u32,
    language_hints: &[String],
) -> Result<Vec<String>>
where
    R: PageRenderer,
    T: TextRecognizer,
{
    let png = export_page_image(renderer, page, width, height, RasterFormat::Png).await?;
    let lines = recognizer.recognize(&png, language_hints)?;
    info!(page, lines = lines.len(), "Page recognized");
    Ok(lines)
}

async fn page_text<S: FragmentSource>(
    source: &S,
    page: usize,
    reconstructor: &TextReconstructor,
) -> String {
    match source.fragments(page).await {
        Ok(fragments) => reconstructor.reconstruct(&fragments),
        Err(err) => {
            warn!(page, %err, "Fragment retrieval failed, page text left empty");
            String::new()
        }
    }
}
