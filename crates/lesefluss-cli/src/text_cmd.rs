// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `lesefluss text` — reading-order text of selected PDF pages.

use std::path::Path;

use lesefluss_core::config::ReconstructionConfig;
use lesefluss_core::error::Result;
use lesefluss_core::types::PageText;
use lesefluss_document::{PdfReader, extract_document_text, join_pages};
use tracing::info;

use crate::cli::{ExtractArgs, TextFormat};
use crate::page_range::resolve_pages;

pub async fn run(
    file: &Path,
    pages: Option<&str>,
    format: TextFormat,
    options: &ExtractArgs,
) -> Result<()> {
    let config = options.resolve()?;
    let texts = extract(file, pages, &config.reconstruction).await?;

    match format {
        TextFormat::Text => println!("{}", join_pages(&texts)),
        TextFormat::Json => println!("{}", serde_json::to_string_pretty(&texts)?),
    }
    Ok(())
}

/// Open `file` and reconstruct the selected pages.
pub async fn extract(
    file: &Path,
    pages: Option<&str>,
    config: &ReconstructionConfig,
) -> Result<Vec<PageText>> {
    let reader = PdfReader::open(file)?;
    let selected = resolve_pages(pages, reader.page_count())?;
    info!(
        file = %file.display(),
        pages = selected.len(),
        sort = ?config.sort_mode,
        "Extracting text"
    );
    Ok(extract_document_text(&reader, Some(&selected), config).await)
}
