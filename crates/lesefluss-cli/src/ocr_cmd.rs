// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `lesefluss ocr` — recognized text lines of a page image.

use std::path::{Path, PathBuf};

use lesefluss_core::config::{ExtractConfig, OcrSettings};
use lesefluss_core::error::Result;
use lesefluss_document::{OcrEngine, TextRecognizer};
use tracing::info;

pub fn run(
    image: &Path,
    models: Option<PathBuf>,
    languages: Vec<String>,
    config: Option<&Path>,
) -> Result<()> {
    let base = match config {
        Some(path) => ExtractConfig::from_json_file(path)?.ocr,
        None => OcrSettings::default(),
    };
    let settings = merge_settings(base, models, languages);

    let bytes = std::fs::read(image)?;
    info!(image = %image.display(), bytes = bytes.len(), "Running OCR");

    let engine = OcrEngine::from_settings(&settings)?;
    for line in engine.recognize(&bytes, &settings.languages)? {
        println!("{line}");
    }
    Ok(())
}

/// Command-line values win over the config file; an empty `--lang` list
/// keeps the configured languages.
fn merge_settings(
    mut base: OcrSettings,
    models: Option<PathBuf>,
    languages: Vec<String>,
) -> OcrSettings {
    if models.is_some() {
        base.model_dir = models;
    }
    if !languages.is_empty() {
        base.languages = languages;
    }
    base
}
