// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine — recognizes text lines in rendered page images using the
// `ocrs` crate, a pure-Rust OCR engine backed by neural network models
// executed via `rten`.
//
// # Feature Gate
//
// Only compiled with the `ocr` feature:
//
// ```toml
// lesefluss-document = { path = "crates/lesefluss-document", features = ["ocr"] }
// ```
//
// # Model Setup
//
// Two model files are required in one directory:
//
// - `text-detection.rten`: locates text regions in the image.
// - `text-recognition.rten`: decodes characters from detected regions.
//
// Running `ocrs-cli` once downloads both into `$XDG_CACHE_HOME/ocrs`
// (typically `~/.cache/ocrs`), which is also the default lookup directory.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use lesefluss_core::config::OcrSettings;
use lesefluss_core::error::{LeseflussError, Result};
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use crate::traits::TextRecognizer;

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs`.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Locations of the two model files.
#[derive(Debug, Clone)]
pub struct OcrModelPaths {
    pub detection: PathBuf,
    pub recognition: PathBuf,
}

impl Default for OcrModelPaths {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrModelPaths {
    /// Both models inside `dir` under their well-known filenames.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection: dir.join(DETECTION_MODEL_FILENAME),
            recognition: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Paths implied by the `ocr` section of an extraction config.
    pub fn from_settings(settings: &OcrSettings) -> Self {
        match &settings.model_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::default(),
        }
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<()> {
        for (kind, path) in [("detection", &self.detection), ("recognition", &self.recognition)] {
            if !path.exists() {
                return Err(LeseflussError::OcrError(format!(
                    "{kind} model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Text recognizer over the `ocrs` engine.
///
/// Model loading is the expensive step; keep one engine and reuse it for
/// every page.
pub struct OcrEngine {
    engine: OcrsEngine,
}

impl OcrEngine {
    /// Load both models and initialise the engine.
    ///
    /// `ocrs` and `rten` are very slow in debug builds; use release mode.
    #[instrument(skip_all, fields(
        detection = %paths.detection.display(),
        recognition = %paths.recognition.display(),
    ))]
    pub fn new(paths: &OcrModelPaths) -> Result<Self> {
        paths.validate()?;

        info!("Loading OCR detection model");
        let detection_model = load_model(&paths.detection, "detection")?;
        info!("Loading OCR recognition model");
        let recognition_model = load_model(&paths.recognition, "recognition")?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| {
            LeseflussError::OcrError(format!("failed to initialise OCR engine: {}", err))
        })?;

        info!("OCR engine initialised");
        Ok(Self { engine })
    }

    /// Engine for the `ocr` section of an extraction config.
    pub fn from_settings(settings: &OcrSettings) -> Result<Self> {
        Self::new(&OcrModelPaths::from_settings(settings))
    }

    /// Recognized lines of `image`, top to bottom, with blank lines dropped.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn recognize_lines(&self, image: &DynamicImage) -> Result<Vec<String>> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            LeseflussError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = self.engine.prepare_input(source).map_err(|err| {
            LeseflussError::OcrError(format!("OCR preprocessing failed: {}", err))
        })?;

        let word_rects = self
            .engine
            .detect_words(&input)
            .map_err(|err| LeseflussError::OcrError(format!("word detection failed: {}", err)))?;
        debug!(word_count = word_rects.len(), "Words detected");

        let line_rects = self.engine.find_text_lines(&input, &word_rects);
        debug!(line_count = line_rects.len(), "Text lines found");

        let line_texts = self
            .engine
            .recognize_text(&input, &line_rects)
            .map_err(|err| LeseflussError::OcrError(format!("line recognition failed: {}", err)))?;

        let lines: Vec<String> = line_texts
            .iter()
            .flatten()
            .map(|line| line.to_string())
            .filter(|text| !text.trim().is_empty())
            .collect();

        info!(recognized_lines = lines.len(), "OCR complete");
        Ok(lines)
    }
}

impl TextRecognizer for OcrEngine {
    fn recognize(&self, image_bytes: &[u8], language_hints: &[String]) -> Result<Vec<String>> {
        // The bundled models are Latin-script only.
        if !language_hints.is_empty() {
            debug!(?language_hints, "Language hints ignored by ocrs");
        }
        let image = image::load_from_memory(image_bytes).map_err(|err| {
            LeseflussError::ImageError(format!("failed to decode image for OCR: {}", err))
        })?;
        self.recognize_lines(&image)
    }
}

fn load_model(path: &Path, kind: &str) -> Result<Model> {
    Model::load_file(path).map_err(|err| {
        LeseflussError::OcrError(format!(
            "failed to load {kind} model from {}: {}",
            path.display(),
            err
        ))
    })
}
