// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LeseflussError, Result};
use crate::types::{RasterFormat, SortMode};

/// Largest column count honoured; larger requests are clamped to it.
pub const MAX_COLUMN_COUNT: usize = 1024;

/// Map any requested column count into `1..=MAX_COLUMN_COUNT`.
pub fn clamp_column_count(requested: i64) -> usize {
    usize::try_from(requested)
        .unwrap_or(if requested < 0 { 1 } else { MAX_COLUMN_COUNT })
        .clamp(1, MAX_COLUMN_COUNT)
}

/// Parameters governing one text reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Fragment ordering. `None` keeps input order and disables columns.
    pub sort_mode: SortMode,
    /// Number of equal-width columns the page is split into (1 = no columns).
    /// Any JSON integer is accepted and clamped into `1..=MAX_COLUMN_COUNT`.
    #[serde(deserialize_with = "deserialize_column_count")]
    pub column_count: usize,
    /// String emitted at every column boundary, if any.
    pub column_divider: Option<String>,
    /// Vertical distance treated as "same line" even when `offset_y` differs.
    pub fuzziness: f64,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            sort_mode: SortMode::None,
            column_count: 1,
            column_divider: None,
            fuzziness: 0.0,
        }
    }
}

impl ReconstructionConfig {
    /// Ascending sort with every other setting at its default.
    pub fn sorted() -> Self {
        Self {
            sort_mode: SortMode::Asc,
            ..Self::default()
        }
    }

    pub fn with_sort_mode(mut self, sort_mode: impl Into<SortMode>) -> Self {
        self.sort_mode = sort_mode.into();
        self
    }

    pub fn with_columns(mut self, column_count: usize, divider: Option<&str>) -> Self {
        self.column_count = column_count;
        self.column_divider = divider.map(str::to_owned);
        self
    }

    pub fn with_fuzziness(mut self, fuzziness: f64) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    /// Clamp out-of-range values instead of rejecting them: a column count
    /// below 1 means no columns, one above [`MAX_COLUMN_COUNT`] is capped,
    /// and negative or NaN fuzziness means exact matching only.
    pub fn normalized(&self) -> Self {
        let fuzziness = if self.fuzziness.is_nan() || self.fuzziness < 0.0 {
            0.0
        } else {
            self.fuzziness
        };
        Self {
            sort_mode: self.sort_mode,
            column_count: self.column_count.clamp(1, MAX_COLUMN_COUNT),
            column_divider: self.column_divider.clone(),
            fuzziness,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumnCount {
    Unsigned(u64),
    Signed(i64),
}

fn deserialize_column_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawColumnCount::deserialize(deserializer)? {
        RawColumnCount::Unsigned(count) => {
            clamp_column_count(i64::try_from(count).unwrap_or(i64::MAX))
        }
        RawColumnCount::Signed(count) => clamp_column_count(count),
    })
}

/// Settings for the page-image export path.
///
/// A zero-sized surface is accepted here and rejected when an export is
/// actually attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageExportConfig {
    /// Declared width of the render surface in pixels.
    pub width: u32,
    /// Declared height of the render surface in pixels.
    pub height: u32,
    pub format: RasterFormat,
}

impl Default for ImageExportConfig {
    fn default() -> Self {
        // A4 at 150 dpi.
        Self {
            width: 1240,
            height: 1754,
            format: RasterFormat::Png,
        }
    }
}

/// Settings for the OCR fallback path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Directory holding the detection and recognition models. `None` uses
    /// the engine's default cache location.
    pub model_dir: Option<PathBuf>,
    /// Language hints passed to the recognizer (e.g. `["eng", "deu"]`).
    pub languages: Vec<String>,
}

/// Complete extraction settings, usually loaded from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub reconstruction: ReconstructionConfig,
    pub image: ImageExportConfig,
    pub ocr: OcrSettings,
}

impl ExtractConfig {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw).map_err(|err| match err {
            LeseflussError::Serialization(inner) => {
                LeseflussError::Config(format!("{}: {}", path.display(), inner))
            }
            other => other,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_disable_all_geometry() {
        let config = ReconstructionConfig::default();
        assert_eq!(config.sort_mode, SortMode::None);
        assert_eq!(config.column_count, 1);
        assert!(config.column_divider.is_none());
        assert_eq!(config.fuzziness, 0.0);
    }

    #[test]
    fn normalization_clamps_misuse() {
        let config = ReconstructionConfig {
            sort_mode: SortMode::Desc,
            column_count: 0,
            column_divider: Some("|".into()),
            fuzziness: -3.0,
        }
        .normalized();
        assert_eq!(config.column_count, 1);
        assert_eq!(config.fuzziness, 0.0);
        assert_eq!(config.sort_mode, SortMode::Desc);

        let nan = ReconstructionConfig::default()
            .with_fuzziness(f64::NAN)
            .normalized();
        assert_eq!(nan.fuzziness, 0.0);

        let huge = ReconstructionConfig::sorted()
            .with_columns(usize::MAX, None)
            .normalized();
        assert_eq!(huge.column_count, MAX_COLUMN_COUNT);
    }

    #[test]
    fn out_of_range_json_column_counts_are_clamped() {
        for (raw, expected) in [
            ("-1", 1),
            ("0", 1),
            ("3", 3),
            ("18446744073709551615", MAX_COLUMN_COUNT),
            ("-9223372036854775808", 1),
        ] {
            let json = format!(
                r#"{{ "reconstruction": {{ "sort_mode": "asc", "column_count": {raw} }} }}"#
            );
            let config = ExtractConfig::from_json_str(&json).unwrap();
            assert_eq!(config.reconstruction.column_count, expected, "column_count {raw}");
        }
    }

    #[test]
    fn column_count_clamp_covers_every_integer() {
        assert_eq!(clamp_column_count(i64::MIN), 1);
        assert_eq!(clamp_column_count(-1), 1);
        assert_eq!(clamp_column_count(0), 1);
        assert_eq!(clamp_column_count(7), 7);
        assert_eq!(clamp_column_count(i64::MAX), MAX_COLUMN_COUNT);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ExtractConfig::from_json_str(
            r#"{ "reconstruction": { "sort_mode": true, "fuzziness": 1.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.reconstruction.sort_mode, SortMode::Asc);
        assert_eq!(config.reconstruction.fuzziness, 1.5);
        assert_eq!(config.reconstruction.column_count, 1);
        assert_eq!(config.image, ImageExportConfig::default());
    }

    #[test]
    fn zero_sized_surface_does_not_block_loading() {
        let config = ExtractConfig::from_json_str(
            r#"{ "reconstruction": { "sort_mode": "asc" }, "image": { "width": 0 } }"#,
        )
        .unwrap();
        assert_eq!(config.reconstruction.sort_mode, SortMode::Asc);
        assert_eq!(config.image.width, 0);
        assert_eq!(config.image.height, 1754);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "reconstruction": {{ "sort_mode": "desc", "column_count": 2, "column_divider": "|" }},
                "ocr": {{ "languages": ["deu"] }}
            }}"#
        )
        .unwrap();

        let config = ExtractConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.reconstruction.sort_mode, SortMode::Desc);
        assert_eq!(config.reconstruction.column_count, 2);
        assert_eq!(config.reconstruction.column_divider.as_deref(), Some("|"));
        assert_eq!(config.ocr.languages, vec!["deu".to_string()]);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = ExtractConfig::from_json_file(file.path()).unwrap_err();
        match err {
            LeseflussError::Config(msg) => {
                assert!(msg.contains(&file.path().display().to_string()))
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
