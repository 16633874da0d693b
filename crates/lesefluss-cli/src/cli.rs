// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface of the `lesefluss` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lesefluss_core::config::{ExtractConfig, clamp_column_count};
use lesefluss_core::error::Result;
use lesefluss_core::types::SortMode;

/// Reconstruct reading-order text from PDF pages.
#[derive(Debug, Parser)]
#[command(name = "lesefluss", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract reading-order text from PDF pages
    Text {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,

        #[command(flatten)]
        options: ExtractArgs,
    },

    /// Dump the positioned text fragments of PDF pages as JSON
    Fragments {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,
    },

    /// Recognize text lines in a page image
    #[cfg(feature = "ocr")]
    Ocr {
        /// Path to a JPEG or PNG page image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Directory holding text-detection.rten and text-recognition.rten
        #[arg(long)]
        models: Option<PathBuf>,

        /// Language hint, repeatable (e.g. '--lang eng')
        #[arg(long = "lang")]
        languages: Vec<String>,

        /// JSON configuration file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// Output format for the `text` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextFormat {
    /// Pages joined by a blank line
    Text,
    /// One JSON array of `{page, text}` objects
    Json,
}

/// Fragment ordering requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    None,
    Asc,
    Desc,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => SortMode::None,
            SortArg::Asc => SortMode::Asc,
            SortArg::Desc => SortMode::Desc,
        }
    }
}

/// Reconstruction options; each flag overrides the value from `--config`.
#[derive(Debug, Clone, Default, Args)]
pub struct ExtractArgs {
    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fragment ordering
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Number of equal-width columns to split the page into (clamped to at least 1)
    #[arg(long, allow_negative_numbers = true)]
    pub columns: Option<i64>,

    /// Text emitted at each column boundary
    #[arg(long)]
    pub divider: Option<String>,

    /// Vertical tolerance within which fragments share a line
    #[arg(long)]
    pub fuzziness: Option<f64>,
}

impl ExtractArgs {
    /// Load `--config` (or defaults) and apply the flag overrides.
    pub fn resolve(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::from_json_file(path)?,
            None => ExtractConfig::default(),
        };

        let reconstruction = &mut config.reconstruction;
        if let Some(sort) = self.sort {
            reconstruction.sort_mode = sort.into();
        }
        if let Some(columns) = self.columns {
            reconstruction.column_count = clamp_column_count(columns);
        }
        if let Some(divider) = &self.divider {
            reconstruction.column_divider = Some(divider.clone());
        }
        if let Some(fuzziness) = self.fuzziness {
            reconstruction.fuzziness = fuzziness;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn text_flags_parse() {
        let cli = Cli::try_parse_from([
            "lesefluss",
            "text",
            "paper.pdf",
            "--pages",
            "1,3-4",
            "--sort",
            "desc",
            "--columns",
            "2",
            "--divider",
            "|",
            "--fuzziness",
            "1.5",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Text {
            file,
            pages,
            format,
            options,
        } = cli.command
        else {
            panic!("expected text subcommand");
        };
        assert_eq!(file, PathBuf::from("paper.pdf"));
        assert_eq!(pages.as_deref(), Some("1,3-4"));
        assert_eq!(format, TextFormat::Json);
        assert_eq!(options.sort, Some(SortArg::Desc));
        assert_eq!(options.columns, Some(2));
        assert_eq!(options.divider.as_deref(), Some("|"));
        assert_eq!(options.fuzziness, Some(1.5));
    }

    #[test]
    fn no_flags_resolve_to_defaults() {
        let config = ExtractArgs::default().resolve().unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"reconstruction": {{"sort_mode": true, "column_count": 3, "fuzziness": 2.0}}}}"#
        )
        .unwrap();

        let args = ExtractArgs {
            config: Some(file.path().to_path_buf()),
            columns: Some(2),
            ..ExtractArgs::default()
        };
        let config = args.resolve().unwrap().reconstruction;
        assert_eq!(config.sort_mode, SortMode::Asc);
        assert_eq!(config.column_count, 2);
        assert_eq!(config.fuzziness, 2.0);
        assert_eq!(config.column_divider, None);
    }

    #[test]
    fn out_of_range_columns_flag_is_clamped() {
        let cli =
            Cli::try_parse_from(["lesefluss", "text", "paper.pdf", "--columns", "-3"]).unwrap();
        let Commands::Text { options, .. } = cli.command else {
            panic!("expected text subcommand");
        };
        assert_eq!(options.resolve().unwrap().reconstruction.column_count, 1);
    }

    #[test]
    fn zero_sized_image_section_does_not_block_text_options() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"reconstruction": {{"column_count": -1}}, "image": {{"width": 0}}}}"#
        )
        .unwrap();

        let args = ExtractArgs {
            config: Some(file.path().to_path_buf()),
            fuzziness: Some(0.5),
            ..ExtractArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.reconstruction.column_count, 1);
        assert_eq!(config.reconstruction.fuzziness, 0.5);
        assert_eq!(config.image.width, 0);
    }
}
