// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lesefluss — reading-order text from PDF pages.
//
// Entry point. Initialises logging (stderr, `RUST_LOG` aware), parses the
// command line, and dispatches to the subcommand.

mod cli;
mod fragments_cmd;
#[cfg(feature = "ocr")]
mod ocr_cmd;
mod page_range;
mod text_cmd;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Text {
            ref file,
            ref pages,
            format,
            ref options,
        } => text_cmd::run(file, pages.as_deref(), format, options).await,
        Commands::Fragments {
            ref file,
            ref pages,
        } => fragments_cmd::run(file, pages.as_deref()),
        #[cfg(feature = "ocr")]
        Commands::Ocr {
            ref image,
            models,
            languages,
            ref config,
        } => ocr_cmd::run(image, models, languages, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "lesefluss failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
