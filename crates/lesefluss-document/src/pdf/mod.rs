// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — reading documents and interpreting page content streams into
// positioned text fragments.

mod content;
pub mod reader;

pub use reader::PdfReader;
