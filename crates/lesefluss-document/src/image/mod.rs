// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — render surfaces and JPEG/PNG encoding for page export.

pub mod canvas;

pub use canvas::Canvas;
