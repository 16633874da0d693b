// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Lesefluss: positioned text fragments, sort modes, and
// raster output formats.

use serde::{Deserialize, Deserializer, Serialize};

/// A 2D affine placement `[scale_x, shear_x, shear_y, scale_y, offset_x, offset_y]`
/// mapping fragment-local space to page space.
///
/// Reconstruction only ever reads the two offsets; scale and shear are carried
/// along untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform(pub [f64; 6]);

impl Transform {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// A pure translation to `(x, y)`.
    pub fn translation(x: f64, y: f64) -> Self {
        Self([1.0, 0.0, 0.0, 1.0, x, y])
    }

    pub fn offset_x(&self) -> f64 {
        self.0[4]
    }

    pub fn offset_y(&self) -> f64 {
        self.0[5]
    }

    /// Concatenate two matrices, applying `self` first and `other` second
    /// (PDF convention: `self × other`).
    pub fn then(&self, other: &Transform) -> Transform {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Transform([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One atomic run of text as placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text of the run. May be empty.
    pub content: String,
    /// Placement of the run in page space.
    pub transform: Transform,
}

impl TextFragment {
    pub fn new(content: impl Into<String>, transform: Transform) -> Self {
        Self {
            content: content.into(),
            transform,
        }
    }

    /// A fragment translated to `(x, y)` with unit scale.
    pub fn at(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(content, Transform::translation(x, y))
    }

    pub fn offset_x(&self) -> f64 {
        self.transform.offset_x()
    }

    pub fn offset_y(&self) -> f64 {
        self.transform.offset_y()
    }
}

/// Ordering applied to fragments before line assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep input order; skip all geometric logic.
    #[default]
    None,
    /// Columns left to right, lines top to bottom, runs left to right.
    Asc,
    /// Every comparison of `Asc` flipped independently.
    Desc,
}

impl SortMode {
    pub fn is_sorted(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// `true` sorts ascending, `false` leaves input order alone.
impl From<bool> for SortMode {
    fn from(sort: bool) -> Self {
        if sort { Self::Asc } else { Self::None }
    }
}

impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Named(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(flag) => Ok(flag.into()),
            Repr::Named(name) => match name.to_ascii_lowercase().as_str() {
                "none" => Ok(Self::None),
                "asc" => Ok(Self::Asc),
                "desc" => Ok(Self::Desc),
                other => Err(serde::de::Error::custom(format!(
                    "unknown sort mode '{other}' (expected none, asc, or desc)"
                ))),
            },
        }
    }
}

/// Encoded output format for an exported page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RasterFormat {
    /// Lossy JPEG; quality is clamped to 1..=100 at encode time.
    Jpeg { quality: u8 },
    #[default]
    Png,
}

impl RasterFormat {
    /// MIME type of the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }
}

/// Reconstructed text of a single page (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page: usize,
    pub text: String,
}
