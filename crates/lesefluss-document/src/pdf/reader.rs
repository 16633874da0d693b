// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open existing PDF documents with `lopdf` and pull the
// positioned text fragments out of each page's content stream.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;

use lesefluss_core::error::{LeseflussError, Result};
use lesefluss_core::types::TextFragment;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, instrument, warn};

use super::content::{ContentInterpreter, decode_fallback, number};
use crate::traits::FragmentSource;

/// US Letter in points, used when a page tree carries no `/MediaBox`.
const DEFAULT_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// Parent-chain depth after which `/MediaBox` lookup gives up.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Reads existing PDF files and exposes their text fragments.
///
/// Wraps `lopdf::Document`. Pages are 1-indexed.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            LeseflussError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            LeseflussError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Width and height of `page` in points, from its (possibly inherited)
    /// `/MediaBox`.
    pub fn page_size(&self, page: usize) -> Result<(f64, f64)> {
        let page_id = self.page_id(page)?;
        let mut node = self.dictionary(page_id)?;

        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(media_box) = node.get(b"MediaBox") {
                return self.media_box_size(media_box);
            }
            let Ok(parent) = node.get(b"Parent").and_then(Object::as_reference) else {
                break;
            };
            node = self.dictionary(parent)?;
        }

        debug!(page, "No /MediaBox in page tree, assuming US Letter");
        Ok(DEFAULT_PAGE_SIZE)
    }

    // -- Extraction -----------------------------------------------------------

    /// Every text fragment of `page` (1-indexed), in content-stream order.
    #[instrument(skip(self))]
    pub fn page_fragments(&self, page: usize) -> Result<Vec<TextFragment>> {
        let page_id = self.page_id(page)?;

        let data = self.document.get_page_content(page_id).map_err(|err| {
            LeseflussError::PdfError(format!("cannot read content of page {}: {}", page, err))
        })?;
        let content = Content::decode(&data).map_err(|err| {
            LeseflussError::PdfError(format!("cannot parse content of page {}: {}", page, err))
        })?;

        let fonts = self.document.get_page_fonts(page_id).unwrap_or_else(|err| {
            warn!(page, %err, "Cannot read page fonts, decoding as Latin-1");
            BTreeMap::new()
        });

        let decode = |font: &[u8], bytes: &[u8]| -> String {
            fonts
                .get(font)
                .and_then(|dict| self.decode_with_font(dict, bytes))
                .unwrap_or_else(|| decode_fallback(bytes))
        };
        let fragments = ContentInterpreter::new(decode).run(&content.operations);

        debug!(
            page,
            operations = content.operations.len(),
            fragments = fragments.len(),
            "Page fragments extracted"
        );
        Ok(fragments)
    }

    // -- Helpers --------------------------------------------------------------

    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        let out_of_range = || LeseflussError::PageOutOfRange {
            page,
            page_count: pages.len(),
        };
        let number = u32::try_from(page).map_err(|_| out_of_range())?;
        pages.get(&number).copied().ok_or_else(out_of_range)
    }

    fn dictionary(&self, id: ObjectId) -> Result<&Dictionary> {
        self.document
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|err| {
                LeseflussError::PdfError(format!("cannot read object {:?}: {}", id, err))
            })
    }

    fn media_box_size(&self, media_box: &Object) -> Result<(f64, f64)> {
        let resolved = match media_box {
            Object::Reference(id) => self.document.get_object(*id).map_err(|err| {
                LeseflussError::PdfError(format!("cannot resolve /MediaBox: {}", err))
            })?,
            other => other,
        };
        let corners: Vec<f64> = resolved
            .as_array()
            .map(|items| items.iter().filter_map(number).collect())
            .unwrap_or_default();

        match corners.as_slice() {
            [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
            _ => Err(LeseflussError::PdfError(format!(
                "malformed /MediaBox: {:?}",
                resolved
            ))),
        }
    }

    fn decode_with_font(&self, font: &Dictionary, bytes: &[u8]) -> Option<String> {
        let encoding = font.get_font_encoding(&self.document).ok()?;
        Document::decode_text(&encoding, bytes).ok()
    }
}

impl FragmentSource for PdfReader {
    fn page_count(&self) -> usize {
        PdfReader::page_count(self)
    }

    fn fragments(&self, page: usize) -> impl Future<Output = Result<Vec<TextFragment>>> + Send {
        // Parsing is synchronous; the future only carries the finished result.
        let result = self.page_fragments(page);
        async move { result }
    }
}
