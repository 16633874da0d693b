// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `lesefluss fragments` — raw positioned fragments as JSON, in content-stream
// order.

use std::path::Path;

use lesefluss_core::error::Result;
use lesefluss_document::PdfReader;
use serde_json::{Value, json};

use crate::page_range::resolve_pages;

pub fn run(file: &Path, pages: Option<&str>) -> Result<()> {
    let dump = collect(file, pages)?;
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

/// `[{ "page": n, "fragments": [{ "content", "x", "y", "transform" }] }]`
pub fn collect(file: &Path, pages: Option<&str>) -> Result<Value> {
    let reader = PdfReader::open(file)?;
    let selected = resolve_pages(pages, reader.page_count())?;

    let mut out = Vec::with_capacity(selected.len());
    for page in selected {
        let fragments: Vec<Value> = reader
            .page_fragments(page)?
            .iter()
            .map(|fragment| {
                json!({
                    "content": fragment.content,
                    "x": fragment.offset_x(),
                    "y": fragment.offset_y(),
                    "transform": fragment.transform,
                })
            })
            .collect();
        out.push(json!({ "page": page, "fragments": fragments }));
    }
    Ok(Value::Array(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_cmd::tests::write_pdf;

    #[test]
    fn dump_lists_fragments_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), &[&[("a", 10, 20), ("b", 30, 20)], &[("c", 5, 5)]]);

        let dump = collect(&path, Some("1")).unwrap();
        let pages = dump.as_array().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["page"], 1);

        let fragments = pages[0]["fragments"].as_array().unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0]["content"], "a");
        assert_eq!(fragments[0]["x"], 10.0);
        assert_eq!(fragments[1]["y"], 20.0);
        assert_eq!(
            fragments[1]["transform"],
            json!([1.0, 0.0, 0.0, 1.0, 30.0, 20.0])
        );
    }
}
