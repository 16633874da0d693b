// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page selection strings such as "1,3-5".

use lesefluss_core::error::{LeseflussError, Result};

/// Parse a page range string like "1,3-5" into a sorted, de-duplicated list
/// of 1-indexed page numbers.
///
/// Page 0, reversed ranges, and pages beyond `page_count` are rejected.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_page(start)?, parse_page(end)?),
            None => {
                let page = parse_page(part)?;
                (page, page)
            }
        };

        if start > end {
            return Err(invalid(format!("range '{part}' runs backwards")));
        }
        if end > page_count {
            return Err(invalid(format!(
                "page {end} exceeds document page count ({page_count})"
            )));
        }
        pages.extend(start..=end);
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// Every page of a `page_count`-page document, or the parsed selection.
pub fn resolve_pages(input: Option<&str>, page_count: usize) -> Result<Vec<usize>> {
    match input {
        Some(range) => parse_page_range(range, page_count),
        None => Ok((1..=page_count).collect()),
    }
}

fn parse_page(raw: &str) -> Result<usize> {
    let raw = raw.trim();
    let page: usize = raw
        .parse()
        .map_err(|_| invalid(format!("invalid page number: '{raw}'")))?;
    if page == 0 {
        return Err(invalid("page 0 is invalid (pages start at 1)".to_string()));
    }
    Ok(page)
}

fn invalid(message: String) -> LeseflussError {
    LeseflussError::Config(format!("--pages: {message}"))
}
