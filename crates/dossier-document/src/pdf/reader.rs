// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspector — re-open rendered output with `lopdf` to confirm it parses
// and to read back its page structure.

use lopdf::{Document, Object};
use dossier_core::error::RenderError;
use tracing::{debug, instrument};

/// Read-only view of a finished PDF.
pub struct PdfInspector {
    document: Document,
}

impl PdfInspector {
    /// Parse PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, RenderError> {
        let document = Document::load_mem(data).map_err(|err| {
            RenderError::Serialization(format!("output does not parse as PDF: {err}"))
        })?;

        debug!(pages = document.get_pages().len(), "PDF re-opened for inspection");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// MediaBox width and height of a page (1-indexed), if present on the page.
    pub fn page_size(&self, page_number: u32) -> Option<(f32, f32)> {
        let pages = self.document.get_pages();
        let page_id = pages.get(&page_number)?;
        let dict = match self.document.get_object(*page_id).ok()? {
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        let media_box = dict.get(b"MediaBox").ok()?.as_array().ok()?;
        let coords: Vec<f32> = media_box
            .iter()
            .filter_map(|value| value.as_float().ok())
            .collect();
        match coords.as_slice() {
            [x0, y0, x1, y1] => Some((x1 - x0, y1 - y0)),
            _ => None,
        }
    }
}
