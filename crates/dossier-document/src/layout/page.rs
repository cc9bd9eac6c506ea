// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-render layout state: the page sequence, each page's vertical cursor,
// and the positioned draw operations that the serializer later turns into
// PDF content streams. Owned by exactly one render call.

use std::sync::Arc;

use dossier_core::FontFamily;
use dossier_core::config::PageGeometry;
use tracing::debug;

use crate::image::RasterImage;

/// A slice of a line drawn with one font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRun {
    pub family: FontFamily,
    pub text: String,
    /// Measured advance at the line's size.
    pub width: f32,
}

/// One committed line. `y` is the baseline, measured from the page bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub runs: Vec<FontRun>,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn width(&self) -> f32 {
        self.runs.iter().map(|run| run.width).sum()
    }
}

/// An image placed on a page; (`x`, `y`) is the lower-left corner.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub raster: Arc<RasterImage>,
}

#[derive(Debug, Clone)]
pub enum DrawOp {
    Text(TextLine),
    Image(PlacedImage),
}

/// Content that was degraded instead of failing the render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderWarning {
    /// The report image could not be decoded; a notice was drawn instead.
    ImageSkipped { reason: String },
    /// A line held characters its font cannot draw; a placeholder replaced it.
    LineSubstituted {
        page: usize,
        family: FontFamily,
        character: char,
    },
}

/// One page and its vertical cursor.
#[derive(Debug, Clone)]
pub struct PageState {
    index: usize,
    cursor_y: f32,
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
}

impl PageState {
    fn new(index: usize, geometry: &PageGeometry) -> Self {
        Self {
            index,
            cursor_y: geometry.top(),
            width: geometry.width,
            height: geometry.height,
            ops: Vec::new(),
        }
    }

    /// Zero-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(line) => Some(line),
            DrawOp::Image(_) => None,
        })
    }

    /// Move the cursor down. The cursor never moves up within a page.
    pub fn advance(&mut self, dy: f32) {
        debug_assert!(dy >= 0.0, "cursor must only move down");
        self.cursor_y -= dy.max(0.0);
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

/// The document being laid out. Never empty: the first page exists from
/// construction, and pages are only ever appended.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    geometry: PageGeometry,
    pages: Vec<PageState>,
    warnings: Vec<RenderWarning>,
}

impl LaidOutDocument {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![PageState::new(0, &geometry)],
            warnings: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn pages(&self) -> &[PageState] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The page currently receiving content (always the last one).
    pub fn current(&self) -> &PageState {
        // Invariant: `pages` is never empty.
        &self.pages[self.pages.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut PageState {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Append a fresh page with its cursor at the top margin.
    pub fn new_page(&mut self) -> &mut PageState {
        let index = self.pages.len();
        debug!(page = index + 1, "Allocating new page");
        self.pages.push(PageState::new(index, &self.geometry));
        self.current_mut()
    }

    /// Whether the cursor has crossed the bottom margin.
    pub fn is_past_bottom(&self) -> bool {
        self.current().cursor_y < self.geometry.margin_bottom
    }

    /// Break the page if a block of `height` would cross the bottom margin.
    /// A block taller than a whole page is placed on a fresh page regardless.
    pub fn ensure_room(&mut self, height: f32) {
        let page = self.current();
        let fresh = page.ops.is_empty() && page.cursor_y >= self.geometry.top();
        if !fresh && page.cursor_y - height < self.geometry.margin_bottom {
            self.new_page();
        }
    }

    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    pub fn warn(&mut self, warning: RenderWarning) {
        self.warnings.push(warning);
    }

    pub fn into_parts(self) -> (Vec<PageState>, Vec<RenderWarning>) {
        (self.pages, self.warnings)
    }
}
