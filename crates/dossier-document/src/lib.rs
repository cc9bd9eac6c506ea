// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// dossier-document — Report rendering for Dossier.
//
// Provides the process-wide font cache, script classification and text
// normalisation, greedy line breaking with pagination, image fitting, and
// PDF serialization of finished reports.

pub mod font;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod report;
pub mod text;

#[cfg(test)]
mod testing;

// Re-export the primary types so callers can use `dossier_document::ReportRenderer` etc.
pub use font::{ConfiguredFontFetcher, FontCache, FontFetcher, FontProvider, FontResource};
pub use crate::image::{ImageProcessor, RasterImage};
pub use layout::{LaidOutDocument, LineBreaker, RenderWarning, TextStyle};
pub use pdf::reader::PdfInspector;
pub use pdf::writer::PdfSerializer;
pub use report::{RenderedReport, ReportRenderer, filename_for};
pub use text::{classify, normalize, segment_runs};
