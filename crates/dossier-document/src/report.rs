// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report renderer — assemble a report record into a paginated PDF.
//
// Sections are laid out in a fixed order: title, optional image, metadata,
// summary, key findings, recommendations, full narrative, and finally a
// footer pinned near the bottom of the last page. Each render owns its own
// layout state; only the font provider is shared between renders.

use std::fmt::Write as _;
use std::sync::Arc;

use dossier_core::config::RenderConfig;
use dossier_core::error::Result;
use dossier_core::{ReportImage, ReportRecord};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use crate::font::FontProvider;
use crate::image::ImageProcessor;
use crate::layout::{
    DrawOp, LaidOutDocument, LineBreaker, PlacedImage, RenderWarning, TextStyle,
};
use crate::pdf::PdfSerializer;
use crate::text::normalize;

const BULLET: &str = "• ";

/// A finished render, ready to hand to the caller.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    /// Suggested download name derived from the report title.
    pub filename: String,
    pub page_count: usize,
    /// Content that was degraded rather than failing the render.
    pub warnings: Vec<RenderWarning>,
}

impl RenderedReport {
    /// SHA-256 of the PDF bytes, hex-encoded, for audit entries.
    pub fn sha256_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

/// Renders [`ReportRecord`]s. Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct ReportRenderer {
    config: Arc<RenderConfig>,
    fonts: Arc<dyn FontProvider>,
}

impl ReportRenderer {
    pub fn new(config: RenderConfig, fonts: Arc<dyn FontProvider>) -> Self {
        Self {
            config: Arc::new(config),
            fonts,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lay out and serialize `record`.
    ///
    /// Fails only when a font cannot be loaded or the PDF cannot be written;
    /// a bad image or an undrawable line degrades to a placeholder instead.
    #[instrument(skip(self, record), fields(title = %record.title))]
    pub fn render(&self, record: &ReportRecord) -> Result<RenderedReport> {
        let layout = self.layout(record)?;
        let bytes = PdfSerializer::new(self.fonts.as_ref(), record.title.as_str())
            .serialize(&layout)?;

        let page_count = layout.page_count();
        let (_, warnings) = layout.into_parts();

        info!(
            pages = page_count,
            bytes = bytes.len(),
            warnings = warnings.len(),
            "Report rendered"
        );

        Ok(RenderedReport {
            bytes,
            filename: filename_for(&record.title),
            page_count,
            warnings,
        })
    }

    /// Lay out `record` without serializing it.
    pub fn layout(&self, record: &ReportRecord) -> Result<LaidOutDocument> {
        let mut section = Section {
            config: &self.config,
            breaker: LineBreaker::new(self.fonts.as_ref(), &self.config),
            doc: LaidOutDocument::new(self.config.page),
        };
        let labels = &self.config.labels;

        section.title(&record.title)?;

        if let Some(image) = &record.image {
            section.image(image)?;
        }

        section.metadata(&[
            (labels.meta_title.as_str(), normalize(&record.title, false)),
            (labels.meta_report_type.as_str(), normalize(&record.report_type, false)),
            (labels.meta_date.as_str(), self.format_date(record)),
            (labels.meta_risk_level.as_str(), normalize(&record.risk_level, false)),
        ])?;

        if let Some(summary) = record.summary_text() {
            section.heading(&labels.summary)?;
            section.body(&normalize(summary, true))?;
        }

        if !record.findings.is_empty() {
            section.heading(&labels.findings)?;
            section.bullets(&record.findings)?;
        }

        if !record.recommendations.is_empty() {
            section.heading(&labels.recommendations)?;
            section.bullets(&record.recommendations)?;
        }

        section.heading(&labels.full_report)?;
        section.body(&normalize(&record.full_text, true))?;

        section.footer()?;
        Ok(section.doc)
    }

    fn format_date(&self, record: &ReportRecord) -> String {
        let mut date = String::new();
        // An invalid pattern surfaces as fmt::Error rather than text.
        if write!(date, "{}", record.created_at.format(&self.config.labels.date_format)).is_err() {
            return record.created_at.to_rfc3339();
        }
        date
    }
}

/// Suggested filename: the slugified title plus `-report.pdf`.
pub fn filename_for(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        "report.pdf".to_owned()
    } else {
        format!("{slug}-report.pdf")
    }
}

/// Per-render cursor over the document being assembled.
struct Section<'a> {
    config: &'a RenderConfig,
    breaker: LineBreaker<'a>,
    doc: LaidOutDocument,
}

impl Section<'_> {
    fn left(&self) -> f32 {
        self.config.page.margin_left
    }

    fn width(&self) -> f32 {
        self.config.page.content_width()
    }

    fn spacing(&mut self) {
        let gap = self.config.typography.section_spacing;
        self.doc.current_mut().advance(gap);
    }

    fn text(&mut self, text: &str, style: TextStyle) -> Result<()> {
        let (x, width) = (self.left(), self.width());
        self.breaker.layout(&mut self.doc, text, style, x, width)?;
        Ok(())
    }

    fn title(&mut self, title: &str) -> Result<()> {
        let style = TextStyle::bold(self.config.typography.title_size);
        self.text(&normalize(title, false), style)?;
        self.spacing();
        Ok(())
    }

    fn heading(&mut self, label: &str) -> Result<()> {
        self.text(label, TextStyle::bold(self.config.typography.heading_size))
    }

    fn body(&mut self, text: &str) -> Result<()> {
        self.text(text, TextStyle::regular(self.config.typography.body_size))?;
        self.spacing();
        Ok(())
    }

    fn metadata(&mut self, entries: &[(&str, String)]) -> Result<()> {
        let style = TextStyle::regular(self.config.typography.body_size);
        for (label, value) in entries {
            self.text(&format!("{label}: {value}"), style)?;
        }
        self.spacing();
        Ok(())
    }

    fn bullets(&mut self, items: &[String]) -> Result<()> {
        let style = TextStyle::regular(self.config.typography.body_size);
        for item in items {
            let text = normalize(item, true);
            let text = text.strip_prefix(BULLET).unwrap_or(&text).trim_start();
            if text.is_empty() {
                continue;
            }
            self.text(&format!("{BULLET}{text}"), style)?;
        }
        self.spacing();
        Ok(())
    }

    /// Draw the image left-aligned at the cursor, or a notice if it does not decode.
    fn image(&mut self, image: &ReportImage) -> Result<()> {
        let processor = match ImageProcessor::decode(&image.data, &image.mime_type) {
            Ok(processor) => processor,
            Err(err) => {
                warn!(filename = %image.filename, error = %err, "Report image skipped");
                self.doc.warn(RenderWarning::ImageSkipped {
                    reason: err.to_string(),
                });
                let notice = self.config.labels.image_unavailable.clone();
                return self.body(&notice);
            }
        };

        let (box_width, box_height) = self.config.image_box;
        let (width, height) = processor.fit_within(box_width, box_height);
        self.doc.ensure_room(height);

        let x = self.left();
        let page = self.doc.current_mut();
        let y = page.cursor_y() - height;
        page.push(DrawOp::Image(PlacedImage {
            x,
            y,
            width,
            height,
            raster: Arc::new(processor.into_raster()),
        }));
        page.advance(height);
        self.spacing();
        Ok(())
    }

    /// The footer sits at a fixed baseline on the last page, whatever the cursor.
    fn footer(&mut self) -> Result<()> {
        let style = TextStyle::regular(self.config.typography.footer_size);
        let (x, y) = (self.left(), self.config.footer_offset);
        let footer = self.config.labels.footer.clone();
        self.breaker.draw_fixed(&mut self.doc, &footer, style, x, y)
    }
}
