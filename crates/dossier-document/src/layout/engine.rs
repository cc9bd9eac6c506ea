// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Greedy word-wrap with page overflow.
//
// Words are appended to a line buffer until the candidate line would exceed
// the available width; the buffer is then committed as a drawn line and the
// cursor moves down by `size + line_gap`. Before each commit, a cursor below
// the bottom margin allocates a new page, so paragraphs break mid-way.
// Every line is split into script runs and each run is measured and drawn
// with the family for its script.

use std::sync::Arc;

use dossier_core::config::RenderConfig;
use dossier_core::error::{RenderError, Result};
use dossier_core::{FontFamily, ScriptClass};
use tracing::warn;

use super::page::{DrawOp, FontRun, LaidOutDocument, RenderWarning, TextLine};
use crate::font::{FontProvider, FontResource};
use crate::text::segment_runs;

/// Size and weight of a block of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

/// Lays text out into a [`LaidOutDocument`].
pub struct LineBreaker<'a> {
    fonts: &'a dyn FontProvider,
    line_gap: f32,
    placeholder: &'a str,
}

impl<'a> LineBreaker<'a> {
    pub fn new(fonts: &'a dyn FontProvider, config: &'a RenderConfig) -> Self {
        Self {
            fonts,
            line_gap: config.typography.line_gap,
            placeholder: &config.labels.unrenderable_line,
        }
    }

    fn font(&self, family: FontFamily) -> Result<Arc<FontResource>> {
        Ok(self.fonts.font(family)?)
    }

    /// Split `text` into script runs and measure each with its family.
    pub fn shape(&self, text: &str, style: TextStyle) -> Result<Vec<FontRun>> {
        segment_runs(text)
            .into_iter()
            .map(|run| {
                let family = FontFamily::for_script(run.script, style.bold);
                let font = self.font(family)?;
                Ok(FontRun {
                    family,
                    text: run.text.to_owned(),
                    width: font.text_width(run.text, style.size),
                })
            })
            .collect()
    }

    /// Rendered width of `text`, run by run.
    pub fn measure(&self, text: &str, style: TextStyle) -> Result<f32> {
        Ok(self.shape(text, style)?.iter().map(|run| run.width).sum())
    }

    /// Word-wrap `text` into lines no wider than `max_width` starting at the
    /// current page's cursor, breaking pages as needed. Returns the cursor
    /// position after the last line.
    ///
    /// A single word wider than `max_width` is drawn unsplit on its own line.
    pub fn layout(
        &self,
        doc: &mut LaidOutDocument,
        text: &str,
        style: TextStyle,
        x: f32,
        max_width: f32,
    ) -> Result<f32> {
        let mut buffer = String::new();

        for word in text.split_whitespace() {
            let candidate = format!("{buffer}{word} ");
            if !buffer.is_empty() && self.measure(&candidate, style)? > max_width {
                self.commit(doc, &buffer, style, x, max_width)?;
                buffer.clear();
                buffer.push_str(word);
                buffer.push(' ');
            } else {
                buffer = candidate;
            }
        }

        if !buffer.is_empty() {
            self.commit(doc, &buffer, style, x, max_width)?;
        }

        Ok(doc.current().cursor_y())
    }

    /// Draw one finished line at the cursor and advance past it. A line its
    /// fonts cannot draw becomes the placeholder, wrapped to `max_width`.
    fn commit(
        &self,
        doc: &mut LaidOutDocument,
        line: &str,
        style: TextStyle,
        x: f32,
        max_width: f32,
    ) -> Result<()> {
        if doc.is_past_bottom() {
            doc.new_page();
        }

        match self.covered_runs(doc, line.trim_end(), style)? {
            Some(runs) => self.push_line(doc, runs, style, x),
            None => {
                for (i, runs) in self.placeholder_lines(style, max_width)?.into_iter().enumerate() {
                    if i > 0 && doc.is_past_bottom() {
                        doc.new_page();
                    }
                    self.push_line(doc, runs, style, x);
                }
            }
        }
        Ok(())
    }

    fn push_line(&self, doc: &mut LaidOutDocument, runs: Vec<FontRun>, style: TextStyle, x: f32) {
        let page = doc.current_mut();
        let y = page.cursor_y();
        page.push(DrawOp::Text(TextLine {
            x,
            y,
            size: style.size,
            runs,
        }));
        page.advance(style.size + self.line_gap);
    }

    /// Draw `text` on the last page at a fixed baseline, leaving the cursor alone.
    pub fn draw_fixed(
        &self,
        doc: &mut LaidOutDocument,
        text: &str,
        style: TextStyle,
        x: f32,
        y: f32,
    ) -> Result<()> {
        let runs = match self.covered_runs(doc, text, style)? {
            Some(runs) => runs,
            None => vec![self.placeholder_run(self.placeholder, style)?],
        };
        doc.current_mut().push(DrawOp::Text(TextLine {
            x,
            y,
            size: style.size,
            runs,
        }));
        Ok(())
    }

    /// Shape `text`, or record a substitution and return `None` if any run
    /// holds a character its font cannot draw.
    fn covered_runs(
        &self,
        doc: &mut LaidOutDocument,
        text: &str,
        style: TextStyle,
    ) -> Result<Option<Vec<FontRun>>> {
        let runs = self.shape(text, style)?;
        match self.check_coverage(&runs) {
            Ok(()) => Ok(Some(runs)),
            Err(RenderError::UnrenderableGlyph { family, detail }) => {
                let page = doc.current().index() + 1;
                warn!(page, %family, %detail, "Substituting unrenderable line");
                let character = detail.chars().next().unwrap_or('\u{FFFD}');
                doc.warn(RenderWarning::LineSubstituted {
                    page,
                    family,
                    character,
                });
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }

    fn check_coverage(&self, runs: &[FontRun]) -> Result<()> {
        for run in runs {
            let font = self.font(run.family)?;
            if let Some(c) = font.first_uncovered(&run.text) {
                return Err(RenderError::UnrenderableGlyph {
                    family: run.family,
                    detail: c.to_string(),
                });
            }
        }
        Ok(())
    }

    /// The placeholder greedily wrapped to `max_width`, one body-family run
    /// per line. Placeholder text is drawn without a coverage check.
    fn placeholder_lines(&self, style: TextStyle, max_width: f32) -> Result<Vec<Vec<FontRun>>> {
        let family = FontFamily::for_script(ScriptClass::Latin, style.bold);
        let font = self.font(family)?;
        let mut lines = Vec::new();
        let mut buffer = String::new();

        for word in self.placeholder.split_whitespace() {
            let candidate = if buffer.is_empty() {
                word.to_owned()
            } else {
                format!("{buffer} {word}")
            };
            if !buffer.is_empty() && font.text_width(&candidate, style.size) > max_width {
                lines.push(vec![self.placeholder_run(&buffer, style)?]);
                buffer = word.to_owned();
            } else {
                buffer = candidate;
            }
        }
        if !buffer.is_empty() {
            lines.push(vec![self.placeholder_run(&buffer, style)?]);
        }
        Ok(lines)
    }

    /// `text` as a single run in the body family.
    fn placeholder_run(&self, text: &str, style: TextStyle) -> Result<FontRun> {
        let family = FontFamily::for_script(ScriptClass::Latin, style.bold);
        let font = self.font(family)?;
        Ok(FontRun {
            family,
            text: text.to_owned(),
            width: font.text_width(text, style.size),
        })
    }
}
