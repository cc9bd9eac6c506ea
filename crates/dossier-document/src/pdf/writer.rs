// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF serializer — turn a laid-out document into PDF bytes using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Fonts are registered lazily, only for families that
// some drawn run actually uses.

use std::collections::HashMap;
use std::sync::Arc;

use dossier_core::error::{RenderError, Result};
use dossier_core::{FontFamily, FontLoadError, StandardFace};
use printpdf::font::ParsedFont;
use printpdf::{
    BuiltinFont, FontId, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, TextItem, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use super::reader::PdfInspector;
use crate::font::{FontFace, FontProvider};
use crate::image::RasterImage;
use crate::layout::{DrawOp, LaidOutDocument, PlacedImage, TextLine};

/// A font registered with the document being written.
#[derive(Clone)]
enum PdfFont {
    Embedded(FontId),
    Builtin(BuiltinFont),
}

/// Serializes [`LaidOutDocument`]s with the faces supplied by a [`FontProvider`].
pub struct PdfSerializer<'a> {
    fonts: &'a dyn FontProvider,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl<'a> PdfSerializer<'a> {
    pub fn new(fonts: &'a dyn FontProvider, title: impl Into<String>) -> Self {
        Self {
            fonts,
            title: title.into(),
        }
    }

    /// Write every page of `layout`, in order, and confirm the output parses
    /// back with the same page count.
    #[instrument(skip(self, layout), fields(title = %self.title, pages = layout.page_count()))]
    pub fn serialize(&self, layout: &LaidOutDocument) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(&self.title);
        let mut registry = Registry::default();
        let mut pages: Vec<PdfPage> = Vec::with_capacity(layout.page_count());

        for page in layout.pages() {
            let mut ops: Vec<Op> = Vec::new();
            for op in page.ops() {
                match op {
                    DrawOp::Text(line) => {
                        self.write_line(&mut doc, &mut registry, line, &mut ops)?
                    }
                    DrawOp::Image(placed) => {
                        write_image(&mut doc, &mut registry, placed, &mut ops)
                    }
                }
            }
            pages.push(PdfPage::new(
                Pt(page.width()).into(),
                Pt(page.height()).into(),
                ops,
            ));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported save warnings");
        }

        let written = PdfInspector::from_bytes(&output)?.page_count();
        if written != layout.page_count() {
            return Err(RenderError::Serialization(format!(
                "laid out {} pages but wrote {written}",
                layout.page_count()
            )));
        }

        info!(
            pages = written,
            bytes = output.len(),
            fonts = registry.fonts.len(),
            images = registry.images.len(),
            "PDF serialized"
        );
        Ok(output)
    }

    fn write_line(
        &self,
        doc: &mut PdfDocument,
        registry: &mut Registry,
        line: &TextLine,
        ops: &mut Vec<Op>,
    ) -> Result<()> {
        let mut x = line.x;
        for run in &line.runs {
            if run.text.is_empty() {
                continue;
            }
            let font = self.font_for(doc, registry, run.family)?;
            let items = vec![TextItem::Text(run.text.clone())];

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(x),
                    y: Pt(line.y),
                },
            });
            match font {
                PdfFont::Embedded(font) => {
                    ops.push(Op::SetFontSize {
                        size: Pt(line.size),
                        font: font.clone(),
                    });
                    ops.push(Op::WriteText { items, font });
                }
                PdfFont::Builtin(font) => {
                    ops.push(Op::SetFontSizeBuiltinFont {
                        size: Pt(line.size),
                        font: font.clone(),
                    });
                    ops.push(Op::WriteTextBuiltinFont { items, font });
                }
            }
            ops.push(Op::EndTextSection);

            x += run.width;
        }
        Ok(())
    }

    /// Look up, or register on first use, the PDF font for `family`.
    fn font_for(
        &self,
        doc: &mut PdfDocument,
        registry: &mut Registry,
        family: FontFamily,
    ) -> Result<PdfFont> {
        if let Some(font) = registry.fonts.get(&family) {
            return Ok(font.clone());
        }

        let resource = self.fonts.font(family)?;
        let font = match resource.face() {
            FontFace::Standard(face) => PdfFont::Builtin(builtin(*face)),
            FontFace::Embedded(data) => {
                let mut warnings = Vec::new();
                let parsed = ParsedFont::from_bytes(data, 0, &mut warnings).ok_or_else(|| {
                    FontLoadError::Malformed {
                        family,
                        detail: "face rejected by the PDF font subsetter".into(),
                    }
                })?;
                PdfFont::Embedded(doc.add_font(&parsed))
            }
        };

        debug!(%family, origin = ?resource.origin(), "Font registered with document");
        registry.fonts.insert(family, font.clone());
        Ok(font)
    }
}

#[derive(Default)]
struct Registry {
    fonts: HashMap<FontFamily, PdfFont>,
    /// Keyed by raster address so one image drawn twice is embedded once.
    images: HashMap<usize, XObjectId>,
}

fn builtin(face: StandardFace) -> BuiltinFont {
    match face {
        StandardFace::Helvetica => BuiltinFont::Helvetica,
        StandardFace::HelveticaBold => BuiltinFont::HelveticaBold,
    }
}

fn write_image(
    doc: &mut PdfDocument,
    registry: &mut Registry,
    placed: &PlacedImage,
    ops: &mut Vec<Op>,
) {
    let raster: &RasterImage = &placed.raster;
    if raster.width == 0 || raster.height == 0 {
        warn!("Skipping empty raster");
        return;
    }

    let key = Arc::as_ptr(&placed.raster) as usize;
    let id = registry
        .images
        .entry(key)
        .or_insert_with(|| {
            let raw = RawImage {
                pixels: RawImageData::U8(raster.rgb.clone()),
                width: raster.width as usize,
                height: raster.height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            doc.add_image(&raw)
        })
        .clone();

    // At 72 dpi one pixel is one point, so the scale maps pixels to the box.
    ops.push(Op::UseXobject {
        id,
        transform: XObjectTransform {
            translate_x: Some(Pt(placed.x)),
            translate_y: Some(Pt(placed.y)),
            scale_x: Some(placed.width / raster.width as f32),
            scale_y: Some(placed.height / raster.height as f32),
            dpi: Some(72.0),
            rotate: None,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use dossier_core::config::PageGeometry;

    use crate::layout::FontRun;
    use crate::testing::StaticFonts;

    fn line(y: f32, text: &str) -> DrawOp {
        DrawOp::Text(TextLine {
            x: 50.0,
            y,
            size: 11.0,
            runs: vec![FontRun {
                family: FontFamily::Body,
                text: text.into(),
                width: 40.0,
            }],
        })
    }

    #[test]
    fn every_page_is_written() {
        let fonts = StaticFonts::standard();
        let mut layout = LaidOutDocument::new(PageGeometry::default());
        layout.current_mut().push(line(700.0, "first"));
        layout.new_page().push(line(700.0, "second"));
        layout.new_page();

        let bytes = PdfSerializer::new(&fonts, "Pages").serialize(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(PdfInspector::from_bytes(&bytes).unwrap().page_count(), 3);
    }

    #[test]
    fn images_are_embedded() {
        let fonts = StaticFonts::standard();
        let mut layout = LaidOutDocument::new(PageGeometry::default());
        let raster = Arc::new(RasterImage {
            width: 4,
            height: 2,
            rgb: vec![128; 4 * 2 * 3],
        });
        layout.current_mut().push(DrawOp::Image(PlacedImage {
            x: 50.0,
            y: 500.0,
            width: 300.0,
            height: 150.0,
            raster,
        }));

        let bytes = PdfSerializer::new(&fonts, "Image").serialize(&layout).unwrap();
        assert_eq!(PdfInspector::from_bytes(&bytes).unwrap().page_count(), 1);
    }

    #[test]
    fn missing_family_fails_serialization() {
        let fonts = StaticFonts::only(&[(FontFamily::BodyBold, StandardFace::HelveticaBold)]);
        let mut layout = LaidOutDocument::new(PageGeometry::default());
        layout.current_mut().push(line(700.0, "body"));

        let err = PdfSerializer::new(&fonts, "Missing")
            .serialize(&layout)
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingFont(_)));
    }
}
