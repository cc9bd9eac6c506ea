// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end rendering through the public API, using the standard faces so
// no font bundle or network access is needed.

use std::sync::Arc;
use std::thread;

use dossier_core::{
    FontFamily, FontSource, FontSources, RenderConfig, RenderError, ReportImage, ReportRecord,
};
use dossier_document::layout::TextLine;
use dossier_document::{
    ConfiguredFontFetcher, FontCache, LaidOutDocument, PdfInspector, RenderWarning,
    ReportRenderer,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

fn standard_renderer() -> (ReportRenderer, Arc<FontCache>) {
    let cache = Arc::new(FontCache::new(ConfiguredFontFetcher::new(
        FontSources::standard(),
    )));
    (ReportRenderer::new(RenderConfig::a4(), cache.clone()), cache)
}

fn lines(doc: &LaidOutDocument) -> Vec<(usize, TextLine)> {
    doc.pages()
        .iter()
        .flat_map(|page| page.text_lines().map(|line| (page.index(), line.clone())))
        .collect()
}

fn footer_lines(doc: &LaidOutDocument) -> Vec<(usize, TextLine)> {
    let footer = RenderConfig::a4().labels.footer;
    lines(doc)
        .into_iter()
        .filter(|(_, line)| line.text() == footer)
        .collect()
}

fn narrative(words: usize) -> String {
    const VOCABULARY: [&str; 6] = ["blood", "pressure", "remained", "within", "normal", "limits"];
    (0..words)
        .map(|i| VOCABULARY[i % VOCABULARY.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn short_summary_renders_one_page_with_footer() {
    let (renderer, _) = standard_renderer();
    let mut record = ReportRecord::new("Checkup", "General");
    record.summary = Some("Patient shows mild elevation.".into());

    let rendered = renderer.render(&record).unwrap();
    assert_eq!(rendered.page_count, 1);
    assert!(rendered.warnings.is_empty());

    let inspector = PdfInspector::from_bytes(&rendered.bytes).unwrap();
    assert_eq!(inspector.page_count(), 1);

    let doc = renderer.layout(&record).unwrap();
    let footers = footer_lines(&doc);
    assert_eq!(footers.len(), 1);
    assert_eq!(footers[0].0, 0);
}

#[test]
fn long_narrative_overflows_and_pins_the_footer() {
    let (renderer, _) = standard_renderer();
    let mut record = ReportRecord::new("Longitudinal study", "Research");
    record.full_text = narrative(5_000);

    let rendered = renderer.render(&record).unwrap();
    assert!(rendered.page_count > 1);
    let inspector = PdfInspector::from_bytes(&rendered.bytes).unwrap();
    assert_eq!(inspector.page_count(), rendered.page_count);
    for page in 1..=rendered.page_count as u32 {
        let (width, height) = inspector.page_size(page).expect("page has a MediaBox");
        assert!((width - 595.28).abs() < 0.5, "page {page} width {width}");
        assert!((height - 841.89).abs() < 0.5, "page {page} height {height}");
    }

    let doc = renderer.layout(&record).unwrap();
    let config = RenderConfig::a4();
    let last = doc.page_count() - 1;

    let footers = footer_lines(&doc);
    assert_eq!(footers.len(), 1);
    assert_eq!(footers[0].0, last);
    assert_eq!(footers[0].1.y, config.footer_offset);

    for (_, line) in lines(&doc) {
        if line.size == config.typography.body_size {
            assert!(line.width() <= config.page.content_width());
        }
    }

    // Within each page, flowing lines move strictly downward.
    for page in doc.pages() {
        let ys: Vec<f32> = page
            .text_lines()
            .filter(|line| line.y != config.footer_offset)
            .map(|line| line.y)
            .collect();
        assert!(ys.windows(2).all(|pair| pair[1] < pair[0]), "page {}", page.index());
        assert!(ys.iter().all(|y| *y >= config.page.margin_bottom - config.line_height(20.0)));
    }
}

#[test]
fn cjk_run_resolves_the_cjk_family() {
    // The standard faces cannot draw ideographs, so the CJK run surfaces as a
    // substituted line attributed to the CJK family; the Latin text of the
    // same report still renders.
    let (renderer, _) = standard_renderer();
    let mut record = ReportRecord::new("Mixed", "Translation");
    record.full_text = "正常 (normal)".into();
    record.summary = Some("Plain summary.".into());

    let rendered = renderer.render(&record).unwrap();
    assert_eq!(rendered.page_count, 1);
    assert!(rendered.warnings.iter().any(|warning| matches!(
        warning,
        RenderWarning::LineSubstituted {
            family: FontFamily::Cjk,
            character: '正',
            page: 1,
        }
    )));

    let texts: Vec<String> = lines(&renderer.layout(&record).unwrap())
        .into_iter()
        .map(|(_, line)| line.text())
        .collect();
    assert!(texts.contains(&"Plain summary.".to_owned()));
    assert!(texts.contains(&RenderConfig::a4().labels.unrenderable_line));
}

#[test]
fn corrupt_png_is_replaced_by_a_notice() {
    let (renderer, _) = standard_renderer();
    let mut record = ReportRecord::new("Imaging", "Radiology");
    record.image = Some(ReportImage {
        data: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0],
        mime_type: "image/png".into(),
        filename: "xray.png".into(),
    });
    record.findings = vec!["No fracture".into()];

    let rendered = renderer.render(&record).unwrap();
    assert_eq!(PdfInspector::from_bytes(&rendered.bytes).unwrap().page_count(), 1);
    assert!(matches!(
        rendered.warnings.as_slice(),
        [RenderWarning::ImageSkipped { .. }]
    ));

    let texts: Vec<String> = lines(&renderer.layout(&record).unwrap())
        .into_iter()
        .map(|(_, line)| line.text())
        .collect();
    assert!(texts.contains(&RenderConfig::a4().labels.image_unavailable));
    assert!(texts.contains(&"• No fracture".to_owned()));
}

#[test]
fn valid_image_is_embedded() {
    let (renderer, _) = standard_renderer();
    let img = RgbImage::from_pixel(64, 48, Rgb([0, 128, 255]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();

    let mut record = ReportRecord::new("Photo", "Dermatology");
    record.image = Some(ReportImage {
        data: buffer.into_inner(),
        mime_type: "image/jpeg".into(),
        filename: "photo.jpg".into(),
    });

    let rendered = renderer.render(&record).unwrap();
    assert!(rendered.warnings.is_empty());
    assert_eq!(rendered.filename, "photo-report.pdf");
}

#[test]
fn concurrent_renders_share_one_cache() {
    let (renderer, cache) = standard_renderer();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = renderer.clone();
            thread::spawn(move || {
                let mut record = ReportRecord::new(format!("Report {i}"), "Batch");
                record.full_text = narrative(300 * (i + 1));
                renderer.render(&record).map(|rendered| rendered.page_count)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().unwrap() >= 1);
    }
    assert!(cache.is_loaded(FontFamily::Body));
    assert!(cache.is_loaded(FontFamily::BodyBold));
}

#[test]
fn unreachable_font_aborts_the_render() {
    let dir = tempfile::tempdir().unwrap();
    let sources = FontSources {
        body: FontSource::Bundled {
            local_path: "missing/NotoSans-Regular.ttf".into(),
            remote_url: None,
        },
        ..FontSources::standard()
    };
    let cache = FontCache::new(ConfiguredFontFetcher::new(sources).with_base_dir(dir.path()));
    let renderer = ReportRenderer::new(RenderConfig::a4(), Arc::new(cache));

    let err = renderer
        .render(&ReportRecord::new("No fonts", "General"))
        .unwrap_err();
    assert!(matches!(err, RenderError::MissingFont(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn json_configuration_changes_labels() {
    let config = RenderConfig::from_json(
        r#"{ "labels": { "footer": "Confidential", "full_report": "Narrative" } }"#,
    )
    .unwrap();
    let cache = Arc::new(FontCache::new(ConfiguredFontFetcher::new(
        FontSources::standard(),
    )));
    let renderer = ReportRenderer::new(config, cache);

    let doc = renderer.layout(&ReportRecord::new("Configured", "General")).unwrap();
    let texts: Vec<String> = lines(&doc).into_iter().map(|(_, line)| line.text()).collect();
    assert!(texts.contains(&"Narrative".to_owned()));
    assert_eq!(texts.last().map(String::as_str), Some("Confidential"));
    // Partial labels keep their defaults.
    assert!(texts.iter().any(|text| text.starts_with("Risk Level:")));
}
