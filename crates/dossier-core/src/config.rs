// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render configuration. Supplied by the embedding application; the renderer
// itself never reads the environment.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::FontFamily;

/// Page geometry in layout units (1/72 inch). Defaults to ISO A4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    /// Lines are never drawn below this baseline; crossing it breaks the page.
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_top: 50.0,
            margin_bottom: 100.0,
            margin_left: 50.0,
            margin_right: 50.0,
        }
    }
}

impl PageGeometry {
    /// Starting cursor of every fresh page.
    pub fn top(&self) -> f32 {
        self.height - self.margin_top
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

/// Point sizes and vertical rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub footer_size: f32,
    /// Added to the font size to get the line advance.
    pub line_gap: f32,
    /// Extra space after a section or block.
    pub section_spacing: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title_size: 20.0,
            heading_size: 14.0,
            body_size: 11.0,
            footer_size: 9.0,
            line_gap: 5.0,
            section_spacing: 10.0,
        }
    }
}

/// Fixed strings drawn by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub summary: String,
    pub findings: String,
    pub recommendations: String,
    pub full_report: String,
    pub meta_title: String,
    pub meta_report_type: String,
    pub meta_date: String,
    pub meta_risk_level: String,
    pub footer: String,
    pub image_unavailable: String,
    pub unrenderable_line: String,
    /// chrono `strftime` pattern for the creation date.
    pub date_format: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            summary: "Summary".into(),
            findings: "Key Findings".into(),
            recommendations: "Recommendations".into(),
            full_report: "Full Report".into(),
            meta_title: "Title".into(),
            meta_report_type: "Report Type".into(),
            meta_date: "Date".into(),
            meta_risk_level: "Risk Level".into(),
            footer: "Generated automatically. Not a substitute for professional advice.".into(),
            image_unavailable: "[Image could not be displayed]".into(),
            unrenderable_line: "[Text could not be rendered]".into(),
            date_format: "%Y-%m-%d %H:%M UTC".into(),
        }
    }
}

/// PDF base-14 faces that need no embedded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardFace {
    Helvetica,
    HelveticaBold,
}

/// Where one font family comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// Bundled file first, then the remote URL.
    Bundled {
        local_path: String,
        remote_url: Option<String>,
    },
    /// A standard face; Latin coverage only.
    Standard { face: StandardFace },
}

/// Per-family font sources plus the remote fetch timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSources {
    pub body: FontSource,
    pub body_bold: FontSource,
    pub cjk: FontSource,
    pub cjk_bold: FontSource,
    pub remote_timeout_secs: u64,
}

const NOTO_BASE: &str = "https://github.com/notofonts/notofonts.github.io/raw/main/fonts";
const NOTO_CJK_BASE: &str = "https://github.com/notofonts/noto-cjk/raw/main/Sans/OTF/SimplifiedChinese";

impl Default for FontSources {
    fn default() -> Self {
        Self {
            body: FontSource::Bundled {
                local_path: "assets/fonts/NotoSans-Regular.ttf".into(),
                remote_url: Some(format!("{NOTO_BASE}/NotoSans/hinted/ttf/NotoSans-Regular.ttf")),
            },
            body_bold: FontSource::Bundled {
                local_path: "assets/fonts/NotoSans-Bold.ttf".into(),
                remote_url: Some(format!("{NOTO_BASE}/NotoSans/hinted/ttf/NotoSans-Bold.ttf")),
            },
            cjk: FontSource::Bundled {
                local_path: "assets/fonts/NotoSansCJKsc-Regular.otf".into(),
                remote_url: Some(format!("{NOTO_CJK_BASE}/NotoSansCJKsc-Regular.otf")),
            },
            cjk_bold: FontSource::Bundled {
                local_path: "assets/fonts/NotoSansCJKsc-Bold.otf".into(),
                remote_url: Some(format!("{NOTO_CJK_BASE}/NotoSansCJKsc-Bold.otf")),
            },
            remote_timeout_secs: 10,
        }
    }
}

impl FontSources {
    /// Standard faces for every family. No I/O, Latin text only.
    pub fn standard() -> Self {
        let regular = FontSource::Standard {
            face: StandardFace::Helvetica,
        };
        let bold = FontSource::Standard {
            face: StandardFace::HelveticaBold,
        };
        Self {
            body: regular.clone(),
            body_bold: bold.clone(),
            cjk: regular,
            cjk_bold: bold,
            remote_timeout_secs: 10,
        }
    }

    pub fn source(&self, family: FontFamily) -> &FontSource {
        match family {
            FontFamily::Body => &self.body,
            FontFamily::BodyBold => &self.body_bold,
            FontFamily::Cjk => &self.cjk,
            FontFamily::CjkBold => &self.cjk_bold,
        }
    }
}

/// Everything the renderer needs besides the report and the fonts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub page: PageGeometry,
    pub typography: Typography,
    pub labels: Labels,
    /// Bounding box (width, height) the report image is fitted into.
    pub image_box: (f32, f32),
    /// Baseline of the footer line, measured from the bottom edge.
    pub footer_offset: f32,
}

impl RenderConfig {
    /// Parse a (possibly partial) JSON configuration; absent keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn line_height(&self, size: f32) -> f32 {
        size + self.typography.line_gap
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::a4()
    }
}

impl RenderConfig {
    /// A4 page, 300x200 image box, footer 40 units above the bottom edge.
    pub fn a4() -> Self {
        Self {
            page: PageGeometry::default(),
            typography: Typography::default(),
            labels: Labels::default(),
            image_box: (300.0, 200.0),
            footer_offset: 40.0,
        }
    }
}
