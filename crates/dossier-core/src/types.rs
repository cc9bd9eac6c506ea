// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Dossier report renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image attached to a report, exactly as the upload collaborator stored it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportImage {
    /// Encoded image bytes (PNG, JPEG, ...).
    pub data: Vec<u8>,
    /// Declared MIME type, e.g. `image/png`. Not trusted for decoding.
    pub mime_type: String,
    pub filename: String,
}

/// A finished report handed to the renderer. Never mutated by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub title: String,
    pub report_type: String,
    pub created_at: DateTime<Utc>,
    pub risk_level: String,
    pub summary: Option<String>,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    /// Full narrative text; may carry lightweight markdown decoration.
    pub full_text: String,
    pub image: Option<ReportImage>,
}

impl ReportRecord {
    /// Minimal record with only a title; every optional section empty.
    pub fn new(title: impl Into<String>, report_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            report_type: report_type.into(),
            created_at: Utc::now(),
            risk_level: String::new(),
            summary: None,
            findings: Vec::new(),
            recommendations: Vec::new(),
            full_text: String::new(),
            image: None,
        }
    }

    /// Summary text, treating whitespace-only as absent.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Coarse writing-system class used to pick a font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptClass {
    Latin,
    Cyrillic,
    Arabic,
    Cjk,
}

/// Logical font family. Cyrillic and Arabic text reuse the body faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Body,
    BodyBold,
    Cjk,
    CjkBold,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [Self::Body, Self::BodyBold, Self::Cjk, Self::CjkBold];

    /// Stable identifier used in configuration and logs.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::BodyBold => "body-bold",
            Self::Cjk => "cjk",
            Self::CjkBold => "cjk-bold",
        }
    }

    /// Slot index into fixed-size per-family tables.
    pub fn index(&self) -> usize {
        match self {
            Self::Body => 0,
            Self::BodyBold => 1,
            Self::Cjk => 2,
            Self::CjkBold => 3,
        }
    }

    /// Family able to draw `script` at the requested weight.
    pub fn for_script(script: ScriptClass, bold: bool) -> Self {
        match (script, bold) {
            (ScriptClass::Cjk, false) => Self::Cjk,
            (ScriptClass::Cjk, true) => Self::CjkBold,
            (_, false) => Self::Body,
            (_, true) => Self::BodyBold,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Self::BodyBold | Self::CjkBold)
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyrillic_and_arabic_share_body_faces() {
        assert_eq!(FontFamily::for_script(ScriptClass::Cyrillic, false), FontFamily::Body);
        assert_eq!(FontFamily::for_script(ScriptClass::Arabic, true), FontFamily::BodyBold);
        assert_eq!(FontFamily::for_script(ScriptClass::Cjk, true), FontFamily::CjkBold);
    }

    #[test]
    fn family_ids_round_trip_through_serde() {
        let json = serde_json::to_string(&FontFamily::CjkBold).unwrap();
        assert_eq!(json, "\"cjk-bold\"");
        assert_eq!(FontFamily::CjkBold.to_string(), "cjk-bold");
    }

    #[test]
    fn blank_summary_counts_as_absent() {
        let mut record = ReportRecord::new("Checkup", "lab");
        record.summary = Some("   ".into());
        assert!(record.summary_text().is_none());
        record.summary = Some("ok".into());
        assert_eq!(record.summary_text(), Some("ok"));
    }
}
