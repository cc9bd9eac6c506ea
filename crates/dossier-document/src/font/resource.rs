// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Immutable, shareable font resource: the embeddable face plus its metrics.

use std::sync::Arc;

use dossier_core::{FontFamily, FontLoadError, StandardFace};

use super::metrics::GlyphMetrics;

/// Where a resource's face came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontOrigin {
    LocalBundle,
    Remote,
    /// PDF base-14 face; nothing was loaded.
    Standard,
}

/// The drawable part of a resource.
#[derive(Debug, Clone)]
pub enum FontFace {
    /// TrueType/OpenType bytes, embedded into every document that uses them.
    Embedded(Arc<[u8]>),
    Standard(StandardFace),
}

/// What a [`FontFetcher`](super::FontFetcher) hands back for one family.
#[derive(Debug, Clone)]
pub enum FontPayload {
    Bytes { data: Vec<u8>, origin: FontOrigin },
    Standard(StandardFace),
}

/// A loaded font family. Created once per process and shared read-only.
#[derive(Debug, Clone)]
pub struct FontResource {
    family: FontFamily,
    origin: FontOrigin,
    face: FontFace,
    metrics: GlyphMetrics,
}

impl FontResource {
    /// Validate a payload and extract its metrics.
    pub fn from_payload(family: FontFamily, payload: FontPayload) -> Result<Self, FontLoadError> {
        match payload {
            FontPayload::Bytes { data, origin } => {
                let metrics = GlyphMetrics::from_font_bytes(family, &data)?;
                Ok(Self {
                    family,
                    origin,
                    face: FontFace::Embedded(Arc::from(data)),
                    metrics,
                })
            }
            FontPayload::Standard(face) => Ok(Self::standard(family, face)),
        }
    }

    pub fn standard(family: FontFamily, face: StandardFace) -> Self {
        Self {
            family,
            origin: FontOrigin::Standard,
            face: FontFace::Standard(face),
            metrics: GlyphMetrics::standard(face),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_metrics(family: FontFamily, metrics: GlyphMetrics) -> Self {
        let face = if family.is_bold() {
            StandardFace::HelveticaBold
        } else {
            StandardFace::Helvetica
        };
        Self {
            family,
            origin: FontOrigin::Standard,
            face: FontFace::Standard(face),
            metrics,
        }
    }

    pub fn family(&self) -> FontFamily {
        self.family
    }

    pub fn origin(&self) -> FontOrigin {
        self.origin
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Raw font bytes, if the face is embedded.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.face {
            FontFace::Embedded(data) => Some(data.as_ref()),
            FontFace::Standard(_) => None,
        }
    }

    pub fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        self.metrics.text_width(text, size)
    }

    pub fn covers(&self, c: char) -> bool {
        self.metrics.covers(c)
    }

    /// First character of `text` this face cannot draw.
    pub fn first_uncovered(&self, text: &str) -> Option<char> {
        text.chars().find(|c| !self.covers(*c))
    }
}
