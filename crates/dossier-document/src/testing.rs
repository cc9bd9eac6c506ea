// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test-only font provider with fixed, preloaded resources.

use std::collections::HashMap;
use std::sync::Arc;

use dossier_core::{FontFamily, FontLoadError, StandardFace};

use crate::font::{FontProvider, FontResource, GlyphMetrics};

pub(crate) struct StaticFonts {
    fonts: HashMap<FontFamily, Arc<FontResource>>,
}

impl StaticFonts {
    /// Helvetica / Helvetica-Bold for every family (CJK uncovered).
    pub(crate) fn standard() -> Self {
        Self::only(&[
            (FontFamily::Body, StandardFace::Helvetica),
            (FontFamily::BodyBold, StandardFace::HelveticaBold),
            (FontFamily::Cjk, StandardFace::Helvetica),
            (FontFamily::CjkBold, StandardFace::HelveticaBold),
        ])
    }

    /// Fixed-advance metrics covering every character.
    pub(crate) fn uniform() -> Self {
        let fonts = FontFamily::ALL
            .iter()
            .map(|family| {
                let resource = FontResource::with_metrics(*family, GlyphMetrics::uniform(600));
                (*family, Arc::new(resource))
            })
            .collect();
        Self { fonts }
    }

    /// Standard faces for the body families, full coverage for the CJK ones.
    pub(crate) fn with_cjk() -> Self {
        let mut fonts = Self::only(&[
            (FontFamily::Body, StandardFace::Helvetica),
            (FontFamily::BodyBold, StandardFace::HelveticaBold),
        ])
        .fonts;
        for family in [FontFamily::Cjk, FontFamily::CjkBold] {
            let resource = FontResource::with_metrics(family, GlyphMetrics::uniform(1000));
            fonts.insert(family, Arc::new(resource));
        }
        Self { fonts }
    }

    pub(crate) fn only(faces: &[(FontFamily, StandardFace)]) -> Self {
        let fonts = faces
            .iter()
            .map(|(family, face)| (*family, Arc::new(FontResource::standard(*family, *face))))
            .collect();
        Self { fonts }
    }
}

impl FontProvider for StaticFonts {
    fn font(&self, family: FontFamily) -> Result<Arc<FontResource>, FontLoadError> {
        self.fonts
            .get(&family)
            .cloned()
            .ok_or_else(|| FontLoadError::Unavailable {
                family,
                local: "not preloaded".into(),
                remote: "not configured".into(),
            })
    }
}
