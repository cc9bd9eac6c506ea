// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph advance tables. Embedded faces are measured once with `ttf-parser`
// at load time; standard faces use the published Helvetica AFM widths.

use std::collections::HashMap;

use dossier_core::{FontFamily, FontLoadError, StandardFace};

/// Which characters a face can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    /// Exactly the characters in the advance table.
    Mapped,
    /// The WinAnsi repertoire of the standard fonts.
    WinAnsi,
    /// Every character (synthetic metrics used in layout tests).
    #[cfg(test)]
    Any,
}

/// Horizontal advances for one face, in font units.
#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    units_per_em: u16,
    advances: HashMap<char, u16>,
    default_advance: u16,
    coverage: Coverage,
}

impl GlyphMetrics {
    /// Extract advances for every character mapped by the face's cmap.
    pub fn from_font_bytes(family: FontFamily, bytes: &[u8]) -> Result<Self, FontLoadError> {
        let face = ttf_parser::Face::parse(bytes, 0).map_err(|err| FontLoadError::Malformed {
            family,
            detail: err.to_string(),
        })?;

        let cmap = face.tables().cmap.ok_or_else(|| FontLoadError::Malformed {
            family,
            detail: "face has no cmap table".into(),
        })?;

        let mut advances = HashMap::new();
        for subtable in cmap.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|cp| {
                let Some(c) = char::from_u32(cp) else {
                    return;
                };
                if advances.contains_key(&c) {
                    return;
                }
                if let Some(advance) = subtable
                    .glyph_index(cp)
                    .and_then(|gid| face.glyph_hor_advance(gid))
                {
                    advances.insert(c, advance);
                }
            });
        }

        if advances.is_empty() {
            return Err(FontLoadError::Malformed {
                family,
                detail: "cmap maps no Unicode characters".into(),
            });
        }

        let default_advance = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .unwrap_or(face.units_per_em() / 2);

        Ok(Self {
            units_per_em: face.units_per_em().max(1),
            advances,
            default_advance,
            coverage: Coverage::Mapped,
        })
    }

    /// AFM widths of a standard face (1000 units per em).
    pub fn standard(face: StandardFace) -> Self {
        let table = match face {
            StandardFace::Helvetica => &HELVETICA_ASCII,
            StandardFace::HelveticaBold => &HELVETICA_BOLD_ASCII,
        };

        let mut advances: HashMap<char, u16> = (b' '..=b'~')
            .zip(table.iter())
            .map(|(byte, width)| (byte as char, *width))
            .collect();
        for (c, regular, bold) in WINANSI_EXTRAS {
            let width = match face {
                StandardFace::Helvetica => *regular,
                StandardFace::HelveticaBold => *bold,
            };
            advances.insert(*c, width);
        }

        Self {
            units_per_em: 1000,
            advances,
            default_advance: 556,
            coverage: Coverage::WinAnsi,
        }
    }

    /// Every character `advance` units wide at 1000 units per em.
    #[cfg(test)]
    pub(crate) fn uniform(advance: u16) -> Self {
        Self {
            units_per_em: 1000,
            advances: HashMap::new(),
            default_advance: advance,
            coverage: Coverage::Any,
        }
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn advance(&self, c: char) -> u16 {
        self.advances.get(&c).copied().unwrap_or(self.default_advance)
    }

    /// Rendered width of `text` at `size` points. Additive per character.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.advance(c))).sum();
        units as f32 * size / f32::from(self.units_per_em)
    }

    /// Whether the face has a glyph for `c`. Whitespace always counts.
    pub fn covers(&self, c: char) -> bool {
        if c == ' ' {
            return true;
        }
        match self.coverage {
            Coverage::Mapped => self.advances.contains_key(&c),
            Coverage::WinAnsi => is_winansi(c),
            #[cfg(test)]
            Coverage::Any => true,
        }
    }
}

fn is_winansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
        || WINANSI_EXTRAS.iter().any(|(extra, _, _)| *extra == c)
}

/// Helvetica widths for ASCII 0x20..=0x7E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold widths for ASCII 0x20..=0x7E.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// WinAnsi characters outside ASCII that reports commonly contain:
/// (char, Helvetica width, Helvetica-Bold width).
const WINANSI_EXTRAS: &[(char, u16, u16)] = &[
    ('•', 350, 350),
    ('–', 556, 556),
    ('—', 1000, 1000),
    ('‘', 222, 278),
    ('’', 222, 278),
    ('“', 333, 500),
    ('”', 333, 500),
    ('…', 1000, 1000),
    ('€', 556, 556),
    ('°', 400, 400),
    ('±', 584, 584),
    ('µ', 556, 611),
    ('é', 556, 556),
    ('ü', 556, 611),
];
