// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Dossier.

use thiserror::Error;

use crate::types::FontFamily;

/// Neither the bundled file nor the remote fallback produced a usable face.
#[derive(Debug, Clone, Error)]
pub enum FontLoadError {
    #[error("font `{family}` unavailable: local bundle ({local}); remote fallback ({remote})")]
    Unavailable {
        family: FontFamily,
        local: String,
        remote: String,
    },

    #[error("font `{family}` is not a usable TrueType/OpenType face: {detail}")]
    Malformed { family: FontFamily, detail: String },
}

/// Top-level error type for rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    // -- Fatal --
    #[error("font could not be loaded: {0}")]
    MissingFont(#[from] FontLoadError),

    #[error("document serialization failed: {0}")]
    Serialization(String),

    // -- Recovered in place by the assembler --
    #[error("image could not be decoded: {0}")]
    ImageDecode(String),

    #[error("text cannot be drawn with font `{family}`: {detail}")]
    UnrenderableGlyph { family: FontFamily, detail: String },

    // -- Configuration / environment --
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Whether the assembler substitutes a placeholder instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ImageDecode(_) | Self::UnrenderableGlyph { .. })
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RenderError>;
