// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dossier — core types, configuration, and error definitions shared by the
// rendering crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{FontSource, FontSources, RenderConfig, StandardFace};
pub use error::{FontLoadError, RenderError};
pub use types::*;
