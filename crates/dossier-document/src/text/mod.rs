// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module — script classification and normalisation ahead of layout.

pub mod normalize;
pub mod script;

pub use normalize::normalize;
pub use script::{ScriptRun, classify, font_script_of, segment_runs};
