// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — page state and the line-break/pagination engine.

pub mod engine;
pub mod page;

pub use engine::{LineBreaker, TextStyle};
pub use page::{
    DrawOp, FontRun, LaidOutDocument, PageState, PlacedImage, RenderWarning, TextLine,
};
