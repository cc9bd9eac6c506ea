// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font module — fetching, measuring, and caching the four logical families.

pub mod cache;
pub mod fetch;
pub mod metrics;
pub mod resource;

pub use cache::{FontCache, FontProvider};
pub use fetch::{ConfiguredFontFetcher, FontFetcher};
pub use metrics::GlyphMetrics;
pub use resource::{FontFace, FontOrigin, FontPayload, FontResource};
