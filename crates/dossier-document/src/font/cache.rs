// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-wide font cache. One slot per family; each slot is filled at most
// once, and concurrent first requests for the same family wait on that single
// fill instead of repeating the I/O. Reads after the fill take no lock.

use std::sync::Arc;

use dossier_core::{FontFamily, FontLoadError};
use once_cell::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::fetch::FontFetcher;
use super::resource::FontResource;

/// Anything that can hand out a loaded font for a family.
pub trait FontProvider: Send + Sync {
    fn font(&self, family: FontFamily) -> Result<Arc<FontResource>, FontLoadError>;
}

/// Lazily populated, read-mostly cache of [`FontResource`]s.
pub struct FontCache {
    fetcher: Box<dyn FontFetcher>,
    slots: [OnceCell<Arc<FontResource>>; 4],
}

static GLOBAL: OnceCell<Arc<FontCache>> = OnceCell::new();

impl FontCache {
    pub fn new(fetcher: impl FontFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            slots: Default::default(),
        }
    }

    /// Install the process-wide cache. The first installation wins; later
    /// calls return the already-installed instance.
    pub fn install_global(fetcher: impl FontFetcher + 'static) -> Arc<FontCache> {
        GLOBAL
            .get_or_init(|| Arc::new(FontCache::new(fetcher)))
            .clone()
    }

    /// The process-wide cache, if one has been installed.
    pub fn global() -> Option<Arc<FontCache>> {
        GLOBAL.get().cloned()
    }

    /// Fetch (on first use) and return the resource for `family`.
    ///
    /// A failed fill leaves the slot empty, so the next request retries.
    #[instrument(skip(self), fields(family = %family))]
    pub fn get_font(&self, family: FontFamily) -> Result<Arc<FontResource>, FontLoadError> {
        let slot = &self.slots[family.index()];
        if let Some(resource) = slot.get() {
            debug!("Font cache hit");
            return Ok(resource.clone());
        }

        slot.get_or_try_init(|| {
            let payload = self.fetcher.fetch(family)?;
            let resource = FontResource::from_payload(family, payload)?;
            info!(origin = ?resource.origin(), "Font loaded into cache");
            Ok(Arc::new(resource))
        })
        .cloned()
    }

    /// Whether `family` has already been loaded.
    pub fn is_loaded(&self, family: FontFamily) -> bool {
        self.slots[family.index()].get().is_some()
    }
}

impl FontProvider for FontCache {
    fn font(&self, family: FontFamily) -> Result<Arc<FontResource>, FontLoadError> {
        self.get_font(family)
    }
}
