// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font fetching — the injected capability that turns a family id into bytes.
// The configured fetcher reads the bundled file first and falls back to a
// remote HTTPS download with a bounded timeout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dossier_core::{FontFamily, FontLoadError, FontSource, FontSources};
use tracing::{debug, instrument, warn};

use super::resource::{FontOrigin, FontPayload};

/// Source of font bytes for each family.
///
/// Called at most once per family per [`FontCache`](super::FontCache), so
/// implementations may block.
pub trait FontFetcher: Send + Sync {
    fn fetch(&self, family: FontFamily) -> Result<FontPayload, FontLoadError>;
}

/// Fetcher driven by [`FontSources`] configuration.
pub struct ConfiguredFontFetcher {
    sources: FontSources,
    /// Relative `local_path`s are resolved against this directory.
    base_dir: PathBuf,
}

impl ConfiguredFontFetcher {
    pub fn new(sources: FontSources) -> Self {
        Self {
            sources,
            base_dir: PathBuf::from("."),
        }
    }

    /// Resolve relative bundle paths against `dir` instead of the working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    fn read_local(&self, path: &str) -> Result<Vec<u8>, String> {
        let path = Path::new(path);
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        std::fs::read(&full).map_err(|err| format!("{}: {err}", full.display()))
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.sources.remote_timeout_secs))
            .build()
            .map_err(|err| format!("client setup failed: {err}"))?;

        let response = client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| format!("{url}: {err}"))?;

        let bytes = response.bytes().map_err(|err| format!("{url}: {err}"))?;
        Ok(bytes.to_vec())
    }
}

impl FontFetcher for ConfiguredFontFetcher {
    #[instrument(skip(self), fields(family = %family))]
    fn fetch(&self, family: FontFamily) -> Result<FontPayload, FontLoadError> {
        let (local_path, remote_url) = match self.sources.source(family) {
            FontSource::Standard { face } => return Ok(FontPayload::Standard(*face)),
            FontSource::Bundled {
                local_path,
                remote_url,
            } => (local_path, remote_url),
        };

        let local_err = match self.read_local(local_path) {
            Ok(data) => {
                debug!(path = %local_path, bytes = data.len(), "Font read from bundle");
                return Ok(FontPayload::Bytes {
                    data,
                    origin: FontOrigin::LocalBundle,
                });
            }
            Err(err) => err,
        };

        let Some(url) = remote_url else {
            return Err(FontLoadError::Unavailable {
                family,
                local: local_err,
                remote: "no remote fallback configured".into(),
            });
        };

        warn!(local = %local_err, url = %url, "Bundled font missing, fetching remote fallback");

        match self.fetch_remote(url) {
            Ok(data) => Ok(FontPayload::Bytes {
                data,
                origin: FontOrigin::Remote,
            }),
            Err(remote) => Err(FontLoadError::Unavailable {
                family,
                local: local_err,
                remote,
            }),
        }
    }
}
