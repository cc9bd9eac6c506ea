// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode a report's embedded raster image and fit it into
// the layout box. Operates on in-memory images using the `image` crate.

use image::{DynamicImage, ImageFormat};
use dossier_core::error::RenderError;
use tracing::{debug, instrument};

/// Decoded RGB8 pixels ready to become a PDF image XObject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples, `width * height * 3` bytes.
    pub rgb: Vec<u8>,
}

/// A decoded report image.
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    /// Decode `data`, trying the declared MIME type first and then sniffing
    /// the bytes. Supports PNG and JPEG.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn decode(data: &[u8], mime_type: &str) -> Result<Self, RenderError> {
        let declared = match mime_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        };

        let decoded = match declared {
            Some(format) => image::load_from_memory_with_format(data, format)
                .or_else(|_| image::load_from_memory(data)),
            None => image::load_from_memory(data),
        };

        let image = decoded.map_err(|err| {
            RenderError::ImageDecode(format!("{mime_type} ({} bytes): {err}", data.len()))
        })?;

        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::ImageDecode(format!(
                "{mime_type}: image has no pixels"
            )));
        }

        debug!(
            width = image.width(),
            height = image.height(),
            "Report image decoded"
        );
        Ok(Self { image })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Size in layout units of the largest aspect-preserving rectangle that
    /// fits in `max_width` x `max_height`. Small images scale up to the box.
    pub fn fit_within(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        let scale = (max_width / w).min(max_height / h);
        (w * scale, h * scale)
    }

    /// Flatten to RGB8; alpha is dropped.
    pub fn into_raster(self) -> RasterImage {
        let rgb = self.image.to_rgb8();
        RasterImage {
            width: rgb.width(),
            height: rgb.height(),
            rgb: rgb.into_raw(),
        }
    }
}
