// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Asset resolution — turn caller-supplied image and font buffers into
// something the compositor can draw, reporting failures as values.

use std::borrow::Cow;

use image::DynamicImage;
use posterwerk_core::AssetKind;
use posterwerk_core::error::{PosterError, Result};
use tracing::{debug, instrument};

use crate::text::OutlineFace;

/// An image handed to the engine, either already decoded or as encoded
/// bytes (PNG, JPEG, ...) still to be decoded.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Decoded(DynamicImage),
    Encoded(Vec<u8>),
}

impl ImageSource {
    /// Raw bytes identifying this asset, used for fingerprinting.
    pub fn identity_bytes(&self) -> &[u8] {
        match self {
            Self::Decoded(image) => image.as_bytes(),
            Self::Encoded(bytes) => bytes,
        }
    }
}

impl From<DynamicImage> for ImageSource {
    fn from(image: DynamicImage) -> Self {
        Self::Decoded(image)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Encoded(bytes)
    }
}

/// The optional inputs of a render. Any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct PosterAssets {
    pub texture: Option<ImageSource>,
    pub photo: Option<ImageSource>,
    pub logo: Option<ImageSource>,
    /// TrueType/OpenType bytes.
    pub font: Option<Vec<u8>>,
}

impl PosterAssets {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_texture(mut self, source: impl Into<ImageSource>) -> Self {
        self.texture = Some(source.into());
        self
    }

    pub fn with_photo(mut self, source: impl Into<ImageSource>) -> Self {
        self.photo = Some(source.into());
        self
    }

    pub fn with_logo(mut self, source: impl Into<ImageSource>) -> Self {
        self.logo = Some(source.into());
        self
    }

    pub fn with_font(mut self, bytes: Vec<u8>) -> Self {
        self.font = Some(bytes);
        self
    }

    pub fn image(&self, kind: AssetKind) -> Option<&ImageSource> {
        match kind {
            AssetKind::Texture => self.texture.as_ref(),
            AssetKind::Photo => self.photo.as_ref(),
            AssetKind::Logo => self.logo.as_ref(),
            AssetKind::Font => None,
        }
    }
}

/// Decode (if needed) and sanity-check an image asset.
///
/// Borrowing is preserved for already-decoded images so a caller's cached
/// asset is never copied just to be resized.
#[instrument(skip(source))]
pub fn resolve_image(kind: AssetKind, source: &ImageSource) -> Result<Cow<'_, DynamicImage>> {
    let image = match source {
        ImageSource::Decoded(image) => Cow::Borrowed(image),
        ImageSource::Encoded(bytes) => {
            if bytes.is_empty() {
                return Err(unavailable(kind, "empty buffer".into()));
            }
            let decoded = image::load_from_memory(bytes)
                .map_err(|err| unavailable(kind, format!("failed to decode image: {err}")))?;
            Cow::Owned(decoded)
        }
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(unavailable(kind, "image has no pixels".into()));
    }

    debug!(width = image.width(), height = image.height(), "Asset resolved");
    Ok(image)
}

/// Parse a font buffer.
pub fn resolve_font(bytes: &[u8]) -> Result<OutlineFace> {
    OutlineFace::from_bytes(bytes.to_vec())
}

fn unavailable(asset: AssetKind, reason: String) -> PosterError {
    PosterError::AssetUnavailable { asset, reason }
}
