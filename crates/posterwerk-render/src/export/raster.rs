// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen export — encode a finished canvas as PNG or JPEG.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use image::codecs::jpeg::JpegEncoder;
use posterwerk_core::ChannelLayout;
use posterwerk_core::error::{PosterError, Result};
use tracing::{info, instrument};

use crate::canvas::RasterCanvas;

/// Encode `canvas` as PNG in the requested channel layout.
#[instrument(skip(canvas), fields(width = canvas.width(), height = canvas.height()))]
pub fn encode_png(canvas: &RasterCanvas, layout: ChannelLayout) -> Result<Vec<u8>> {
    let image = canvas.to_image(layout);
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| PosterError::Encode(format!("PNG encoding failed: {err}")))?;
    Ok(buffer)
}

/// Encode `canvas` as JPEG. JPEG has no alpha, so the layout is always RGB.
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(canvas: &RasterCanvas, quality: u8) -> Result<Vec<u8>> {
    let rgb = canvas.to_image(ChannelLayout::Rgb).to_rgb8();
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|err| PosterError::Encode(format!("JPEG encoding failed: {err}")))?;
    Ok(buffer)
}

/// Encode as PNG and write it to `path`.
pub fn write_png(canvas: &RasterCanvas, layout: ChannelLayout, path: impl AsRef<Path>) -> Result<()> {
    let bytes = encode_png(canvas, layout)?;
    std::fs::write(path.as_ref(), &bytes)?;
    info!(bytes = bytes.len(), "Wrote PNG to {}", path.as_ref().display());
    Ok(())
}
