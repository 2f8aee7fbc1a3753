// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unit conversion — millimetres to raster pixels and paper-size scaling.

use posterwerk_core::{MM_PER_INCH, PaperSize};

/// Convert a physical length to whole pixels at `dpi`.
///
/// The result is truncated, not rounded: chained conversions drift by up to
/// one pixel each, and callers are expected to tolerate that. Negative input
/// saturates to zero.
pub fn mm_to_pixels(mm: f64, dpi: f64) -> u32 {
    (mm / MM_PER_INCH * dpi).floor() as u32
}

/// Uniform factor that maps canonical (large-size) millimetres onto `paper`.
pub fn scale_factor(paper: PaperSize) -> f64 {
    match paper {
        PaperSize::Large => 1.0,
        other => other.width_mm() / PaperSize::Large.width_mm(),
    }
}

/// Pixel dimensions (width, height) of a page at `dpi`.
pub fn canvas_dimensions(paper: PaperSize, dpi: f64) -> (u32, u32) {
    let (w_mm, h_mm) = paper.dimensions_mm();
    (mm_to_pixels(w_mm, dpi), mm_to_pixels(h_mm, dpi))
}

/// Convert a canonical millimetre length on `paper` straight to pixels.
pub fn scaled_mm_to_pixels(canonical_mm: f64, paper: PaperSize, dpi: f64) -> u32 {
    mm_to_pixels(canonical_mm * scale_factor(paper), dpi)
}
