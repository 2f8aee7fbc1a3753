// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement of the photo and logo on the page, derived from canonical
// millimetre geometry.

use posterwerk_core::PaperSize;
use posterwerk_core::config::LayoutGeometry;

use crate::units::scaled_mm_to_pixels;

/// Where an image lands on the canvas. Offsets are signed: a placement may
/// overhang the page and is clipped when pasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    /// Vertical centre in pixels from the canvas top.
    pub fn center_y(&self) -> f64 {
        self.y as f64 + f64::from(self.height) / 2.0
    }
}

/// The photo spans the canonical photo width (scaled to the paper), keeps
/// its aspect ratio, is centred horizontally and sits on the bottom edge.
pub fn photo_placement(
    canvas: (u32, u32),
    asset: (u32, u32),
    paper: PaperSize,
    geometry: &LayoutGeometry,
    dpi: f64,
) -> Placement {
    let (canvas_w, canvas_h) = canvas;
    let (asset_w, asset_h) = asset;

    let width = scaled_mm_to_pixels(geometry.photo_width_mm, paper, dpi).max(1);
    let aspect = f64::from(asset_h) / f64::from(asset_w.max(1));
    let height = ((f64::from(width) * aspect).floor() as u32).max(1);

    Placement {
        x: (i64::from(canvas_w) - i64::from(width)).div_euclid(2),
        y: i64::from(canvas_h) - i64::from(height),
        width,
        height,
    }
}

/// The logo has a fixed physical footprint, is centred horizontally, and its
/// vertical centre sits at the configured distance from the page top.
pub fn logo_placement(
    canvas_width: u32,
    paper: PaperSize,
    geometry: &LayoutGeometry,
    dpi: f64,
) -> Placement {
    let width = scaled_mm_to_pixels(geometry.logo_width_mm, paper, dpi).max(1);
    let height = scaled_mm_to_pixels(geometry.logo_height_mm, paper, dpi).max(1);
    let center = i64::from(scaled_mm_to_pixels(geometry.logo_center_mm, paper, dpi));

    Placement {
        x: (i64::from(canvas_width) - i64::from(width)).div_euclid(2),
        y: center - i64::from(height / 2),
        width,
        height,
    }
}
