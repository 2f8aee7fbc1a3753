// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tracked line layout — per-glyph advances, explicit letter-spacing and
// whole-line centring. Measurement is pure; drawing consumes its output.

use posterwerk_core::Rgb;
use tracing::{debug, instrument};

use super::typeface::{Clip, Typeface};
use crate::canvas::RasterCanvas;

/// One glyph and the absolute x of its pen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    pub x: f32,
    pub advance: f32,
}

/// A laid-out, horizontally centred line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Sum of advances plus tracking between adjacent glyphs.
    pub width: f32,
    /// Pen x of the first glyph.
    pub origin_x: f32,
    /// Em size in pixels.
    pub px: f32,
}

impl LineLayout {
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Extra pixels inserted between adjacent glyphs. `tracking` is in
/// thousandths of an em; negative values tighten.
pub fn tracking_pixels(px: f32, tracking: i32) -> f32 {
    px / 1000.0 * tracking as f32
}

/// Total advance width of `text` with `tracking_px` between each pair of
/// adjacent characters. An empty string measures zero.
pub fn measure_line<F: Typeface + ?Sized>(
    text: &str,
    face: &F,
    px: f32,
    tracking_px: f32,
) -> f32 {
    let (sum, count) = text
        .chars()
        .fold((0.0f32, 0usize), |(sum, count), ch| (sum + face.advance(ch, px), count + 1));
    if count == 0 {
        return 0.0;
    }
    sum + tracking_px * (count - 1) as f32
}

/// Lay out `text` centred on a canvas `canvas_width` pixels wide.
///
/// Each glyph advances the pen by its own width plus `tracking_px`; the
/// line as a whole (not each glyph) is centred.
pub fn layout_line<F: Typeface + ?Sized>(
    text: &str,
    face: &F,
    px: f32,
    tracking_px: f32,
    canvas_width: u32,
) -> LineLayout {
    let advances: Vec<(char, f32)> = text.chars().map(|ch| (ch, face.advance(ch, px))).collect();
    let width = match advances.len() {
        0 => 0.0,
        n => advances.iter().map(|(_, adv)| adv).sum::<f32>() + tracking_px * (n - 1) as f32,
    };
    let origin_x = (canvas_width as f32 - width) / 2.0;

    let mut pen = origin_x;
    let glyphs = advances
        .into_iter()
        .map(|(ch, advance)| {
            let glyph = PlacedGlyph { ch, x: pen, advance };
            pen += advance + tracking_px;
            glyph
        })
        .collect();

    LineLayout {
        glyphs,
        width,
        origin_x,
        px,
    }
}

/// Draw a laid-out line with its top edge at `top` pixels.
#[instrument(skip(canvas, face, layout), fields(glyphs = layout.glyphs.len()))]
pub fn draw_line<F: Typeface + ?Sized>(
    canvas: &mut RasterCanvas,
    face: &F,
    layout: &LineLayout,
    top: f32,
    colour: Rgb,
) {
    if layout.is_empty() {
        return;
    }
    let baseline = top + face.ascent(layout.px);
    debug!(origin_x = layout.origin_x, width = layout.width, baseline, "Drawing line");

    let clip = Clip::new(canvas.width(), canvas.height());
    for glyph in &layout.glyphs {
        face.rasterize(glyph.ch, layout.px, glyph.x, baseline, clip, &mut |x, y, coverage| {
            canvas.blend_coverage(x, y, colour, coverage);
        });
    }
}
