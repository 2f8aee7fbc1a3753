// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typeface abstraction — glyph metrics and rasterisation behind one trait so
// layout can be measured without a real font.

use std::ops::Range;

use posterwerk_core::AssetKind;
use posterwerk_core::error::{PosterError, Result};
use rusttype::{Font, Scale, point};
use tracing::debug;

use super::bitmap::BitmapFace;

/// Pixel area a glyph may paint: columns `0..width`, rows `0..height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub width: u32,
    pub height: u32,
}

impl Clip {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The part of the column span `start..end` inside the clip.
    pub fn columns(&self, start: i32, end: i32) -> Range<i32> {
        clamp_span(start, end, self.width)
    }

    /// The part of the row span `start..end` inside the clip.
    pub fn rows(&self, start: i32, end: i32) -> Range<i32> {
        clamp_span(start, end, self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

fn clamp_span(start: i32, end: i32, limit: u32) -> Range<i32> {
    let limit = i32::try_from(limit).unwrap_or(i32::MAX);
    start.clamp(0, limit)..end.clamp(0, limit)
}

/// Measures and draws individual glyphs at a pixel size.
///
/// `px` is the em size in pixels. Implement this to plug another glyph
/// source into the layout engine.
pub trait Typeface {
    /// Horizontal advance of `ch` in pixels.
    fn advance(&self, ch: char, px: f32) -> f32;

    /// Distance from the top of a line to its baseline.
    fn ascent(&self, px: f32) -> f32;

    /// Rasterise `ch` with its pen position at (`x`, `baseline`), reporting
    /// each touched pixel inside `clip` and its coverage in `0.0..=1.0` to
    /// `plot`. Pixels outside `clip` are never visited.
    fn rasterize(
        &self,
        ch: char,
        px: f32,
        x: f32,
        baseline: f32,
        clip: Clip,
        plot: &mut dyn FnMut(i32, i32, f32),
    );
}

/// A TrueType/OpenType font parsed from a caller-supplied buffer.
pub struct OutlineFace {
    font: Font<'static>,
}

impl OutlineFace {
    /// Parse font bytes. Fails with [`PosterError::AssetUnavailable`] when the
    /// buffer is not a usable font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(PosterError::AssetUnavailable {
                asset: AssetKind::Font,
                reason: "empty buffer".into(),
            });
        }
        let len = data.len();
        let font = Font::try_from_vec(data).ok_or_else(|| PosterError::AssetUnavailable {
            asset: AssetKind::Font,
            reason: "not a TrueType or OpenType font".into(),
        })?;
        debug!(bytes = len, glyphs = font.glyph_count(), "Font parsed");
        Ok(Self { font })
    }
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl Typeface for OutlineFace {
    fn advance(&self, ch: char, px: f32) -> f32 {
        self.font
            .glyph(ch)
            .scaled(Scale::uniform(px))
            .h_metrics()
            .advance_width
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font.v_metrics(Scale::uniform(px)).ascent
    }

    fn rasterize(
        &self,
        ch: char,
        px: f32,
        x: f32,
        baseline: f32,
        clip: Clip,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        let glyph = self
            .font
            .glyph(ch)
            .scaled(Scale::uniform(px))
            .positioned(point(x, baseline));
        let Some(bb) = glyph.pixel_bounding_box() else {
            return;
        };
        if clip.columns(bb.min.x, bb.max.x).is_empty() || clip.rows(bb.min.y, bb.max.y).is_empty() {
            return;
        }
        glyph.draw(|gx, gy, coverage| {
            let (cx, cy) = (bb.min.x + gx as i32, bb.min.y + gy as i32);
            if clip.contains(cx, cy) {
                plot(cx, cy, coverage);
            }
        });
    }
}

/// The face a render actually draws with: the supplied font, or the
/// built-in bitmap face when none could be used.
#[derive(Debug)]
pub enum ResolvedFace {
    Outline(OutlineFace),
    Builtin(BitmapFace),
}

impl ResolvedFace {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    fn inner(&self) -> &dyn Typeface {
        match self {
            Self::Outline(face) => face,
            Self::Builtin(face) => face,
        }
    }
}

impl Typeface for ResolvedFace {
    fn advance(&self, ch: char, px: f32) -> f32 {
        self.inner().advance(ch, px)
    }

    fn ascent(&self, px: f32) -> f32 {
        self.inner().ascent(px)
    }

    fn rasterize(
        &self,
        ch: char,
        px: f32,
        x: f32,
        baseline: f32,
        clip: Clip,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        self.inner().rasterize(ch, px, x, baseline, clip, plot)
    }
}
