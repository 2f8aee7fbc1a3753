// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module — typefaces, tracked line layout and line drawing.

pub mod bitmap;
pub mod layout;
pub mod typeface;

pub use bitmap::BitmapFace;
pub use layout::{LineLayout, PlacedGlyph, draw_line, layout_line, measure_line, tracking_pixels};
pub use typeface::{Clip, OutlineFace, ResolvedFace, Typeface};
