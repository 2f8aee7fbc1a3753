// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// posterwerk-render — Layout and compositing engine for Posterwerk.
//
// Converts physical measurements into pixels, composites the poster layers
// (fill, textured blend, photo, logo, tracked text, frame), checks colours
// against a press model and exports the result for screen and print.

pub mod assets;
pub mod canvas;
pub mod colour;
pub mod compositor;
pub mod export;
pub mod fingerprint;
pub mod pipeline;
pub mod text;
pub mod units;

// Re-export the primary types so callers can use `posterwerk_render::PosterPipeline` etc.
pub use assets::{ImageSource, PosterAssets};
pub use canvas::RasterCanvas;
pub use colour::{GamutCheck, check_gamut_deviation, cmyk_to_rgb, rgb_to_cmyk};
pub use compositor::Compositor;
pub use export::PrintPdfWriter;
pub use pipeline::PosterPipeline;
