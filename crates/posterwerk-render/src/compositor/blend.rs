// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel compositing — Darken blend with fill/opacity, and alpha-masked paste.

use image::RgbaImage;
use posterwerk_core::config::{AlphaPolicy, TextureBlend};

/// Darken `overlay` into `base`, which must have the same dimensions.
///
/// Per colour channel: `base * (1 - fill) + min(base, overlay) * fill`,
/// truncated. Alpha follows `settings.alpha_policy`.
pub fn darken_blend(base: &mut RgbaImage, overlay: &RgbaImage, settings: &TextureBlend) {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());

    let fill = u32::from(settings.fill_percent.min(100));
    let opacity = u32::from(settings.opacity_percent.min(100));

    for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
        for channel in 0..3 {
            let b = u32::from(dst.0[channel]);
            let darker = b.min(u32::from(src.0[channel]));
            dst.0[channel] = ((b * (100 - fill) + darker * fill) / 100) as u8;
        }
        if settings.alpha_policy == AlphaPolicy::OverlayDerived {
            dst.0[3] = (u32::from(src.0[3]) * opacity / 100) as u8;
        }
    }
}

/// Paste `overlay` with its top-left corner at (`x`, `y`), using the
/// overlay's own alpha as the mask. Fully transparent pixels leave the base
/// untouched; the part outside `base` is clipped.
pub fn paste_with_alpha(base: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64) {
    let (base_w, base_h) = (i64::from(base.width()), i64::from(base.height()));
    let (over_w, over_h) = (i64::from(overlay.width()), i64::from(overlay.height()));

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + over_w).min(base_w);
    let y_end = (y + over_h).min(base_h);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for by in y_start..y_end {
        for bx in x_start..x_end {
            let src = overlay.get_pixel((bx - x) as u32, (by - y) as u32);
            let alpha = u32::from(src.0[3]);
            if alpha == 0 {
                continue;
            }
            let dst = base.get_pixel_mut(bx as u32, by as u32);
            if alpha == 255 {
                *dst = *src;
                continue;
            }
            let inv = 255 - alpha;
            for channel in 0..4 {
                let mixed = u32::from(src.0[channel]) * alpha + u32::from(dst.0[channel]) * inv;
                dst.0[channel] = ((mixed + 127) / 255) as u8;
            }
        }
    }
}
