// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster canvas — the page-sized RGBA buffer every compositing stage mutates.

use image::{DynamicImage, Rgba, RgbaImage};
use posterwerk_core::{ChannelLayout, Rgb};

/// A page-sized RGBA raster.
///
/// Created filled with the background colour at full opacity, mutated in
/// place by each compositing stage, and finalised into an RGB or RGBA image
/// at the end of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// A canvas of `width` x `height` pixels, every pixel `colour` and opaque.
    pub fn filled(width: u32, height: u32, colour: Rgb) -> Self {
        let [r, g, b] = colour.channels();
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at (`x`, `y`). Panics when out of bounds, like `RgbaImage`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Borrow the underlying RGBA buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn as_rgba_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Mix `colour` into one pixel with the given coverage in `0.0..=1.0`.
    /// Coordinates outside the canvas are ignored.
    pub fn blend_coverage(&mut self, x: i32, y: i32, colour: Rgb, coverage: f32) {
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }

        let inv = 1.0 - coverage;
        let dst = self.image.get_pixel_mut(x, y);
        for (channel, source) in dst.0.iter_mut().zip(colour.channels()) {
            *channel = (f32::from(source) * coverage + f32::from(*channel) * inv).round() as u8;
        }
        dst.0[3] = (255.0 * coverage + f32::from(dst.0[3]) * inv).round() as u8;
    }

    /// Finalise into an image with the requested channel layout. `Rgb`
    /// discards alpha; `Rgba` keeps it.
    pub fn into_image(self, layout: ChannelLayout) -> DynamicImage {
        let image = DynamicImage::ImageRgba8(self.image);
        match layout {
            ChannelLayout::Rgba => image,
            ChannelLayout::Rgb => DynamicImage::ImageRgb8(image.to_rgb8()),
        }
    }

    /// Like [`RasterCanvas::into_image`] but leaves the canvas intact.
    pub fn to_image(&self, layout: ChannelLayout) -> DynamicImage {
        self.clone().into_image(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_canvas_is_opaque_background() {
        let canvas = RasterCanvas::filled(4, 3, Rgb::new(10, 20, 30));
        assert_eq!(canvas.dimensions(), (4, 3));
        assert!(canvas.as_rgba().pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn full_coverage_replaces_colour() {
        let mut canvas = RasterCanvas::filled(2, 2, Rgb::BLACK);
        canvas.blend_coverage(1, 1, Rgb::WHITE, 1.0);
        assert_eq!(canvas.pixel(1, 1), Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn half_coverage_mixes() {
        let mut canvas = RasterCanvas::filled(1, 1, Rgb::BLACK);
        canvas.blend_coverage(0, 0, Rgb::new(200, 100, 50), 0.5);
        assert_eq!(canvas.pixel(0, 0), Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn out_of_bounds_coverage_is_ignored() {
        let mut canvas = RasterCanvas::filled(2, 2, Rgb::BLACK);
        canvas.blend_coverage(-1, 0, Rgb::WHITE, 1.0);
        canvas.blend_coverage(0, 2, Rgb::WHITE, 1.0);
        assert!(canvas.as_rgba().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn rgb_layout_drops_alpha() {
        let canvas = RasterCanvas::filled(3, 2, Rgb::new(1, 2, 3));
        let rgb = canvas.to_image(ChannelLayout::Rgb);
        assert_eq!(rgb.color(), image::ColorType::Rgb8);
        assert_eq!(rgb.as_bytes().len(), 3 * 2 * 3);
        let rgba = canvas.into_image(ChannelLayout::Rgba);
        assert_eq!(rgba.color(), image::ColorType::Rgba8);
    }
}
