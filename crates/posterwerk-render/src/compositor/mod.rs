// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compositor — layered raster assembly in a fixed order: fill, texture,
// photo, logo, text, border.
//
// Asset failures never abort a render. An undecodable image skips its layer
// and an unusable font falls back to the built-in face; both are logged.

pub mod blend;
pub mod placement;

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use posterwerk_core::config::RenderConfig;
use posterwerk_core::{AssetKind, PaperSize, Rgb, TextLine};
use tracing::{debug, instrument, warn};

use crate::assets::{ImageSource, resolve_font, resolve_image};
use crate::canvas::RasterCanvas;
use crate::text::{BitmapFace, ResolvedFace, draw_line, layout_line, tracking_pixels};
use crate::units::{mm_to_pixels, scaled_mm_to_pixels};

pub use blend::{darken_blend, paste_with_alpha};
pub use placement::{Placement, logo_placement, photo_placement};

/// Colour of every text line.
pub const TEXT_COLOUR: Rgb = Rgb::WHITE;
/// Colour of the page frame.
pub const BORDER_COLOUR: Rgb = Rgb::BLACK;

/// Everything drawn on top of the background fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layers<'a> {
    pub texture: Option<&'a ImageSource>,
    pub photo: Option<&'a ImageSource>,
    pub logo: Option<&'a ImageSource>,
    pub font: Option<&'a [u8]>,
    pub lines: &'a [TextLine],
    /// Thousandths of an em, shared by every line.
    pub tracking: i32,
}

/// Applies [`Layers`] to a canvas for one paper size.
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'a> {
    config: &'a RenderConfig,
    paper: PaperSize,
}

impl<'a> Compositor<'a> {
    pub fn new(config: &'a RenderConfig, paper: PaperSize) -> Self {
        Self { config, paper }
    }

    /// Run every stage after the fill, in order, and hand the canvas back.
    #[instrument(skip_all, fields(paper = %self.paper, width = canvas.width(), height = canvas.height()))]
    pub fn composite(&self, mut canvas: RasterCanvas, layers: &Layers<'_>) -> RasterCanvas {
        if let Some(texture) = layers.texture {
            self.blend_texture(&mut canvas, texture);
        }
        if let Some(photo) = layers.photo {
            self.paste_photo(&mut canvas, photo);
        }
        if let Some(logo) = layers.logo {
            self.paste_logo(&mut canvas, logo);
        }
        self.draw_text(&mut canvas, layers);
        self.draw_border(&mut canvas);
        canvas
    }

    fn blend_texture(&self, canvas: &mut RasterCanvas, source: &ImageSource) {
        let Some(texture) = self.load(AssetKind::Texture, source) else {
            return;
        };
        let (width, height) = canvas.dimensions();
        let overlay = fit_exact(&texture, width, height);
        darken_blend(canvas.as_rgba_mut(), &overlay, &self.config.texture);
        debug!(fill = self.config.texture.fill_percent, "Texture blended");
    }

    fn paste_photo(&self, canvas: &mut RasterCanvas, source: &ImageSource) {
        let Some(photo) = self.load(AssetKind::Photo, source) else {
            return;
        };
        let placement = photo_placement(
            canvas.dimensions(),
            (photo.width(), photo.height()),
            self.paper,
            &self.config.geometry,
            self.config.dpi,
        );
        paste_at(canvas, &photo, placement);
        debug!(?placement, "Photo pasted");
    }

    fn paste_logo(&self, canvas: &mut RasterCanvas, source: &ImageSource) {
        let Some(logo) = self.load(AssetKind::Logo, source) else {
            return;
        };
        let placement = logo_placement(
            canvas.width(),
            self.paper,
            &self.config.geometry,
            self.config.dpi,
        );
        paste_at(canvas, &logo, placement);
        debug!(?placement, "Logo pasted");
    }

    fn draw_text(&self, canvas: &mut RasterCanvas, layers: &Layers<'_>) {
        if layers.lines.iter().all(TextLine::is_empty) {
            return;
        }
        let face = select_face(layers.font);

        for line in layers.lines.iter().filter(|line| !line.is_empty()) {
            let px = line.point_size * self.config.font_scale;
            let layout = layout_line(
                &line.text,
                &face,
                px,
                tracking_pixels(px, layers.tracking),
                canvas.width(),
            );
            let top = scaled_mm_to_pixels(line.position_mm, self.paper, self.config.dpi) as f32;
            draw_line(canvas, &face, &layout, top, TEXT_COLOUR);
        }
    }

    /// Four solid bands flush with the canvas edges.
    fn draw_border(&self, canvas: &mut RasterCanvas) {
        let (width, height) = canvas.dimensions();
        let band = mm_to_pixels(self.config.border_mm, self.config.dpi)
            .min(width.div_ceil(2))
            .min(height.div_ceil(2));
        if band == 0 {
            return;
        }

        let [r, g, b] = BORDER_COLOUR.channels();
        let colour = Rgba([r, g, b, 255]);
        let far_x = (width - band) as i32;
        let far_y = (height - band) as i32;
        let bands = [
            Rect::at(0, 0).of_size(width, band),
            Rect::at(0, far_y).of_size(width, band),
            Rect::at(0, 0).of_size(band, height),
            Rect::at(far_x, 0).of_size(band, height),
        ];
        for rect in bands {
            draw_filled_rect_mut(canvas.as_rgba_mut(), rect, colour);
        }
    }

    fn load<'s>(
        &self,
        kind: AssetKind,
        source: &'s ImageSource,
    ) -> Option<std::borrow::Cow<'s, DynamicImage>> {
        match resolve_image(kind, source) {
            Ok(image) => Some(image),
            Err(err) => {
                warn!(asset = %kind, error = %err, "Skipping layer");
                None
            }
        }
    }
}

/// The supplied font, or the built-in face when it is missing or unusable.
pub fn select_face(font: Option<&[u8]>) -> ResolvedFace {
    match font.map(resolve_font) {
        Some(Ok(face)) => ResolvedFace::Outline(face),
        Some(Err(err)) => {
            warn!(error = %err, "Falling back to built-in typeface");
            ResolvedFace::Builtin(BitmapFace)
        }
        None => ResolvedFace::Builtin(BitmapFace),
    }
}

fn fit_exact(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    if image.width() == width && image.height() == height {
        image.to_rgba8()
    } else {
        image
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgba8()
    }
}

/// Scale `image` into `placement` and paste it. Only the part of the
/// placement that lands on the canvas is resampled.
fn paste_at(canvas: &mut RasterCanvas, image: &DynamicImage, placement: Placement) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    let Some((x0, x1)) = visible_span(placement.x, placement.width, canvas_w) else {
        return;
    };
    let Some((y0, y1)) = visible_span(placement.y, placement.height, canvas_h) else {
        return;
    };

    let (sx, sw) = source_span(x0, x1, placement.width, image.width());
    let (sy, sh) = source_span(y0, y1, placement.height, image.height());
    let resized = if (sx, sy, sw, sh) == (0, 0, image.width(), image.height()) {
        fit_exact(image, x1 - x0, y1 - y0)
    } else {
        fit_exact(&image.crop_imm(sx, sy, sw, sh), x1 - x0, y1 - y0)
    };
    paste_with_alpha(
        canvas.as_rgba_mut(),
        &resized,
        placement.x + i64::from(x0),
        placement.y + i64::from(y0),
    );
}

/// Placement-local pixels `start..end` of an `extent`-long run at `offset`
/// that fall inside `0..limit`.
fn visible_span(offset: i64, extent: u32, limit: u32) -> Option<(u32, u32)> {
    let extent = i64::from(extent);
    let start = (-offset).clamp(0, extent);
    let end = (i64::from(limit) - offset).clamp(0, extent);
    (start < end).then(|| (start as u32, end as u32))
}

/// Offset and length of the source pixels behind placement pixels
/// `start..end`, when `extent` placement pixels cover `source` pixels.
fn source_span(start: u32, end: u32, extent: u32, source: u32) -> (u32, u32) {
    let scale = f64::from(source) / f64::from(extent.max(1));
    let from = ((f64::from(start) * scale).floor() as u32).min(source.saturating_sub(1));
    let to = ((f64::from(end) * scale).ceil() as u32).clamp(from + 1, source.max(from + 1));
    (from, to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DPI: f64 = 72.0;

    fn config() -> RenderConfig {
        RenderConfig::default().with_dpi(DPI)
    }

    fn blank(paper: PaperSize, colour: Rgb) -> RasterCanvas {
        let (w, h) = crate::units::canvas_dimensions(paper, DPI);
        RasterCanvas::filled(w, h, colour)
    }

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> ImageSource {
        ImageSource::from(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba(rgba),
        )))
    }

    #[test]
    fn border_occupies_outer_band_only() {
        let config = config();
        let canvas = blank(PaperSize::Large, Rgb::new(200, 10, 10));
        let out = Compositor::new(&config, PaperSize::Large).composite(canvas, &Layers::default());
        // 10 mm at 72 dpi is 28 px.
        let black = Rgba([0, 0, 0, 255]);
        let fill = Rgba([200, 10, 10, 255]);
        let (w, h) = out.dimensions();
        assert_eq!(out.pixel(0, 0), black);
        assert_eq!(out.pixel(27, h / 2), black);
        assert_eq!(out.pixel(28, h / 2), fill);
        assert_eq!(out.pixel(w - 28, h / 2), black);
        assert_eq!(out.pixel(w - 29, h / 2), fill);
        assert_eq!(out.pixel(w / 2, h - 1), black);
        assert_eq!(out.pixel(w / 2, h / 2), fill);
    }

    #[test]
    fn zero_border_leaves_edges_alone() {
        let mut config = config();
        config.border_mm = 0.0;
        let canvas = blank(PaperSize::Small, Rgb::WHITE);
        let out = Compositor::new(&config, PaperSize::Small).composite(canvas, &Layers::default());
        assert_eq!(out.pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn texture_darkens_the_interior() {
        let config = config();
        let texture = solid(16, 16, [100, 100, 100, 255]);
        let layers = Layers {
            texture: Some(&texture),
            ..Layers::default()
        };
        let out = Compositor::new(&config, PaperSize::Small)
            .composite(blank(PaperSize::Small, Rgb::WHITE), &layers);
        let (w, h) = out.dimensions();
        // 255*0.05 + 100*0.95 = 107.75, truncated.
        assert_eq!(out.pixel(w / 2, h / 2), Rgba([107, 107, 107, 255]));
    }

    #[test]
    fn logo_lands_centred_at_its_offset() {
        let config = config();
        let logo = solid(40, 20, [0, 255, 0, 255]);
        let layers = Layers {
            logo: Some(&logo),
            ..Layers::default()
        };
        let out = Compositor::new(&config, PaperSize::Small)
            .composite(blank(PaperSize::Small, Rgb::BLACK), &layers);
        let placement = logo_placement(out.width(), PaperSize::Small, &config.geometry, DPI);
        let green = Rgba([0, 255, 0, 255]);
        let cx = (placement.x + i64::from(placement.width) / 2) as u32;
        let cy = placement.center_y() as u32;
        assert_eq!(out.pixel(cx, cy), green);
        assert_ne!(out.pixel(cx, (placement.y - 1) as u32), green);
    }

    #[test]
    fn transparent_photo_changes_nothing() {
        let config = config();
        let photo = solid(30, 20, [255, 0, 0, 0]);
        let layers = Layers {
            photo: Some(&photo),
            ..Layers::default()
        };
        let compositor = Compositor::new(&config, PaperSize::Large);
        let plain = compositor.composite(blank(PaperSize::Large, Rgb::WHITE), &Layers::default());
        let with_photo = compositor.composite(blank(PaperSize::Large, Rgb::WHITE), &layers);
        assert_eq!(plain, with_photo);
    }

    #[test]
    fn opaque_photo_covers_the_bottom() {
        let config = config();
        let photo = solid(30, 10, [0, 0, 255, 255]);
        let layers = Layers {
            photo: Some(&photo),
            ..Layers::default()
        };
        let out = Compositor::new(&config, PaperSize::Large)
            .composite(blank(PaperSize::Large, Rgb::WHITE), &layers);
        let (w, h) = out.dimensions();
        // Above the border band, inside the photo.
        assert_eq!(out.pixel(w / 2, h - 40), Rgba([0, 0, 255, 255]));
        assert_eq!(out.pixel(w / 2, h / 2), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn towering_photo_is_cropped_to_the_canvas() {
        let config = config();
        // Scaled to the photo width this is thousands of canvases tall.
        let photo = solid(10, 100_000, [0, 0, 255, 255]);
        let layers = Layers {
            photo: Some(&photo),
            ..Layers::default()
        };
        let out = Compositor::new(&config, PaperSize::Large)
            .composite(blank(PaperSize::Large, Rgb::WHITE), &layers);
        let (w, h) = out.dimensions();
        let blue = Rgba([0, 0, 255, 255]);
        assert_eq!(out.pixel(w / 2, h - 40), blue);
        assert_eq!(out.pixel(w / 2, 40), blue);
        assert_eq!(out.pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn visible_span_clamps_to_the_canvas() {
        assert_eq!(visible_span(0, 50, 100), Some((0, 50)));
        assert_eq!(visible_span(-30, 50, 100), Some((30, 50)));
        assert_eq!(visible_span(80, 50, 100), Some((0, 20)));
        assert_eq!(visible_span(-1_000_000, 1_000_100, 100), Some((1_000_000, 1_000_100)));
        assert_eq!(visible_span(100, 50, 100), None);
        assert_eq!(visible_span(-50, 50, 100), None);
    }

    #[test]
    fn source_span_covers_the_visible_part() {
        assert_eq!(source_span(0, 400, 400, 10), (0, 10));
        assert_eq!(source_span(200, 400, 400, 10), (5, 5));
        // Upscaled sources keep at least one pixel.
        assert_eq!(source_span(3, 4, 400, 10), (0, 1));
        assert_eq!(source_span(399, 400, 400, 10), (9, 1));
    }

    #[test]
    fn undecodable_assets_are_skipped() {
        let config = config();
        let broken = ImageSource::from(b"garbage".to_vec());
        let layers = Layers {
            texture: Some(&broken),
            photo: Some(&broken),
            logo: Some(&broken),
            ..Layers::default()
        };
        let compositor = Compositor::new(&config, PaperSize::Small);
        let plain = compositor.composite(blank(PaperSize::Small, Rgb::WHITE), &Layers::default());
        let degraded = compositor.composite(blank(PaperSize::Small, Rgb::WHITE), &layers);
        assert_eq!(plain, degraded);
    }

    #[test]
    fn bad_font_falls_back_to_builtin() {
        assert!(select_face(Some(b"nope".as_slice())).is_builtin());
        assert!(select_face(None).is_builtin());
    }

    #[test]
    fn text_is_drawn_in_white_with_fallback_face() {
        let config = config();
        let lines = vec![TextLine::new("HHHH", 20.0, 200.0)];
        let layers = Layers {
            lines: &lines,
            font: Some(b"broken font".as_slice()),
            ..Layers::default()
        };
        let out = Compositor::new(&config, PaperSize::Large)
            .composite(blank(PaperSize::Large, Rgb::BLACK), &layers);
        let white = Rgba([255, 255, 255, 255]);
        let top = mm_to_pixels(200.0, DPI);
        let band = top..top + 80;
        let painted = (0..out.width())
            .flat_map(|x| band.clone().map(move |y| (x, y)))
            .filter(|&(x, y)| out.pixel(x, y) == white)
            .count();
        assert!(painted > 0);
    }

    #[test]
    fn empty_lines_are_no_ops() {
        let config = config();
        let lines = vec![TextLine::new("", 161.0, 367.0)];
        let layers = Layers {
            lines: &lines,
            ..Layers::default()
        };
        let compositor = Compositor::new(&config, PaperSize::Large);
        let plain = compositor.composite(blank(PaperSize::Large, Rgb::BLACK), &Layers::default());
        let with_empty = compositor.composite(blank(PaperSize::Large, Rgb::BLACK), &layers);
        assert_eq!(plain, with_empty);
    }
}
