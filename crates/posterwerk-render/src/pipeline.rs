// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Poster pipeline — the single entry point that turns a render request and
// its assets into a finished raster.

use posterwerk_core::config::RenderConfig;
use posterwerk_core::error::{PosterError, Result};
use posterwerk_core::{PaperSize, RenderRequest, TextLine};
use tracing::{info, instrument};

use crate::assets::PosterAssets;
use crate::canvas::RasterCanvas;
use crate::colour::{GamutCheck, check_gamut_deviation};
use crate::compositor::{Compositor, Layers};
use crate::units::canvas_dimensions;

/// Renders posters with one fixed configuration.
///
/// Holds no per-render state, so a single pipeline can be shared freely and
/// independent pipelines with different settings can run side by side.
#[derive(Debug, Clone)]
pub struct PosterPipeline {
    config: RenderConfig,
}

impl PosterPipeline {
    /// Validate `config` and build a pipeline around it.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `request` with whatever `assets` are available.
    ///
    /// Parameter errors are returned before any pixel is touched. Missing or
    /// broken assets are not errors: their layers are skipped and text falls
    /// back to the built-in face.
    #[instrument(skip(self, request, assets), fields(paper = %request.paper_size, lines = request.lines.len()))]
    pub fn render(&self, request: &RenderRequest, assets: &PosterAssets) -> Result<RasterCanvas> {
        self.validate_request(request)?;

        let (width, height) = canvas_dimensions(request.paper_size, self.config.dpi);
        let canvas = RasterCanvas::filled(width, height, request.background);

        let layers = Layers {
            texture: assets.texture.as_ref(),
            photo: assets.photo.as_ref(),
            logo: assets.logo.as_ref(),
            font: assets.font.as_deref(),
            lines: &request.lines,
            tracking: request.tracking,
        };
        let canvas = Compositor::new(&self.config, request.paper_size).composite(canvas, &layers);

        info!(width, height, dpi = self.config.dpi, "Poster rendered");
        Ok(canvas)
    }

    /// Check tracking and every text line against the accepted ranges.
    pub fn validate_request(&self, request: &RenderRequest) -> Result<()> {
        let range = self.config.tracking;
        if !range.contains(request.tracking) {
            return Err(PosterError::InvalidTracking {
                value: request.tracking,
                min: range.min,
                max: range.max,
            });
        }
        for (index, line) in request.lines.iter().enumerate() {
            validate_line(index, line, self.config.max_point_size)?;
        }
        Ok(())
    }

    /// Press advisory for the request's background colour.
    pub fn gamut_advisory(&self, request: &RenderRequest) -> GamutCheck {
        check_gamut_deviation(request.background, &self.config.gamut)
    }
}

fn validate_line(index: usize, line: &TextLine, max_point_size: f32) -> Result<()> {
    let invalid = |reason: String| PosterError::InvalidTextLine { index, reason };

    if !line.point_size.is_finite() || line.point_size <= 0.0 {
        return Err(invalid(format!(
            "point size must be positive, got {}",
            line.point_size
        )));
    }
    if line.point_size > max_point_size {
        return Err(invalid(format!(
            "point size {} exceeds the maximum of {max_point_size}",
            line.point_size
        )));
    }
    let page_height = PaperSize::Large.height_mm();
    if !line.position_mm.is_finite() || !(0.0..=page_height).contains(&line.position_mm) {
        return Err(invalid(format!(
            "position {} mm is outside the page (0-{page_height} mm)",
            line.position_mm
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use posterwerk_core::Rgb;

    fn pipeline(dpi: f64) -> PosterPipeline {
        PosterPipeline::new(RenderConfig::default().with_dpi(dpi)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let err = PosterPipeline::new(RenderConfig::default().with_dpi(-1.0)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn canvas_matches_paper_size() {
        let full = pipeline(300.0);
        assert_eq!(canvas_dimensions(PaperSize::Large, full.config().dpi), (3507, 4960));
        assert_eq!(canvas_dimensions(PaperSize::Small, full.config().dpi), (2480, 3507));

        let low = pipeline(72.0);
        for paper in PaperSize::ALL {
            let request = RenderRequest::new(paper, Rgb::new(10, 20, 30));
            let canvas = low.render(&request, &PosterAssets::none()).unwrap();
            assert_eq!(canvas.dimensions(), canvas_dimensions(paper, 72.0));
        }
    }

    #[test]
    fn bare_render_is_background_inside_black_frame() {
        let request = RenderRequest::new(PaperSize::Small, Rgb::new(12, 120, 200));
        let canvas = pipeline(72.0).render(&request, &PosterAssets::none()).unwrap();
        let (w, h) = canvas.dimensions();
        assert_eq!(canvas.pixel(w / 2, h / 2), Rgba([12, 120, 200, 255]));
        for (x, y) in [(0, 0), (w - 1, h - 1), (w / 2, 0), (0, h / 2)] {
            assert_eq!(canvas.pixel(x, y), Rgba([0, 0, 0, 255]));
        }
    }

    #[test]
    fn empty_text_lines_do_not_change_output() {
        let pipeline = pipeline(72.0);
        let bare = RenderRequest::new(PaperSize::Large, Rgb::new(40, 40, 40));
        let with_empty = bare
            .clone()
            .with_lines(vec![TextLine::new("", 161.0, 367.0), TextLine::new("", 43.0, 392.4)]);
        assert_eq!(
            pipeline.render(&bare, &PosterAssets::none()).unwrap(),
            pipeline.render(&with_empty, &PosterAssets::none()).unwrap()
        );
    }

    #[test]
    fn negative_point_size_is_a_validation_error() {
        let request = RenderRequest::new(PaperSize::Large, Rgb::WHITE)
            .with_lines(vec![TextLine::new("ok", 20.0, 10.0), TextLine::new("bad", -4.0, 10.0)]);
        let err = pipeline(72.0).render(&request, &PosterAssets::none()).unwrap_err();
        assert!(matches!(err, PosterError::InvalidTextLine { index: 1, .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn oversized_point_size_is_a_validation_error() {
        let pipeline = pipeline(72.0);
        let at_limit = RenderRequest::new(PaperSize::Small, Rgb::WHITE)
            .with_lines(vec![TextLine::new("OASIS", 250.0, 367.0)]);
        assert!(pipeline.render(&at_limit, &PosterAssets::none()).is_ok());

        let huge = RenderRequest::new(PaperSize::Small, Rgb::WHITE)
            .with_lines(vec![TextLine::new("OASIS", 10_000.0, 367.0)]);
        let err = pipeline.render(&huge, &PosterAssets::none()).unwrap_err();
        assert!(matches!(err, PosterError::InvalidTextLine { index: 0, .. }));
    }

    #[test]
    fn dpi_beyond_ceiling_never_reaches_render() {
        let err = PosterPipeline::new(RenderConfig::default().with_dpi(1e9)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn empty_line_does_not_shift_its_neighbours() {
        let pipeline = pipeline(72.0);
        let base = RenderRequest::new(PaperSize::Large, Rgb::new(30, 60, 90)).with_tracking(25);
        let with_gap = base.clone().with_lines(vec![
            TextLine::new("OASIS", 20.0, 367.0),
            TextLine::new("", 30.0, 380.0),
            TextLine::new("CHICAGO", 8.0, 392.4),
        ]);
        let without_gap = base.with_lines(vec![
            TextLine::new("OASIS", 20.0, 367.0),
            TextLine::new("CHICAGO", 8.0, 392.4),
        ]);

        let gapped = pipeline.render(&with_gap, &PosterAssets::none()).unwrap();
        let plain = pipeline.render(&without_gap, &PosterAssets::none()).unwrap();
        assert_eq!(gapped, plain);
        // The lines really were drawn.
        let blank = pipeline
            .render(&RenderRequest::new(PaperSize::Large, Rgb::new(30, 60, 90)), &PosterAssets::none())
            .unwrap();
        assert_ne!(plain, blank);
    }

    #[test]
    fn position_off_the_page_is_a_validation_error() {
        let request = RenderRequest::new(PaperSize::Large, Rgb::WHITE)
            .with_lines(vec![TextLine::new("low", 20.0, 500.0)]);
        let err = pipeline(72.0).render(&request, &PosterAssets::none()).unwrap_err();
        assert!(matches!(err, PosterError::InvalidTextLine { index: 0, .. }));
    }

    #[test]
    fn tracking_outside_range_is_a_validation_error() {
        let request = RenderRequest::new(PaperSize::Large, Rgb::WHITE).with_tracking(500);
        let err = pipeline(72.0).render(&request, &PosterAssets::none()).unwrap_err();
        assert!(matches!(
            err,
            PosterError::InvalidTracking {
                value: 500,
                min: -50,
                max: 200
            }
        ));
    }

    #[test]
    fn logo_scales_proportionally_at_72_dpi() {
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 25, Rgba([0, 255, 0, 255])));
        let assets = PosterAssets::none().with_logo(logo);
        let pipeline = pipeline(72.0);

        let green = Rgba([0, 255, 0, 255]);
        let mut ratios = Vec::new();
        for paper in PaperSize::ALL {
            let canvas = pipeline
                .render(&RenderRequest::new(paper, Rgb::BLACK), &assets)
                .unwrap();
            let column = canvas.width() / 2;
            let rows: Vec<u32> = (0..canvas.height())
                .filter(|&y| canvas.pixel(column, y) == green)
                .collect();
            let (first, last) = (rows[0], rows[rows.len() - 1]);
            let centre = f64::from(first + last + 1) / 2.0;
            ratios.push(centre / f64::from(canvas.height()));
        }
        // Each size carries up to two pixels of truncation drift.
        assert!((ratios[0] - ratios[1]).abs() < 2.0 / 841.0 + 2.0 / 1190.0 + 1e-4);
    }

    #[test]
    fn identical_inputs_render_identically() {
        let pipeline = pipeline(72.0);
        let request = RenderRequest::new(PaperSize::Small, Rgb::new(200, 30, 30))
            .with_lines(TextLine::headline_pair("OASIS", 30.0, "CHICAGO", 12.0))
            .with_tracking(40);
        let texture = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([90, 90, 90, 255])));
        let assets = PosterAssets::none().with_texture(texture);
        let first = pipeline.render(&request, &assets).unwrap();
        let second = pipeline.render(&request, &assets).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn gamut_advisory_flags_saturated_red_only() {
        let pipeline = pipeline(72.0);
        let red = RenderRequest::new(PaperSize::Large, Rgb::new(255, 0, 0));
        let grey = RenderRequest::new(PaperSize::Large, Rgb::new(128, 128, 128));
        assert!(pipeline.gamut_advisory(&red).out_of_gamut);
        assert!(!pipeline.gamut_advisory(&grey).out_of_gamut);
    }
}
