// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the posterwerk-render crate: a full low-resolution
// poster render and the text layout hot path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};

use posterwerk_core::{PaperSize, RenderConfig, RenderRequest, Rgb, TextLine};
use posterwerk_render::text::{BitmapFace, layout_line, tracking_pixels};
use posterwerk_render::{PosterAssets, PosterPipeline};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Every layer present, at 72 dpi so one iteration stays in the millisecond
/// range. The texture is deliberately smaller than the page to include the
/// resize.
fn bench_full_render(c: &mut Criterion) {
    let pipeline = match PosterPipeline::new(RenderConfig::default().with_dpi(72.0)) {
        Ok(pipeline) => pipeline,
        Err(err) => panic!("default config rejected: {err}"),
    };

    let texture = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([120, 110, 100, 255])));
    let photo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(300, 200, Rgba([20, 40, 60, 255])));
    let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(220, 100, Rgba([255, 255, 255, 128])));
    let assets = PosterAssets::none()
        .with_texture(texture)
        .with_photo(photo)
        .with_logo(logo);

    let request = RenderRequest::new(PaperSize::Large, Rgb::new(200, 40, 40))
        .with_lines(TextLine::headline_pair("OASIS", 40.0, "CHICAGO THEATRE", 12.0))
        .with_tracking(50);

    c.bench_function("render (A3 @ 72 dpi, all layers)", |b| {
        b.iter(|| black_box(pipeline.render(black_box(&request), &assets)));
    });
}

fn bench_layout_line(c: &mut Criterion) {
    let text = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG";
    let px = 161.0 * 4.0;
    c.bench_function("layout_line (43 glyphs)", |b| {
        b.iter(|| {
            black_box(layout_line(
                black_box(text),
                &BitmapFace,
                px,
                tracking_pixels(px, 100),
                3507,
            ))
        });
    });
}

criterion_group!(benches, bench_full_render, bench_layout_line);
criterion_main!(benches);
