// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// poster-render — render a poster job file to PNG and print-ready PDF.
//
// Entry point. Initialises logging, reads the job and its assets, renders
// every requested paper size and writes the results.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use posterwerk_core::error::Result;
use posterwerk_core::human_errors::humanize_error;
use posterwerk_core::{ChannelLayout, PaperSize, RenderConfig, RenderRequest};
use posterwerk_render::export::write_png;
use posterwerk_render::{PosterAssets, PosterPipeline, PrintPdfWriter};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Job file: a render request, optionally with `config` and `sizes`.
    #[arg(long)]
    job: PathBuf,

    /// Directory that receives `poster_<size>.png` and `.pdf`.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long)]
    texture: Option<PathBuf>,

    #[arg(long)]
    photo: Option<PathBuf>,

    #[arg(long)]
    logo: Option<PathBuf>,

    /// TrueType/OpenType font; the built-in face is used without one.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Override the job's render resolution.
    #[arg(long)]
    dpi: Option<f64>,

    /// Keep the alpha channel in the PNG.
    #[arg(long, default_value_t = false)]
    alpha: bool,
}

/// On-disk job description.
#[derive(Debug, Deserialize)]
struct Job {
    #[serde(flatten)]
    request: RenderRequest,
    #[serde(default)]
    config: RenderConfig,
    /// Paper sizes to render; defaults to the request's own size.
    #[serde(default)]
    sizes: Vec<PaperSize>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let job: Job = serde_json::from_slice(&std::fs::read(&args.job)?)?;
    let mut config = job.config;
    if let Some(dpi) = args.dpi {
        config = config.with_dpi(dpi);
    }
    let pipeline = PosterPipeline::new(config)?;
    let assets = load_assets(args);

    let advisory = pipeline.gamut_advisory(&job.request);
    if let Some(printed) = advisory.approximate {
        warn!(
            background = ?job.request.background,
            ?printed,
            distance = advisory.distance,
            "Background colour will shift noticeably in print"
        );
    }

    let sizes = if job.sizes.is_empty() {
        vec![job.request.paper_size]
    } else {
        job.sizes.clone()
    };
    let layout = if args.alpha {
        ChannelLayout::Rgba
    } else {
        ChannelLayout::Rgb
    };

    std::fs::create_dir_all(&args.out_dir)?;
    let mut written = Vec::new();
    for paper in sizes {
        let request = RenderRequest {
            paper_size: paper,
            ..job.request.clone()
        };
        let canvas = pipeline.render(&request, &assets)?;

        let stem = format!("poster_{}", paper.label());
        let png = args.out_dir.join(format!("{stem}.png"));
        write_png(&canvas, layout, &png)?;

        let pdf = args.out_dir.join(format!("{stem}.pdf"));
        let mut writer = PrintPdfWriter::new(paper, pipeline.config().dpi);
        writer.set_title(format!("Poster {}", paper.label()));
        writer.write_to_file(&canvas, &pdf)?;

        written.push(png);
        written.push(pdf);
    }

    info!(files = written.len(), out_dir = %args.out_dir.display(), "Job complete");
    Ok(written)
}

fn load_assets(args: &Args) -> PosterAssets {
    PosterAssets {
        texture: args.texture.as_deref().and_then(read_asset).map(Into::into),
        photo: args.photo.as_deref().and_then(read_asset).map(Into::into),
        logo: args.logo.as_deref().and_then(read_asset).map(Into::into),
        font: args.font.as_deref().and_then(read_asset),
    }
}

/// Unreadable assets are reported and left out; the render goes ahead.
fn read_asset(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Asset not readable, skipping");
            None
        }
    }
}
