// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print export — a single-page PDF whose page is the paper size and whose
// only content is the rendered raster, placed full bleed with `printpdf` 0.8.

use std::path::Path;

use posterwerk_core::{ChannelLayout, PaperSize};
use posterwerk_core::error::{PosterError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::canvas::RasterCanvas;

/// Wraps a rendered poster in a print-ready PDF.
pub struct PrintPdfWriter {
    paper_size: PaperSize,
    /// Resolution the canvas was rendered at; sets its physical size.
    dpi: f64,
    title: Option<String>,
}

impl PrintPdfWriter {
    pub fn new(paper_size: PaperSize, dpi: f64) -> Self {
        Self {
            paper_size,
            dpi,
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    /// Build the PDF in memory.
    #[instrument(skip(self, canvas), fields(paper = %self.paper_size, dpi = self.dpi))]
    pub fn create(&self, canvas: &RasterCanvas) -> Result<Vec<u8>> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(PosterError::Pdf(format!("invalid dpi {}", self.dpi)));
        }
        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Poster");
        info!(title, "Creating print PDF");

        let (width, height) = canvas.dimensions();
        let rgb = canvas.to_image(ChannelLayout::Rgb).into_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        // At the render dpi the raster's natural size is the page size, less
        // the sub-pixel remainder lost to truncation.
        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(self.dpi as f32),
                rotate: None,
            },
        }];

        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        debug!(bytes = output.len(), warnings = warnings.len(), "PDF serialised");
        Ok(output)
    }

    /// Build the PDF and write it to `path`.
    pub fn write_to_file(&self, canvas: &RasterCanvas, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.create(canvas)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote print PDF to {}", path.as_ref().display());
        Ok(())
    }
}
