// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Posterwerk compositor.

use serde::{Deserialize, Serialize};

/// Millimetres per inch, the base of every physical-to-raster conversion.
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Supported paper sizes.
///
/// All layout geometry is authored against [`PaperSize::Large`] and scaled
/// down uniformly for [`PaperSize::Small`]; the two share (to within a tenth
/// of a percent) the same aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    /// ISO A3, 297 x 420 mm. The canonical layout size.
    #[serde(alias = "A3", alias = "a3")]
    Large,
    /// ISO A4, 210 x 297 mm.
    #[serde(alias = "A4", alias = "a4")]
    Small,
}

impl PaperSize {
    pub const ALL: [PaperSize; 2] = [PaperSize::Large, PaperSize::Small];

    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            Self::Large => (297.0, 420.0),
            Self::Small => (210.0, 297.0),
        }
    }

    pub fn width_mm(&self) -> f64 {
        self.dimensions_mm().0
    }

    pub fn height_mm(&self) -> f64 {
        self.dimensions_mm().1
    }

    /// Short label used in file names and log output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Large => "A3",
            Self::Small => "A4",
        }
    }
}

impl std::fmt::Display for PaperSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A screen colour, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// A print colour, each component a whole percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Cmyk {
    /// Build a CMYK value, clamping each component to 100.
    pub fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        Self {
            c: c.min(100),
            m: m.min(100),
            y: y.min(100),
            k: k.min(100),
        }
    }

    /// Components as fractions in `0.0..=1.0`.
    pub fn fractions(&self) -> [f64; 4] {
        [
            f64::from(self.c) / 100.0,
            f64::from(self.m) / 100.0,
            f64::from(self.y) / 100.0,
            f64::from(self.k) / 100.0,
        ]
    }
}

/// One line of poster text.
///
/// `position_mm` is the distance of the line's top edge from the top of the
/// page, expressed in canonical (large-size) millimetres. Lines never affect
/// one another's placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    /// Nominal size in points. The rendered pixel size is this value times
    /// the configured font scale.
    pub point_size: f32,
    pub position_mm: f64,
}

impl TextLine {
    /// Top of the headline in the standard layout.
    pub const HEADLINE_TOP_MM: f64 = 367.0;
    /// Gap between the headline and the sub-line, in points.
    pub const SUBLINE_GAP_PT: f64 = 72.0;
    pub const DEFAULT_HEADLINE_PT: f32 = 161.0;
    pub const DEFAULT_SUBLINE_PT: f32 = 43.0;

    pub fn new(text: impl Into<String>, point_size: f32, position_mm: f64) -> Self {
        Self {
            text: text.into(),
            point_size,
            position_mm,
        }
    }

    /// The standard two-line layout: a headline at 367 mm and a sub-line
    /// placed 72 pt below it.
    pub fn headline_pair(
        headline: impl Into<String>,
        headline_pt: f32,
        subline: impl Into<String>,
        subline_pt: f32,
    ) -> Vec<TextLine> {
        let gap_mm = Self::SUBLINE_GAP_PT / POINTS_PER_INCH * MM_PER_INCH;
        vec![
            TextLine::new(headline, headline_pt, Self::HEADLINE_TOP_MM),
            TextLine::new(subline, subline_pt, Self::HEADLINE_TOP_MM + gap_mm),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Everything a caller chooses for one poster, apart from the image and font
/// assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub paper_size: PaperSize,
    pub background: Rgb,
    #[serde(default)]
    pub lines: Vec<TextLine>,
    /// Letter-spacing in thousandths of an em, shared by every line.
    #[serde(default)]
    pub tracking: i32,
}

impl RenderRequest {
    pub fn new(paper_size: PaperSize, background: Rgb) -> Self {
        Self {
            paper_size,
            background,
            lines: Vec::new(),
            tracking: 0,
        }
    }

    pub fn with_lines(mut self, lines: Vec<TextLine>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_tracking(mut self, tracking: i32) -> Self {
        self.tracking = tracking;
        self
    }
}

/// Which of the three image assets a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Texture,
    Photo,
    Logo,
    Font,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Texture => "texture",
            Self::Photo => "photo",
            Self::Logo => "logo",
            Self::Font => "font",
        };
        f.write_str(name)
    }
}

/// Channel layout of a finished raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// Alpha discarded; what screen images and print documents use.
    #[default]
    Rgb,
    Rgba,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_sizes_share_aspect_ratio() {
        let (lw, lh) = PaperSize::Large.dimensions_mm();
        let (sw, sh) = PaperSize::Small.dimensions_mm();
        assert!((lw / lh - sw / sh).abs() < 1e-3);
    }

    #[test]
    fn headline_pair_places_subline_one_inch_lower() {
        let lines = TextLine::headline_pair("oasis", 161.0, "chicago", 43.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].position_mm, 367.0);
        assert!((lines[1].position_mm - 392.4).abs() < 1e-9);
    }

    #[test]
    fn cmyk_new_clamps_components() {
        let cmyk = Cmyk::new(120, 50, 0, 255);
        assert_eq!(cmyk, Cmyk { c: 100, m: 50, y: 0, k: 100 });
    }

    #[test]
    fn paper_size_accepts_iso_names() {
        let size: PaperSize = serde_json::from_str("\"A4\"").unwrap();
        assert_eq!(size, PaperSize::Small);
        let size: PaperSize = serde_json::from_str("\"Large\"").unwrap();
        assert_eq!(size, PaperSize::Large);
    }

    #[test]
    fn request_defaults_lines_and_tracking() {
        let json = r#"{"paper_size":"A3","background":{"r":10,"g":20,"b":30}}"#;
        let request: RenderRequest = serde_json::from_str(json).unwrap();
        assert!(request.lines.is_empty());
        assert_eq!(request.tracking, 0);
        assert_eq!(request.background, Rgb::new(10, 20, 30));
    }
}
