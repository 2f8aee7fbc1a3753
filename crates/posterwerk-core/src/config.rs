// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};

/// Highest accepted raster resolution. A large page at this resolution is
/// about 14000 x 19800 pixels, roughly 1 GiB of RGBA.
pub const MAX_DPI: f64 = 1200.0;

/// Immutable settings for a render. Every value that used to be a global
/// constant lives here so pipelines with different settings can coexist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Raster resolution in dots per inch.
    pub dpi: f64,
    /// Width of the black frame around the page.
    pub border_mm: f64,
    /// Multiplier from nominal point size to rendered glyph size in pixels.
    pub font_scale: f32,
    /// Largest nominal point size a text line may ask for.
    pub max_point_size: f32,
    pub texture: TextureBlend,
    pub geometry: LayoutGeometry,
    pub gamut: GamutSettings,
    pub tracking: TrackingRange,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            border_mm: 10.0,
            font_scale: 4.0,
            max_point_size: 250.0,
            texture: TextureBlend::default(),
            geometry: LayoutGeometry::default(),
            gamut: GamutSettings::default(),
            tracking: TrackingRange::default(),
        }
    }
}

impl RenderConfig {
    /// Same configuration at a different resolution.
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Reject settings that would produce an empty or nonsensical raster.
    pub fn validate(&self) -> Result<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 || self.dpi > MAX_DPI {
            return Err(invalid(format!(
                "dpi must be in (0, {MAX_DPI}], got {}",
                self.dpi
            )));
        }
        if !self.border_mm.is_finite() || self.border_mm < 0.0 {
            return Err(invalid(format!(
                "border width must be zero or more millimetres, got {}",
                self.border_mm
            )));
        }
        if !self.font_scale.is_finite() || self.font_scale <= 0.0 {
            return Err(invalid(format!(
                "font scale must be positive, got {}",
                self.font_scale
            )));
        }
        if !self.max_point_size.is_finite() || self.max_point_size <= 0.0 {
            return Err(invalid(format!(
                "maximum point size must be positive, got {}",
                self.max_point_size
            )));
        }
        if self.texture.fill_percent > 100 {
            return Err(invalid(format!(
                "texture fill must be 0-100%, got {}%",
                self.texture.fill_percent
            )));
        }
        if self.texture.opacity_percent > 100 {
            return Err(invalid(format!(
                "texture opacity must be 0-100%, got {}%",
                self.texture.opacity_percent
            )));
        }
        self.geometry.validate()?;
        if !self.gamut.threshold.is_finite() || self.gamut.threshold <= 0.0 {
            return Err(invalid(format!(
                "gamut threshold must be positive, got {}",
                self.gamut.threshold
            )));
        }
        if self.tracking.min > self.tracking.max {
            return Err(invalid(format!(
                "tracking range {}..={} is empty",
                self.tracking.min, self.tracking.max
            )));
        }
        Ok(())
    }
}

/// How the composited alpha channel is chosen during the Darken texture blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlphaPolicy {
    /// Alpha comes from the texture, scaled by the blend opacity.
    #[default]
    OverlayDerived,
    /// The canvas keeps its own alpha; only colour channels are blended.
    BasePreserved,
}

/// Parameters of the Darken blend that lays the texture over the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureBlend {
    /// Strength of the darken effect on colour channels.
    pub fill_percent: u8,
    /// Scale applied to the texture's alpha.
    pub opacity_percent: u8,
    pub alpha_policy: AlphaPolicy,
}

impl Default for TextureBlend {
    fn default() -> Self {
        Self {
            fill_percent: 95,
            opacity_percent: 100,
            alpha_policy: AlphaPolicy::OverlayDerived,
        }
    }
}

/// Canonical (large-size) placement of the photo and logo, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutGeometry {
    pub photo_width_mm: f64,
    pub logo_width_mm: f64,
    pub logo_height_mm: f64,
    /// Distance from the page top to the logo's vertical centre.
    pub logo_center_mm: f64,
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self {
            photo_width_mm: 297.0,
            logo_width_mm: 217.76,
            logo_height_mm: 99.14,
            logo_center_mm: 70.6,
        }
    }
}

impl LayoutGeometry {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("photo width", self.photo_width_mm),
            ("logo width", self.logo_width_mm),
            ("logo height", self.logo_height_mm),
            ("logo centre", self.logo_center_mm),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be zero or more millimetres, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Which press model the gamut check simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressModel {
    /// Typical coated stock with real process-ink overprints.
    #[default]
    Coated,
    /// Perfect inks; reproduces the plain CMYK-to-RGB formula.
    Ideal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamutSettings {
    /// Euclidean RGB distance above which a colour is reported as shifting.
    pub threshold: f64,
    pub press: PressModel,
}

impl Default for GamutSettings {
    fn default() -> Self {
        Self {
            threshold: 30.0,
            press: PressModel::Coated,
        }
    }
}

/// Inclusive range of accepted tracking values, in thousandths of an em.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingRange {
    pub min: i32,
    pub max: i32,
}

impl Default for TrackingRange {
    fn default() -> Self {
        Self { min: -50, max: 200 }
    }
}

impl TrackingRange {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

fn invalid(message: String) -> PosterError {
    PosterError::InvalidConfig(message)
}
