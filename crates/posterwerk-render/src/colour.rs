// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Colour module — RGB/CMYK/HSV conversion and press gamut advisory.

use posterwerk_core::config::{GamutSettings, PressModel};
use posterwerk_core::{Cmyk, Rgb};
use tracing::debug;

/// Derive print percentages from a screen colour.
///
/// Pure black and pure white are special-cased: black would divide by zero
/// and white would run the derivation on values that are all exactly zero.
/// All components are truncated to whole percentages.
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    if rgb == Rgb::BLACK {
        return Cmyk::new(0, 0, 0, 100);
    }
    if rgb == Rgb::WHITE {
        return Cmyk::new(0, 0, 0, 0);
    }

    let [c, m, y] = rgb.channels().map(|channel| 1.0 - f64::from(channel) / 255.0);
    let k = c.min(m).min(y);
    let chroma = |value: f64| to_percent((value - k) / (1.0 - k));

    Cmyk::new(chroma(c), chroma(m), chroma(y), to_percent(k))
}

/// Plain subtractive conversion back to screen colour, truncating each
/// channel. Also the resolver for a background picked as CMYK.
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let [c, m, y, k] = cmyk.fractions();
    let channel = |ink: f64| to_byte(255.0 * (1.0 - ink) * (1.0 - k));
    Rgb::new(channel(c), channel(m), channel(y))
}

/// Resolve a colour-wheel pick. `hue`, `saturation` and `value` are fractions
/// in `0.0..=1.0`; out-of-range input is clamped.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let h = hue.clamp(0.0, 1.0);
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    Rgb::new(to_byte(r * 255.0), to_byte(g * 255.0), to_byte(b * 255.0))
}

/// How ink on paper actually looks, as eight Neugebauer overprint colours.
///
/// Cyan, magenta and yellow coverage interpolate trilinearly between the
/// overprints; black is applied as a neutral multiplicative density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressProfile {
    pub paper: [f64; 3],
    pub cyan: [f64; 3],
    pub magenta: [f64; 3],
    pub yellow: [f64; 3],
    /// Magenta over yellow.
    pub red: [f64; 3],
    /// Cyan over yellow.
    pub green: [f64; 3],
    /// Cyan over magenta.
    pub blue: [f64; 3],
    /// All three process inks.
    pub composite: [f64; 3],
}

impl PressProfile {
    /// Coated stock with typical process-ink overprints.
    pub fn coated() -> Self {
        Self {
            paper: [255.0, 255.0, 255.0],
            cyan: [0.0, 174.0, 239.0],
            magenta: [236.0, 0.0, 140.0],
            yellow: [255.0, 242.0, 0.0],
            red: [237.0, 28.0, 36.0],
            green: [0.0, 166.0, 81.0],
            blue: [46.0, 49.0, 146.0],
            composite: [35.0, 31.0, 32.0],
        }
    }

    /// Perfect inks. Simulating with this profile matches [`cmyk_to_rgb`].
    pub fn ideal() -> Self {
        Self {
            paper: [255.0, 255.0, 255.0],
            cyan: [0.0, 255.0, 255.0],
            magenta: [255.0, 0.0, 255.0],
            yellow: [255.0, 255.0, 0.0],
            red: [255.0, 0.0, 0.0],
            green: [0.0, 255.0, 0.0],
            blue: [0.0, 0.0, 255.0],
            composite: [0.0, 0.0, 0.0],
        }
    }

    pub fn for_model(model: PressModel) -> Self {
        match model {
            PressModel::Coated => Self::coated(),
            PressModel::Ideal => Self::ideal(),
        }
    }

    /// Predict the screen colour of `cmyk` printed with this profile.
    pub fn simulate(&self, cmyk: Cmyk) -> Rgb {
        let [c, m, y, k] = cmyk.fractions();
        let corners = [
            ((1.0 - c) * (1.0 - m) * (1.0 - y), self.paper),
            (c * (1.0 - m) * (1.0 - y), self.cyan),
            ((1.0 - c) * m * (1.0 - y), self.magenta),
            ((1.0 - c) * (1.0 - m) * y, self.yellow),
            ((1.0 - c) * m * y, self.red),
            (c * (1.0 - m) * y, self.green),
            (c * m * (1.0 - y), self.blue),
            (c * m * y, self.composite),
        ];

        let mut mixed = [0.0f64; 3];
        for (weight, colour) in corners {
            for (out, channel) in mixed.iter_mut().zip(colour) {
                *out += weight * channel;
            }
        }

        let [r, g, b] = mixed.map(|channel| to_byte(channel * (1.0 - k)));
        Rgb::new(r, g, b)
    }
}

impl Default for PressProfile {
    fn default() -> Self {
        Self::coated()
    }
}

/// Result of the press gamut advisory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutCheck {
    pub out_of_gamut: bool,
    /// Euclidean distance between the screen colour and its printed estimate.
    pub distance: f64,
    /// The printed estimate, reported only when the colour is out of gamut.
    pub approximate: Option<Rgb>,
}

/// Round-trip `rgb` through CMYK and the configured press profile and report
/// whether it will visibly shift on paper. Advisory only: nothing here
/// changes the colour that gets rendered.
///
/// With [`PressModel::Ideal`] the printed estimate is the plain
/// [`cmyk_to_rgb`] of [`rgb_to_cmyk`], to within one unit per channel. Pick
/// it to get the bare conversion round trip without any press simulation.
pub fn check_gamut_deviation(rgb: Rgb, settings: &GamutSettings) -> GamutCheck {
    let cmyk = rgb_to_cmyk(rgb);
    let printed = PressProfile::for_model(settings.press).simulate(cmyk);
    let distance = rgb_distance(rgb, printed);
    let out_of_gamut = distance > settings.threshold;

    debug!(?rgb, ?cmyk, ?printed, distance, out_of_gamut, "Gamut check");

    GamutCheck {
        out_of_gamut,
        distance,
        approximate: out_of_gamut.then_some(printed),
    }
}

/// Euclidean distance over the three channels.
pub fn rgb_distance(a: Rgb, b: Rgb) -> f64 {
    a.channels()
        .iter()
        .zip(b.channels())
        .map(|(&x, y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

fn to_percent(fraction: f64) -> u8 {
    (fraction * 100.0).clamp(0.0, 100.0) as u8
}

fn to_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
