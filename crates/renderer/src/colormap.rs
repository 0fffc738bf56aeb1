//! Named colormaps mapping a normalized scalar to an RGB colour.
//!
//! Every palette is a set of piecewise-linear ramps, one per channel, given
//! as `(position, intensity)` anchors over `[0, 1]`. Inputs outside `[0, 1]`
//! clamp to the endpoint colour; NaN evaluates as `0`.

use std::fmt;
use std::str::FromStr;

use gpd_common::{GpdError, GpdResult};

/// Suffix selecting the reversed variant of a palette (`jet_r`).
const REVERSED_SUFFIX: &str = "_r";

/// Colour value in RGB format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `[0, 1]`, the form vertex colour buffers take.
    pub fn to_unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

type Anchors = &'static [(f64, f64)];

struct ChannelRamps {
    red: Anchors,
    green: Anchors,
    blue: Anchors,
}

const JET: ChannelRamps = ChannelRamps {
    red: &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    green: &[(0.0, 0.0), (0.125, 0.0), (0.375, 1.0), (0.64, 1.0), (0.91, 0.0), (1.0, 0.0)],
    blue: &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
};

const HOT: ChannelRamps = ChannelRamps {
    red: &[(0.0, 0.0416), (0.365079, 1.0), (1.0, 1.0)],
    green: &[(0.0, 0.0), (0.365079, 0.0), (0.746032, 1.0), (1.0, 1.0)],
    blue: &[(0.0, 0.0), (0.746032, 0.0), (1.0, 1.0)],
};

const COOL: ChannelRamps = ChannelRamps {
    red: &[(0.0, 0.0), (1.0, 1.0)],
    green: &[(0.0, 1.0), (1.0, 0.0)],
    blue: &[(0.0, 1.0), (1.0, 1.0)],
};

const GRAY: ChannelRamps = ChannelRamps {
    red: &[(0.0, 0.0), (1.0, 1.0)],
    green: &[(0.0, 0.0), (1.0, 1.0)],
    blue: &[(0.0, 0.0), (1.0, 1.0)],
};

/// The closed set of built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Jet,
    Hot,
    Cool,
    Gray,
}

impl Palette {
    pub const ALL: [Palette; 4] = [Palette::Jet, Palette::Hot, Palette::Cool, Palette::Gray];

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Jet => "jet",
            Palette::Hot => "hot",
            Palette::Cool => "cool",
            Palette::Gray => "gray",
        }
    }

    fn ramps(&self) -> &'static ChannelRamps {
        match self {
            Palette::Jet => &JET,
            Palette::Hot => &HOT,
            Palette::Cool => &COOL,
            Palette::Gray => &GRAY,
        }
    }
}

impl FromStr for Palette {
    type Err = GpdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jet" => Ok(Palette::Jet),
            "hot" => Ok(Palette::Hot),
            "cool" => Ok(Palette::Cool),
            "gray" | "grey" => Ok(Palette::Gray),
            _ => Err(GpdError::UnknownPalette(s.to_string())),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A palette with an optional reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colormap {
    pub palette: Palette,
    pub reversed: bool,
}

impl Default for Colormap {
    fn default() -> Self {
        Self::new(Palette::Jet, false)
    }
}

impl Colormap {
    pub fn new(palette: Palette, reversed: bool) -> Self {
        Self { palette, reversed }
    }

    /// Parse `jet`, `jet_r`, `hot`, ...
    pub fn from_name(name: &str) -> GpdResult<Self> {
        match name.strip_suffix(REVERSED_SUFFIX) {
            Some(base) => Ok(Self::new(
                base.parse().map_err(|_| GpdError::UnknownPalette(name.to_string()))?,
                true,
            )),
            None => Ok(Self::new(name.parse()?, false)),
        }
    }

    pub fn name(&self) -> String {
        if self.reversed {
            format!("{}{}", self.palette.name(), REVERSED_SUFFIX)
        } else {
            self.palette.name().to_string()
        }
    }

    /// Colour at normalized position `t`.
    pub fn evaluate(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let ramps = self.palette.ramps();
        Rgb::new(
            to_channel(interpolate_ramp(ramps.red, t)),
            to_channel(interpolate_ramp(ramps.green, t)),
            to_channel(interpolate_ramp(ramps.blue, t)),
        )
    }
}

/// Evaluate a palette by name, e.g. `evaluate("jet", 0.3)`.
pub fn evaluate(name: &str, t: f64) -> GpdResult<Rgb> {
    Ok(Colormap::from_name(name)?.evaluate(t))
}

/// Linear interpolation between bracketing anchors.
fn interpolate_ramp(anchors: Anchors, t: f64) -> f64 {
    let (first_x, first_y) = anchors[0];
    if t <= first_x {
        return first_y;
    }

    for pair in anchors.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            let w = (t - x0) / (x1 - x0);
            return y0 + (y1 - y0) * w;
        }
    }

    anchors[anchors.len() - 1].1
}

fn to_channel(intensity: f64) -> u8 {
    (intensity.clamp(0.0, 1.0) * 255.0).round() as u8
}
