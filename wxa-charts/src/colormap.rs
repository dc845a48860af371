//! Color scales for charts.

use plotters::style::RGBColor;

/// Cold end of the diverging scale
pub const COOLWARM_LOW: RGBColor = RGBColor(59, 76, 192);
/// Neutral midpoint of the diverging scale
pub const COOLWARM_MID: RGBColor = RGBColor(221, 221, 221);
/// Warm end of the diverging scale
pub const COOLWARM_HIGH: RGBColor = RGBColor(180, 4, 38);

/// Categorical colors for pie slices, cycled
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Diverging blue-white-red scale. `t` is clamped to [0, 1]; NaN maps to
/// the midpoint.
pub fn coolwarm(t: f64) -> RGBColor {
    if t.is_nan() {
        return COOLWARM_MID;
    }
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        lerp(COOLWARM_LOW, COOLWARM_MID, t * 2.0)
    } else {
        lerp(COOLWARM_MID, COOLWARM_HIGH, (t - 0.5) * 2.0)
    }
}

fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Color of the `i`th category
pub fn palette_color(i: usize) -> RGBColor {
    PALETTE[i % PALETTE.len()]
}

/// Linear map from a value range onto [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub min: f64,
    pub max: f64,
}

impl Normalize {
    /// Range of the finite values; `[0, 1]` when there are none
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Normalize>, v| {
                Some(acc.map_or(Normalize { min: v, max: v }, |n| Normalize {
                    min: n.min.min(v),
                    max: n.max.max(v),
                }))
            })
            .unwrap_or(Normalize { min: 0.0, max: 1.0 })
    }

    /// Position of `v` in the range; 0.5 when the range is a single value
    pub fn apply(&self, v: f64) -> f64 {
        if self.max > self.min {
            ((v - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}
