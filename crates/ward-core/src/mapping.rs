//! Range mapping, clamps, easing, and calibrated luminance normalization.

use crate::constants::RANGE_EPS;

/// Easing curve applied inside [`map_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Curve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Curve {
    /// Resolve a configuration name; unknown names map to `Linear`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Curve::Linear,
            "ease_in" => Curve::EaseIn,
            "ease_out" => Curve::EaseOut,
            "ease_in_out" => Curve::EaseInOut,
            _ => Curve::Linear,
        }
    }

    pub fn apply(self, t: f32) -> f32 {
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
            Curve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Curve::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Map `x` from `[in_min, in_max]` into `[out_min, out_max]` through `curve`.
///
/// Inputs outside the source range are clamped, not rejected; a degenerate
/// source span is floored at epsilon so the result stays finite.
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32, curve: Curve) -> f32 {
    let span = (in_max - in_min).max(RANGE_EPS);
    let t = clamp01((x - in_min) / span);
    out_min + (out_max - out_min) * curve.apply(t)
}

/// Normalize raw luminance to 0..1 against calibrated dark/bright references.
///
/// Missing or degenerate references (bright not meaningfully above dark)
/// degrade to a plain clamp of the raw value.
pub fn norm_luminance(y: f32, dark_ref: Option<f32>, bright_ref: Option<f32>) -> f32 {
    match (dark_ref, bright_ref) {
        (Some(dark), Some(bright)) if bright > dark + RANGE_EPS => {
            clamp01((y - dark) / (bright - dark))
        }
        _ => clamp01(y),
    }
}
