use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::foundation::error::MaskError;

/// Easing functions used to map normalized progress.
///
/// The default `ease-in`/`ease-out`/`ease-in-out` names resolve to the sinusoidal curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// `1 - cos(t·π/2)`.
    SineIn,
    /// `sin(t·π/2)`.
    SineOut,
    /// `(1 - cos(t·π)) / 2`.
    SineInOut,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// `t⁴`.
    Quartic,
    /// Mirrored bounce.
    BounceIn,
    /// Bounce settling at 1.
    BounceOut,
    /// Bounce in the first half, bounce out in the second.
    BounceInOut,
    /// `2^(10(t-1))`, pinned to 0 at `t = 0`.
    ExpoIn,
    /// `1 - 2^(-10t)`, pinned to 1 at `t = 1`.
    ExpoOut,
    /// Exponential ease-in/out.
    ExpoInOut,
    /// Step from 0 to 1 at the midpoint.
    Square,
    /// Four ramps from 0 to 1.
    Sawtooth,
    /// `2·|t - 0.5|`.
    Triangle,
    /// Rise, notch, then settle.
    BumpDip,
}

impl Ease {
    /// Every easing kind, in declaration order.
    pub const ALL: [Ease; 21] = [
        Self::Linear,
        Self::SineIn,
        Self::SineOut,
        Self::SineInOut,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::Quartic,
        Self::BounceIn,
        Self::BounceOut,
        Self::BounceInOut,
        Self::ExpoIn,
        Self::ExpoOut,
        Self::ExpoInOut,
        Self::Square,
        Self::Sawtooth,
        Self::Triangle,
        Self::BumpDip,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// Input outside the unit interval is clamped first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Self::SineOut => (t * PI / 2.0).sin(),
            Self::SineInOut => (1.0 - (t * PI).cos()) / 2.0,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Quartic => t.powi(4),
            Self::BounceIn => 1.0 - bounce_out(1.0 - t),
            Self::BounceOut => bounce_out(t),
            Self::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
            Self::ExpoIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExpoOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::ExpoInOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::Square => {
                if t < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Sawtooth => (t * 4.0) % 1.0,
            Self::Triangle => 2.0 * (t - 0.5).abs(),
            Self::BumpDip => {
                if t < 0.3 {
                    t * t
                } else if t < 0.6 {
                    (t - 0.45).abs() * 4.0
                } else {
                    1.0 - ((t - 0.6) / 0.4).powi(2)
                }
            }
        }
    }

    /// Whether the curve is non-decreasing on `[0, 1]` with `0 ↦ 0` and `1 ↦ 1`.
    ///
    /// The periodic shaping curves are not, and cannot drive a growth envelope.
    pub fn is_monotonic(self) -> bool {
        !matches!(
            self,
            Self::BounceIn
                | Self::BounceOut
                | Self::BounceInOut
                | Self::Sawtooth
                | Self::Triangle
                | Self::BumpDip
        )
    }

    /// Canonical text name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::SineIn => "ease-in",
            Self::SineOut => "ease-out",
            Self::SineInOut => "ease-in-out",
            Self::InQuad => "quad-in",
            Self::OutQuad => "quad-out",
            Self::InOutQuad => "quad-in-out",
            Self::InCubic => "cubic-in",
            Self::OutCubic => "cubic-out",
            Self::InOutCubic => "cubic-in-out",
            Self::Quartic => "quartic",
            Self::BounceIn => "bounce-in",
            Self::BounceOut => "bounce-out",
            Self::BounceInOut => "bounce-in-out",
            Self::ExpoIn => "exponential-in",
            Self::ExpoOut => "exponential-out",
            Self::ExpoInOut => "exponential-in-out",
            Self::Square => "square",
            Self::Sawtooth => "sawtooth",
            Self::Triangle => "triangle",
            Self::BumpDip => "bump-dip",
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let ease = match key.as_str() {
            "linear" => Self::Linear,
            "ease-in" | "sinusoidal-in" | "sine-in" => Self::SineIn,
            "ease-out" | "sinusoidal-out" | "sine-out" => Self::SineOut,
            "ease-in-out" | "sinusoidal-in-out" | "sine-in-out" => Self::SineInOut,
            "quad-in" => Self::InQuad,
            "quad-out" => Self::OutQuad,
            "quad-in-out" => Self::InOutQuad,
            "cubic-in" => Self::InCubic,
            "cubic-out" => Self::OutCubic,
            "cubic-in-out" => Self::InOutCubic,
            "quartic" => Self::Quartic,
            "bounce-in" => Self::BounceIn,
            "bounce-out" => Self::BounceOut,
            "bounce-in-out" => Self::BounceInOut,
            "exponential-in" | "expo-in" => Self::ExpoIn,
            "exponential-out" | "expo-out" => Self::ExpoOut,
            "exponential-in-out" | "expo-in-out" => Self::ExpoInOut,
            "square" => Self::Square,
            "sawtooth" => Self::Sawtooth,
            "triangle" => Self::Triangle,
            "bump-dip" => Self::BumpDip,
            _ => {
                return Err(MaskError::parse(format!("unknown easing function '{}'", s.trim())));
            }
        };
        Ok(ease)
    }
}

impl serde::Serialize for Ease {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
