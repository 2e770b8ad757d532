use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = 2.0 * PI / 3.0;

/// Easing curve, mapping animation progress to eased progress.
///
/// Every curve maps `0.0` to `0.0` and `1.0` to `1.0`. In between, the back and
/// elastic curves deliberately leave `0.0..=1.0` to overshoot; this is never
/// clamped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Sine ease-in.
    InSine,
    /// Sine ease-out.
    OutSine,
    /// Sine ease-in-out; smooth and symmetric.
    InOutSine,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in-out.
    InOutQuart,
    /// Ease-in that first pulls back below zero.
    InBack,
    /// Ease-out that overshoots past one before settling.
    OutBack,
    /// Elastic ease-in.
    InElastic,
    /// Elastic ease-out; springs past the target and oscillates.
    OutElastic,
    /// Bouncing ease-out.
    OutBounce,
}
impl Default for Easing {
    fn default() -> Self {
        Easing::InOutSine
    }
}
impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Easing {
    /// All easing curves, in declaration order.
    pub const ALL: [Easing; 18] = [
        Easing::Linear,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InBack,
        Easing::OutBack,
        Easing::InElastic,
        Easing::OutElastic,
        Easing::OutBounce,
    ];

    /// Returns the conventional camelCase name of the curve (e.g.
    /// `easeOutElastic`).
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::InSine => "easeInSine",
            Easing::OutSine => "easeOutSine",
            Easing::InOutSine => "easeInOutSine",
            Easing::InQuad => "easeInQuad",
            Easing::OutQuad => "easeOutQuad",
            Easing::InOutQuad => "easeInOutQuad",
            Easing::InCubic => "easeInCubic",
            Easing::OutCubic => "easeOutCubic",
            Easing::InOutCubic => "easeInOutCubic",
            Easing::InQuart => "easeInQuart",
            Easing::OutQuart => "easeOutQuart",
            Easing::InOutQuart => "easeInOutQuart",
            Easing::InBack => "easeInBack",
            Easing::OutBack => "easeOutBack",
            Easing::InElastic => "easeInElastic",
            Easing::OutElastic => "easeOutElastic",
            Easing::OutBounce => "easeOutBounce",
        }
    }

    /// Applies the curve to a progress value `t` in `0.0..=1.0`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::InSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::OutSine => (t * PI / 2.0).sin(),
            Easing::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::InQuad => t * t,
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::InCubic => t * t * t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::InQuart => t.powi(4),
            Easing::OutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::InBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Easing::OutBack => {
                1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
            }
            // The elastic curves are only exact at the endpoints if those are
            // special-cased.
            Easing::InElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    -(2.0_f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Easing::OutElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            Easing::OutBounce => out_bounce(t),
        }
    }
}

fn out_bounce(t: f64) -> f64 {
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

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| ConfigError::UnknownEasing(s.to_owned()))
    }
}
