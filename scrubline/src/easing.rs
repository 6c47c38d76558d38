/// Easing curves used by transition windows and the scrub tween.
///
/// All curves map `[0, 1]` onto `[0, 1]` with `sample(0) == 0` and `sample(1) == 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    SmoothStep,
    /// Quadratic ease-out (decelerating).
    QuadOut,
    /// Cubic ease-out (decelerating). Used for fade-ins.
    CubicOut,
    /// Cubic ease-in-out. Used for fade-outs.
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::QuadOut => {
                let u = 1.0 - t;
                1.0 - u * u
            }
            Self::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
