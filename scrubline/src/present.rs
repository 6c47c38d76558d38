//! Mapping from normalized style state to concrete render attributes.
//!
//! This is the declarative half of the "apply" step: a render layer can take these values and
//! write them as inline styles, markup attributes, or widget properties.

use core::fmt;

use crate::{ItemStyle, NavStyle};

// Exact at both ends.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// An sRGB color with `0..=255` channels and a `0..=1` alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
            a,
        }
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: lerp(self.r, to.r, t),
            g: lerp(self.g, to.g, t),
            b: lerp(self.b, to.b, t),
            a: lerp(self.a, to.a, t),
        }
    }

    fn channel(v: f32) -> u8 {
        (v.clamp(0.0, 255.0) + 0.5) as u8
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = (Self::channel(self.r), Self::channel(self.g), Self::channel(self.b));
        if self.a >= 1.0 {
            write!(f, "rgb({r}, {g}, {b})")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {:.3})", self.a.max(0.0))
        }
    }
}

/// One layer of a box shadow.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowLayer {
    pub offset_y: f32,
    pub blur: f32,
    pub color: Rgba,
}

impl ShadowLayer {
    pub const fn new(offset_y: f32, blur: f32, color: Rgba) -> Self {
        Self {
            offset_y,
            blur,
            color,
        }
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            offset_y: lerp(self.offset_y, to.offset_y, t),
            blur: lerp(self.blur, to.blur, t),
            color: self.color.lerp(to.color, t),
        }
    }
}

/// A two-layer box shadow (an accent glow and a drop shadow).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxShadow {
    pub layers: [ShadowLayer; 2],
}

impl BoxShadow {
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            layers: [
                self.layers[0].lerp(to.layers[0], t),
                self.layers[1].lerp(to.layers[1], t),
            ],
        }
    }
}

impl fmt::Display for BoxShadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, l) in self.layers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "0 {:.1}px {:.1}px {}", l.offset_y, l.blur, l.color)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemAttributes {
    pub opacity: f32,
    /// `false` exactly when `opacity` is zero, so hidden items stop receiving pointer input.
    pub visible: bool,
    pub scale: f32,
    pub blur_px: f32,
    pub shadow: BoxShadow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavAttributes {
    pub opacity: f32,
    pub shift_x: f32,
    pub color: Rgba,
    pub highlighted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillAttributes {
    pub scale_y: f32,
}

/// Concrete render values for the normalized style channels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Appearance {
    /// Scale of an item whose normalized scale is `0`.
    pub hidden_scale: f32,
    pub max_blur_px: f32,
    pub card_rest: BoxShadow,
    pub card_glow: BoxShadow,
    pub nav_rest_opacity: f32,
    pub nav_shift_px: f32,
    pub nav_rest_color: Rgba,
    pub nav_accent_color: Rgba,
}

impl Default for Appearance {
    fn default() -> Self {
        let purple = Rgba::rgba(168, 85, 247, 0.15);
        Self {
            hidden_scale: 0.92,
            max_blur_px: 4.0,
            card_rest: BoxShadow {
                layers: [
                    ShadowLayer::new(0.0, 0.0, Rgba { a: 0.0, ..purple }),
                    ShadowLayer::new(10.0, 30.0, Rgba::rgba(0, 0, 0, 0.3)),
                ],
            },
            card_glow: BoxShadow {
                layers: [
                    ShadowLayer::new(0.0, 60.0, purple),
                    ShadowLayer::new(25.0, 50.0, Rgba::rgba(0, 0, 0, 0.4)),
                ],
            },
            nav_rest_opacity: 0.4,
            nav_shift_px: 4.0,
            nav_rest_color: Rgba::rgba(255, 255, 255, 0.7),
            nav_accent_color: Rgba::rgb(192, 132, 252),
        }
    }
}

impl Appearance {
    pub fn item(&self, style: &ItemStyle) -> ItemAttributes {
        let opacity = style.visibility.clamp(0.0, 1.0);
        ItemAttributes {
            opacity,
            visible: opacity > 0.0,
            scale: lerp(self.hidden_scale, 1.0, style.scale.clamp(0.0, 1.0)),
            blur_px: self.max_blur_px * style.blur.clamp(0.0, 1.0),
            shadow: self.card_rest.lerp(self.card_glow, style.shadow_intensity),
        }
    }

    pub fn nav(&self, style: &NavStyle) -> NavAttributes {
        let t = style.emphasis.clamp(0.0, 1.0);
        NavAttributes {
            opacity: lerp(self.nav_rest_opacity, 1.0, t),
            shift_x: self.nav_shift_px * t,
            color: self.nav_rest_color.lerp(self.nav_accent_color, t),
            highlighted: style.highlighted,
        }
    }

    pub fn fill(&self, fill: f32) -> FillAttributes {
        FillAttributes {
            scale_y: fill.clamp(0.0, 1.0),
        }
    }
}
