// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and stroke values.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use peniko::Color;

/// A fill or stroke value.
///
/// Colors produced by palettes are concrete [`Color`]s and interpolate during transitions.
/// Caller-supplied color strings are kept verbatim as [`Paint::Css`]; they are handed to the
/// renderer as-is and switch discretely.
#[derive(Clone, Debug, Default)]
pub enum Paint {
    /// Nothing painted.
    #[default]
    None,
    /// A concrete sRGB color.
    Color(Color),
    /// A literal CSS color value (`"red"`, `"#3B5998"`, `"rgb(1, 2, 3)"`, ...).
    Css(String),
}

impl Paint {
    /// Wraps a literal CSS color value.
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    /// Returns `true` for [`Paint::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Interpolates towards `to`.
    ///
    /// Two concrete colors blend component-wise in sRGB; anything else takes the target value.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Color(a), Self::Color(b)) => Self::Color(lerp_color(*a, *b, t)),
            _ => to.clone(),
        }
    }

    /// Returns the CSS serialization of this paint.
    pub fn to_css(&self) -> String {
        match self {
            Self::None => String::from("none"),
            Self::Css(s) => s.clone(),
            Self::Color(c) => {
                let rgba = c.to_rgba8();
                if rgba.a == 255 {
                    format!("rgb({}, {}, {})", rgba.r, rgba.g, rgba.b)
                } else {
                    format!(
                        "rgba({}, {}, {}, {})",
                        rgba.r,
                        rgba.g,
                        rgba.b,
                        f64::from(rgba.a) / 255.0
                    )
                }
            }
        }
    }
}

impl PartialEq for Paint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Color(a), Self::Color(b)) => a.components == b.components,
            (Self::Css(a), Self::Css(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "interpolation parameter is in [0, 1]"
    )]
    let t = t as f32;
    let mut out = [0.0_f32; 4];
    for (o, (x, y)) in out.iter_mut().zip(a.components.iter().zip(b.components.iter())) {
        *o = x + (y - x) * t;
    }
    Color::new(out)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn colors_blend_and_literals_switch() {
        let black = Paint::Color(Color::from_rgb8(0, 0, 0));
        let white = Paint::Color(Color::from_rgb8(255, 255, 255));
        assert_eq!(black.lerp(&white, 0.5).to_css(), "rgb(128, 128, 128)");

        let red = Paint::css("red");
        assert_eq!(black.lerp(&red, 0.1), red);
        assert_eq!(red.lerp(&black, 0.1), black);
    }

    #[test]
    fn css_serialization() {
        assert_eq!(Paint::None.to_css(), "none");
        assert_eq!(Paint::css("#3B5998").to_css(), "#3B5998");
        assert_eq!(
            Paint::Color(Color::from_rgb8(1, 2, 3)).to_css(),
            "rgb(1, 2, 3)"
        );
    }
}
