// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value → color mapping.

extern crate alloc;

use alloc::string::String;

use geoframe_core::Paint;

use crate::palette::Palette;

#[derive(Clone, Debug, PartialEq)]
enum Scheme {
    Sequential {
        palette: Palette,
        domain: (f64, f64),
    },
    Literal(String),
}

/// Maps values to colors through a named palette, or returns a fixed color.
///
/// The scheme string is resolved once, on configuration: a known palette name (see
/// [`Palette::from_name`]) builds a sequential scale over the domain; anything else is kept as a
/// literal CSS color that [`ColorScale::apply`] returns for every input. This lets callers pass
/// `"interpolateViridis"` or `"red"` through the same attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    scheme: Scheme,
}

impl ColorScale {
    /// Creates a scale for `scheme` over `domain`.
    pub fn new(scheme: &str, domain: (f64, f64)) -> Self {
        Self {
            scheme: resolve(scheme, domain),
        }
    }

    /// Re-resolves the scheme and replaces the domain.
    pub fn configure(&mut self, scheme: &str, domain: (f64, f64)) {
        self.scheme = resolve(scheme, domain);
    }

    /// The palette in use, if the scheme named one.
    pub fn palette(&self) -> Option<Palette> {
        match self.scheme {
            Scheme::Sequential { palette, .. } => Some(palette),
            Scheme::Literal(_) => None,
        }
    }

    /// The literal color, if the scheme did not name a palette.
    pub fn literal(&self) -> Option<&str> {
        match &self.scheme {
            Scheme::Literal(literal) => Some(literal),
            Scheme::Sequential { .. } => None,
        }
    }

    /// Maps `value` to a paint.
    ///
    /// A zero-width domain samples the middle of the palette. Non-finite values have no color.
    pub fn apply(&self, value: f64) -> Paint {
        match &self.scheme {
            Scheme::Literal(literal) => Paint::css(literal.as_str()),
            Scheme::Sequential { palette, domain } => {
                if !value.is_finite() {
                    return Paint::None;
                }
                let (d0, d1) = *domain;
                let t = if d1 == d0 {
                    0.5
                } else {
                    (value - d0) / (d1 - d0)
                };
                Paint::Color(palette.sample(t))
            }
        }
    }
}

fn resolve(scheme: &str, domain: (f64, f64)) -> Scheme {
    match Palette::from_name(scheme) {
        Some(palette) => Scheme::Sequential { palette, domain },
        None => Scheme::Literal(String::from(scheme)),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn unknown_names_are_literal_colors() {
        let s = ColorScale::new("red", (0.0, 10.0));
        assert_eq!(s.palette(), None);
        assert_eq!(s.literal(), Some("red"));
        assert_eq!(s.apply(0.0), Paint::css("red"));
        assert_eq!(s.apply(1e9), Paint::css("red"));
        assert_eq!(s.apply(f64::NAN), Paint::css("red"));
    }

    #[test]
    fn palette_names_interpolate_over_the_domain() {
        let s = ColorScale::new("interpolateViridis", (10.0, 50.0));
        assert_eq!(s.palette(), Some(Palette::Viridis));
        assert_eq!(s.apply(10.0), Paint::Color(Palette::Viridis.sample(0.0)));
        assert_eq!(s.apply(50.0), Paint::Color(Palette::Viridis.sample(1.0)));
        assert_eq!(s.apply(30.0), Paint::Color(Palette::Viridis.sample(0.5)));
        assert_ne!(s.apply(10.0), s.apply(50.0));
    }

    #[test]
    fn zero_width_domain_samples_the_midpoint() {
        let s = ColorScale::new("interpolateReds", (4.0, 4.0));
        assert_eq!(s.apply(4.0), Paint::Color(Palette::Reds.sample(0.5)));
        assert_eq!(s.apply(-1.0), s.apply(99.0));
    }

    #[test]
    fn reconfigure_switches_between_palette_and_literal() {
        let mut s = ColorScale::new("interpolateBlues", (0.0, 1.0));
        s.configure("#3B5998", (0.0, 1.0));
        assert_eq!(s.apply(0.3), Paint::css("#3B5998"));
        s.configure("interpolateGreens", (0.0, 1.0));
        assert_eq!(s.palette(), Some(Palette::Greens));
    }
}
