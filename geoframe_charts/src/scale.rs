// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value → visual-extent mapping.

/// A linear mapping from the dataset's value domain to a visual range (radius, font size,
/// symbol count).
///
/// Values outside the domain extrapolate linearly unless clamping is enabled. A zero-width
/// domain maps every input to the start of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl Default for ValueScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl ValueScale {
    /// Creates a scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Enables or disables clamping outputs to the range.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Replaces domain and range.
    pub fn configure(&mut self, domain: (f64, f64), range: (f64, f64)) {
        self.domain = domain;
        self.range = range;
    }

    /// Maps a value from domain space into range space.
    pub fn apply(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        let t = if self.clamp { t.clamp(0.0, 1.0) } else { t };
        // Exact at both ends of the range.
        r0 * (1.0 - t) + r1 * t
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Infers a `[min, max]` domain from finite values; `None` if there are none.
pub fn infer_domain(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}
