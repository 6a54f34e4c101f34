// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic coordinates.

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLng {
    /// Latitude, nominally in `[-90, 90]`.
    pub lat: f64,
    /// Longitude, nominally in `[-180, 180]` (wider values are allowed and project linearly).
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` if both components are finite.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// An axis-aligned geographic rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLngBounds {
    /// South-west corner (minimum latitude and longitude).
    pub south_west: LatLng,
    /// North-east corner (maximum latitude and longitude).
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Builds bounds from two opposite corners given in any order.
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Builds bounds from `[[lat, lng], [lat, lng]]` corner pairs.
    pub fn from_pairs(pairs: [[f64; 2]; 2]) -> Self {
        Self::from_corners(pairs[0].into(), pairs[1].into())
    }

    /// Geographic midpoint.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// North-west corner.
    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.north_east.lat, self.south_west.lng)
    }

    /// South-east corner.
    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.south_west.lat, self.north_east.lng)
    }

    /// Returns `true` if `at` lies inside or on the boundary.
    pub fn contains(&self, at: LatLng) -> bool {
        at.lat >= self.south_west.lat
            && at.lat <= self.north_east.lat
            && at.lng >= self.south_west.lng
            && at.lng <= self.north_east.lng
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn corners_are_normalized() {
        let b = LatLngBounds::from_pairs([[79.6, -332.5], [-79.9, 332.2]]);
        assert_eq!(b.south_west, LatLng::new(-79.9, -332.5));
        assert_eq!(b.north_east, LatLng::new(79.6, 332.2));
        assert!(b.contains(LatLng::new(0.0, 0.0)));
        assert!(!b.contains(LatLng::new(85.0, 0.0)));
    }
}
