// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map-engine seam and a headless spherical Mercator engine.

use core::f64::consts::PI;

use kurbo::{Point, Size, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::geo::{LatLng, LatLngBounds};

/// The map engine a [`crate::ViewportHost`] delegates to.
///
/// Layer points are the drawing surface's local coordinates. They depend on the current view,
/// so callers must not cache them across view changes.
pub trait MapEngine {
    /// Size of the map container in pixels.
    fn size(&self) -> Size;

    /// Current view center.
    fn center(&self) -> LatLng;

    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Sets center and zoom.
    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Changes the view so that `bounds` is fully visible.
    fn fit_bounds(&mut self, bounds: LatLngBounds);

    /// Pans the view by a pixel offset.
    fn pan_by(&mut self, offset: Vec2);

    /// Projects a geographic coordinate to a layer point.
    fn lat_lng_to_layer_point(&self, at: LatLng) -> Point;

    /// Inverse of [`MapEngine::lat_lng_to_layer_point`].
    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng;

    /// The visible geographic region.
    fn bounds(&self) -> LatLngBounds {
        let size = self.size();
        let nw = self.layer_point_to_lat_lng(Point::ORIGIN);
        let se = self.layer_point_to_lat_lng(Point::new(size.width, size.height));
        LatLngBounds::from_corners(nw, se)
    }
}

const EARTH_RADIUS: f64 = 6_378_137.0;
const MAX_LATITUDE: f64 = 85.051_128_779_8;
const TILE_SIZE: f64 = 256.0;

/// A headless Leaflet-compatible map engine (EPSG:3857, 256px tiles, integer zoom snapping).
///
/// Layer points are measured from the container's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorEngine {
    size: Size,
    center: LatLng,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl MercatorEngine {
    /// Creates an engine for a container of the given size, centered on `(0, 0)` at zoom 0.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            center: LatLng::new(0.0, 0.0),
            zoom: 0.0,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }

    /// Sets the allowed zoom range (integer levels).
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    /// Resizes the container.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Projects to absolute world pixels at `zoom`.
    pub fn project(&self, at: LatLng, zoom: f64) -> Point {
        const D: f64 = PI / 180.0;
        let lat = at.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin = (lat * D).sin();
        let x = EARTH_RADIUS * at.lng * D;
        let y = EARTH_RADIUS * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;

        let scale = TILE_SIZE * zoom.exp2();
        let k = 0.5 / (PI * EARTH_RADIUS);
        Point::new(scale * (k * x + 0.5), scale * (-k * y + 0.5))
    }

    /// Inverse of [`MercatorEngine::project`].
    pub fn unproject(&self, point: Point, zoom: f64) -> LatLng {
        const D: f64 = 180.0 / PI;
        let scale = TILE_SIZE * zoom.exp2();
        let k = 0.5 / (PI * EARTH_RADIUS);
        let x = (point.x / scale - 0.5) / k;
        let y = (point.y / scale - 0.5) / -k;
        LatLng::new(
            (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0) * D,
            x * D / EARTH_RADIUS,
        )
    }

    fn pixel_origin(&self) -> Point {
        (self.project(self.center, self.zoom) - self.size.to_vec2() / 2.0).round()
    }
}

impl MapEngine for MercatorEngine {
    fn size(&self) -> Size {
        self.size
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        let nw = bounds.north_west();
        let se = bounds.south_east();

        let mut best = self.min_zoom.floor();
        let mut z = best;
        while z <= self.max_zoom {
            let a = self.project(nw, z);
            let b = self.project(se, z);
            if b.x - a.x <= self.size.width && b.y - a.y <= self.size.height {
                best = z;
                z += 1.0;
            } else {
                break;
            }
        }

        let a = self.project(nw, best);
        let b = self.project(se, best);
        self.center = self.unproject(a.midpoint(b), best);
        self.zoom = best;
        log::debug!("fit_bounds: center={:?} zoom={}", self.center, self.zoom);
    }

    fn pan_by(&mut self, offset: Vec2) {
        let center_px = self.project(self.center, self.zoom) + offset;
        self.center = self.unproject(center_px, self.zoom);
    }

    fn lat_lng_to_layer_point(&self, at: LatLng) -> Point {
        (self.project(at, self.zoom) - self.pixel_origin()).to_point()
    }

    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng {
        self.unproject(point + self.pixel_origin().to_vec2(), self.zoom)
    }
}
