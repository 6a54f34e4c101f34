// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport host: map engine + drawing overlay + view notifications.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use geoframe_core::{LayerId, Surface};
use kurbo::{Point, Vec2};

use crate::engine::MapEngine;
use crate::geo::{LatLng, LatLngBounds};

/// How the view is set up when the host is initialized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitialView {
    /// Fit the given region.
    Bounds(LatLngBounds),
    /// Center on a coordinate at a zoom level.
    CenterZoom {
        /// View center.
        center: LatLng,
        /// Zoom level.
        zoom: f64,
    },
}

/// A snapshot of the view, passed to move listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// View center.
    pub center: LatLng,
    /// Zoom level.
    pub zoom: f64,
    /// Visible region.
    pub bounds: LatLngBounds,
}

/// Handle returned by [`ViewportHost::on_move`] and [`ViewportHost::on_click`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type MoveListener = Box<dyn FnMut(&ViewState)>;
type ClickListener = Box<dyn FnMut(LatLng)>;

/// Owns the map engine and the drawing overlay.
///
/// The overlay ([`Surface`]) is created once, at initialization, and is only ever mutated through
/// [`ViewportHost::parts_mut`] or [`ViewportHost::surface_mut`]. Every view change (bounds, view,
/// pan) notifies move listeners after the engine has been updated, so a listener that re-projects
/// sees the new mapping.
pub struct ViewportHost<E> {
    engine: E,
    surface: Surface,
    move_listeners: Vec<(SubscriptionId, MoveListener)>,
    click_listeners: Vec<(SubscriptionId, ClickListener)>,
    next_subscription: u64,
}

impl<E: fmt::Debug> fmt::Debug for ViewportHost<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportHost")
            .field("engine", &self.engine)
            .field("surface", &self.surface)
            .field("move_listeners", &self.move_listeners.len())
            .field("click_listeners", &self.click_listeners.len())
            .field("next_subscription", &self.next_subscription)
            .finish()
    }
}

impl<E: MapEngine> ViewportHost<E> {
    /// Applies the initial view to `engine` and creates the drawing overlay.
    pub fn initialize(mut engine: E, view: InitialView) -> Self {
        match view {
            InitialView::Bounds(bounds) => engine.fit_bounds(bounds),
            InitialView::CenterZoom { center, zoom } => engine.set_view(center, zoom),
        }
        log::debug!(
            "viewport initialized: center={:?} zoom={}",
            engine.center(),
            engine.zoom()
        );
        Self {
            engine,
            surface: Surface::new(),
            move_listeners: Vec::new(),
            click_listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the layer group named `name`, creating it on first use.
    pub fn ensure_layer(&mut self, name: &str) -> LayerId {
        self.surface.ensure_layer(name)
    }

    /// The map engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The drawing overlay.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The drawing overlay, for mutation.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Borrows the engine (for projection) and the overlay (for mutation) at the same time.
    pub fn parts_mut(&mut self) -> (&E, &mut Surface) {
        (&self.engine, &mut self.surface)
    }

    /// Projects a geographic coordinate to a layer point using the current view.
    pub fn project(&self, at: LatLng) -> Point {
        self.engine.lat_lng_to_layer_point(at)
    }

    /// Converts a layer point back to a geographic coordinate.
    pub fn unproject(&self, point: Point) -> LatLng {
        self.engine.layer_point_to_lat_lng(point)
    }

    /// The current view.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            center: self.engine.center(),
            zoom: self.engine.zoom(),
            bounds: self.engine.bounds(),
        }
    }

    /// Subscribes to view changes.
    pub fn on_move(&mut self, listener: impl FnMut(&ViewState) + 'static) -> SubscriptionId {
        let id = self.next_id();
        self.move_listeners.push((id, Box::new(listener)));
        id
    }

    /// Subscribes to map clicks; listeners receive the clicked coordinate.
    pub fn on_click(&mut self, listener: impl FnMut(LatLng) + 'static) -> SubscriptionId {
        let id = self.next_id();
        self.click_listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a move or click subscription. Returns `false` if it was not found.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.move_listeners.len() + self.click_listeners.len();
        self.move_listeners.retain(|(sid, _)| *sid != id);
        self.click_listeners.retain(|(sid, _)| *sid != id);
        before != self.move_listeners.len() + self.click_listeners.len()
    }

    /// Fits the view to `bounds` and notifies move listeners.
    pub fn set_bounds(&mut self, bounds: LatLngBounds) {
        self.engine.fit_bounds(bounds);
        self.notify_move();
    }

    /// Sets center and zoom and notifies move listeners.
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.engine.set_view(center, zoom);
        self.notify_move();
    }

    /// Pans by a pixel offset and notifies move listeners.
    pub fn pan_by(&mut self, offset: Vec2) {
        self.engine.pan_by(offset);
        self.notify_move();
    }

    /// Delivers a click at a layer point to click listeners; returns the clicked coordinate.
    pub fn click(&mut self, point: Point) -> LatLng {
        let at = self.unproject(point);
        for (_, listener) in &mut self.click_listeners {
            listener(at);
        }
        at
    }

    fn notify_move(&mut self) {
        let state = self.view_state();
        log::trace!("viewport moved: {state:?}");
        for (_, listener) in &mut self.move_listeners {
            listener(&state);
        }
    }

    fn next_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use core::cell::{Cell, RefCell};

    use kurbo::Size;

    use super::*;
    use crate::engine::MercatorEngine;

    fn host() -> ViewportHost<MercatorEngine> {
        ViewportHost::initialize(
            MercatorEngine::new(Size::new(400.0, 300.0)),
            InitialView::CenterZoom {
                center: LatLng::new(0.0, 0.0),
                zoom: 3.0,
            },
        )
    }

    #[test]
    fn move_listeners_see_the_new_projection() {
        let mut h = host();
        let seen = Rc::new(Cell::new(0_u32));
        let seen2 = Rc::clone(&seen);
        h.on_move(move |state| {
            assert_eq!(state.zoom, 4.0);
            seen2.set(seen2.get() + 1);
        });
        let before = h.project(LatLng::new(20.0, 20.0));
        h.set_view(LatLng::new(0.0, 0.0), 4.0);
        let after = h.project(LatLng::new(20.0, 20.0));
        assert_eq!(seen.get(), 1);
        assert_ne!(before, after);
    }

    #[test]
    fn unsubscribed_listeners_are_not_called() {
        let mut h = host();
        let seen = Rc::new(Cell::new(0_u32));
        let seen2 = Rc::clone(&seen);
        let id = h.on_move(move |_| seen2.set(seen2.get() + 1));
        h.pan_by(Vec2::new(10.0, 0.0));
        assert!(h.unsubscribe(id));
        assert!(!h.unsubscribe(id));
        h.pan_by(Vec2::new(10.0, 0.0));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn clicks_are_delivered_as_coordinates() {
        let mut h = host();
        let got = Rc::new(RefCell::new(None));
        let got2 = Rc::clone(&got);
        h.on_click(move |at| *got2.borrow_mut() = Some(at));
        let target = LatLng::new(12.0, -30.0);
        let p = h.project(target);
        let at = h.click(p);
        let delivered = got.borrow().unwrap();
        assert_eq!(at, delivered);
        assert!((at.lat - target.lat).abs() < 1e-9 && (at.lng - target.lng).abs() < 1e-9);
    }

    #[test]
    fn layer_groups_are_idempotent() {
        let mut h = host();
        let a = h.ensure_layer("bubbles");
        assert_eq!(h.ensure_layer("bubbles"), a);
        assert_eq!(h.surface().layers().count(), 1);
    }
}
