// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport hosting for `geoframe` charts.
//!
//! The map rendering engine (tiles, gestures) lives outside this workspace. This crate defines
//! the seam to it, [`MapEngine`], and a [`ViewportHost`] that wraps an engine together with the
//! persistent [`geoframe_core::Surface`] overlay:
//! - geographic → layer-point projection, always computed from the current view,
//! - named layer groups created once,
//! - move and click notifications.
//!
//! [`MercatorEngine`] is a headless, Leaflet-compatible spherical Mercator engine used by tests,
//! demos and hosts that do their own tile rendering.

#![no_std]

extern crate alloc;

mod engine;
#[cfg(not(feature = "std"))]
mod float;
mod geo;
mod viewport;

pub use engine::{MapEngine, MercatorEngine};
pub use geo::{LatLng, LatLngBounds};
pub use viewport::{InitialView, SubscriptionId, ViewState, ViewportHost};
