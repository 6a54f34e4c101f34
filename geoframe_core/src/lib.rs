// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode drawing surface for animated geographic charts.
//!
//! This crate is the reconciliation layer underneath `geoframe_charts`:
//! - A [`Surface`] is the persistent drawing overlay. It owns named [`Layer`] groups, created
//!   idempotently by name.
//! - A [`Layer`] holds stable-identity [`Mark`]s. Each redraw hands the layer the complete desired
//!   mark set; the layer joins it against what it already holds and reports the result as
//!   [`MarkDiff`]s (enter / update / exit).
//! - Updates and exits may be animated. Active transitions are advanced explicitly with
//!   [`Surface::advance`]; there is no clock inside this crate.
//!
//! Everything is single-threaded and synchronous. Reconciling the same mark set twice is
//! idempotent: the second pass produces no diffs.

#![no_std]

extern crate alloc;

mod diff;
mod id;
mod join;
mod layer;
mod mark;
mod paint;
mod surface;
mod transition;

pub use diff::MarkDiff;
pub use id::{LayerId, MarkId, hash_str, mix64};
pub use join::{JoinKey, JoinPlan, join_keys};
pub use layer::Layer;
pub use mark::{Mark, MarkBuilder, MarkKind, Visual};
pub use paint::Paint;
pub use surface::Surface;
pub use transition::{Easing, Motion, Tween};
