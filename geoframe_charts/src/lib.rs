// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated geographic charts on top of `geoframe_core` and `geoframe_map`.
//!
//! A chart plays a [`Dataset`] (an ordered list of labelled frames of geo-located records) one
//! frame per timer period, re-encoding each frame onto a map overlay:
//! - [`ValueScale`] and [`ColorScale`] map record values to sizes and colors. Their domain spans
//!   every frame, so sizes stay comparable across the animation.
//! - [`FrameSequencer`] is the frame cursor; it wraps around at the end.
//! - [`RenderBinder`] turns a frame into marks for one [`Encoding`] (bubbles, symbols, packed
//!   symbol clusters or labeled symbols) and reconciles them against the layer.
//! - [`ChartComponent`] owns all of the above plus a [`ViewportHost`] and a timer from a
//!   [`Scheduler`], and re-runs the pipeline whenever data or attributes change.
//!
//! Rendering is left to the host: marks live in a [`geoframe_core::Surface`] and changes are
//! reported as [`geoframe_core::MarkDiff`]s.
//!
//! [`ViewportHost`]: geoframe_map::ViewportHost

#![no_std]

extern crate alloc;

mod binder;
mod color;
mod component;
mod config;
mod data;
mod encoding;
#[cfg(not(feature = "std"))]
mod float;
mod info;
mod pack;
mod palette;
mod scale;
#[cfg(test)]
mod scenario_tests;
mod sequencer;
mod timer;
mod tooltip;
mod z_order;

pub use binder::{BindInput, JoinStrategy, MAX_CLUSTER_SIZE, RedrawMode, RenderBinder};
pub use color::ColorScale;
pub use component::{ChartComponent, ChartEvent};
pub use config::{ChartConfig, ConfigChange, ConfigError};
pub use data::{DataError, DataFrame, Dataset, Record};
pub use encoding::{BindingMode, Encoding};
pub use info::{Corner, InfoBox};
pub use pack::{HexPack, PackLayout, PackedCircles};
pub use palette::Palette;
pub use scale::{ValueScale, infer_domain};
pub use sequencer::{FrameChange, FrameSequencer, SequencerState};
pub use timer::{ManualScheduler, Scheduler, TimerCallback, TimerGuard, TimerId};
pub use tooltip::{Tooltip, TooltipTrigger};
pub use z_order::*;
