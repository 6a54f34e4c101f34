// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Every encoding draws into its own layer group, so these only order marks within a group.
//! Renderers should sort by `(z_index, layer order)` for a deterministic tie-break.

/// Bubble circles.
pub const BUBBLES: i32 = 0;
/// Per-record containers (cluster and labeled-symbol groups).
pub const CONTAINERS: i32 = 10;
/// Symbol glyphs, standalone or inside a container.
pub const SYMBOLS: i32 = 20;
/// Value labels drawn above symbols.
pub const VALUE_LABELS: i32 = 30;
