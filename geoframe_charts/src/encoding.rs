// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual encodings: which chart a component draws.

use serde::{Deserialize, Serialize};

/// The visual encoding of a chart, chosen at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// One circle per record: radius from the value, fill from the color scale.
    Bubble,
    /// One glyph per record, sized by value.
    Symbol,
    /// A cluster of glyphs per record; the glyph count comes from the value.
    PackedSymbol,
    /// One glyph per record at a fixed size, with an optional value label.
    LabeledSymbol,
}

/// How records map to marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingMode {
    /// One mark per record.
    PerRecord,
    /// A container per record with value-derived packed children.
    Cluster,
    /// A container per record with a glyph and an optional value label.
    Labeled,
}

impl Encoding {
    /// The binding mode this encoding uses.
    pub fn binding_mode(self) -> BindingMode {
        match self {
            Self::Bubble | Self::Symbol => BindingMode::PerRecord,
            Self::PackedSymbol => BindingMode::Cluster,
            Self::LabeledSymbol => BindingMode::Labeled,
        }
    }

    /// Name of the layer group the encoding draws into.
    pub fn layer_name(self) -> &'static str {
        match self {
            Self::Bubble => "bubbles",
            Self::Symbol => "symbols",
            Self::PackedSymbol => "symbol-clusters",
            Self::LabeledSymbol => "labeled-symbols",
        }
    }

    /// Returns `true` if marks animate between frames.
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::LabeledSymbol)
    }
}
