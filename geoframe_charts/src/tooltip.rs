// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content for hovered or touched marks.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use geoframe_map::LatLng;
use serde::{Deserialize, Serialize};

use crate::data::Record;

/// The pointer interaction that opens tooltips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    /// Pointer hover.
    MouseOver,
    /// Touch start.
    TouchStart,
}

impl TooltipTrigger {
    /// Parses `mouseover` / `touchstart`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mouseover" => Some(Self::MouseOver),
            "touchstart" => Some(Self::TouchStart),
            _ => None,
        }
    }
}

/// What a tooltip shows, anchored at the record's geographic position.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Anchor.
    pub position: LatLng,
    /// The record's symbol, or the chart default.
    pub symbol: String,
    /// The record's free text, or empty.
    pub text: String,
    /// The record's value; absent values show as `0`.
    pub value: f64,
}

impl Tooltip {
    /// Builds the tooltip for `record`.
    pub fn for_record(record: &Record, default_symbol: &str) -> Self {
        Self {
            position: record.position(),
            symbol: record
                .symbol
                .clone()
                .unwrap_or_else(|| String::from(default_symbol)),
            text: record.text.clone().unwrap_or_default(),
            value: record.value_or_zero(),
        }
    }

    /// Two-line plain-text rendering: `"<symbol> <text>"` then the value.
    pub fn content(&self) -> String {
        let head = if self.text.is_empty() {
            self.symbol.clone()
        } else {
            format!("{} {}", self.symbol, self.text)
        };
        format!("{head}\n{}", self.value)
    }
}
