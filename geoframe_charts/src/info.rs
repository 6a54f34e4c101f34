// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner info boxes: the chart title and the frame ticker.

extern crate alloc;

use alloc::string::String;

use serde::{Deserialize, Serialize};

/// A corner of the map surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    /// Top left.
    TopLeft,
    /// Top right.
    #[default]
    TopRight,
    /// Bottom left.
    BottomLeft,
    /// Bottom right.
    BottomRight,
}

impl Corner {
    /// Parses `topleft`, `topright`, `bottomleft` or `bottomright`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "topleft" => Some(Self::TopLeft),
            "topright" => Some(Self::TopRight),
            "bottomleft" => Some(Self::BottomLeft),
            "bottomright" => Some(Self::BottomRight),
            _ => None,
        }
    }
}

/// A text box pinned to a corner of the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoBox {
    corner: Corner,
    text: String,
}

impl InfoBox {
    /// A box at `corner` showing `text`.
    pub fn new(corner: Corner, text: impl Into<String>) -> Self {
        Self {
            corner,
            text: text.into(),
        }
    }

    /// Where the box is pinned.
    pub fn corner(&self) -> Corner {
        self.corner
    }

    /// Moves the box.
    pub fn set_corner(&mut self, corner: Corner) {
        self.corner = corner;
    }

    /// Displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text; returns `true` if it changed.
    pub fn update(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        true
    }
}
