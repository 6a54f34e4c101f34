// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration: the attribute surface of a chart component.

extern crate alloc;

use alloc::string::{String, ToString};

use geoframe_map::{InitialView, LatLng, LatLngBounds};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::binder::JoinStrategy;
use crate::info::Corner;
use crate::tooltip::TooltipTrigger;

/// Error produced when an attribute or configuration document is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No attribute has this name.
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    /// The value is not a finite number in the accepted range.
    #[error("attribute `{name}`: `{value}` is not a valid number")]
    InvalidNumber {
        /// Attribute name.
        name: String,
        /// Rejected value.
        value: String,
    },
    /// The value is not valid JSON of the expected shape.
    #[error("attribute `{name}`: {message}")]
    InvalidJson {
        /// Attribute name.
        name: String,
        /// Parser message.
        message: String,
    },
    /// The value is not one of the accepted keywords.
    #[error("attribute `{name}`: unsupported value `{value}`")]
    InvalidChoice {
        /// Attribute name.
        name: String,
        /// Rejected value.
        value: String,
    },
}

/// What an accepted attribute change affects, beyond re-running the chart's input pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigChange {
    /// The initial view (bounds, center or zoom).
    Viewport,
    /// The frame period.
    Timing,
    /// Scales, styling or interaction.
    Style,
}

/// Every configurable property of a chart.
///
/// Field names map to kebab-case attribute names (`frame_rate` ↔ `frame-rate`), both for
/// [`ChartConfig::set_attribute`] and for JSON documents read with [`ChartConfig::from_json`].
/// Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChartConfig {
    /// Initial view region, as `[[lat, lng], [lat, lng]]`.
    pub lat_lng_bounds: [[f64; 2]; 2],
    /// Initial center; takes precedence over the bounds when set.
    pub lat_lng_center: Option<[f64; 2]>,
    /// Zoom used with `lat_lng_center`.
    pub zoom: f64,
    /// Frame period in milliseconds.
    pub frame_rate: u32,
    /// Largest bubble radius or glyph size, in percent of the surface width.
    pub max_size: f64,
    /// Largest bubble radius in pixels; overrides `max_size` when set.
    pub bubble_max_size: Option<f64>,
    /// Glyph count drawn for the largest value in a cluster.
    pub max_symbols: f64,
    /// Diameter of a symbol cluster in pixels.
    pub pack_radius: f64,
    /// Gap between packed glyphs.
    pub pack_padding: f64,
    /// Maximum random offset applied to each packed glyph, in pixels.
    pub jitter: f64,
    /// Palette name or literal CSS color.
    pub color_scheme: String,
    /// Bubble outline color.
    pub bubble_stroke: String,
    /// Bubble fill opacity.
    pub fill_opacity: f64,
    /// Default symbol for records without one.
    pub symbol: String,
    /// Default glyph for records without content.
    pub content: String,
    /// Symbol font size for the labeled-symbol encoding.
    pub symbol_font_size: f64,
    /// Value label font size.
    pub value_font_size: f64,
    /// Draws a value label above each labeled symbol.
    pub show_values: bool,
    /// Pointer interaction that opens tooltips; `None` disables tooltips.
    pub tool_tip_type: Option<TooltipTrigger>,
    /// Title text; empty for no title.
    pub chart_title: String,
    /// Title placement.
    pub title_loc: Corner,
    /// Frame ticker placement.
    pub ticker_loc: Corner,
    /// How records are matched to marks between frames.
    pub join: JoinStrategy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            lat_lng_bounds: [
                [79.624_056_291_888_1, -332.578_125],
                [-79.997_168_402_852_54, 332.226_562_5],
            ],
            lat_lng_center: None,
            zoom: 5.0,
            frame_rate: 1000,
            max_size: 3.0,
            bubble_max_size: None,
            max_symbols: 20.0,
            pack_radius: 50.0,
            pack_padding: 1.0,
            jitter: 10.0,
            color_scheme: String::from("red"),
            bubble_stroke: String::from("#3B5998"),
            fill_opacity: 0.6,
            symbol: String::from("📍"),
            content: String::from("😂"),
            symbol_font_size: 24.0,
            value_font_size: 12.0,
            show_values: false,
            tool_tip_type: None,
            chart_title: String::new(),
            title_loc: Corner::TopRight,
            ticker_loc: Corner::TopRight,
            join: JoinStrategy::Positional,
        }
    }
}

impl ChartConfig {
    /// Reads a configuration document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::InvalidJson {
            name: String::from("config"),
            message: err.to_string(),
        })
    }

    /// The view the chart opens with.
    pub fn initial_view(&self) -> InitialView {
        match self.lat_lng_center {
            Some(center) => InitialView::CenterZoom {
                center: LatLng::from(center),
                zoom: self.zoom,
            },
            None => InitialView::Bounds(LatLngBounds::from_pairs(self.lat_lng_bounds)),
        }
    }

    /// Applies one string-valued attribute.
    ///
    /// Values parse like HTML attributes: numbers as decimal text, arrays as JSON, booleans by
    /// presence (`""` or `"true"`). An empty value clears optional attributes. On error the
    /// configuration is left unchanged.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<ConfigChange, ConfigError> {
        let change = match name {
            "lat-lng-bounds" => {
                self.lat_lng_bounds = json(name, value)?;
                ConfigChange::Viewport
            }
            "lat-lng-center" => {
                self.lat_lng_center = optional(value, || json(name, value))?;
                ConfigChange::Viewport
            }
            "zoom" => {
                self.zoom = number(name, value)?;
                ConfigChange::Viewport
            }
            "frame-rate" => {
                self.frame_rate = period(name, value)?;
                ConfigChange::Timing
            }
            "max-size" => {
                self.max_size = number(name, value)?;
                ConfigChange::Style
            }
            "bubble-max-size" => {
                self.bubble_max_size = optional(value, || number(name, value))?;
                ConfigChange::Style
            }
            "max-symbols" => {
                self.max_symbols = number(name, value)?;
                ConfigChange::Style
            }
            "pack-radius" => {
                self.pack_radius = number(name, value)?;
                ConfigChange::Style
            }
            "pack-padding" => {
                self.pack_padding = number(name, value)?;
                ConfigChange::Style
            }
            "jitter" => {
                self.jitter = number(name, value)?;
                ConfigChange::Style
            }
            "fill-opacity" => {
                self.fill_opacity = number(name, value)?;
                ConfigChange::Style
            }
            "symbol-font-size" => {
                self.symbol_font_size = number(name, value)?;
                ConfigChange::Style
            }
            "value-font-size" => {
                self.value_font_size = number(name, value)?;
                ConfigChange::Style
            }
            "color-scheme" => {
                self.color_scheme = String::from(value);
                ConfigChange::Style
            }
            "bubble-stroke" => {
                self.bubble_stroke = String::from(value);
                ConfigChange::Style
            }
            "symbol" => {
                self.symbol = String::from(value);
                ConfigChange::Style
            }
            "content" => {
                self.content = String::from(value);
                ConfigChange::Style
            }
            "chart-title" => {
                self.chart_title = String::from(value);
                ConfigChange::Style
            }
            "show-values" => {
                self.show_values = flag(name, value)?;
                ConfigChange::Style
            }
            "tool-tip-type" => {
                self.tool_tip_type = match value {
                    "" | "none" => None,
                    other => Some(
                        TooltipTrigger::from_name(other).ok_or_else(|| choice(name, value))?,
                    ),
                };
                ConfigChange::Style
            }
            "title-loc" => {
                self.title_loc = Corner::from_name(value).ok_or_else(|| choice(name, value))?;
                ConfigChange::Style
            }
            "ticker-loc" => {
                self.ticker_loc = Corner::from_name(value).ok_or_else(|| choice(name, value))?;
                ConfigChange::Style
            }
            "join" => {
                self.join = JoinStrategy::from_name(value).ok_or_else(|| choice(name, value))?;
                ConfigChange::Style
            }
            _ => return Err(ConfigError::UnknownAttribute(String::from(name))),
        };
        Ok(change)
    }
}

fn number(name: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            name: String::from(name),
            value: String::from(value),
        })
}

fn period(name: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            name: String::from(name),
            value: String::from(value),
        })
}

fn flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "" | "true" => Ok(true),
        "false" => Ok(false),
        v if v == name => Ok(true),
        _ => Err(choice(name, value)),
    }
}

fn json<T: DeserializeOwned>(name: &str, value: &str) -> Result<T, ConfigError> {
    serde_json::from_str(value).map_err(|err| ConfigError::InvalidJson {
        name: String::from(name),
        message: err.to_string(),
    })
}

fn optional<T>(
    value: &str,
    parse: impl FnOnce() -> Result<T, ConfigError>,
) -> Result<Option<T>, ConfigError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse().map(Some)
    }
}

fn choice(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidChoice {
        name: String::from(name),
        value: String::from(value),
    }
}
