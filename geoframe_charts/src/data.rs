// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart input: records, labeled frames and datasets.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use geoframe_map::LatLng;
use serde::{Deserialize, Serialize};

use crate::scale::infer_domain;

/// Error produced while reading a dataset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// The text is not a frame list or a record list.
    #[error("invalid dataset JSON: {0}")]
    Json(String),
}

/// One geo-located data point.
///
/// Only `lat` and `lng` are required. Optional string fields override the chart's defaults for
/// this record; a missing `value` renders as `0` and does not contribute to the value domain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Numeric value driving size, count and color encodings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Glyph used by symbol and cluster encodings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Fill override (any CSS color).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Symbol override for the labeled-symbol encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Free text shown in tooltips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Stable identity for keyed joins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Record {
    /// A record at `(lat, lng)` carrying `value`.
    pub fn new(lat: f64, lng: f64, value: f64) -> Self {
        Self {
            lat,
            lng,
            value: Some(value),
            ..Self::default()
        }
    }

    /// Sets the glyph.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the fill override.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the symbol override.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Sets the tooltip text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the join key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Geographic position.
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Field-wise equality in which NaN equals NaN.
    pub fn same_data(&self, other: &Self) -> bool {
        let num = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        num(self.lat, other.lat)
            && num(self.lng, other.lng)
            && match (self.value, other.value) {
                (Some(a), Some(b)) => num(a, b),
                (a, b) => a.is_none() && b.is_none(),
            }
            && self.content == other.content
            && self.color == other.color
            && self.symbol == other.symbol
            && self.text == other.text
            && self.key == other.key
    }

    /// The value used for rendering: absent and non-finite values render as `0`.
    pub fn value_or_zero(&self) -> f64 {
        self.value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

/// One labeled animation snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    /// Label shown by the frame ticker.
    #[serde(default)]
    pub label: String,
    /// Records in join order.
    #[serde(rename = "data")]
    pub records: Vec<Record>,
}

impl DataFrame {
    /// A frame with the given label and records.
    pub fn new(label: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }
}

/// An ordered sequence of frames, assigned to a chart as a whole.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    frames: Vec<DataFrame>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetJson {
    Frames(Vec<DataFrame>),
    Records(Vec<Record>),
}

impl Dataset {
    /// A dataset from frames.
    pub fn new(frames: Vec<DataFrame>) -> Self {
        Self { frames }
    }

    /// A single unlabeled frame, for charts that do not animate.
    pub fn single(records: Vec<Record>) -> Self {
        Self::new(alloc::vec![DataFrame::new("", records)])
    }

    /// Parses either a frame list (`[{"label": .., "data": [..]}, ..]`) or a flat record list.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        match serde_json::from_str::<DatasetJson>(text) {
            Ok(DatasetJson::Frames(frames)) => Ok(Self::new(frames)),
            Ok(DatasetJson::Records(records)) => Ok(Self::single(records)),
            Err(err) => Err(DataError::Json(err.to_string())),
        }
    }

    /// The frames, in playback order.
    pub fn frames(&self) -> &[DataFrame] {
        &self.frames
    }

    /// Frame at `index`.
    pub fn frame(&self, index: usize) -> Option<&DataFrame> {
        self.frames.get(index)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Appends a frame.
    pub fn push(&mut self, frame: DataFrame) {
        self.frames.push(frame);
    }

    /// Value equality in which NaN equals NaN.
    ///
    /// Unlike `==`, a dataset holding a NaN value is the same data as a copy of itself.
    pub fn same_data(&self, other: &Self) -> bool {
        self.frames.len() == other.frames.len()
            && self.frames.iter().zip(&other.frames).all(|(a, b)| {
                a.label == b.label
                    && a.records.len() == b.records.len()
                    && a.records.iter().zip(&b.records).all(|(a, b)| a.same_data(b))
            })
    }

    /// `[min, max]` over every finite value of every record in every frame.
    ///
    /// Returns `None` when no record carries a finite value.
    pub fn value_domain(&self) -> Option<(f64, f64)> {
        infer_domain(
            self.frames
                .iter()
                .flat_map(|f| f.records.iter())
                .filter_map(|r| r.value),
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn domain_spans_every_frame() {
        let ds = Dataset::new(vec![
            DataFrame::new("a", vec![Record::new(0.0, 0.0, 10.0)]),
            DataFrame::new(
                "b",
                vec![Record::new(0.0, 0.0, 50.0), Record::new(1.0, 1.0, 20.0)],
            ),
        ]);
        assert_eq!(ds.value_domain(), Some((10.0, 50.0)));
    }

    #[test]
    fn absent_and_non_finite_values_are_ignored() {
        let mut missing = Record::new(0.0, 0.0, 0.0);
        missing.value = None;
        let ds = Dataset::single(vec![
            missing.clone(),
            Record::new(0.0, 0.0, f64::NAN),
            Record::new(0.0, 0.0, 4.0),
        ]);
        assert_eq!(ds.value_domain(), Some((4.0, 4.0)));
        assert_eq!(missing.value_or_zero(), 0.0);

        let empty = Dataset::single(vec![missing]);
        assert_eq!(empty.value_domain(), None);
    }

    #[test]
    fn parses_frame_lists() {
        let ds = Dataset::from_json(
            r#"[
                {"label": "2020", "data": [{"lat": 1.5, "lng": 2.5, "value": 3, "content": "🐝"}]},
                {"label": "2021", "data": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.frames()[0].label, "2020");
        let r = &ds.frames()[0].records[0];
        assert_eq!(r.value, Some(3.0));
        assert_eq!(r.content.as_deref(), Some("🐝"));
        assert!(ds.frames()[1].records.is_empty());
    }

    #[test]
    fn parses_flat_record_lists_as_one_frame() {
        let ds = Dataset::from_json(
            r#"[{"lat": 40.7, "lng": -74.0, "text": "test", "value": 1}, {"lat": 0, "lng": 0}]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.frames()[0].label, "");
        assert_eq!(ds.frames()[0].records.len(), 2);
        assert_eq!(ds.frames()[0].records[1].value, None);
    }

    #[test]
    fn empty_list_is_an_empty_dataset() {
        assert!(Dataset::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_input() {
        let err = Dataset::from_json(r#"{"label": "x"}"#).unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn equality_is_structural() {
        let a = Dataset::single(vec![Record::new(1.0, 2.0, 3.0).with_content("x")]);
        let b = Dataset::single(vec![Record::new(1.0, 2.0, 3.0).with_content("x")]);
        assert_eq!(a, b);
        let c = Dataset::single(vec![Record::new(1.0, 2.0, 3.5).with_content("x")]);
        assert_ne!(a, c);
    }

    #[test]
    fn same_data_treats_nan_as_equal() {
        let a = Dataset::single(vec![
            Record::new(1.0, 2.0, f64::NAN),
            Record::new(0.0, 0.0, 1.0),
        ]);
        assert_ne!(a, a.clone());
        assert!(a.same_data(&a.clone()));

        let mut missing = Record::new(1.0, 2.0, 0.0);
        missing.value = None;
        let b = Dataset::single(vec![missing, Record::new(0.0, 0.0, 1.0)]);
        assert!(!a.same_data(&b));
        let c = Dataset::single(vec![Record::new(1.0, 2.0, f64::NAN).with_text("t")]);
        assert!(!a.same_data(&c));
        assert!(!a.same_data(&Dataset::default()));
    }
}
