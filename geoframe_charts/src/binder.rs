// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding records to marks.
//!
//! A [`RenderBinder`] turns the current frame into the complete set of marks for one layer group
//! and hands it to [`Layer::reconcile`], which performs the enter/update/exit join. Marks are
//! recomputed from scratch on every redraw; all persistent state lives in the layer.

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use geoframe_core::{
    JoinKey, Layer, Mark, MarkDiff, MarkId, MarkKind, Motion, Paint, Tween, Visual, hash_str,
    mix64,
};
use geoframe_map::LatLng;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::color::ColorScale;
use crate::config::ChartConfig;
use crate::data::Record;
use crate::encoding::Encoding;
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::pack::{HexPack, PackLayout};
use crate::scale::ValueScale;
use crate::z_order;

/// Upper bound on glyphs in one cluster.
pub const MAX_CLUSTER_SIZE: usize = 4096;

/// Glyph font size as a fraction of the cluster diameter.
const CLUSTER_FONT_RATIO: f64 = 0.3;

/// Value label offset above the symbol, as a fraction of the symbol font size.
const LABEL_LIFT_RATIO: f64 = 0.8;

/// Average glyph advance used for text hit testing, in em.
const GLYPH_ADVANCE_EM: f64 = 0.6;

const JITTER_SALT: u64 = 0x6a09_e667_f3bc_c909;
const DUPLICATE_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// How records are matched to marks from one frame to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStrategy {
    /// By position within the frame.
    ///
    /// Inserting or removing a record anywhere but the end shifts the identity of every record
    /// after it, which animates them into each other's places.
    #[default]
    Positional,
    /// By `record.key`, or when absent a hash of position, content and symbol. Repeated keys
    /// within a frame are told apart by occurrence.
    Keyed,
}

impl JoinStrategy {
    /// Parses `positional` / `keyed`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "positional" => Some(Self::Positional),
            "keyed" => Some(Self::Keyed),
            _ => None,
        }
    }

    /// Join keys for `records`, one per record, all distinct.
    pub fn keys(self, records: &[Record]) -> Vec<JoinKey> {
        match self {
            Self::Positional => (0..records.len()).map(JoinKey::Index).collect(),
            Self::Keyed => {
                let mut seen: HashMap<u64, u64> = HashMap::with_capacity(records.len());
                records
                    .iter()
                    .map(|record| {
                        let base = record_key(record);
                        let n = seen.entry(base).or_insert(0);
                        let key = if *n == 0 {
                            base
                        } else {
                            mix64(base ^ n.wrapping_mul(DUPLICATE_SALT))
                        };
                        *n += 1;
                        JoinKey::Key(key)
                    })
                    .collect()
            }
        }
    }
}

fn record_key(record: &Record) -> u64 {
    match &record.key {
        Some(key) => hash_str(key),
        None => hash_str(&format!(
            "{}|{}|{}|{}",
            record.lat,
            record.lng,
            record.content.as_deref().unwrap_or(""),
            record.symbol.as_deref().unwrap_or("")
        )),
    }
}

/// Why a redraw happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedrawMode {
    /// New frame data: changes animate over the frame period.
    #[default]
    Frame,
    /// The viewport moved: marks, exiting ones included, are re-projected from the positions
    /// they were bound at. Nothing else changes and running transitions keep running.
    Reposition,
}

/// Everything one redraw reads.
pub struct BindInput<'a> {
    /// The current frame's records, in join order.
    pub records: &'a [Record],
    /// Value → size/count mapping.
    pub value_scale: &'a ValueScale,
    /// Value → color mapping.
    pub color_scale: &'a ColorScale,
    /// Geographic → layer-point projection for the current view.
    pub project: &'a dyn Fn(LatLng) -> Point,
    /// Styling and join configuration.
    pub config: &'a ChartConfig,
    /// Why this redraw happens.
    pub mode: RedrawMode,
}

impl fmt::Debug for BindInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindInput")
            .field("records", &self.records.len())
            .field("value_scale", self.value_scale)
            .field("color_scale", self.color_scale)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Builds marks for one encoding and reconciles them into a layer.
///
/// The binder remembers the geographic anchor of every top-level mark it placed until the layer
/// drops the mark, so a reposition can move marks that are still animating out.
///
/// - [`Encoding::Bubble`] and [`Encoding::Symbol`] bind one mark per record.
/// - [`Encoding::PackedSymbol`] binds a group per record holding `round(scale(value))` glyphs laid
///   out by a [`PackLayout`]. Glyph identities are the group id plus the glyph's position in the
///   layout, so a cluster that grows keeps its existing glyphs and adds new ones.
/// - [`Encoding::LabeledSymbol`] binds a group per record with a glyph and, when `show_values` is
///   set, a value label above it.
#[derive(Debug)]
pub struct RenderBinder {
    encoding: Encoding,
    pack: Box<dyn PackLayout>,
    owners: HashMap<MarkId, usize>,
    anchors: HashMap<MarkId, LatLng>,
}

impl RenderBinder {
    /// A binder for `encoding` using [`HexPack`] for clusters.
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            pack: Box::new(HexPack),
            owners: HashMap::new(),
            anchors: HashMap::new(),
        }
    }

    /// Replaces the cluster layout.
    pub fn with_pack_layout(mut self, pack: impl PackLayout + 'static) -> Self {
        self.pack = Box::new(pack);
        self
    }

    /// The encoding this binder draws.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Index, within the last bound frame, of the record that produced `mark`.
    pub fn record_index(&self, mark: MarkId) -> Option<usize> {
        self.owners.get(&mark).copied()
    }

    /// Builds the marks for `input` without touching any layer.
    pub fn marks(&self, input: &BindInput<'_>) -> Vec<Mark> {
        self.build(input).marks
    }

    /// Redraws `layer` from `input` and returns the resulting changes.
    ///
    /// Binding the same input twice yields no changes the second time. A
    /// [`RedrawMode::Reposition`] ignores the records and only re-projects what is drawn.
    pub fn bind(&mut self, layer: &mut Layer, input: &BindInput<'_>) -> Vec<MarkDiff> {
        if input.mode == RedrawMode::Reposition {
            return self.reposition(layer, input.project);
        }
        let Built {
            marks,
            owners,
            mut anchors,
        } = self.build(input);
        self.owners = owners;
        let diffs = layer.reconcile(marks);
        for (id, at) in self.anchors.drain() {
            if layer.is_exiting(id) {
                anchors.entry(id).or_insert(at);
            }
        }
        self.anchors = anchors;
        diffs
    }

    /// Forgets record ownership and empties `layer`.
    pub fn clear(&mut self, layer: &mut Layer) -> Vec<MarkDiff> {
        self.owners.clear();
        let diffs = layer.clear();
        self.anchors.retain(|id, _| layer.is_exiting(*id));
        diffs
    }

    fn reposition(
        &mut self,
        layer: &mut Layer,
        project: &dyn Fn(LatLng) -> Point,
    ) -> Vec<MarkDiff> {
        self.anchors.retain(|id, _| layer.contains(*id));
        let ids: Vec<MarkId> = layer.ids().collect();
        ids.into_iter()
            .filter_map(|id| {
                let at = *self.anchors.get(&id)?;
                layer.move_to(id, project(at))
            })
            .collect()
    }

    /// The topmost interactive, non-exiting mark under `point`.
    ///
    /// Circles hit within their radius. Text hits within a box one em tall above the anchor and
    /// [`GLYPH_ADVANCE_EM`] wide per character.
    pub fn hit_test(&self, layer: &Layer, point: Point) -> Option<MarkId> {
        let candidates: Vec<(MarkId, MarkKind, Visual)> = layer
            .iter()
            .filter(|(mark, _)| mark.interactive && !layer.is_exiting(mark.id))
            .map(|(mark, visual)| (mark.id, mark.kind, visual))
            .collect();
        candidates.into_iter().rev().find_map(|(id, kind, visual)| {
            let anchor = layer.absolute_position(id)?;
            let hit = match kind {
                MarkKind::Circle => (point - anchor).hypot() <= visual.radius,
                MarkKind::Text => {
                    #[allow(clippy::cast_precision_loss, reason = "glyph counts are small")]
                    let chars = visual.text.as_deref().map_or(0, |t| t.chars().count()) as f64;
                    let width = GLYPH_ADVANCE_EM * visual.font_size * chars;
                    Rect::new(
                        anchor.x,
                        anchor.y - visual.font_size,
                        anchor.x + width,
                        anchor.y,
                    )
                    .contains(point)
                }
                MarkKind::Group => false,
            };
            hit.then_some(id)
        })
    }

    fn build(&self, input: &BindInput<'_>) -> Built {
        let keys = input.config.join.keys(input.records);
        let mut built = Built {
            marks: Vec::with_capacity(input.records.len()),
            owners: HashMap::with_capacity(input.records.len()),
            anchors: HashMap::with_capacity(input.records.len()),
        };
        for (index, (record, key)) in input.records.iter().zip(keys).enumerate() {
            let id = MarkId::for_key(key);
            built.anchors.insert(id, record.position());
            let group = self.record_marks(id, record, input);
            for mark in &group {
                built.owners.insert(mark.id, index);
            }
            built.marks.extend(group);
        }
        built
    }

    fn record_marks(
        &self,
        id: MarkId,
        record: &Record,
        input: &BindInput<'_>,
    ) -> SmallVec<[Mark; 3]> {
        let config = input.config;
        let at = (input.project)(record.position());
        let value = record.value_or_zero();
        let interactive = config.tool_tip_type.is_some();
        let period = config.frame_rate;
        let motion = if self.encoding.is_animated() {
            Motion::linear(period)
        } else {
            Motion::immediate()
        };
        let mut marks = SmallVec::new();
        match self.encoding {
            Encoding::Bubble => {
                let fill = match &record.color {
                    Some(color) => Paint::css(color.as_str()),
                    None => input.color_scale.apply(value),
                };
                let visual = Visual::at(at)
                    .with_radius(input.value_scale.apply(value).max(0.0))
                    .with_fill(fill)
                    .with_stroke(Paint::css(config.bubble_stroke.as_str()))
                    .with_fill_opacity(config.fill_opacity);
                marks.push(
                    Mark::builder(id)
                        .circle()
                        .z_index(z_order::BUBBLES)
                        .visual(visual)
                        .interactive(interactive)
                        .motion(motion.clone())
                        .build(),
                );
            }
            Encoding::Symbol => {
                let mut visual = Visual::at(at)
                    .with_font_size(input.value_scale.apply(value).max(0.0))
                    .with_text(glyph(record, config));
                if let Some(color) = &record.color {
                    visual = visual.with_fill(Paint::css(color.as_str()));
                }
                marks.push(
                    Mark::builder(id)
                        .text()
                        .z_index(z_order::SYMBOLS)
                        .visual(visual)
                        .interactive(interactive)
                        .motion(motion.clone())
                        .build(),
                );
            }
            Encoding::PackedSymbol => {
                marks.push(
                    Mark::builder(id)
                        .group()
                        .z_index(z_order::CONTAINERS)
                        .visual(Visual::at(at))
                        .motion(motion.clone())
                        .build(),
                );
                let count = cluster_size(input.value_scale.apply(value));
                let layout = self
                    .pack
                    .pack(count, config.pack_radius / 2.0, config.pack_padding);
                let font_size = config.pack_radius * CLUSTER_FONT_RATIO;
                let text = glyph(record, config);
                let enter_from = Visual::at(Point::ORIGIN)
                    .with_font_size(0.0)
                    .with_text(text);
                let exit_to = Visual::at(Point::ORIGIN)
                    .with_font_size(font_size)
                    .with_text(text);
                let glyph_motion = motion
                    .clone()
                    .with_enter_from(enter_from, Tween::cubic(period))
                    .with_exit_to(exit_to);
                for (i, center) in layout.centers.iter().enumerate() {
                    let child = id.child(i as u64);
                    let pos = *center + jitter(child, config.jitter);
                    marks.push(
                        Mark::builder(child)
                            .text()
                            .parent(id)
                            .z_index(z_order::SYMBOLS)
                            .visual(Visual::at(pos).with_font_size(font_size).with_text(text))
                            .interactive(interactive)
                            .motion(glyph_motion.clone())
                            .build(),
                    );
                }
            }
            Encoding::LabeledSymbol => {
                marks.push(
                    Mark::builder(id)
                        .group()
                        .z_index(z_order::CONTAINERS)
                        .visual(Visual::at(at))
                        .motion(motion.clone())
                        .build(),
                );
                let symbol = record.symbol.as_deref().unwrap_or(&config.symbol);
                marks.push(
                    Mark::builder(id.part("symbol"))
                        .text()
                        .parent(id)
                        .z_index(z_order::SYMBOLS)
                        .visual(
                            Visual::at(Point::ORIGIN)
                                .with_font_size(config.symbol_font_size)
                                .with_text(symbol),
                        )
                        .interactive(interactive)
                        .motion(motion.clone())
                        .build(),
                );
                if config.show_values {
                    let label = Visual::at(Point::ORIGIN)
                        .with_offset(Vec2::new(
                            0.0,
                            -config.symbol_font_size * LABEL_LIFT_RATIO,
                        ))
                        .with_font_size(config.value_font_size)
                        .with_text(format!("{value}"));
                    marks.push(
                        Mark::builder(id.part("value"))
                            .text()
                            .parent(id)
                            .z_index(z_order::VALUE_LABELS)
                            .visual(label)
                            .motion(motion)
                            .build(),
                    );
                }
            }
        }
        marks
    }
}

struct Built {
    marks: Vec<Mark>,
    owners: HashMap<MarkId, usize>,
    anchors: HashMap<MarkId, LatLng>,
}

fn glyph<'a>(record: &'a Record, config: &'a ChartConfig) -> &'a str {
    record
        .content
        .as_deref()
        .or(record.symbol.as_deref())
        .unwrap_or(&config.content)
}

/// Number of glyphs for a scaled value: rounded, never negative, capped at [`MAX_CLUSTER_SIZE`].
fn cluster_size(scaled: f64) -> usize {
    if scaled.is_nan() || scaled <= 0.0 {
        return 0;
    }
    let rounded = scaled.round();
    let capped = rounded.min(MAX_CLUSTER_SIZE as f64);
    if rounded > capped {
        log::warn!("cluster of {rounded} glyphs capped at {MAX_CLUSTER_SIZE}");
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "positive and capped before the cast"
    )]
    {
        capped as usize
    }
}

/// A stable pseudo-random offset in `[-amount, amount]²` derived from the mark id.
fn jitter(id: MarkId, amount: f64) -> Vec2 {
    if amount.is_nan() || amount <= 0.0 {
        return Vec2::ZERO;
    }
    let h = mix64(id.0 ^ JITTER_SALT);
    let unit = |bits: u64| (bits & 0xffff) as f64 / f64::from(u16::MAX) * 2.0 - 1.0;
    Vec2::new(unit(h) * amount, unit(h >> 16) * amount)
}
