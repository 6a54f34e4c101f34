// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end chart scenarios: data in, ticks and viewport moves, marks out.

extern crate std;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use geoframe_core::{JoinKey, MarkDiff, MarkId};
use geoframe_map::{MapEngine, MercatorEngine};
use hashbrown::HashSet;
use kurbo::{Size, Vec2};

use crate::{
    ChartComponent, ChartConfig, DataFrame, Dataset, Encoding, ManualScheduler, Record, z_order,
};

type Chart = ChartComponent<MercatorEngine>;

fn chart_with(encoding: Encoding, config: ChartConfig) -> (Chart, Rc<ManualScheduler>) {
    let scheduler = Rc::new(ManualScheduler::new());
    let chart = ChartComponent::new(
        encoding,
        ChartConfig {
            lat_lng_center: Some([0.0, 0.0]),
            zoom: 3.0,
            ..config
        },
        MercatorEngine::new(Size::new(1024.0, 768.0)),
        scheduler.clone(),
    );
    (chart, scheduler)
}

fn tick(chart: &mut Chart, scheduler: &ManualScheduler) {
    scheduler.advance(u64::from(chart.config().frame_rate));
    chart.pump();
}

fn record_id(index: usize) -> MarkId {
    MarkId::for_key(JoinKey::Index(index))
}

fn live_ids(chart: &Chart) -> HashSet<MarkId> {
    let layer = chart.layer().unwrap();
    layer.ids().filter(|id| !layer.is_exiting(*id)).collect()
}

fn value_labels(chart: &Chart) -> Vec<String> {
    let layer = chart.layer().unwrap();
    layer
        .iter()
        .filter(|(mark, _)| mark.z_index == z_order::VALUE_LABELS && !layer.is_exiting(mark.id))
        .map(|(_, visual)| visual.text.clone().unwrap_or_default())
        .collect()
}

#[test]
fn replacement_mid_sequence_draws_frame_zero_of_the_new_data() {
    let (mut chart, scheduler) = chart_with(Encoding::Symbol, ChartConfig::default());
    let old = Dataset::new(
        (0..4)
            .map(|i| DataFrame::new(format!("old{i}"), vec![Record::new(0.0, 0.0, 1.0)]))
            .collect(),
    );
    chart.set_data(old);
    tick(&mut chart, &scheduler);
    tick(&mut chart, &scheduler);
    assert_eq!(chart.frame_index(), 2);

    // A tick already due for the old timer must not advance the new dataset.
    scheduler.advance(1000);
    let new = Dataset::new(vec![
        DataFrame::new("new0", vec![Record::new(5.0, 5.0, 1.0).with_content("🐝")]),
        DataFrame::new("new1", vec![Record::new(6.0, 6.0, 2.0)]),
        DataFrame::new("new2", vec![Record::new(7.0, 7.0, 3.0)]),
    ]);
    chart.set_data(new);
    chart.pump();

    assert_eq!(chart.frame_index(), 0);
    assert_eq!(chart.ticker().text(), "new0");
    assert_eq!(chart.current_frame().unwrap().label, "new0");
    let glyph = chart.layer().unwrap().get(record_id(0)).unwrap();
    assert_eq!(glyph.visual.text.as_deref(), Some("🐝"));
}

#[test]
fn sizes_span_the_global_domain() {
    let config = ChartConfig {
        bubble_max_size: Some(20.0),
        ..ChartConfig::default()
    };
    let (mut chart, scheduler) = chart_with(Encoding::Bubble, config);
    chart.set_data(Dataset::new(vec![
        DataFrame::new("a", vec![Record::new(0.0, 0.0, 10.0)]),
        DataFrame::new("b", vec![Record::new(0.0, 0.0, 50.0)]),
    ]));
    assert_eq!(chart.value_scale().domain(), (10.0, 50.0));
    assert_eq!(chart.value_scale().range(), (0.0, 20.0));

    let bubble = record_id(0);
    assert_eq!(chart.layer().unwrap().get(bubble).unwrap().visual.radius, 0.0);

    tick(&mut chart, &scheduler);
    assert_eq!(chart.layer().unwrap().get(bubble).unwrap().visual.radius, 20.0);
    // The radius tweens over one period.
    chart.advance(500.0);
    let halfway = chart.layer().unwrap().sample(bubble).unwrap().radius;
    assert!((halfway - 10.0).abs() < 1e-9);
    chart.advance(500.0);
    assert_eq!(chart.layer().unwrap().sample(bubble).unwrap().radius, 20.0);
}

#[test]
fn shrinking_frame_removes_exactly_the_stale_positions() {
    let (mut chart, scheduler) = chart_with(Encoding::Bubble, ChartConfig::default());
    chart.set_data(Dataset::new(vec![
        DataFrame::new(
            "three",
            vec![
                Record::new(0.0, 0.0, 10.0),
                Record::new(1.0, 1.0, 20.0),
                Record::new(2.0, 2.0, 30.0),
            ],
        ),
        DataFrame::new("one", vec![Record::new(0.0, 0.0, 40.0)]),
    ]));
    chart.take_diffs();

    tick(&mut chart, &scheduler);
    let diffs = chart.take_diffs();
    let exits: HashSet<MarkId> = diffs.iter().filter(|d| d.is_exit()).map(MarkDiff::id).collect();
    let updates: Vec<MarkId> = diffs.iter().filter(|d| d.is_update()).map(MarkDiff::id).collect();
    assert_eq!(exits, [record_id(1), record_id(2)].into_iter().collect());
    assert_eq!(updates, [record_id(0)]);
    assert!(!diffs.iter().any(MarkDiff::is_enter));

    // Exits are animated, then dropped.
    assert_eq!(chart.layer().unwrap().len(), 3);
    let removed = chart.advance(1000.0);
    assert_eq!(removed.len(), 2);
    assert_eq!(chart.layer().unwrap().len(), 1);
}

#[test]
fn value_labels_follow_the_show_values_flag() {
    let (mut chart, _scheduler) = chart_with(Encoding::LabeledSymbol, ChartConfig::default());
    let unvalued = Record {
        value: None,
        ..Record::new(3.0, 3.0, 0.0)
    };
    chart.set_data(Dataset::single(vec![
        Record::new(1.0, 1.0, 7.0),
        Record::new(2.0, 2.0, 2.5),
        unvalued,
    ]));
    assert!(value_labels(&chart).is_empty());

    chart.set_attribute("show-values", "").unwrap();
    assert_eq!(value_labels(&chart), ["7", "2.5", "0"]);

    chart.set_attribute("show-values", "false").unwrap();
    assert!(value_labels(&chart).is_empty());
    // Symbols stay.
    assert_eq!(live_ids(&chart).len(), 6);
}

#[test]
fn viewport_moves_only_reproject() {
    for encoding in [
        Encoding::Bubble,
        Encoding::Symbol,
        Encoding::PackedSymbol,
        Encoding::LabeledSymbol,
    ] {
        let (mut chart, scheduler) = chart_with(encoding, ChartConfig::default());
        chart.set_data(Dataset::new(vec![
            DataFrame::new(
                "a",
                vec![Record::new(10.0, -20.0, 4.0), Record::new(-5.0, 30.0, 9.0)],
            ),
            DataFrame::new("b", vec![Record::new(0.0, 0.0, 1.0)]),
        ]));
        chart.advance(5000.0);
        let before = live_ids(&chart);
        chart.take_diffs();

        chart.host_mut().pan_by(Vec2::new(-64.0, 32.0));
        let center = chart.host().engine().center();
        chart.host_mut().set_view(center, 4.0);
        chart.pump();

        assert_eq!(live_ids(&chart), before, "{encoding:?}: drawn set changed");
        assert_eq!(chart.frame_index(), 0);
        assert!(!chart.is_animating(), "{encoding:?}: reposition animated");
        let layer = chart.layer().unwrap();
        for (index, record) in chart.current_frame().unwrap().records.iter().enumerate() {
            let at = chart.host().project(record.position());
            let drawn = layer.absolute_position(record_id(index)).unwrap();
            assert!((drawn - at).hypot() < 1e-9, "{encoding:?}: record {index} misplaced");
        }
        for diff in chart.take_diffs() {
            assert!(diff.is_update(), "{encoding:?}: {diff:?}");
        }

        // The next tick still proceeds from the unchanged cursor.
        tick(&mut chart, &scheduler);
        assert_eq!(chart.frame_index(), 1);
    }
}

#[test]
fn empty_frame_clears_the_layer_until_data_returns() {
    let (mut chart, scheduler) = chart_with(Encoding::Symbol, ChartConfig::default());
    chart.set_data(Dataset::new(vec![
        DataFrame::new("full", vec![Record::new(0.0, 0.0, 1.0), Record::new(1.0, 1.0, 2.0)]),
        DataFrame::new("empty", Vec::new()),
    ]));
    tick(&mut chart, &scheduler);
    assert!(live_ids(&chart).is_empty());
    chart.advance(1000.0);
    assert!(chart.layer().unwrap().is_empty());
    tick(&mut chart, &scheduler);
    assert_eq!(live_ids(&chart).len(), 2);
}

#[test]
fn clusters_hold_the_rounded_scaled_count() {
    let (mut chart, scheduler) = chart_with(Encoding::PackedSymbol, ChartConfig::default());
    chart.set_data(Dataset::new(vec![
        DataFrame::new("a", vec![Record::new(0.0, 0.0, 0.0)]),
        DataFrame::new("b", vec![Record::new(0.0, 0.0, 10.0)]),
    ]));
    let children = |chart: &Chart| {
        let layer = chart.layer().unwrap();
        layer
            .iter()
            .filter(|(mark, _)| mark.parent == Some(record_id(0)) && !layer.is_exiting(mark.id))
            .count()
    };
    assert_eq!(children(&chart), 0);
    tick(&mut chart, &scheduler);
    assert_eq!(children(&chart), 20);
    tick(&mut chart, &scheduler);
    assert_eq!(children(&chart), 0);
}

#[test]
fn keyed_join_follows_records_across_reordering() {
    let config = ChartConfig {
        join: crate::JoinStrategy::Keyed,
        ..ChartConfig::default()
    };
    let (mut chart, scheduler) = chart_with(Encoding::Bubble, config);
    chart.set_data(Dataset::new(vec![
        DataFrame::new(
            "a",
            vec![
                Record::new(0.0, 0.0, 1.0).with_key("x"),
                Record::new(1.0, 1.0, 2.0).with_key("y"),
            ],
        ),
        DataFrame::new(
            "b",
            vec![
                Record::new(1.0, 1.0, 2.0).with_key("y"),
                Record::new(0.0, 0.0, 1.0).with_key("x"),
            ],
        ),
    ]));
    chart.take_diffs();
    tick(&mut chart, &scheduler);
    // Same records, new order: nothing to animate.
    assert!(chart.take_diffs().is_empty());
}

#[test]
fn panning_mid_tween_keeps_the_tween_running() {
    let config = ChartConfig {
        bubble_max_size: Some(20.0),
        ..ChartConfig::default()
    };
    let (mut chart, scheduler) = chart_with(Encoding::Bubble, config);
    chart.set_data(Dataset::new(vec![
        DataFrame::new("a", vec![Record::new(10.0, 10.0, 10.0)]),
        DataFrame::new("b", vec![Record::new(10.0, 10.0, 50.0)]),
    ]));
    let bubble = record_id(0);
    tick(&mut chart, &scheduler);
    chart.advance(250.0);
    let before = chart.layer().unwrap().sample(bubble).unwrap();
    assert!((before.radius - 5.0).abs() < 1e-9);

    chart.host_mut().pan_by(Vec2::new(10.0, 0.0));
    chart.pump();
    let after = chart.layer().unwrap().sample(bubble).unwrap();
    assert_eq!(after.radius, before.radius);
    assert_eq!(after.fill, before.fill);
    assert!((after.pos.x - (before.pos.x - 10.0)).abs() < 1e-9);
    assert!(chart.is_animating());

    chart.advance(750.0);
    let settled = chart.layer().unwrap().sample(bubble).unwrap();
    assert_eq!(settled.radius, 20.0);
    let at = chart.host().project(Record::new(10.0, 10.0, 0.0).position());
    assert!((settled.pos - at).hypot() < 1e-9);
}

#[test]
fn exiting_marks_follow_the_map() {
    let (mut chart, scheduler) = chart_with(Encoding::Bubble, ChartConfig::default());
    let leaving = Record::new(-5.0, 12.0, 2.0);
    chart.set_data(Dataset::new(vec![
        DataFrame::new("both", vec![Record::new(0.0, 0.0, 1.0), leaving.clone()]),
        DataFrame::new("one", vec![Record::new(0.0, 0.0, 1.0)]),
    ]));
    tick(&mut chart, &scheduler);
    let gone = record_id(1);
    assert!(chart.layer().unwrap().is_exiting(gone));

    chart.host_mut().pan_by(Vec2::new(100.0, 0.0));
    chart.pump();
    let drawn = chart.layer().unwrap().absolute_position(gone).unwrap();
    let at = chart.host().project(leaving.position());
    assert!((drawn - at).hypot() < 1e-9, "{drawn:?} vs {at:?}");
    assert!(chart.layer().unwrap().is_exiting(gone));

    // Once gone, later moves do not bring it back.
    chart.advance(1000.0);
    chart.host_mut().pan_by(Vec2::new(-40.0, 0.0));
    chart.pump();
    assert!(!chart.layer().unwrap().contains(gone));
}
