// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless demos for `geoframe_charts`.
//!
//! Plays every chart encoding against a manual clock, snapshots the overlay between ticks and
//! writes an HTML report of SVG frames. Set `GEOFRAME_LOG` (`error` .. `trace`) for logging.

mod svg;

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use geoframe_charts::{
    ChartComponent, ChartConfig, Dataset, Encoding, ManualScheduler, Record, TooltipTrigger,
};
use geoframe_core::MarkDiff;
use geoframe_map::{LatLng, MercatorEngine};
use kurbo::{Point, Size, Vec2};

const SIZE: Size = Size::new(720.0, 360.0);

const HIVES: &str = r#"[
  {"label": "2019", "data": [
    {"lat": 51.51, "lng": -0.13, "value": 120, "text": "London", "content": "🐝"},
    {"lat": 48.86, "lng": 2.35, "value": 80, "text": "Paris", "content": "🐝"},
    {"lat": -1.29, "lng": 36.82, "value": 40, "text": "Nairobi", "content": "🍯"},
    {"lat": -12.05, "lng": -77.04, "value": 15, "text": "Lima", "content": "🌻"}
  ]},
  {"label": "2020", "data": [
    {"lat": 51.51, "lng": -0.13, "value": 95, "text": "London", "content": "🐝"},
    {"lat": 48.86, "lng": 2.35, "value": 110, "text": "Paris", "content": "🐝"},
    {"lat": -1.29, "lng": 36.82, "value": 70, "text": "Nairobi", "content": "🍯"},
    {"lat": -12.05, "lng": -77.04, "value": 30, "text": "Lima", "content": "🌻"},
    {"lat": 35.68, "lng": 139.69, "value": 60, "text": "Tokyo", "content": "🌸"}
  ]},
  {"label": "2021", "data": [
    {"lat": 51.51, "lng": -0.13, "value": 150, "text": "London", "content": "🐝"},
    {"lat": 48.86, "lng": 2.35, "value": 60, "text": "Paris", "content": "🐝"}
  ]}
]"#;

const HIVES_CONFIG: &str = r#"{
  "lat-lng-bounds": [[62, -100], [-30, 150]],
  "frame-rate": 800,
  "max-size": 4,
  "max-symbols": 12,
  "pack-radius": 60,
  "color-scheme": "interpolateYlOrRd",
  "tool-tip-type": "mouseover",
  "chart-title": "Hives per city",
  "join": "keyed"
}"#;

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = std::env::var("GEOFRAME_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(log::LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// One report section: a title and its SVG frames.
struct Section {
    title: String,
    notes: Vec<String>,
    frames: Vec<String>,
}

type Chart = ChartComponent<MercatorEngine>;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut sections = Vec::new();
    for (title, encoding) in [
        ("Bubbles", Encoding::Bubble),
        ("Symbols", Encoding::Symbol),
        ("Packed symbol clusters", Encoding::PackedSymbol),
    ] {
        sections.push(animated_demo(title, encoding)?);
    }
    sections.push(click_demo()?);

    let html = render_report("geoframe charts demo", &sections);
    std::fs::write("geoframe_demo.html", html)?;
    println!("wrote geoframe_demo.html");
    Ok(())
}

fn chart(encoding: Encoding, config: ChartConfig) -> (Chart, Rc<ManualScheduler>) {
    let scheduler = Rc::new(ManualScheduler::new());
    let chart = ChartComponent::new(
        encoding,
        config,
        MercatorEngine::new(SIZE),
        scheduler.clone(),
    );
    (chart, scheduler)
}

fn snapshot(chart: &Chart, caption: &str) -> String {
    chart
        .layer()
        .map(|layer| svg::layer_to_svg(layer, SIZE, caption))
        .unwrap_or_default()
}

fn tally(diffs: &[MarkDiff]) -> String {
    let enter = diffs.iter().filter(|d| d.is_enter()).count();
    let update = diffs.iter().filter(|d| d.is_update()).count();
    let exit = diffs.iter().filter(|d| d.is_exit()).count();
    format!("{enter} enter / {update} update / {exit} exit")
}

/// Plays one lap of the hive dataset, snapshotting each frame halfway and at rest.
fn animated_demo(title: &str, encoding: Encoding) -> Result<Section, Box<dyn Error>> {
    let config = ChartConfig::from_json(HIVES_CONFIG)?;
    let period = config.frame_rate;
    let (mut chart, scheduler) = chart(encoding, config);
    let labels = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&labels);
    chart.on_frame_change(move |change| sink.borrow_mut().push(change.label.clone()));

    let dataset = Dataset::from_json(HIVES)?;
    let laps = dataset.len();
    chart.set_data(dataset);

    let mut notes = Vec::new();
    let mut frames = Vec::new();
    notes.push(format!("frame 0: {}", tally(&chart.take_diffs())));
    frames.push(snapshot(&chart, chart.ticker().text()));

    for _ in 0..laps {
        scheduler.advance(u64::from(period));
        chart.pump();
        notes.push(format!(
            "frame {}: {}",
            chart.frame_index(),
            tally(&chart.take_diffs())
        ));
        chart.advance(f64::from(period) / 2.0);
        frames.push(snapshot(&chart, &format!("{} (tweening)", chart.ticker().text())));
        chart.advance(f64::from(period) / 2.0);
        frames.push(snapshot(&chart, chart.ticker().text()));
    }

    if let Some(first) = chart.current_frame().and_then(|f| f.records.first()) {
        let at = chart.host().project(first.position());
        if let Some(tip) = chart.pointer_at(TooltipTrigger::MouseOver, at) {
            notes.push(format!("tooltip at {at:?}: {}", tip.content().replace('\n', " / ")));
        }
    }

    chart.host_mut().pan_by(Vec2::new(-120.0, 40.0));
    chart.pump();
    notes.push(format!("after pan: {}", tally(&chart.take_diffs())));
    frames.push(snapshot(&chart, "panned"));

    notes.push(format!("ticker sequence: {}", labels.borrow().join(" → ")));
    chart.dispose();
    notes.push(format!("timers after dispose: {}", scheduler.active_timers()));

    Ok(Section {
        title: format!("{title} ({})", encoding.layer_name()),
        notes,
        frames,
    })
}

/// A static labeled-symbol chart that grows one record per click.
///
/// The placed records are harness state; the chart only reports coordinates.
fn click_demo() -> Result<Section, Box<dyn Error>> {
    let mut config = ChartConfig::from_json(HIVES_CONFIG)?;
    config.show_values = true;
    config.chart_title = String::from("Click to add a hive");
    let (mut chart, _scheduler) = chart(Encoding::LabeledSymbol, config);

    let clicks: Rc<RefCell<Vec<LatLng>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicks);
    chart.on_chart_click(move |at| sink.borrow_mut().push(at));

    let mut placed: Vec<Record> = Vec::new();
    let mut notes = Vec::new();
    let mut frames = Vec::new();
    for point in [
        Point::new(180.0, 120.0),
        Point::new(420.0, 200.0),
        Point::new(600.0, 90.0),
    ] {
        chart.click(point);
        for at in clicks.borrow_mut().drain(..) {
            let n = placed.len() + 1;
            placed.push(Record::new(at.lat, at.lng, (n * 10) as f64).with_text(format!("hive {n}")));
            notes.push(format!("click at ({:.2}, {:.2})", at.lat, at.lng));
        }
        chart.set_data(Dataset::single(placed.clone()));
        chart.pump();
        frames.push(snapshot(&chart, &format!("{} hives", placed.len())));
    }

    Ok(Section {
        title: String::from(chart.title().text()),
        notes,
        frames,
    })
}

fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", svg::escape_xml(title)));
    out.push_str("<style>body{font-family:sans-serif} svg{margin:4px;border:1px solid #ccc}</style>");
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", svg::escape_xml(title)));
    for section in sections {
        out.push_str(&format!("<h2>{}</h2>\n<ul>\n", svg::escape_xml(&section.title)));
        for note in &section.notes {
            out.push_str(&format!("<li>{}</li>\n", svg::escape_xml(note)));
        }
        out.push_str("</ul>\n<div>\n");
        for frame in &section.frames {
            out.push_str(frame);
        }
        out.push_str("</div>\n");
    }
    out.push_str("</body></html>\n");
    out
}
