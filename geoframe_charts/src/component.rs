// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart component: one encoding wired to a viewport, a frame sequencer and a timer.

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use geoframe_core::{Layer, LayerId, MarkDiff, MarkId};
use geoframe_map::{InitialView, LatLng, MapEngine, SubscriptionId, ViewportHost};
use kurbo::Point;

use crate::binder::{BindInput, RedrawMode, RenderBinder};
use crate::color::ColorScale;
use crate::config::{ChartConfig, ConfigChange, ConfigError};
use crate::data::{DataFrame, Dataset};
use crate::encoding::{BindingMode, Encoding};
use crate::info::InfoBox;
use crate::pack::PackLayout;
use crate::scale::ValueScale;
use crate::sequencer::{FrameChange, FrameSequencer, SequencerState};
use crate::timer::{Scheduler, TimerGuard, TimerId};
use crate::tooltip::{Tooltip, TooltipTrigger};

/// Work queued for a chart by its timer and its viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartEvent {
    /// A period elapsed on the given timer.
    Tick(TimerId),
    /// The viewport moved; marks must be re-projected.
    ViewportMoved,
}

type EventQueue = Rc<RefCell<VecDeque<ChartEvent>>>;
type FrameListener = Box<dyn FnMut(&FrameChange)>;

/// An animated geographic chart.
///
/// The component owns every collaborator: the [`ViewportHost`] (and through it the drawing
/// surface), the [`FrameSequencer`], both scales and the [`RenderBinder`]. Timer ticks and
/// viewport moves are queued as [`ChartEvent`]s and handled by [`ChartComponent::pump`], so a
/// callback never re-enters a redraw in progress.
///
/// Replacing the data, or changing any attribute, re-runs the input pipeline: the value domain is
/// recomputed over every frame, both scales are rebuilt, the cursor returns to frame 0, the timer
/// restarts and frame 0 is drawn. Dropping the component cancels its timer.
pub struct ChartComponent<E: MapEngine> {
    encoding: Encoding,
    config: ChartConfig,
    host: ViewportHost<E>,
    layer: LayerId,
    sequencer: FrameSequencer,
    value_scale: ValueScale,
    color_scale: ColorScale,
    binder: RenderBinder,
    scheduler: Rc<dyn Scheduler>,
    timer: Option<TimerGuard>,
    events: EventQueue,
    move_subscription: Option<SubscriptionId>,
    title: InfoBox,
    ticker: InfoBox,
    frame_listeners: Vec<FrameListener>,
    diffs: Vec<MarkDiff>,
    disposed: bool,
}

impl<E: MapEngine + fmt::Debug> fmt::Debug for ChartComponent<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartComponent")
            .field("encoding", &self.encoding)
            .field("config", &self.config)
            .field("host", &self.host)
            .field("layer", &self.layer)
            .field("sequencer", &self.sequencer)
            .field("value_scale", &self.value_scale)
            .field("color_scale", &self.color_scale)
            .field("binder", &self.binder)
            .field("timer", &self.timer)
            .field("events", &self.events.borrow().len())
            .field("title", &self.title)
            .field("ticker", &self.ticker)
            .field("frame_listeners", &self.frame_listeners.len())
            .field("diffs", &self.diffs.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl<E: MapEngine> ChartComponent<E> {
    /// Creates a chart drawing `encoding` over `engine`, with ticks from `scheduler`.
    ///
    /// The view is set from the configuration, the encoding's layer group is created and the
    /// chart subscribes to viewport moves. No timer runs until data arrives.
    pub fn new(
        encoding: Encoding,
        config: ChartConfig,
        engine: E,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        let mut host = ViewportHost::initialize(engine, config.initial_view());
        let layer = host.ensure_layer(encoding.layer_name());
        let events: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
        let queue = Rc::clone(&events);
        let move_subscription = host.on_move(move |_| {
            let mut queue = queue.borrow_mut();
            // Back-to-back moves redraw the same thing once.
            if !matches!(queue.back(), Some(ChartEvent::ViewportMoved)) {
                queue.push_back(ChartEvent::ViewportMoved);
            }
        });
        let title = InfoBox::new(config.title_loc, config.chart_title.as_str());
        let ticker = InfoBox::new(config.ticker_loc, "");
        let color_scale = ColorScale::new(&config.color_scheme, (0.0, 1.0));
        Self {
            encoding,
            sequencer: FrameSequencer::new(config.frame_rate),
            config,
            host,
            layer,
            value_scale: ValueScale::default(),
            color_scale,
            binder: RenderBinder::new(encoding),
            scheduler,
            timer: None,
            events,
            move_subscription: Some(move_subscription),
            title,
            ticker,
            frame_listeners: Vec::new(),
            diffs: Vec::new(),
            disposed: false,
        }
    }

    /// Replaces the cluster layout used by [`Encoding::PackedSymbol`].
    pub fn with_pack_layout(mut self, pack: impl PackLayout + 'static) -> Self {
        self.binder = RenderBinder::new(self.encoding).with_pack_layout(pack);
        self
    }

    /// The chart's encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Current configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The dataset being played.
    pub fn dataset(&self) -> &Dataset {
        self.sequencer.dataset()
    }

    /// Playback state.
    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Index of the frame on screen.
    pub fn frame_index(&self) -> usize {
        self.sequencer.index()
    }

    /// The frame on screen, if any.
    pub fn current_frame(&self) -> Option<&DataFrame> {
        self.sequencer.current_frame()
    }

    /// The size scale in use.
    pub fn value_scale(&self) -> &ValueScale {
        &self.value_scale
    }

    /// The color scale in use.
    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    /// The chart title box.
    pub fn title(&self) -> &InfoBox {
        &self.title
    }

    /// The frame ticker box; shows the current frame's label.
    pub fn ticker(&self) -> &InfoBox {
        &self.ticker
    }

    /// The viewport host.
    pub fn host(&self) -> &ViewportHost<E> {
        &self.host
    }

    /// The viewport host, for panning and zooming. View changes queue a reposition.
    pub fn host_mut(&mut self) -> &mut ViewportHost<E> {
        &mut self.host
    }

    /// The layer group this chart draws into.
    pub fn layer_id(&self) -> LayerId {
        self.layer
    }

    /// The chart's marks.
    pub fn layer(&self) -> Option<&Layer> {
        self.host.surface().layer(self.layer)
    }

    /// The running timer, if playing.
    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(TimerGuard::id)
    }

    /// Returns `true` once disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Calls `listener` with every frame change, including the reset to frame 0.
    pub fn on_frame_change(&mut self, listener: impl FnMut(&FrameChange) + 'static) {
        self.frame_listeners.push(Box::new(listener));
    }

    /// Calls `listener` with the geographic coordinate of every click on the chart.
    pub fn on_chart_click(&mut self, listener: impl FnMut(LatLng) + 'static) -> SubscriptionId {
        self.host.on_click(listener)
    }

    /// Removes a click listener.
    pub fn remove_chart_click(&mut self, id: SubscriptionId) -> bool {
        self.host.unsubscribe(id)
    }

    /// Assigns the dataset.
    ///
    /// Data equal to the current dataset (by value, see [`Dataset::same_data`]) is ignored and
    /// `false` is returned.
    pub fn set_data(&mut self, dataset: Dataset) -> bool {
        if self.disposed || self.sequencer.dataset().same_data(&dataset) {
            return false;
        }
        let change = self.sequencer.set_dataset(dataset);
        self.input_changed(change);
        true
    }

    /// Applies one attribute (see [`ChartConfig::set_attribute`]) and re-runs the input pipeline.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let change = self.config.set_attribute(name, value).inspect_err(|err| {
            log::warn!("{err}");
        })?;
        if self.disposed {
            return Ok(());
        }
        match change {
            ConfigChange::Viewport => self.apply_view(),
            ConfigChange::Timing => self.sequencer.set_period_ms(self.config.frame_rate),
            ConfigChange::Style => {}
        }
        self.refresh_info();
        let change = self.sequencer.rewind();
        self.input_changed(change);
        Ok(())
    }

    /// Replaces the whole configuration and re-runs the input pipeline.
    pub fn set_config(&mut self, config: ChartConfig) {
        if self.disposed {
            self.config = config;
            return;
        }
        let view_changed = config.initial_view() != self.config.initial_view();
        self.config = config;
        if view_changed {
            self.apply_view();
        }
        self.sequencer.set_period_ms(self.config.frame_rate);
        self.refresh_info();
        let change = self.sequencer.rewind();
        self.input_changed(change);
    }

    /// Handles every queued event; returns how many were taken off the queue.
    ///
    /// Ticks from a timer other than the running one are dropped.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let Some(event) = self.events.borrow_mut().pop_front() else {
                break;
            };
            handled += 1;
            if self.disposed {
                continue;
            }
            match event {
                ChartEvent::Tick(id) => {
                    if self.timer_id() == Some(id) {
                        self.tick();
                    } else {
                        log::trace!("stale tick from {id:?} dropped");
                    }
                }
                ChartEvent::ViewportMoved => self.redraw(RedrawMode::Reposition),
            }
        }
        handled
    }

    /// Advances running transitions; returns marks whose exit finished.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<(LayerId, MarkId)> {
        self.host.surface_mut().advance(dt_ms)
    }

    /// Returns `true` while any transition runs.
    pub fn is_animating(&self) -> bool {
        self.host.surface().is_animating()
    }

    /// Takes the changes produced by redraws since the last call.
    pub fn take_diffs(&mut self) -> Vec<MarkDiff> {
        core::mem::take(&mut self.diffs)
    }

    /// Tooltip for a pointer interaction on `mark`.
    ///
    /// Returns `None` unless `trigger` is the configured tooltip type and `mark` is a live,
    /// interactive mark of this chart. Content is read from the current frame on every call.
    pub fn pointer(&self, trigger: TooltipTrigger, mark: MarkId) -> Option<Tooltip> {
        if self.config.tool_tip_type != Some(trigger) {
            return None;
        }
        let layer = self.layer()?;
        if !layer.get(mark)?.interactive || layer.is_exiting(mark) {
            return None;
        }
        let index = self.binder.record_index(mark)?;
        let record = self.sequencer.current_frame()?.records.get(index)?;
        Some(Tooltip::for_record(record, &self.config.symbol))
    }

    /// Tooltip for a pointer interaction at a layer point.
    pub fn pointer_at(&self, trigger: TooltipTrigger, point: Point) -> Option<Tooltip> {
        self.pointer(trigger, self.hit_test(point)?)
    }

    /// The topmost interactive mark under a layer point.
    pub fn hit_test(&self, point: Point) -> Option<MarkId> {
        self.binder.hit_test(self.layer()?, point)
    }

    /// Delivers a click at a layer point to chart-click listeners; returns the coordinate.
    pub fn click(&mut self, point: Point) -> LatLng {
        self.host.click(point)
    }

    /// Cancels the timer, unsubscribes from the viewport and stops the sequencer for good.
    ///
    /// Queued and future events are ignored. Called by `Drop`; calling it twice is harmless.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.timer = None;
        if let Some(id) = self.move_subscription.take() {
            self.host.unsubscribe(id);
        }
        self.sequencer.dispose();
        self.events.borrow_mut().clear();
        self.frame_listeners.clear();
        log::info!("{:?} chart disposed", self.encoding);
    }

    fn input_changed(&mut self, change: Option<FrameChange>) {
        let domain = self
            .sequencer
            .dataset()
            .value_domain()
            .unwrap_or(self.value_scale.domain());
        let range = self.value_range();
        self.value_scale.configure(domain, range);
        self.color_scale.configure(&self.config.color_scheme, domain);
        log::debug!(
            "{:?} input changed: {} frames, domain {domain:?}, range {range:?}",
            self.encoding,
            self.sequencer.frame_count()
        );
        self.restart_timer();
        match change {
            Some(change) => {
                self.announce(&change);
                self.redraw(RedrawMode::Frame);
            }
            None => {
                if let Some(layer) = self.host.surface_mut().layer_mut(self.layer) {
                    let diffs = self.binder.clear(layer);
                    self.diffs.extend(diffs);
                }
            }
        }
    }

    fn value_range(&self) -> (f64, f64) {
        match self.encoding.binding_mode() {
            BindingMode::Cluster => (0.0, self.config.max_symbols),
            BindingMode::PerRecord | BindingMode::Labeled => {
                let max = self.config.bubble_max_size.unwrap_or_else(|| {
                    self.config.max_size / 100.0 * self.host.engine().size().width
                });
                (0.0, max)
            }
        }
    }

    fn restart_timer(&mut self) {
        self.timer = None;
        if !self.sequencer.is_playing() {
            return;
        }
        let events = Rc::clone(&self.events);
        self.timer = Some(TimerGuard::start(
            &self.scheduler,
            self.sequencer.period_ms(),
            Box::new(move |id| events.borrow_mut().push_back(ChartEvent::Tick(id))),
        ));
    }

    fn tick(&mut self) {
        if let Some(change) = self.sequencer.tick() {
            self.announce(&change);
            self.redraw(RedrawMode::Frame);
        }
    }

    fn announce(&mut self, change: &FrameChange) {
        self.ticker.update(&change.label);
        for listener in &mut self.frame_listeners {
            listener(change);
        }
    }

    fn apply_view(&mut self) {
        match self.config.initial_view() {
            InitialView::Bounds(bounds) => self.host.set_bounds(bounds),
            InitialView::CenterZoom { center, zoom } => self.host.set_view(center, zoom),
        }
    }

    fn refresh_info(&mut self) {
        self.title.update(&self.config.chart_title);
        self.title.set_corner(self.config.title_loc);
        self.ticker.set_corner(self.config.ticker_loc);
    }

    fn redraw(&mut self, mode: RedrawMode) {
        if self.disposed {
            return;
        }
        let Some(frame) = self.sequencer.current_frame() else {
            return;
        };
        let (engine, surface) = self.host.parts_mut();
        let Some(layer) = surface.layer_mut(self.layer) else {
            return;
        };
        let project = |at: LatLng| engine.lat_lng_to_layer_point(at);
        let input = BindInput {
            records: &frame.records,
            value_scale: &self.value_scale,
            color_scale: &self.color_scale,
            project: &project,
            config: &self.config,
            mode,
        };
        let diffs = self.binder.bind(layer, &input);
        log::trace!(
            "{mode:?} redraw of frame {}: {} records, {} diffs",
            self.sequencer.index(),
            frame.records.len(),
            diffs.len()
        );
        self.diffs.extend(diffs);
    }
}

impl<E: MapEngine> Drop for ChartComponent<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}
