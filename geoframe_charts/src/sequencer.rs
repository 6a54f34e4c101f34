// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame cursor.

extern crate alloc;

use alloc::string::String;

use crate::data::{DataFrame, Dataset};

/// Playback state of a [`FrameSequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// No frames to play.
    Idle,
    /// Advancing through a non-empty dataset.
    Playing,
    /// Torn down; every further call is ignored.
    Disposed,
}

/// Reported whenever the cursor moves, including the reset to frame 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameChange {
    /// New cursor position.
    pub index: usize,
    /// Label of the frame now current.
    pub label: String,
}

/// A cursor over a dataset's frames, advanced one frame per tick and wrapping at the end.
///
/// The sequencer is clock-agnostic: the owner delivers ticks and restarts its timer whenever
/// [`FrameSequencer::set_dataset`] or [`FrameSequencer::rewind`] report a change.
#[derive(Clone, Debug)]
pub struct FrameSequencer {
    dataset: Dataset,
    index: usize,
    period_ms: u32,
    state: SequencerState,
}

impl FrameSequencer {
    /// An idle sequencer with the given tick period.
    pub fn new(period_ms: u32) -> Self {
        Self {
            dataset: Dataset::default(),
            index: 0,
            period_ms,
            state: SequencerState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Returns `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.state == SequencerState::Playing
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tick period in milliseconds.
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Changes the tick period; takes effect when the owner restarts its timer.
    pub fn set_period_ms(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
    }

    /// The dataset being played.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.dataset.len()
    }

    /// The frame under the cursor; `None` unless playing.
    pub fn current_frame(&self) -> Option<&DataFrame> {
        if self.is_playing() {
            self.dataset.frame(self.index)
        } else {
            None
        }
    }

    /// Replaces the dataset and rewinds to frame 0.
    ///
    /// A non-empty dataset starts playback; an empty one goes idle. Ignored once disposed.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Option<FrameChange> {
        if self.state == SequencerState::Disposed {
            log::debug!("dataset ignored: sequencer disposed");
            return None;
        }
        log::debug!("dataset replaced: {} frames", dataset.len());
        self.dataset = dataset;
        self.rewind()
    }

    /// Rewinds to frame 0 of the current dataset.
    ///
    /// Returns the change when there is a frame to show.
    pub fn rewind(&mut self) -> Option<FrameChange> {
        if self.state == SequencerState::Disposed {
            return None;
        }
        self.index = 0;
        if self.dataset.is_empty() {
            self.state = SequencerState::Idle;
            return None;
        }
        self.state = SequencerState::Playing;
        Some(self.change())
    }

    /// Advances the cursor by one frame, wrapping at the end.
    ///
    /// A single-frame dataset never advances: there is nothing to animate to.
    pub fn tick(&mut self) -> Option<FrameChange> {
        if !self.is_playing() {
            return None;
        }
        let count = self.dataset.len();
        if count <= 1 {
            return None;
        }
        self.index = (self.index + 1) % count;
        log::trace!("tick → frame {}", self.index);
        Some(self.change())
    }

    /// Enters the terminal state and releases the dataset.
    pub fn dispose(&mut self) {
        self.state = SequencerState::Disposed;
        self.dataset = Dataset::default();
        self.index = 0;
    }

    fn change(&self) -> FrameChange {
        FrameChange {
            index: self.index,
            label: self
                .dataset
                .frame(self.index)
                .map(|f| f.label.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::data::Record;

    fn dataset(n: usize) -> Dataset {
        Dataset::new(
            (0..n)
                .map(|i| DataFrame::new(format!("f{i}"), vec![Record::new(0.0, 0.0, i as f64)]))
                .collect(),
        )
    }

    #[test]
    fn starts_idle() {
        let s = FrameSequencer::new(1000);
        assert_eq!(s.state(), SequencerState::Idle);
        assert!(s.current_frame().is_none());
    }

    #[test]
    fn set_dataset_rewinds_and_plays() {
        let mut s = FrameSequencer::new(1000);
        let change = s.set_dataset(dataset(3)).unwrap();
        assert_eq!(change.index, 0);
        assert_eq!(change.label, "f0");
        assert!(s.is_playing());
        assert_eq!(s.current_frame().unwrap().label, "f0");
    }

    #[test]
    fn wraps_after_frame_count_ticks() {
        let mut s = FrameSequencer::new(1000);
        s.set_dataset(dataset(3));
        let labels: Vec<String> = (0..3).filter_map(|_| s.tick()).map(|c| c.label).collect();
        assert_eq!(labels, ["f1", "f2", "f0"]);
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn single_frame_never_advances() {
        let mut s = FrameSequencer::new(1000);
        s.set_dataset(dataset(1));
        for _ in 0..5 {
            assert_eq!(s.tick(), None);
        }
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn replacement_mid_sequence_resets_to_zero() {
        let mut s = FrameSequencer::new(1000);
        s.set_dataset(dataset(4));
        s.tick();
        s.tick();
        assert_eq!(s.index(), 2);
        let change = s.set_dataset(dataset(2)).unwrap();
        assert_eq!(change.index, 0);
        assert_eq!(s.current_frame().unwrap().label, "f0");
    }

    #[test]
    fn empty_dataset_goes_idle() {
        let mut s = FrameSequencer::new(1000);
        s.set_dataset(dataset(2));
        assert_eq!(s.set_dataset(Dataset::default()), None);
        assert_eq!(s.state(), SequencerState::Idle);
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn disposed_is_terminal() {
        let mut s = FrameSequencer::new(1000);
        s.set_dataset(dataset(2));
        s.dispose();
        assert_eq!(s.state(), SequencerState::Disposed);
        assert_eq!(s.tick(), None);
        assert_eq!(s.set_dataset(dataset(2)), None);
        assert_eq!(s.state(), SequencerState::Disposed);
    }
}
