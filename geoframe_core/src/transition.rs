// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition timing.

use crate::mark::Visual;

/// Easing curve applied to normalized transition time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Symmetric cubic ease-in/ease-out.
    CubicInOut,
}

impl Easing {
    /// Maps normalized time `t` (clamped to `[0, 1]`) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// Duration and easing of one transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tween {
    /// Duration in milliseconds. Zero means "apply immediately".
    pub duration_ms: u32,
    /// Easing curve.
    pub easing: Easing,
}

impl Tween {
    /// No animation.
    pub const NONE: Self = Self {
        duration_ms: 0,
        easing: Easing::Linear,
    };

    /// A linear tween.
    pub const fn linear(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::Linear,
        }
    }

    /// A cubic ease-in/ease-out tween.
    pub const fn cubic(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::CubicInOut,
        }
    }

    /// Returns `true` if this tween animates.
    pub fn is_animated(&self) -> bool {
        self.duration_ms > 0
    }
}

/// How a mark moves between states.
///
/// - `update` applies when a joined mark changes.
/// - `enter` applies to new marks that have an `enter_from` start state; without one a new mark
///   appears in its final state.
/// - `exit` delays removal of a stale mark; with `exit_to` the mark also animates towards that
///   state while leaving.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Motion {
    /// Update tween.
    pub update: Tween,
    /// Optional start state for entering marks.
    pub enter_from: Option<Visual>,
    /// Enter tween (only used with `enter_from`).
    pub enter: Tween,
    /// Optional end state for exiting marks.
    pub exit_to: Option<Visual>,
    /// Exit tween.
    pub exit: Tween,
}

impl Motion {
    /// Every change applies immediately.
    pub fn immediate() -> Self {
        Self::default()
    }

    /// Linear update and delayed exit, both over `duration_ms`.
    pub fn linear(duration_ms: u32) -> Self {
        Self {
            update: Tween::linear(duration_ms),
            exit: Tween::linear(duration_ms),
            ..Self::default()
        }
    }

    /// Sets the enter start state and tween.
    pub fn with_enter_from(mut self, from: Visual, tween: Tween) -> Self {
        self.enter_from = Some(from);
        self.enter = tween;
        self
    }

    /// Sets the exit end state.
    pub fn with_exit_to(mut self, to: Visual) -> Self {
        self.exit_to = Some(to);
        self
    }

    /// Sets the exit tween.
    pub fn with_exit(mut self, tween: Tween) -> Self {
        self.exit = tween;
        self
    }
}

/// An in-flight interpolation between two visual states.
#[derive(Clone, Debug)]
pub(crate) struct Transition {
    pub(crate) from: Visual,
    pub(crate) to: Visual,
    pub(crate) tween: Tween,
    pub(crate) elapsed_ms: f64,
}

impl Transition {
    pub(crate) fn new(from: Visual, to: Visual, tween: Tween) -> Self {
        Self {
            from,
            to,
            tween,
            elapsed_ms: 0.0,
        }
    }

    pub(crate) fn progress(&self) -> f64 {
        if self.tween.duration_ms == 0 {
            return 1.0;
        }
        self.tween
            .easing
            .apply(self.elapsed_ms / f64::from(self.tween.duration_ms))
    }

    pub(crate) fn sample(&self) -> Visual {
        self.from.lerp(&self.to, self.progress())
    }

    /// Advances the clock; returns `true` once finished.
    pub(crate) fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        self.elapsed_ms >= f64::from(self.tween.duration_ms)
    }
}
