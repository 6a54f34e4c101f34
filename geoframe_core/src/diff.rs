// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation output.

extern crate alloc;

use alloc::boxed::Box;

use crate::id::MarkId;
use crate::mark::{MarkKind, Visual};

/// One change produced by reconciling a layer.
///
/// Renderers that keep their own retained scene can apply these directly; renderers that redraw
/// from scratch can ignore them and sample [`crate::Layer::iter`] instead.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A new element was created.
    Enter {
        /// Mark identity.
        id: MarkId,
        /// Element kind.
        kind: MarkKind,
        /// Containing group, if any.
        parent: Option<MarkId>,
        /// Final visual state.
        visual: Box<Visual>,
        /// Duration of the enter animation (zero when the element appears in place).
        duration_ms: u32,
    },
    /// An existing element changed.
    Update {
        /// Mark identity.
        id: MarkId,
        /// Element kind.
        kind: MarkKind,
        /// Visual state at the moment of the update (mid-transition states included).
        old: Box<Visual>,
        /// Target visual state.
        new: Box<Visual>,
        /// Duration of the update animation.
        duration_ms: u32,
    },
    /// An element is leaving.
    Exit {
        /// Mark identity.
        id: MarkId,
        /// Element kind.
        kind: MarkKind,
        /// Visual state when the exit started.
        last: Box<Visual>,
        /// Delay before the element is removed (zero when removed at once).
        duration_ms: u32,
    },
}

impl MarkDiff {
    /// The mark this diff applies to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// The kind of the mark this diff applies to.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Enter { kind, .. } | Self::Update { kind, .. } | Self::Exit { kind, .. } => {
                *kind
            }
        }
    }

    /// Returns `true` for [`MarkDiff::Enter`].
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    /// Returns `true` for [`MarkDiff::Update`].
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    /// Returns `true` for [`MarkDiff::Exit`].
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}
