// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A named group of marks and its reconciliation logic.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Vec2};

use crate::diff::MarkDiff;
use crate::id::{LayerId, MarkId};
use crate::join::join_keys;
use crate::mark::{Mark, Visual};
use crate::transition::Transition;

#[derive(Clone, Debug)]
struct Slot {
    mark: Mark,
    transition: Option<Transition>,
    exiting: bool,
}

impl Slot {
    fn current(&self) -> Visual {
        self.transition
            .as_ref()
            .map_or_else(|| self.mark.visual.clone(), Transition::sample)
    }
}

/// A named layer group on the drawing surface.
///
/// The layer is the unit of reconciliation: [`Layer::reconcile`] receives every mark that should
/// be visible and joins it, by [`MarkId`], against the marks already present.
#[derive(Clone, Debug)]
pub struct Layer {
    id: LayerId,
    name: String,
    slots: HashMap<MarkId, Slot>,
    order: Vec<MarkId>,
}

impl Layer {
    pub(crate) fn new(id: LayerId, name: String) -> Self {
        Self {
            id,
            name,
            slots: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// This layer's id.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// This layer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of marks held, including marks that are still animating out.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the layer holds no marks at all.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of marks that are not exiting.
    pub fn live_len(&self) -> usize {
        self.slots.values().filter(|s| !s.exiting).count()
    }

    /// Returns `true` if the layer holds a mark with this id (exiting or not).
    pub fn contains(&self, id: MarkId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Returns `true` if the mark is animating out.
    pub fn is_exiting(&self, id: MarkId) -> bool {
        self.slots.get(&id).is_some_and(|s| s.exiting)
    }

    /// Returns `true` while any transition is running.
    pub fn is_animating(&self) -> bool {
        self.slots.values().any(|s| s.transition.is_some())
    }

    /// The mark (with its target visual) for `id`.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.slots.get(&id).map(|s| &s.mark)
    }

    /// The visual state of `id` right now, mid-transition states included.
    pub fn sample(&self, id: MarkId) -> Option<Visual> {
        self.slots.get(&id).map(Slot::current)
    }

    /// Mark ids in layer order.
    pub fn ids(&self) -> impl Iterator<Item = MarkId> + '_ {
        self.order.iter().copied()
    }

    /// Marks with their current visual state, in render order (`z_index`, then layer order).
    pub fn iter(&self) -> impl Iterator<Item = (&Mark, Visual)> + '_ {
        let mut ids: Vec<&MarkId> = self.order.iter().collect();
        ids.sort_by_key(|id| self.slots.get(*id).map_or(0, |s| s.mark.z_index));
        ids.into_iter()
            .filter_map(move |id| self.slots.get(id).map(|s| (&s.mark, s.current())))
    }

    /// Position of `id` in layer coordinates: its anchor plus the positions of its ancestors.
    pub fn absolute_position(&self, id: MarkId) -> Option<Point> {
        let slot = self.slots.get(&id)?;
        let mut pos = slot.current().anchor();
        let mut parent = slot.mark.parent;
        let mut depth = 0;
        while let Some(pid) = parent {
            let Some(p) = self.slots.get(&pid) else {
                break;
            };
            pos += p.current().pos.to_vec2();
            parent = p.mark.parent;
            depth += 1;
            if depth > self.order.len() {
                break;
            }
        }
        Some(pos)
    }

    /// Joins `marks` against the current contents.
    ///
    /// - Marks whose id is new enter (animating from `motion.enter_from` when set).
    /// - Marks whose id is present update; if the target visual is unchanged nothing happens and a
    ///   running transition keeps running.
    /// - Present marks missing from `marks` exit, either at once or after `motion.exit`.
    ///   A mark that reappears while exiting is revived through an update.
    ///
    /// Duplicate ids in `marks` keep their first occurrence.
    pub fn reconcile(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let marks: Vec<Mark> = marks.into_iter().collect();
        let new_ids: Vec<MarkId> = marks.iter().map(|m| m.id).collect();
        let plan = join_keys(&self.order, &new_ids);
        for &j in &plan.duplicates {
            log::warn!(
                "layer `{}`: duplicate mark id {:?} ignored",
                self.name,
                new_ids[j]
            );
        }

        let mut diffs = Vec::with_capacity(plan.update.len() + plan.enter.len() + plan.exit.len());
        let mut pending: Vec<Option<Mark>> = marks.into_iter().map(Some).collect();

        for &(_, j) in &plan.update {
            if let Some(mark) = pending[j].take() {
                self.update_slot(mark, &mut diffs);
            }
        }
        for &j in &plan.enter {
            if let Some(mark) = pending[j].take() {
                self.enter_slot(mark, &mut diffs);
            }
        }
        let exiting: Vec<MarkId> = plan.exit.iter().map(|&i| self.order[i]).collect();
        for &id in &exiting {
            self.exit_slot(id, &mut diffs);
        }

        let mut is_dup = alloc::vec![false; new_ids.len()];
        for &j in &plan.duplicates {
            is_dup[j] = true;
        }
        let mut order: Vec<MarkId> = new_ids
            .iter()
            .zip(is_dup)
            .filter_map(|(id, dup)| (!dup).then_some(*id))
            .collect();
        order.extend(exiting.into_iter().filter(|id| self.slots.contains_key(id)));
        self.order = order;

        diffs
    }

    /// Moves `id` so its anchor sits at `pos`, leaving every other attribute alone.
    ///
    /// A running transition (update, enter or exit) is translated along with the mark and keeps
    /// its progress. Returns `None` if the mark is absent or already at `pos`.
    pub fn move_to(&mut self, id: MarkId, pos: Point) -> Option<MarkDiff> {
        let slot = self.slots.get_mut(&id)?;
        let delta = pos - slot.mark.visual.pos;
        if delta == Vec2::ZERO {
            return None;
        }
        let old = slot.current();
        slot.mark.visual.pos = pos;
        if let Some(transition) = slot.transition.as_mut() {
            transition.from.pos += delta;
            transition.to.pos += delta;
        }
        Some(MarkDiff::Update {
            id,
            kind: slot.mark.kind,
            old: Box::new(old),
            new: Box::new(slot.mark.visual.clone()),
            duration_ms: 0,
        })
    }

    /// Removes every mark (an empty join).
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.reconcile(core::iter::empty())
    }

    /// Advances running transitions by `dt_ms` and drops marks whose exit finished.
    ///
    /// Returns the ids of removed marks, in layer order.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<MarkId> {
        let mut removed = Vec::new();
        for id in &self.order {
            let Some(slot) = self.slots.get_mut(id) else {
                continue;
            };
            let finished = slot.transition.as_mut().is_some_and(|t| t.advance(dt_ms));
            if finished {
                slot.transition = None;
                if slot.exiting {
                    removed.push(*id);
                }
            }
        }
        if !removed.is_empty() {
            for id in &removed {
                self.slots.remove(id);
            }
            let slots = &self.slots;
            self.order.retain(|id| slots.contains_key(id));
        }
        removed
    }

    fn update_slot(&mut self, mark: Mark, diffs: &mut Vec<MarkDiff>) {
        let Some(slot) = self.slots.get_mut(&mark.id) else {
            return;
        };
        let revived = slot.exiting;
        if !revived && slot.mark.kind == mark.kind && slot.mark.visual == mark.visual {
            slot.mark = mark;
            return;
        }
        let old = slot.current();
        let tween = mark.motion.update;
        slot.exiting = false;
        slot.transition = tween
            .is_animated()
            .then(|| Transition::new(old.clone(), mark.visual.clone(), tween));
        diffs.push(MarkDiff::Update {
            id: mark.id,
            kind: mark.kind,
            old: Box::new(old),
            new: Box::new(mark.visual.clone()),
            duration_ms: tween.duration_ms,
        });
        slot.mark = mark;
    }

    fn enter_slot(&mut self, mark: Mark, diffs: &mut Vec<MarkDiff>) {
        let tween = mark.motion.enter;
        let transition = match &mark.motion.enter_from {
            Some(from) if tween.is_animated() => {
                Some(Transition::new(from.clone(), mark.visual.clone(), tween))
            }
            _ => None,
        };
        diffs.push(MarkDiff::Enter {
            id: mark.id,
            kind: mark.kind,
            parent: mark.parent,
            visual: Box::new(mark.visual.clone()),
            duration_ms: if transition.is_some() {
                tween.duration_ms
            } else {
                0
            },
        });
        self.slots.insert(
            mark.id,
            Slot {
                mark,
                transition,
                exiting: false,
            },
        );
    }

    fn exit_slot(&mut self, id: MarkId, diffs: &mut Vec<MarkDiff>) {
        let Some(slot) = self.slots.get_mut(&id) else {
            return;
        };
        if slot.exiting {
            return;
        }
        let last = slot.current();
        let tween = slot.mark.motion.exit;
        diffs.push(MarkDiff::Exit {
            id,
            kind: slot.mark.kind,
            last: Box::new(last.clone()),
            duration_ms: tween.duration_ms,
        });
        if tween.is_animated() {
            let to = slot
                .mark
                .motion
                .exit_to
                .clone()
                .unwrap_or_else(|| last.clone());
            slot.transition = Some(Transition::new(last, to, tween));
            slot.exiting = true;
        } else {
            self.slots.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::join::JoinKey;
    use crate::transition::{Motion, Tween};

    fn circle(i: usize, r: f64, motion: Motion) -> Mark {
        Mark::builder(MarkId::for_key(JoinKey::Index(i)))
            .circle()
            .visual(Visual::at(Point::new(i as f64, 0.0)).with_radius(r))
            .motion(motion)
            .build()
    }

    fn layer() -> Layer {
        Layer::new(LayerId(0), String::from("test"))
    }

    #[test]
    fn enter_update_exit() {
        let mut l = layer();
        let d = l.reconcile((0..3).map(|i| circle(i, 1.0, Motion::immediate())));
        assert_eq!(d.iter().filter(|d| d.is_enter()).count(), 3);

        let d = l.reconcile([circle(0, 2.0, Motion::immediate())]);
        assert_eq!(d.iter().filter(|d| d.is_update()).count(), 1);
        assert_eq!(d.iter().filter(|d| d.is_exit()).count(), 2);
        assert_eq!(l.len(), 1);
        assert_eq!(l.sample(MarkId::for_key(JoinKey::Index(0))).unwrap().radius, 2.0);
    }

    #[test]
    fn reconciling_the_same_marks_twice_is_a_no_op() {
        let mut l = layer();
        let marks: Vec<Mark> = (0..4).map(|i| circle(i, 3.0, Motion::linear(100))).collect();
        l.reconcile(marks.clone());
        assert!(l.reconcile(marks).is_empty());
    }

    #[test]
    fn unchanged_target_keeps_running_transition() {
        let mut l = layer();
        let id = MarkId::for_key(JoinKey::Index(0));
        l.reconcile([circle(0, 0.0, Motion::linear(100))]);
        l.reconcile([circle(0, 10.0, Motion::linear(100))]);
        l.advance(50.0);
        assert_eq!(l.sample(id).unwrap().radius, 5.0);

        assert!(l.reconcile([circle(0, 10.0, Motion::linear(100))]).is_empty());
        l.advance(25.0);
        assert_eq!(l.sample(id).unwrap().radius, 7.5);
    }

    #[test]
    fn update_starts_from_mid_transition_state() {
        let mut l = layer();
        let id = MarkId::for_key(JoinKey::Index(0));
        l.reconcile([circle(0, 0.0, Motion::linear(100))]);
        l.reconcile([circle(0, 10.0, Motion::linear(100))]);
        l.advance(50.0);
        let d = l.reconcile([circle(0, 0.0, Motion::linear(100))]);
        match &d[..] {
            [MarkDiff::Update { old, new, .. }] => {
                assert_eq!(old.radius, 5.0);
                assert_eq!(new.radius, 0.0);
            }
            other => panic!("unexpected diffs {other:?}"),
        }
        assert_eq!(l.sample(id).unwrap().radius, 5.0);
    }

    #[test]
    fn animated_exit_is_removed_after_its_duration() {
        let mut l = layer();
        l.reconcile((0..2).map(|i| circle(i, 1.0, Motion::linear(100))));
        let d = l.reconcile([circle(0, 1.0, Motion::linear(100))]);
        assert_eq!(d.len(), 1);
        assert!(d[0].is_exit());

        let gone = MarkId::for_key(JoinKey::Index(1));
        assert!(l.is_exiting(gone));
        assert_eq!(l.live_len(), 1);
        assert_eq!(l.len(), 2);

        assert!(l.advance(99.0).is_empty());
        assert_eq!(l.advance(1.0), vec![gone]);
        assert!(!l.contains(gone));
    }

    #[test]
    fn exiting_mark_is_revived_when_it_reappears() {
        let mut l = layer();
        l.reconcile((0..2).map(|i| circle(i, 1.0, Motion::linear(100))));
        l.reconcile([circle(0, 1.0, Motion::linear(100))]);
        l.advance(10.0);
        let d = l.reconcile((0..2).map(|i| circle(i, 1.0, Motion::linear(100))));
        assert_eq!(d.len(), 1);
        assert!(d[0].is_update());
        assert_eq!(l.live_len(), 2);
        assert!(l.advance(1000.0).is_empty());
    }

    #[test]
    fn exit_to_animates_towards_target() {
        let mut l = layer();
        let m = circle(0, 4.0, Motion::linear(100));
        let motion = Motion::linear(100).with_exit_to(Visual::at(Point::ORIGIN));
        let m = Mark { motion, ..m };
        let id = m.id;
        l.reconcile([m]);
        l.clear();
        l.advance(50.0);
        assert_eq!(l.sample(id).unwrap().radius, 2.0);
    }

    #[test]
    fn enter_from_animates_in() {
        let mut l = layer();
        let motion = Motion::immediate()
            .with_enter_from(Visual::at(Point::ORIGIN).with_radius(0.0), Tween::linear(10));
        let m = Mark {
            motion,
            ..circle(0, 8.0, Motion::immediate())
        };
        let id = m.id;
        let d = l.reconcile([m]);
        assert!(matches!(d[0], MarkDiff::Enter { duration_ms: 10, .. }));
        assert_eq!(l.sample(id).unwrap().radius, 0.0);
        l.advance(5.0);
        assert_eq!(l.sample(id).unwrap().radius, 4.0);
    }

    #[test]
    fn child_positions_are_relative_to_parent() {
        let mut l = layer();
        let parent = MarkId::from_raw(1);
        let child = MarkId::from_raw(2);
        l.reconcile([
            Mark::builder(parent)
                .group()
                .visual(Visual::at(Point::new(100.0, 50.0)))
                .build(),
            Mark::builder(child)
                .text()
                .parent(parent)
                .visual(Visual::at(Point::new(-3.0, 4.0)))
                .build(),
        ]);
        assert_eq!(l.absolute_position(child), Some(Point::new(97.0, 54.0)));
    }

    #[test]
    fn iter_sorts_by_z_index_then_order() {
        let mut l = layer();
        let a = Mark {
            z_index: 10,
            ..circle(0, 1.0, Motion::immediate())
        };
        let b = circle(1, 1.0, Motion::immediate());
        l.reconcile([a.clone(), b.clone()]);
        let ids: Vec<MarkId> = l.iter().map(|(m, _)| m.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn move_to_translates_a_running_update() {
        let mut l = layer();
        let id = MarkId::for_key(JoinKey::Index(0));
        l.reconcile([circle(0, 0.0, Motion::linear(100))]);
        l.reconcile([circle(0, 10.0, Motion::linear(100))]);
        l.advance(25.0);

        let diff = l.move_to(id, Point::new(40.0, 3.0)).unwrap();
        assert!(matches!(diff, MarkDiff::Update { duration_ms: 0, .. }));
        let now = l.sample(id).unwrap();
        assert_eq!(now.radius, 2.5);
        assert_eq!(now.pos, Point::new(40.0, 3.0));
        assert!(l.is_animating());

        l.advance(75.0);
        let done = l.sample(id).unwrap();
        assert_eq!(done.radius, 10.0);
        assert_eq!(done.pos, Point::new(40.0, 3.0));
        assert!(l.move_to(id, Point::new(40.0, 3.0)).is_none());
    }

    #[test]
    fn move_to_follows_an_exiting_mark() {
        let mut l = layer();
        let gone = MarkId::for_key(JoinKey::Index(1));
        l.reconcile((0..2).map(|i| circle(i, 1.0, Motion::linear(100))));
        l.reconcile([circle(0, 1.0, Motion::linear(100))]);
        l.advance(50.0);

        l.move_to(gone, Point::new(-9.0, 4.0)).unwrap();
        assert!(l.is_exiting(gone));
        assert_eq!(l.absolute_position(gone), Some(Point::new(-9.0, 4.0)));
        assert_eq!(l.advance(50.0), vec![gone]);
        assert!(l.move_to(gone, Point::ORIGIN).is_none());
    }
}
