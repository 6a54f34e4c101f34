// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed data join.
//!
//! A join matches an old key sequence against a new one and partitions the result into
//! enter (new only), update (both) and exit (old only) sets. Order within each set follows the
//! sequence it indexes into.

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// The identity a record is joined on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinKey {
    /// Position of the record within its frame.
    Index(usize),
    /// A stable hash supplied by (or synthesized for) the record.
    Key(u64),
}

/// Result of joining two key sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinPlan {
    /// Indices into the new sequence with no old counterpart.
    pub enter: Vec<usize>,
    /// `(old_index, new_index)` pairs sharing a key.
    pub update: Vec<(usize, usize)>,
    /// Indices into the old sequence with no new counterpart.
    pub exit: Vec<usize>,
    /// Indices into the new sequence whose key already appeared earlier in it.
    pub duplicates: Vec<usize>,
}

impl JoinPlan {
    /// Returns `true` if the join leaves the key set unchanged.
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Joins `old` against `new`.
///
/// The first occurrence of a key in `new` wins; later occurrences are reported in
/// [`JoinPlan::duplicates`] and take no part in the join.
pub fn join_keys<K: Copy + Eq + Hash>(old: &[K], new: &[K]) -> JoinPlan {
    let mut old_index: HashMap<K, usize> = HashMap::with_capacity(old.len());
    for (i, k) in old.iter().enumerate() {
        old_index.entry(*k).or_insert(i);
    }

    let mut plan = JoinPlan::default();
    let mut matched = alloc::vec![false; old.len()];
    let mut seen: HashMap<K, ()> = HashMap::with_capacity(new.len());
    for (j, k) in new.iter().enumerate() {
        if seen.insert(*k, ()).is_some() {
            plan.duplicates.push(j);
            continue;
        }
        match old_index.get(k) {
            Some(&i) => {
                matched[i] = true;
                plan.update.push((i, j));
            }
            None => plan.enter.push(j),
        }
    }
    plan.exit = matched
        .iter()
        .enumerate()
        .filter_map(|(i, m)| (!m).then_some(i))
        .collect();
    plan
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn shrinking_positional_join_exits_the_tail() {
        let old = [JoinKey::Index(0), JoinKey::Index(1), JoinKey::Index(2)];
        let new = [JoinKey::Index(0)];
        let plan = join_keys(&old, &new);
        assert_eq!(plan.update, vec![(0, 0)]);
        assert!(plan.enter.is_empty());
        assert_eq!(plan.exit, vec![1, 2]);
    }

    #[test]
    fn keyed_join_tracks_moves() {
        let old = [JoinKey::Key(7), JoinKey::Key(8)];
        let new = [JoinKey::Key(9), JoinKey::Key(7)];
        let plan = join_keys(&old, &new);
        assert_eq!(plan.update, vec![(0, 1)]);
        assert_eq!(plan.enter, vec![0]);
        assert_eq!(plan.exit, vec![1]);
        assert!(!plan.is_stable());
    }

    #[test]
    fn duplicate_new_keys_are_reported_once() {
        let plan = join_keys::<u32>(&[], &[1, 1, 2]);
        assert_eq!(plan.enter, vec![0, 2]);
        assert_eq!(plan.duplicates, vec![1]);
    }

    #[test]
    fn empty_new_sequence_exits_everything() {
        let plan = join_keys(&[1_u8, 2, 3], &[]);
        assert_eq!(plan.exit, vec![0, 1, 2]);
        assert!(plan.update.is_empty());
    }
}
