// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identities for layers and marks.

use crate::join::JoinKey;

/// Identifies a named layer group within a [`crate::Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// Stable identity of a mark within a layer.
///
/// Identity is what the data join matches on: a mark with the same id in two consecutive redraws
/// is the same visual element, updated (and possibly animated) in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives the id of a top-level mark from its join key.
    pub fn for_key(key: JoinKey) -> Self {
        match key {
            JoinKey::Index(index) => Self(mix64(0x9e37_79b9_7f4a_7c15 ^ index as u64)),
            JoinKey::Key(hash) => Self(mix64(hash.rotate_left(17) ^ 0x5851_f42d_4c95_7f2d)),
        }
    }

    /// Derives the id of the `index`-th child of this mark.
    pub fn child(self, index: u64) -> Self {
        Self(mix64(self.0 ^ mix64(index.wrapping_add(1))))
    }

    /// Derives the id of a named part of this mark (e.g. a label next to a glyph).
    pub fn part(self, name: &str) -> Self {
        Self(mix64(self.0.rotate_left(29) ^ hash_str(name)))
    }
}

/// `SplitMix64` finalizer.
///
/// Used to spread structured inputs (indices, small hashes) across the whole id space, and as a
/// cheap deterministic noise source for per-mark jitter.
pub const fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// FNV-1a over the UTF-8 bytes of `s`.
///
/// Deterministic across runs and platforms, unlike the randomly seeded default hasher.
pub fn hash_str(s: &str) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in s.bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn positional_and_keyed_ids_do_not_collide_for_small_values() {
        for i in 0..64_u64 {
            #[allow(clippy::cast_possible_truncation, reason = "small test indices")]
            let a = MarkId::for_key(JoinKey::Index(i as usize));
            let b = MarkId::for_key(JoinKey::Key(i));
            assert_ne!(a, b, "index {i} collides with key {i}");
        }
    }

    #[test]
    fn child_and_part_ids_are_stable_and_distinct() {
        let parent = MarkId::for_key(JoinKey::Index(3));
        assert_eq!(parent.child(0), parent.child(0));
        assert_ne!(parent.child(0), parent.child(1));
        assert_ne!(parent.part("symbol"), parent.part("value"));
        assert_ne!(parent.child(0), parent);
    }

    #[test]
    fn hash_str_matches_fnv1a_reference() {
        assert_eq!(hash_str(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(hash_str("a"), 0xaf63_dc4c_8601_ec8c);
    }
}
