// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circle packing for symbol clusters.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Vec2};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Equal circles placed inside a bounding circle centered at the origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedCircles {
    /// Circle centers, relative to the bounding circle's center.
    pub centers: Vec<Point>,
    /// Common radius of every placed circle.
    pub radius: f64,
}

/// Places `count` equal circles without overlap inside a circle of `radius`.
///
/// `padding` is the minimum gap between neighbouring circles, in output units.
pub trait PackLayout: Debug {
    /// Lays out `count` circles.
    fn pack(&self, count: usize, radius: f64, padding: f64) -> PackedCircles;
}

/// Hexagonal ring packing: one circle in the center, then rings of 6, 12, 18, ... neighbours.
///
/// The last ring may be partial. The arrangement is scaled to fit the bounding circle exactly.
#[derive(Clone, Copy, Debug, Default)]
pub struct HexPack;

// Axial hex directions, walked in order around a ring.
const DIRECTIONS: [(i64, i64); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

impl HexPack {
    /// Lattice positions (spacing 2, so unit circles touch) for the first `count` cells.
    fn lattice(count: usize) -> Vec<Vec2> {
        let mut cells = Vec::with_capacity(count);
        if count == 0 {
            return cells;
        }
        cells.push(Vec2::ZERO);
        let mut ring: i64 = 1;
        while cells.len() < count {
            // Start at the ring's corner in direction 4, then walk all six sides.
            let (mut q, mut r) = (DIRECTIONS[4].0 * ring, DIRECTIONS[4].1 * ring);
            'ring: for (dq, dr) in DIRECTIONS {
                for _ in 0..ring {
                    if cells.len() == count {
                        break 'ring;
                    }
                    cells.push(axial_to_cartesian(q, r));
                    q += dq;
                    r += dr;
                }
            }
            ring += 1;
        }
        cells
    }
}

#[allow(clippy::cast_precision_loss, reason = "ring indices are small")]
fn axial_to_cartesian(q: i64, r: i64) -> Vec2 {
    let (q, r) = (q as f64, r as f64);
    Vec2::new(2.0 * (q + r / 2.0), SQRT_3 * r)
}

impl PackLayout for HexPack {
    fn pack(&self, count: usize, radius: f64, padding: f64) -> PackedCircles {
        let cells = Self::lattice(count);
        if cells.is_empty() || radius.is_nan() || radius <= 0.0 {
            return PackedCircles {
                centers: cells.iter().map(|_| Point::ORIGIN).collect(),
                radius: 0.0,
            };
        }
        // Unit circles on the lattice; the outermost one touches the bounding circle after scaling.
        let extent = cells.iter().map(|c| c.hypot()).fold(0.0_f64, f64::max) + 1.0;
        let scale = radius / extent;
        PackedCircles {
            centers: cells.iter().map(|c| (*c * scale).to_point()).collect(),
            radius: (scale - padding.max(0.0) / 2.0).max(0.0),
        }
    }
}
