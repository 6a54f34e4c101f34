// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persistent drawing overlay.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::id::{LayerId, MarkId};
use crate::layer::Layer;

/// A drawing surface holding named layer groups.
///
/// The surface is created once per chart and outlives every redraw. Layer groups are created on
/// first request and looked up by name afterwards.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    layers: Vec<Layer>,
    by_name: HashMap<String, LayerId>,
}

impl Surface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the layer group named `name`, creating it if needed.
    pub fn ensure_layer(&mut self, name: &str) -> LayerId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "a surface holds a handful of layer groups"
        )]
        let id = LayerId(self.layers.len() as u32);
        log::debug!("creating layer group `{name}` as {id:?}");
        self.layers.push(Layer::new(id, String::from(name)));
        self.by_name.insert(String::from(name), id);
        id
    }

    /// Looks up a layer group by name.
    pub fn layer_id(&self, name: &str) -> Option<LayerId> {
        self.by_name.get(name).copied()
    }

    /// Returns a layer group.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0 as usize)
    }

    /// Returns a layer group for mutation.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id.0 as usize)
    }

    /// All layer groups in creation order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter()
    }

    /// Returns `true` while any layer has a running transition.
    pub fn is_animating(&self) -> bool {
        self.layers.iter().any(Layer::is_animating)
    }

    /// Advances every layer's transitions; returns the marks removed by finished exits.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<(LayerId, MarkId)> {
        let mut removed = Vec::new();
        for layer in &mut self.layers {
            let id = layer.id();
            removed.extend(layer.advance(dt_ms).into_iter().map(|m| (id, m)));
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Point;

    use super::*;
    use crate::mark::{Mark, Visual};
    use crate::transition::Motion;

    #[test]
    fn layer_groups_are_created_once_per_name() {
        let mut s = Surface::new();
        let a = s.ensure_layer("bubbles");
        let b = s.ensure_layer("symbols");
        assert_ne!(a, b);
        assert_eq!(s.ensure_layer("bubbles"), a);
        assert_eq!(s.layers().count(), 2);
        assert_eq!(s.layer_id("symbols"), Some(b));
        assert_eq!(s.layer(a).map(Layer::name), Some("bubbles"));
    }

    #[test]
    fn advance_reports_removed_marks_per_layer() {
        let mut s = Surface::new();
        let id = s.ensure_layer("bubbles");
        let layer = s.layer_mut(id).unwrap();
        let mark = Mark::builder(MarkId::from_raw(9))
            .circle()
            .visual(Visual::at(Point::ORIGIN).with_radius(1.0))
            .motion(Motion::linear(10))
            .build();
        layer.reconcile([mark]);
        layer.clear();
        assert!(s.is_animating());
        assert_eq!(s.advance(10.0), alloc::vec![(id, MarkId::from_raw(9))]);
        assert!(!s.is_animating());
    }
}
