// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: the visual elements held by a layer.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Vec2};

use crate::id::MarkId;
use crate::paint::Paint;
use crate::transition::Motion;

/// The kind of visual element a mark renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// A container translated to `pos`; children are positioned relative to it.
    Group,
    /// A circle centered at `pos` with `radius`.
    Circle,
    /// A text run anchored at `pos + offset`.
    Text,
}

/// The animatable state of a mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    /// Position: circle center, text anchor or group translation. Relative to the parent, if any.
    pub pos: Point,
    /// Extra offset applied after `pos` (used for labels stacked above a glyph).
    pub offset: Vec2,
    /// Circle radius.
    pub radius: f64,
    /// Font size for text marks.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Paint,
    /// Stroke paint.
    pub stroke: Paint,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
    /// Text content for text marks.
    pub text: Option<String>,
}

impl Default for Visual {
    fn default() -> Self {
        Self::at(Point::ORIGIN)
    }
}

impl Visual {
    /// A blank visual at `pos`.
    pub fn at(pos: Point) -> Self {
        Self {
            pos,
            offset: Vec2::ZERO,
            radius: 0.0,
            font_size: 0.0,
            fill: Paint::None,
            stroke: Paint::None,
            fill_opacity: 1.0,
            text: None,
        }
    }

    /// Sets the position.
    pub fn with_pos(mut self, pos: Point) -> Self {
        self.pos = pos;
        self
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Paint>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the stroke paint.
    pub fn with_stroke(mut self, stroke: impl Into<Paint>) -> Self {
        self.stroke = stroke.into();
        self
    }

    /// Sets the fill opacity.
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = fill_opacity;
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Interpolates towards `to`.
    ///
    /// Numeric attributes and concrete colors blend; text and literal paints take the target
    /// value as soon as the transition starts.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            pos: self.pos.lerp(to.pos, t),
            offset: self.offset.lerp(to.offset, t),
            radius: lerp(self.radius, to.radius, t),
            font_size: lerp(self.font_size, to.font_size, t),
            fill: self.fill.lerp(&to.fill, t),
            stroke: self.stroke.lerp(&to.stroke, t),
            fill_opacity: lerp(self.fill_opacity, to.fill_opacity, t),
            text: to.text.clone(),
        }
    }

    /// The anchor point after applying `offset`.
    pub fn anchor(&self) -> Point {
        self.pos + self.offset
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A visual element with stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity used by the data join.
    pub id: MarkId,
    /// Element kind.
    pub kind: MarkKind,
    /// Containing group, if any. The parent must live in the same layer.
    pub parent: Option<MarkId>,
    /// Rendering order hint; renderers sort by `(z_index, layer order)`.
    pub z_index: i32,
    /// Target visual state.
    pub visual: Visual,
    /// Whether pointer interaction (hover/touch) is enabled on this element.
    pub interactive: bool,
    /// Transition behavior.
    pub motion: Motion,
}

impl Mark {
    /// Starts building a mark with the given id.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            mark: Self {
                id,
                kind: MarkKind::Group,
                parent: None,
                z_index: 0,
                visual: Visual::default(),
                interactive: false,
                motion: Motion::immediate(),
            },
        }
    }
}

/// Builder for [`Mark`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    mark: Mark,
}

impl MarkBuilder {
    /// Makes this a group mark.
    pub fn group(mut self) -> Self {
        self.mark.kind = MarkKind::Group;
        self
    }

    /// Makes this a circle mark.
    pub fn circle(mut self) -> Self {
        self.mark.kind = MarkKind::Circle;
        self
    }

    /// Makes this a text mark.
    pub fn text(mut self) -> Self {
        self.mark.kind = MarkKind::Text;
        self
    }

    /// Sets the containing group.
    pub fn parent(mut self, parent: MarkId) -> Self {
        self.mark.parent = Some(parent);
        self
    }

    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.mark.z_index = z_index;
        self
    }

    /// Sets the target visual state.
    pub fn visual(mut self, visual: Visual) -> Self {
        self.mark.visual = visual;
        self
    }

    /// Enables pointer interaction.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.mark.interactive = interactive;
        self
    }

    /// Sets the transition behavior.
    pub fn motion(mut self, motion: Motion) -> Self {
        self.mark.motion = motion;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.mark
    }
}
