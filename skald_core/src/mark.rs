// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark primitives.
//!
//! A [`Mark`] is the unit of retained rendering in skald: a stable identity
//! ([`MarkId`]) plus a drawable payload (path or text), an opacity, and a
//! z-index used for paint ordering. Chart components regenerate marks every
//! render pass; the [`crate::Scene`] diffs them against the previous pass so
//! downstream sinks (SVG, canvas, an animator) only see what changed.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

/// A stable mark identity.
///
/// Components derive ids deterministically from a per-component base so the
/// same logical element (a tick label, a pie slice) keeps its id across
/// renders. That stability is what makes enter/update/exit matching work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// The drawable kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// A filled and/or stroked path.
    Path,
    /// A single line of (unshaped) text.
    Text,
}

/// Horizontal text anchoring, matching the SVG `text-anchor` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start of the text run.
    Start,
    /// Anchor at the middle of the text run.
    Middle,
    /// Anchor at the end of the text run.
    End,
}

/// Vertical text baseline, matching the SVG `dominant-baseline` values we use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Center the text vertically on the anchor point.
    Middle,
    /// Place the alphabetic baseline on the anchor point.
    Alphabetic,
    /// Hang the text below the anchor point.
    Hanging,
    /// Place the ideographic baseline on the anchor point.
    Ideographic,
}

/// Payload for a path mark.
#[derive(Clone, Debug)]
pub struct PathMark {
    /// Path geometry in scene coordinates (group-local when the mark belongs
    /// to a translated group).
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0.0` disables the stroke.
    pub stroke_width: f64,
}

/// Payload for a text mark.
#[derive(Clone, Debug)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation angle in degrees, about `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// A mark payload: the drawable part of a [`Mark`].
#[derive(Clone, Debug)]
pub enum MarkPayload {
    /// Path payload.
    Path(PathMark),
    /// Text payload.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometry bounds where they are cheap to compute.
    ///
    /// Text bounds require shaping, which is downstream of this crate, so
    /// text payloads return `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }
}

/// A retained mark: stable identity + payload + paint-order/opacity state.
#[derive(Clone, Debug)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order hint; sinks sort by `(z_index, id)`.
    pub z_index: i32,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// The drawable payload.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a path mark with default paints (transparent fill, no stroke).
    pub fn path(id: MarkId, path: BezPath) -> Self {
        Self {
            id,
            z_index: 0,
            opacity: 1.0,
            payload: MarkPayload::Path(PathMark {
                path,
                fill: Brush::Solid(Color::TRANSPARENT),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
            }),
        }
    }

    /// Creates a text mark with default styling.
    pub fn text(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            z_index: 0,
            opacity: 1.0,
            payload: MarkPayload::Text(TextMark {
                pos,
                text: text.into(),
                font_size: 12.0,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Alphabetic,
                fill: Brush::default(),
            }),
        }
    }

    /// Sets the z-index used for paint ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the mark opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the fill paint (path and text payloads).
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        match &mut self.payload {
            MarkPayload::Path(p) => p.fill = fill.into(),
            MarkPayload::Text(t) => t.fill = fill.into(),
        }
        self
    }

    /// Sets stroke paint and width (path payloads; no-op for text).
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.stroke = stroke.into();
            p.stroke_width = stroke_width;
        }
        self
    }

    /// Sets the font size (text payloads; no-op for paths).
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.font_size = font_size;
        }
        self
    }

    /// Sets the rotation angle in degrees (text payloads; no-op for paths).
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.angle = angle;
        }
        self
    }

    /// Sets the horizontal text anchor (text payloads; no-op for paths).
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
        }
        self
    }

    /// Sets the vertical text baseline (text payloads; no-op for paths).
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.baseline = baseline;
        }
        self
    }

    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Point;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn path_mark_reports_bounds() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 20.0));
        let mark = Mark::path(MarkId::from_raw(1), p).with_fill(css::TOMATO);
        let b = mark.payload.bounds().expect("path bounds");
        assert_eq!(b, Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(mark.kind(), MarkKind::Path);
    }

    #[test]
    fn text_mark_has_no_bounds_without_shaping() {
        let mark = Mark::text(MarkId::from_raw(2), Point::new(1.0, 2.0), "hi")
            .with_font_size(10.0)
            .with_anchor(TextAnchor::Middle);
        assert!(mark.payload.bounds().is_none());
        assert_eq!(mark.kind(), MarkKind::Text);
    }

    #[test]
    fn stroke_setter_is_a_noop_for_text() {
        let mark = Mark::text(MarkId::from_raw(3), Point::ZERO, "x").with_stroke(css::BLACK, 2.0);
        let MarkPayload::Text(_) = mark.payload else {
            panic!("expected text payload");
        };
    }
}
