// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization for `skald_core` scenes.
//!
//! [`scene_to_svg`] walks a scene in paint order and emits one `<g>` per
//! group (carrying the group's translate), with `<path>`/`<text>` children
//! in z order. The output is meant for dumping chart states to disk and for
//! golden-file style inspection, not for a full-fidelity SVG backend.

use kurbo::{Rect, Vec2};
use peniko::Brush;
use skald_core::{MarkPayload, Scene, TextAnchor, TextBaseline};

/// Serializes `scene` to an SVG document.
///
/// When `view_box` is `None` the viewBox is estimated from the marks'
/// bounds (translate-aware, with a small padding margin); an explicit rect
/// is unioned with the estimate so nothing gets clipped.
pub fn scene_to_svg(scene: &Scene, view_box: Option<Rect>) -> String {
    let computed = estimate_view_box(scene);
    let view_box = match (view_box, computed) {
        (Some(a), Some(b)) => a.union(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => Rect::new(0.0, 0.0, 100.0, 100.0),
    };

    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    ));
    out.push('\n');

    for (group, translate, members) in scene.paint_order() {
        out.push_str(&format!(
            r#"<g data-group="{}" transform="translate({} {})">"#,
            group.0, translate.x, translate.y
        ));
        out.push('\n');
        for (_id, mark) in members {
            write_mark(&mut out, mark.opacity, &mark.payload);
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn write_mark(out: &mut String, opacity: f64, payload: &MarkPayload) {
    match payload {
        MarkPayload::Path(p) => {
            let d = p.path.to_svg();
            out.push_str(&format!(r#"<path d="{d}""#));
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
            }
            write_opacity_attr(out, opacity);
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            ));
            if t.angle != 0.0 {
                out.push_str(&format!(
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                ));
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            write_opacity_attr(out, opacity);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
    }
}

fn estimate_view_box(scene: &Scene) -> Option<Rect> {
    let mut rect: Option<Rect> = None;
    for (_group, translate, members) in scene.paint_order() {
        for (_id, mark) in members {
            let b = match &mark.payload {
                MarkPayload::Text(t) => Some(estimate_text_bounds_anchored(
                    t.pos.x, t.pos.y, t.font_size, t.anchor, t.baseline, &t.text,
                )),
                payload => payload.bounds(),
            };
            let Some(b) = b else {
                continue;
            };
            let b = translated(b, translate);
            rect = Some(match rect {
                None => b,
                Some(r) => r.union(b),
            });
        }
    }

    rect.map(|r| {
        // Small padding margin so strokes at the edge are not clipped.
        let pad = 10.0;
        Rect::new(r.x0 - pad, r.y0 - pad, r.x1 + pad, r.y1 + pad)
    })
}

fn translated(r: Rect, t: Vec2) -> Rect {
    Rect::new(r.x0 + t.x, r.y0 + t.y, r.x1 + t.x, r.y1 + t.y)
}

fn estimate_text_bounds_anchored(
    x: f64,
    y: f64,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    text: &str,
) -> Rect {
    // Very rough heuristic: assume ~0.6em average glyph width.
    //
    // `y` is interpreted according to the given baseline; we approximate a
    // midline from it.
    let glyph_w = 0.6 * font_size;
    let width = glyph_w * text.chars().count() as f64;
    let half_height = 0.5 * font_size;
    let y_midline = match baseline {
        TextBaseline::Middle => y,
        // Approximate ascent/descent splits; only used for viewBox estimation.
        TextBaseline::Alphabetic => y - 0.3 * font_size,
        TextBaseline::Hanging => y + 0.3 * font_size,
        TextBaseline::Ideographic => y - 0.2 * font_size,
    };
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    Rect::new(x0, y_midline - half_height, x1, y_midline + half_height)
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            if rgba.a == 0 {
                return ("none".to_string(), None);
            }
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let paint_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, paint_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_opacity_attr(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        out.push_str(&format!(r#" opacity="{opacity}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Point};
    use peniko::color::palette::css;
    use skald_core::{GroupId, Mark, MarkId, Scene};

    use super::*;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        let marks = vec![
            Mark::path(MarkId(1), path).with_stroke(css::BLACK, 1.0),
            Mark::text(MarkId(2), Point::new(10.0, 20.0), "a & b")
                .with_fill(css::BLACK),
        ];
        scene.tick_group(GroupId(0), marks, None);
        scene.set_group_translate(GroupId(0), Vec2::new(5.0, 7.0));
        scene
    }

    #[test]
    fn groups_carry_their_translate() {
        let svg = scene_to_svg(&sample_scene(), None);
        assert!(svg.contains(r#"transform="translate(5 7)""#));
        assert!(svg.contains("</g>"));
    }

    #[test]
    fn text_is_escaped() {
        let svg = scene_to_svg(&sample_scene(), None);
        assert!(svg.contains("a &amp; b"));
        assert!(!svg.contains("a & b<"));
    }

    #[test]
    fn explicit_view_box_is_unioned_with_the_estimate() {
        let svg = scene_to_svg(&sample_scene(), Some(Rect::new(0.0, 0.0, 500.0, 300.0)));
        // The estimate stays inside the explicit rect except on the
        // negative side, where padding pushes it out.
        assert!(svg.contains(r#"viewBox="-5"#));
    }

    #[test]
    fn transparent_fill_serializes_as_none() {
        let svg = scene_to_svg(&sample_scene(), None);
        assert!(svg.contains(r##"fill="none" stroke="#000000""##));
    }

    #[test]
    fn dimmed_marks_get_an_opacity_attribute() {
        let mut scene = sample_scene();
        scene.set_opacity(MarkId(1), 0.3, None);
        let svg = scene_to_svg(&scene, None);
        assert!(svg.contains(r#" opacity="0.3""#));
    }
}
