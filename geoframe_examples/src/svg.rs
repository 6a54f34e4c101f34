// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG snapshots of a chart layer for the demo report.

use geoframe_core::{Layer, MarkKind, Paint};
use kurbo::Size;

/// Renders the layer's current (possibly mid-transition) state.
///
/// Groups are not drawn; their children are placed at absolute positions. Text is anchored at its
/// left baseline, matching the chart's hit boxes.
pub(crate) fn layer_to_svg(layer: &Layer, size: Size, caption: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = size.width,
        h = size.height,
    ));
    out.push('\n');
    out.push_str(&format!(
        r##"<rect width="{}" height="{}" fill="#e8eef3"/>"##,
        size.width, size.height
    ));
    out.push('\n');

    for (mark, visual) in layer.iter() {
        let Some(at) = layer.absolute_position(mark.id) else {
            continue;
        };
        match mark.kind {
            MarkKind::Group => {}
            MarkKind::Circle => {
                out.push_str(&format!(
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}""#,
                    at.x, at.y, visual.radius
                ));
                write_paint_attr(&mut out, "fill", &visual.fill);
                write_paint_attr(&mut out, "stroke", &visual.stroke);
                out.push_str(&format!(r#" fill-opacity="{}"/>"#, visual.fill_opacity));
                out.push('\n');
            }
            MarkKind::Text => {
                let Some(text) = visual.text.as_deref() else {
                    continue;
                };
                out.push_str(&format!(
                    r#"<text x="{:.2}" y="{:.2}" font-size="{:.2}""#,
                    at.x, at.y, visual.font_size
                ));
                write_paint_attr(&mut out, "fill", &visual.fill);
                out.push('>');
                out.push_str(&escape_xml(text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str(&format!(
        r#"<text x="8" y="{:.2}" font-size="14">{}</text>"#,
        size.height - 8.0,
        escape_xml(caption)
    ));
    out.push_str("\n</svg>\n");
    out
}

fn write_paint_attr(out: &mut String, name: &str, paint: &Paint) {
    if paint.is_none() {
        return;
    }
    out.push_str(&format!(r#" {name}="{}""#, escape_xml(&paint.to_css())));
}

pub(crate) fn escape_xml(s: &str) -> String {
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
