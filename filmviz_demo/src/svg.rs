// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for chart marks.

use filmviz_core::{Mark, MarkPayload, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::Brush;

/// Serializes marks, already in paint order, into a standalone SVG document.
pub(crate) fn to_svg_string(marks: &[Mark], view_box: Rect) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    ));
    out.push('\n');

    for mark in marks {
        match &mark.payload {
            MarkPayload::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                write_stroke_attrs(&mut out, &r.stroke, r.stroke_width);
                out.push_str("/>\n");
            }
            MarkPayload::Path(p) => {
                out.push_str(&format!(r#"<path d="{}""#, p.path.to_svg()));
                write_paint_attr(&mut out, "fill", &p.fill);
                write_stroke_attrs(&mut out, &p.stroke, p.stroke_width);
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
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
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

fn write_stroke_attrs(out: &mut String, brush: &Brush, width: f64) {
    if width > 0.0 {
        write_paint_attr(out, "stroke", brush);
        out.push_str(&format!(r#" stroke-width="{width}""#));
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
    use filmviz_core::MarkId;
    use kurbo::Point;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn stroked_rects_and_escaped_text() {
        let marks = [
            Mark::rect(MarkId(0), Rect::new(0.0, 0.0, 10.0, 20.0))
                .with_fill(css::WHITE)
                .with_stroke(css::BLACK, 1.75),
            Mark::text(MarkId(1), Point::new(5.0, 5.0), "Tom & Jerry"),
        ];
        let svg = to_svg_string(&marks, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(svg.contains(r##"stroke="#000000" stroke-width="1.75""##));
        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(svg.starts_with("<svg"));
    }
}
