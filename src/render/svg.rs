//! SVG serialisation of a scene, with transient animation state applied.

use std::fmt::Write as _;

use crate::{
    composition::settings::IndicatorStyle,
    foundation::core::{Point, Vec2},
    foundation::error::{BubblelineError, BubblelineResult},
    render::target::PaintTarget,
    scene::{
        builder::Scene,
        primitive::{Bubble, ConnectorLine, INDICATOR_DOT_RADIUS, Indicator, Label, Primitive, Shape},
    },
    transition::frame::{Frame, Override},
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Paints into an in-memory SVG document.
#[derive(Clone, Debug)]
pub struct SvgTarget {
    attached: bool,
    document: Option<String>,
    paints: usize,
}

impl Default for SvgTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgTarget {
    pub fn new() -> Self {
        Self {
            attached: true,
            document: None,
            paints: 0,
        }
    }

    /// A target with no attachment point; painting into it is refused.
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::new()
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Last painted document, if any.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn paint_count(&self) -> usize {
        self.paints
    }
}

impl PaintTarget for SvgTarget {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn paint(&mut self, scene: &Scene, frame: &Frame) -> BubblelineResult<()> {
        if !self.attached {
            return Err(BubblelineError::validation("svg target is detached"));
        }
        self.document = Some(render_svg(scene, frame));
        self.paints += 1;
        Ok(())
    }
}

/// Serialise `scene` as a standalone SVG document.
///
/// Ghosts in `frame` are drawn between the axis and the live primitives.
pub fn render_svg(scene: &Scene, frame: &Frame) -> String {
    let mut out = String::new();
    let style: String = scene
        .css_vars
        .iter()
        .map(|(k, v)| format!("{k}:{v};"))
        .collect();
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" viewBox="{}" class="ppt-svg" style="{}">"#,
        scene.view_box.to_attr(),
        escape(&style)
    );
    let _ = writeln!(
        out,
        r#"  <path class="timeline-line" d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        scene.axis.path_data(),
        escape(&scene.axis.stroke),
        num(scene.axis.width)
    );
    for ghost in &frame.ghosts {
        write_primitive(&mut out, ghost, frame.get(&ghost.key), true);
    }
    for p in &scene.primitives {
        write_primitive(&mut out, p, frame.get(&p.key), false);
    }
    out.push_str("</svg>\n");
    out
}

fn write_primitive(out: &mut String, p: &Primitive, ov: Option<&Override>, ghost: bool) {
    let ov = ov.copied().unwrap_or_default();
    let key = p.key.to_string();
    let class_suffix = if ghost { " ghost" } else { "" };
    match &p.shape {
        Shape::Bubble(b) => write_bubble(out, &key, class_suffix, b, &ov),
        Shape::Line(l) => write_line(out, &key, class_suffix, l, &ov),
        Shape::Indicator(i) => write_indicator(out, &key, class_suffix, i, &ov),
        Shape::Label(l) => write_label(out, &key, class_suffix, l, &ov),
    }
}

fn write_bubble(out: &mut String, key: &str, class: &str, b: &Bubble, ov: &Override) {
    let c = ov.center.unwrap_or(b.center);
    let r = ov.radius.unwrap_or(b.radius).max(0.0);
    let opacity = ov.opacity.unwrap_or(b.opacity);
    let _ = writeln!(
        out,
        r#"  <circle class="bubble{class}" data-key="{key}" data-phase="{}" cx="{}" cy="{}" r="{}" fill="{}" style="mix-blend-mode:{};opacity:{}"/>"#,
        escape(&b.phase),
        num(c.x),
        num(c.y),
        num(r),
        escape(&b.fill),
        b.blend.as_css(),
        num(opacity)
    );
}

fn write_line(out: &mut String, key: &str, class: &str, l: &ConnectorLine, ov: &Override) {
    let line = ov.line.unwrap_or(l.line);
    let mut attrs = String::new();
    if let Some(dash) = l.dash_array {
        let _ = write!(attrs, r#" stroke-dasharray="{dash}""#);
    }
    if let Some(o) = ov.opacity {
        let _ = write!(attrs, r#" opacity="{}""#, num(o));
    }
    let _ = writeln!(
        out,
        r#"  <line class="connection-line{class}" data-key="{key}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{attrs}/>"#,
        num(line.p0.x),
        num(line.p0.y),
        num(line.p1.x),
        num(line.p1.y),
        escape(&l.stroke),
        num(l.width)
    );
}

fn write_indicator(out: &mut String, key: &str, class: &str, i: &Indicator, ov: &Override) {
    let mut attrs = String::new();
    if let Some(t) = transform_attr(ov.translate, ov.scale, i.center) {
        let _ = write!(attrs, r#" transform="{t}""#);
    }
    if let Some(o) = ov.opacity {
        let _ = write!(attrs, r#" opacity="{}""#, num(o));
    }
    let _ = writeln!(
        out,
        r#"  <g class="draggable-indicator{class}" data-key="{key}"{attrs}>"#
    );
    let Point { x, y } = i.center;
    let color = escape(&i.color);
    let stroke = num(i.stroke_width);
    match i.style {
        IndicatorStyle::CircleDot => {
            let _ = writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{color}" stroke-width="{stroke}"/>"#,
                num(x),
                num(y),
                num(i.size)
            );
            let _ = writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
                num(x),
                num(y),
                num(INDICATOR_DOT_RADIUS)
            );
        }
        IndicatorStyle::SolidCircle => {
            let _ = writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
                num(x),
                num(y),
                num(i.size)
            );
        }
        IndicatorStyle::HollowCircle => {
            let _ = writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{color}" stroke-width="{stroke}"/>"#,
                num(x),
                num(y),
                num(i.size)
            );
        }
        IndicatorStyle::Square => {
            let _ = writeln!(
                out,
                r#"    <rect x="{}" y="{}" width="{}" height="{}" fill="{color}"/>"#,
                num(x - i.size),
                num(y - i.size),
                num(i.size * 2.0),
                num(i.size * 2.0)
            );
        }
        IndicatorStyle::Diamond => {
            let points: Vec<String> = i
                .diamond_points()
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect();
            let _ = writeln!(
                out,
                r#"    <polygon points="{}" fill="{color}"/>"#,
                points.join(" ")
            );
        }
        IndicatorStyle::None => {}
    }
    out.push_str("  </g>\n");
}

fn write_label(out: &mut String, key: &str, class: &str, l: &Label, ov: &Override) {
    let shift = Vec2::new(0.0, l.baseline_shift);
    let translate = ov.translate.unwrap_or(Vec2::ZERO) + shift;
    let mut attrs = String::new();
    if translate != Vec2::ZERO {
        let _ = write!(
            attrs,
            r#" transform="translate({}, {})""#,
            num(translate.x),
            num(translate.y)
        );
    }
    if let Some(o) = ov.opacity {
        let _ = write!(attrs, r#" opacity="{}""#, num(o));
    }
    if l.lines.len() <= 1 {
        attrs.push_str(r#" dominant-baseline="middle""#);
    }
    let _ = write!(
        out,
        r#"  <text class="label-text{class}" data-key="{key}" x="{}" y="{}" font-size="{}" font-weight="{}" font-family="{}" fill="{}" text-anchor="middle"{attrs}>"#,
        num(l.anchor.x),
        num(l.anchor.y),
        num(l.font_size),
        l.font_weight,
        escape(&l.font_family),
        escape(&l.fill)
    );
    if l.lines.len() <= 1 {
        out.push_str(&escape(l.lines.first().map(String::as_str).unwrap_or("")));
    } else {
        for (i, line) in l.lines.iter().enumerate() {
            let dy = if i == 0 { "0" } else { "1.2em" };
            let _ = write!(
                out,
                r#"<tspan x="{}" dy="{dy}">{}</tspan>"#,
                num(l.anchor.x),
                escape(line)
            );
        }
    }
    out.push_str("</text>\n");
}

/// `translate(..)` followed by a scale about `center`, or `None` when neither applies.
fn transform_attr(translate: Option<Vec2>, scale: Option<f64>, center: Point) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(t) = translate {
        parts.push(format!("translate({}, {})", num(t.x), num(t.y)));
    }
    if let Some(s) = scale {
        parts.push(format!(
            "translate({}, {}) scale({}) translate({}, {})",
            num(center.x),
            num(center.y),
            num(s),
            num(-center.x),
            num(-center.y)
        ));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Compact decimal: at most four fractional digits, trailing zeros dropped.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
