use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::error::{BubblelineError, BubblelineResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Visual knobs for one render call.
///
/// Treated as an immutable value: "reset" means building [`RenderSettings::default`] and
/// rendering again. The stroke/size fields without a serde default are required in JSON, so a
/// host that forgets them fails at load time rather than drawing garbage.
pub struct RenderSettings {
    /// Per-phase color overrides.
    #[serde(default = "default_colors")]
    pub colors: BTreeMap<String, String>,
    #[serde(default = "default_timeline_color")]
    pub timeline_color: String,
    pub timeline_width: f64,
    #[serde(default = "default_connection_color")]
    pub connection_color: String,
    pub connection_width: f64,
    #[serde(default)]
    pub connection_type: ConnectionType,
    /// Extra gap between a connector end and its label box; may be negative.
    pub connection_padding: f64,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub indicator_style: IndicatorStyle,
    pub indicator_size: f64,
    #[serde(default = "default_indicator_color")]
    pub indicator_color: String,
    pub indicator_stroke_width: f64,
    /// Axis padding as a percentage of the axis length.
    #[serde(default)]
    pub timeline_padding: f64,
    #[serde(default)]
    pub bubble_blend_mode: BlendMode,
    #[serde(default = "one")]
    pub label_distance_horizontal: f64,
    #[serde(default = "one")]
    pub label_distance_vertical: f64,
    #[serde(flatten)]
    pub curve: CurveSettings,
    #[serde(flatten)]
    pub crop: CropSettings,
    #[serde(flatten)]
    pub entry: EntrySettings,
    #[serde(flatten)]
    pub hover: HoverSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            timeline_color: default_timeline_color(),
            timeline_width: 0.18,
            connection_color: default_connection_color(),
            connection_width: 0.03,
            connection_type: ConnectionType::Solid,
            connection_padding: -0.05,
            text_color: default_text_color(),
            font_family: default_font_family(),
            indicator_style: IndicatorStyle::SolidCircle,
            indicator_size: 0.1,
            indicator_color: default_indicator_color(),
            indicator_stroke_width: 0.05,
            timeline_padding: 0.0,
            bubble_blend_mode: BlendMode::Multiply,
            label_distance_horizontal: 1.0,
            label_distance_vertical: 1.0,
            curve: CurveSettings::default(),
            crop: CropSettings::default(),
            entry: EntrySettings::default(),
            hover: HoverSettings::default(),
        }
    }
}

impl RenderSettings {
    pub fn from_json_str(s: &str) -> BubblelineResult<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> BubblelineResult<()> {
        let non_negative = [
            ("timelineWidth", self.timeline_width),
            ("connectionWidth", self.connection_width),
            ("indicatorSize", self.indicator_size),
            ("indicatorStrokeWidth", self.indicator_stroke_width),
            ("labelDistanceHorizontal", self.label_distance_horizontal),
            ("labelDistanceVertical", self.label_distance_vertical),
            ("entryBubbleDuration", self.entry.entry_bubble_duration),
            ("entryBubbleStagger", self.entry.entry_bubble_stagger),
            ("entryIndicatorDuration", self.entry.entry_indicator_duration),
            ("entryIndicatorStagger", self.entry.entry_indicator_stagger),
            ("entryIndicatorDelay", self.entry.entry_indicator_delay),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(BubblelineError::validation(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if !self.connection_padding.is_finite() {
            return Err(BubblelineError::validation(
                "connectionPadding must be finite",
            ));
        }
        if !(0.0..50.0).contains(&self.timeline_padding) {
            return Err(BubblelineError::validation(format!(
                "timelinePadding must be in [0, 50) percent (got {})",
                self.timeline_padding
            )));
        }
        for (name, v) in [
            ("cropTop", self.crop.crop_top),
            ("cropBottom", self.crop.crop_bottom),
            ("cropLeft", self.crop.crop_left),
            ("cropRight", self.crop.crop_right),
        ] {
            if !(0.0..=100.0).contains(&v) {
                return Err(BubblelineError::validation(format!(
                    "{name} must be in [0, 100] percent (got {v})"
                )));
            }
        }
        for p in &self.curve.curve_points {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(BubblelineError::validation(
                    "curvePoints must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Label distance multiplier for the given orientation; `0` means "unset" and reads as `1`.
    pub fn label_distance(&self, vertical: bool) -> f64 {
        let v = if vertical {
            self.label_distance_vertical
        } else {
            self.label_distance_horizontal
        };
        if v == 0.0 { 1.0 } else { v }
    }

    /// Bubble fill for a phase: the override in `colors` wins over the phase default.
    pub fn phase_color<'a>(&'a self, phase_key: &str, phase_default: &'a str) -> &'a str {
        match self.colors.get(phase_key) {
            Some(c) if !c.is_empty() => c,
            _ => phase_default,
        }
    }

    pub fn entry_ease(&self) -> Ease {
        Ease::from_token(&self.entry.entry_easing)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Connector stroke style.
pub enum ConnectionType {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl ConnectionType {
    /// SVG dash pattern, in stroke-width units; `None` for solid lines.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("0.2,0.2"),
            Self::Dotted => Some("0.05,0.15"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Marker drawn where a connector leaves its bubble.
pub enum IndicatorStyle {
    None,
    CircleDot,
    #[default]
    SolidCircle,
    HollowCircle,
    Square,
    Diamond,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// CSS `mix-blend-mode` applied to bubbles.
pub enum BlendMode {
    Normal,
    #[default]
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Curve control point as a fraction of the drawing area.
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSettings {
    #[serde(default)]
    pub curve_enabled: bool,
    /// Four points make a cubic Bézier; any other count (≥ 2) makes a polyline.
    #[serde(default = "default_curve_points")]
    pub curve_points: Vec<CurvePoint>,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            curve_enabled: false,
            curve_points: default_curve_points(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Viewbox crop, in percent of the cross-axis extent.
pub struct CropSettings {
    #[serde(default)]
    pub crop_top: f64,
    #[serde(default)]
    pub crop_bottom: f64,
    #[serde(default)]
    pub crop_left: f64,
    #[serde(default)]
    pub crop_right: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Scroll-triggered entry reveal timing (milliseconds).
pub struct EntrySettings {
    #[serde(default = "yes")]
    pub entry_animation: bool,
    /// Visible fraction that triggers the reveal; consumed by the host's observer.
    #[serde(default = "default_entry_threshold")]
    pub entry_animation_threshold: f64,
    #[serde(default = "default_entry_easing")]
    pub entry_easing: String,
    #[serde(default = "default_entry_bubble_duration")]
    pub entry_bubble_duration: f64,
    #[serde(default = "default_entry_bubble_stagger")]
    pub entry_bubble_stagger: f64,
    #[serde(default = "default_entry_indicator_duration")]
    pub entry_indicator_duration: f64,
    #[serde(default = "default_entry_indicator_stagger")]
    pub entry_indicator_stagger: f64,
    #[serde(default = "default_entry_indicator_delay")]
    pub entry_indicator_delay: f64,
}

impl Default for EntrySettings {
    fn default() -> Self {
        Self {
            entry_animation: true,
            entry_animation_threshold: default_entry_threshold(),
            entry_easing: default_entry_easing(),
            entry_bubble_duration: default_entry_bubble_duration(),
            entry_bubble_stagger: default_entry_bubble_stagger(),
            entry_indicator_duration: default_entry_indicator_duration(),
            entry_indicator_stagger: default_entry_indicator_stagger(),
            entry_indicator_delay: default_entry_indicator_delay(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Hover styling handed to the painter as CSS custom properties.
pub struct HoverSettings {
    #[serde(default = "default_bubble_hover_scale")]
    pub bubble_hover_scale: f64,
    #[serde(default = "default_connection_hover_color")]
    pub connection_hover_color: String,
    #[serde(default = "default_hover_width")]
    pub connection_hover_width: f64,
    #[serde(default = "default_hover_width")]
    pub indicator_hover_stroke: f64,
    #[serde(default = "one")]
    pub connection_hover_text_scale: f64,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            bubble_hover_scale: default_bubble_hover_scale(),
            connection_hover_color: default_connection_hover_color(),
            connection_hover_width: default_hover_width(),
            indicator_hover_stroke: default_hover_width(),
            connection_hover_text_scale: 1.0,
        }
    }
}

fn default_colors() -> BTreeMap<String, String> {
    [
        ("contact", "#e63946"),
        ("discovery", "#f4a261"),
        ("content", "#e9c46a"),
        ("uxue", "#8ac926"),
        ("coding", "#43aa8b"),
        ("launch", "#e879a0"),
        ("support", "#adb5bd"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_timeline_color() -> String {
    "#333333".to_string()
}

fn default_connection_color() -> String {
    "#999999".to_string()
}

fn default_text_color() -> String {
    "#333333".to_string()
}

fn default_font_family() -> String {
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif"
        .to_string()
}

fn default_indicator_color() -> String {
    "#666666".to_string()
}

fn default_curve_points() -> Vec<CurvePoint> {
    vec![
        CurvePoint::new(0.0, 0.5),
        CurvePoint::new(0.33, 0.3),
        CurvePoint::new(0.67, 0.7),
        CurvePoint::new(1.0, 0.5),
    ]
}

fn default_entry_threshold() -> f64 {
    0.5
}

fn default_entry_easing() -> String {
    "ease-out".to_string()
}

fn default_entry_bubble_duration() -> f64 {
    600.0
}

fn default_entry_bubble_stagger() -> f64 {
    80.0
}

fn default_entry_indicator_duration() -> f64 {
    400.0
}

fn default_entry_indicator_stagger() -> f64 {
    60.0
}

fn default_entry_indicator_delay() -> f64 {
    200.0
}

fn default_bubble_hover_scale() -> f64 {
    1.05
}

fn default_connection_hover_color() -> String {
    "#e63946".to_string()
}

fn default_hover_width() -> f64 {
    0.1
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

#[cfg(test)]
#[path = "../../tests/unit/composition/settings.rs"]
mod tests;
