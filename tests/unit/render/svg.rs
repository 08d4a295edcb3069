use super::*;
use crate::{
    composition::dsl::{StepBuilder, TimelineBuilder, task},
    composition::model::TaskRole,
    composition::settings::RenderSettings,
    geometry::kernel::Projection,
    scene::{
        builder::SceneBuilder,
        primitive::{PrimitiveKey, TaskRef},
    },
};

fn scene(settings: RenderSettings) -> Scene {
    let d = TimelineBuilder::new()
        .phase("contact", "Contact", "#e63946")
        .settings(settings)
        .step(
            StepBuilder::new("a", "contact", 10.0, 20.0)
                .client(task("Q&A\n<kickoff>", 12.0, 3.0))
                .unwrap()
                .build(),
        )
        .build()
        .unwrap();
    SceneBuilder::build(&d.steps, &d.phases, &d.settings, Projection::LinearHorizontal).unwrap()
}

#[test]
fn num_is_compact() {
    assert_eq!(num(10.0), "10");
    assert_eq!(num(0.5), "0.5");
    assert_eq!(num(-0.00001), "0");
    assert_eq!(num(1.23456), "1.2346");
    assert_eq!(num(f64::NAN), "0");
}

#[test]
fn document_contains_every_primitive() {
    let svg = render_svg(&scene(RenderSettings::default()), &Frame::settled());
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 50 20\""));
    assert!(svg.contains(r#"class="timeline-line" d="M0,10 L50,10""#));
    assert!(svg.contains(r#"data-key="bubble_a""#));
    assert!(svg.contains(r#"data-key="line_a_client_0""#));
    assert!(svg.contains(r#"data-key="ind_a_client_0""#));
    assert!(svg.contains(r#"data-key="label_a_client_0""#));
    assert!(svg.contains("mix-blend-mode:multiply;opacity:0.7"));
    assert!(svg.contains("--bubble-hover-scale:1.05;"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn label_text_is_escaped_and_split_into_tspans() {
    let svg = render_svg(&scene(RenderSettings::default()), &Frame::settled());
    assert!(svg.contains(r#"<tspan x="12" dy="0">Q&amp;A</tspan>"#));
    assert!(svg.contains(r#"<tspan x="12" dy="1.2em">&lt;kickoff&gt;</tspan>"#));
    // Two lines of size 0.3 shift up by 0.18.
    assert!(svg.contains(r#"transform="translate(0, -0.18)""#));
}

#[test]
fn dash_pattern_and_indicator_styles() {
    let mut settings = RenderSettings::default();
    settings.connection_type = crate::composition::settings::ConnectionType::Dotted;
    settings.indicator_style = IndicatorStyle::Diamond;
    let svg = render_svg(&scene(settings), &Frame::settled());
    assert!(svg.contains(r#"stroke-dasharray="0.05,0.15""#));
    assert!(svg.contains("<polygon points="));
}

#[test]
fn overrides_replace_laid_out_values() {
    let s = scene(RenderSettings::default());
    let mut frame = Frame::default();
    frame.overrides.insert(
        PrimitiveKey::Bubble("a".into()),
        Override {
            radius: Some(0.25),
            opacity: Some(0.1),
            ..Override::default()
        },
    );
    frame.overrides.insert(
        PrimitiveKey::Label(TaskRef::new("a", TaskRole::Client, 0)),
        Override {
            translate: Some(Vec2::new(-2.0, 0.0)),
            ..Override::default()
        },
    );
    frame.overrides.insert(
        PrimitiveKey::Indicator(TaskRef::new("a", TaskRole::Client, 0)),
        Override {
            scale: Some(0.5),
            ..Override::default()
        },
    );
    let svg = render_svg(&s, &frame);
    assert!(svg.contains(r#"r="0.25""#));
    assert!(svg.contains("opacity:0.1"));
    assert!(svg.contains(r#"transform="translate(-2, -0.18)""#));
    assert!(svg.contains("scale(0.5)"));
}

#[test]
fn ghosts_are_painted_before_live_primitives() {
    let s = scene(RenderSettings::default());
    let mut ghost = s.primitives[0].clone();
    ghost.key = PrimitiveKey::Bubble("gone".into());
    let frame = Frame {
        ghosts: vec![ghost],
        ..Frame::default()
    };
    let svg = render_svg(&s, &frame);
    let ghost_at = svg.find(r#"class="bubble ghost" data-key="bubble_gone""#).unwrap();
    let live_at = svg.find(r#"data-key="bubble_a""#).unwrap();
    assert!(ghost_at < live_at);
}

#[test]
fn detached_target_refuses_to_paint() {
    let s = scene(RenderSettings::default());
    let mut target = SvgTarget::detached();
    assert!(!target.is_attached());
    assert!(target.paint(&s, &Frame::settled()).is_err());
    assert!(target.document().is_none());

    target.attach();
    target.paint(&s, &Frame::settled()).unwrap();
    assert_eq!(target.paint_count(), 1);
    assert!(target.document().unwrap().contains("bubble_a"));
}
