use super::*;

#[test]
fn keys_display_with_stable_prefixes() {
    let t = TaskRef::new("s1", TaskRole::Client, 2);
    assert_eq!(PrimitiveKey::Bubble("s1".into()).to_string(), "bubble_s1");
    assert_eq!(PrimitiveKey::Line(t.clone()).to_string(), "line_s1_client_2");
    assert_eq!(
        PrimitiveKey::Indicator(TaskRef::new("s1", TaskRole::Preface, 0)).to_string(),
        "ind_s1_preface_0"
    );
    assert_eq!(PrimitiveKey::Label(t).to_string(), "label_s1_client_2");
}

#[test]
fn key_accessors() {
    let k = PrimitiveKey::Label(TaskRef::new("x", TaskRole::Preface, 1));
    assert_eq!(k.kind(), PrimitiveKind::Label);
    assert_eq!(k.step_id(), "x");
    assert_eq!(k.task().map(|t| t.index), Some(1));
    assert!(PrimitiveKey::Bubble("x".into()).task().is_none());
}

#[test]
fn primitive_serializes_key_as_string_and_tags_shape() {
    let p = Primitive {
        key: PrimitiveKey::Bubble("a".into()),
        shape: Shape::Bubble(Bubble {
            center: Point::new(2.0, 10.0),
            radius: 0.5,
            fill: "#e63946".into(),
            opacity: BUBBLE_OPACITY,
            blend: BlendMode::Multiply,
            phase: "contact".into(),
        }),
    };
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["key"], "bubble_a");
    assert_eq!(v["type"], "bubble");
    assert_eq!(v["blend"], "multiply");
    assert_eq!(v["radius"], 0.5);
}

#[test]
fn attributes_pick_the_animated_fields() {
    let line = Line::new((0.0, 0.0), (1.0, 1.0));
    let p = Primitive {
        key: PrimitiveKey::Line(TaskRef::new("a", TaskRole::Client, 0)),
        shape: Shape::Line(ConnectorLine {
            line,
            stroke: "#999999".into(),
            width: 0.03,
            dash_array: None,
        }),
    };
    assert_eq!(p.attributes(), Attributes::Segment { line });
    assert!(p.as_bubble().is_none());
}

#[test]
fn diamond_corners_use_scaled_half_diagonal() {
    let ind = Indicator {
        center: Point::new(1.0, 1.0),
        style: IndicatorStyle::Diamond,
        size: 0.5,
        color: "#666666".into(),
        stroke_width: 0.05,
    };
    let [top, right, bottom, left] = ind.diamond_points();
    assert!((top.y - 0.4).abs() < 1e-12);
    assert!((right.x - 1.6).abs() < 1e-12);
    assert!((bottom.y - 1.6).abs() < 1e-12);
    assert!((left.x - 0.4).abs() < 1e-12);
}
