use super::*;
use crate::{
    composition::dsl::{StepBuilder, TimelineBuilder, task},
    geometry::kernel::Projection,
    scene::builder::SceneBuilder,
};

#[test]
fn capture_keys_every_primitive() {
    let data = TimelineBuilder::new()
        .phase("contact", "Contact", "#e63946")
        .step(
            StepBuilder::new("a", "contact", 5.0, 10.0)
                .client(task("t", 6.0, 3.0))
                .unwrap()
                .build(),
        )
        .build()
        .unwrap();
    let scene = SceneBuilder::build(
        &data.steps,
        &data.phases,
        &data.settings,
        Projection::LinearHorizontal,
    )
    .unwrap();
    let snap = Snapshot::capture(&scene);
    assert_eq!(snap.len(), scene.primitives.len());
    for p in &scene.primitives {
        assert!(snap.contains(&p.key));
        assert_eq!(snap.attributes(&p.key), Some(p.attributes()));
    }
    let bubble = PrimitiveKey::Bubble("a".into());
    assert!(matches!(
        snap.attributes(&bubble),
        Some(Attributes::Circle { .. })
    ));
}

#[test]
fn default_snapshot_is_empty() {
    let snap = Snapshot::default();
    assert!(snap.is_empty());
    assert!(snap.get(&PrimitiveKey::Bubble("x".into())).is_none());
}
