use super::*;
use crate::{
    composition::dsl::{StepBuilder, TimelineBuilder},
    geometry::kernel::Projection,
    scene::{builder::SceneBuilder, primitive::PrimitiveKey},
};

fn scene_with(ids: &[(&str, f64)]) -> Scene {
    let mut b = TimelineBuilder::new().phase("contact", "Contact", "#e63946");
    for (id, x) in ids {
        b = b.step(StepBuilder::new(*id, "contact", *x, 30.0).build());
    }
    let d = b.build().unwrap();
    SceneBuilder::build(&d.steps, &d.phases, &d.settings, Projection::LinearHorizontal).unwrap()
}

#[test]
fn runs_then_settles_then_idles() {
    let old = Snapshot::capture(&scene_with(&[("a", 5.0), ("b", 20.0)]));
    let new = scene_with(&[("a", 8.0), ("c", 30.0)]);
    let mut engine = TransitionEngine::new();
    assert_eq!(engine.state(), EngineState::Idle);

    let ticket = engine.request(&old, &new, 1000.0).unwrap();
    assert!(engine.is_animating());

    let FrameStep::Animating(first) = engine.frame(ticket, 1000.0) else {
        panic!("expected an animating frame");
    };
    let a = first.get(&PrimitiveKey::Bubble("a".into())).unwrap();
    assert!((a.center.unwrap().x - 5.0).abs() < 1e-12);
    assert_eq!(first.ghosts.len(), 1);

    let FrameStep::Animating(mid) = engine.frame(ticket, 1300.0) else {
        panic!("expected an animating frame");
    };
    // InOutQuad is exactly one half at the midpoint.
    let a = mid.get(&PrimitiveKey::Bubble("a".into())).unwrap();
    assert!((a.center.unwrap().x - 6.5).abs() < 1e-12);
    assert_eq!(engine.state(), EngineState::Running);

    let FrameStep::Animating(last) = engine.frame(ticket, 1600.0) else {
        panic!("expected the final eased frame");
    };
    let a = last.get(&PrimitiveKey::Bubble("a".into())).unwrap();
    assert!((a.center.unwrap().x - 8.0).abs() < 1e-12);
    assert_eq!(engine.state(), EngineState::Settling);

    assert_eq!(engine.frame(ticket, 1616.0), FrameStep::Settled);
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(engine.plan().is_none());
    assert_eq!(engine.frame(ticket, 1632.0), FrameStep::Stale);
}

#[test]
fn requests_while_running_are_dropped() {
    let old = Snapshot::capture(&scene_with(&[("a", 5.0)]));
    let new = scene_with(&[("a", 10.0)]);
    let newer = scene_with(&[("z", 40.0)]);
    let mut engine = TransitionEngine::new();

    let ticket = engine.request(&old, &new, 0.0).unwrap();
    let generation = engine.generation();
    assert!(engine.request(&old, &newer, 10.0).is_none());
    assert_eq!(engine.generation(), generation);

    // The running transition is unaffected by the dropped request.
    let plan = engine.plan().unwrap();
    assert!(plan.tween(&PrimitiveKey::Bubble("z".into())).is_none());
    assert!(matches!(engine.frame(ticket, 100.0), FrameStep::Animating(_)));
}

#[test]
fn reset_makes_pending_tickets_stale() {
    let old = Snapshot::capture(&scene_with(&[("a", 5.0)]));
    let new = scene_with(&[("a", 10.0)]);
    let mut engine = TransitionEngine::new();
    let ticket = engine.request(&old, &new, 0.0).unwrap();

    engine.reset();
    assert!(!engine.is_animating());
    assert_eq!(engine.frame(ticket, 50.0), FrameStep::Stale);

    let fresh = engine.request(&old, &new, 60.0).unwrap();
    assert_ne!(fresh, ticket);
    assert!(matches!(engine.frame(fresh, 60.0), FrameStep::Animating(_)));
}

#[test]
fn zero_duration_completes_on_first_frame() {
    let old = Snapshot::capture(&scene_with(&[("a", 5.0)]));
    let new = scene_with(&[("a", 10.0)]);
    let mut engine = TransitionEngine::with_timing(0.0, Ease::Linear);
    let ticket = engine.request(&old, &new, 0.0).unwrap();
    assert!(matches!(engine.frame(ticket, 0.0), FrameStep::Animating(_)));
    assert_eq!(engine.frame(ticket, 0.0), FrameStep::Settled);
}
