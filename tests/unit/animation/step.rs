use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn relative_values_resolve_against_current() {
    assert_eq!(PropertyValue::By(20.0).resolve(5.0), 25.0);
    assert_eq!(PropertyValue::By(-20.0).resolve(5.0), -15.0);
    assert_eq!(PropertyValue::To(1.0).resolve(5.0), 1.0);
}

#[test]
fn property_set_last_write_wins() {
    let set = PropertySet::new()
        .to(Property::Opacity, 1.0)
        .to(Property::Opacity, 0.0)
        .by(Property::Y, 20.0);
    assert_eq!(set.len(), 2);
    assert_eq!(set.get(Property::Opacity), Some(PropertyValue::To(0.0)));
    assert_eq!(set.get(Property::Y), Some(PropertyValue::By(20.0)));
    assert_eq!(set.get(Property::Scale), None);
}

#[test]
fn property_set_serializes_as_map() {
    let set = PropertySet::new().to(Property::ZIndex, 2.0);
    assert_eq!(
        serde_json::to_string(&set).unwrap(),
        r#"{"z_index":{"to":2.0}}"#
    );
}

#[test]
fn positive_stagger_runs_first_to_last() {
    let timing = StepTiming {
        duration: 0.3,
        delay: 0.1,
        ease: Ease::InQuart,
        stagger: 0.075,
    };
    assert!(approx(timing.start_offset(0, 3), 0.1));
    assert!(approx(timing.start_offset(2, 3), 0.25));
    assert!(approx(timing.total_secs(3), 0.55));
}

#[test]
fn negative_stagger_runs_last_to_first() {
    let timing = StepTiming {
        duration: 0.3,
        delay: 0.0,
        ease: Ease::OutQuart,
        stagger: -0.1,
    };
    assert!(approx(timing.start_offset(2, 3), 0.0));
    assert!(approx(timing.start_offset(0, 3), 0.2));
    assert!(approx(timing.total_secs(3), 0.5));
}

#[test]
fn empty_targets_still_take_delay_and_duration() {
    let step = TransitionStep {
        targets: Vec::new(),
        props: PropertySet::new(),
        timing: StepTiming::default(),
    };
    assert!(approx(step.total_secs(), DEFAULT_DURATION_SECS));
}

#[test]
fn plan_total_is_sum_of_steps() {
    let step = |d: f64| TransitionStep {
        targets: vec![ElementId(0)],
        props: PropertySet::new(),
        timing: StepTiming {
            duration: d,
            ..StepTiming::default()
        },
    };
    let plan = TransitionPlan {
        kind: TransitionKind::Expand,
        steps: vec![step(0.5), step(0.25)],
    };
    assert!(approx(plan.total_secs(), 0.75));
}
