use super::*;
use crate::animation::step::TransitionKind;
use crate::foundation::core::Viewport;
use crate::stage::surface::{RecordingScheduler, RecordingSurface, SurfaceCommand};

fn images(n: usize) -> Vec<ImageDescriptor> {
    (0..n)
        .map(|i| ImageDescriptor {
            lo_url: format!("{i}_lo.jpg"),
            lo_width: 100,
            lo_height: 80,
            hi_url: format!("{i}_hi.jpg"),
            hi_width: 1000,
            hi_height: 800,
        })
        .collect()
}

fn stage(next: Vec<usize>) -> Stage<RecordingSurface, RecordingScheduler> {
    let config = StageConfig {
        threshold: 10.0,
        trail_length: 2,
        history_length: 5,
        next_indices: next,
    };
    Stage::new(
        images(5),
        config,
        RecordingSurface::new(Viewport::new(800.0, 600.0).unwrap()),
        RecordingScheduler::new(),
    )
    .unwrap()
}

fn feed_scenario(s: &mut Stage<RecordingSurface, RecordingScheduler>) {
    for (x, y) in [(0.0, 0.0), (0.0, 0.0), (100.0, 0.0), (105.0, 0.0), (200.0, 0.0)] {
        s.on_pointer_move(x, y);
    }
}

#[test]
fn new_rejects_empty_images_and_bad_config() {
    let surface = || RecordingSurface::new(Viewport::new(1.0, 1.0).unwrap());
    assert!(
        Stage::new(
            Vec::new(),
            StageConfig::default(),
            surface(),
            RecordingScheduler::new()
        )
        .is_err()
    );
    let bad = StageConfig {
        next_indices: vec![9],
        ..StageConfig::default()
    };
    assert!(Stage::new(images(2), bad, surface(), RecordingScheduler::new()).is_err());
}

#[test]
fn new_preloads_upcoming_at_low_resolution() {
    let s = stage(vec![1, 2]);
    assert_eq!(
        s.surface().commands(),
        &[
            SurfaceCommand::SetResolution {
                element: ElementId(1),
                res: Resolution::Lo
            },
            SurfaceCommand::SetResolution {
                element: ElementId(2),
                res: Resolution::Lo
            },
        ]
    );
    assert_eq!(s.surface().resolution(ElementId(1)), Some(Resolution::Lo));
    assert_eq!(s.surface().resolution(ElementId(0)), None);

    // Re-resolving from an empty history is a no-op.
    assert!(s.refresh().is_none());
    assert_eq!(s.surface().commands().len(), 2);
}

#[test]
fn each_resolve_preloads_the_indices_after_the_new_sample() {
    let mut s = stage(Vec::new());
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let (seen_w, config) = (std::rc::Rc::clone(&seen), s.config().clone());
    s.history()
        .add_watcher(move |_| seen_w.borrow_mut().push(config.get().next_indices));

    feed_scenario(&mut s);
    assert_eq!(
        *seen.borrow(),
        vec![
            vec![1, 2, 3, 4, 0],
            vec![2, 3, 4, 0, 1],
            vec![3, 4, 0, 1, 2],
        ]
    );

    // The first sample already loaded every element at low resolution.
    let surface = s.surface();
    for i in 0..5 {
        assert_eq!(surface.resolution(ElementId(i)), Some(Resolution::Lo), "element {i}");
    }
    let preloads = surface
        .commands()
        .iter()
        .take_while(|c| matches!(c, SurfaceCommand::SetResolution { .. }))
        .count();
    assert_eq!(preloads, 5);
}

#[test]
fn accepted_moves_drive_the_resolver() {
    let mut s = stage(Vec::new());
    feed_scenario(&mut s);

    let hist = s.history().get();
    assert_eq!(
        hist.iter().map(|h| h.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    let transforms = s
        .surface()
        .commands()
        .iter()
        .filter(|c| matches!(c, SurfaceCommand::ApplyTransform { .. }))
        .count();
    assert_eq!(transforms, 3);

    let surface = s.surface();
    assert_eq!(surface.element(ElementId(0)).opacity, 0.0);
    assert_eq!(surface.element(ElementId(1)).opacity, 1.0);
    let newest = surface.element(ElementId(2));
    assert_eq!((newest.x, newest.y), (-200.0, -300.0));
    assert_eq!(newest.z_index, 2.0);
    assert_eq!(newest.scale, 0.6);
}

#[test]
fn expand_twice_runs_one_sequence() {
    let mut s = stage(Vec::new());
    feed_scenario(&mut s);

    assert!(s.expand());
    assert!(!s.expand());
    assert_eq!(s.surface().resolution(ElementId(2)), Some(Resolution::Hi));
    assert_eq!(s.state(), SequencerState::ExpandRunning);

    let falls = std::rc::Rc::new(std::cell::RefCell::new(0));
    let f = std::rc::Rc::clone(&falls);
    s.flags().is_animating().add_watcher(move |v| {
        if !*v {
            *f.borrow_mut() += 1;
        }
    });

    let mut outcomes = Vec::new();
    loop {
        let p = s.complete_step();
        outcomes.push(p);
        if !matches!(p, StepProgress::Started { .. }) {
            break;
        }
    }
    assert_eq!(outcomes.last(), Some(&StepProgress::Finished(TransitionKind::Expand)));
    assert_eq!(s.scheduler().steps().len(), 3);
    assert_eq!(*falls.borrow(), 1);
    assert!(s.flags().active().get());
    assert_eq!(s.state(), SequencerState::OpenIdle);
}

#[test]
fn pointer_moves_are_ignored_while_open() {
    let mut s = stage(Vec::new());
    feed_scenario(&mut s);
    s.expand();
    assert_eq!(s.on_pointer_move(700.0, 500.0), SampleOutcome::Suppressed);
    for _ in 0..3 {
        s.complete_step();
    }
    assert_eq!(s.on_pointer_move(700.0, 500.0), SampleOutcome::Suppressed);
    assert_eq!(s.history().get().len(), 3);
}

#[test]
fn minimize_targets_last_sample_with_current_viewport() {
    let mut s = stage(Vec::new());
    feed_scenario(&mut s);
    s.expand();
    for _ in 0..3 {
        s.complete_step();
    }

    s.surface_mut()
        .set_viewport(Viewport::new(1000.0, 400.0).unwrap());
    assert!(s.minimize());
    assert!(!s.flags().is_open().get());
    s.complete_step();

    let home = s.scheduler().last_step().unwrap().clone();
    assert_eq!(home.targets, vec![ElementId(2)]);
    s.surface_mut().finish_step(&home);
    let e = s.surface().element(ElementId(2));
    assert_eq!((e.x, e.y), (-300.0, -200.0));

    s.complete_step();
    assert_eq!(
        s.complete_step(),
        StepProgress::Finished(TransitionKind::Minimize)
    );
    assert_eq!(s.state(), SequencerState::Idle);
    assert!(matches!(
        s.on_pointer_move(700.0, 300.0),
        SampleOutcome::Accepted(_)
    ));
}

#[test]
fn refresh_while_open_focuses_current() {
    let mut s = stage(vec![4]);
    feed_scenario(&mut s);
    s.expand();
    for _ in 0..3 {
        s.complete_step();
    }

    let update = s.refresh().unwrap();
    assert!(update.resolutions.contains(&(ElementId(1), Resolution::Lo)));
    assert_eq!(update.resolutions.last(), Some(&(ElementId(2), Resolution::Hi)));

    let surface = s.surface();
    for i in [0, 1, 3, 4] {
        assert_eq!(surface.element(ElementId(i)).opacity, 0.0, "element {i}");
    }
    let focused = surface.element(ElementId(2));
    assert_eq!((focused.x, focused.y, focused.scale, focused.opacity), (0.0, 0.0, 1.0, 1.0));
}

#[test]
fn expand_and_minimize_on_empty_history_are_noops() {
    let mut s = stage(Vec::new());
    assert!(!s.expand());
    assert!(!s.minimize());
    assert!(!s.flags().is_open().get());
    assert!(s.scheduler().steps().is_empty());
    assert_eq!(s.complete_step(), StepProgress::Ignored);
}

#[test]
fn counter_label_is_one_based() {
    let mut s = stage(Vec::new());
    assert_eq!(s.counter_label(), None);
    feed_scenario(&mut s);
    assert_eq!(s.counter_label().as_deref(), Some("0003/0005"));
}
