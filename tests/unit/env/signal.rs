use super::*;

#[test]
fn unmeasured_layout_reports_none() {
    let env = HeadlessEnvironment::unmeasured();
    assert!(env.measure().is_none());

    let mut env = HeadlessEnvironment::new(800.0, 400.0, f64::NAN);
    assert_eq!(env.measure().unwrap().dpr, 1.0);
    env.set_size(0.0, 400.0);
    assert!(env.measure().is_none());
}

#[test]
fn signals_are_queued_only_for_observed_topics() {
    let mut env = HeadlessEnvironment::new(800.0, 400.0, 1.0);
    env.set_size(640.0, 320.0);
    env.set_reduced_motion(true);
    assert!(env.drain_signals().is_empty());

    let resize = env.subscribe(SignalTopic::Resize);
    env.subscribe(SignalTopic::MotionPreference);
    env.set_size(800.0, 400.0);
    env.set_dpr(2.0);
    env.set_reduced_motion(false);
    env.set_visible(false);
    assert_eq!(
        env.drain_signals(),
        vec![
            Signal::Resized,
            Signal::Resized,
            Signal::ReducedMotion(false)
        ]
    );

    assert!(env.unsubscribe(resize));
    env.set_size(100.0, 100.0);
    assert!(env.drain_signals().is_empty());
}

#[test]
fn unchanged_values_do_not_signal() {
    let mut env = HeadlessEnvironment::new(800.0, 400.0, 1.0);
    env.subscribe(SignalTopic::Visibility);
    env.set_visible(true);
    assert!(env.drain_signals().is_empty());
    env.set_visible(false);
    assert_eq!(env.drain_signals(), vec![Signal::Visibility(false)]);
}

#[test]
fn unsubscribe_is_single_shot() {
    let mut env = HeadlessEnvironment::new(1.0, 1.0, 1.0);
    let id = env.subscribe(SignalTopic::Resize);
    assert_eq!(env.subscriber_count(), 1);
    assert!(env.unsubscribe(id));
    assert!(!env.unsubscribe(id));
    assert_eq!(env.subscriber_count(), 0);
    assert!(!env.is_observed(SignalTopic::Resize));
}

#[test]
fn pointer_moves_signal_once_per_new_position() {
    let mut env = HeadlessEnvironment::new(800.0, 400.0, 1.0);
    env.set_pointer(5.0, 5.0);
    assert!(env.drain_signals().is_empty());

    env.subscribe(SignalTopic::Pointer);
    env.set_pointer(5.0, 5.0);
    env.set_pointer(20.0, 40.0);
    env.set_pointer(20.0, 40.0);
    assert_eq!(
        env.drain_signals(),
        vec![Signal::Pointer(Point::new(20.0, 40.0))]
    );
}
