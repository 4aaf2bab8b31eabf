use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn get_returns_initial_value_without_notifying() {
    let obs = Observable::new(3_u32);
    assert_eq!(obs.get(), 3);
    assert_eq!(obs.version(), 0);
}

#[test]
fn set_notifies_in_registration_order_with_new_value() {
    let obs = Observable::new(0_i32);
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    obs.add_watcher(move |v| l.borrow_mut().push(("first", *v)));
    let l = Rc::clone(&log);
    obs.add_watcher(move |v| l.borrow_mut().push(("second", *v)));

    obs.set(7);
    assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
}

#[test]
fn set_with_same_value_still_notifies() {
    let obs = Observable::new(false);
    let hits = Rc::new(RefCell::new(0));
    let h = Rc::clone(&hits);
    obs.add_watcher(move |_| *h.borrow_mut() += 1);

    obs.set(false);
    obs.set(false);
    assert_eq!(*hits.borrow(), 2);
    assert_eq!(obs.version(), 2);
}

#[test]
fn watcher_can_read_the_firing_observable() {
    let obs = Observable::new(vec![1, 2]);
    let seen = Rc::new(RefCell::new(0));
    let reader = obs.clone();
    let s = Rc::clone(&seen);
    obs.add_watcher(move |_| *s.borrow_mut() = reader.with(|v| v.len()));

    obs.set(vec![1, 2, 3]);
    assert_eq!(*seen.borrow(), 3);
}

#[test]
fn clones_share_the_slot() {
    let a = Observable::new(String::from("a"));
    let b = a.clone();
    b.set("b".to_string());
    assert_eq!(a.get(), "b");
    assert_eq!(a.watcher_count(), 0);
}
