use dock_signals::{create_motion_value, MotionValue};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<(&'static str, f64)>>>;

fn tagged(log: &Log, tag: &'static str) -> impl Fn(f64) + 'static {
    let log = log.clone();
    move |v| log.borrow_mut().push((tag, v))
}

#[test]
fn test_two_listeners_then_unsubscribe_first() {
    let x = create_motion_value(0.0);
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let unsubscribe_a = x.on("change", tagged(&log, "A"));
    let _unsubscribe_b = x.on("change", tagged(&log, "B"));

    x.set(5.0);
    assert_eq!(x.get(), 5.0);
    assert_eq!(*log.borrow(), vec![("A", 5.0), ("B", 5.0)]);

    log.borrow_mut().clear();
    unsubscribe_a.unsubscribe();

    x.set(9.0);
    assert_eq!(x.get(), 9.0);
    assert_eq!(*log.borrow(), vec![("B", 9.0)]);
}

#[test]
fn test_nested_set_completes_before_outer_returns() {
    let x = create_motion_value(0.0);
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    // Re-sets once, on the first notification only.
    let handle = x.clone();
    let _first = x.on_change(move |v| {
        if v == 1.0 {
            handle.set(2.0);
        }
    });
    let _second = x.on_change(tagged(&log, "B"));

    x.set(1.0);

    // The nested fan-out ran inside the outer one; when the outer loop
    // reached B the cell already held the nested value.
    assert_eq!(*log.borrow(), vec![("B", 2.0), ("B", 2.0)]);
    assert_eq!(x.get(), 2.0);
}

#[test]
fn test_unrecognized_event_registers_nothing() {
    let x = MotionValue::new(0.0);
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let unsubscribe = x.on("pointermove", tagged(&log, "A"));
    assert!(unsubscribe.is_noop());

    x.set(3.0);
    unsubscribe.unsubscribe();
    x.set(4.0);

    assert!(log.borrow().is_empty());
    assert_eq!(x.get(), 4.0);
}

#[test]
fn test_unsubscribe_leaves_others_in_place() {
    let x = create_motion_value(0.0);
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let _a = x.on_change(tagged(&log, "A"));
    let b = x.on_change(tagged(&log, "B"));
    let _c = x.on_change(tagged(&log, "C"));

    b.unsubscribe();
    x.set(1.0);
    assert_eq!(*log.borrow(), vec![("A", 1.0), ("C", 1.0)]);
}

#[test]
fn test_listener_unsubscribing_another_mid_pass() {
    let x = create_motion_value(0.0);
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let victim: Rc<RefCell<Option<dock_signals::Unsubscribe>>> = Rc::new(RefCell::new(None));
    let v = victim.clone();
    let _killer = x.on_change(move |_| {
        if let Some(u) = v.borrow().as_ref() {
            u.unsubscribe();
        }
    });
    *victim.borrow_mut() = Some(x.on_change(tagged(&log, "victim")));

    // Snapshot: the victim still hears the pass that removed it.
    x.set(1.0);
    assert_eq!(*log.borrow(), vec![("victim", 1.0)]);

    x.set(2.0);
    assert_eq!(*log.borrow(), vec![("victim", 1.0)]);
}
