// ============================================================================
// dock-signals - Motion Value
// A numeric cell with synchronous, ordered change listeners
// ============================================================================
//
// Unlike a Signal-style source there is no equality check: every set()
// notifies, even when the value is unchanged. Pointer tracking relies on this
// because listeners re-derive layout from the latest event.
//
// Listener mutation during a notification pass follows a snapshot policy:
// - set() clones the listener list before calling anything
// - a listener removed mid-pass is still called in that pass
// - a listener added mid-pass is first called on the next set()
// No borrow is held while listeners run, so reentrant set/on/unsubscribe
// is always allowed.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::core::types::{Listener, MotionEvent};

// =============================================================================
// MOTION VALUE INNER
// =============================================================================

struct MotionValueInner {
    value: Cell<f64>,
    listeners: RefCell<Vec<Listener>>,
}

impl MotionValueInner {
    /// Drop the first entry that is the exact same `Rc` as `listener`.
    fn remove_listener(&self, listener: &Listener) -> bool {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|l| Rc::ptr_eq(l, listener))
                .map(|pos| listeners.remove(pos))
        };
        removed.is_some()
    }
}

// =============================================================================
// MOTION VALUE
// =============================================================================

/// A shared numeric value with change listeners.
///
/// Cloning a `MotionValue` yields another handle to the same cell; every
/// handle sees the same value and the same listeners.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use dock_signals::create_motion_value;
///
/// let x = create_motion_value(0.0);
/// let seen = Rc::new(Cell::new(0.0));
///
/// let sink = seen.clone();
/// let unsubscribe = x.on("change", move |v| sink.set(v));
///
/// x.set(5.0);
/// assert_eq!(x.get(), 5.0);
/// assert_eq!(seen.get(), 5.0);
///
/// unsubscribe.unsubscribe();
/// x.set(9.0);
/// assert_eq!(seen.get(), 5.0);
/// ```
#[derive(Clone)]
pub struct MotionValue {
    inner: Rc<MotionValueInner>,
}

impl MotionValue {
    pub fn new(initial: f64) -> Self {
        Self {
            inner: Rc::new(MotionValueInner {
                value: Cell::new(initial),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        self.inner.value.get()
    }

    /// Store `new_value`, then call every listener with the current value, in
    /// registration order, before returning.
    ///
    /// A listener may call `set` again; the nested call finishes its own
    /// fan-out before the outer loop resumes. Each listener receives the value
    /// held when it is called, so listeners later in the outer pass see the
    /// nested value, and so does `get` afterwards.
    pub fn set(&self, new_value: f64) {
        self.inner.value.set(new_value);

        let snapshot: Vec<Listener> = self.inner.listeners.borrow().clone();
        tracing::trace!(value = new_value, listeners = snapshot.len(), "motion value set");

        for listener in &snapshot {
            listener(self.inner.value.get());
        }
    }

    /// Subscribe `callback` to `event`.
    ///
    /// Only `"change"` is recognized. Any other name registers nothing and
    /// returns an [`Unsubscribe`] that does nothing.
    pub fn on(&self, event: &str, callback: impl Fn(f64) + 'static) -> Unsubscribe {
        self.on_listener(event, Rc::new(callback))
    }

    /// Like [`on`](Self::on), but with a caller-held `Rc`.
    ///
    /// The same `Rc` may be registered several times; each returned
    /// `Unsubscribe` removes the first remaining occurrence of it.
    pub fn on_listener(&self, event: &str, listener: Listener) -> Unsubscribe {
        match MotionEvent::from_name(event) {
            Some(MotionEvent::Change) => self.subscribe_change(listener),
            None => {
                tracing::debug!(event, "ignoring subscription to unrecognized event");
                Unsubscribe::noop()
            }
        }
    }

    /// Subscribe to `"change"`.
    pub fn on_change(&self, callback: impl Fn(f64) + 'static) -> Unsubscribe {
        self.subscribe_change(Rc::new(callback))
    }

    /// Number of registered listeners, duplicates included.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// True if both handles point at the same cell.
    pub fn ptr_eq(&self, other: &MotionValue) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn subscribe_change(&self, listener: Listener) -> Unsubscribe {
        self.inner.listeners.borrow_mut().push(listener.clone());
        tracing::trace!(listeners = self.listener_count(), "change listener added");
        Unsubscribe {
            target: Some((Rc::downgrade(&self.inner), listener)),
        }
    }
}

impl std::fmt::Debug for MotionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionValue")
            .field("value", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Create a motion value holding `initial`.
pub fn create_motion_value(initial: f64) -> MotionValue {
    MotionValue::new(initial)
}

// =============================================================================
// UNSUBSCRIBE
// =============================================================================

/// Removes one listener registration when called.
///
/// Dropping an `Unsubscribe` does not remove anything; the listener stays
/// registered for the life of the motion value. Only a weak reference to
/// the motion value is held, so this never keeps it alive.
pub struct Unsubscribe {
    target: Option<(Weak<MotionValueInner>, Listener)>,
}

impl Unsubscribe {
    fn noop() -> Self {
        Self { target: None }
    }

    /// Remove the first remaining registration of this listener.
    ///
    /// Safe to call more than once, from inside a listener, or after the
    /// motion value is gone.
    pub fn unsubscribe(&self) {
        let Some((weak, listener)) = &self.target else {
            return;
        };
        if let Some(inner) = weak.upgrade() {
            if inner.remove_listener(listener) {
                tracing::trace!("change listener removed");
            }
        }
    }

    /// True for the handle returned by an unrecognized event name.
    pub fn is_noop(&self) -> bool {
        self.target.is_none()
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("noop", &self.is_noop())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl Fn(f64) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn get_returns_initial_value() {
        let x = MotionValue::new(3.5);
        assert_eq!(x.get(), 3.5);
        assert_eq!(x.listener_count(), 0);
    }

    #[test]
    fn set_same_value_still_notifies() {
        let x = create_motion_value(1.0);
        let (log, cb) = recorder();
        let _u = x.on_change(cb);

        x.set(1.0);
        x.set(1.0);
        assert_eq!(*log.borrow(), vec![1.0, 1.0]);
    }

    #[test]
    fn clones_share_state() {
        let a = create_motion_value(0.0);
        let b = a.clone();
        let (log, cb) = recorder();
        let _u = a.on_change(cb);

        b.set(4.0);
        assert_eq!(a.get(), 4.0);
        assert_eq!(*log.borrow(), vec![4.0]);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&create_motion_value(0.0)));
    }

    #[test]
    fn unknown_event_is_noop() {
        let x = create_motion_value(0.0);
        let (log, cb) = recorder();
        let u = x.on("hover", cb);

        assert!(u.is_noop());
        assert_eq!(x.listener_count(), 0);
        x.set(2.0);
        assert!(log.borrow().is_empty());
        u.unsubscribe();
    }

    #[test]
    fn duplicate_registration_removes_one_at_a_time() {
        let x = create_motion_value(0.0);
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let listener: Listener = Rc::new(move |_| c.set(c.get() + 1));

        let first = x.on_listener("change", listener.clone());
        let _second = x.on_listener("change", listener.clone());
        assert_eq!(x.listener_count(), 2);

        x.set(1.0);
        assert_eq!(count.get(), 2);

        first.unsubscribe();
        assert_eq!(x.listener_count(), 1);
        x.set(2.0);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn unsubscribe_twice_only_removes_once() {
        let x = create_motion_value(0.0);
        let listener: Listener = Rc::new(|_| {});
        let u = x.on_listener("change", listener.clone());
        let _keep = x.on_listener("change", listener);

        u.unsubscribe();
        assert_eq!(x.listener_count(), 1);
        // The second call finds the other registration of the same Rc.
        u.unsubscribe();
        assert_eq!(x.listener_count(), 0);
        u.unsubscribe();
        assert_eq!(x.listener_count(), 0);
    }

    #[test]
    fn unsubscribe_after_drop_is_harmless() {
        let x = create_motion_value(0.0);
        let u = x.on_change(|_| {});
        drop(x);
        u.unsubscribe();
    }

    #[test]
    fn self_unsubscribe_during_pass_uses_snapshot() {
        let x = create_motion_value(0.0);
        let (log, cb) = recorder();

        let slot: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));
        let slot_clone = slot.clone();
        let u = x.on_change(move |_| {
            if let Some(u) = slot_clone.borrow().as_ref() {
                u.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(u);
        let _b = x.on_change(cb);

        x.set(1.0);
        assert_eq!(x.listener_count(), 1);
        assert_eq!(*log.borrow(), vec![1.0]);
    }

    #[test]
    fn listener_added_mid_pass_waits_for_next_set() {
        let x = create_motion_value(0.0);
        let (log, cb) = recorder();
        let cb = Rc::new(cb);

        let handle = x.clone();
        let pending = RefCell::new(Some(cb));
        let _adder = x.on_change(move |_| {
            if let Some(cb) = pending.borrow_mut().take() {
                let _ = handle.on_change(move |v| cb(v));
            }
        });

        x.set(1.0);
        assert!(log.borrow().is_empty());
        x.set(2.0);
        assert_eq!(*log.borrow(), vec![2.0]);
    }

    #[test]
    fn later_listeners_see_value_from_nested_set() {
        let x = create_motion_value(0.0);
        let (log, cb) = recorder();

        let _first = x.on_change(cb);
        let handle = x.clone();
        let _resetter = x.on_change(move |v| {
            if v == 1.0 {
                handle.set(3.0);
            }
        });
        let (late, late_cb) = recorder();
        let _last = x.on_change(late_cb);

        x.set(1.0);

        // First ran before the nested set; last ran after it, in both passes.
        assert_eq!(*log.borrow(), vec![1.0, 3.0]);
        assert_eq!(*late.borrow(), vec![3.0, 3.0]);
        assert_eq!(x.get(), 3.0);
    }

    #[test]
    fn debug_shows_value_and_count() {
        let x = create_motion_value(2.0);
        let _u = x.on_change(|_| {});
        assert_eq!(format!("{:?}", x), "MotionValue { value: 2.0, listeners: 1 }");
    }
}
