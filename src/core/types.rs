// ============================================================================
// dock-signals - Core Types
// Listener callbacks and recognized event names
// ============================================================================

use std::rc::Rc;

use super::constants::CHANGE_EVENT;

/// A change listener.
///
/// Listeners are compared by reference (`Rc::ptr_eq`), so registering the
/// same `Rc` twice creates two entries and each unsubscribe removes one.
pub type Listener = Rc<dyn Fn(f64)>;

/// Event names a motion value responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionEvent {
    /// Fired on every `set`, whether or not the value differs.
    Change,
}

impl MotionEvent {
    /// Parse an event name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            CHANGE_EVENT => Some(MotionEvent::Change),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MotionEvent::Change => CHANGE_EVENT,
        }
    }
}

impl std::fmt::Display for MotionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
