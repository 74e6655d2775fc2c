// ============================================================================
// dock-signals - Context Registry
// Thread-local provide/inject keyed by process-wide unique tokens
// ============================================================================
//
// An ancestor element publishes a value under a ContextKey for as long as it
// holds the returned ContextGuard. Descendants created while the guard is
// alive look the key up and receive the same Rc the ancestor published.
//
// Keys are compared by a numeric id drawn from a global counter, never by
// name, so two keys that happen to share a name never collide.
// ============================================================================

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::DockError;

// =============================================================================
// CONTEXT KEY
// =============================================================================

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// A unique lookup token for a context value of type `T`.
///
/// Every call to [`ContextKey::new`] yields a distinct key, even for the same
/// name. Store keys in a `static` (for example behind `LazyLock`) so the whole
/// process shares one token per context slot.
pub struct ContextKey<T: 'static> {
    id: u64,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> ContextKey<T> {
    /// Allocate a fresh key. `name` is only used in diagnostics.
    pub fn new(name: &'static str) -> Self {
        Self {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            name,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static> PartialEq for ContextKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: 'static> Eq for ContextKey<T> {}

impl<T: 'static> std::fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextKey")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

struct ContextFrame {
    frame_id: u64,
    key_id: u64,
    value: Rc<dyn Any>,
}

/// Stack of published values. Later frames shadow earlier ones.
struct ContextRegistry {
    frames: RefCell<Vec<ContextFrame>>,
    next_frame_id: Cell<u64>,
}

impl ContextRegistry {
    fn new() -> Self {
        Self {
            frames: RefCell::new(Vec::new()),
            next_frame_id: Cell::new(1),
        }
    }

    fn push(&self, key_id: u64, value: Rc<dyn Any>) -> u64 {
        let frame_id = self.next_frame_id.get();
        self.next_frame_id.set(frame_id + 1);
        self.frames.borrow_mut().push(ContextFrame {
            frame_id,
            key_id,
            value,
        });
        frame_id
    }

    /// Remove a frame by id. Guards normally drop in LIFO order, but a guard
    /// moved out of its scope may drop later, so search from the top.
    fn remove(&self, frame_id: u64) {
        let removed = {
            let mut frames = self.frames.borrow_mut();
            frames
                .iter()
                .rposition(|f| f.frame_id == frame_id)
                .map(|pos| frames.remove(pos))
        };
        // Value drop may run arbitrary code; keep it outside the borrow.
        drop(removed);
    }

    fn lookup(&self, key_id: u64) -> Option<Rc<dyn Any>> {
        self.frames
            .borrow()
            .iter()
            .rev()
            .find(|f| f.key_id == key_id)
            .map(|f| f.value.clone())
    }

    fn depth(&self) -> usize {
        self.frames.borrow().len()
    }
}

thread_local! {
    static REGISTRY: ContextRegistry = ContextRegistry::new();
}

// =============================================================================
// CONTEXT GUARD
// =============================================================================

/// Keeps a published value visible. Dropping it unpublishes the value.
#[must_use = "the context is unpublished as soon as the guard is dropped"]
pub struct ContextGuard {
    frame_id: u64,
    key_name: &'static str,
    // Frames live in a thread-local, so the guard must stay on its thread.
    _not_send: PhantomData<Rc<()>>,
}

impl ContextGuard {
    pub fn key_name(&self) -> &'static str {
        self.key_name
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        // try_with: the registry may already be gone during thread teardown.
        let _ = REGISTRY.try_with(|r| r.remove(self.frame_id));
        tracing::trace!(key = self.key_name, "context unpublished");
    }
}

impl std::fmt::Debug for ContextGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextGuard")
            .field("frame_id", &self.frame_id)
            .field("key", &self.key_name)
            .finish()
    }
}

// =============================================================================
// PROVIDE / INJECT
// =============================================================================

/// Publish `value` under `key` until the returned guard is dropped.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use dock_signals::{inject, provide, ContextKey};
///
/// let key: ContextKey<u32> = ContextKey::new("answer");
/// let _guard = provide(&key, Rc::new(42));
/// assert_eq!(*inject(&key).unwrap(), 42);
/// ```
pub fn provide<T: 'static>(key: &ContextKey<T>, value: Rc<T>) -> ContextGuard {
    let frame_id = REGISTRY.with(|r| r.push(key.id, value as Rc<dyn Any>));
    tracing::trace!(key = key.name, frame_id, "context published");
    ContextGuard {
        frame_id,
        key_name: key.name,
        _not_send: PhantomData,
    }
}

/// Publish `value` under `key` for the duration of `f`.
pub fn provide_scoped<T: 'static, R>(
    key: &ContextKey<T>,
    value: Rc<T>,
    f: impl FnOnce() -> R,
) -> R {
    let _guard = provide(key, value);
    f()
}

/// Look up the innermost value published under `key`.
///
/// Returns [`DockError::AbsentContext`] when nothing is published; callers
/// are expected to fall back to default behavior.
pub fn inject<T: 'static>(key: &ContextKey<T>) -> Result<Rc<T>, DockError> {
    try_inject(key).ok_or(DockError::AbsentContext { key: key.name })
}

/// Look up the innermost value published under `key`, if any.
pub fn try_inject<T: 'static>(key: &ContextKey<T>) -> Option<Rc<T>> {
    let found = REGISTRY.with(|r| r.lookup(key.id))?;
    // Frames for this key id are only ever pushed by provide::<T>.
    found.downcast::<T>().ok()
}

/// True if a value is currently published under `key`.
pub fn has_context<T: 'static>(key: &ContextKey<T>) -> bool {
    REGISTRY.with(|r| r.lookup(key.id).is_some())
}

/// Number of values currently published on this thread, across all keys.
pub fn context_depth() -> usize {
    REGISTRY.with(|r| r.depth())
}

// =============================================================================
// TESTS
// =============================================================================
