// ============================================================================
// dock-signals - Core Module
// Shared types, constants, and the thread-local context registry
// ============================================================================

pub mod constants;
pub mod context;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use context::{
    context_depth, has_context, inject, provide, provide_scoped, try_inject, ContextGuard,
    ContextKey,
};
pub use types::{Listener, MotionEvent};
