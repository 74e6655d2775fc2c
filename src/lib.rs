// ============================================================================
// dock-signals - Observable motion values and dock context
// ============================================================================
//
// Two pieces:
// - MotionValue: a numeric cell whose listeners run synchronously, in order,
//   on every set()
// - provide/inject: an ancestor publishes a value under a unique ContextKey
//   and descendants look it up without holding a direct reference
//
// The dock module combines them: a Dock publishes its pointer position and
// layout parameters, and DockIcons read them to magnify under the pointer.
// ============================================================================

pub mod config;
pub mod core;
pub mod error;
pub mod primitives;

// Re-export core items at crate root
pub use crate::core::constants;
pub use crate::core::context::{
    context_depth, has_context, inject, provide, provide_scoped, try_inject, ContextGuard,
    ContextKey,
};
pub use crate::core::types::{Listener, MotionEvent};

pub use config::DockConfig;
pub use error::DockError;

// Re-export primitives at crate root
pub use primitives::dock::{
    magnified_size, provide_dock_context, use_dock_context, Dock, DockContext, DockIcon,
    DOCK_CONTEXT_KEY,
};
pub use primitives::motion_value::{create_motion_value, MotionValue, Unsubscribe};

// =============================================================================
// TESTS
// =============================================================================
