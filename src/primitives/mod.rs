// ============================================================================
// dock-signals - Primitives Module
// Motion values and the dock context built on top of them
// ============================================================================

pub mod dock;
pub mod motion_value;

// Re-export for convenience
pub use dock::{
    magnified_size, provide_dock_context, use_dock_context, Dock, DockContext, DockIcon,
    DOCK_CONTEXT_KEY,
};
pub use motion_value::{create_motion_value, MotionValue, Unsubscribe};
