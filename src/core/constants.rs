// ============================================================================
// dock-signals - Constants
// Event names and default dock layout parameters
// ============================================================================

// =============================================================================
// EVENT NAMES
// =============================================================================

/// The only event name a motion value recognizes.
pub const CHANGE_EVENT: &str = "change";

// =============================================================================
// DOCK LAYOUT DEFAULTS
// =============================================================================

/// Resting icon edge length, in pixels.
pub const DEFAULT_ICON_SIZE: f64 = 40.0;

/// Icon edge length when the pointer sits directly over the icon centre.
pub const DEFAULT_ICON_MAGNIFICATION: f64 = 60.0;

/// Horizontal distance from an icon centre at which magnification fades out.
pub const DEFAULT_ICON_DISTANCE: f64 = 140.0;

/// Pointer position meaning "not over the dock".
pub const POINTER_OUTSIDE: f64 = f64::INFINITY;

/// Diagnostic name of the dock context key.
pub const DOCK_CONTEXT_NAME: &str = "dock-context";
