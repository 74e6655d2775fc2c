// ============================================================================
// dock-signals - Dock Context
//
// The ancestor Dock publishes one DockContext; DockIcon descendants pick it
// up at mount time and resize themselves as the pointer moves.
// ============================================================================
//
// Flow:
// - Dock::new builds a DockContext around a fresh mouse_x motion value
// - Dock::render publishes it under DOCK_CONTEXT_KEY while children mount
// - DockIcon::mount injects it and subscribes to mouse_x
// - Dock::pointer_move / pointer_leave drive mouse_x, icons follow
//
// An icon mounted outside any Dock gets DockError::AbsentContext from the
// lookup and settles on the static default size.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use std::sync::LazyLock;

use crate::config::DockConfig;
use crate::core::constants::{DEFAULT_ICON_SIZE, DOCK_CONTEXT_NAME, POINTER_OUTSIDE};
use crate::core::context::{inject, provide, provide_scoped, ContextGuard, ContextKey};
use crate::error::DockError;
use crate::primitives::motion_value::{MotionValue, Unsubscribe};

// =============================================================================
// DOCK CONTEXT
// =============================================================================

/// The process-wide token under which a dock publishes its context.
pub static DOCK_CONTEXT_KEY: LazyLock<ContextKey<DockContext>> =
    LazyLock::new(|| ContextKey::new(DOCK_CONTEXT_NAME));

/// What a dock shares with its icons: the pointer position plus static
/// layout parameters. Fixed once built; only `mouse_x`'s contents change.
pub struct DockContext {
    mouse_x: MotionValue,
    config: DockConfig,
}

impl DockContext {
    /// Build a context with the pointer outside the dock.
    pub fn new(config: DockConfig) -> Result<Self, DockError> {
        Self::with_mouse_x(MotionValue::new(POINTER_OUTSIDE), config)
    }

    /// Build a context around an existing pointer value.
    ///
    /// Fails with [`DockError::InvalidConfig`] if `config` does not validate.
    pub fn with_mouse_x(mouse_x: MotionValue, config: DockConfig) -> Result<Self, DockError> {
        config.validate()?;
        Ok(Self { mouse_x, config })
    }

    pub fn mouse_x(&self) -> &MotionValue {
        &self.mouse_x
    }

    pub fn icon_size(&self) -> f64 {
        self.config.icon_size
    }

    pub fn icon_magnification(&self) -> f64 {
        self.config.icon_magnification
    }

    pub fn disable_magnification(&self) -> bool {
        self.config.disable_magnification
    }

    pub fn icon_distance(&self) -> f64 {
        self.config.icon_distance
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    /// Size of an icon centred at `center_x` for the current pointer.
    pub fn icon_size_at(&self, center_x: f64) -> f64 {
        magnified_size(&self.config, self.mouse_x.get(), center_x)
    }
}

impl std::fmt::Debug for DockContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockContext")
            .field("mouse_x", &self.mouse_x.get())
            .field("config", &self.config)
            .finish()
    }
}

/// Icon size for a pointer at `mouse_x` and an icon centred at `center_x`.
///
/// Linear falloff from `icon_magnification` at distance 0 to `icon_size` at
/// `icon_distance`; beyond that, or with magnification disabled, the resting
/// size. A non-finite pointer means "outside the dock".
pub fn magnified_size(config: &DockConfig, mouse_x: f64, center_x: f64) -> f64 {
    if config.disable_magnification {
        return config.icon_size;
    }
    let distance = (mouse_x - center_x).abs();
    if !distance.is_finite() || distance >= config.icon_distance {
        return config.icon_size;
    }
    let t = distance / config.icon_distance;
    let size = config.icon_magnification - (config.icon_magnification - config.icon_size) * t;
    // Rounding may step just outside the endpoints.
    size.max(config.icon_size).min(config.icon_magnification)
}

/// Publish `context` under [`DOCK_CONTEXT_KEY`] until the guard drops.
pub fn provide_dock_context(context: Rc<DockContext>) -> ContextGuard {
    provide(&*DOCK_CONTEXT_KEY, context)
}

/// Look up the nearest published dock context.
pub fn use_dock_context() -> Result<Rc<DockContext>, DockError> {
    inject(&*DOCK_CONTEXT_KEY)
}

// =============================================================================
// DOCK (ancestor)
// =============================================================================

/// The ancestor element. Owns the context its icons read.
#[derive(Debug)]
pub struct Dock {
    context: Rc<DockContext>,
}

impl Dock {
    pub fn new(config: DockConfig) -> Result<Self, DockError> {
        let context = DockContext::new(config)?;
        Ok(Self {
            context: Rc::new(context),
        })
    }

    pub fn context(&self) -> &Rc<DockContext> {
        &self.context
    }

    /// Run `children` with this dock's context published.
    pub fn render<R>(&self, children: impl FnOnce() -> R) -> R {
        provide_scoped(&*DOCK_CONTEXT_KEY, self.context.clone(), children)
    }

    /// Publish this dock's context until the guard drops.
    pub fn publish(&self) -> ContextGuard {
        provide_dock_context(self.context.clone())
    }

    pub fn pointer_move(&self, x: f64) {
        self.context.mouse_x.set(x);
    }

    pub fn pointer_leave(&self) {
        self.context.mouse_x.set(POINTER_OUTSIDE);
    }
}

// =============================================================================
// DOCK ICON (descendant)
// =============================================================================

/// A descendant icon that tracks its dock's pointer.
pub struct DockIcon {
    center_x: Rc<Cell<f64>>,
    size: Rc<Cell<f64>>,
    context: Option<Rc<DockContext>>,
    subscription: Option<Unsubscribe>,
}

impl DockIcon {
    /// Mount an icon centred at `center_x`.
    ///
    /// Inside a [`Dock::render`] the icon follows the dock's pointer.
    /// Elsewhere it stays at the default resting size.
    pub fn mount(center_x: f64) -> Self {
        let center = Rc::new(Cell::new(center_x));
        match use_dock_context() {
            Ok(context) => {
                let size = Rc::new(Cell::new(context.icon_size_at(center_x)));
                let config = *context.config();
                let subscription = {
                    let size = size.clone();
                    let center = center.clone();
                    context
                        .mouse_x()
                        .on_change(move |x| size.set(magnified_size(&config, x, center.get())))
                };
                Self {
                    center_x: center,
                    size,
                    context: Some(context),
                    subscription: Some(subscription),
                }
            }
            Err(err) => {
                tracing::debug!(%err, "dock icon mounted without a dock; using static size");
                Self {
                    center_x: center,
                    size: Rc::new(Cell::new(DEFAULT_ICON_SIZE)),
                    context: None,
                    subscription: None,
                }
            }
        }
    }

    pub fn size(&self) -> f64 {
        self.size.get()
    }

    pub fn center_x(&self) -> f64 {
        self.center_x.get()
    }

    /// Move the icon, e.g. after a layout pass, and resize for the new spot.
    pub fn set_center_x(&self, center_x: f64) {
        self.center_x.set(center_x);
        if let Some(context) = &self.context {
            self.size.set(context.icon_size_at(center_x));
        }
    }

    /// True if a dock context was found at mount time.
    pub fn is_attached(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&Rc<DockContext>> {
        self.context.as_ref()
    }
}

impl Drop for DockIcon {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl std::fmt::Debug for DockIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockIcon")
            .field("center_x", &self.center_x.get())
            .field("size", &self.size.get())
            .field("attached", &self.is_attached())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
