// ============================================================================
// dock-signals - Dock Configuration
// Static layout parameters shared through the dock context
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFAULT_ICON_DISTANCE, DEFAULT_ICON_MAGNIFICATION, DEFAULT_ICON_SIZE,
};
use crate::error::DockError;

/// Layout parameters for a dock and its icons.
///
/// Field names use camelCase on the wire; missing fields take their
/// defaults, so `{}` is a valid config.
///
/// ```
/// use dock_signals::DockConfig;
///
/// let config = DockConfig::default()
///     .with_icon_size(32.0)
///     .with_icon_magnification(48.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DockConfig {
    pub icon_size: f64,
    pub icon_magnification: f64,
    pub disable_magnification: bool,
    pub icon_distance: f64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            icon_size: DEFAULT_ICON_SIZE,
            icon_magnification: DEFAULT_ICON_MAGNIFICATION,
            disable_magnification: false,
            icon_distance: DEFAULT_ICON_DISTANCE,
        }
    }
}

impl DockConfig {
    pub fn with_icon_size(mut self, size: f64) -> Self {
        self.icon_size = size;
        self
    }

    pub fn with_icon_magnification(mut self, magnification: f64) -> Self {
        self.icon_magnification = magnification;
        self
    }

    pub fn with_icon_distance(mut self, distance: f64) -> Self {
        self.icon_distance = distance;
        self
    }

    pub fn with_magnification_disabled(mut self, disabled: bool) -> Self {
        self.disable_magnification = disabled;
        self
    }

    /// Check that sizes and distance are finite and positive, and that the
    /// magnified size is not smaller than the resting size.
    pub fn validate(&self) -> Result<(), DockError> {
        positive("iconSize", self.icon_size)?;
        positive("iconMagnification", self.icon_magnification)?;
        positive("iconDistance", self.icon_distance)?;
        if self.icon_magnification < self.icon_size {
            return Err(DockError::InvalidConfig {
                field: "iconMagnification",
                reason: format!(
                    "{} is smaller than iconSize {}",
                    self.icon_magnification, self.icon_size
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), DockError> {
    if !value.is_finite() {
        return Err(DockError::InvalidConfig {
            field,
            reason: format!("{value} is not finite"),
        });
    }
    if value <= 0.0 {
        return Err(DockError::InvalidConfig {
            field,
            reason: format!("{value} must be positive"),
        });
    }
    Ok(())
}
