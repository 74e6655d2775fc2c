// ============================================================================
// dock-signals - Errors
// ============================================================================

use thiserror::Error;

/// Errors surfaced by context lookup and dock configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DockError {
    /// No ancestor published a value for this context key.
    ///
    /// Recoverable: the caller is expected to fall back to static layout.
    #[error("no value published for context `{key}`")]
    AbsentContext { key: &'static str },

    /// A layout parameter failed validation.
    #[error("invalid dock config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl DockError {
    /// True for the absent-context condition.
    pub fn is_absent_context(&self) -> bool {
        matches!(self, DockError::AbsentContext { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_key() {
        let err = DockError::AbsentContext { key: "dock-context" };
        assert_eq!(err.to_string(), "no value published for context `dock-context`");
        assert!(err.is_absent_context());
    }

    #[test]
    fn display_names_the_field() {
        let err = DockError::InvalidConfig {
            field: "iconSize",
            reason: "must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid dock config field `iconSize`: must be positive"
        );
        assert!(!err.is_absent_context());
    }
}
