// ABOUTME: Error types for variable lookup, alias resolution and document configuration
// ABOUTME: Resolution errors describe why a token was dropped; none of them abort a batch

use std::path::PathBuf;
use swatchbook_types::ResolvedType;
use thiserror::Error;

/// Failure reported by a [`crate::VariableStore`] implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read variable snapshot at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid variable snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Variable store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Create a backend error for stores that wrap an external host
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Why a variable could not be turned into a color for a mode
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Variable '{variable_id}' has no value for mode '{mode_id}'")]
    MissingValue { variable_id: String, mode_id: String },

    #[error("Variable '{variable_id}' aliases unknown variable '{target_id}'")]
    BrokenAlias {
        variable_id: String,
        target_id: String,
    },

    #[error("Alias cycle detected at variable '{variable_id}'")]
    CycleDetected { variable_id: String },

    #[error("Variable '{variable_id}' has type {resolved_type}, expected COLOR")]
    WrongType {
        variable_id: String,
        resolved_type: ResolvedType,
    },

    #[error("Variable '{variable_id}' has an unsupported value for mode '{mode_id}'")]
    UnsupportedValue { variable_id: String, mode_id: String },

    #[error("Variable lookup failed: {0}")]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// Short machine-readable reason, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingValue { .. } => "missing_value",
            Self::BrokenAlias { .. } => "broken_alias",
            Self::CycleDetected { .. } => "cycle_detected",
            Self::WrongType { .. } => "wrong_type",
            Self::UnsupportedValue { .. } => "unsupported_value",
            Self::Store(_) => "store",
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingValue { .. } | Self::BrokenAlias { .. })
    }
}

/// Error loading or validating a [`crate::DocumentConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_kinds() {
        let cycle = ResolveError::CycleDetected {
            variable_id: "a".to_string(),
        };
        assert!(cycle.is_cycle());
        assert!(!cycle.is_missing());
        assert_eq!(cycle.kind(), "cycle_detected");

        let broken = ResolveError::BrokenAlias {
            variable_id: "a".to_string(),
            target_id: "b".to_string(),
        };
        assert!(broken.is_missing());
        assert_eq!(
            broken.to_string(),
            "Variable 'a' aliases unknown variable 'b'"
        );
    }

    #[test]
    fn test_store_error_converts() {
        let err: ResolveError = StoreError::backend("host went away").into();
        assert_eq!(err.kind(), "store");
        assert!(err.to_string().contains("host went away"));
    }

    #[test]
    fn test_wrong_type_message() {
        let err = ResolveError::WrongType {
            variable_id: "spacing".to_string(),
            resolved_type: ResolvedType::Float,
        };
        assert_eq!(
            err.to_string(),
            "Variable 'spacing' has type FLOAT, expected COLOR"
        );
    }
}
