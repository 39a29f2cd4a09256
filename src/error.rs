//! Errors raised while locating, isolating, or invoking a callable.

use std::path::PathBuf;

/// Crate-wide result type.
pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// A lookup exhausted its candidates, or a node handed to the isolator is not callable.
    #[error("Callable not found")]
    CallableNotFound,

    /// Unsafe invocation found a scope key already defined in the global environment.
    #[error("Scope variable is already exists: {name}")]
    ScopeCollision { name: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid compiler target: {0}")]
    InvalidTarget(String),

    /// A JavaScript exception thrown while compiling or running isolated code.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// An asynchronous callable returned a promise that can never settle.
    #[error("promise did not settle")]
    PromisePending,

    #[error("engine error: {0}")]
    Engine(#[from] rquickjs::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExtractError::CallableNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ExtractError::CallableNotFound;
        assert_eq!(err.to_string(), "Callable not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scope_collision_names_key() {
        let err = ExtractError::ScopeCollision {
            name: "b".to_string(),
        };
        assert!(err.to_string().ends_with(": b"));
        assert!(!err.is_not_found());
    }
}
