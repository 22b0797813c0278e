// File: src/error.rs
// Purpose: Error types raised by route construction, lookup and commit

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T, E = RouteError> = std::result::Result<T, E>;

/// A route node was malformed at construction (or attribute overwrite)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no path is provided")]
    EmptyPath,

    #[error("no component provided for route '{path}'")]
    EmptyComponent { path: String },

    #[error("route '{path}' has no attribute '{key}'")]
    UnknownAttribute { path: String, key: String },

    #[error("attribute '{key}' on route '{path}' expects {expected}")]
    InvalidAttributeValue {
        path: String,
        key: String,
        expected: &'static str,
    },

    #[error("route '{path}' is shown in the navigation and requires a name")]
    NavigationWithoutName { path: String },
}

/// Errors produced by [`RouteNode`](crate::RouteNode) and [`RouteTree`](crate::RouteTree)
///
/// All of them are raised synchronously at the point of violation and are
/// not retryable. A failed mutation leaves the tree as it was.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("there is already a child path '{path}' under '{parent}'")]
    DuplicatePath { parent: String, path: String },

    #[error("the route '{parent}' has no child '{path}'")]
    NotFound { parent: String, path: String },

    #[error("routes for '{destination}' are already committed")]
    AlreadyFinalized { destination: String },

    #[error("failed to write routes to '{destination}'")]
    Write {
        destination: String,
        #[source]
        source: std::io::Error,
    },
}

impl RouteError {
    /// True for the configuration errors a caller can fix by changing input
    pub fn is_validation(&self) -> bool {
        matches!(self, RouteError::Validation(_))
    }
}
