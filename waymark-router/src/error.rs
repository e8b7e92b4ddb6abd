//! Error types produced by the routing core.

use derive_more::{Display, Error};

/// A route pattern could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid route pattern \"{pattern}\": {reason}")]
pub struct PatternError {
    /// The pattern that failed to compile.
    pub pattern: String,

    /// What is wrong with it.
    pub reason: String,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Errors which can occur when registering a route.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// HTTP method is not one of the supported verbs.
    #[display("method {method} is not valid")]
    InvalidMethod {
        #[error(not(source))]
        method: String,
    },

    /// Route pattern is empty or only whitespace.
    #[display("route is empty")]
    EmptyRoute,

    /// A route name was supplied but is empty or only whitespace.
    #[display("route name is empty")]
    EmptyRouteName,

    /// Route pattern is malformed.
    #[display("{_0}")]
    InvalidPattern(PatternError),
}

impl From<PatternError> for RouteError {
    fn from(err: PatternError) -> Self {
        Self::InvalidPattern(err)
    }
}

/// Errors which can occur when generating a path for a named route.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum UrlGenerationError {
    /// No route is registered under the given name.
    #[display("route {name} not found")]
    RouteNotFound {
        #[error(not(source))]
        name: String,
    },

    /// No value left to fill a placeholder.
    #[display("missing parameter {name} for route {pattern}")]
    MissingParameter { name: String, pattern: String },

    /// A supplied value does not fully match the placeholder's rule.
    #[display("parameter {name} of route {pattern} must match {rule}, got {value:?}")]
    ParameterFormat {
        name: String,
        pattern: String,
        rule: String,
        value: String,
    },
}
