//! Error and Result module

use derive_more::{Display, Error, From};
use http::StatusCode;
use url::ParseError as UrlParseError;

pub use waymark_router::{PatternError, RouteError, UrlGenerationError};

use waymark_router::Method;

/// A convenience [`Result`](std::result::Result) for Waymark operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors which can occur when dispatching a request to a route.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// No registered pattern matches the requested path.
    #[display("no route matches {path}")]
    UrlNotFound {
        #[error(not(source))]
        path: String,
    },

    /// The path matches routes registered under other methods only.
    #[display("method {method} is not allowed for {path}")]
    MethodNotAllowed {
        method: String,
        path: String,
        allowed: Vec<Method>,
    },
}

impl DispatchError {
    /// Returns the status code a transport layer would usually answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::UrlNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Returns the verbs accepted for the path, if the method was the problem.
    pub fn allowed_methods(&self) -> Option<&[Method]> {
        match self {
            DispatchError::MethodNotAllowed { allowed, .. } => Some(allowed),
            DispatchError::UrlNotFound { .. } => None,
        }
    }
}

/// Errors which can occur when building a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum RedirectError {
    /// Status code is not in the 3xx range.
    #[display("{status} is not a redirection status code")]
    InvalidStatus {
        #[error(not(source))]
        status: u16,
    },
}

/// Errors which can occur when loading an [`AppConfig`](crate::AppConfig).
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Configuration is not valid JSON or has the wrong shape.
    #[display("invalid configuration: {_0}")]
    Json(serde_json::Error),

    /// Scheme is neither `http` nor `https`.
    #[display("unsupported scheme {scheme}")]
    UnsupportedScheme {
        #[error(not(source))]
        scheme: String,
    },

    /// Host is empty.
    #[display("host is empty")]
    EmptyHost,
}

/// Umbrella error of the crate.
#[derive(Debug, Display, Error, From)]
#[non_exhaustive]
pub enum Error {
    #[display("{_0}")]
    Route(RouteError),

    #[display("{_0}")]
    UrlGeneration(UrlGenerationError),

    #[display("{_0}")]
    Dispatch(DispatchError),

    #[display("{_0}")]
    Redirect(RedirectError),

    #[display("{_0}")]
    Config(ConfigError),

    #[display("{_0}")]
    UrlParse(UrlParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_error() {
        let err = DispatchError::UrlNotFound {
            path: "/nope".to_owned(),
        };
        assert_eq!(err.to_string(), "no route matches /nope");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.allowed_methods().is_none());

        let err = DispatchError::MethodNotAllowed {
            method: "POST".to_owned(),
            path: "/".to_owned(),
            allowed: vec![Method::Get],
        };
        assert_eq!(err.to_string(), "method POST is not allowed for /");
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.allowed_methods(), Some(&[Method::Get][..]));
    }

    #[test]
    fn umbrella_conversions() {
        let err = Error::from(RouteError::EmptyRoute);
        assert!(matches!(err, Error::Route(RouteError::EmptyRoute)));
        assert_eq!(err.to_string(), "route is empty");

        let err = Error::from(RedirectError::InvalidStatus { status: 200 });
        assert_eq!(err.to_string(), "200 is not a redirection status code");

        let err: Error = UrlGenerationError::RouteNotFound {
            name: "home".to_owned(),
        }
        .into();
        assert_eq!(err.to_string(), "route home not found");
    }
}
