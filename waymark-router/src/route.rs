use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::RouteError,
    pattern::{self, Fragment, Placeholder},
};

/// HTTP methods a route can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    /// All supported methods.
    pub const ALLOWED: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
    ];

    /// Returns the upper-cased method token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    /// Returns `true` if `method` names a supported method, ignoring case and surrounding
    /// whitespace.
    pub fn is_valid(method: &str) -> bool {
        method.parse::<Method>().is_ok()
    }
}

impl FromStr for Method {
    type Err = RouteError;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        let token = method.trim();

        Method::ALLOWED
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| RouteError::InvalidMethod {
                method: method.to_owned(),
            })
    }
}

impl TryFrom<&str> for Method {
    type Error = RouteError;

    fn try_from(method: &str) -> Result<Self, Self::Error> {
        method.parse()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MethodVisitor;

        impl de::Visitor<'_> for MethodVisitor {
            type Value = Method;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an HTTP method name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Method, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(MethodVisitor)
    }
}

#[cfg(feature = "http")]
mod http_impls {
    use super::Method;
    use crate::error::RouteError;

    impl TryFrom<&http::Method> for Method {
        type Error = RouteError;

        fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
            method.as_str().parse()
        }
    }

    impl From<Method> for http::Method {
        fn from(method: Method) -> Self {
            match method {
                Method::Get => http::Method::GET,
                Method::Post => http::Method::POST,
                Method::Put => http::Method::PUT,
                Method::Patch => http::Method::PATCH,
                Method::Delete => http::Method::DELETE,
                Method::Head => http::Method::HEAD,
                Method::Options => http::Method::OPTIONS,
            }
        }
    }
}

/// One registered endpoint: method, pattern, compiled fragments, handler and optional name.
#[derive(Clone)]
pub struct Route<H> {
    method: Method,
    pattern: String,
    fragments: Vec<Fragment>,
    handler: H,
    name: Option<String>,
}

impl<H> Route<H> {
    /// Validates inputs and compiles the pattern.
    ///
    /// # Errors
    /// - [`RouteError::InvalidMethod`] if `method` is not a supported verb.
    /// - [`RouteError::EmptyRoute`] if `pattern` is empty after trimming whitespace.
    /// - [`RouteError::EmptyRouteName`] if `name` is given but empty after trimming whitespace.
    /// - [`RouteError::InvalidPattern`] if `pattern` is malformed.
    pub fn new(
        method: &str,
        pattern: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<Self, RouteError> {
        let method = method.parse::<Method>()?;
        Self::with_method(method, pattern, handler, name)
    }

    /// Same as [`new`](Self::new) with an already validated method.
    pub fn with_method(
        method: Method,
        pattern: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<Self, RouteError> {
        if pattern.trim().is_empty() {
            return Err(RouteError::EmptyRoute);
        }

        let name = match name.map(str::trim) {
            Some("") => return Err(RouteError::EmptyRouteName),
            Some(name) => Some(name.to_owned()),
            None => None,
        };

        let fragments = pattern::compile(pattern)?;

        Ok(Route {
            method,
            pattern: pattern.to_owned(),
            fragments,
            handler,
            name,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the pattern string the route was registered with.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Returns the placeholders of the pattern, left to right.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.fragments.iter().filter_map(Fragment::placeholder)
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
