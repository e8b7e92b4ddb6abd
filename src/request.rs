//! Access to the method and URI of the request being handled.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// The parts of a request that routing needs.
///
/// The method is expected to be an upper-cased token such as `GET`. The URI is the raw request
/// target, with its query string and percent-encoding still in place.
pub trait RequestContext {
    fn method(&self) -> &str;

    fn uri(&self) -> &str;

    /// Returns the percent-decoded path of the request, without query string.
    fn path(&self) -> Cow<'_, str> {
        requested_path(self.uri())
    }
}

impl<R: RequestContext + ?Sized> RequestContext for &R {
    fn method(&self) -> &str {
        (**self).method()
    }

    fn uri(&self) -> &str {
        (**self).uri()
    }
}

impl<B> RequestContext for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn uri(&self) -> &str {
        http::Request::uri(self)
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    }
}

/// A method and URI pair standing in for a full request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    method: String,
    uri: String,
}

impl RequestHead {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        RequestHead {
            method: method.into(),
            uri: uri.into(),
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new("GET", uri)
    }

    pub fn post(uri: impl Into<String>) -> Self {
        Self::new("POST", uri)
    }
}

impl RequestContext for RequestHead {
    fn method(&self) -> &str {
        &self.method
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}

/// Strips the query string and fragment from `uri` and percent-decodes the rest.
///
/// ```
/// use waymark::requested_path;
///
/// assert_eq!(requested_path("/search/caf%C3%A9?page=2"), "/search/café");
/// ```
pub fn requested_path(uri: &str) -> Cow<'_, str> {
    let path = match uri.find(['?', '#']) {
        Some(idx) => &uri[..idx],
        None => uri,
    };

    percent_decode_str(path).decode_utf8_lossy()
}
