//! See [`Redirect`] for documentation.

use std::borrow::Cow;

use http::{header::LOCATION, HeaderValue, Response, StatusCode};

use crate::error::RedirectError;

/// A redirect to a path or URL.
///
/// By default, the "303 See Other" status is used when responding.
///
/// # Examples
/// ```
/// use http::StatusCode;
/// use waymark::Redirect;
///
/// let res = Redirect::to("/login").permanent().into_response();
/// assert_eq!(res.status(), StatusCode::PERMANENT_REDIRECT);
/// assert_eq!(res.headers()["location"], "/login");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    to: Cow<'static, str>,
    status_code: StatusCode,
}

impl Redirect {
    /// Construct a new `Redirect` to `to`.
    ///
    /// The target can be a path or URL; it is used verbatim as the redirect location.
    pub fn to(to: impl Into<Cow<'static, str>>) -> Self {
        Self {
            to: to.into(),
            status_code: StatusCode::SEE_OTHER,
        }
    }

    /// Use the "308 Permanent Redirect" status when responding.
    pub fn permanent(self) -> Self {
        self.using_status_code(StatusCode::PERMANENT_REDIRECT)
    }

    /// Use the "307 Temporary Redirect" status when responding.
    pub fn temporary(self) -> Self {
        self.using_status_code(StatusCode::TEMPORARY_REDIRECT)
    }

    /// Use the "303 See Other" status when responding.
    pub fn see_other(self) -> Self {
        self.using_status_code(StatusCode::SEE_OTHER)
    }

    /// Allows the use of custom status codes for less common redirect types.
    pub fn using_status_code(mut self, status: StatusCode) -> Self {
        self.status_code = status;
        self
    }

    /// Uses a numeric status code, which must be in the 3xx range.
    pub fn using_status(self, status: u16) -> Result<Self, RedirectError> {
        match StatusCode::from_u16(status) {
            Ok(code) if code.is_redirection() => Ok(self.using_status_code(code)),
            _ => Err(RedirectError::InvalidStatus { status }),
        }
    }

    /// Returns the redirect target.
    pub fn location(&self) -> &str {
        &self.to
    }

    pub fn status(&self) -> StatusCode {
        self.status_code
    }

    /// Builds a body-less response carrying the status and the `Location` header.
    pub fn into_response(self) -> Response<()> {
        let mut res = Response::new(());
        *res.status_mut() = self.status_code;

        if let Ok(hdr_val) = HeaderValue::try_from(self.to.as_ref()) {
            res.headers_mut().insert(LOCATION, hdr_val);
        } else {
            log::error!(
                "redirect target location can not be converted to header value: {:?}",
                self.to,
            );
        }

        res
    }
}

impl From<Redirect> for Response<()> {
    fn from(redirect: Redirect) -> Self {
        redirect.into_response()
    }
}
