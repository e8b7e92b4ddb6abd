use std::fmt;

use url::Url;
use waymark_router::{
    append_segments, Match, MatchResult, Method, Params, Path, Route, RouteError, RouteTable,
    UrlGenerationError, UrlGenerator,
};

use crate::{
    config::AppConfig,
    error::{DispatchError, Error},
    redirect::Redirect,
    request::RequestContext,
};

/// A route selected for a request, with the values captured from its path.
pub type MatchedRoute<'a, H> = Match<'a, H>;

/// The composition root of a routed application.
///
/// Owns the route table and configuration. Routes are registered once, then requests are
/// dispatched against them and named routes are turned back into URLs.
///
/// ```
/// use waymark::{App, RequestHead};
///
/// let mut app = App::new();
/// app.get_named("/user/{user}", |user: &str| format!("user {}", user), "user.show")
///     .unwrap();
///
/// let out = app
///     .call(&RequestHead::get("/user/42"), |handler, path| handler(&path[0]))
///     .unwrap();
/// assert_eq!(out, "user 42");
///
/// assert_eq!(app.url_for("user.show", [("user", 7)]).unwrap(), "/user/7");
/// ```
pub struct App<H> {
    table: RouteTable<H>,
    config: AppConfig,
}

impl<H> App<H> {
    /// Create an application with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        App {
            table: RouteTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registers a `GET` route.
    pub fn get(&mut self, pattern: &str, handler: H) -> Result<&Route<H>, RouteError> {
        self.table.register_method(Method::Get, pattern, handler, None)
    }

    /// Registers a named `GET` route.
    pub fn get_named(
        &mut self,
        pattern: &str,
        handler: H,
        name: &str,
    ) -> Result<&Route<H>, RouteError> {
        self.table
            .register_method(Method::Get, pattern, handler, Some(name))
    }

    /// Registers a `POST` route.
    pub fn post(&mut self, pattern: &str, handler: H) -> Result<&Route<H>, RouteError> {
        self.table.register_method(Method::Post, pattern, handler, None)
    }

    /// Registers a named `POST` route.
    pub fn post_named(
        &mut self,
        pattern: &str,
        handler: H,
        name: &str,
    ) -> Result<&Route<H>, RouteError> {
        self.table
            .register_method(Method::Post, pattern, handler, Some(name))
    }

    /// Registers a route under any supported method.
    pub fn route(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> Result<&Route<H>, RouteError> {
        self.table.register(method, pattern, handler, None)
    }

    /// Registers a named route under any supported method.
    pub fn route_named(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
        name: &str,
    ) -> Result<&Route<H>, RouteError> {
        self.table.register(method, pattern, handler, Some(name))
    }

    /// Returns all routes in registration order.
    pub fn routes(&self) -> &[Route<H>] {
        self.table.all()
    }

    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    /// Removes every registered route.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Selects the route for `req`.
    ///
    /// The request path is stripped of its query string and percent-decoded before matching.
    pub fn dispatch<R>(&self, req: &R) -> Result<MatchedRoute<'_, H>, DispatchError>
    where
        R: RequestContext + ?Sized,
    {
        let method = req.method();
        let path = req.path();

        match self.table.dispatch(method, &path) {
            MatchResult::Found(found) => Ok(found),

            MatchResult::NotFound => {
                log::debug!("no route for {} {}", method, path);
                Err(DispatchError::UrlNotFound {
                    path: path.into_owned(),
                })
            }

            MatchResult::MethodNotAllowed(allowed) => {
                log::debug!("{} not allowed for {}; allowed: {:?}", method, path, allowed);
                Err(DispatchError::MethodNotAllowed {
                    method: method.to_owned(),
                    path: path.into_owned(),
                    allowed,
                })
            }
        }
    }

    /// Dispatches `req` and invokes `f` with the selected handler and captured values.
    ///
    /// Whatever `f` returns, including its own errors, is handed back untouched.
    pub fn call<R, F, T>(&self, req: &R, f: F) -> Result<T, DispatchError>
    where
        R: RequestContext + ?Sized,
        F: FnOnce(&H, &Path) -> T,
    {
        let found = self.dispatch(req)?;
        Ok(f(found.handler(), found.path()))
    }

    /// Builds the path of the route registered as `name`.
    pub fn url_for(
        &self,
        name: &str,
        params: impl Into<Params>,
    ) -> Result<String, UrlGenerationError> {
        self.table.url_for(name, params)
    }

    /// Builds an absolute URL for the route registered as `name`, using the configured scheme
    /// and host.
    pub fn absolute_url_for(&self, name: &str, params: impl Into<Params>) -> Result<Url, Error> {
        let path = self.url_for(name, params)?;

        let mut url = Url::parse(&self.config.base_url())?;
        url.set_path(&path);
        Ok(url)
    }

    /// Returns `true` if the path of `req` is exactly the path generated for `name`.
    pub fn current_route_is<R>(
        &self,
        req: &R,
        name: &str,
        params: impl Into<Params>,
    ) -> Result<bool, UrlGenerationError>
    where
        R: RequestContext + ?Sized,
    {
        UrlGenerator::new(&self.table).is_current(name, params, &req.path())
    }

    /// Returns `true` if the path of `req` is exactly `url`.
    ///
    /// The decoded request path is compared as is, with no normalization. An empty `url` is
    /// not rejected; it is compared like any other string, so it only matches an empty path.
    pub fn current_url_is<R>(&self, req: &R, url: &str) -> bool
    where
        R: RequestContext + ?Sized,
    {
        req.path() == url
    }

    /// Redirects to the route registered as `name`.
    ///
    /// Each `extra` pair is appended to the generated path as a `/key/value` segment.
    pub fn redirect_to_route<I, K, V>(
        &self,
        name: &str,
        params: impl Into<Params>,
        extra: I,
    ) -> Result<Redirect, UrlGenerationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        let path = self.url_for(name, params)?;
        Ok(self.redirect_to_url(append_segments(&path, extra)))
    }

    /// Redirects to `url`, verbatim.
    pub fn redirect_to_url(&self, url: impl Into<String>) -> Redirect {
        Redirect::to(url.into()).using_status_code(self.config.redirect_status())
    }
}

impl<H> Default for App<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for App<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("routes", &self.table.all())
            .field("config", &self.config)
            .finish()
    }
}
