use ahash::AHashMap;
use tracing::warn;

use crate::{
    dispatch::{Dispatcher, MatchResult},
    error::{RouteError, UrlGenerationError},
    route::{Method, Route},
    url_for::{Params, UrlGenerator},
};

/// Ordered registry of routes.
///
/// Routes are kept in registration order, which decides the winner when more than one pattern
/// matches a path. Named routes are additionally indexed by name for reverse generation.
///
/// A table is built during a registration phase and only read afterwards; sharing it between
/// threads while it is still being modified requires external synchronization.
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,

    /// Name -> position in `routes`.
    named: AHashMap<String, usize>,
}

impl<H> RouteTable<H> {
    /// Constructs an empty table.
    pub fn new() -> Self {
        RouteTable {
            routes: Vec::new(),
            named: AHashMap::default(),
        }
    }

    /// Registers a route at the end of the routing list.
    ///
    /// If `name` is already taken, the name now refers to the new route; the previous route
    /// stays in the list and can still win dispatch for paths both patterns match.
    ///
    /// # Errors
    /// See [`Route::new`].
    pub fn register(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<&Route<H>, RouteError> {
        let route = Route::new(method, pattern, handler, name)?;
        Ok(self.push(route))
    }

    /// Same as [`register`](Self::register) with an already validated method.
    pub fn register_method(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<&Route<H>, RouteError> {
        let route = Route::with_method(method, pattern, handler, name)?;
        Ok(self.push(route))
    }

    /// Adds an already constructed route to the end of the routing list.
    pub fn push(&mut self, route: Route<H>) -> &Route<H> {
        let idx = self.routes.len();

        if let Some(name) = route.name() {
            if let Some(prev) = self.named.insert(name.to_owned(), idx) {
                warn!(
                    "route name {:?} re-registered; {} now resolves to {} instead of {}",
                    name,
                    name,
                    route.pattern(),
                    self.routes[prev].pattern(),
                );
            }
        }

        self.routes.push(route);
        &self.routes[idx]
    }

    /// Finds the route currently registered under `name`.
    pub fn find_by_name(&self, name: &str) -> Result<&Route<H>, UrlGenerationError> {
        self.named
            .get(name)
            .map(|&idx| &self.routes[idx])
            .ok_or_else(|| UrlGenerationError::RouteNotFound {
                name: name.to_owned(),
            })
    }

    /// Returns all routes in registration order.
    pub fn all(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route<H>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Removes every route and name.
    pub fn clear(&mut self) {
        self.routes.clear();
        self.named.clear();
    }

    /// Matches `(method, path)` against the table.
    ///
    /// Shortcut for [`Dispatcher::dispatch`].
    pub fn dispatch(&self, method: &str, path: &str) -> MatchResult<'_, H> {
        Dispatcher::new(self).dispatch(method, path)
    }

    /// Builds the path of the route registered as `name`.
    ///
    /// Shortcut for [`UrlGenerator::generate`].
    pub fn url_for(
        &self,
        name: &str,
        params: impl Into<Params>,
    ) -> Result<String, UrlGenerationError> {
        UrlGenerator::new(self).generate(name, params)
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, H> IntoIterator for &'a RouteTable<H> {
    type Item = &'a Route<H>;
    type IntoIter = std::slice::Iter<'a, Route<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
