use std::ops::Range;

use ahash::AHashSet;
use tracing::trace;

use crate::{
    pattern::{Fragment, Placeholder},
    route::{Method, Route},
    table::RouteTable,
    Path,
};

/// Outcome of matching a `(method, path)` pair against a [`RouteTable`].
///
/// Neither `NotFound` nor `MethodNotAllowed` is a fault; callers decide how to surface them.
#[derive(Debug)]
pub enum MatchResult<'a, H> {
    /// A route with the requested method matched the path.
    Found(Match<'a, H>),

    /// No pattern matched the path.
    NotFound,

    /// Some patterns matched the path but none under the requested method.
    ///
    /// Lists the methods of all matching routes, deduplicated, in order of first registration.
    MethodNotAllowed(Vec<Method>),
}

impl<'a, H> MatchResult<'a, H> {
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchResult::NotFound)
    }

    /// Returns the match, if any.
    pub fn found(self) -> Option<Match<'a, H>> {
        match self {
            MatchResult::Found(found) => Some(found),
            _ => None,
        }
    }

    /// Returns the allowed methods of a `MethodNotAllowed` result.
    pub fn allowed_methods(&self) -> Option<&[Method]> {
        match self {
            MatchResult::MethodNotAllowed(allowed) => Some(allowed),
            _ => None,
        }
    }
}

/// A selected route along with the values captured from the path.
#[derive(Debug)]
pub struct Match<'a, H> {
    route: &'a Route<H>,
    path: Path,
}

impl<'a, H> Match<'a, H> {
    pub fn route(&self) -> &'a Route<H> {
        self.route
    }

    pub fn handler(&self) -> &'a H {
        self.route.handler()
    }

    /// Returns the captured variables.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the captured values in pattern order, ready to be passed positionally.
    pub fn values(&self) -> Vec<&str> {
        self.path.values()
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}

/// Matches requests against the routes of a table.
///
/// The path given to the dispatcher must already be stripped of its query string and
/// percent-decoded.
pub struct Dispatcher<'a, H> {
    table: &'a RouteTable<H>,
}

impl<'a, H> Dispatcher<'a, H> {
    pub fn new(table: &'a RouteTable<H>) -> Self {
        Dispatcher { table }
    }

    /// Selects the first route, in registration order, that matches `path` and is registered
    /// under `method`.
    ///
    /// `method` is compared exactly against the upper-cased method tokens. An unknown method
    /// never selects a route but still yields `MethodNotAllowed` when the path matches.
    ///
    /// # Examples
    /// ```
    /// use waymark_router::{MatchResult, Method, RouteTable};
    ///
    /// let mut table = RouteTable::new();
    /// table.register("GET", "/post/{id}", "show", None).unwrap();
    ///
    /// let found = table.dispatch("GET", "/post/42").found().unwrap();
    /// assert_eq!(*found.handler(), "show");
    /// assert_eq!(found.values(), ["42"]);
    ///
    /// assert!(table.dispatch("GET", "/about").is_not_found());
    ///
    /// let res = table.dispatch("POST", "/post/42");
    /// assert_eq!(res.allowed_methods(), Some(&[Method::Get][..]));
    /// ```
    pub fn dispatch(&self, method: &str, path: &str) -> MatchResult<'a, H> {
        let mut allowed = Vec::new();

        for route in self.table.iter() {
            let spans = match capture(route.fragments(), path) {
                Some(spans) => spans,
                None => continue,
            };

            if route.method().as_str() == method {
                trace!("{} {} matched route {}", method, path, route.pattern());

                let mut captured = Path::new(path);
                for (placeholder, span) in route.placeholders().zip(spans) {
                    captured.add(placeholder.name(), span);
                }

                return MatchResult::Found(Match {
                    route,
                    path: captured,
                });
            }

            if !allowed.contains(&route.method()) {
                allowed.push(route.method());
            }
        }

        if allowed.is_empty() {
            trace!("{} {} matched no route", method, path);
            MatchResult::NotFound
        } else {
            trace!("{} {} not allowed; allowed: {:?}", method, path, allowed);
            MatchResult::MethodNotAllowed(allowed)
        }
    }
}

/// Structurally matches `path` against `fragments`, returning the span of each placeholder.
pub(crate) fn capture(fragments: &[Fragment], path: &str) -> Option<Vec<Range<usize>>> {
    let mut capture = Capture {
        path,
        spans: Vec::new(),
        failed: AHashSet::new(),
    };

    capture.match_from(fragments, 0).then_some(capture.spans)
}

struct Capture<'p> {
    path: &'p str,
    spans: Vec<Range<usize>>,

    /// `(fragments left, offset)` states already known not to match.
    failed: AHashSet<(usize, usize)>,
}

impl Capture<'_> {
    fn match_from(&mut self, fragments: &[Fragment], offset: usize) -> bool {
        let rem = &self.path[offset..];

        match fragments.split_first() {
            None => rem.is_empty(),

            Some((Fragment::Literal(text), tail)) => {
                rem.starts_with(text.as_str()) && self.match_from(tail, offset + text.len())
            }

            Some((Fragment::Placeholder(placeholder), tail)) => {
                let state = (fragments.len(), offset);
                if self.failed.contains(&state) {
                    return false;
                }

                // shortest acceptable value first
                for end in candidate_ends(placeholder, rem, tail.first()) {
                    if !placeholder.rule().is_match(&rem[..end]) {
                        continue;
                    }

                    self.spans.push(offset..offset + end);

                    if self.match_from(tail, offset + end) {
                        return true;
                    }

                    self.spans.pop();
                }

                self.failed.insert(state);
                false
            }
        }
    }
}

/// Positions in `rem`, ascending, where the value of `placeholder` could end.
fn candidate_ends<'p>(
    placeholder: &Placeholder,
    rem: &'p str,
    next: Option<&'p Fragment>,
) -> impl Iterator<Item = usize> + 'p {
    // default-rule values never span a separator
    let limit = if placeholder.rule().is_default() {
        rem.find('/').unwrap_or(rem.len())
    } else {
        rem.len()
    };

    let (start, stop) = match next {
        // last fragment; value runs to the end of the path
        None => (rem.len(), rem.len()),
        Some(_) => (0, limit),
    };

    (start..=stop).filter(move |&end| {
        rem.is_char_boundary(end)
            && match next {
                Some(Fragment::Literal(text)) => rem[end..].starts_with(text.as_str()),
                _ => true,
            }
    })
}
