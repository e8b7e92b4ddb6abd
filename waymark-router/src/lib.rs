//! Route pattern compilation, request dispatch and reverse URL generation.
//!
//! Routes are registered into a [`RouteTable`] as `(method, pattern, handler, name)`. Patterns
//! are literal text mixed with `{name}` or `{name:regex}` placeholders. The table is matched in
//! registration order by a [`Dispatcher`] and named routes are turned back into paths by a
//! [`UrlGenerator`].
//!
//! ```
//! use waymark_router::{MatchResult, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table
//!     .register("GET", "/user/{user}/post/{post:\\d+}", "show", Some("post.show"))
//!     .unwrap();
//!
//! match table.dispatch("GET", "/user/ana/post/42") {
//!     MatchResult::Found(found) => assert_eq!(found.values(), ["ana", "42"]),
//!     _ => unreachable!(),
//! }
//!
//! let path = table.url_for("post.show", [("user", "ana"), ("post", "7")]).unwrap();
//! assert_eq!(path, "/user/ana/post/7");
//! ```

#![deny(rust_2018_idioms, nonstandard_style)]

mod dispatch;
mod error;
mod path;
pub mod pattern;
mod regex_impl;
mod route;
mod table;
mod url_for;

pub use self::dispatch::{Dispatcher, Match, MatchResult};
pub use self::error::{PatternError, RouteError, UrlGenerationError};
pub use self::path::{Path, PathIter};
pub use self::pattern::{Fragment, MatchRule, Placeholder};
pub use self::route::{Method, Route};
pub use self::table::RouteTable;
pub use self::url_for::{append_segments, Params, UrlGenerator};
