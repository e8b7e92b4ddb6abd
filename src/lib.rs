//! Waymark is a small request router with named routes and reverse URL generation.
//!
//! # Examples
//! ```
//! use waymark::{App, RequestHead};
//!
//! let mut app = App::new();
//! app.get_named("/", "home", "home.index").unwrap();
//! app.get_named("/user/{user}/post/{post:\\d+}", "post", "user.post.show")
//!     .unwrap();
//!
//! let found = app.dispatch(&RequestHead::get("/user/ana/post/42?draft=1")).unwrap();
//! assert_eq!(*found.handler(), "post");
//! assert_eq!(found.values(), ["ana", "42"]);
//!
//! let path = app
//!     .url_for("user.post.show", [("user", "ana"), ("post", "7")])
//!     .unwrap();
//! assert_eq!(path, "/user/ana/post/7");
//! ```
//!
//! To get started navigating the API docs, you may consider looking at the following pages first:
//!
//! * [`App`]: owns the route table and configuration; registers routes, dispatches requests,
//!   builds URLs and redirects.
//!
//! * [`RequestContext`]: the method and URI of the request being routed. Implemented for
//!   [`http::Request`] and [`RequestHead`].
//!
//! * [`router`]: the routing core, usable on its own.

#![deny(rust_2018_idioms, nonstandard_style)]

mod app;
mod config;
pub mod error;
mod redirect;
mod request;

pub use waymark_router as router;

pub use self::app::{App, MatchedRoute};
pub use self::config::AppConfig;
pub use self::error::{Error, Result};
pub use self::redirect::Redirect;
pub use self::request::{requested_path, RequestContext, RequestHead};
pub use waymark_router::{Method, Params, Path};
