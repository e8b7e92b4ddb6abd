//! Reverse generation of paths from named routes.

use std::fmt::Display;

use crate::{error::UrlGenerationError, pattern::Fragment, table::RouteTable};

const AVG_PATH_LEN: usize = 24;

/// Ordered bag of values used to fill placeholders.
///
/// Each entry is either keyed by a placeholder name or positional. When a placeholder is
/// resolved, the entry under its own name is taken if there is one; otherwise the first
/// remaining positional entry is taken. Values are stringified when inserted.
///
/// # Examples
/// ```
/// use waymark_router::Params;
///
/// let mut params = Params::new().with("post", 42).push("first");
/// assert_eq!(params.take("post").as_deref(), Some("42"));
/// assert_eq!(params.take("user").as_deref(), Some("first"));
/// assert_eq!(params.take("user"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(Option<String>, String)>,
}

impl Params {
    pub fn new() -> Self {
        Params {
            entries: Vec::new(),
        }
    }

    /// Constructs a bag of positional values.
    pub fn positional<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        values.into_iter().fold(Params::new(), Params::push)
    }

    /// Adds a value under `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a positional value.
    pub fn push(mut self, value: impl Display) -> Self {
        self.push_value(value);
        self
    }

    /// Adds a value under `key`, replacing any value already stored under it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();

        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.as_deref() == Some(key.as_str()))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((Some(key), value)),
        }
    }

    /// Adds a positional value.
    pub fn push_value(&mut self, value: impl Display) {
        self.entries.push((None, value.to_string()));
    }

    /// Removes and returns the value for placeholder `name`.
    ///
    /// Falls back to the first remaining positional value when nothing is keyed under `name`.
    pub fn take(&mut self, name: &str) -> Option<String> {
        let idx = self
            .entries
            .iter()
            .position(|(key, _)| key.as_deref() == Some(name))
            .or_else(|| self.entries.iter().position(|(key, _)| key.is_none()))?;

        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Display> From<Vec<(K, V)>> for Params {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Params {
    fn from(values: [&str; N]) -> Self {
        Params::positional(values)
    }
}

impl From<Vec<&str>> for Params {
    fn from(values: Vec<&str>) -> Self {
        Params::positional(values)
    }
}

impl From<Vec<String>> for Params {
    fn from(values: Vec<String>) -> Self {
        Params::positional(values)
    }
}

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Params::new()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Builds paths for named routes of a table.
pub struct UrlGenerator<'a, H> {
    table: &'a RouteTable<H>,
}

impl<'a, H> UrlGenerator<'a, H> {
    pub fn new(table: &'a RouteTable<H>) -> Self {
        UrlGenerator { table }
    }

    /// Builds the path of the route registered as `name`, filling placeholders from `params`.
    ///
    /// Literal text is copied verbatim. Each placeholder takes its value as described on
    /// [`Params`] and the value must fully match the placeholder's rule. Values left over once
    /// every placeholder is filled are ignored.
    ///
    /// # Errors
    /// - [`UrlGenerationError::RouteNotFound`] if no route is named `name`.
    /// - [`UrlGenerationError::MissingParameter`] if values run out.
    /// - [`UrlGenerationError::ParameterFormat`] if a value does not match its rule.
    ///
    /// # Examples
    /// ```
    /// use waymark_router::{RouteTable, UrlGenerator};
    ///
    /// let mut table = RouteTable::new();
    /// table
    ///     .register("GET", "/user/{user}/post/{post}", (), Some("user.post.show"))
    ///     .unwrap();
    ///
    /// let generator = UrlGenerator::new(&table);
    /// let path = generator
    ///     .generate("user.post.show", [("user", 1), ("post", 42)])
    ///     .unwrap();
    /// assert_eq!(path, "/user/1/post/42");
    /// ```
    pub fn generate(
        &self,
        name: &str,
        params: impl Into<Params>,
    ) -> Result<String, UrlGenerationError> {
        let route = self.table.find_by_name(name)?;
        let mut params = params.into();
        let mut path = String::with_capacity(AVG_PATH_LEN);

        for fragment in route.fragments() {
            match fragment {
                Fragment::Literal(text) => path.push_str(text),

                Fragment::Placeholder(placeholder) => {
                    let value = params.take(placeholder.name()).ok_or_else(|| {
                        UrlGenerationError::MissingParameter {
                            name: placeholder.name().to_owned(),
                            pattern: route.pattern().to_owned(),
                        }
                    })?;

                    if !placeholder.rule().is_match(&value) {
                        return Err(UrlGenerationError::ParameterFormat {
                            name: placeholder.name().to_owned(),
                            pattern: route.pattern().to_owned(),
                            rule: placeholder.rule().as_str().to_owned(),
                            value,
                        });
                    }

                    path.push_str(&value);
                }
            }
        }

        Ok(path)
    }

    /// Returns `true` if `current_path` is exactly the path generated for `name` and `params`.
    ///
    /// No normalization is applied to either side.
    pub fn is_current(
        &self,
        name: &str,
        params: impl Into<Params>,
        current_path: &str,
    ) -> Result<bool, UrlGenerationError> {
        Ok(self.generate(name, params)? == current_path)
    }
}

/// Appends each `(key, value)` pair to `url` as a `/key/value` path suffix.
///
/// A single trailing `/` on `url` is dropped first, so appending to `/` does not produce `//`.
/// Values are not checked against any rule.
///
/// # Examples
/// ```
/// use waymark_router::append_segments;
///
/// assert_eq!(append_segments("/search", [("page", 2)]), "/search/page/2");
/// assert_eq!(append_segments("/", [("a", "b"), ("c", "d")]), "/a/b/c/d");
/// assert_eq!(append_segments("/home", Vec::<(&str, &str)>::new()), "/home");
/// ```
pub fn append_segments<I, K, V>(url: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut pairs = pairs.into_iter().peekable();

    if pairs.peek().is_none() {
        return url.to_owned();
    }

    let mut out = url.strip_suffix('/').unwrap_or(url).to_owned();

    for (key, value) in pairs {
        out.push('/');
        out.push_str(&key.to_string());
        out.push('/');
        out.push_str(&value.to_string());
    }

    out
}
