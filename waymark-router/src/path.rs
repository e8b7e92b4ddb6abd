use std::ops::{Index, Range};

/// Variables captured from a matched path.
///
/// Stores the matched path along with the span of each placeholder value, in pattern order.
/// Values can be read by name or by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    /// Full path that was matched.
    path: String,

    /// Captured placeholders; name->span pairs.
    segments: Vec<(String, Range<usize>)>,
}

impl Path {
    pub fn new(path: impl Into<String>) -> Path {
        Path {
            path: path.into(),
            segments: Vec::new(),
        }
    }

    /// Returns full path as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub(crate) fn add(&mut self, name: impl Into<String>, span: Range<usize>) {
        debug_assert!(self.path.get(span.clone()).is_some());
        self.segments.push((name.into(), span));
    }

    /// Check if there are any captured values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns number of captured values.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Get captured value by placeholder name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|(seg_name, _)| seg_name == name)
            .map(|(_, span)| &self.path[span.clone()])
    }

    /// Returns captured values in pattern order.
    pub fn values(&self) -> Vec<&str> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Consumes the path, returning owned captured values in pattern order.
    pub fn into_values(self) -> Vec<String> {
        self.segments
            .iter()
            .map(|(_, span)| self.path[span.clone()].to_owned())
            .collect()
    }

    /// Return iterator to `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> PathIter<'_> {
        PathIter {
            idx: 0,
            params: self,
        }
    }
}

#[derive(Debug)]
pub struct PathIter<'a> {
    idx: usize,
    params: &'a Path,
}

impl<'a> Iterator for PathIter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<(&'a str, &'a str)> {
        let (name, span) = self.params.segments.get(self.idx)?;
        self.idx += 1;
        Some((name, &self.params.path[span.clone()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.params.segments.len() - self.idx;
        (len, Some(len))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = (&'a str, &'a str);
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Index<&'a str> for Path {
    type Output = str;

    fn index(&self, name: &'a str) -> &str {
        self.get(name)
            .expect("Value for parameter is not available")
    }
}

impl Index<usize> for Path {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        &self.path[self.segments[idx].1.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        let mut path = Path::new("/user/42/post/7");
        path.add("user", 6..8);
        path.add("post", 14..15);

        assert_eq!(path.as_str(), "/user/42/post/7");
        assert_eq!(path.segment_count(), 2);
        assert_eq!(path.get("user"), Some("42"));
        assert_eq!(path.get("missing"), None);
        assert_eq!(&path["post"], "7");
        assert_eq!(&path[0], "42");
        assert_eq!(path.values(), ["42", "7"]);
        assert_eq!(
            path.iter().collect::<Vec<_>>(),
            [("user", "42"), ("post", "7")]
        );
        assert_eq!(path.into_values(), ["42", "7"]);
    }

    #[test]
    fn empty() {
        let path = Path::new("/");
        assert!(path.is_empty());
        assert_eq!(path.iter().size_hint(), (0, Some(0)));
    }

    #[test]
    #[should_panic]
    fn index_missing_name() {
        let path = Path::new("/");
        let _ = &path["id"];
    }
}
