//! Route pattern compiler.
//!
//! A pattern is literal text interleaved with placeholders. A placeholder is written `{name}`,
//! which accepts any non-empty run of characters other than `/`, or `{name:regex}`, which
//! accepts values fully matched by `regex`.
//!
//! ```
//! use waymark_router::pattern::{compile, Fragment};
//!
//! let fragments = compile("/user/{user}/post/{post:\\d+}").unwrap();
//! assert_eq!(fragments.len(), 4);
//! assert_eq!(fragments[0], Fragment::literal("/user/"));
//! assert_eq!(fragments[1].placeholder().unwrap().name(), "user");
//! assert_eq!(fragments[3].placeholder().unwrap().rule().as_str(), "\\d+");
//! ```

use std::{fmt, mem};

use crate::{
    error::PatternError,
    regex_impl::{compile_anchored, explicit_groups, Regex},
};

/// Rule used by placeholders that do not declare one.
pub const DEFAULT_RULE: &str = "[^/]+";

/// One piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text that must appear verbatim.
    Literal(String),

    /// A named variable segment.
    Placeholder(Placeholder),
}

impl Fragment {
    /// Constructs a literal fragment.
    pub fn literal(text: impl Into<String>) -> Self {
        Fragment::Literal(text.into())
    }

    /// Returns the placeholder, if this fragment is one.
    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Fragment::Placeholder(placeholder) => Some(placeholder),
            Fragment::Literal(_) => None,
        }
    }

    /// Returns the literal text, if this fragment is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Fragment::Literal(text) => Some(text),
            Fragment::Placeholder(_) => None,
        }
    }
}

/// A named placeholder and the rule its values must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    name: String,
    rule: MatchRule,
}

impl Placeholder {
    /// Constructs a placeholder with the default rule.
    pub fn new(name: impl Into<String>) -> Self {
        Placeholder {
            name: name.into(),
            rule: MatchRule::default(),
        }
    }

    /// Returns the placeholder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rule values must fully match.
    pub fn rule(&self) -> &MatchRule {
        &self.rule
    }
}

/// Matching rule of a placeholder.
///
/// Values are accepted only when the rule matches them entirely.
#[derive(Clone, Default)]
pub struct MatchRule(RuleKind);

#[derive(Clone, Default)]
enum RuleKind {
    /// Any non-empty value without a `/`.
    #[default]
    Default,

    /// A custom regular expression.
    Custom { source: String, regex: Regex },
}

impl MatchRule {
    /// Compiles a custom rule.
    ///
    /// Rules may not declare capturing groups; use `(?:...)` instead.
    pub fn custom(source: &str) -> Result<Self, String> {
        let regex = compile_anchored(source)?;

        if explicit_groups(&regex) > 0 {
            return Err("capturing groups are not allowed in placeholder rules".to_owned());
        }

        Ok(MatchRule(RuleKind::Custom {
            source: source.to_owned(),
            regex,
        }))
    }

    /// Returns `true` if this is the rule used by `{name}` placeholders.
    pub fn is_default(&self) -> bool {
        matches!(self.0, RuleKind::Default)
    }

    /// Returns `true` if the rule matches all of `value`.
    #[inline]
    pub fn is_match(&self, value: &str) -> bool {
        match &self.0 {
            // fast path, same as matching DEFAULT_RULE
            RuleKind::Default => !value.is_empty() && !value.contains('/'),
            RuleKind::Custom { regex, .. } => regex.is_match(value),
        }
    }

    /// Returns the textual form of the rule.
    pub fn as_str(&self) -> &str {
        match &self.0 {
            RuleKind::Default => DEFAULT_RULE,
            RuleKind::Custom { source, .. } => source,
        }
    }
}

impl PartialEq for MatchRule {
    fn eq(&self, other: &Self) -> bool {
        self.is_default() == other.is_default() && self.as_str() == other.as_str()
    }
}

impl Eq for MatchRule {}

impl fmt::Debug for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("MatchRule::Default")
        } else {
            f.debug_tuple("MatchRule::Custom")
                .field(&self.as_str())
                .finish()
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiles `pattern` into its ordered fragments.
///
/// Consecutive literal text is merged into one fragment and no empty literal is ever emitted.
/// Compilation is deterministic, so the result can be cached for the lifetime of a route.
pub fn compile(pattern: &str) -> Result<Vec<Fragment>, PatternError> {
    let mut fragments = Vec::new();
    let mut literal = String::new();
    let mut unprocessed = pattern;

    while let Some(idx) = unprocessed.find(['{', '}']) {
        let (prefix, rem) = unprocessed.split_at(idx);
        literal.push_str(prefix);

        if rem.starts_with('}') {
            return Err(PatternError::new(pattern, "unmatched closing brace"));
        }

        let (placeholder, rem) = parse_placeholder(pattern, rem)?;

        let duplicate = fragments
            .iter()
            .filter_map(Fragment::placeholder)
            .any(|seen| seen.name == placeholder.name);

        if duplicate {
            return Err(PatternError::new(
                pattern,
                format!("placeholder {} is used more than once", placeholder.name),
            ));
        }

        if !literal.is_empty() {
            fragments.push(Fragment::Literal(mem::take(&mut literal)));
        }

        fragments.push(Fragment::Placeholder(placeholder));
        unprocessed = rem;
    }

    literal.push_str(unprocessed);

    if !literal.is_empty() {
        fragments.push(Fragment::Literal(literal));
    }

    Ok(fragments)
}

/// Parses the placeholder at the start of `rem`, returning it along with the text after it.
fn parse_placeholder<'a>(
    pattern: &str,
    rem: &'a str,
) -> Result<(Placeholder, &'a str), PatternError> {
    let mut nesting = 0usize;
    let close_idx = rem
        .find(|c| match c {
            '{' => {
                nesting += 1;
                false
            }
            '}' => {
                nesting -= 1;
                nesting == 0
            }
            _ => false,
        })
        .ok_or_else(|| PatternError::new(pattern, "unclosed placeholder"))?;

    let (param, unprocessed) = rem.split_at(close_idx + 1);

    // remove outer curly brackets
    let param = &param[1..param.len() - 1];

    let (name, rule) = match param.split_once(':') {
        Some((name, rule)) => (name.trim(), Some(rule.trim())),
        None => (param.trim(), None),
    };

    if !is_identifier(name) {
        return Err(PatternError::new(
            pattern,
            format!("invalid placeholder name {:?}", name),
        ));
    }

    let rule = match rule {
        None => MatchRule::default(),
        Some("") => {
            return Err(PatternError::new(
                pattern,
                format!("empty rule for placeholder {}", name),
            ))
        }
        Some(rule) => MatchRule::custom(rule).map_err(|err| {
            PatternError::new(pattern, format!("bad rule for placeholder {}: {}", name, err))
        })?,
    };

    let placeholder = Placeholder {
        name: name.to_owned(),
        rule,
    };

    Ok((placeholder, unprocessed))
}

/// Placeholder names follow `[A-Za-z_][A-Za-z0-9_-]*`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(name: &str, rule: &str) -> Fragment {
        Fragment::Placeholder(Placeholder {
            name: name.to_owned(),
            rule: MatchRule::custom(rule).unwrap(),
        })
    }

    fn var(name: &str) -> Fragment {
        Fragment::Placeholder(Placeholder::new(name))
    }

    #[test]
    fn parse_static() {
        assert_eq!(compile("/").unwrap(), vec![Fragment::literal("/")]);
        assert_eq!(
            compile("/user/profile").unwrap(),
            vec![Fragment::literal("/user/profile")]
        );
        assert!(compile("").unwrap().is_empty());
    }

    #[test]
    fn parse_param() {
        assert_eq!(
            compile("/user/{user}/post/{post}").unwrap(),
            vec![
                Fragment::literal("/user/"),
                var("user"),
                Fragment::literal("/post/"),
                var("post"),
            ]
        );

        assert_eq!(
            compile("/v{version}/resource/{id}").unwrap(),
            vec![
                Fragment::literal("/v"),
                var("version"),
                Fragment::literal("/resource/"),
                var("id"),
            ]
        );

        assert_eq!(
            compile("/file/{file}.{ext}").unwrap(),
            vec![
                Fragment::literal("/file/"),
                var("file"),
                Fragment::literal("."),
                var("ext"),
            ]
        );

        assert_eq!(compile("{a}{b}").unwrap(), vec![var("a"), var("b")]);
    }

    #[test]
    fn parse_custom_rule() {
        assert_eq!(
            compile(r"/{id:[[:digit:]]{6}}").unwrap(),
            vec![Fragment::literal("/"), custom("id", "[[:digit:]]{6}")]
        );

        assert_eq!(
            compile(r"/post/{ id : \d+ }/edit").unwrap(),
            vec![
                Fragment::literal("/post/"),
                custom("id", r"\d+"),
                Fragment::literal("/edit"),
            ]
        );
    }

    #[test]
    fn rules() {
        let rule = MatchRule::default();
        assert!(rule.is_match("42"));
        assert!(!rule.is_match(""));
        assert!(!rule.is_match("/42"));
        assert_eq!(rule.as_str(), DEFAULT_RULE);

        let rule = MatchRule::custom(r"\d+").unwrap();
        assert!(rule.is_match("42"));
        assert!(!rule.is_match("42a"));
        assert!(!rule.is_match("a42"));
        assert_eq!(rule.to_string(), r"\d+");

        assert!(rule.to_string() != DEFAULT_RULE && !rule.is_default());
        assert_ne!(MatchRule::custom(DEFAULT_RULE).unwrap(), MatchRule::default());
    }

    #[test]
    fn compile_is_deterministic() {
        let pattern = r"/a/{b}/c/{d:\w+}";
        assert_eq!(compile(pattern).unwrap(), compile(pattern).unwrap());
    }

    #[test]
    fn malformed_placeholders() {
        let cases = [
            ("/user/{id", "unclosed placeholder"),
            ("/user/id}", "unmatched closing brace"),
            ("/user/{}", "invalid placeholder name"),
            ("/user/{1id}", "invalid placeholder name"),
            ("/user/{na me}", "invalid placeholder name"),
            ("/user/{id:}", "empty rule"),
            ("/user/{id:[a-}", "bad rule"),
            ("/user/{id:(\\d+)}", "capturing groups"),
            ("/{id}/{id}", "used more than once"),
        ];

        for (pattern, reason) in cases {
            let err = compile(pattern).unwrap_err();
            assert_eq!(err.pattern, pattern);
            assert!(
                err.reason.contains(reason),
                "{:?} should fail with {:?}, got {:?}",
                pattern,
                reason,
                err.reason
            );
        }
    }

    #[test]
    fn non_capturing_group_allowed() {
        let fragments = compile("/{lang:(?:en|fr)}").unwrap();
        let rule = fragments[1].placeholder().unwrap().rule();
        assert!(rule.is_match("en"));
        assert!(!rule.is_match("de"));
    }
}
