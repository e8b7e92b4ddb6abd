//! Abstraction over `regex` and `regex-lite` depending on whether we have `unicode` crate feature
//! enabled.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "unicode")] {
        pub(crate) use regex::Regex;
    } else {
        pub(crate) use regex_lite::Regex;
    }
}

/// Regex flags to allow '.' in regex to match '\n'
///
/// See the docs under: https://docs.rs/regex/1/regex/#grouping-and-flags
const REGEX_FLAGS: &str = "(?s-m)";

/// Compiles `rule` into a regex that only accepts a full match of the input.
///
/// Returns the engine's error message on failure.
pub(crate) fn compile_anchored(rule: &str) -> Result<Regex, String> {
    let re = format!("{}^(?:{})$", REGEX_FLAGS, rule);
    Regex::new(&re).map_err(|err| err.to_string())
}

/// Returns the number of capturing groups declared by `re`, the implicit whole-match group
/// excluded.
pub(crate) fn explicit_groups(re: &Regex) -> usize {
    re.captures_len().saturating_sub(1)
}
