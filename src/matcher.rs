//! DOS-style wildcard matching on entry names.
//!
//! Only `*` and `?` are special. Matching is anchored at both ends and
//! case-insensitive. `?` keeps the legacy DOS meaning of "zero or one
//! character", so `a?c` matches both `abc` and `ac`.

use regex::{Regex, RegexBuilder};

use crate::error::EnumError;
use crate::traits::Matcher;

/// Compile a search pattern into a [`Matcher`].
///
/// `"*"` returns a matcher that accepts every name without building a regex.
///
/// # Errors
///
/// [`EnumError::InvalidPattern`] for an empty or whitespace-only pattern.
pub fn compile(pattern: &str) -> Result<Box<dyn Matcher>, EnumError> {
    if pattern.trim().is_empty() {
        return Err(EnumError::InvalidPattern(pattern.to_string()));
    }

    if pattern == "*" {
        return Ok(Box::new(AllMatcher));
    }

    Ok(Box::new(WildcardMatcher::new(pattern)?))
}

// ---------------------------------------------------------------------------
// Built-in matchers
// ---------------------------------------------------------------------------

/// Matches every name.
struct AllMatcher;

impl Matcher for AllMatcher {
    fn is_match(&self, _name: &str) -> bool {
        true
    }
}

/// Matches names against a translated wildcard pattern.
struct WildcardMatcher {
    regex: Regex,
}

impl WildcardMatcher {
    fn new(pattern: &str) -> Result<Self, EnumError> {
        let regex = RegexBuilder::new(&translate(pattern))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|_| EnumError::InvalidPattern(pattern.to_string()))?;
        Ok(Self { regex })
    }
}

impl Matcher for WildcardMatcher {
    fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Translate a wildcard pattern into an anchored regex source string.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push_str(".?"),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_everything() {
        let m = compile("*").unwrap();
        assert!(m.is_match(""));
        assert!(m.is_match("anything at all"));
    }

    #[test]
    fn extension_pattern_is_case_insensitive() {
        let m = compile("*.txt").unwrap();
        assert!(m.is_match("a.txt"));
        assert!(m.is_match("REPORT.TXT"));
        assert!(!m.is_match("a.txt.bak"));
        assert!(!m.is_match("txt"));
    }

    #[test]
    fn question_mark_is_zero_or_one() {
        let m = compile("a?c").unwrap();
        assert!(m.is_match("abc"));
        assert!(m.is_match("ac"));
        assert!(!m.is_match("abdc"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let m = compile("file(1)+[x].log").unwrap();
        assert!(m.is_match("file(1)+[x].log"));
        assert!(!m.is_match("file1.log"));
    }

    #[test]
    fn blank_patterns_are_rejected() {
        assert!(matches!(compile(""), Err(EnumError::InvalidPattern(_))));
        assert!(matches!(compile("   "), Err(EnumError::InvalidPattern(_))));
    }

    #[test]
    fn translation_is_anchored() {
        assert_eq!(translate("a*b?.c"), r"^a.*b.?\.c$");
    }
}
