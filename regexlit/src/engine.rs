//! Regex engine backends
//!
//! regexlit does not match text itself. A backend compiles the pattern body
//! and reports, for a single search, the overall match range plus one
//! optional range per capture group. Iteration, search ranges and name
//! lookups are handled by [`crate::Pattern`] on top of this interface.

use std::ops::Range;
use std::sync::Arc;

use crate::error::{RegexError, Result};
use crate::options::Options;

/// A raw match as reported by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Overall match range (byte offsets)
    pub range: Range<usize>,
    /// Range of each capture group, index-aligned; entry 0 is the whole match.
    /// Groups that did not participate are `None`.
    pub groups: Vec<Option<Range<usize>>>,
}

impl RawMatch {
    /// Build a raw match from index-aligned group ranges
    ///
    /// Returns `None` if group 0 is missing.
    pub fn from_groups(groups: Vec<Option<Range<usize>>>) -> Option<Self> {
        let range = groups.first().cloned().flatten()?;
        Some(RawMatch { range, groups })
    }

    /// Shift every range by a non-negative amount
    pub fn offset_by(mut self, delta: usize) -> Self {
        self.range = self.range.start + delta..self.range.end + delta;
        for r in self.groups.iter_mut().flatten() {
            *r = r.start + delta..r.end + delta;
        }
        self
    }
}

/// A compiled pattern inside a backend
pub trait Matcher: Send + Sync {
    /// Number of capture groups, including the implicit group 0
    fn captures_len(&self) -> usize;

    /// Find the first match in `haystack` starting at or after `start`
    ///
    /// Text before `start` stays visible to lookbehind and anchors.
    fn captures_from(&self, haystack: &str, start: usize) -> Result<Option<RawMatch>>;
}

/// A regex backend able to compile pattern bodies
pub trait Engine: Send + Sync {
    /// Compile `pattern` with `options`
    ///
    /// # Errors
    /// Returns [`RegexError::Compile`] if the backend rejects the pattern.
    fn compile(&self, pattern: &str, options: Options) -> Result<Box<dyn Matcher>>;
}

/// Default engine backed by the `fancy-regex` crate
///
/// Option mapping:
/// - `i`, `s`, `m`, `W` become the inline flags `i`, `s`, `m`, `x`;
/// - `E` compiles an escaped copy of the pattern;
/// - `L` and `B` describe what the backend already does (`\n` is the only
///   line terminator, `\b` is Unicode-aware) and change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FancyEngine;

/// Shared handle to the default engine
pub fn default_engine() -> Arc<dyn Engine> {
    Arc::new(FancyEngine)
}

impl FancyEngine {
    /// Pattern text handed to `fancy-regex` for a pattern body and options
    pub fn translate(pattern: &str, options: Options) -> String {
        let mut inline = String::new();
        if options.contains(Options::CASE_INSENSITIVE) {
            inline.push('i');
        }
        if options.contains(Options::DOT_MATCHES_LINE_SEPARATORS) {
            inline.push('s');
        }
        if options.contains(Options::ANCHORS_MATCH_LINES) {
            inline.push('m');
        }

        let body = if options.contains(Options::IGNORE_METACHARACTERS) {
            regex::escape(pattern)
        } else {
            if options.contains(Options::ALLOW_COMMENTS_AND_WHITESPACE) {
                inline.push('x');
            }
            pattern.to_string()
        };

        if inline.is_empty() {
            body
        } else {
            format!("(?{inline}){body}")
        }
    }
}

impl Engine for FancyEngine {
    fn compile(&self, pattern: &str, options: Options) -> Result<Box<dyn Matcher>> {
        let source = Self::translate(pattern, options);
        let regex = fancy_regex::Regex::new(&source).map_err(RegexError::compile)?;
        Ok(Box::new(FancyMatcher { regex }))
    }
}

struct FancyMatcher {
    regex: fancy_regex::Regex,
}

impl Matcher for FancyMatcher {
    fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    fn captures_from(&self, haystack: &str, start: usize) -> Result<Option<RawMatch>> {
        let caps = self
            .regex
            .captures_from_pos(haystack, start)
            .map_err(RegexError::runtime)?;
        Ok(caps.and_then(|caps| {
            let groups = (0..caps.len())
                .map(|i| caps.get(i).map(|m| m.start()..m.end()))
                .collect();
            RawMatch::from_groups(groups)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_inline_flags() {
        let opts = Options::CASE_INSENSITIVE | Options::ANCHORS_MATCH_LINES;
        assert_eq!(FancyEngine::translate("a.b", opts), "(?im)a.b");
        assert_eq!(FancyEngine::translate("a.b", Options::empty()), "a.b");
    }

    #[test]
    fn test_translate_ignore_metacharacters() {
        let opts = Options::IGNORE_METACHARACTERS | Options::ALLOW_COMMENTS_AND_WHITESPACE;
        assert_eq!(FancyEngine::translate("a.b", opts), r"a\.b");
    }

    #[test]
    fn test_translate_passive_options() {
        let opts = Options::USE_UNIX_LINE_SEPARATORS | Options::USE_UNICODE_WORD_BOUNDARIES;
        assert_eq!(FancyEngine::translate("x", opts), "x");
    }

    #[test]
    fn test_fancy_captures() {
        let matcher = FancyEngine.compile("(a)(x)?(b)", Options::empty()).unwrap();
        assert_eq!(matcher.captures_len(), 4);

        let m = matcher.captures_from("zzab", 0).unwrap().unwrap();
        assert_eq!(m.range, 2..4);
        assert_eq!(m.groups, vec![Some(2..4), Some(2..3), None, Some(3..4)]);
    }

    #[test]
    fn test_fancy_start_position() {
        let matcher = FancyEngine.compile("a", Options::empty()).unwrap();
        let m = matcher.captures_from("aXa", 1).unwrap().unwrap();
        assert_eq!(m.range, 2..3);
        assert!(matcher.captures_from("aXa", 3).unwrap().is_none());
    }

    #[test]
    fn test_fancy_backreference() {
        let matcher = FancyEngine
            .compile(r"(?<q>['])\w+\k<q>", Options::empty())
            .unwrap();
        let m = matcher.captures_from("say 'hi'", 0).unwrap().unwrap();
        assert_eq!(m.range, 4..8);
    }

    #[test]
    fn test_fancy_compile_error() {
        let err = FancyEngine.compile("(a", Options::empty()).err().unwrap();
        assert!(matches!(err, RegexError::Compile(_)));
    }

    #[test]
    fn test_offset_by() {
        let m = RawMatch::from_groups(vec![Some(0..2), None, Some(1..2)]).unwrap();
        let shifted = m.offset_by(5);
        assert_eq!(shifted.range, 5..7);
        assert_eq!(shifted.groups, vec![Some(5..7), None, Some(6..7)]);
    }

    #[test]
    fn test_from_groups_requires_group_zero() {
        assert!(RawMatch::from_groups(vec![None, Some(0..1)]).is_none());
        assert!(RawMatch::from_groups(Vec::new()).is_none());
    }
}
