//! Matching helpers on `str`

use std::ops::Range;

use crate::error::Result;
use crate::matches::Match;
use crate::options::Options;
use crate::pattern::{MatchingOptions, Pattern};

/// Search methods with the text as receiver
///
/// The `_in` variants take [`MatchingOptions`] and a byte range to search,
/// like [`Pattern::matches_in`]; the others search the whole text.
///
/// # Example
/// ```
/// use regexlit::{Options, PatternExt};
///
/// let text = "TV Show S11E02 Title";
/// let m = text
///     .first_match_source(r"(?<show>.+) S(?<season>\d\d)", Options::empty())
///     .unwrap()
///     .unwrap();
/// assert_eq!(m.value_named("season"), Some("11"));
/// ```
pub trait PatternExt {
    /// Matches of a compiled pattern inside `range`
    fn match_pattern_in(
        &self,
        pattern: &Pattern,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Vec<Match<'_>>>;

    /// First match of a compiled pattern inside `range`
    fn first_match_of_in(
        &self,
        pattern: &Pattern,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Option<Match<'_>>>;

    /// Compile `pattern` with `options` and return its matches inside `range`
    fn match_source_in(
        &self,
        pattern: &str,
        options: Options,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Vec<Match<'_>>>;

    /// Compile `pattern` with `options` and return its first match inside `range`
    fn first_match_source_in(
        &self,
        pattern: &str,
        options: Options,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Option<Match<'_>>>;

    /// All matches of a compiled pattern
    fn match_pattern(&self, pattern: &Pattern) -> Result<Vec<Match<'_>>> {
        self.match_pattern_in(pattern, MatchingOptions::empty(), None)
    }

    /// Compile `pattern` with `options` and return all its matches
    fn match_source(&self, pattern: &str, options: Options) -> Result<Vec<Match<'_>>> {
        self.match_source_in(pattern, options, MatchingOptions::empty(), None)
    }

    /// First match of a compiled pattern
    fn first_match_of(&self, pattern: &Pattern) -> Result<Option<Match<'_>>> {
        self.first_match_of_in(pattern, MatchingOptions::empty(), None)
    }

    /// Compile `pattern` with `options` and return its first match
    fn first_match_source(&self, pattern: &str, options: Options) -> Result<Option<Match<'_>>> {
        self.first_match_source_in(pattern, options, MatchingOptions::empty(), None)
    }
}

impl PatternExt for str {
    fn match_pattern_in(
        &self,
        pattern: &Pattern,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Vec<Match<'_>>> {
        pattern.matches_in(self, matching, range)
    }

    fn first_match_of_in(
        &self,
        pattern: &Pattern,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Option<Match<'_>>> {
        pattern.first_match_in(self, matching, range)
    }

    fn match_source_in(
        &self,
        pattern: &str,
        options: Options,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Vec<Match<'_>>> {
        Pattern::new(pattern, options)?.matches_in(self, matching, range)
    }

    fn first_match_source_in(
        &self,
        pattern: &str,
        options: Options,
        matching: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Option<Match<'_>>> {
        Pattern::new(pattern, options)?.first_match_in(self, matching, range)
    }
}
