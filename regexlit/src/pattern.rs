//! Compiled patterns
//!
//! A [`Pattern`] owns the engine's compiled matcher together with the group
//! names recovered from the pattern text. It is immutable, cheap to clone and
//! can be shared between threads.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;

use bitflags::bitflags;
use log::debug;

use crate::engine::{Engine, Matcher, RawMatch, default_engine};
use crate::error::Result;
use crate::groups::{GroupNames, GroupTree, Numbering};
use crate::literal::{LiteralConfig, parse_literal};
use crate::matches::Match;
use crate::options::Options;
use crate::replace::Template;

bitflags! {
    /// Options controlling a single search
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MatchingOptions: u32 {
        /// Only accept matches that start at the search position. When
        /// iterating, each match must begin where the previous one ended.
        const ANCHORED = 1 << 2;
        /// Let lookaround see text outside the search range. Matches are
        /// still reported only if they lie inside it.
        const WITH_TRANSPARENT_BOUNDS = 1 << 3;
        /// Keep `^` and `$` from matching at the edges of the search range
        /// unless those are also edges of the text.
        const WITHOUT_ANCHORING_BOUNDS = 1 << 4;
    }
}

/// A compiled regular expression with named group lookup
#[derive(Clone)]
pub struct Pattern {
    inner: Arc<Inner>,
}

struct Inner {
    pattern: String,
    options: Options,
    parsed_flags: Option<String>,
    groups: GroupTree,
    matcher: Box<dyn Matcher>,
}

/// Builder for patterns with non-default analysis or engine settings
///
/// # Example
/// ```
/// use regexlit::{Numbering, PatternBuilder};
///
/// let pattern = PatternBuilder::new()
///     .numbering(Numbering::Capturing)
///     .parse("/(?:a)(?<b>b)/i")
///     .unwrap();
/// assert_eq!(pattern.group_names().first("b"), Some(1));
/// ```
#[derive(Clone)]
pub struct PatternBuilder {
    literal_config: LiteralConfig,
    numbering: Numbering,
    engine: Arc<dyn Engine>,
}

impl Default for PatternBuilder {
    fn default() -> Self {
        PatternBuilder {
            literal_config: LiteralConfig::default(),
            numbering: Numbering::default(),
            engine: default_engine(),
        }
    }
}

impl PatternBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings used by [`PatternBuilder::parse`]
    pub fn literal_config(mut self, config: LiteralConfig) -> Self {
        self.literal_config = config;
        self
    }

    /// Group numbering policy
    pub fn numbering(mut self, numbering: Numbering) -> Self {
        self.numbering = numbering;
        self
    }

    /// Engine used to compile and search
    pub fn engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = engine;
        self
    }

    /// Compile a pattern body with explicit options
    pub fn build(&self, pattern: &str, options: Options) -> Result<Pattern> {
        self.compile(pattern.to_string(), options, None)
    }

    /// Compile a `/pattern/flags` literal (or a bare pattern)
    pub fn parse(&self, literal: &str) -> Result<Pattern> {
        let parsed = parse_literal(literal, &self.literal_config)?;
        self.compile(parsed.pattern, parsed.options, parsed.parsed_flags)
    }

    fn compile(
        &self,
        pattern: String,
        options: Options,
        parsed_flags: Option<String>,
    ) -> Result<Pattern> {
        let matcher = self.engine.compile(&pattern, options)?;
        let groups = GroupTree::analyze_with(&pattern, self.numbering);
        debug!(
            "compiled {:?} with options {:?}: engine reports {} capture group(s), analyzer found {}",
            pattern,
            options,
            matcher.captures_len().saturating_sub(1),
            groups.len()
        );
        Ok(Pattern {
            inner: Arc::new(Inner {
                pattern,
                options,
                parsed_flags,
                groups,
                matcher,
            }),
        })
    }
}

impl Pattern {
    /// Compile a pattern body with the given options
    pub fn new(pattern: &str, options: Options) -> Result<Self> {
        PatternBuilder::new().build(pattern, options)
    }

    /// Compile a `/pattern/flags` literal with the default [`LiteralConfig`]
    ///
    /// Input that is not delimited by slashes is compiled as a bare pattern.
    pub fn parse(literal: &str) -> Result<Self> {
        PatternBuilder::new().parse(literal)
    }

    /// Compile a literal with a custom [`LiteralConfig`]
    pub fn parse_with(literal: &str, config: &LiteralConfig) -> Result<Self> {
        PatternBuilder::new()
            .literal_config(config.clone())
            .parse(literal)
    }

    /// Create a builder
    pub fn builder() -> PatternBuilder {
        PatternBuilder::new()
    }

    /// The pattern body
    pub fn as_str(&self) -> &str {
        &self.inner.pattern
    }

    /// Options the pattern was compiled with
    pub fn options(&self) -> Options {
        self.inner.options
    }

    /// Flags exactly as they appeared in the literal, if built from one
    pub fn parsed_flags(&self) -> Option<&str> {
        self.inner.parsed_flags.as_deref()
    }

    /// Group structure recovered from the pattern text
    pub fn groups(&self) -> &GroupTree {
        &self.inner.groups
    }

    /// Named groups and their indices
    pub fn group_names(&self) -> &GroupNames {
        self.inner.groups.names()
    }

    /// Unique capture group names, sorted
    pub fn capture_group_names(&self) -> Vec<&str> {
        self.group_names().names()
    }

    /// Number of capture groups as reported by the engine
    pub fn number_of_capture_groups(&self) -> usize {
        self.inner.matcher.captures_len().saturating_sub(1)
    }

    /// Check if the pattern matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.first_match(text)?.is_some())
    }

    /// First match in `text`
    pub fn first_match<'t>(&self, text: &'t str) -> Result<Option<Match<'t>>> {
        self.first_match_in(text, MatchingOptions::empty(), None)
    }

    /// First match inside `range` of `text` (the whole text if `None`)
    ///
    /// # Panics
    /// Panics if `range` is out of bounds or does not fall on char boundaries.
    pub fn first_match_in<'t>(
        &self,
        text: &'t str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Option<Match<'t>>> {
        let mut found = None;
        self.search(text, options, range, |raw| {
            found = Some(raw);
            false
        })?;
        Ok(found.map(|raw| Match::new(self.clone(), text, raw)))
    }

    /// Range of the first match in `text`
    pub fn range_of_first_match(&self, text: &str) -> Result<Option<Range<usize>>> {
        self.range_of_first_match_in(text, MatchingOptions::empty(), None)
    }

    /// Range of the first match inside `range` of `text`
    pub fn range_of_first_match_in(
        &self,
        text: &str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Option<Range<usize>>> {
        let mut found = None;
        self.search(text, options, range, |raw| {
            found = Some(raw.range);
            false
        })?;
        Ok(found)
    }

    /// All non-overlapping matches in `text`
    pub fn matches<'t>(&self, text: &'t str) -> Result<Vec<Match<'t>>> {
        self.matches_in(text, MatchingOptions::empty(), None)
    }

    /// All non-overlapping matches inside `range` of `text`
    pub fn matches_in<'t>(
        &self,
        text: &'t str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<Vec<Match<'t>>> {
        let mut found = Vec::new();
        self.search(text, options, range, |raw| {
            found.push(Match::new(self.clone(), text, raw));
            true
        })?;
        Ok(found)
    }

    /// Number of non-overlapping matches in `text`
    pub fn number_of_matches(&self, text: &str) -> Result<usize> {
        self.number_of_matches_in(text, MatchingOptions::empty(), None)
    }

    /// Number of non-overlapping matches inside `range` of `text`
    pub fn number_of_matches_in(
        &self,
        text: &str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
    ) -> Result<usize> {
        let mut count = 0;
        self.search(text, options, range, |_| {
            count += 1;
            true
        })?;
        Ok(count)
    }

    /// Call `handler` for each match in `text`
    ///
    /// Setting the `&mut bool` argument to `true` stops the enumeration after
    /// the current match.
    pub fn enumerate_matches<'t, F>(&self, text: &'t str, handler: F) -> Result<()>
    where
        F: FnMut(&Match<'t>, &mut bool),
    {
        self.enumerate_matches_in(text, MatchingOptions::empty(), None, handler)
    }

    /// Call `handler` for each match inside `range` of `text`
    pub fn enumerate_matches_in<'t, F>(
        &self,
        text: &'t str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
        mut handler: F,
    ) -> Result<()>
    where
        F: FnMut(&Match<'t>, &mut bool),
    {
        self.search(text, options, range, |raw| {
            let m = Match::new(self.clone(), text, raw);
            let mut stop = false;
            handler(&m, &mut stop);
            !stop
        })
    }

    /// Copy of `text` with every match replaced by the expanded `template`
    ///
    /// See [`Template`] for the template syntax.
    pub fn replace_all(&self, text: &str, template: &str) -> Result<String> {
        self.replace_all_in(text, MatchingOptions::empty(), None, template)
    }

    /// Copy of `text` with every match inside `range` replaced
    pub fn replace_all_in(
        &self,
        text: &str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
        template: &str,
    ) -> Result<String> {
        self.replace(text, options, range, template).map(|(out, _)| out)
    }

    /// Replace every match in `text` in place, returning the number of matches
    pub fn replace_matches(&self, text: &mut String, template: &str) -> Result<usize> {
        self.replace_matches_in(text, MatchingOptions::empty(), None, template)
    }

    /// Replace every match inside `range` of `text` in place
    pub fn replace_matches_in(
        &self,
        text: &mut String,
        options: MatchingOptions,
        range: Option<Range<usize>>,
        template: &str,
    ) -> Result<usize> {
        let (out, count) = self.replace(text, options, range, template)?;
        if count > 0 {
            *text = out;
        }
        Ok(count)
    }

    /// Replaced copy of `text` and the number of matches replaced
    fn replace(
        &self,
        text: &str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
        template: &str,
    ) -> Result<(String, usize)> {
        let template = Template::parse(template, self.number_of_capture_groups());
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut count = 0;
        self.search(text, options, range, |raw| {
            let m = Match::new(self.clone(), text, raw);
            let r = m.range();
            out.push_str(&text[last..r.start]);
            template.expand(&m, &mut out);
            last = r.end;
            count += 1;
            true
        })?;
        out.push_str(&text[last..]);
        Ok((out, count))
    }

    /// Expand `template` for a single match
    ///
    /// Group values are read from `text` after shifting the match's ranges
    /// by `offset`, for callers that edited the text since matching.
    /// Returns `None` if the shift moves a range before the start of the text.
    pub fn replacement_string(
        &self,
        result: &Match<'_>,
        text: &str,
        offset: isize,
        template: &str,
    ) -> Option<String> {
        let template = Template::parse(template, self.number_of_capture_groups());
        let shifted = result.adjusting_ranges(offset)?.with_subject(text);
        let mut out = String::new();
        template.expand(&shifted, &mut out);
        Some(out)
    }

    /// Escape every pattern metacharacter in `text`
    pub fn escaped_pattern(text: &str) -> String {
        regex::escape(text)
    }

    /// Escape every template metacharacter (`$` and `\`) in `text`
    pub fn escaped_template(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c == '$' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    /// Drive the engine over `range` of `text`, handing each raw match to
    /// `visit` until it returns `false`
    ///
    /// An edge of the range is open when either bounds option is set: the
    /// engine then sees the text beyond it, for lookaround and anchors alike.
    /// A match running past an open end is searched again with the text cut
    /// at the end of the range.
    fn search<F>(
        &self,
        text: &str,
        options: MatchingOptions,
        range: Option<Range<usize>>,
        mut visit: F,
    ) -> Result<()>
    where
        F: FnMut(RawMatch) -> bool,
    {
        let bounds = range.unwrap_or(0..text.len());
        let open = options.intersects(
            MatchingOptions::WITH_TRANSPARENT_BOUNDS | MatchingOptions::WITHOUT_ANCHORING_BOUNDS,
        );
        let anchored = options.contains(MatchingOptions::ANCHORED);

        // haystack the engine sees and its offset in `text`
        let (base, end) = if open {
            (0, text.len())
        } else {
            (bounds.start, bounds.end)
        };
        let haystack = &text[base..end];
        let clipped = &text[base..bounds.end];
        let limit = bounds.end - base;
        let mut pos = bounds.start - base;
        let mut last_end: Option<usize> = None;

        while pos <= limit {
            let raw = match self.inner.matcher.captures_from(haystack, pos)? {
                Some(raw) if raw.range.end > limit => {
                    self.inner.matcher.captures_from(clipped, pos)?
                }
                found => found,
            };
            let Some(raw) = raw.filter(|raw| raw.range.end <= limit) else {
                break;
            };
            if raw.range.is_empty() && last_end == Some(raw.range.start) {
                // empty match right after the previous one
                match next_char_boundary(clipped, raw.range.start) {
                    Some(next) => {
                        pos = next;
                        continue;
                    }
                    None => break,
                }
            }
            if anchored && raw.range.start != pos {
                break;
            }
            pos = raw.range.end;
            last_end = Some(raw.range.end);
            if !visit(raw.offset_by(base)) {
                break;
            }
        }
        Ok(())
    }
}

fn next_char_boundary(s: &str, i: usize) -> Option<usize> {
    s[i..].chars().next().map(|c| i + c.len_utf8())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = match &self.inner.parsed_flags {
            Some(flags) => flags.clone(),
            None => self.inner.options.flag_string(),
        };
        if flags.is_empty() {
            f.write_str(&self.inner.pattern)
        } else {
            write!(f, "/{}/{}", self.inner.pattern, flags)
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("pattern", &self.inner.pattern)
            .field("options", &self.inner.options)
            .field("parsed_flags", &self.inner.parsed_flags)
            .field("group_names", self.group_names())
            .finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.inner.pattern == other.inner.pattern
            && self.inner.options == other.inner.options
            && self.inner.parsed_flags == other.inner.parsed_flags
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.pattern.hash(state);
        self.inner.options.hash(state);
        self.inner.parsed_flags.hash(state);
    }
}

impl FromStr for Pattern {
    type Err = crate::error::RegexError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let literal = <String as serde::Deserialize>::deserialize(deserializer)?;
        Pattern::parse(&literal).map_err(serde::de::Error::custom)
    }
}
