//! Match results with index and name lookup

use std::ops::Range;

use crate::engine::RawMatch;
use crate::pattern::Pattern;

/// A single match of a [`Pattern`] in a subject text
///
/// Ranges are byte offsets into the subject. Group lookups return `None`
/// when the group did not take part in the match, when the index is out of
/// range, or when a range no longer fits the subject after
/// [`Match::adjusting_ranges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    pattern: Pattern,
    subject: &'t str,
    range: Range<usize>,
    groups: Vec<Option<Range<usize>>>,
}

impl<'t> Match<'t> {
    pub(crate) fn new(pattern: Pattern, subject: &'t str, raw: RawMatch) -> Self {
        Match {
            pattern,
            subject,
            range: raw.range,
            groups: raw.groups,
        }
    }

    /// Range of the whole match
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Matched text
    ///
    /// Empty if the range no longer fits the subject.
    pub fn as_str(&self) -> &'t str {
        self.subject.get(self.range.clone()).unwrap_or_default()
    }

    /// Range of the group with the given index (0 is the whole match)
    pub fn range_at(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    /// Text of the group with the given index
    pub fn value_at(&self, index: usize) -> Option<&'t str> {
        self.range_at(index).and_then(|r| self.subject.get(r))
    }

    /// Range of the named group
    ///
    /// A name used by several groups resolves to the lowest index carrying
    /// it, even when that group did not participate and a later one did.
    pub fn range_named(&self, name: &str) -> Option<Range<usize>> {
        let index = self.pattern.group_names().first(name)?;
        self.range_at(index)
    }

    /// Text of the named group
    pub fn value_named(&self, name: &str) -> Option<&'t str> {
        self.range_named(name).and_then(|r| self.subject.get(r))
    }

    /// Number of ranges, including the whole match
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the match carries no ranges at all
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Unique capture group names of the pattern, sorted
    pub fn capture_group_names(&self) -> Vec<&str> {
        self.pattern.capture_group_names()
    }

    /// Pattern that produced this match
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Full text the match was found in
    pub fn subject(&self) -> &'t str {
        self.subject
    }

    /// Copy of this match with every range moved by exactly `offset`
    ///
    /// Meant for text that was edited in place after matching. Groups that
    /// did not participate stay absent. Returns `None` if a bound would fall
    /// below zero or overflow.
    pub fn adjusting_ranges(&self, offset: isize) -> Option<Match<'t>> {
        let shift = |r: &Range<usize>| {
            Some(r.start.checked_add_signed(offset)?..r.end.checked_add_signed(offset)?)
        };
        let groups = self
            .groups
            .iter()
            .map(|g| match g {
                Some(r) => shift(r).map(Some),
                None => Some(None),
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Match {
            pattern: self.pattern.clone(),
            subject: self.subject,
            range: shift(&self.range)?,
            groups,
        })
    }

    /// Same ranges, read against another text
    pub(crate) fn with_subject<'u>(&self, subject: &'u str) -> Match<'u> {
        Match {
            pattern: self.pattern.clone(),
            subject,
            range: self.range.clone(),
            groups: self.groups.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    #[test]
    fn test_index_lookup() {
        let p = Pattern::new(r"(a)(x)?(b)", Options::empty()).unwrap();
        let m = p.first_match("zab").unwrap().unwrap();
        assert_eq!(m.len(), 4);
        assert_eq!(m.value_at(0), Some("ab"));
        assert_eq!(m.value_at(1), Some("a"));
        assert_eq!(m.range_at(2), None);
        assert_eq!(m.value_at(2), None);
        assert_eq!(m.value_at(3), Some("b"));
        assert_eq!(m.value_at(4), None);
    }

    #[test]
    fn test_name_lookup() {
        let p = Pattern::new(r"(?<key>\w+)=(?<value>\w+)", Options::empty()).unwrap();
        let m = p.first_match("  color=red ").unwrap().unwrap();
        assert_eq!(m.value_named("key"), Some("color"));
        assert_eq!(m.value_named("value"), Some("red"));
        assert_eq!(m.range_named("value"), Some(8..11));
        assert_eq!(m.value_named("missing"), None);
        assert_eq!(m.capture_group_names(), vec!["key", "value"]);
    }

    #[test]
    fn test_named_group_not_participating() {
        let p = Pattern::new(r"(?<x>a)|(b)", Options::empty()).unwrap();
        let m = p.first_match("b").unwrap().unwrap();
        assert_eq!(p.group_names().first("x"), Some(1));
        assert_eq!(m.value_named("x"), None);
        assert_eq!(m.value_at(2), Some("b"));
    }

    #[test]
    fn test_adjusting_ranges() {
        let p = Pattern::new(r"(a)(x)?(b)", Options::empty()).unwrap();
        let m = p.first_match("zzab").unwrap().unwrap();
        let moved = m.adjusting_ranges(-2).unwrap();
        assert_eq!(moved.range(), 0..2);
        assert_eq!(moved.range_at(1), Some(0..1));
        assert_eq!(moved.range_at(2), None);
        assert_eq!(moved.range_at(3), Some(1..2));
        assert_eq!(moved.value_at(1), Some("z"));

        let back = moved.adjusting_ranges(2).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_adjusting_past_end_yields_no_value() {
        let p = Pattern::new("b", Options::empty()).unwrap();
        let m = p.first_match("ab").unwrap().unwrap();
        let moved = m.adjusting_ranges(5).unwrap();
        assert_eq!(moved.range(), 6..7);
        assert_eq!(moved.value_at(0), None);
        assert_eq!(moved.as_str(), "");
    }

    #[test]
    fn test_adjusting_before_start_is_rejected() {
        let p = Pattern::new(r"(a)(x)?", Options::empty()).unwrap();
        let m = p.first_match("za").unwrap().unwrap();
        assert_eq!(m.range(), 1..2);
        assert!(m.adjusting_ranges(-2).is_none());

        let moved = m.adjusting_ranges(-1).unwrap();
        assert_eq!(moved.range(), 0..1);
        assert_eq!(moved.range_at(2), None);
        assert_eq!(moved.adjusting_ranges(1).unwrap(), m);
    }
}
