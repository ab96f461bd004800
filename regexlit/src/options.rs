//! Pattern options and their single-character flag encoding
//!
//! Every option has exactly one flag character. The table below is the only
//! place the mapping is defined; encoding walks it in case-insensitive
//! character order so the output is canonical no matter how the options were
//! built.
//!
//! | flag | option |
//! |------|--------|
//! | `B`  | [`Options::USE_UNICODE_WORD_BOUNDARIES`] |
//! | `E`  | [`Options::IGNORE_METACHARACTERS`] |
//! | `i`  | [`Options::CASE_INSENSITIVE`] |
//! | `L`  | [`Options::USE_UNIX_LINE_SEPARATORS`] |
//! | `m`  | [`Options::ANCHORS_MATCH_LINES`] |
//! | `s`  | [`Options::DOT_MATCHES_LINE_SEPARATORS`] |
//! | `W`  | [`Options::ALLOW_COMMENTS_AND_WHITESPACE`] |

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::RegexError;

bitflags! {
    /// Options applied to a pattern when it is compiled
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u32 {
        /// Match letters in the pattern independent of case.
        const CASE_INSENSITIVE = 1 << 0;
        /// Ignore whitespace and #-prefixed comments in the pattern.
        const ALLOW_COMMENTS_AND_WHITESPACE = 1 << 1;
        /// Treat the entire pattern as a literal string.
        const IGNORE_METACHARACTERS = 1 << 2;
        /// Allow `.` to match any character, including line separators.
        const DOT_MATCHES_LINE_SEPARATORS = 1 << 3;
        /// Allow `^` and `$` to match the start and end of lines.
        const ANCHORS_MATCH_LINES = 1 << 4;
        /// Treat only `\n` as a line separator.
        const USE_UNIX_LINE_SEPARATORS = 1 << 5;
        /// Use Unicode TR#29 word boundaries for `\b`.
        const USE_UNICODE_WORD_BOUNDARIES = 1 << 6;
    }
}

/// Flag table, sorted by lowercased flag character
const FLAG_TABLE: [(char, Options); 7] = [
    ('B', Options::USE_UNICODE_WORD_BOUNDARIES),
    ('E', Options::IGNORE_METACHARACTERS),
    ('i', Options::CASE_INSENSITIVE),
    ('L', Options::USE_UNIX_LINE_SEPARATORS),
    ('m', Options::ANCHORS_MATCH_LINES),
    ('s', Options::DOT_MATCHES_LINE_SEPARATORS),
    ('W', Options::ALLOW_COMMENTS_AND_WHITESPACE),
];

/// Get the flag character for a single option
///
/// Returns `None` if `option` is empty or combines several options.
pub fn flag_char(option: Options) -> Option<char> {
    FLAG_TABLE
        .iter()
        .find(|(_, opt)| *opt == option)
        .map(|(c, _)| *c)
}

impl Options {
    /// Option set with every option enabled
    pub const ALL: Options = Options::all();

    /// Decode a single flag character
    ///
    /// Returns `None` for characters outside the flag table.
    pub fn from_flag(flag: char) -> Option<Options> {
        FLAG_TABLE
            .iter()
            .find(|(c, _)| *c == flag)
            .map(|(_, opt)| *opt)
    }

    /// Decode a run of flag characters
    ///
    /// Returns the decoded options together with every character that is not
    /// in the flag table, in the order they were seen.
    pub fn from_flags(flags: &str) -> (Options, String) {
        let mut options = Options::empty();
        let mut unknown = String::new();
        for c in flags.chars() {
            match Options::from_flag(c) {
                Some(opt) => options.insert(opt),
                None => unknown.push(c),
            }
        }
        (options, unknown)
    }

    /// Canonical flag string for this option set
    pub fn flag_string(self) -> String {
        FLAG_TABLE
            .iter()
            .filter(|(_, opt)| self.contains(*opt))
            .map(|(c, _)| *c)
            .collect()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flag_string())
    }
}

impl FromStr for Options {
    type Err = RegexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (options, unknown) = Options::from_flags(s);
        if unknown.is_empty() {
            Ok(options)
        } else {
            Err(RegexError::InvalidOptionFlags(unknown))
        }
    }
}
