//! Parsing of `/pattern/flags` literals
//!
//! A literal starts with `/`; the last `/` separates the pattern body from
//! its flags. Anything else is taken as a bare pattern with no options.

use log::debug;

use crate::error::{RegexError, Result};
use crate::options::Options;

/// Flags some regex dialects document that have no [`Options`] counterpart
pub const DEFAULT_KNOWN_UNSUPPORTED: [char; 3] = ['g', 'u', 'y'];

/// Settings consulted while parsing a literal
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LiteralConfig {
    /// Accept flags from `known_unsupported` instead of rejecting them.
    /// Accepted flags are kept for display but set no option.
    pub allow_known_unsupported: bool,
    /// Flags that may be accepted when `allow_known_unsupported` is set
    pub known_unsupported: Vec<char>,
}

impl Default for LiteralConfig {
    fn default() -> Self {
        LiteralConfig {
            allow_known_unsupported: false,
            known_unsupported: DEFAULT_KNOWN_UNSUPPORTED.to_vec(),
        }
    }
}

impl LiteralConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether known-unsupported flags are accepted
    pub fn allow_known_unsupported(mut self, allow: bool) -> Self {
        self.allow_known_unsupported = allow;
        self
    }

    /// Replace the set of known-unsupported flags
    pub fn known_unsupported<I>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.known_unsupported = flags.into_iter().collect();
        self
    }

    /// Check if `flag` is accepted without mapping to an option
    pub fn accepts_unsupported(&self, flag: char) -> bool {
        self.allow_known_unsupported && self.known_unsupported.contains(&flag)
    }
}

/// Pieces of a parsed literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLiteral {
    /// Pattern body without delimiters
    pub pattern: String,
    /// Options decoded from the flags
    pub options: Options,
    /// Accepted flag characters in their original order, `None` if no flag
    /// was given
    pub parsed_flags: Option<String>,
}

impl ParsedLiteral {
    fn bare(pattern: &str) -> Self {
        ParsedLiteral {
            pattern: pattern.to_string(),
            options: Options::empty(),
            parsed_flags: None,
        }
    }
}

/// Split a literal into pattern body, options and flag text
///
/// # Errors
/// Returns [`RegexError::InvalidOptionFlags`] carrying every rejected flag
/// character, in order, if any flag is neither in the flag table nor an
/// accepted known-unsupported flag.
///
/// # Example
/// ```
/// use regexlit::{parse_literal, LiteralConfig, Options};
///
/// let lit = parse_literal("/a+b/mi", &LiteralConfig::default()).unwrap();
/// assert_eq!(lit.pattern, "a+b");
/// assert_eq!(lit.options, Options::CASE_INSENSITIVE | Options::ANCHORS_MATCH_LINES);
/// assert_eq!(lit.parsed_flags.as_deref(), Some("mi"));
/// ```
pub fn parse_literal(literal: &str, config: &LiteralConfig) -> Result<ParsedLiteral> {
    let Some(inner) = literal.strip_prefix('/') else {
        return Ok(ParsedLiteral::bare(literal));
    };
    let Some(last_slash) = inner.rfind('/') else {
        return Ok(ParsedLiteral::bare(literal));
    };

    let pattern = &inner[..last_slash];
    let flags = &inner[last_slash + 1..];

    let mut options = Options::empty();
    let mut parsed_flags: Option<String> = None;
    let mut invalid = String::new();

    for flag in flags.chars() {
        if let Some(opt) = Options::from_flag(flag) {
            options.insert(opt);
            parsed_flags.get_or_insert_with(String::new).push(flag);
        } else if config.accepts_unsupported(flag) {
            parsed_flags.get_or_insert_with(String::new).push(flag);
        } else {
            invalid.push(flag);
        }
    }

    if !invalid.is_empty() {
        debug!("rejecting literal {:?}: invalid flags {:?}", literal, invalid);
        return Err(RegexError::InvalidOptionFlags(invalid));
    }

    debug!(
        "parsed literal {:?}: pattern={:?} flags={:?}",
        literal, pattern, parsed_flags
    );

    Ok(ParsedLiteral {
        pattern: pattern.to_string(),
        options,
        parsed_flags,
    })
}
