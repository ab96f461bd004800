//! regexlit
//!
//! Regex literals (`/pattern/flags`) on top of an existing regex engine, with
//! capture groups addressable by index or by name.
//!
//! The engine only reports numbered groups. regexlit re-reads the pattern
//! text to work out which number each named group will get, so lookups by
//! name work even for engines without name support.
//!
//! ```
//! use regexlit::Pattern;
//!
//! let pattern = Pattern::parse(r"/(?<show>.+) S(?<season>\d\d)E(?<episode>\d\d)/i").unwrap();
//! let m = pattern.first_match("TV Show s11e02").unwrap().unwrap();
//! assert_eq!(m.value_named("show"), Some("TV Show"));
//! assert_eq!(m.value_named("episode"), Some("02"));
//! assert_eq!(pattern.to_string(), r"/(?<show>.+) S(?<season>\d\d)E(?<episode>\d\d)/i");
//! ```

pub mod engine;
pub mod error;
pub mod ext;
pub mod groups;
pub mod literal;
pub mod matches;
pub mod options;
pub mod pattern;
pub mod replace;

pub use engine::{Engine, FancyEngine, Matcher, RawMatch, default_engine};
pub use error::{EngineError, RegexError, Result};
pub use ext::PatternExt;
pub use groups::{Group, GroupId, GroupNames, GroupTree, Numbering};
pub use literal::{DEFAULT_KNOWN_UNSUPPORTED, LiteralConfig, ParsedLiteral, parse_literal};
pub use matches::Match;
pub use options::{Options, flag_char};
pub use pattern::{MatchingOptions, Pattern, PatternBuilder};
pub use replace::{Template, TemplatePart};
