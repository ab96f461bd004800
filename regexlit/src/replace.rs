//! Replacement template handling
//!
//! Templates may reference capture groups:
//! - `$N` inserts group `N`. Digits are read greedily as long as the number
//!   stays a valid group index; the first digit is always consumed, so `$0`
//!   is the entire match.
//! - `${name}` inserts the named group (the lowest index carrying the name).
//! - `\c` inserts `c` literally, e.g. `\$` or `\\`.
//!
//! A `$` not followed by a digit or `{` is literal text. References to groups
//! that do not exist or did not participate insert nothing.

use std::iter::Peekable;
use std::str::Chars;

use crate::matches::Match;

/// A part of a replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text
    Literal(String),
    /// Group by index (`$1`, `$0` for the entire match)
    Group(usize),
    /// Group by name (`${name}`)
    Named(String),
}

/// A parsed replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Parse a template for a pattern with `captures` capture groups
    pub fn parse(input: &str, captures: usize) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => literal.push(escaped),
                    None => literal.push('\\'),
                },
                '$' => match chars.peek().copied() {
                    Some(d) if d.is_ascii_digit() => {
                        flush(&mut parts, &mut literal);
                        parts.push(TemplatePart::Group(read_index(&mut chars, captures)));
                    }
                    Some('{') => {
                        chars.next();
                        let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                        flush(&mut parts, &mut literal);
                        parts.push(TemplatePart::Named(name));
                    }
                    _ => literal.push('$'),
                },
                _ => literal.push(c),
            }
        }
        flush(&mut parts, &mut literal);

        Template { parts }
    }

    /// Append the expansion of this template for `m` to `dst`
    pub fn expand(&self, m: &Match<'_>, dst: &mut String) {
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => dst.push_str(text),
                TemplatePart::Group(index) => {
                    if let Some(value) = m.value_at(*index) {
                        dst.push_str(value);
                    }
                }
                TemplatePart::Named(name) => {
                    if let Some(value) = m.value_named(name) {
                        dst.push_str(value);
                    }
                }
            }
        }
    }

    /// Get the parts of the template
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }
}

fn flush(parts: &mut Vec<TemplatePart>, literal: &mut String) {
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(std::mem::take(literal)));
    }
}

/// Read a group number, stopping before a digit that would exceed `captures`
fn read_index(chars: &mut Peekable<Chars<'_>>, captures: usize) -> usize {
    let mut index = 0usize;
    let mut first = true;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        let next = index.saturating_mul(10).saturating_add(d as usize);
        if !first && next > captures {
            break;
        }
        index = next;
        first = false;
        chars.next();
    }
    index
}
