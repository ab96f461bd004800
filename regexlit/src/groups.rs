//! Capture group analysis for raw pattern text
//!
//! The engine reports capture groups by number only. This module walks the
//! pattern source itself, numbers every parenthesized group the same way the
//! engine does (depth-first, left to right, the whole pattern being group 0)
//! and records which numbers carry a name.
//!
//! Names are recognized in the `(?<name>...)` and `(?P<name>...)` forms.
//!
//! Known limitations, kept on purpose:
//! - a parenthesis counts as escaped only when the single character before it
//!   is a backslash, so `\\(` is treated as an escaped `(`;
//! - parentheses inside character classes are counted like any other;
//! - with `W` (comments and whitespace) parentheses inside `#` comments are
//!   counted too;
//! - with [`Numbering::Source`], a lookbehind header `(?<=` or `(?<!` is read
//!   as the start of a name running to the next `>`;
//! - unbalanced parentheses are not reported here, the engine rejects them.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

/// Identifier of a group inside a [`GroupTree`]
///
/// Groups are stored in pre-order, so a group's id is also its index.
pub type GroupId = usize;

/// How `?`-prefixed groups that carry no name are numbered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Numbering {
    /// Every parenthesized span receives an index, including `(?:...)`,
    /// lookarounds and inline flag groups.
    #[default]
    Source,
    /// Unnamed `?`-prefixed spans receive no index; the groups nested inside
    /// them are numbered as if the wrapper were not there. This matches the
    /// engine's own numbering for non-capturing constructs.
    Capturing,
}

/// A parenthesized group found in a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Text inside the group's parentheses
    pub pattern: String,
    /// Name of the group, if it uses a recognized naming syntax
    pub name: Option<String>,
    /// Capture index (0 for the whole pattern)
    pub index: usize,
    /// Enclosing group, `None` for the root
    pub parent: Option<GroupId>,
    /// Directly nested groups in source order
    pub children: Vec<GroupId>,
}

/// Map from group name to every index carrying that name, ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupNames {
    map: HashMap<String, Vec<usize>>,
}

impl GroupNames {
    /// Record `index` under `name`
    fn insert(&mut self, name: &str, index: usize) {
        let indices = self.map.entry(name.to_string()).or_default();
        if let Err(pos) = indices.binary_search(&index) {
            indices.insert(pos, index);
        }
    }

    /// All indices for a name
    pub fn get(&self, name: &str) -> Option<&[usize]> {
        self.map.get(name).map(Vec::as_slice)
    }

    /// Lowest index for a name
    pub fn first(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(|indices| indices.first().copied())
    }

    /// Check if a name exists
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Unique names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over `(name, indices)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of unique names
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no group is named
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Group structure of a pattern
///
/// The root (id 0) stands for the whole pattern and is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTree {
    groups: Vec<Group>,
    names: GroupNames,
}

impl GroupTree {
    /// Analyze a pattern with [`Numbering::Source`]
    pub fn analyze(pattern: &str) -> Self {
        Self::analyze_with(pattern, Numbering::Source)
    }

    /// Analyze a pattern with the given numbering policy
    pub fn analyze_with(pattern: &str, numbering: Numbering) -> Self {
        let wrapped = format!("({pattern})");
        let mut analyzer = Analyzer {
            groups: Vec::new(),
            numbering,
        };
        analyzer.visit(&wrapped, None);

        let mut names = GroupNames::default();
        for group in analyzer.groups.iter().skip(1) {
            if let Some(name) = &group.name {
                names.insert(name, group.index);
            }
        }

        debug!(
            "analyzed pattern {:?}: {} group(s), {} name(s)",
            pattern,
            analyzer.groups.len() - 1,
            names.len()
        );

        GroupTree {
            groups: analyzer.groups,
            names,
        }
    }

    /// The implicit whole-pattern group
    pub fn root(&self) -> &Group {
        &self.groups[0]
    }

    /// Get a group by id
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    /// Get a group by capture index
    pub fn group_by_index(&self, index: usize) -> Option<&Group> {
        self.get(index)
    }

    /// Iterate over all groups in pre-order, root first
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Number of groups, not counting the root
    pub fn len(&self) -> usize {
        self.groups.len() - 1
    }

    /// Check if the pattern has no groups besides the root
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Named group map
    pub fn names(&self) -> &GroupNames {
        &self.names
    }

    /// Consume the tree and keep only its name map
    pub fn into_names(self) -> GroupNames {
        self.names
    }

    fn fmt_group(&self, id: GroupId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = &self.groups[id];
        f.write_str("Group(name: ")?;
        match &group.name {
            Some(name) => write!(f, "{name:?}, ")?,
            None => f.write_str("nil, ")?,
        }
        write!(f, "index: {}, pattern: '{}'", group.index, group.pattern)?;
        if !group.children.is_empty() {
            f.write_str(", children: [")?;
            for (i, child) in group.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                self.fmt_group(*child, f)?;
            }
            f.write_str("]")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for GroupTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_group(0, f)
    }
}

struct Analyzer {
    groups: Vec<Group>,
    numbering: Numbering,
}

impl Analyzer {
    /// Visit a parenthesized span, attaching what it finds under `parent`
    fn visit(&mut self, span: &str, parent: Option<GroupId>) {
        let body = strip_parens(span);
        let header = parse_header(body, self.numbering);

        let capturing = match self.numbering {
            Numbering::Source => true,
            Numbering::Capturing => parent.is_none() || !header.prefixed || header.name.is_some(),
        };

        let owner = if capturing {
            let id = self.groups.len();
            trace!("group {} name={:?} pattern={:?}", id, header.name, body);
            self.groups.push(Group {
                pattern: body.to_string(),
                name: header.name,
                index: id,
                parent,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                self.groups[parent].children.push(id);
            }
            Some(id)
        } else {
            trace!("skipping non-capturing span {:?}", body);
            parent
        };

        for child in child_spans(header.rest) {
            self.visit(child, owner);
        }
    }
}

/// Result of looking for a name at the start of a group body
struct Header<'a> {
    name: Option<String>,
    /// Body text left to scan for nested groups
    rest: &'a str,
    /// Whether the body started with `?`
    prefixed: bool,
}

fn strip_parens(span: &str) -> &str {
    span.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(span)
}

fn parse_header(body: &str, numbering: Numbering) -> Header<'_> {
    let Some(mut rest) = body.strip_prefix('?') else {
        return Header {
            name: None,
            rest: body,
            prefixed: false,
        };
    };

    if numbering == Numbering::Capturing
        && let Some(after) = rest.strip_prefix("<=").or_else(|| rest.strip_prefix("<!"))
    {
        // lookbehind
        return Header {
            name: None,
            rest: after,
            prefixed: true,
        };
    }

    if let Some(r) = rest.strip_prefix('P').or_else(|| rest.strip_prefix('\'')) {
        rest = r;
    }

    let mut name = None;
    if let Some(after) = rest.strip_prefix('<')
        && let Some(end) = after.find('>')
    {
        name = Some(after[..end].to_string());
        rest = &after[end + 1..];
    }

    Header {
        name,
        rest,
        prefixed: true,
    }
}

/// Find the top-level parenthesized spans in `text`
fn child_spans(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut depth: isize = 0;
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        let escaped = i > 0 && bytes[i - 1] == b'\\';
        match b {
            b'(' if !escaped => {
                depth += 1;
                if start.is_none() {
                    start = Some(i);
                }
            }
            b')' if !escaped => {
                depth -= 1;
                if depth == 0
                    && let Some(s) = start.take()
                {
                    spans.push(&text[s..=i]);
                }
            }
            _ => {}
        }
    }

    spans
}
