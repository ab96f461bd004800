//! Compatibility test suite
//!
//! Checks that the group numbers recovered from pattern text agree with the
//! numbering the `fancy-regex` engine uses for the same pattern.

use regexlit::{Numbering, Options, Pattern, PatternBuilder, PatternExt};

/// Compare our name lookups against the engine's own
fn assert_names_agree(pattern: &str, input: &str) {
    let ours = Pattern::new(pattern, Options::empty()).unwrap();
    let theirs = fancy_regex::Regex::new(pattern).unwrap();

    assert_eq!(
        ours.number_of_capture_groups(),
        ours.groups().len(),
        "group count differs for {pattern}"
    );

    let m = ours.first_match(input).unwrap().unwrap();
    let caps = theirs.captures(input).unwrap().unwrap();
    for i in 0..caps.len() {
        assert_eq!(
            m.value_at(i),
            caps.get(i).map(|g| g.as_str()),
            "group {i} differs for {pattern}"
        );
    }
    for name in ours.capture_group_names() {
        assert_eq!(
            m.value_named(name),
            caps.name(name).map(|g| g.as_str()),
            "group {name} differs for {pattern}"
        );
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn test_tv_show_title() {
        let m = "TV Show S11 Title"
            .first_match_source(
                r"(?<show>.+) S(?<season>\d\d) (?<title>.+)",
                Options::empty(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(m.value_named("show"), Some("TV Show"));
        assert_eq!(m.value_named("season"), Some("11"));
        assert_eq!(m.value_named("title"), Some("Title"));

        let m = "TV Show S11E02 Title"
            .first_match_source(
                r"(?<show>.+) S(?<season>\d\d)E(?<episode>\d\d) (?<title>.+)",
                Options::empty(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(m.value_named("show"), Some("TV Show"));
        assert_eq!(m.value_named("season"), Some("11"));
        assert_eq!(m.value_named("episode"), Some("02"));
        assert_eq!(m.value_named("title"), Some("Title"));
    }

    #[test]
    fn test_tv_show_with_backreference() {
        let text = "TV Show S11E02 Title";
        let pattern = r"(?<show>.+)(?<seperator>\.|-| )[sS](?<season>(?<seasonFirstDigit>\d)\d+)[eE](?<episode>\d+)(\k<seperator>)(?<title>.+)";

        let m = text.first_match_source(pattern, Options::empty()).unwrap().unwrap();
        let names = m.capture_group_names();
        assert_eq!(
            names,
            vec!["episode", "season", "seasonFirstDigit", "seperator", "show", "title"]
        );

        assert_eq!(m.value_named("show"), Some("TV Show"));
        assert_eq!(m.value_named("season"), Some("11"));
        assert_eq!(m.value_named("seasonFirstDigit"), Some("1"));
        assert_eq!(m.value_named("episode"), Some("02"));
        assert_eq!(m.value_named("title"), Some("Title"));
        assert_eq!(m.value_named("seperator"), Some(" "));
        assert_eq!(m.value_at(6), Some(" "));
    }

    #[test]
    fn test_literal_round_trip_with_names() {
        let pattern = Pattern::parse(r"/^(?<key>[a-z]+)\s*=\s*(?<value>.*)$/m").unwrap();
        let text = "name = regexlit\nversion = 0.1";
        let found: Vec<(&str, &str)> = pattern
            .matches(text)
            .unwrap()
            .iter()
            .map(|m| (m.value_named("key").unwrap(), m.value_named("value").unwrap()))
            .collect();
        assert_eq!(found, vec![("name", "regexlit"), ("version", "0.1")]);
        assert_eq!(pattern.to_string(), r"/^(?<key>[a-z]+)\s*=\s*(?<value>.*)$/m");
    }
}

mod numbering {
    use super::*;

    #[test]
    fn test_sequential_named_groups() {
        assert_names_agree(r"(?<a>\d+)-(?<b>\d+)", "10-20");
    }

    #[test]
    fn test_nested_named_groups() {
        assert_names_agree(r"(?<outer>a(?<inner>b(c))d)(?<tail>e)", "abcde");
    }

    #[test]
    fn test_python_style_names() {
        assert_names_agree(r"(?P<first>\w+)\s(?P<second>\w+)", "hello world");
    }

    #[test]
    fn test_alternation_with_absent_groups() {
        assert_names_agree(r"(?<num>\d+)|(?<word>[a-z]+)", "abc");
    }

    #[test]
    fn test_escaped_parens_do_not_count() {
        assert_names_agree(r"\((?<inside>\w*)\)", "call(xy)");
    }

    #[test]
    fn test_non_capturing_diverges_by_default() {
        let pattern = Pattern::new(r"(?:x)(?<n>y)", Options::empty()).unwrap();
        assert_eq!(pattern.number_of_capture_groups(), 1);
        assert_eq!(pattern.groups().len(), 2);
        assert_eq!(pattern.group_names().first("n"), Some(2));

        let m = pattern.first_match("xy").unwrap().unwrap();
        assert_eq!(m.value_named("n"), None);
    }

    #[test]
    fn test_capturing_numbering_matches_engine() {
        let pattern = PatternBuilder::new()
            .numbering(Numbering::Capturing)
            .build(r"(?:x(?<a>y))(?=z)(?<b>z)(?i:W)", Options::empty())
            .unwrap();
        assert_eq!(pattern.number_of_capture_groups(), 2);
        assert_eq!(pattern.groups().len(), 2);

        let m = pattern.first_match("xyzw").unwrap().unwrap();
        assert_eq!(m.value_named("a"), Some("y"));
        assert_eq!(m.value_named("b"), Some("z"));
    }

    #[test]
    fn test_capturing_numbering_inside_lookbehind() {
        let pattern = PatternBuilder::new()
            .numbering(Numbering::Capturing)
            .build(r"(?<=(?<n>a))b", Options::empty())
            .unwrap();
        assert_eq!(pattern.capture_group_names(), vec!["n"]);
        assert_eq!(pattern.number_of_capture_groups(), 1);

        let m = pattern.first_match("ab").unwrap().unwrap();
        assert_eq!(m.range(), 1..2);
        assert_eq!(m.value_at(1), Some("a"));
        assert_eq!(m.value_named("n"), Some("a"));
    }
}

mod options {
    use super::*;

    #[test]
    fn test_dot_matches_line_separators() {
        assert!(!Pattern::parse("/a.b/").unwrap().is_match("a\nb").unwrap());
        assert!(Pattern::parse("/a.b/s").unwrap().is_match("a\nb").unwrap());
    }

    #[test]
    fn test_anchors_match_lines() {
        let text = "one\ntwo";
        assert_eq!(Pattern::parse("/^t/").unwrap().number_of_matches(text).unwrap(), 0);
        assert_eq!(Pattern::parse("/^t/m").unwrap().number_of_matches(text).unwrap(), 1);
    }

    #[test]
    fn test_allow_comments_and_whitespace() {
        let pattern = Pattern::parse("/a b # trailing comment/W").unwrap();
        assert!(pattern.is_match("ab").unwrap());
        assert!(!pattern.is_match("a b").unwrap());
    }

    #[test]
    fn test_ignore_metacharacters_keeps_display() {
        let pattern = Pattern::parse("/1+1=(2)/E").unwrap();
        assert!(pattern.is_match("1+1=(2)").unwrap());
        assert_eq!(pattern.number_of_capture_groups(), 0);
        assert_eq!(pattern.to_string(), "/1+1=(2)/E");
    }
}
