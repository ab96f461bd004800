use criterion::{Criterion, black_box, criterion_group, criterion_main};
use regexlit::{GroupTree, LiteralConfig, Options, Pattern, parse_literal};

const TV_PATTERN: &str = r"(?<show>.+)(?<seperator>\.|-| )[sS](?<season>(?<seasonFirstDigit>\d)\d+)[eE](?<episode>\d+)(\k<seperator>)(?<title>.+)";

fn bench_analyze_groups(c: &mut Criterion) {
    c.bench_function("analyze_groups", |b| {
        b.iter(|| black_box(GroupTree::analyze(black_box(TV_PATTERN))))
    });
}

fn bench_parse_literal(c: &mut Criterion) {
    let literal = format!("/{TV_PATTERN}/imsW");
    let config = LiteralConfig::default();

    c.bench_function("parse_literal", |b| {
        b.iter(|| black_box(parse_literal(black_box(&literal), &config)))
    });
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_pattern", |b| {
        b.iter(|| black_box(Pattern::new(black_box(TV_PATTERN), Options::empty())))
    });
}

fn bench_named_lookup(c: &mut Criterion) {
    let pattern = Pattern::new(TV_PATTERN, Options::empty()).unwrap();
    let input = "TV Show S11E02 Title";

    c.bench_function("named_group_match", |b| {
        b.iter(|| {
            let m = pattern.first_match(black_box(input)).unwrap().unwrap();
            black_box(m.value_named("episode").map(str::len))
        })
    });
}

fn bench_find_all(c: &mut Criterion) {
    let pattern = Pattern::parse(r"/(?<n>\d+)/").unwrap();
    let input = "abc 123 def 456 ghi 789 jkl 012 mno 345 pqr 678 stu 901";

    c.bench_function("find_all_numbers", |b| {
        b.iter(|| black_box(pattern.number_of_matches(black_box(input))))
    });
}

fn bench_replace_all(c: &mut Criterion) {
    let pattern = Pattern::new(r"(?<first>\w+) (?<last>\w+)", Options::empty()).unwrap();
    let input = "John Smith, Jane Doe, Alan Turing, Ada Lovelace";

    c.bench_function("replace_all_named", |b| {
        b.iter(|| black_box(pattern.replace_all(black_box(input), "${last} $1")))
    });
}

criterion_group!(
    benches,
    bench_analyze_groups,
    bench_parse_literal,
    bench_compile,
    bench_named_lookup,
    bench_find_all,
    bench_replace_all
);
criterion_main!(benches);
