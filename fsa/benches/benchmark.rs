use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fsa::dfa::Dfa;
use fsa::parser;
use lazy_static::lazy_static;
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use regex::Regex as LibRegex;

lazy_static! {
    static ref DFA_ODD_AS: String = "
               a  b
        -> s0 s1 s0
         * s1 s0 s1
    "
    .to_string();
    static ref DFA_TWO_AS: String = "
               a  b
        -> s0 s1 s0
           s1 s2 s1
         * s2 s2 s2
    "
    .to_string();
    static ref REGEX_SAMPLE: String = "(a|b)*abb(a|b)*".to_string();
}

pub fn powerset(c: &mut Criterion) {
    let dfa1: Dfa = parser::dfa(&DFA_ODD_AS).unwrap().try_into().unwrap();
    let dfa2: Dfa = parser::dfa(&DFA_TWO_AS).unwrap().try_into().unwrap();
    c.bench_function("union", |b| b.iter(|| dfa1.union(black_box(&dfa2))));
    c.bench_function("intersection", |b| {
        b.iter(|| dfa1.intersection(black_box(&dfa2)))
    });
    c.bench_function("difference", |b| {
        b.iter(|| dfa1.difference(black_box(&dfa2)))
    });
    c.bench_function("symmetric difference", |b| {
        b.iter(|| dfa1.symmetric_difference(black_box(&dfa2)))
    });
}

pub fn equivalence_check(c: &mut Criterion) {
    let dfa1: Dfa = parser::dfa(&DFA_ODD_AS).unwrap().try_into().unwrap();
    let dfa2: Dfa = parser::dfa(&DFA_TWO_AS).unwrap().try_into().unwrap();
    c.bench_function("equivalence check", |b| {
        b.iter(|| dfa1.equivalent_to(black_box(&dfa2)))
    });
}

pub fn regex_compile(c: &mut Criterion) {
    c.bench_function("fsa regex compile", |b| {
        b.iter(|| {
            let input = black_box(&*REGEX_SAMPLE);
            let regex = parser::regex(input).unwrap();
            let nfa = regex.to_nfa();
            let dfa = nfa.to_dfa();
            dfa
        })
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| {
            let input = black_box(&*REGEX_SAMPLE);
            LibRegex::new(input).unwrap()
        })
    });
}

pub fn regex_check(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let string_gen = "[ab]+".new_tree(&mut runner).unwrap();
    let mut regex = parser::regex(&REGEX_SAMPLE).unwrap().to_nfa().to_dfa();
    regex.minimize();

    c.bench_function("fsa regex check", |b| {
        b.iter(|| regex.accepts_graphemes(black_box(&string_gen.current())))
    });

    let mut runner = TestRunner::default();
    let string_gen = "[ab]+".new_tree(&mut runner).unwrap();
    let input_regex = format!("^({})$", &*REGEX_SAMPLE);
    let regex = LibRegex::new(&input_regex).unwrap();
    c.bench_function("library regex check", |b| {
        b.iter(|| regex.is_match(black_box(&string_gen.current())))
    });
}

criterion_group!(
    benches,
    equivalence_check,
    powerset,
    regex_compile,
    regex_check
);
criterion_main!(benches);
