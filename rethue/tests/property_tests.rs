use std::path::Path;

use proptest::prelude::*;
use rethue::engine::{BufferHost, Context, Production, Program, Registry};
use rethue::compile;

/// Every demo program must compile.
#[test]
fn compile_all_demos() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut count = 0;
    for entry in std::fs::read_dir(&demos).expect("demos directory") {
        let path = entry.expect("dir entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("ret") {
            continue;
        }
        let src = std::fs::read_to_string(&path).expect("read demo");
        if let Err(e) = compile(&src) {
            panic!("{}: {e}", path.display());
        }
        count += 1;
    }
    assert!(count > 0, "no demos found in {}", demos.display());
}

fn demo(name: &str) -> Program {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    compile(&std::fs::read_to_string(path).expect("read demo")).expect("compile demo")
}

fn run(pgm: &Program, init: &str) -> String {
    pgm.run_with(init, &mut BufferHost::new()).expect("run")
}

proptest! {
    #[test]
    fn compiler_does_not_panic(s in "\\PC*") {
        let _ = compile(&s);
    }

    #[test]
    fn deep_nesting_is_rejected_not_fatal(n in 1usize..4000, open in "[\\[{~]") {
        let src = open.repeat(n);
        prop_assert!(compile(&src).is_err());
    }

    #[test]
    fn literal_result_ignores_initial_string(s in "[a-z ]*", init in "[a-z]*") {
        let pgm = Program::new(
            Production::sequence(
                Production::literal(&s).unwrap(),
                Production::literal(&s).unwrap(),
            ),
            Registry::new(),
        );
        prop_assert_eq!(run(&pgm, &init), s);
    }

    #[test]
    fn commit_reports_string_inequality(a in "[ab]{0,4}", b in "[ab]{0,4}") {
        let mut parent = Context::new(a.as_str());
        let mut child = parent.enter();
        child.set(b.as_str());
        prop_assert_eq!(parent.commit(child), a != b);
        prop_assert_eq!(parent.string(), b.as_str());
    }

    #[test]
    fn escaped_scope_replaces_first_occurrence(
        hay in "[a-c.*]{0,20}",
        needle in "[a-c.*]{1,3}",
        with in "[x-z]{0,3}",
    ) {
        let prod = Production::scoped(
            &regex::escape(&needle),
            false,
            Production::literal(&with).unwrap(),
        ).unwrap();
        let pgm = Program::new(prod, Registry::new());
        prop_assert_eq!(run(&pgm, &hay), hay.replacen(&needle, &with, 1));
    }

    #[test]
    fn sort_demo_sorts(s in "[abc]{0,12}") {
        let mut expected: Vec<char> = s.chars().collect();
        expected.sort_unstable();
        let expected: String = expected.into_iter().collect();
        prop_assert_eq!(run(&demo("sort.ret"), &s), expected);
    }

    #[test]
    fn increment_demo_adds_one(n in 0u32..100_000) {
        prop_assert_eq!(run(&demo("increment.ret"), &format!("{n:b}")), format!("{:b}", n + 1));
    }

    #[test]
    fn reverse_demo_reverses(s in "[a-z]{0,16}") {
        let expected: String = s.chars().rev().collect();
        prop_assert_eq!(run(&demo("reverse.ret"), &s), expected);
    }
}
