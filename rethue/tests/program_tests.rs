/// End-to-end behaviour of compiled programs and hand-built production trees.
///
/// Each test builds a program (from source or directly from the engine's
/// constructors), runs it against a `BufferHost`, and checks the final string
/// plus anything written to the host.

use rethue::engine::{
    BufferHost, Context, Machine, Observer, Production, Program, Registry, Silent, StepLimit,
};
use rethue::{compile, CompileError, RuntimeError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lit(s: &str) -> Production {
    Production::literal(s).unwrap()
}

fn part(re: &str, inner: Production) -> Production {
    Production::scoped(re, false, inner).unwrap()
}

/// Compile `src` and run it from `init` with no input.
fn run_src(src: &str, init: &str) -> String {
    let pgm = compile(src).unwrap_or_else(|e| panic!("compile failed: {e}"));
    let mut host = BufferHost::new();
    pgm.run_with(init, &mut host)
        .unwrap_or_else(|e| panic!("run failed: {e}"))
}

/// Counts applications and aborts once `budget` is spent.
struct StepCounter {
    budget: u64,
    steps: u64,
}

impl Observer for StepCounter {
    fn before(&mut self, _depth: usize, _prod: &Production, _ctx: &Context) -> Result<(), RuntimeError> {
        self.steps += 1;
        if self.steps > self.budget {
            return Err(RuntimeError::StepLimit(self.budget));
        }
        Ok(())
    }
}

// ── Transaction bookkeeping ───────────────────────────────────────────────────

#[test]
fn identity_transactions_never_report_change() {
    let reg = Registry::new();
    let identities = [
        lit(r"\0"),
        Production::once(vec![]),
        Production::alternation(vec![part("zzz", lit("x"))]),
        Production::sequence(lit("other"), lit("same")),
        part("a", lit(r"\0")),
        Production::repeat(vec![part("q", lit(""))]),
    ];
    for prod in &identities {
        let mut host = BufferHost::new();
        let mut observer = Silent;
        let mut m = Machine::new(&reg, &mut host, &mut observer);
        let mut ctx = Context::new("same");
        assert!(!prod.apply(&mut ctx, &mut m).unwrap(), "{prod}");
        assert_eq!(ctx.string(), "same", "{prod}");
    }
}

// ── Alternation ───────────────────────────────────────────────────────────────

#[test]
fn alternation_stops_at_first_success() {
    // C would fail loudly if it were ever attempted.
    let alt = Production::alternation(vec![
        part("nothing", lit("A")),
        part("b", lit("B")),
        Production::reference("undefined_c"),
    ]);
    let pgm = Program::new(alt, Registry::new());
    let mut host = BufferHost::new();
    let via_alt = pgm.run_with("abc", &mut host).unwrap();

    let b_alone = Program::new(part("b", lit("B")), Registry::new());
    assert_eq!(via_alt, b_alone.run_with("abc", &mut host).unwrap());
    assert_eq!(via_alt, "aBc");
}

// ── Repeat ────────────────────────────────────────────────────────────────────

#[test]
fn repeat_saturates_to_empty() {
    let pgm = Program::new(Production::repeat(vec![part("a", lit(""))]), Registry::new());
    let mut host = BufferHost::new();
    assert_eq!(pgm.run_with("aaa", &mut host).unwrap(), "");
}

#[test]
fn repeat_of_always_changing_production_is_unbounded() {
    let pgm = Program::new(Production::repeat(vec![lit(r"\0.")]), Registry::new());
    let mut host = BufferHost::new();
    let mut counter = StepCounter { budget: 20_000, steps: 0 };
    let err = pgm.run("", &mut host, &mut counter).unwrap_err();
    assert!(matches!(err, RuntimeError::StepLimit(20_000)));
    assert_eq!(counter.steps, 20_001);
}

#[test]
fn step_limit_observer_reports_budget() {
    let pgm = compile(r#"{ /x*/ ::= "\0x" }"#).unwrap();
    let mut host = BufferHost::new();
    let mut limit = StepLimit::new(100);
    assert!(matches!(
        pgm.run("", &mut host, &mut limit),
        Err(RuntimeError::StepLimit(100))
    ));
}

// ── Scoped rewrite ────────────────────────────────────────────────────────────

#[test]
fn scoped_rewrite_splices_match() {
    assert_eq!(run_src(r#"/b+/ ::= "X""#, "aabbbaa"), "aaXaa");
}

#[test]
fn case_insensitive_scope() {
    assert_eq!(run_src(r#"/HELLO/i ::= "bye""#, "say hello"), "say bye");
    assert_eq!(run_src(r#"/HELLO/ ::= "bye""#, "say hello"), "say hello");
}

// ── Output ────────────────────────────────────────────────────────────────────

#[test]
fn output_never_alters_live_string() {
    let prod = Production::sequence(Production::output(lit("Z")), lit("Y"));
    let pgm = Program::new(prod, Registry::new());
    let mut host = BufferHost::new();
    let result = pgm.run_with("start", &mut host).unwrap();
    assert_eq!(host.output, vec!["Z"]);

    let direct = Program::new(lit("Y"), Registry::new());
    assert_eq!(result, direct.run_with("start", &mut BufferHost::new()).unwrap());
}

#[test]
fn output_sees_whole_match_of_live_string() {
    let mut host = BufferHost::new();
    let pgm = compile(r#"[ ~ "<\0>" ] => "after""#).unwrap();
    assert_eq!(pgm.run_with("start", &mut host).unwrap(), "after");
    assert_eq!(host.output, vec!["<start>"]);
}

// ── Names ─────────────────────────────────────────────────────────────────────

#[test]
fn forward_reference_resolves_in_either_order() {
    for order in [["a", "b"], ["b", "a"]] {
        let mut reg = Registry::new();
        for name in order {
            let def = if name == "a" { Production::reference("b") } else { lit("done") };
            reg.define(name, def).unwrap();
        }
        let pgm = Program::new(Production::reference("a"), reg);
        assert_eq!(pgm.run_with("start", &mut BufferHost::new()).unwrap(), "done");
    }
}

#[test]
fn forward_reference_from_source() {
    assert_eq!(run_src(r#"a = b   b = "done""#, "x"), "done");
}

#[test]
fn mutual_recursion() {
    // Alternately strip a leading `x` and a leading `y`, marking whose turn
    // found nothing to strip.
    let src = r#"
        [ xs ]
        xs = [ /^x(.*)/ ::= "\1" => ys   /^.*$/ ::= "\0 (x stuck)" ]
        ys = [ /^y(.*)/ ::= "\1" => xs   /^.*$/ ::= "\0 (y stuck)" ]
    "#;
    assert_eq!(run_src(src, "xyxyz"), "z (x stuck)");
    assert_eq!(run_src(src, "xxy"), "xy (y stuck)");
}

#[test]
fn unreachable_dangling_reference_is_fine() {
    assert_eq!(run_src(r#"[ "first" nowhere ]"#, ""), "first");
}

#[test]
fn reachable_dangling_reference_is_an_error() {
    let pgm = compile("[ /x/ ::= nowhere ]").unwrap();
    let mut host = BufferHost::new();
    assert_eq!(pgm.run_with("abc", &mut host).unwrap(), "abc");
    assert!(matches!(
        pgm.run_with("xyz", &mut host),
        Err(RuntimeError::UnresolvedReference(n)) if n == "nowhere"
    ));
}

#[test]
fn duplicate_names_rejected_before_running() {
    assert!(matches!(
        compile(r#"a = "1"  [ a = "2" ]"#),
        Err(CompileError::DuplicateName(_))
    ));
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn input_exhaustion_aborts_the_run() {
    let pgm = Program::new(Production::Input, Registry::new());
    let mut host = BufferHost::with_input(Vec::<String>::new());
    assert!(matches!(
        pgm.run_with("untouched", &mut host),
        Err(RuntimeError::InputExhausted)
    ));
}

#[test]
fn echo_loop_until_input_runs_out() {
    // Echo each line with its first `a` capitalised until input runs out.
    let pgm = compile(r#"{ ::: => ~ [ /a/ ::= "A" ] }"#).unwrap();
    let mut host = BufferHost::with_input(["abc", "banana"]);
    let err = pgm.run_with("", &mut host).unwrap_err();
    assert!(matches!(err, RuntimeError::InputExhausted));
    assert_eq!(host.output, vec!["Abc", "bAnana"]);
}

// ── Back-references ───────────────────────────────────────────────────────────

#[test]
fn captures_visible_inside_the_scope() {
    let src = r#"/(?P<k>\w+)=(?P<v>\w+)/ ::= [] => "\g<v> is \g<k>""#;
    assert_eq!(run_src(src, "  colour=red  "), "  red is colour  ");
}

#[test]
fn captures_flow_out_of_the_scope() {
    // The match survives the rewrite, so the literal after it replaces the
    // whole string.
    let src = r#"[ /(?P<k>\w+)=(?P<v>\w+)/ ::= [] ] => "\g<v> is \g<k>""#;
    assert_eq!(run_src(src, "  colour=red  "), "red is colour");
}

#[test]
fn bad_group_is_runtime_error() {
    let pgm = compile(r#""\3""#).unwrap();
    assert!(matches!(
        pgm.run_with("", &mut BufferHost::new()),
        Err(RuntimeError::BadGroup(g)) if g == "3"
    ));
}

// ── Whole programs ────────────────────────────────────────────────────────────

#[test]
fn unary_addition() {
    // 111+11 → 11111
    assert_eq!(run_src(r#"{ /\+/ ::= "" }"#, "111+11"), "11111");
}

#[test]
fn binary_increment() {
    // Drop a carry marker at the end and walk it left.
    let src = r#"
        [ /$/ ::= "_" ] => {
            /1_/ ::= "_0"
            /0_/ ::= "1"
            /^_/ ::= "1"
        }
    "#;
    assert_eq!(run_src(src, "1011"), "1100");
    assert_eq!(run_src(src, "111"), "1000");
    assert_eq!(run_src(src, "0"), "1");
}

#[test]
fn sort_by_swapping() {
    assert_eq!(run_src(r#"{ /ba/ ::= "ab"  /cb/ ::= "bc"  /ca/ ::= "ac" }"#, "cabcab"), "aabbcc");
}
