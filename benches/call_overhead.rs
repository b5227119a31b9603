/// Benchmark runner for the thus engine.
///
/// Times the call pipeline across every way a receiver can be chosen,
/// with Node.js equivalents for reference.

extern crate thus;

use std::time::{Duration, Instant};

use thus::parser::JsParser;
use thus::runner::api::EvalContext;
use thus::runner::ds::value::{JsNumberType, JsValue};

/// Run a benchmark and return the execution time.
fn run_benchmark(name: &str, code: &str, iterations: u32) -> Duration {
    let program = JsParser::parse_to_ast_from_str(code)
        .unwrap_or_else(|e| panic!("Failed to parse benchmark {}: {}", name, e));

    let start = Instant::now();

    for _ in 0..iterations {
        let mut ctx = EvalContext::new();
        let _ = ctx.execute_program(&program);
    }

    start.elapsed()
}

/// Run code once and read back a global, for the correctness table.
fn run_and_get_var(code: &str, var_name: &str) -> JsValue {
    let mut ctx = EvalContext::new();
    let _ = ctx.eval_source(code);
    ctx.get_global_binding(var_name)
        .unwrap_or(JsValue::Undefined)
}

// ============================================================================
// Benchmark definitions
// ============================================================================

const BENCH_METHOD_CALLS: &str = r#"
var obj = { count: 0, up: function(n) { this.count = this.count + n; } };
var i = 0;
while (i < 2000) {
    obj.up(1);
    i = i + 1;
}
var methodTotal = obj.count;
"#;

const BENCH_BARE_CALLS: &str = r#"
var tally = 0;
function bump(n) { this.tally = this.tally + n; }
var i = 0;
while (i < 2000) {
    bump(1);
    i = i + 1;
}
"#;

const BENCH_BOUND_CALLS: &str = r#"
var counter = { count: 0, up: function(n) { this.count = this.count + n; } };
var bound = counter.up.bind(counter);
var i = 0;
while (i < 2000) {
    bound(1);
    i = i + 1;
}
var boundTotal = counter.count;
"#;

const BENCH_EXPLICIT_CALLS: &str = r#"
var target = { count: 0 };
function up(n) { this.count = this.count + n; }
var i = 0;
while (i < 1000) {
    up.call(target, 1);
    up.apply(target, [1]);
    i = i + 1;
}
var explicitTotal = target.count;
"#;

const BENCH_ARROW_CALLS: &str = r#"
var box = {
    count: 0,
    makeAdder: function() { return (n) => { this.count = this.count + n; }; }
};
var add = box.makeAdder();
var i = 0;
while (i < 2000) {
    add(1);
    i = i + 1;
}
var arrowTotal = box.count;
"#;

const BENCH_CONSTRUCTION: &str = r#"
function Counter(start) { this.count = start; }
var constructedTotal = 0;
var i = 0;
while (i < 1000) {
    var c = new Counter(i);
    constructedTotal = constructedTotal + c.count;
    i = i + 1;
}
"#;

const BENCH_CLOSURE_CALLS: &str = r#"
function makeCounter() {
    var c = 0;
    return function() { c = c + 1; return c; };
}
var inc = makeCounter();
var i = 0;
var closureLast = 0;
while (i < 2000) {
    closureLast = inc();
    i = i + 1;
}
"#;

const BENCH_RECURSION: &str = r#"
function sumTo(n) {
    if (n < 1) { return 0; }
    return n + sumTo(n - 1);
}
var recursionTotal = 0;
var i = 0;
while (i < 50) {
    recursionTotal = sumTo(400);
    i = i + 1;
}
"#;

fn main() {
    println!("=======================================================");
    println!("  thus - Receiver Binding Call Overhead");
    println!("=======================================================\n");

    let benchmarks: Vec<(&str, &str, u32)> = vec![
        ("Method calls (2K)", BENCH_METHOD_CALLS, 200),
        ("Bare calls (2K)", BENCH_BARE_CALLS, 200),
        ("Bound calls (2K)", BENCH_BOUND_CALLS, 200),
        ("call/apply (2K)", BENCH_EXPLICIT_CALLS, 200),
        ("Arrow calls (2K)", BENCH_ARROW_CALLS, 200),
        ("Construction (1K)", BENCH_CONSTRUCTION, 200),
        ("Closure calls (2K)", BENCH_CLOSURE_CALLS, 200),
        ("Recursion (depth 400)", BENCH_RECURSION, 50),
    ];

    println!(
        "{:<28} {:>8} {:>14} {:>14}",
        "Benchmark", "Runs", "Total", "Per run"
    );
    println!("{}", "-".repeat(68));

    let mut total = Duration::ZERO;

    for (name, code, iterations) in &benchmarks {
        let duration = run_benchmark(name, code, *iterations);
        total += duration;
        let per_run = duration / *iterations;
        println!(
            "{:<28} {:>8} {:>12.2?} {:>12.2?}",
            name, iterations, duration, per_run
        );
    }

    println!("{}", "-".repeat(68));
    println!("{:<28} {:>8} {:>12.2?}", "TOTAL", "", total);

    // Verify correctness
    println!("\n=======================================================");
    println!("  Correctness Verification");
    println!("=======================================================\n");

    let verifications: Vec<(&str, &str, &str, i64)> = vec![
        ("Method calls", BENCH_METHOD_CALLS, "methodTotal", 2000),
        ("Bare calls", BENCH_BARE_CALLS, "tally", 2000),
        ("Bound calls", BENCH_BOUND_CALLS, "boundTotal", 2000),
        ("call/apply", BENCH_EXPLICIT_CALLS, "explicitTotal", 2000),
        ("Arrow calls", BENCH_ARROW_CALLS, "arrowTotal", 2000),
        ("Construction", BENCH_CONSTRUCTION, "constructedTotal", 499500),
        ("Closure calls", BENCH_CLOSURE_CALLS, "closureLast", 2000),
        ("Recursion", BENCH_RECURSION, "recursionTotal", 80200),
    ];

    println!("{:<20} {:>12} {:>12}", "Test", "Expected", "Actual");
    println!("{}", "-".repeat(46));

    for (name, code, var, expected) in verifications {
        let actual = match run_and_get_var(code, var) {
            JsValue::Number(JsNumberType::Integer(n)) => n,
            _ => -1,
        };
        let status = if actual == expected { "✓" } else { "✗" };
        println!("{:<20} {:>12} {:>4} {:>7}", name, expected, status, actual);
    }

    println!("\n=======================================================");
    println!("  Reference: Node.js Equivalent Commands");
    println!("=======================================================\n");

    println!("To compare with Node.js, run these commands:\n");
    println!("# Method call benchmark");
    println!("node -e \"let start=Date.now(); for(let k=0;k<200;k++){{let o={{count:0,up(n){{this.count+=n}}}};for(let i=0;i<2000;i++)o.up(1)}}; console.log(Date.now()-start+'ms')\"\n");
    println!("# Bound call benchmark");
    println!("node -e \"let start=Date.now(); for(let k=0;k<200;k++){{let o={{count:0,up(n){{this.count+=n}}}};let b=o.up.bind(o);for(let i=0;i<2000;i++)b(1)}}; console.log(Date.now()-start+'ms')\"");
}
