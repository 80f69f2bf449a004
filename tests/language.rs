use std::fs;

use minimatica::{
    error::ErrorKind,
    interpret,
    interpreter::{lexer::Scanner, sink::Console, value::core::Value},
    run,
};
use walkdir::WalkDir;

#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "mm"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut console = Console::new();
        if !run(&source, &mut console) {
            panic!("Script {path:?} failed:\n{source}\nErrors: {:?}", console.errors());
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn logs_of(src: &str) -> Vec<String> {
    let mut console = Console::new();
    if !run(src, &mut console) {
        panic!("Script failed: {:?}", console.errors());
    }
    console.logs().iter().map(ToString::to_string).collect()
}

fn assert_logs(src: &str, expected: &[&str]) {
    assert_eq!(logs_of(src), expected, "logs of {src:?}");
}

fn assert_failure(src: &str, kind: ErrorKind) -> Console {
    let mut console = Console::new();
    assert_eq!(interpret(src, &mut Console::new()).map(|_| ()).unwrap_err().kind(),
               kind,
               "kind of error in {src:?}");
    assert!(!run(src, &mut console), "Script succeeded but was expected to fail");
    assert_eq!(console.errors().len(), 1, "exactly one error for {src:?}");
    console
}

#[test]
fn factorial_and_binomial() {
    assert_logs("print(fact(5));", &["120"]);
    assert_logs("print(binomial(10, 8));", &["45"]);
    assert_logs("print(fact(0), fact(1));", &["1", "1"]);
}

#[test]
fn trigonometry_is_exact_at_landmarks() {
    assert_logs("print(cos(90), sin(0), tan(45));", &["0", "0", "1"]);
    assert_logs("print(sin(30));", &["0.5"]);
}

#[test]
fn identity_matrix_is_neutral() {
    let product = logs_of("print(mat<2,2>(1,0,0,1) * mat<2,2>(3,-2,5,1));");
    let expected = logs_of("print(mat<2,2>(3,-2,5,1));");
    assert_eq!(product, expected);
    assert_eq!(expected, ["| 3.00, -2.00|\n| 5.00,  1.00|"]);
}

#[test]
fn matrix_arithmetic() {
    assert_logs("var m := mat<1,2>(1, 2);\nprint(m + m, m - m, 2 * m, m / 2);",
                &["| 2.00,  4.00|", "| 0.00,  0.00|", "| 2.00,  4.00|", "| 0.50,  1.00|"]);
    assert_logs("print(pow(mat<2,2>(1,1,0,1), 3));", &["| 1.00,  3.00|\n| 0.00,  1.00|"]);
    assert_logs("print(sqrt(vec<2>(4, 9)));", &["| 2.00|\n| 3.00|"]);
}

#[test]
fn polynomial_canonical_form() {
    assert_logs("print([x] -> 3*x^(2) - 2*x + 1);", &["f(x)=+3x^2-2x+1"]);
    assert_logs("print([x] -> x - x);", &["f(x)=0"]);
    assert_logs("print([x] -> 0.5x + 2/3);", &["f(x)=+0.5x+0.67"]);
}

#[test]
fn polynomial_calculus() {
    assert_logs("var f := [x] -> 3x^(2) - 2x + 1;\nprint(derive(f), integrate(f), f(2));",
                &["f(x)=+6x-2", "f(x)=+x^3-x^2+x", "9"]);
    assert_logs("var f := [x] -> 4x^(3) + 5;\nvar g := derive(integrate(f));\nprint(g(1.5) - f(1.5));",
                &["0"]);
}

#[test]
fn function_arithmetic() {
    assert_logs("var f := [x] -> x + 1;\nprint(f * f, f + 2, f - f, 2 * f);",
                &["f(x)=+x^2+2x+1", "f(x)=+x+3", "f(x)=0", "f(x)=+2x+2"]);
}

#[test]
fn print_returns_its_last_argument() {
    assert_logs("var a := print(1, 2);\nprint(a);", &["1", "2", "2"]);
}

#[test]
fn constants_are_preloaded() {
    assert_logs("print(round(pi * 100), floor(e), ceiling(e));", &["314", "2", "3"]);
}

#[test]
fn reassignment_updates_bindings() {
    assert_logs("var x := 1;\nx := x + 1;\nprint(x);", &["2"]);
}

#[test]
fn comments_and_whitespace_are_ignored() {
    assert_logs("# leading comment\nvar x := 2; # trailing\n\n\tprint(x);", &["2"]);
}

#[test]
fn redefinition_halts_before_print() {
    let console = assert_failure("var x := 1; var x := 2; print(x);", ErrorKind::Name);
    assert!(console.logs().is_empty());
}

#[test]
fn undefined_identifier_is_named() {
    let console = assert_failure("y + 1;", ErrorKind::Name);
    assert!(console.errors()[0].contains("\"y\""), "{:?}", console.errors());
}

#[test]
fn uncaptured_lambda_variable() {
    assert_failure("[x] -> y^(1);", ErrorKind::Capture);
}

#[test]
fn domain_errors() {
    assert_failure("mat<2,3>(1,2,3,4,5,6) * mat<2,3>(1,2,3,4,5,6);", ErrorKind::Domain);
    assert_failure("mat<2,2>(1, 2, 3);", ErrorKind::Domain);
    assert_failure("mat(1);", ErrorKind::Domain);
    assert_failure("[x] -> x^(-1);", ErrorKind::Domain);
    assert_failure("mat<1,1>(1) % 2;", ErrorKind::Domain);
    assert_failure("fact(1, 2);", ErrorKind::Domain);
}

#[test]
fn oversized_shapes_and_degrees_are_domain_errors() {
    assert_failure("mat<4294967296,4294967297>(1);", ErrorKind::Domain);
    assert_failure("print(mat<4294967296,4294967296>());", ErrorKind::Domain);
    assert_failure("var f := [x] -> x^(100000000000000);", ErrorKind::Domain);
    assert_failure("var f := [x] -> x + 1;\nprint(pow(f, 100000));", ErrorKind::Domain);
}

#[test]
fn huge_arguments_finish() {
    assert_logs("print(fact(100000000000000000000));", &["inf"]);
    assert_logs("print(pow(mat<1,1>(1), 9000000000000000));", &["| 1.00|"]);
}

#[test]
fn many_comment_lines() {
    assert_logs(&("# c\n".repeat(10_000) + "print(1);"), &["1"]);
}

#[test]
fn syntax_and_lexical_errors() {
    assert_failure("print(1)", ErrorKind::Syntax);
    assert_failure("var := 1;", ErrorKind::Syntax);
    assert_failure("var x = 1;", ErrorKind::Lexical);
    assert_failure("print($);", ErrorKind::Lexical);
}

#[test]
fn statements_after_an_error_never_run() {
    let mut console = Console::new();
    assert!(!run("print(1);\nprint(nope);\nprint(3);", &mut console));
    assert_eq!(console.logs(), &[Value::Number(1.0)]);
    assert!(console.errors()[0].ends_with("[Line 2]"), "{:?}", console.errors());
}

#[test]
fn console_clear_between_runs() {
    let mut console = Console::new();
    assert!(!run("oops;", &mut console));
    console.clear();
    assert!(run("print(1);", &mut console));
    assert!(console.errors().is_empty());
    assert_eq!(console.logs().len(), 1);
}

#[test]
fn scanner_tracks_lines() {
    let mut scanner = Scanner::new("a\nb");
    scanner.read_token();
    assert_eq!(scanner.position().line, 1);
    scanner.advance();
    assert_eq!(scanner.position().line, 2);
    assert_eq!(scanner.position().column, 1);
}
