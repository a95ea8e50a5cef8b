use std::{fs, path::Path};

use azhar::{
    Session,
    error::{Diagnostic, ErrorKind},
    run_source,
};
use walkdir::WalkDir;

#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "az"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = read_companion(path, "out");
        let input = read_companion(path, "in");

        count += 1;
        match run_with_input(&source, &input) {
            Ok(output) => assert_eq!(output, expected, "Script {path:?} printed unexpected output"),
            Err(e) => panic!("Script {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn read_companion(script: &Path, extension: &str) -> String {
    fs::read_to_string(script.with_extension(extension)).unwrap_or_default()
}

fn run_with_input(src: &str, input: &str) -> Result<String, Diagnostic> {
    let mut session = Session::with_io(input.as_bytes(), Vec::new());
    run_source(src, "<test>", &mut session)?;
    Ok(String::from_utf8(session.interpreter.into_output()).expect("output is UTF-8"))
}

fn run(src: &str) -> Result<String, Diagnostic> {
    run_with_input(src, "")
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = run(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) -> Diagnostic {
    match run(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn declarations_and_arithmetic() {
    assert_output("let x: int = 1 + 2\nprint(x)", "3\n");
    assert_output("let x: int = 7 * 9\nprint(x - 3)", "60\n");
    assert_output("print(2 + 3 * 4)", "14\n");
    assert_output("print((2 + 3) * 4)", "20\n");
    assert_output("print(10 - 4 - 3)", "3\n");
    assert_output("print(-(2 + 3))", "-5\n");
}

#[test]
fn division_rounds_toward_negative_infinity() {
    assert_output("print(7 / 2)", "3\n");
    assert_output("print(-7 / 2)", "-4\n");
    assert_output("print(7 / -2)", "-4\n");
    assert_output("print(-7 / -2)", "3\n");
}

#[test]
fn values_print_in_their_natural_form() {
    assert_output(r#"print("hello\tworld")"#, "hello\tworld\n");
    assert_output("print(true)\nprint(1 == 2)", "true\nfalse\n");
    assert_output(r#"print("a" == "a")"#, "true\n");
    assert_output(r#"output("a") output(1) print("")"#, "a1\n");
}

#[test]
fn block_declarations_are_not_visible_afterwards() {
    let error = assert_failure("do let x: int = 1 end\nprint(x)");

    assert_eq!(error.to_string(),
               "<test>:2:7: TypeError: Undeclared variable 'x'\n  print(x)\n        ^");
}

#[test]
fn assignment_mutates_the_innermost_binding() {
    let src = "let x: int = 1
do
    let x: int = 2
    x = 3
    print(x)
end
print(x)";

    assert_output(src, "3\n1\n");
}

#[test]
fn outer_variables_can_be_assigned_from_blocks() {
    assert_output("let x: int = 1\ndo x = x + 1 end\nprint(x)", "2\n");
}

#[test]
fn logical_operators_short_circuit() {
    let src = r#"function boom() -> bool do
    print("boom")
    return true
end
print(false and boom())
print(true or boom())
print(true and boom())"#;

    assert_output(src, "false\ntrue\nboom\ntrue\n");
}

#[test]
fn return_inside_a_loop_leaves_the_function() {
    let src = "function f() -> int do
    let i: int = 0
    while true do
        i = i + 1
        if i == 3 do
            return i
        end
    end
    return -1
end
print(f())";

    assert_output(src, "3\n");
}

#[test]
fn break_leaves_the_innermost_loop() {
    let src = "let i: int = 0
while i < 3 do
    let j: int = 0
    while true do
        j = j + 1
        if j > i do break end
    end
    output(j)
    i = i + 1
end
print(\"\")";

    assert_output(src, "123\n");
}

#[test]
fn else_if_chains_close_with_one_end() {
    let src = r#"function grade(n: int) -> string do
    if n >= 90 do
        return "A"
    else if n >= 80 do
        return "B"
    else if n >= 70 do
        return "C"
    else do
        return "F"
    end
end
print(grade(95))
print(grade(85))
print(grade(75))
print(grade(10))"#;

    assert_output(src, "A\nB\nC\nF\n");
}

#[test]
fn nested_if_in_else_block_needs_its_own_end() {
    let src = "let n: int = 5
if n < 0 do
    print(0)
else do
    if n > 3 do
        print(2)
    end
end";

    assert_output(src, "2\n");
}

#[test]
fn recursion() {
    let src = "function fact(n: int) -> int do
    if n <= 1 do
        return 1
    end
    return n * fact(n - 1)
end
print(fact(10))";

    assert_output(src, "3628800\n");
}

#[test]
fn functions_without_return_yield_void() {
    let src = r#"function greet(name: string) -> void do
    output("hi ")
    print(name)
end
greet("there")"#;

    assert_output(src, "hi there\n");
}

#[test]
fn console_input_is_read_line_by_line() {
    let src = "let name: string = read_string()
let a: int = read_int()
let b: int = read_int()
output(name)
output(\": \")
print(a + b)";

    assert_eq!(run_with_input(src, "sum\n 20\n22  \n").unwrap(), "sum: 42\n");
}

#[test]
fn type_mismatches_are_rejected_before_running() {
    let error = assert_failure("print(1)\nlet a: int = 3\na = \"s\"");

    assert_eq!(error.to_string(),
               "<test>:3:1: TypeError: Cannot assign string to int\n  a = \"s\"\n  ^");
}

#[test]
fn calls_are_checked_against_the_signature() {
    let add = "function add(a: int, b: int) -> int do return a + b end\n";

    let error = assert_failure(&format!("{add}print(add(1))"));
    assert!(error.to_string()
                 .contains("TypeError: Function 'add' expects 2 argument(s), found 1"));

    let error = assert_failure(&format!("{add}print(add(1, \"2\"))"));
    assert!(error.to_string()
                 .contains("TypeError: Argument 2 of 'add' must be int, found string"));

    assert_success(&format!("{add}print(add(1, 2))"));
}

#[test]
fn operand_types_are_checked() {
    let cases = [("print(1 + true)", "Operator '+' requires int operands, found int and bool"),
                 ("print(1 and true)", "Operator 'and' requires bool operands, found int and bool"),
                 ("print(1 == \"1\")",
                  "Operator '==' requires operands of the same type, found int and string"),
                 ("print(-\"a\")", "Unary '-' requires an int operand, found string"),
                 ("if 1 do end", "if condition must be bool, found int")];

    for (src, message) in cases {
        let error = assert_failure(src);
        assert!(error.to_string().contains(message),
                "{src:?} reported {error}, expected {message:?}");
    }
}

#[test]
fn functions_must_be_declared_before_use() {
    let error = assert_failure("print(later())\nfunction later() -> int do return 1 end");

    assert!(error.to_string()
                 .contains("TypeError: Undefined function 'later'"));
}

#[test]
fn runtime_errors_are_located() {
    let error = assert_failure("let zero: int = 0\nprint(10 / zero)");
    assert_eq!(error.to_string(),
               "<test>:2:10: RuntimeError: Division by zero\n  print(10 / zero)\n           ^");

    let error = run_with_input("print(read_int())", "abc\n").unwrap_err();
    assert!(error.to_string()
                 .starts_with("<test>:1:7: RuntimeError: read_int got non-integer input \"abc\""));

    let error = assert_failure("print(9223372036854775807 + 1)");
    assert!(error.to_string().contains("RuntimeError: Integer overflow"));
}

#[test]
fn lexical_and_parse_errors_are_reported() {
    let error = assert_failure("let x: int = 1.5");
    assert!(error.to_string().contains("LexicalError"));

    let error = assert_failure("let s: string = \"open");
    assert!(error.to_string().contains("LexicalError"));

    let error = assert_failure("let x: int = 1 !");
    assert!(error.to_string().contains("LexicalError"));

    let error = assert_failure("while true print(1) end");
    assert!(error.to_string()
                 .starts_with("<test>:1:12: ParseError: Expected 'do', found 'print'"));

    let error = assert_failure("function f() -> int do return 1");
    assert!(error.to_string().contains("ParseError"));
}

#[test]
fn runs_are_deterministic() {
    let src = "let i: int = 0
while i < 5 do
    output(i * i)
    output(\" \")
    i = i + 1
end";

    assert_eq!(run(src).unwrap(), run(src).unwrap());
}

#[test]
fn sessions_keep_globals_between_runs() {
    let mut session = Session::with_io("".as_bytes(), Vec::new());

    run_source("let total: int = 1", "<repl>", &mut session).unwrap();
    run_source("function bump() -> void do total = total + 1 end",
               "<repl>",
               &mut session).unwrap();
    run_source("bump() bump() print(total)", "<repl>", &mut session).unwrap();

    assert!(run_source("total = \"x\"", "<repl>", &mut session).is_err());
    run_source("print(total)", "<repl>", &mut session).unwrap();

    assert_eq!(session.interpreter.output(), b"3\n3\n");
}

#[test]
fn chunks_failing_at_run_time_leave_no_globals() {
    let mut session = Session::with_io("".as_bytes(), Vec::new());

    let error = run_source("let a: int = 1 / 0", "<repl>", &mut session).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Runtime);

    let error = run_source("print(a)", "<repl>", &mut session).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Type);
    assert!(error.to_string()
                 .contains("TypeError: Undeclared variable 'a'"));

    run_source("let b: int = 2\nfunction f() -> int do return b end\nprint(1 / 0)",
               "<repl>",
               &mut session).unwrap_err();
    let error = run_source("print(f())", "<repl>", &mut session).unwrap_err();
    assert!(error.to_string()
                 .contains("TypeError: Undefined function 'f'"));

    run_source("let a: int = 5\nprint(a)", "<repl>", &mut session).unwrap();
    assert_eq!(session.interpreter.output(), b"5\n");
}

#[test]
fn errors_in_earlier_chunks_functions_show_no_foreign_line() {
    let mut session = Session::with_io("".as_bytes(), Vec::new());

    run_source("function f() -> int do return 1 / 0 end",
               "<repl>",
               &mut session).unwrap();
    let error = run_source("print(f())", "<repl>", &mut session).unwrap_err();

    assert_eq!(error.to_string(), "<repl>:1:33: RuntimeError: Division by zero");
}

#[test]
fn errors_in_the_current_chunks_functions_keep_their_line() {
    let mut session = Session::with_io("".as_bytes(), Vec::new());

    let error = run_source("function f() -> int do\n    return 1 / 0\nend\nprint(f())",
                           "<repl>",
                           &mut session).unwrap_err();

    assert_eq!(error.to_string(),
               "<repl>:2:14: RuntimeError: Division by zero\n      return 1 / 0\n               ^");
}

#[test]
fn identifiers_may_use_unicode_letters() {
    assert_output("let café: int = 1\nprint(café)", "1\n");
    assert_output("function dobrá(počet: int) -> int do return počet * 2 end\nprint(dobrá(21))",
                  "42\n");
}

#[test]
fn deeply_nested_programs_are_parse_errors() {
    let parens = format!("print({}1{})", "(".repeat(1000), ")".repeat(1000));
    let blocks = format!("{}print(1){}", "do\n".repeat(3000), "\nend".repeat(3000));

    for src in [parens, blocks] {
        let error = assert_failure(&src);
        assert_eq!(error.kind, ErrorKind::Parse);
        assert!(error.message.starts_with("Nesting deeper than"), "{error}");
    }
}
