use std::{
    fs::{read_dir, read_to_string},
    path::Path,
    rc::Rc,
};

use color_eyre::{eyre::Context, Result};
use xlang::{
    ast::{Expression, ExpressionKind, FunctionDecl, Program, Statement, UnaryOperator},
    environment::Environment,
    evaluate,
    interpreter::{context::BufferedContext, TreeWalkInterpreter},
    lexer::Span,
    native::create_global_environment,
    parse,
    string::Ident,
    value::{
        error::RuntimeErrorKind,
        formatter::{BasicFormatter, ValueFormatter},
        Object, Value,
    },
};

fn run(source: &str) -> (Result<Value, RuntimeErrorKind>, String) {
    let program = parse(source).expect("Test programs should parse.");
    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    let result = interpreter.run(&program).map_err(|e| e.kind);
    (result, interpreter.into_context().into_data())
}

#[test]
fn test_program_value_is_last_statement() {
    let (result, _) = run("let x = 2; x = x + 3; x");
    assert_eq!(result, Ok(Value::Number(5.0)));
}

#[test]
fn test_empty_program_is_null() {
    let (result, output) = run("");
    assert_eq!(result, Ok(Value::Null));
    assert!(output.is_empty());
}

#[test]
fn test_declaration_returns_value() {
    let (result, _) = run("let x = 4 * 2;");
    assert_eq!(result, Ok(Value::Number(8.0)));
}

#[test]
fn test_unbound_name() {
    let (result, _) = run("y");
    assert_eq!(result, Err(RuntimeErrorKind::UnboundName("y".into())));
}

#[test]
fn test_constant_violation_keeps_value() {
    let program = parse("const x = 1; x = 2;").unwrap();
    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    let error = interpreter.run(&program).unwrap_err();
    assert_eq!(error.kind, RuntimeErrorKind::ConstantViolation("x".into()));
    assert_eq!(error.code(), "RT003");
    assert_eq!(interpreter.get_environment().lookup("x"), Ok(Value::Number(1.0)));
}

#[test]
fn test_object_shorthand() {
    let mut environment = Environment::new();
    environment.declare("x", Value::Number(7.0), false).unwrap();
    let program = parse("{x}").unwrap();
    let mut context = BufferedContext::new();
    let value = evaluate(&program, &mut environment, &mut context).unwrap();

    let mut expected = Object::new();
    expected.insert("x".into(), Value::Number(7.0));
    assert_eq!(value, Value::Object(Rc::new(expected)));
}

#[test]
fn test_object_equality_ignores_order() {
    let (lhs, _) = run("{ a: 1, b: 2 }");
    let (rhs, _) = run("{ b: 2, a: 1 }");
    assert_eq!(lhs, rhs);
}

#[test]
fn test_print_writes_to_context() {
    let (result, output) = run("print(1, { a: 2 }, null)");
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(output, "1 { a: 2 } null\n");
}

#[test]
fn test_not_callable_reports_callee() {
    let program = parse("let n = 3;\nn(1)").unwrap();
    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    let error = interpreter.run(&program).unwrap_err();
    assert_eq!(error.kind, RuntimeErrorKind::NotCallable(Value::Number(3.0)));
    assert_eq!(error.span, Span::new(11, 1));
}

#[test]
fn test_assignment_target_must_be_identifier() {
    let (result, _) = run("let o = {}; {a: 1} = 2");
    assert_eq!(
        result,
        Err(RuntimeErrorKind::InvalidAssignmentTarget("ObjectLiteral"))
    );
}

#[test]
fn test_unsupported_nodes() {
    let span = Span::new(0, 0);
    let function = Program::new(vec![Statement::FunctionDecl(FunctionDecl {
        name: Ident::new("f", span),
        parameters: vec![Ident::new("a", span)],
        body: Vec::new(),
        span,
    })]);
    let unary = Expression::new(
        ExpressionKind::Unary {
            operator: UnaryOperator::Minus,
            rhs: Box::new(Expression::new(ExpressionKind::NumericLiteral(1.0), span)),
        },
        span,
    );

    let mut environment = create_global_environment();
    let mut context = BufferedContext::new();
    let error = evaluate(&function, &mut environment, &mut context).unwrap_err();
    assert_eq!(
        error.kind,
        RuntimeErrorKind::UnsupportedNode("FunctionDeclaration")
    );
    let error = evaluate(&unary, &mut environment, &mut context).unwrap_err();
    assert_eq!(error.kind, RuntimeErrorKind::UnsupportedNode("UnaryExpr"));
}

#[test]
fn test_session_keeps_global_environment() {
    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    let first = parse("let count = 1;").unwrap();
    let second = parse("count = count + 1").unwrap();
    interpreter.run(&first).unwrap();
    assert_eq!(interpreter.run(&second), Ok(Value::Number(2.0)));

    // A failed line leaves earlier bindings intact.
    let bad = parse("count = missing").unwrap();
    assert!(interpreter.run(&bad).is_err());
    assert_eq!(
        interpreter.get_environment().lookup("count"),
        Ok(Value::Number(2.0))
    );

    interpreter.run(&parse("print(count)").unwrap()).unwrap();
    assert_eq!(interpreter.get_context().get_data(), "2\n");
}

#[test]
fn test_global_environment_builtins() {
    let environment = create_global_environment();
    assert_eq!(environment.lookup("true"), Ok(Value::Boolean(true)));
    assert_eq!(environment.lookup("false"), Ok(Value::Boolean(false)));
    assert_eq!(environment.lookup("null"), Ok(Value::Null));
    assert!(environment.is_constant("print"));
    assert!(matches!(
        environment.lookup("time"),
        Ok(Value::NativeFunction(ref f)) if f.get_name() == "time"
    ));
}

#[test]
fn test_scopes() {
    let mut environment = Environment::new();
    environment.declare("a", Value::Number(1.0), false).unwrap();
    environment.declare("c", Value::Number(3.0), true).unwrap();

    let child = environment.enter_scope();
    assert_eq!(environment.current_scope(), child);
    assert_eq!(environment.resolve("a"), Some(environment.global_scope()));

    // Shadowing in a child scope is not a duplicate.
    environment.declare("a", Value::Number(10.0), false).unwrap();
    assert_eq!(environment.lookup("a"), Ok(Value::Number(10.0)));
    assert_eq!(
        environment.declare("a", Value::Null, false),
        Err(RuntimeErrorKind::DuplicateBinding("a".into()))
    );

    // Constants are found through the chain.
    assert_eq!(
        environment.assign("c", Value::Null),
        Err(RuntimeErrorKind::ConstantViolation("c".into()))
    );

    environment.exit_scope();
    assert_eq!(environment.current_scope(), environment.global_scope());
    assert_eq!(environment.lookup("a"), Ok(Value::Number(1.0)));

    environment.exit_scope();
    assert_eq!(environment.depth(), 1);
}

#[test]
fn test_runtime_error_format() {
    let source = "let a = 1;\n\nb";
    let program = parse(source).unwrap();
    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    let error = interpreter.run(&program).unwrap_err();
    assert_eq!(
        BasicFormatter::new(source).format_error(&error),
        "(3) Unbound Name: b"
    );
}

// Data-driven tests

#[test]
fn test_assignment() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/assignment");
    test_engine(input_dir)
}

#[test]
fn test_declaration() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/declaration");
    test_engine(input_dir)
}

#[test]
fn test_object() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/object");
    test_engine(input_dir)
}

#[test]
fn test_operator() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/operator");
    test_engine(input_dir)
}

#[test]
fn test_call() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/call");
    test_engine(input_dir)
}

struct TestCase {
    name: String,
    source: String,
    output: String,
    runtime_errors: String,
}

impl TestCase {
    pub fn check(&self) {
        let value_formatter = BasicFormatter::new(&self.source);

        let program = match parse(&self.source) {
            Ok(program) => program,
            Err(e) => panic!("Failed test {} at parsing stage: {e}", self.name),
        };

        let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
        let result = interpreter.run(&program);
        let output = interpreter.into_context().into_data();

        match result {
            Ok(_) => {
                assert_eq!(self.runtime_errors, "", "Failed test {} at runtime.", self.name);
            }
            Err(e) => {
                let msg = value_formatter.format_error(&e);
                assert_eq!(
                    self.runtime_errors, msg,
                    "Failed test {} at runtime.",
                    self.name,
                );
            }
        }
        assert_eq!(self.output, output, "Failed test {} at print.", self.name);
    }
}

fn test_engine(input_dir: &Path) -> Result<()> {
    let mut succeeded = true;
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let entry = entry?;
        let path = entry.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "x" {
            continue;
        }

        println!("Parsing {path:?}");
        let test_case = parse_test_case(&path)?;
        println!("Checking {}", test_case.name);

        let res = std::panic::catch_unwind(|| {
            test_case.check();
        });
        if res.is_err() {
            println!("\tFails test case {}", test_case.name);
            succeeded = false;
        }
    }

    assert!(succeeded);

    Ok(())
}

/// Reads a test program, collecting its expectations and stripping the
/// annotation comments the language itself cannot lex.
fn parse_test_case(input_path: &Path) -> Result<TestCase> {
    let test_name = AsRef::<Path>::as_ref(
        input_path
            .file_name()
            .expect("File name can't be none as the path is to a real file."),
    )
    .to_string_lossy();

    let input = read_to_string(input_path).context("Failed to open input test data file")?;

    let mut source_lines = Vec::new();
    let mut expected_outputs = Vec::new();
    let mut expected_runtime_errors = Vec::new();

    for (line_index, line) in input.lines().enumerate() {
        let Some(comment_index) = line.find("//") else {
            source_lines.push(line.to_string());
            continue;
        };

        let comment = &line[comment_index..];
        if let Some(expected) = comment.strip_prefix("// expect:") {
            expected_outputs.push(expected.trim().to_string());
        } else if let Some(expected) = comment.strip_prefix("// expect runtime error:") {
            let expected = format!("({}) {}", line_index + 1, expected.trim());
            expected_runtime_errors.push(expected);
        }
        source_lines.push(line[..comment_index].to_string());
    }

    expected_outputs.push(String::new());
    Ok(TestCase {
        name: test_name.into_owned(),
        source: source_lines.join("\n"),
        output: expected_outputs.join("\n"),
        runtime_errors: expected_runtime_errors.join("\n"),
    })
}
