use color_eyre::eyre::{Context, Result};
use proptest::prelude::*;
use std::{
    fs::{read_dir, read_to_string},
    path::Path,
};

use xlang::ast::formatter::{ProgramFormatter, SExpressionFormatter, SourceFormatter};
use xlang::ast::{BinaryOperator, ExpressionKind, Statement};
use xlang::lexer::{tokenize, Span};
use xlang::parser::formatter::{BasicFormatter, ParserFormatter};
use xlang::parser::{parse, Parser, ParserErrorKind, MAX_NESTING_DEPTH};

fn check(input: &str, expected: &str, test_name: &str) {
    let actual = match parse(input) {
        Ok(ref program) => SExpressionFormatter.format(program),
        Err(ref e) => BasicFormatter::new(input).format_error(e),
    };

    assert_eq!(actual, expected, "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    check("", "", "smoke");
}

#[test]
fn test_variable_declaration() {
    check("let x = 3 + 4;", "(let x (+ 3.0 4.0))", "let");
    check("let x;", "(let x)", "let without initializer");
    check("const y = x;", "(const y x)", "const");
}

#[test]
fn test_variable_declaration_structure() {
    let program = parse("let x = 3 + 4;").unwrap();
    assert_eq!(program.len(), 1);
    let statement = program.get_statement(0);
    assert_eq!(statement.map(|s| s.get_span()), Some(Span::new(0, 14)));
    let Some(Statement::VariableDecl(decl)) = statement else {
        panic!("Expected a variable declaration.");
    };
    assert_eq!(&*decl.name.name, "x");
    assert!(!decl.constant);
    let Some(ExpressionKind::Binary { operator, lhs, rhs }) =
        decl.initial.as_ref().map(|e| &e.kind)
    else {
        panic!("Expected a binary initializer.");
    };
    assert_eq!(*operator, BinaryOperator::Add);
    assert_eq!(lhs.kind, ExpressionKind::NumericLiteral(3.0));
    assert_eq!(rhs.kind, ExpressionKind::NumericLiteral(4.0));
}

#[test]
fn test_uninitialized_constant() {
    let error = parse("const y;").unwrap_err();
    assert!(matches!(
        error.kind,
        ParserErrorKind::UninitializedConstant(ref name) if &**name == "y"
    ));
    assert_eq!(error.code(), "PA005");
    check("const y;", "(1) Uninitialized Constant: y", "const y");
}

#[test]
fn test_precedence() {
    check("1 + 2 * 3", "(+ 1.0 (* 2.0 3.0))", "multiplicative binds tighter");
    check("(1 + 2) * 3", "(* (+ 1.0 2.0) 3.0)", "grouping");
    check("10 - 4 - 3", "(- (- 10.0 4.0) 3.0)", "left associative");
    check("8 % 3 / 2", "(/ (% 8.0 3.0) 2.0)", "left associative multiplicative");
    check("a = b = 5", "(= a (= b 5.0))", "right associative assignment");
}

#[test]
fn test_objects() {
    check("{ a: 1, b }", "(object (a 1.0) b)", "mixed properties");
    check("{}", "(object)", "empty");
    check("{ a: 1, }", "(object (a 1.0))", "trailing comma");
    check(
        "x = { a, b: 2 + 3 }",
        "(= x (object a (b (+ 2.0 3.0))))",
        "object value",
    );
    check(
        "{ a: 1 b: 2 }",
        "(1) Unexpected: A = IDENTIFIER b E = COMMA",
        "missing comma",
    );
    check(
        "{a:1} + 2",
        "(1) Non-Expression: BINARY_OPERATOR +",
        "object literal takes priority",
    );
}

#[test]
fn test_calls_and_members() {
    check("print(1, x = 2)", "(call print 1.0 (= x 2.0))", "call");
    check("f()", "(call f)", "no arguments");
    check("f(1)(2)", "(call (call f 1.0) 2.0)", "chained call");
    check("obj.key", "(. obj key)", "member");
    check("obj[1 + 2]", "([] obj (+ 1.0 2.0))", "computed member");
    check("a.b.c(1)", "(call (. (. a b) c) 1.0)", "method call");
    check(
        "obj.1",
        "(1) Non-Identifier Property: NUMBER 1",
        "numeric property",
    );
}

#[test]
fn test_statements() {
    check("x; y", "x\ny", "optional semicolon");
    check("x y", "x\ny", "no separator");
    check(
        "let x = 1",
        "(1) Unexpected: A = EOF EndOfFile E = SEMICOLON",
        "missing semicolon",
    );
    check(
        "let = 1;",
        "(1) Unexpected: A = EQUALS = E = IDENTIFIER",
        "missing name",
    );
    check("1 +", "(1) Unexpected EOF", "dangling operator");
    check(";", "(1) Non-Expression: SEMICOLON ;", "stray semicolon");
}

#[test]
fn test_lexical_error_is_reported() {
    let error = parse("let a = 1;\nlet b = #;").unwrap_err();
    assert!(matches!(error.kind, ParserErrorKind::LexicalError(_)));
    assert_eq!(error.code(), "LX001");
    check(
        "let a = 1;\nlet b = #;",
        "(2) Unrecognized character: '#'",
        "lexical",
    );
}

#[test]
fn test_numeric_literal_must_be_finite() {
    let digits = "9".repeat(400);
    let error = parse(&digits).unwrap_err();
    assert!(matches!(error.kind, ParserErrorKind::InvalidNumericLiteral(_)));
    assert_eq!(error.code(), "PA006");
    assert_eq!(error.span, Span::new(0, 400));
    check(&digits, &format!("(1) Invalid Number: {digits}"), "huge literal");
}

#[test]
fn test_deep_nesting_is_an_error() {
    let depth = 50_000;
    let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let error = parse(&input).unwrap_err();
    assert_eq!(
        error.kind,
        ParserErrorKind::NestingTooDeep(MAX_NESTING_DEPTH)
    );
    assert_eq!(error.code(), "PA007");
    check(
        &input,
        &format!("(1) Nesting Too Deep: {MAX_NESTING_DEPTH}"),
        "deep parens",
    );

    let chain = format!("{}1", "a = ".repeat(depth));
    assert!(parse(&chain).is_err());
    let call = format!("{}1{}", "f(".repeat(depth), ")".repeat(depth));
    assert!(parse(&call).is_err());
    let object = format!("{}1{}", "{a: ".repeat(depth), "}".repeat(depth));
    assert!(parse(&object).is_err());
}

#[test]
fn test_moderate_nesting_parses() {
    let depth = MAX_NESTING_DEPTH / 2;
    let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    check(&input, "1.0", "nested parens");
}

#[test]
fn test_parser_from_tokens_without_eof() {
    let program = Parser::from_tokens(Vec::new()).parse().unwrap();
    assert!(program.is_empty());

    let mut tokens = tokenize("1 + 2").unwrap();
    tokens.pop();
    let program = Parser::from_tokens(tokens).parse().unwrap();
    assert_eq!(SExpressionFormatter.format(&program), "(+ 1.0 2.0)");

    let mut tokens = tokenize("let x =").unwrap();
    tokens.pop();
    let error = Parser::from_tokens(tokens).parse().unwrap_err();
    assert_eq!(error.kind, ParserErrorKind::UnexpectedEof);
    assert_eq!(error.span, Span::new(7, 0));
}

#[test]
fn test_source_formatter() {
    let program = parse("let x = (1 + 2) * f(a, {b: 3});\n{ k }").unwrap();
    assert_eq!(
        SourceFormatter.format(&program),
        "let x = (1 + 2) * f(a, { b: 3 });\n{ k };"
    );
    let program = parse("a - (b - c); x = (f(1)).y").unwrap();
    assert_eq!(SourceFormatter.format(&program), "a - (b - c);\nx = (f(1)).y;");
}

#[test]
fn test_all() -> Result<()> {
    let input_dir = Path::new("./test_data/parser/in");
    let output_dir = Path::new("./test_data/parser/out");

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

        let test_name = AsRef::<Path>::as_ref(
            path.file_name()
                .expect("File name can't be none as the path is to a real file."),
        );

        let input = read_to_string(&path).context("Failed to open input test data file")?;

        let expected = {
            let output_file_name = test_name.with_extension("txt");
            let output_path = output_dir.join(output_file_name);
            read_to_string(output_path).context("Failed to open output test data file")?
        };

        let res = std::panic::catch_unwind(|| {
            check(&input, expected.trim_end(), &test_name.to_string_lossy());
        });
        if res.is_err() {
            succeeded = false;
        }
    }

    assert!(succeeded);

    Ok(())
}

// Property-based tests

fn numeric_literal_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,6}".prop_map(|s| s)
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_filter("Keywords are not identifiers", |s| {
        s != "let" && s != "const"
    })
}

fn operator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("/"), Just("%")]
}

fn expression_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![numeric_literal_strategy(), identifier_strategy()];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), operator_strategy(), inner.clone())
                .prop_map(|(lhs, op, rhs)| format!("{lhs} {op} {rhs}")),
            inner.clone().prop_map(|e| format!("({e})")),
            (identifier_strategy(), inner.clone())
                .prop_map(|(name, value)| format!("({name} = {value})")),
            (inner.clone(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(callee, args)| format!("{callee}({})", args.join(", "))),
            (inner.clone(), identifier_strategy())
                .prop_map(|(object, property)| format!("({object}).{property}")),
            (inner.clone(), inner.clone())
                .prop_map(|(object, property)| format!("({object})[{property}]")),
            (identifier_strategy(), inner.clone(), identifier_strategy()).prop_map(
                |(key, value, shorthand)| format!("({{ {key}: {value}, {shorthand} }})")
            ),
        ]
    })
}

fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        expression_strategy().prop_map(|e| format!("{e};")),
        (identifier_strategy(), expression_strategy())
            .prop_map(|(name, e)| format!("let {name} = {e};")),
        (identifier_strategy(), expression_strategy())
            .prop_map(|(name, e)| format!("const {name} = {e};")),
        identifier_strategy().prop_map(|name| format!("let {name};")),
    ]
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(statement_strategy(), 0..8).prop_map(|stmts| stmts.join("\n"))
}

proptest! {
    #[test]
    fn parser_is_deterministic(input in program_strategy()) {
        let first = parse(&input);
        let second = parse(&input);
        prop_assert!(first.is_ok());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn printed_source_parses_to_same_tree(input in program_strategy()) {
        let program = parse(&input);
        prop_assert!(program.is_ok());
        let program = program.unwrap();

        let printed = SourceFormatter.format(&program);
        let reparsed = parse(&printed);
        prop_assert!(reparsed.is_ok(), "Failed to reparse {}", printed);
        let reparsed = reparsed.unwrap();

        prop_assert_eq!(
            SExpressionFormatter.format(&program),
            SExpressionFormatter.format(&reparsed)
        );
    }
}
