//! Black-box tests over the parser's statement/expression shape, run through
//! the public `Scanner` → `Parser` pipeline rather than as unit tests.

use jlox::ast::{Expr, Stmt};
use jlox::parser::Parser;
use jlox::scanner::Scanner;
use jlox::token::TokenType;

fn parse(src: &str) -> (Vec<Stmt>, usize) {
    let (tokens, scan_errors) = Scanner::scan(src);
    assert!(scan_errors.is_empty());
    let (stmts, errors) = Parser::parse(tokens);
    (stmts, errors.len())
}

#[test]
fn block_statement_nests_a_statement_list() {
    let (stmts, errors) = parse("{ var x = 1; print x; }");
    assert_eq!(errors, 0);
    match &stmts[0] {
        Stmt::Block(inner) => assert_eq!(inner.len(), 2),
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn if_without_else_parses_a_single_branch() {
    let (stmts, errors) = parse("if (true) print 1;");
    assert_eq!(errors, 0);
    match &stmts[0] {
        Stmt::If { else_branch, .. } => assert!(else_branch.is_none()),
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn call_expression_collects_arguments_left_to_right() {
    let (stmts, errors) = parse("f(1, 2, 3);");
    assert_eq!(errors, 0);
    match &stmts[0] {
        Stmt::Expression(Expr::Call { args, .. }) => assert_eq!(args.len(), 3),
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn unterminated_block_reports_an_error_without_panicking() {
    let (_, errors) = parse("{ var x = 1;");
    assert!(errors > 0);
}

#[test]
fn more_than_255_parameters_is_reported_but_parsing_continues() {
    let params: Vec<String> = (0..300).map(|i| format!("p{i}")).collect();
    let src = format!("fun f({}) {{ return 0; }}", params.join(", "));
    let (stmts, errors) = parse(&src);
    assert!(errors > 0);
    assert_eq!(stmts.len(), 1);
}

#[test]
fn stray_closing_brace_synchronizes_to_the_next_statement() {
    // A bare `}` at the top level is a parse error; the parser should
    // still recover in time to parse the following `print` statement.
    let (stmts, errors) = parse("} print 1;");
    assert!(errors > 0);
    assert!(stmts.iter().any(|s| matches!(s, Stmt::Print(_))));
}

#[test]
fn while_loop_keeps_condition_and_body_separate() {
    let (stmts, errors) = parse("while (x < 3) x = x + 1;");
    assert_eq!(errors, 0);
    match &stmts[0] {
        Stmt::While { condition, .. } => match condition {
            Expr::Binary { op, .. } => assert_eq!(op.kind, TokenType::Less),
            other => panic!("unexpected condition: {:?}", other),
        },
        other => panic!("expected while, got {:?}", other),
    }
}
