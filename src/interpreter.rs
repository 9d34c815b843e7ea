//! Tree-walking evaluator.
//!
//! Statements are executed via `execute`, expressions evaluated via
//! `evaluate`; both dispatch by matching the [`crate::ast`] sum types
//! directly rather than through a visitor trait. `return` is modeled as a
//! [`Signal`] that block/loop execution propagates upward without being
//! mistaken for a [`RuntimeError`] — it is caught exclusively by the
//! invoking [`crate::callable::Callable`].

use std::rc::Rc;

use tracing::instrument;

use crate::ast::{Expr, Stmt};
use crate::callable::{Callable, LoxFunction, NativeClock};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// The outcome of executing a statement: either it ran to completion, or it
/// raised a `return`, which must unwind to the nearest enclosing call frame.
pub enum Signal {
    Normal,
    Return(Value),
}

pub struct Interpreter {
    pub globals: Environment,
    environment: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Environment::new();
        globals.define("clock", Value::Callable(Rc::new(NativeClock)));
        Interpreter {
            environment: globals.clone(),
            globals,
        }
    }

    #[instrument(level = "trace", skip(self, statements), fields(count = statements.len()))]
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Signal::Normal)
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                println!("{}", value.stringify());
                Ok(Signal::Normal)
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.define(name.lexeme.clone(), value);
                Ok(Signal::Normal)
            }
            Stmt::Block(statements) => {
                let block_env = Environment::child(&self.environment);
                self.execute_block(statements, block_env)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Signal::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Signal::Normal => {}
                        signal @ Signal::Return(_) => return Ok(signal),
                    }
                }
                Ok(Signal::Normal)
            }
            Stmt::Function(decl) => {
                let function = LoxFunction::new(decl.clone(), self.environment.clone());
                self.environment
                    .define(decl.name.lexeme.clone(), Value::Callable(Rc::new(function)));
                Ok(Signal::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Signal::Return(value))
            }
        }
    }

    /// Executes `statements` in a fresh frame, restoring the caller's
    /// environment on every exit path — including when a runtime error or a
    /// `return` signal propagates out.
    pub fn execute_block(&mut self, statements: &[Stmt], block_env: Environment) -> Result<Signal, RuntimeError> {
        let previous = std::mem::replace(&mut self.environment, block_env);
        let result = (|| {
            for stmt in statements {
                match self.execute(stmt)? {
                    Signal::Normal => {}
                    signal @ Signal::Return(_) => return Ok(signal),
                }
            }
            Ok(Signal::Normal)
        })();
        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable(name) => self.environment.get(name),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Logical { left, op, right } => {
                let left_val = self.evaluate(left)?;
                match op.kind {
                    TokenType::Or if left_val.is_truthy() => Ok(left_val),
                    TokenType::Or => self.evaluate(right),
                    TokenType::And if !left_val.is_truthy() => Ok(left_val),
                    TokenType::And => self.evaluate(right),
                    _ => unreachable!("logical operator must be `and` or `or`"),
                }
            }
            Expr::Unary { op, right } => {
                let right = self.evaluate(right)?;
                match op.kind {
                    TokenType::Minus => Ok(Value::Number(-number_operand(op, &right)?)),
                    TokenType::Bang => Ok(Value::Bool(!right.is_truthy())),
                    _ => unreachable!("unary operator must be `!` or `-`"),
                }
            }
            Expr::Binary { left, op, right } => self.evaluate_binary(left, op, right),
            Expr::Call { callee, paren, args } => self.evaluate_call(callee, paren, args),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match op.kind {
            TokenType::Greater => Ok(Value::Bool(number_operand(op, &left)? > number_operand(op, &right)?)),
            TokenType::GreaterEqual => Ok(Value::Bool(number_operand(op, &left)? >= number_operand(op, &right)?)),
            TokenType::Less => Ok(Value::Bool(number_operand(op, &left)? < number_operand(op, &right)?)),
            TokenType::LessEqual => Ok(Value::Bool(number_operand(op, &left)? <= number_operand(op, &right)?)),
            TokenType::Minus => Ok(Value::Number(number_operand(op, &left)? - number_operand(op, &right)?)),
            TokenType::Slash => Ok(Value::Number(number_operand(op, &left)? / number_operand(op, &right)?)),
            TokenType::Star => Ok(Value::Number(number_operand(op, &left)? * number_operand(op, &right)?)),
            TokenType::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
                _ => Err(RuntimeError::new(
                    op.clone(),
                    "Operands must be two numbers or two strings.",
                )),
            },
            TokenType::BangEqual => Ok(Value::Bool(!left.lox_eq(&right))),
            TokenType::EqualEqual => Ok(Value::Bool(left.lox_eq(&right))),
            _ => unreachable!("unexpected binary operator"),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, args: &[Expr]) -> Result<Value, RuntimeError> {
        let callee = self.evaluate(callee)?;

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate(arg)?);
        }

        let callable = match &callee {
            Value::Callable(callable) => callable.clone(),
            _ => return Err(RuntimeError::new(paren.clone(), "Can only call functions and classes.")),
        };

        if arg_values.len() != callable.arity() {
            return Err(RuntimeError::new(
                paren.clone(),
                format!("Expected {} arguments but got {}.", callable.arity(), arg_values.len()),
            ));
        }

        callable.call(self, arg_values)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

fn number_operand(op: &Token, value: &Value) -> Result<f64, RuntimeError> {
    match value {
        Value::Number(n) => Ok(*n),
        _ => Err(RuntimeError::new(op.clone(), "Operand must be a number.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn run(src: &str) -> Result<(), RuntimeError> {
        let (tokens, scan_errors) = Scanner::scan(src);
        assert!(scan_errors.is_empty());
        let (stmts, parse_errors) = Parser::parse(tokens);
        assert!(parse_errors.is_empty(), "{:?}", parse_errors);
        Interpreter::new().interpret(&stmts)
    }

    #[test]
    fn arithmetic_and_print() {
        assert!(run("print 1 + 2;").is_ok());
    }

    #[test]
    fn string_concatenation() {
        assert!(run(r#"print "a" + "b";"#).is_ok());
    }

    #[test]
    fn division_by_zero_is_infinity_not_an_error() {
        assert!(run("print 1 / 0;").is_ok());
    }

    #[test]
    fn unary_minus_on_string_is_a_runtime_error() {
        let err = run(r#"print -"x";"#).unwrap_err();
        assert_eq!(err.message, "Operand must be a number.");
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let err = run("print x;").unwrap_err();
        assert!(err.message.contains("Undefined variable"));
    }

    #[test]
    fn and_short_circuits() {
        // if short-circuit failed, calling the undefined `boom()` would error.
        assert!(run(r#"print false and boom();"#).is_ok());
    }

    #[test]
    fn or_short_circuits() {
        assert!(run(r#"print true or boom();"#).is_ok());
    }

    #[test]
    fn closures_share_mutable_captured_state() {
        let src = r#"
            fun makeCounter() {
                var n = 0;
                fun inc() {
                    n = n + 1;
                    return n;
                }
                return inc;
            }
            var c = makeCounter();
            print c();
            print c();
            print c();
        "#;
        assert!(run(src).is_ok());
    }

    #[test]
    fn for_loop_equivalent_to_desugared_while() {
        assert!(run("var x = 0; for (var i = 0; i < 3; i = i + 1) x = x + i; print x;").is_ok());
    }
}
