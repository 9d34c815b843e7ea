//! Callable values: user-defined functions and native functions.

use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::ast::FunctionDecl;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Signal};
use crate::value::Value;

/// Something that can be invoked with a fixed arity, producing a value or a
/// runtime error.
pub trait Callable: fmt::Display {
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError>;
}

/// A user-defined function, closing over the environment in effect at the
/// point of its declaration (not at call time).
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Environment,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Environment) -> Self {
        LoxFunction { declaration, closure }
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let call_env = Environment::child(&self.closure);
        for (param, arg) in self.declaration.params.iter().zip(args.into_iter()) {
            call_env.define(param.lexeme.clone(), arg);
        }

        match interpreter.execute_block(&self.declaration.body, call_env)? {
            Signal::Return(value) => Ok(value),
            Signal::Normal => Ok(Value::Nil),
        }
    }
}

impl fmt::Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// The native `clock()` function: arity 0, returns seconds since the Unix epoch.
pub struct NativeClock;

impl Callable for NativeClock {
    fn arity(&self) -> usize {
        0
    }

    fn call(&self, _interpreter: &mut Interpreter, _args: Vec<Value>) -> Result<Value, RuntimeError> {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Ok(Value::Number(secs))
    }
}

impl fmt::Display for NativeClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}
