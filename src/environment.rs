//! Lexically scoped environment chain.
//!
//! Frames are shared (`Rc<RefCell<_>>`) so a closure can keep its defining
//! frame alive after the block or call that created it has returned, and so
//! that later mutations of a captured variable are visible inside the
//! closure — value semantics (deep clone per block) would break both.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

#[derive(Default)]
struct Frame {
    values: HashMap<String, Value>,
    enclosing: Option<Environment>,
}

/// A reference-counted, interior-mutable environment frame.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Frame::default())))
    }

    /// Creates a child frame whose parent is `self`.
    pub fn child(parent: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            enclosing: Some(parent.clone()),
        })))
    }

    /// Unconditional insert/overwrite in this frame. Shadows any ancestor binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().values.insert(name.into(), value);
    }

    /// Looks up `name.lexeme` in this frame, then its ancestors.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        let frame = self.0.borrow();
        if let Some(value) = frame.values.get(&name.lexeme) {
            return Ok(value.clone());
        }
        if let Some(parent) = &frame.enclosing {
            return parent.get(name);
        }
        Err(RuntimeError::new(
            name.clone(),
            format!("Undefined variable '{}'.", name.lexeme),
        ))
    }

    /// Rebinds an existing variable in the frame where it was defined.
    /// Fails if `name` is not bound anywhere in the chain.
    pub fn assign(&self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let mut frame = self.0.borrow_mut();
        if frame.values.contains_key(&name.lexeme) {
            frame.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }
        match &frame.enclosing {
            Some(parent) => {
                let parent = parent.clone();
                drop(frame);
                parent.assign(name, value)
            }
            None => Err(RuntimeError::new(
                name.clone(),
                format!("Undefined variable '{}'.", name.lexeme),
            )),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
