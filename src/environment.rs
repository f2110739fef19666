//! Variable storage for one lexical scope, linked to its enclosing scope.
//!
//! Environments are shared (`Rc<RefCell<_>>`): a call frame owns the one it
//! creates, and every closure created inside it keeps it alive afterwards.
//! A closure stored in the very environment it captured forms a reference
//! cycle; such cycles are never collected and live until process exit.

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Handle to a heap‑allocated, shareable environment.
pub type SharedEnv = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<SharedEnv>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: SharedEnv) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Fresh global scope, ready to share.
    pub fn global() -> SharedEnv {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Fresh child scope of `enclosing`, ready to share.
    pub fn enclosed(enclosing: SharedEnv) -> SharedEnv {
        Rc::new(RefCell::new(Self::with_enclosing(enclosing)))
    }

    /// Creates or overwrites `name` in *this* scope.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Key‑existence check on this scope only (a binding may hold `nil`).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Searches this scope, then each enclosing scope in turn.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Reads `name` from the scope exactly `distance` links up the chain.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
        if distance == 0 {
            return self
                .values
                .get(&name.lexeme)
                .cloned()
                .ok_or_else(|| undefined(name));
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get_at(distance - 1, name),
            None => Err(undefined(name)),
        }
    }

    /// Writes `name` in the scope exactly `distance` links up the chain.
    pub fn assign_at(
        &mut self,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<(), RuntimeError> {
        if distance == 0 {
            return match self.values.get_mut(&name.lexeme) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(undefined(name)),
            };
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign_at(distance - 1, name, value),
            None => Err(undefined(name)),
        }
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}
