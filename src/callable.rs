//! Everything that can appear to the left of `( … )`.

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::FunctionDecl;
use crate::class::{Instance, LoxClass};
use crate::environment::{Environment, SharedEnv};
use crate::error::RuntimeError;
use crate::interpreter::{Flow, Interpreter};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Host function signature. The error string becomes a runtime fault at the
/// call site.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> Result<Value, String>;

/// The callable capability: native functions, user functions and classes.
#[derive(Debug, Clone)]
pub enum Callable {
    Native(Rc<NativeFunction>),
    Function(Rc<LoxFunction>),
    Class(Rc<LoxClass>),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(native) => native.arity,
            Callable::Function(function) => function.arity(),
            Callable::Class(class) => class.arity(),
        }
    }

    /// Invokes the callable. Arity has already been checked by the caller.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: &[Value],
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        match self {
            Callable::Native(native) => {
                debug!("Calling native function '{}'", native.name);
                (native.func)(interpreter, arguments).map_err(|msg| RuntimeError::new(paren, msg))
            }

            Callable::Function(function) => {
                interpreter.enter_call(paren)?;
                let result = function.call(interpreter, arguments);
                interpreter.exit_call();
                result
            }

            Callable::Class(class) => {
                interpreter.enter_call(paren)?;
                let result = LoxClass::instantiate(class, interpreter, arguments);
                interpreter.exit_call();
                result
            }
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Class(a), Callable::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(native) => write!(f, "{}", native),
            Callable::Function(function) => write!(f, "{}", function),
            Callable::Class(class) => write!(f, "{}", class),
        }
    }
}

/// A host‑provided function with fixed arity and no captured environment.
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({}/{})", self.name, self.arity)
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}

/// A user function or method together with the environment it closes over.
#[derive(Clone)]
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: SharedEnv,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: SharedEnv, is_initializer: bool) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// A copy of this method whose closure gains a scope binding `this`.
    pub fn bind(&self, instance: &Instance) -> LoxFunction {
        let environment: SharedEnv = Environment::enclosed(self.closure.clone());

        environment
            .borrow_mut()
            .define("this", Value::Instance(instance.clone()));

        LoxFunction {
            declaration: self.declaration.clone(),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }

    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: &[Value],
    ) -> Result<Value, RuntimeError> {
        debug!("Calling user-defined function '{}'", self.name());

        // Parameters live in a scope enclosed by the closure, never by the caller.
        let environment: SharedEnv = Environment::enclosed(self.closure.clone());

        {
            let mut scope = environment.borrow_mut();

            for (param, argument) in self.declaration.params.iter().zip(arguments) {
                scope.define(&param.lexeme, argument.clone());
            }
        }

        let flow: Flow = interpreter.execute_block(&self.declaration.body, environment)?;

        if self.is_initializer {
            let this = Token::new(TokenType::THIS, "this", self.declaration.name.line);
            return self.closure.borrow().get_at(0, &this);
        }

        Ok(match flow {
            Flow::Return(value) => value,
            Flow::Normal => Value::Nil,
        })
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("is_initializer", &self.is_initializer)
            .finish()
    }
}

impl fmt::Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}
