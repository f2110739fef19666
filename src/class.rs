use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::callable::{Callable, LoxFunction};
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

/// A class: its name, an optional superclass and the method table.
///
/// Dispatch is a walk up the superclass chain (`find_method`); the table is
/// fixed once the class declaration has executed.
pub struct LoxClass {
    name: String,
    superclass: Option<Rc<LoxClass>>,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        Self {
            name,
            superclass,
            methods,
        }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        match self.methods.get(name) {
            Some(method) => Some(method.clone()),
            None => self
                .superclass
                .as_ref()
                .and_then(|superclass| superclass.find_method(name)),
        }
    }

    /// Arity of `init`, or zero when no class in the chain defines one.
    pub fn arity(&self) -> usize {
        self.find_method("init")
            .map(|init| init.arity())
            .unwrap_or(0)
    }

    /// Calling a class allocates an instance and runs `init` on it, if any.
    pub fn instantiate(
        class: &Rc<LoxClass>,
        interpreter: &mut Interpreter,
        arguments: &[Value],
    ) -> Result<Value, RuntimeError> {
        debug!("Instantiating class '{}'", class.name);

        let instance = Instance::new(class.clone());

        if let Some(initializer) = class.find_method("init") {
            initializer.bind(&instance).call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxClass")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name.clone()))
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An object created by calling a class. Fields are added on first assignment.
#[derive(Clone)]
pub struct Instance {
    data: Rc<RefCell<InstanceData>>,
}

struct InstanceData {
    class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Instance {
            data: Rc::new(RefCell::new(InstanceData {
                class,
                fields: HashMap::new(),
            })),
        }
    }

    pub fn class(&self) -> Rc<LoxClass> {
        self.data.borrow().class.clone()
    }

    /// Field first, then a freshly bound method from the class chain.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.data.borrow().fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        match self.class().find_method(&name.lexeme) {
            Some(method) => Ok(Value::Callable(Callable::Function(Rc::new(
                method.bind(self),
            )))),
            None => Err(RuntimeError::new(
                name,
                format!("Undefined property '{}'.", name.lexeme),
            )),
        }
    }

    pub fn set(&self, name: &Token, value: Value) {
        self.data
            .borrow_mut()
            .fields
            .insert(name.lexeme.clone(), value);
    }

    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();

        f.debug_struct("Instance")
            .field("class", &data.class.name)
            .field("fields", &data.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance>", self.data.borrow().class.name)
    }
}
