//! Tree‑walking evaluator.
//!
//! Statements run for their effects and report how control left them
//! ([`Flow`]); expressions produce a [`Value`]. A runtime fault travels as the
//! `Err` side of [`IResult`] and aborts the whole run, while `return` is the
//! `Flow::Return` *success* value and is only consumed at the call boundary.

use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::ast::{Expr, ExprId, FunctionDecl, LiteralValue, Stmt};
use crate::callable::{Callable, LoxFunction, NativeFn, NativeFunction};
use crate::class::LoxClass;
use crate::environment::{Environment, SharedEnv};
use crate::error::{Result, RuntimeError};
use crate::token::{Token, TokenType};
use crate::value::{format_number, Value};

/// Result of evaluating or executing one node.
pub type IResult<T> = std::result::Result<T, RuntimeError>;

/// How control left a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Fell off the end; continue with the next statement.
    Normal,

    /// A `return` is unwinding towards the enclosing call.
    Return(Value),
}

/// Deepest chain of nested Lox calls before a run faults with "Stack overflow.".
pub const MAX_CALL_DEPTH: usize = 1000;

/// Stack reserved for a thread that runs Lox programs. Large enough for
/// [`MAX_CALL_DEPTH`] nested calls in an unoptimised build.
pub const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

pub struct Interpreter {
    globals: SharedEnv,
    environment: SharedEnv,
    locals: HashMap<ExprId, usize>,
    out: Box<dyn Write>,
    call_depth: usize,
    started: DateTime<Utc>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter printing to standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Interpreter printing to `out`. Defines native functions such as `clock`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals: SharedEnv = Environment::global();

        let mut interpreter = Self {
            environment: globals.clone(),
            globals,
            locals: HashMap::new(),
            out,
            call_depth: 0,
            started: Utc::now(),
        };

        // Seconds elapsed since this interpreter was created.
        interpreter.define_native("clock", 0, |interpreter, _args| {
            let elapsed = Utc::now().signed_duration_since(interpreter.started);
            let micros = elapsed.num_microseconds().unwrap_or(i64::MAX);
            Ok(Value::Number(micros as f64 / 1_000_000.0))
        });

        interpreter
    }

    /// Registers a host function in the global scope.
    pub fn define_native(&mut self, name: &str, arity: usize, func: NativeFn) {
        debug!("Defining native function '{}'", name);

        let native = NativeFunction {
            name: name.to_string(),
            arity,
            func,
        };

        self.globals
            .borrow_mut()
            .define(name, Value::Callable(Callable::Native(Rc::new(native))));
    }

    pub fn globals(&self) -> SharedEnv {
        self.globals.clone()
    }

    /// Called by the resolver: `id` refers to a binding `depth` scopes out.
    pub fn note_local(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Called by the resolver: `id` refers to a global.
    pub fn note_global(&mut self, id: ExprId) {
        self.locals.remove(&id);
    }

    /// Marks entry into a user function, method or class call made at
    /// `paren`. Faults once [`MAX_CALL_DEPTH`] calls are already active.
    pub fn enter_call(&mut self, paren: &Token) -> IResult<()> {
        if self.call_depth >= MAX_CALL_DEPTH {
            debug!("Call depth limit {} reached", MAX_CALL_DEPTH);
            return Err(RuntimeError::new(paren, "Stack overflow."));
        }

        self.call_depth += 1;
        Ok(())
    }

    /// Pairs with a successful [`Interpreter::enter_call`].
    pub fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// Runs a program. The first runtime fault stops execution and is returned.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Err(e) = self.execute(stmt) {
                self.environment = self.globals.clone();
                self.call_depth = 0;
                self.out.flush()?;
                info!("Interpretation aborted: {}", e.message);
                return Err(e.into());
            }
        }

        self.out.flush()?;

        info!("Interpretation completed successfully");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────

    pub fn execute(&mut self, stmt: &Stmt) -> IResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;

                writeln!(self.out, "{}", value).map_err(|e| {
                    RuntimeError::at_line(expr.line(), format!("Failed to write output: {}", e))
                })?;

                debug!("Printed value: {}", value);
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Defining variable '{}' = {}", name.lexeme, value);

                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let environment = Environment::enclosed(self.environment.clone());
                self.execute_block(statements, environment)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let flow @ Flow::Return(_) = self.execute(body)? {
                        return Ok(flow);
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);

                let function =
                    LoxFunction::new(declaration.clone(), self.environment.clone(), false);

                self.environment.borrow_mut().define(
                    &declaration.name.lexeme,
                    Value::Callable(Callable::Function(Rc::new(function))),
                );

                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Returning value: {}", value);
                Ok(Flow::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.execute_class(name, superclass.as_ref(), methods),
        }
    }

    /// Runs `statements` in `environment`, restoring the current environment
    /// afterwards whether the block finished, returned or faulted.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: SharedEnv) -> IResult<Flow> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(Flow::Normal);

        for stmt in statements {
            match self.execute(stmt) {
                Ok(Flow::Normal) => continue,
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> IResult<Flow> {
        debug!("Defining class '{}'", name.lexeme);

        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Callable(Callable::Class(class)) => Some(class),
                _ => {
                    return Err(RuntimeError::at_line(
                        expr.line(),
                        "Superclass must be a class.",
                    ))
                }
            },
            None => None,
        };

        // Bound first so methods may refer to the class by name.
        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Nil);

        let enclosing: Option<SharedEnv> = superclass.as_ref().map(|superclass| {
            let scope = Environment::enclosed(self.environment.clone());

            scope.borrow_mut().define(
                "super",
                Value::Callable(Callable::Class(superclass.clone())),
            );

            std::mem::replace(&mut self.environment, scope)
        });

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|method| {
                let function = LoxFunction::new(
                    method.clone(),
                    self.environment.clone(),
                    method.name.lexeme == "init",
                );

                (method.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);

        if let Some(enclosing) = enclosing {
            self.environment = enclosing;
        }

        self.environment
            .borrow_mut()
            .assign(name, Value::Callable(Callable::Class(Rc::new(class))))?;

        Ok(Flow::Normal)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => self.environment.borrow_mut().assign_at(
                        distance,
                        name,
                        value.clone(),
                    )?,
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;

                match operator.token_type {
                    TokenType::MINUS => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
                    },
                    TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
                    _ => Err(RuntimeError::new(operator, "Invalid unary operator.")),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(operator, left, right)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                let short_circuit = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let arguments: Vec<Value> = arguments
                    .iter()
                    .map(|argument| self.evaluate(argument))
                    .collect::<IResult<_>>()?;

                let Value::Callable(callable) = callee else {
                    return Err(RuntimeError::new(
                        paren,
                        "Can only call functions and classes.",
                    ));
                };

                if arguments.len() != callable.arity() {
                    return Err(RuntimeError::new(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            arguments.len()
                        ),
                    ));
                }

                callable.call(self, &arguments, paren)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => instance.get(name),
                _ => Err(RuntimeError::new(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(RuntimeError::new(name, "Only instances have fields."));
                };

                let value = self.evaluate(value)?;
                instance.set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> IResult<Value> {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    /// `super.method`: look up from the superclass captured when the class
    /// was declared, and bind to the `this` one scope further in.
    fn evaluate_super(&self, id: ExprId, keyword: &Token, method: &Token) -> IResult<Value> {
        let distance: usize = *self
            .locals
            .get(&id)
            .ok_or_else(|| RuntimeError::new(keyword, "Undefined variable 'super'."))?;

        let Value::Callable(Callable::Class(superclass)) =
            self.environment.borrow().get_at(distance, keyword)?
        else {
            return Err(RuntimeError::new(keyword, "Superclass must be a class."));
        };

        let this = Token::new(TokenType::THIS, "this", keyword.line);

        let Value::Instance(object) = self
            .environment
            .borrow()
            .get_at(distance.saturating_sub(1), &this)?
        else {
            return Err(RuntimeError::new(keyword, "Only instances have properties."));
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Callable(Callable::Function(Rc::new(
                found.bind(&object),
            )))),
            None => Err(RuntimeError::new(
                method,
                format!("Undefined property '{}'.", method.lexeme),
            )),
        }
    }
}

/// Arithmetic, comparison and equality on already evaluated operands.
fn binary(operator: &Token, left: Value, right: Value) -> IResult<Value> {
    debug!(
        "Binary {} on {} and {}",
        operator.lexeme,
        left.type_name(),
        right.type_name()
    );

    match operator.token_type {
        TokenType::EQUAL_EQUAL => return Ok(Value::Bool(left == right)),
        TokenType::BANG_EQUAL => return Ok(Value::Bool(left != right)),
        TokenType::PLUS => return plus(operator, left, right),
        _ => {}
    }

    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(RuntimeError::new(operator, "Operands must be numbers."));
    };

    Ok(match operator.token_type {
        TokenType::MINUS => Value::Number(a - b),
        TokenType::STAR => Value::Number(a * b),
        TokenType::SLASH => Value::Number(a / b),
        TokenType::GREATER => Value::Bool(a > b),
        TokenType::GREATER_EQUAL => Value::Bool(a >= b),
        TokenType::LESS => Value::Bool(a < b),
        TokenType::LESS_EQUAL => Value::Bool(a <= b),
        _ => return Err(RuntimeError::new(operator, "Invalid binary operator.")),
    })
}

/// `+` accepts number+number, string+string and string+number, in that
/// direction only.
fn plus(operator: &Token, left: Value, right: Value) -> IResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

        (Value::String(mut a), Value::String(b)) => {
            a.push_str(&b);
            Ok(Value::String(a))
        }

        (Value::String(mut a), Value::Number(b)) => {
            format_number(&mut a, b)
                .map_err(|_| RuntimeError::new(operator, "Could not format number."))?;
            Ok(Value::String(a))
        }

        _ => Err(RuntimeError::new(
            operator,
            "Operands must be two numbers or two strings.",
        )),
    }
}
