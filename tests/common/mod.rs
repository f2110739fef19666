#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::ast::Stmt;
use rox::error::LoxError;
use rox::interpreter::{Interpreter, INTERPRETER_STACK_SIZE};
use rox::parser::Parser;
use rox::scanner::scan_tokens;

/// Print sink whose contents stay readable after the interpreter takes it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn interpreter() -> (Interpreter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let interpreter = Interpreter::with_output(Box::new(buffer.clone()));
    (interpreter, buffer)
}

/// Runs `source` in a fresh interpreter; returns printed output and outcome.
pub fn run(source: &str) -> (String, Result<(), Vec<LoxError>>) {
    let (mut interpreter, buffer) = interpreter();
    let result = rox::run(&mut interpreter, source);
    (buffer.contents(), result)
}

/// Runs `source`, which must succeed, and returns its output.
pub fn output_of(source: &str) -> String {
    let (output, result) = run(source);

    if let Err(errors) = result {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        panic!("program failed:\n{}", messages.join("\n"));
    }

    output
}

/// Runs `source`, which must fail, and returns the rendered diagnostics.
pub fn errors_of(source: &str) -> (String, Vec<String>) {
    let (output, result) = run(source);
    let errors = result.expect_err("program should fail");
    (output, errors.iter().map(|e| e.to_string()).collect())
}

pub fn parse(source: &str) -> Result<Vec<Stmt>, Vec<LoxError>> {
    let tokens = scan_tokens(source)?;
    Parser::new(tokens).parse()
}

/// Runs `f` on a thread with the stack size the CLI gives the interpreter.
pub fn on_interpreter_stack<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    std::thread::Builder::new()
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(f)
        .expect("spawn interpreter thread")
        .join()
        .expect("interpreter thread finished")
}
