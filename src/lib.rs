pub mod ast;
pub mod ast_printer;
pub mod callable;
pub mod class;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod value;

use log::info;

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;

/// Scan, parse, resolve and run `source` on `interpreter`.
///
/// Static errors are all returned together and nothing executes; a runtime
/// fault is returned alone after whatever ran before it.
pub fn run(interpreter: &mut Interpreter, source: &str) -> Result<(), Vec<LoxError>> {
    let mut errors: Vec<LoxError> = Vec::new();
    let mut tokens = Vec::new();

    // Lexical errors do not stop the parser from reporting its own.
    for item in scanner::Scanner::new(source) {
        match item {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    let statements = match Parser::new(tokens).parse() {
        Ok(statements) if errors.is_empty() => statements,
        Ok(_) => return Err(errors),
        Err(mut syntax_errors) => {
            errors.append(&mut syntax_errors);
            return Err(errors);
        }
    };

    Resolver::new(interpreter).resolve(&statements)?;

    info!("Static passes succeeded; executing");

    interpreter.interpret(&statements).map_err(|e| vec![e])
}
