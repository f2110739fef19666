use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::error::LoxError;
use rox::interpreter::{Interpreter, INTERPRETER_STACK_SIZE};
use rox::parser::Parser;
use rox::scanner::{scan_tokens, Scanner};

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print one JSON object per token
        #[arg(long)]
        json: bool,
    },

    /// Parses a program and prints its syntax tree
    Parse { filename: Option<PathBuf> },

    /// Runs input from a file as a Lox program
    Run { filename: Option<PathBuf> },

    /// Starts an interactive prompt
    Repl,
}

/// Reads the contents of a file as UTF-8 text.
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf).context(format!("File {:?} is not valid UTF-8", filename))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn report(errors: &[LoxError]) {
    for e in errors {
        debug!("Reporting: {}", e);
        eprintln!("{}", e);
    }
}

/// 65 for static errors, 70 for a runtime fault.
fn exit_code(errors: &[LoxError]) -> i32 {
    errors.iter().map(LoxError::exit_code).max().unwrap_or(0)
}

fn tokenize(source: &str, json: bool) -> Result<()> {
    let mut tokenized = true;

    for item in Scanner::new(source) {
        match item {
            Ok(token) if json => println!("{}", serde_json::to_string(&token)?),
            Ok(token) => println!("{}", token),
            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code 65");
        std::process::exit(65);
    }

    info!("Tokenization completed successfully");
    Ok(())
}

fn parse(source: &str) {
    let statements = scan_tokens(source).and_then(|tokens| Parser::new(tokens).parse());

    match statements {
        Ok(statements) => {
            for stmt in &statements {
                println!("{}", AstPrinter::print_stmt(stmt));
            }
        }

        Err(errors) => {
            report(&errors);
            std::process::exit(65);
        }
    }
}

fn run(source: &str) {
    let mut interpreter = Interpreter::new();

    if let Err(errors) = rox::run(&mut interpreter, source) {
        report(&errors);
        std::process::exit(exit_code(&errors));
    }

    info!("Program executed successfully");
}

/// Line-at-a-time prompt over one long-lived interpreter.
fn repl() -> Result<()> {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        if let Err(errors) = rox::run(&mut interpreter, &line) {
            report(&errors);
        }
    }
}

fn main() -> Result<()> {
    // Lox calls recurse on the native stack; give them room to reach the
    // interpreter's own call-depth limit.
    let worker = std::thread::Builder::new()
        .name("rox".to_string())
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(start)
        .context("Failed to spawn interpreter thread")?;

    worker
        .join()
        .map_err(|_| anyhow!("Interpreter thread panicked"))?
}

fn start() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let filename = match args.commands {
        Commands::Repl => return repl(),
        Commands::Tokenize { ref filename, .. }
        | Commands::Parse { ref filename }
        | Commands::Run { ref filename } => filename.clone(),
    };

    let Some(filename) = filename else {
        info!("No filepath provided");
        println!("No input filepath was provided. Exiting...");
        std::process::exit(0);
    };

    let source = read_file(filename)?;

    match args.commands {
        Commands::Tokenize { json, .. } => tokenize(&source, json)?,
        Commands::Parse { .. } => parse(&source),
        Commands::Run { .. } => run(&source),
        Commands::Repl => unreachable!("handled above"),
    }

    Ok(())
}
