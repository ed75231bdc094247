//! Diesel Compiler front end
//!
//! Lexes Diesel sources and reports tokens or diagnostics.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use diesel::feedback::{CheckFeedback, ErrorReport, LexStats};
use diesel::stdlib::{RuntimeLibrary, RuntimeRegistry};
use diesel::{Lexer, LexerConfig, Token};

/// Diesel Compiler
#[derive(Parser, Debug)]
#[command(name = "dieselc")]
#[command(version = "0.1.0")]
#[command(about = "Diesel compiler front end - lexes sources for the C transpiler")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file, checked when no subcommand is given
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    lex: LexArgs,
}

#[derive(Args, Debug, Clone, Copy)]
struct LexArgs {
    /// Reject user-defined names (keyword-only grammar)
    #[arg(long, global = true)]
    keywords_only: bool,

    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

impl LexArgs {
    fn config(&self) -> LexerConfig {
        if self.keywords_only {
            LexerConfig::keywords_only()
        } else {
            LexerConfig::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Check a source file for lexical errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match &cli.command {
        Some(Commands::Tokens { input }) => dump_tokens(input, cli.lex),
        Some(Commands::Check { input }) => check_file(input, cli.lex),
        Some(Commands::Version) => {
            println!("dieselc 0.1.0");
            println!("Diesel Compiler");
            println!("License: Apache-2.0");
            Ok(true)
        }
        None => match &cli.input {
            Some(input) => check_file(input, cli.lex),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: dieselc <FILE> or dieselc tokens <FILE>");
                process::exit(1);
            }
        },
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

/// Print every token; returns whether lexing succeeded
fn dump_tokens(input: &Path, args: LexArgs) -> Result<bool> {
    let source = read_source(input)?;
    let file_name = input.display().to_string();

    let stream = match Lexer::with_config(&source, args.config()).tokenize() {
        Ok(stream) => stream,
        Err(e) => {
            let report = ErrorReport::from_lex_error(&e, &file_name, &source);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                eprintln!("{}", report.render());
            }
            return Ok(false);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stream)?);
        return Ok(true);
    }

    let runtime = RuntimeRegistry::new();
    for token in &stream {
        println!("{}", describe(token, &runtime));
    }
    Ok(true)
}

fn describe(token: &Token<'_>, runtime: &impl RuntimeLibrary) -> String {
    let mut line = format!(
        "{:>4}:{:<3} {:<15} {}",
        token.line,
        token.column,
        format!("{:?}", token.kind),
        token.lexeme
    );
    if let Some(desc) = token.descriptor() {
        let sign = if desc.signed { "signed" } else { "unsigned" };
        match runtime.type_for(token.kind) {
            Some(ty) if !desc.is_deferred() => {
                line.push_str(&format!("  [{} bytes, {}, {}]", desc.byte_size, sign, ty.c_name))
            }
            Some(ty) => line.push_str(&format!("  [deferred size, {}]", ty.c_name)),
            None => line.push_str("  [deferred size]"),
        }
    }
    line
}

/// Lex a file and report the outcome; returns whether it was clean
fn check_file(input: &Path, args: LexArgs) -> Result<bool> {
    let source = read_source(input)?;
    let file_name = input.display().to_string();
    info!("checking {}", file_name);

    let started = Instant::now();
    let result = Lexer::with_config(&source, args.config()).tokenize();
    let mut stats = LexStats {
        lex_time_us: started.elapsed().as_micros() as u64,
        bytes: source.len(),
        loc: source.lines().count(),
        ..Default::default()
    };

    let feedback = match result {
        Ok(stream) => {
            stats.token_count = stream.len();
            CheckFeedback::success(file_name, stats)
        }
        Err(e) => {
            let report = ErrorReport::from_lex_error(&e, &file_name, &source);
            CheckFeedback::failure(file_name, vec![report], stats)
        }
    };

    if args.json {
        println!("{}", feedback.to_json());
    } else if feedback.success {
        println!("✅ No errors found ({} tokens)", feedback.stats.token_count);
    } else {
        for report in &feedback.diagnostics {
            eprintln!("{}", report.render());
        }
    }
    Ok(feedback.success)
}
