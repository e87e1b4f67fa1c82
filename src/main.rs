// sprig - A small Clojure-like interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sprig_core::{Engine, Error, SprigVal, render};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "sprig", version)]
#[command(about = "Evaluate Sprig source files and expressions", long_about = None)]
struct Args {
    /// Source files, evaluated in order
    files: Vec<PathBuf>,

    /// Expression to evaluate after the files (repeatable)
    #[arg(short = 'e', long = "eval", value_name = "EXPR")]
    exprs: Vec<String>,

    /// Print the result of each file and --eval expression in readable form
    #[arg(short, long)]
    print: bool,

    /// Log at debug level unless SPRIG_LOG or RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    // SPRIG_LOG wins over RUST_LOG
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SPRIG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Evaluate every file, then every expression, handing each result to
/// `report` when `--print` is set.
fn run(args: &Args, mut report: impl FnMut(&SprigVal)) -> Result<(), Error> {
    let engine = Engine::new();

    for file in &args.files {
        let value = engine.eval_file(file)?;
        if args.print {
            report(&value);
        }
    }

    for expr in &args.exprs {
        let value = engine.eval_named(expr, "<eval>")?;
        if args.print {
            report(&value);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args, |value| println!("{}", render(value, true))) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
