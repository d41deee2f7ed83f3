//! prologue CLI: load a Prolog program and answer queries about it.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use log::{debug, info};
use prologue::{Error, KnowledgeBase, Query};

struct Options {
    path: PathBuf,
    query: Option<String>,
    limit: Option<usize>,
}

fn print_usage() {
    eprintln!("prologue - a simple Prolog interpreter");
    eprintln!();
    eprintln!("Usage: prologue [options] <path>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -q, --query <QUERY>  Answer a single query and exit");
    eprintln!("  -n, --limit <N>      With --query, print at most N solutions");
    eprintln!("  -h, --help           Show this help");
    eprintln!();
    eprintln!("Without --query, queries are read from standard input. After each");
    eprintln!("solution, enter ';' for the next one or an empty line to stop.");
    eprintln!();
    eprintln!("Set RUST_LOG=debug (or trace) to follow the resolution.");
}

/// Returns `Ok(None)` when only the help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut path = None;
    let mut query = None;
    let mut limit = None;

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-q" | "--query" => {
                let value = args.next().ok_or("--query requires an argument")?;
                query = Some(value.clone());
            }
            "-n" | "--limit" => {
                let value = args.next().ok_or("--limit requires an argument")?;
                let n = value
                    .parse()
                    .map_err(|_| format!("invalid limit: {}", value))?;
                limit = Some(n);
            }
            arg if arg.starts_with('-') => return Err(format!("unknown option: {}", arg)),
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    let path = path.ok_or("no input file specified")?;
    Ok(Some(Options { path, query, limit }))
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage();
            return ExitCode::from(2);
        }
    };

    let knowledge_base = match KnowledgeBase::from_file(&options.path) {
        Ok(knowledge_base) => knowledge_base,
        Err(Error::Syntax(err)) => {
            println!("{}", err);
            return ExitCode::from(1);
        }
        Err(err) => {
            debug!("{}", err);
            println!("Invalid path {}.", options.path.display());
            return ExitCode::from(1);
        }
    };
    info!(
        "loaded {} clauses from {}",
        knowledge_base.len(),
        options.path.display()
    );

    let mut stdout = io::stdout();
    let result = match &options.query {
        Some(query) => answer(&knowledge_base, query, options.limit, &mut stdout),
        None => repl(&knowledge_base, io::stdin().lock(), &mut stdout),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

/// Prints the solutions of a single query, one per line.
fn answer(
    knowledge_base: &KnowledgeBase,
    source: &str,
    limit: Option<usize>,
    stdout: &mut impl Write,
) -> Result<()> {
    let query: Query = match source.parse() {
        Ok(query) => query,
        Err(err) => {
            writeln!(stdout, "{}", err)?;
            return Ok(());
        }
    };
    let mut found = false;
    for solution in knowledge_base
        .solve(&query)
        .take(limit.unwrap_or(usize::MAX))
    {
        writeln!(stdout, "{}", solution)?;
        found = true;
    }
    if !found {
        writeln!(stdout, "false.")?;
    }
    Ok(())
}

/// Reads queries from `stdin` and pages through their solutions.
fn repl(
    knowledge_base: &KnowledgeBase,
    stdin: impl BufRead,
    stdout: &mut impl Write,
) -> Result<()> {
    let mut lines = stdin.lines();

    loop {
        write!(stdout, "?- ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            return Ok(());
        };
        let line = line.context("failed to read query")?;
        if line.trim().is_empty() {
            continue;
        }

        let query: Query = match line.parse() {
            Ok(query) => query,
            Err(err) => {
                writeln!(stdout, "{}", err)?;
                continue;
            }
        };

        let mut stopped = false;
        for solution in knowledge_base.solve(&query) {
            write!(stdout, "{} ", solution)?;
            stdout.flush()?;
            let response = match lines.next() {
                Some(response) => response.context("failed to read response")?,
                None => String::new(),
            };
            if response.trim() != ";" {
                writeln!(stdout, ".")?;
                stopped = true;
                break;
            }
        }
        if !stopped {
            writeln!(stdout, "false.")?;
        }
    }
}
