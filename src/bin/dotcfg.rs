//! dotcfg command line interface.
//!
//! Default mode reads a whole program from stdin and prints the parsed
//! statements as pretty JSON on stdout; the first error aborts with a
//! line-numbered diagnostic on stderr and a non-zero exit. With
//! `-i`/`--interactive`, statements are entered one line at a time against
//! a persistent constant environment.

use std::io::Read;
use std::process;

use dotcfg::evaluator::Environment;
use dotcfg::{json, program};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => run_batch(),
        Some("-i") | Some("--interactive") => run_interactive(),
        Some(other) => {
            eprintln!("Unknown argument: {other}");
            eprintln!("Usage: dotcfg [-i | --interactive]  (default: parse stdin to JSON)");
            process::exit(2);
        }
    }
}

/// Read stdin to the end, parse the whole program, print JSON or fail
fn run_batch() {
    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("Error: {err}");
        process::exit(1);
    }

    match program::parse_program(&input) {
        Ok(statements) => {
            let document = json::statements_to_json(&statements);
            match serde_json::to_string_pretty(&document) {
                Ok(rendered) => println!("{rendered}"),
                Err(err) => {
                    eprintln!("Error: {err}");
                    process::exit(1);
                }
            }
        }
        Err(err) => {
            eprintln!("Error on line {}: {}", err.line, err.error);
            process::exit(1);
        }
    }
}

/// Line-at-a-time mode with a persistent environment
fn run_interactive() {
    println!("dotcfg interactive reader");
    println!("Statements: <value>, <value> -> NAME, // comment");
    println!("Type :env to list declared constants, Ctrl+C to exit.");
    println!();

    let mut rl = DefaultEditor::new().expect("Could not initialize line editor");
    let mut env = Environment::new();

    loop {
        match rl.readline("dotcfg> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == ":env" {
                    print_environment(&env);
                    continue;
                }

                match program::parse_line(line, &mut env) {
                    Ok(Some(statement)) => {
                        println!("{}", json::statement_to_json(&statement));
                    }
                    Ok(None) => {} // comment
                    Err(err) => println!("Error: {err}"),
                }
            }

            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }
}

fn print_environment(env: &Environment) {
    let mut count = 0;
    for (name, value) in env.declarations() {
        println!("  {name} = {value}");
        count += 1;
    }
    if count == 0 {
        println!("No constants declared.");
    }
}
