//! CLI wrapper for the thus engine.
//!
//! Usage:
//!   thus <file.js>              # Execute a JavaScript file
//!   thus -e "code"              # Evaluate code and print its value
//!   thus                        # Start REPL (interactive mode)
//!
//! Add --strict anywhere to run everything as strict code.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use thus::runner::api::{EvalContext, EvalOptions};
use thus::runner::ds::value::JsValue;

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let force_strict = extract_flag(&mut args, "--strict");
    let options = EvalOptions {
        force_strict,
        ..EvalOptions::default()
    };

    match args.len() {
        0 => run_repl(options),
        1 => {
            let arg = &args[0];
            if arg == "-h" || arg == "--help" {
                print_usage();
                process::exit(0);
            }
            run_file(arg, options);
        }
        2 if args[0] == "-e" || args[0] == "--eval" => {
            eval_code(&args[1], options);
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn extract_flag(args: &mut Vec<String>, flag: &str) -> bool {
    match args.iter().position(|a| a == flag) {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    }
}

fn print_usage() {
    eprintln!("thus - a receiver-binding playground engine");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  thus <file.js>              Execute a JavaScript file");
    eprintln!("  thus -e \"code\"              Evaluate code and print its value");
    eprintln!("  thus --eval \"code\"          Evaluate code and print its value");
    eprintln!("  thus                        Start REPL (interactive mode)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --strict                    Treat all code as strict");
}

fn run_file(filename: &str, options: EvalOptions) {
    let source = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    let mut ctx = EvalContext::with_options(options);
    if let Err(e) = ctx.eval_source(&source) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn eval_code(code: &str, options: EvalOptions) {
    let mut ctx = EvalContext::with_options(options);
    match ctx.eval_source(code) {
        Ok(value) => {
            if !matches!(value, JsValue::Undefined) {
                println!("{}", value);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run_repl(options: EvalOptions) {
    println!("thus v0.1.0");
    println!("Type JavaScript code and press Enter. Type .exit to quit.");
    println!();

    let mut ctx = EvalContext::with_options(options);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().unwrap();

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = input.trim();

        if input == ".exit" || input == ".quit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        // Errors leave the context intact, so the session carries on with
        // everything defined so far.
        match ctx.eval_source(input) {
            Ok(value) => {
                if !matches!(value, JsValue::Undefined) {
                    println!("{}", value);
                }
            }
            Err(e) => {
                eprintln!("{}", e);
            }
        }
    }

    println!("Goodbye!");
}
